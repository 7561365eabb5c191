use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// A spacing or punctuation problem found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Byte offset in the original document.
    pub index: usize,
    /// Length in bytes of the original text the problem covers.
    pub length: usize,
    /// Name of the rule that reported it.
    pub name: String,
    pub message: String,
}

impl Validation {
    pub fn span(&self) -> Range<usize> {
        self.index..self.index + self.length
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::warning()
            .with_message(&self.message)
            .with_code(&self.name)
            .with_labels(vec![Label::primary(file_id, self.span())])
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.index, self.message, self.name)
    }
}
