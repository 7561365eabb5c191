//! Ignore patterns and the regions of a document they cover.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::validation::Validation;

/// A text fragment pattern, written `prefix-,textStart,textEnd,-suffix`
/// where only `textStart` is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub prefix: Option<String>,
    pub text_start: String,
    pub text_end: Option<String>,
    pub suffix: Option<String>,
}

impl TextFragment {
    fn matches(&self, value: &str) -> Vec<Range<usize>> {
        let prefix = self.prefix.as_deref().unwrap_or("");
        let head = format!("{prefix}{}", self.text_start);
        let step = head.chars().next().map_or(1, char::len_utf8);

        let mut found = Vec::new();
        let mut from = 0;
        while let Some(pos) = value[from..].find(&head) {
            let at = from + pos;
            let start = at + prefix.len();
            let mut end = start + self.text_start.len();
            if let Some(text_end) = &self.text_end {
                match value[end..].find(text_end.as_str()) {
                    Some(offset) => end += offset + text_end.len(),
                    None => break,
                }
            }
            let suffix_ok = self.suffix.as_deref().is_none_or(|s| value[end..].starts_with(s));
            if suffix_ok {
                found.push(start..end);
                from = end;
            } else {
                from = at + step;
            }
        }
        found
    }
}

impl FromStr for TextFragment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split(',').collect();

        let prefix = match parts.first() {
            Some(first) if parts.len() > 1 && first.ends_with('-') => {
                let prefix = first.trim_end_matches('-').to_string();
                parts.remove(0);
                Some(prefix)
            }
            _ => None,
        };
        let suffix = match parts.last() {
            Some(last) if parts.len() > 1 && last.starts_with('-') => {
                let suffix = last.trim_start_matches('-').to_string();
                parts.pop();
                Some(suffix)
            }
            _ => None,
        };

        let invalid = |reason: &str| ConfigError::InvalidIgnorePattern {
            pattern: s.to_string(),
            reason: reason.to_string(),
        };
        let (text_start, text_end) = match parts.as_slice() {
            [start] => (*start, None),
            [start, end] => (*start, Some(end.to_string())),
            _ => return Err(invalid("expected `prefix-,textStart,textEnd,-suffix`")),
        };
        if text_start.is_empty() {
            return Err(invalid("textStart is empty"));
        }

        Ok(TextFragment {
            prefix: prefix.filter(|p| !p.is_empty()),
            text_start: text_start.to_string(),
            text_end: text_end.filter(|e| !e.is_empty()),
            suffix: suffix.filter(|s| !s.is_empty()),
        })
    }
}

/// One user- or document-supplied ignore pattern.
#[derive(Debug, Clone)]
pub enum IgnoredCase {
    Fragment(TextFragment),
    /// Written `/pattern/` in configuration.
    Pattern(Regex),
}

impl IgnoredCase {
    fn matches(&self, value: &str) -> Vec<Range<usize>> {
        match self {
            IgnoredCase::Fragment(fragment) => fragment.matches(value),
            IgnoredCase::Pattern(regex) => regex
                .find_iter(value)
                .filter(|m| !m.is_empty())
                .map(|m| m.range())
                .collect(),
        }
    }
}

impl FromStr for IgnoredCase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('/').and_then(|rest| rest.strip_suffix('/')) {
            Some(pattern) if !pattern.is_empty() => Regex::new(pattern)
                .map(IgnoredCase::Pattern)
                .map_err(|e| ConfigError::InvalidIgnorePattern {
                    pattern: s.to_string(),
                    reason: e.to_string(),
                }),
            _ => s.parse().map(IgnoredCase::Fragment),
        }
    }
}

impl fmt::Display for IgnoredCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoredCase::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
            IgnoredCase::Fragment(fragment) => {
                if let Some(prefix) = &fragment.prefix {
                    write!(f, "{prefix}-,")?;
                }
                write!(f, "{}", fragment.text_start)?;
                if let Some(end) = &fragment.text_end {
                    write!(f, ",{end}")?;
                }
                if let Some(suffix) = &fragment.suffix {
                    write!(f, ",-{suffix}")?;
                }
                Ok(())
            }
        }
    }
}

/// A document region covered by an ignore pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoredMark {
    /// Absolute start offset.
    pub start: usize,
    /// Absolute exclusive end offset.
    pub end: usize,
    /// Index of the pattern that produced the region.
    pub case: usize,
}

impl IgnoredMark {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// All regions of `value` (a block starting at `block_start`) matched by `cases`.
pub fn find_ignored_marks(value: &str, block_start: usize, cases: &[IgnoredCase]) -> Vec<IgnoredMark> {
    let mut marks: Vec<IgnoredMark> = cases
        .iter()
        .enumerate()
        .flat_map(|(case, pattern)| {
            pattern.matches(value).into_iter().map(move |range| IgnoredMark {
                start: block_start + range.start,
                end: block_start + range.end,
                case,
            })
        })
        .collect();
    marks.sort_by_key(|m| (m.start, m.end));
    marks
}

/// How ignored regions filter the final validation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoredFilter {
    /// Drop validations that start inside an ignored region.
    #[default]
    Exclude,
    /// When any ignored region exists, keep only the validations inside one.
    KeepOnly,
}

impl IgnoredFilter {
    pub fn apply(self, validations: Vec<Validation>, marks: &[IgnoredMark]) -> Vec<Validation> {
        if marks.is_empty() {
            return validations;
        }
        let inside = |v: &Validation| marks.iter().any(|m| m.contains(v.index));
        validations
            .into_iter()
            .filter(|v| match self {
                IgnoredFilter::Exclude => !inside(v),
                IgnoredFilter::KeepOnly => inside(v),
            })
            .collect()
    }
}
