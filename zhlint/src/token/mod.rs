//! Tokens and the token stream the rules operate on.
//!
//! A block is partitioned into tokens; every token owns its text (`raw`)
//! and the whitespace that follows it (`raw_space_after`). Rules never edit
//! bytes directly: they rewrite `content` and `space_after`, and the
//! reconstructor renders the final text from those.

pub mod char_class;
mod stream;
mod tokenizer;

use crate::block::MarkKind;

pub use stream::{Gap, TokenStream};
pub use tokenizer::tokenize;

/// Which side of a hyper mark a delimiter token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkSide {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    HalfWidthContent,
    FullWidthContent,
    HalfWidthPunctuation,
    FullWidthPunctuation,
    /// Leading whitespace of a block. Carries its text in `raw_space_after`.
    Space,
    /// A hyper mark delimiter such as `**` or `](url)`.
    HyperMark(MarkSide),
    /// An opaque code or raw span.
    HyperContent,
}

/// The mark a token was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkRef {
    /// Index into [`TokenStream::marks`].
    pub id: usize,
    pub kind: MarkKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Current text; starts equal to `raw`.
    pub content: String,
    /// Original text.
    pub raw: String,
    /// Byte offset of `raw` in the block.
    pub index: usize,
    pub raw_space_after: String,
    pub space_after: String,
    pub mark: Option<MarkRef>,
    /// Set by rules that recognise a fixed idiom; later rules leave it alone.
    pub locked: bool,
}

impl Token {
    pub fn new(kind: TokenKind, raw: &str, index: usize) -> Self {
        Token {
            kind,
            content: raw.to_string(),
            raw: raw.to_string(),
            index,
            raw_space_after: String::new(),
            space_after: String::new(),
            mark: None,
            locked: false,
        }
    }

    /// Exclusive end of the token's own text.
    pub fn end(&self) -> usize {
        self.index + self.raw.len()
    }

    /// Exclusive end including the trailing whitespace.
    pub fn span_end(&self) -> usize {
        self.end() + self.raw_space_after.len()
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.kind, TokenKind::Space | TokenKind::HyperMark(_))
    }

    pub fn is_content(&self) -> bool {
        matches!(self.kind, TokenKind::HalfWidthContent | TokenKind::FullWidthContent)
    }

    pub fn is_full_width_content(&self) -> bool {
        self.kind == TokenKind::FullWidthContent
    }

    pub fn is_half_width_content(&self) -> bool {
        self.kind == TokenKind::HalfWidthContent
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self.kind, TokenKind::HalfWidthPunctuation | TokenKind::FullWidthPunctuation)
    }

    pub fn is_half_width_punctuation(&self, text: &str) -> bool {
        self.kind == TokenKind::HalfWidthPunctuation && self.content == text
    }

    pub fn is_code(&self) -> bool {
        self.kind == TokenKind::HyperContent && self.mark.is_some_and(|m| m.kind == MarkKind::Code)
    }

    pub fn is_raw_span(&self) -> bool {
        self.kind == TokenKind::HyperContent && !self.is_code()
    }

    /// Content or a code span: things sentence punctuation attaches to.
    pub fn is_wordlike(&self) -> bool {
        self.is_content() || self.is_code()
    }

    pub fn is_digits(&self) -> bool {
        self.kind == TokenKind::HalfWidthContent && self.content.bytes().all(|b| b.is_ascii_digit())
    }
}
