use std::ops::RangeInclusive;

use crate::block::{Mark, MarkKind};

use super::char_class::{CharClass, classify};
use super::{MarkRef, MarkSide, Token, TokenKind};

/// The whitespace between two neighbouring visible tokens.
///
/// `left` and `right` index into [`TokenStream::tokens`]; any tokens in
/// between are hyper delimiters. The gap's whitespace lives in the
/// `space_after` slots of tokens `left..right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub left: usize,
    pub right: usize,
}

impl Gap {
    pub fn has_delimiters(&self) -> bool {
        self.right - self.left > 1
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub marks: Vec<Mark>,
}

impl TokenStream {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    // -------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------

    pub fn visible(&self) -> Vec<usize> {
        (0..self.tokens.len()).filter(|&i| self.tokens[i].is_visible()).collect()
    }

    pub fn next_visible(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.tokens[i].is_visible())
    }

    pub fn prev_visible(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| self.tokens[i].is_visible())
    }

    pub fn gap_after(&self, index: usize) -> Option<Gap> {
        self.next_visible(index).map(|right| Gap { left: index, right })
    }

    pub fn gap_before(&self, index: usize) -> Option<Gap> {
        self.prev_visible(index).map(|left| Gap { left, right: index })
    }

    pub fn gaps(&self) -> Vec<Gap> {
        self.visible()
            .windows(2)
            .map(|pair| Gap {
                left: pair[0],
                right: pair[1],
            })
            .collect()
    }

    /// The next visible token when nothing but an empty gap separates it.
    pub fn adjacent_next(&self, index: usize) -> Option<usize> {
        let gap = self.gap_after(index)?;
        (!gap.has_delimiters() && self.raw_gap(gap).is_empty()).then_some(gap.right)
    }

    /// The whitespace before `index` in the source.
    pub fn raw_space_before(&self, index: usize) -> &str {
        match index.checked_sub(1) {
            Some(prev) => &self.tokens[prev].raw_space_after,
            None => "",
        }
    }

    /// Match `text` against the raw text of adjacent visible tokens starting
    /// at `index`; returns the index of the last token of the match.
    pub fn match_raw_sequence(&self, index: usize, text: &str) -> Option<usize> {
        let mut rest = text.strip_prefix(self.tokens[index].raw.as_str())?;
        let mut last = index;
        while !rest.is_empty() {
            last = self.adjacent_next(last)?;
            rest = rest.strip_prefix(self.tokens[last].raw.as_str())?;
        }
        Some(last)
    }

    // -------------------------------------------------------------------
    // Gaps
    // -------------------------------------------------------------------

    pub fn raw_gap(&self, gap: Gap) -> String {
        (gap.left..gap.right).map(|i| self.tokens[i].raw_space_after.as_str()).collect()
    }

    pub fn current_gap(&self, gap: Gap) -> String {
        (gap.left..gap.right).map(|i| self.tokens[i].space_after.as_str()).collect()
    }

    pub fn gap_changed(&self, gap: Gap) -> bool {
        (gap.left..gap.right).any(|i| self.tokens[i].space_after != self.tokens[i].raw_space_after)
    }

    /// Byte offset of the gap in the block: the end of the left token.
    pub fn gap_offset(&self, gap: Gap) -> usize {
        self.tokens[gap.left].end()
    }

    /// A gap is fixed when either side is locked or a raw span.
    pub fn gap_is_fixed(&self, gap: Gap) -> bool {
        let (left, right) = (&self.tokens[gap.left], &self.tokens[gap.right]);
        left.locked || right.locked || left.is_raw_span() || right.is_raw_span()
    }

    /// The slot a space is written to: after the last closing delimiter
    /// that precedes the first opening one, so spaces end up outside
    /// enclosing hyper marks.
    fn outer_slot(&self, gap: Gap) -> usize {
        let mut slot = gap.left;
        for i in gap.left + 1..gap.right {
            match self.tokens[i].kind {
                TokenKind::HyperMark(MarkSide::Close) => slot = i,
                TokenKind::HyperMark(MarkSide::Open) => break,
                _ => {}
            }
        }
        slot
    }

    /// Make the gap read as exactly `space`. Returns whether anything
    /// changed; fixed gaps are never touched.
    pub fn set_gap(&mut self, gap: Gap, space: &str) -> bool {
        if self.gap_is_fixed(gap) {
            return false;
        }
        let outer = self.outer_slot(gap);
        let mut changed = false;
        for i in gap.left..gap.right {
            let wanted = if i == outer { space } else { "" };
            if self.tokens[i].space_after != wanted {
                self.tokens[i].space_after = wanted.to_string();
                changed = true;
            }
        }
        changed
    }

    /// Put the source whitespace back, ignoring locks.
    pub fn restore_gap(&mut self, gap: Gap) {
        for token in &mut self.tokens[gap.left..gap.right] {
            token.space_after.clone_from(&token.raw_space_after);
        }
    }

    // -------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------

    /// Replace a punctuation token's text. Refuses locked tokens and
    /// anything that is not punctuation. The kind follows the new text.
    pub fn replace_punctuation(&mut self, index: usize, text: &str) -> bool {
        let token = &mut self.tokens[index];
        if token.locked || !token.is_punctuation() || token.content == text {
            return false;
        }
        token.content = text.to_string();
        match text.chars().next().map(classify) {
            Some(CharClass::FullWidthPunctuation) => token.kind = TokenKind::FullWidthPunctuation,
            Some(CharClass::HalfWidthPunctuation) => token.kind = TokenKind::HalfWidthPunctuation,
            _ => {}
        }
        true
    }

    /// Restore the raw text of the tokens in `range` and of the gaps
    /// between them, then lock the punctuation among them so the gaps
    /// touching it stay fixed.
    pub fn restore_and_lock(&mut self, range: RangeInclusive<usize>) {
        let (first, last) = (*range.start(), *range.end());
        for i in first..=last {
            let token = &mut self.tokens[i];
            if token.is_punctuation() {
                token.content.clone_from(&token.raw);
                token.kind = match classify(token.raw.chars().next().unwrap_or(' ')) {
                    CharClass::FullWidthPunctuation => TokenKind::FullWidthPunctuation,
                    _ => TokenKind::HalfWidthPunctuation,
                };
            }
            if token.is_punctuation() {
                token.locked = true;
            }
            if i < last {
                token.space_after.clone_from(&token.raw_space_after);
            }
        }
    }

    /// Merge the tokens in `range` into one code span and record the mark.
    pub fn coalesce_code(&mut self, range: RangeInclusive<usize>) -> usize {
        let (first, last) = (*range.start(), *range.end());
        let mut raw = String::new();
        for i in first..last {
            raw.push_str(&self.tokens[i].raw);
            raw.push_str(&self.tokens[i].raw_space_after);
        }
        raw.push_str(&self.tokens[last].raw);

        let start = self.tokens[first].index;
        let id = self.marks.len();
        self.marks.push(Mark::code(start..start + raw.len()));

        let mut merged = Token::new(TokenKind::HyperContent, &raw, start);
        merged.mark = Some(MarkRef {
            id,
            kind: MarkKind::Code,
        });
        merged.raw_space_after.clone_from(&self.tokens[last].raw_space_after);
        merged.space_after.clone_from(&self.tokens[last].space_after);
        self.tokens.splice(first..=last, [merged]);
        first
    }

    /// The block text as the rules left it.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            out.push_str(&token.content);
            out.push_str(&token.space_after);
        }
        out
    }
}
