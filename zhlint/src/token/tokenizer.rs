use std::ops::Range;

use crate::block::{Mark, MarkKind, flatten_marks};

use super::char_class::{CharClass, classify, is_apostrophe};
use super::{MarkRef, MarkSide, Token, TokenKind, TokenStream};

/// Split a block into tokens. The tokens partition `value` exactly; the
/// marks are flattened first and each surviving mark becomes opaque
/// tokens (a whole span for code/raw, two delimiters for hyper marks).
pub fn tokenize(value: &str, marks: &[Mark]) -> TokenStream {
    let marks = flatten_marks(marks, value);

    let mut opaque: Vec<(Range<usize>, TokenKind, MarkRef)> = Vec::new();
    for (id, mark) in marks.iter().enumerate() {
        let mark_ref = MarkRef { id, kind: mark.kind };
        match mark.kind {
            MarkKind::Code | MarkKind::Raw => {
                opaque.push((mark.span(), TokenKind::HyperContent, mark_ref));
            }
            MarkKind::Hyper => {
                if mark.open_len > 0 {
                    opaque.push((mark.open_span(), TokenKind::HyperMark(MarkSide::Open), mark_ref));
                }
                if mark.close_len > 0 {
                    opaque.push((mark.close_span(), TokenKind::HyperMark(MarkSide::Close), mark_ref));
                }
            }
        }
    }
    opaque.sort_by_key(|(range, _, _)| range.start);

    let mut scanner = Scanner {
        value,
        tokens: Vec::new(),
    };
    let mut cursor = 0;
    for (range, kind, mark_ref) in opaque {
        scanner.scan_text(cursor, range.start);
        let mut token = Token::new(kind, &value[range.clone()], range.start);
        token.mark = Some(mark_ref);
        scanner.tokens.push(token);
        cursor = range.end;
    }
    scanner.scan_text(cursor, value.len());

    let stream = TokenStream {
        tokens: scanner.tokens,
        marks,
    };
    assert_partition(&stream, value.len());
    stream
}

struct Scanner<'a> {
    value: &'a str,
    tokens: Vec<Token>,
}

impl Scanner<'_> {
    fn scan_text(&mut self, from: usize, to: usize) {
        let text = &self.value[from..to];
        let mut run: Option<(usize, CharClass)> = None;

        let mut chars = text.char_indices().peekable();
        let mut prev: Option<char> = None;
        while let Some((offset, ch)) = chars.next() {
            let at = from + offset;
            let next = chars.peek().map(|&(_, c)| c);
            let mut class = classify(ch);

            if is_apostrophe(ch)
                && prev.is_some_and(|c| c.is_alphabetic())
                && next.is_some_and(|c| c.is_alphabetic() && classify(c) == CharClass::HalfWidthContent)
                && matches!(run, Some((_, CharClass::HalfWidthContent)))
            {
                class = CharClass::HalfWidthContent;
            }
            prev = Some(ch);

            match class {
                CharClass::Whitespace => {
                    self.flush(&mut run, at);
                    self.push_space(ch);
                }
                CharClass::HalfWidthContent | CharClass::FullWidthContent => match run {
                    Some((_, current)) if current == class => {}
                    _ => {
                        self.flush(&mut run, at);
                        run = Some((at, class));
                    }
                },
                CharClass::HalfWidthPunctuation | CharClass::FullWidthPunctuation => {
                    self.flush(&mut run, at);
                    let kind = if class == CharClass::HalfWidthPunctuation {
                        TokenKind::HalfWidthPunctuation
                    } else {
                        TokenKind::FullWidthPunctuation
                    };
                    self.tokens.push(Token::new(kind, &self.value[at..at + ch.len_utf8()], at));
                }
            }
        }
        self.flush(&mut run, to);
    }

    fn flush(&mut self, run: &mut Option<(usize, CharClass)>, end: usize) {
        if let Some((start, class)) = run.take() {
            let kind = if class == CharClass::FullWidthContent {
                TokenKind::FullWidthContent
            } else {
                TokenKind::HalfWidthContent
            };
            self.tokens.push(Token::new(kind, &self.value[start..end], start));
        }
    }

    fn push_space(&mut self, ch: char) {
        if self.tokens.is_empty() {
            self.tokens.push(Token::new(TokenKind::Space, "", 0));
        }
        if let Some(last) = self.tokens.last_mut() {
            last.raw_space_after.push(ch);
            last.space_after.push(ch);
        }
    }
}

fn assert_partition(stream: &TokenStream, len: usize) {
    let mut expected = 0;
    for token in &stream.tokens {
        assert_eq!(token.index, expected, "token {:?} does not start where the previous one ended", token.raw);
        expected = token.span_end();
    }
    assert_eq!(expected, len, "tokens do not cover the whole block");
}
