use crate::token::{TokenKind, TokenStream};

use super::Finding;

pub const NAME: &str = "unify-punctuation";

const MESSAGE: &str = "use full-width punctuation in Chinese text";

const FULL_WIDTH: [(&str, &str); 6] = [
    (",", "，"),
    (".", "。"),
    (";", "；"),
    (":", "："),
    ("!", "！"),
    ("?", "？"),
];

/// Sentence punctuation between content (or the block edge) turns
/// full-width when either neighbour is full-width content. Half:half pairs
/// like `1,000` stay as written.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for i in stream.visible() {
        let token = &stream.tokens[i];
        if token.kind != TokenKind::HalfWidthPunctuation || token.locked {
            continue;
        }
        let Some(&(_, full)) = FULL_WIDTH.iter().find(|(half, _)| token.content == *half) else {
            continue;
        };

        let prev = Side::of(stream, stream.prev_visible(i));
        let next = Side::of(stream, stream.next_visible(i));
        let convert = match (prev, next) {
            (Side::Other, _) | (_, Side::Other) => false,
            (Side::FullWidth, _) | (_, Side::FullWidth) => true,
            _ => false,
        };
        if convert && stream.replace_punctuation(i, full) {
            findings.push(Finding::content(stream.tokens[i].index, MESSAGE));
        }
    }
    findings
}

/// What sits on one side of a punctuation mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    FullWidth,
    HalfWidth,
    Edge,
    /// Other punctuation, code and raw spans.
    Other,
}

impl Side {
    fn of(stream: &TokenStream, index: Option<usize>) -> Side {
        match index.map(|i| stream.tokens[i].kind) {
            None => Side::Edge,
            Some(TokenKind::FullWidthContent) => Side::FullWidth,
            Some(TokenKind::HalfWidthContent) => Side::HalfWidth,
            Some(_) => Side::Other,
        }
    }
}
