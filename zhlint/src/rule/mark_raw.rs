use crate::token::{TokenKind, TokenStream};

use super::{Finding, space_gap};

pub const NAME: &str = "mark-raw";

const MESSAGE: &str = "a code span should be separated from adjacent content by one space";

/// Backtick pairs the segmenters did not already turn into code spans
/// become code spans here; every code span then gets one space on each
/// side that touches content.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    coalesce_backticks(stream);

    let mut findings = Vec::new();
    for i in stream.visible() {
        if !stream.tokens[i].is_code() {
            continue;
        }
        for gap in [stream.gap_before(i), stream.gap_after(i)].into_iter().flatten() {
            let other = if gap.left == i { gap.right } else { gap.left };
            if stream.tokens[other].is_content() {
                space_gap(stream, gap, " ", MESSAGE, &mut findings);
            }
        }
    }
    findings
}

fn is_backtick(stream: &TokenStream, index: usize) -> bool {
    let token = &stream.tokens[index];
    token.kind == TokenKind::HalfWidthPunctuation && token.raw == "`"
}

/// Length of the unbroken backtick run starting at `index`.
fn run_length(stream: &TokenStream, index: usize) -> usize {
    let mut len = 0;
    let mut i = index;
    while i < stream.len() && is_backtick(stream, i) {
        len += 1;
        if !stream.tokens[i].raw_space_after.is_empty() {
            break;
        }
        i += 1;
    }
    len
}

fn coalesce_backticks(stream: &mut TokenStream) {
    let mut i = 0;
    while i < stream.len() {
        if !is_backtick(stream, i) {
            i += 1;
            continue;
        }
        let fence = run_length(stream, i);

        // a closing run of the same length, with only plain text in between
        let mut j = i + fence;
        let mut close = None;
        while j < stream.len() {
            let token = &stream.tokens[j];
            if !token.is_visible() || token.kind == TokenKind::HyperContent {
                break;
            }
            if is_backtick(stream, j) {
                let len = run_length(stream, j);
                if len == fence {
                    close = Some(j + len - 1);
                    break;
                }
                j += len;
                continue;
            }
            j += 1;
        }

        match close {
            Some(end) => {
                stream.coalesce_code(i..=end);
                i += 1;
            }
            None => i += fence,
        }
    }
}
