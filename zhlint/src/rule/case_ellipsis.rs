use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "case-ellipsis";

const NO_SPACE_INSIDE: &str = "no space is allowed inside an ellipsis";
const NO_SPACE_BEFORE: &str = "no space is allowed before an ellipsis";

/// A run of three or more half-width dots, possibly written spaced out.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    let visible = stream.visible();
    let mut k = 0;
    while k < visible.len() {
        if !is_dot(stream, visible[k]) {
            k += 1;
            continue;
        }
        let mut end = k;
        while end + 1 < visible.len() && is_dot(stream, visible[end + 1]) && visible[end + 1] == visible[end] + 1 {
            end += 1;
        }
        if end - k < 2 {
            k = end + 1;
            continue;
        }

        let (first, last) = (visible[k], visible[end]);
        for i in first..last {
            if let Some(gap) = stream.gap_after(i) {
                space_gap(stream, gap, "", NO_SPACE_INSIDE, &mut findings);
            }
        }
        if let Some(before) = stream.gap_before(first)
            && stream.tokens[before.left].is_wordlike()
        {
            space_gap(stream, before, "", NO_SPACE_BEFORE, &mut findings);
        }
        if let Some(after) = stream.gap_after(last) {
            stream.restore_gap(after);
        }
        k = end + 1;
    }
    findings
}

fn is_dot(stream: &TokenStream, index: usize) -> bool {
    let token = &stream.tokens[index];
    token.raw == "." && !token.locked
}
