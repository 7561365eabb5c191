use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "case-backslash";

const NO_SPACE_AFTER: &str = "no space is allowed after a backslash";
const ONE_SPACE_BEFORE: &str = "one space is needed between Chinese text and a backslash";

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for i in stream.visible() {
        let token = &stream.tokens[i];
        if token.locked || !token.is_half_width_punctuation("\\") {
            continue;
        }
        if let Some(after) = stream.gap_after(i)
            && stream.raw_gap(after).is_empty()
        {
            space_gap(stream, after, "", NO_SPACE_AFTER, &mut findings);
        }
        if let Some(before) = stream.gap_before(i)
            && stream.tokens[before.left].is_full_width_content()
        {
            space_gap(stream, before, " ", ONE_SPACE_BEFORE, &mut findings);
        }
    }
    findings
}
