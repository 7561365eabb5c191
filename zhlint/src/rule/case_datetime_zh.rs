use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "case-datetime-zh";

const MESSAGE: &str = "no space is allowed between a number and a Chinese date or time unit";

const UNITS: &[char] = &['年', '月', '日', '天', '号', '時', '时', '分', '秒'];

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for i in stream.visible() {
        if !stream.tokens[i].is_digits() {
            continue;
        }
        let Some(after) = stream.gap_after(i) else {
            continue;
        };
        let unit_follows = !after.has_delimiters()
            && stream.tokens[after.right].is_full_width_content()
            && stream.tokens[after.right].content.starts_with(UNITS);
        if !unit_follows {
            continue;
        }
        space_gap(stream, after, "", MESSAGE, &mut findings);

        if let Some(before) = stream.gap_before(i)
            && !before.has_delimiters()
            && stream.tokens[before.left].is_full_width_content()
            && stream.tokens[before.left].content.ends_with(UNITS)
        {
            space_gap(stream, before, "", MESSAGE, &mut findings);
        }
    }
    findings
}
