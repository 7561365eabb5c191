use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "case-traditional";

const NESTED: &str = "nested corner brackets should alternate between 「」 and 『』";
const NO_SPACE: &str = "no space is allowed around corner brackets";

/// `「」` and `『』` alternate by nesting depth: a pair inside another pair
/// uses the other style.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut stack: Vec<bool> = Vec::new(); // true for 「」

    for i in stream.visible() {
        let token = &stream.tokens[i];
        if token.locked {
            continue;
        }
        let wanted = match token.content.as_str() {
            "「" | "『" => {
                let single = match stack.last() {
                    Some(&outer_single) => !outer_single,
                    None => token.content == "「",
                };
                stack.push(single);
                if single { "「" } else { "『" }
            }
            "」" | "』" => match stack.pop() {
                Some(true) => "」",
                Some(false) => "』",
                None => continue,
            },
            _ => continue,
        };

        if stream.replace_punctuation(i, wanted) {
            findings.push(Finding::content(stream.tokens[i].index, NESTED));
        }
        for gap in [stream.gap_before(i), stream.gap_after(i)].into_iter().flatten() {
            space_gap(stream, gap, "", NO_SPACE, &mut findings);
        }
    }
    findings
}
