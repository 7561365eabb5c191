use crate::token::TokenStream;

use super::Finding;

pub const NAME: &str = "case-datetime";

/// Times like `12:30` and `00:00:00` keep their colons as written.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut i = 0;
    while i < stream.len() {
        if !is_clock_group(stream, i) {
            i += 1;
            continue;
        }
        let mut last = i;
        while let Some(colon) = stream.adjacent_next(last) {
            let Some(digits) = stream.adjacent_next(colon) else {
                break;
            };
            if stream.tokens[colon].raw != ":" || !is_clock_group(stream, digits) {
                break;
            }
            last = digits;
        }
        if last > i {
            stream.restore_and_lock(i..=last);
        }
        i = last + 1;
    }
    Vec::new()
}

fn is_clock_group(stream: &TokenStream, index: usize) -> bool {
    let token = &stream.tokens[index];
    token.is_digits() && (1..=2).contains(&token.raw.len())
}
