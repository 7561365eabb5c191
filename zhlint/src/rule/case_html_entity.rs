use crate::token::TokenStream;

use super::Finding;

pub const NAME: &str = "case-html-entity";

/// `&amp;`, `&#123;` and `&#x1F600;` are kept as written, including the
/// spacing on either side.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    for i in stream.visible() {
        if stream.tokens[i].raw != "&" {
            continue;
        }
        let Some(last) = entity_end(stream, i) else {
            continue;
        };
        stream.restore_and_lock(i..=last);
        for gap in [stream.gap_before(i), stream.gap_after(last)].into_iter().flatten() {
            stream.restore_gap(gap);
        }
    }
    Vec::new()
}

fn entity_end(stream: &TokenStream, amp: usize) -> Option<usize> {
    let mut name = stream.adjacent_next(amp)?;
    let numeric = stream.tokens[name].raw == "#";
    if numeric {
        name = stream.adjacent_next(name)?;
    }

    let body = &stream.tokens[name];
    let valid = body.is_half_width_content()
        && if numeric {
            let digits = body.raw.strip_prefix(['x', 'X']).unwrap_or(body.raw.as_str());
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
        } else {
            body.raw.chars().all(|c| c.is_ascii_alphanumeric())
        };
    if !valid {
        return None;
    }

    let semicolon = stream.adjacent_next(name)?;
    (stream.tokens[semicolon].raw == ";").then_some(semicolon)
}
