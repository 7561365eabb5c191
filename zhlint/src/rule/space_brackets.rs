use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "space-brackets";

const NO_SPACE_INSIDE: &str = "no space is allowed just inside brackets";
const ONE_SPACE_OUTSIDE: &str = "one space is needed outside brackets in mixed text";

const PAIRS: [(&str, &str); 3] = [("(", ")"), ("[", "]"), ("{", "}")];

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (open, close) in matching_pairs(stream) {
        if stream.tokens[open].locked || stream.tokens[close].locked {
            continue;
        }

        let inside_open = stream.gap_after(open);
        let inside_close = stream.gap_before(close);
        for gap in [inside_open, inside_close].into_iter().flatten() {
            space_gap(stream, gap, "", NO_SPACE_INSIDE, &mut findings);
        }

        let full_inside = (open + 1..close).any(|i| stream.tokens[i].is_full_width_content());
        let outside = [
            stream.gap_before(open).map(|g| (g, g.left)),
            stream.gap_after(close).map(|g| (g, g.right)),
        ];
        for (gap, neighbour) in outside.into_iter().flatten() {
            let neighbour = &stream.tokens[neighbour];
            if neighbour.is_content() && (full_inside || neighbour.is_full_width_content()) {
                space_gap(stream, gap, " ", ONE_SPACE_OUTSIDE, &mut findings);
            }
        }
    }
    findings
}

/// Pair half-width brackets with a stack; unmatched closers are skipped.
fn matching_pairs(stream: &TokenStream) -> Vec<(usize, usize)> {
    let mut stack: Vec<(usize, &str)> = Vec::new();
    let mut pairs = Vec::new();
    for i in stream.visible() {
        let token = &stream.tokens[i];
        if let Some(&(_, closer)) = PAIRS.iter().find(|(o, _)| token.is_half_width_punctuation(o)) {
            stack.push((i, closer));
        } else if PAIRS.iter().any(|(_, c)| token.is_half_width_punctuation(c))
            && let Some(&(open, closer)) = stack.last()
            && token.content == closer
        {
            stack.pop();
            pairs.push((open, i));
        }
    }
    pairs
}
