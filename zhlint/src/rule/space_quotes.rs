use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "space-quotes";

const NO_SPACE_INSIDE: &str = "no space is allowed just inside quotes";
const ONE_SPACE_OUTSIDE: &str = "one space is needed outside quotes next to content";

const QUOTES: [&str; 2] = ["\"", "'"];

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for quote in QUOTES {
        let positions: Vec<usize> = stream
            .visible()
            .into_iter()
            .filter(|&i| stream.tokens[i].is_half_width_punctuation(quote))
            .collect();

        for pair in positions.chunks_exact(2) {
            let (open, close) = (pair[0], pair[1]);
            if stream.tokens[open].locked || stream.tokens[close].locked {
                continue;
            }

            for gap in [stream.gap_after(open), stream.gap_before(close)].into_iter().flatten() {
                space_gap(stream, gap, "", NO_SPACE_INSIDE, &mut findings);
            }

            let outside = [
                stream.gap_before(open).map(|g| (g, g.left)),
                stream.gap_after(close).map(|g| (g, g.right)),
            ];
            for (gap, neighbour) in outside.into_iter().flatten() {
                if stream.tokens[neighbour].is_content() {
                    space_gap(stream, gap, " ", ONE_SPACE_OUTSIDE, &mut findings);
                }
            }
        }
    }
    findings
}
