use crate::token::{TokenKind, TokenStream};

use super::{Finding, SENTENCE_PUNCTUATION, space_gap};

pub const NAME: &str = "space-punctuation";

const NO_SPACE_BEFORE: &str = "no space is allowed before punctuation";
const NO_SPACE_AROUND_FULL_WIDTH: &str = "no space is allowed around full-width punctuation";
const ONE_SPACE_AFTER: &str = "one space is needed after half-width punctuation in Chinese text";

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for i in stream.visible() {
        let token = &stream.tokens[i];
        if token.locked {
            continue;
        }
        match token.kind {
            TokenKind::FullWidthPunctuation => {
                for gap in [stream.gap_before(i), stream.gap_after(i)].into_iter().flatten() {
                    space_gap(stream, gap, "", NO_SPACE_AROUND_FULL_WIDTH, &mut findings);
                }
            }
            TokenKind::HalfWidthPunctuation if SENTENCE_PUNCTUATION.contains(&token.content.as_str()) => {
                let before = stream.gap_before(i);
                let prev_full = before.is_some_and(|g| stream.tokens[g.left].is_full_width_content());
                if let Some(gap) = before
                    && stream.tokens[gap.left].is_wordlike()
                {
                    space_gap(stream, gap, "", NO_SPACE_BEFORE, &mut findings);
                }
                if let Some(gap) = stream.gap_after(i)
                    && (prev_full || stream.tokens[gap.right].is_full_width_content())
                {
                    space_gap(stream, gap, " ", ONE_SPACE_AFTER, &mut findings);
                }
            }
            _ => {}
        }
    }
    findings
}
