use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "space-full-width-content";

const MESSAGE: &str = "one space is needed between half-width and full-width content";

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for gap in stream.gaps() {
        let (left, right) = (&stream.tokens[gap.left], &stream.tokens[gap.right]);
        if left.is_content() && right.is_content() && left.kind != right.kind {
            space_gap(stream, gap, " ", MESSAGE, &mut findings);
        }
    }
    findings
}
