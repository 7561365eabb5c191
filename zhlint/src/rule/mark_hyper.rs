use crate::token::TokenStream;

use super::{Finding, space_gap};

pub const NAME: &str = "mark-hyper";

const MESSAGE: &str = "spaces around a markup delimiter should sit outside it, collapsed to one";

pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for gap in stream.gaps() {
        if !gap.has_delimiters() {
            continue;
        }
        let raw = stream.raw_gap(gap);
        if raw.is_empty() || raw.contains('\n') {
            continue;
        }
        space_gap(stream, gap, " ", MESSAGE, &mut findings);
    }
    findings
}
