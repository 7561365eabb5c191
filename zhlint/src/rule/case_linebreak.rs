use crate::token::TokenStream;

use super::Finding;

pub const NAME: &str = "case-linebreak";

/// Gaps that contained a line break in the source are put back verbatim.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    for gap in stream.gaps() {
        if stream.raw_gap(gap).contains('\n') {
            stream.restore_gap(gap);
        }
    }
    Vec::new()
}
