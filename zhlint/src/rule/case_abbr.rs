use crate::token::TokenStream;

use super::Finding;

pub const NAME: &str = "case-abbr";

const ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Jr.", "Sr.", "St.", "vs.", "etc.", "Inc.", "Ltd.",
    "Co.", "No.", "Fig.", "e.g.", "i.e.", "a.m.", "p.m.", "U.S.", "U.K.",
];

/// Abbreviation dots are not sentence punctuation; lock them.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut i = 0;
    while i < stream.len() {
        if !stream.tokens[i].is_half_width_content() {
            i += 1;
            continue;
        }
        let matched = ABBREVIATIONS
            .iter()
            .filter_map(|abbr| stream.match_raw_sequence(i, abbr))
            .max();
        match matched {
            Some(last) => {
                stream.restore_and_lock(i..=last);
                i = last + 1;
            }
            None => i += 1,
        }
    }
    Vec::new()
}
