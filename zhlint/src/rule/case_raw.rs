use crate::token::TokenStream;

use super::Finding;

pub const NAME: &str = "case-raw";

const COMPOUNDS: &[&str] = &[
    "AC/DC", "TCP/IP", "I/O", "CI/CD", "A/B", "B/S", "C/S", "N/A", "24/7", "UTF-8", "UTF-16",
];

/// Known compounds are kept exactly as written.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut i = 0;
    while i < stream.len() {
        if !stream.tokens[i].is_half_width_content() {
            i += 1;
            continue;
        }
        let matched = COMPOUNDS
            .iter()
            .filter_map(|word| stream.match_raw_sequence(i, word))
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
