use crate::token::{Gap, TokenStream};

use super::{Finding, space_gap};

pub const NAME: &str = "case-math-exp";

const MESSAGE: &str = "one space is needed around a math operator";

const OPERATORS: [&str; 6] = ["+", "-", "*", "/", "%", "="];

/// Operators that space their expression even when the source wrote it tight.
const ALWAYS_SPACED: [&str; 2] = ["+", "*"];

/// An operator with a half-width operand on each side.
#[derive(Debug, Clone, Copy)]
struct Operator {
    index: usize,
    before: Gap,
    after: Gap,
}

/// An expression like `1+2=3` is spaced as a whole: when any of its
/// operators is spaced in the source or always spaced, all of them get one
/// space on each side.
pub fn apply(stream: &mut TokenStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    for chain in chains(operators(stream)) {
        let spaced = chain.iter().any(|op| {
            ALWAYS_SPACED.contains(&stream.tokens[op.index].content.as_str())
                || !stream.raw_gap(op.before).is_empty()
                || !stream.raw_gap(op.after).is_empty()
        });
        if !spaced || chain.iter().any(|op| is_date_like(stream, op.index)) || in_url(stream, &chain) {
            continue;
        }
        for op in &chain {
            space_gap(stream, op.before, " ", MESSAGE, &mut findings);
            space_gap(stream, op.after, " ", MESSAGE, &mut findings);
        }
    }
    findings
}

fn operators(stream: &TokenStream) -> Vec<Operator> {
    stream
        .visible()
        .into_iter()
        .filter_map(|index| {
            let token = &stream.tokens[index];
            if token.locked || !OPERATORS.iter().any(|op| token.is_half_width_punctuation(op)) {
                return None;
            }
            // suffixes like `53+` and standalone symbols have no operand pair
            let before = stream.gap_before(index)?;
            let after = stream.gap_after(index)?;
            let operands = stream.tokens[before.left].is_half_width_content()
                && stream.tokens[after.right].is_half_width_content();
            (operands && !before.has_delimiters() && !after.has_delimiters()).then_some(Operator {
                index,
                before,
                after,
            })
        })
        .collect()
}

/// Group operators that share an operand.
fn chains(operators: Vec<Operator>) -> Vec<Vec<Operator>> {
    let mut chains: Vec<Vec<Operator>> = Vec::new();
    for op in operators {
        match chains.last_mut() {
            Some(chain) if chain.last().is_some_and(|prev| prev.after.right == op.before.left) => chain.push(op),
            _ => chains.push(vec![op]),
        }
    }
    chains
}

/// Whether the unspaced run holding the expression looks like a URL or an
/// email address.
fn in_url(stream: &TokenStream, chain: &[Operator]) -> bool {
    let (Some(first), Some(last)) = (chain.first(), chain.last()) else {
        return false;
    };

    let mut start = first.before.left;
    while let Some(prev) = stream.prev_visible(start)
        && stream.adjacent_next(prev) == Some(start)
    {
        start = prev;
    }
    let mut end = last.after.right;
    while let Some(next) = stream.adjacent_next(end) {
        end = next;
    }

    let run: String = (start..=end)
        .filter(|&i| stream.tokens[i].is_visible())
        .map(|i| stream.tokens[i].raw.as_str())
        .collect();
    let query = run.split_once('?').is_some_and(|(_, query)| query.contains('='));
    run.contains("://") || run.starts_with("www.") || run.contains('@') || query
}

/// `2019-01-01` and `2019/01/01`: three digit groups joined by the same
/// separator with no spaces.
fn is_date_like(stream: &TokenStream, index: usize) -> bool {
    let separator = stream.tokens[index].content.as_str();
    if separator != "-" && separator != "/" {
        return false;
    }

    let mut group = vec![index];
    // walk left and right over `digits sep digits sep digits`
    let mut cursor = index;
    while let Some(prev) = stream.prev_visible(cursor)
        && stream.adjacent_next(prev) == Some(cursor)
    {
        group.insert(0, prev);
        cursor = prev;
    }
    cursor = index;
    while let Some(next) = stream.adjacent_next(cursor) {
        group.push(next);
        cursor = next;
    }

    let digit_groups = group.iter().filter(|&&i| stream.tokens[i].is_digits()).count();
    let separators = group
        .iter()
        .filter(|&&i| stream.tokens[i].is_half_width_punctuation(separator))
        .count();
    digit_groups >= 3 && separators >= 2
}
