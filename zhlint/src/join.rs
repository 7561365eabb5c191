use std::collections::{BTreeMap, HashMap};

use crate::rule::{RuleFinding, Target};
use crate::token::TokenStream;
use crate::validation::Validation;

/// A block's corrected text and the validations that survived pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedBlock {
    pub value: String,
    pub validations: Vec<Validation>,
}

/// Render the stream and turn findings into validations.
///
/// A finding survives only if its target reads differently from the source
/// in the final stream; when several rules touched the same target, the
/// last one speaks. Offsets are shifted by `block_start`.
pub fn join(stream: &TokenStream, findings: Vec<RuleFinding>, block_start: usize) -> JoinedBlock {
    let mut changed: HashMap<Target, usize> = HashMap::new();
    for gap in stream.gaps() {
        if stream.gap_changed(gap) {
            let offset = stream.gap_offset(gap);
            changed.insert(Target::Gap(offset), stream.tokens[gap.right].index - offset);
        }
    }
    for token in &stream.tokens {
        if token.content != token.raw {
            changed.insert(Target::Content(token.index), token.raw.len());
        }
    }

    let mut latest: BTreeMap<Target, RuleFinding> = BTreeMap::new();
    for finding in findings {
        latest.insert(finding.finding.target, finding);
    }

    let mut validations: Vec<Validation> = latest
        .into_iter()
        .filter_map(|(target, finding)| {
            let length = *changed.get(&target)?;
            let offset = match target {
                Target::Gap(offset) | Target::Content(offset) => offset,
            };
            Some(Validation {
                index: block_start + offset,
                length,
                name: finding.rule,
                message: finding.finding.message,
            })
        })
        .collect();
    validations.sort_by_key(|v| v.index);

    JoinedBlock {
        value: stream.render(),
        validations,
    }
}
