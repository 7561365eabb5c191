//! `<!-- zhlint disable -->` / `<!-- zhlint enable -->` regions and
//! `<!-- zhlint ignore: ... -->` directives.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::DocumentState;
use crate::ignored::IgnoredCase;

pub const NAME: &str = "ignore";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*zhlint\s+(disable|enable|ignore:\s*(.*?))\s*-->").expect("directive pattern is valid")
});

pub fn parse(state: DocumentState) -> DocumentState {
    let mut disabled = false;
    let mut directives: Vec<IgnoredCase> = Vec::new();

    let mut state = state.carve_blocks(NAME, |block| {
        let mut cuts: Vec<Range<usize>> = Vec::new();
        let mut disabled_from = disabled.then_some(0);

        for caps in DIRECTIVE.captures_iter(&block.value) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            match &caps[1] {
                "disable" => {
                    disabled_from.get_or_insert(whole.start());
                }
                "enable" => match disabled_from.take() {
                    Some(from) => cuts.push(from..whole.end()),
                    None => cuts.push(whole.range()),
                },
                _ => {
                    let pattern = caps.get(2).map_or("", |m| m.as_str());
                    match pattern.parse::<IgnoredCase>() {
                        Ok(case) => directives.push(case),
                        Err(err) => tracing::warn!("skipping ignore directive: {err}"),
                    }
                    cuts.push(whole.range());
                }
            }
        }

        // an unterminated disable runs on into the following blocks
        disabled = disabled_from.is_some();
        if let Some(from) = disabled_from {
            cuts.push(from..block.value.len());
        }
        cuts
    });

    state.ignored_by_rules.extend(directives);
    state
}
