//! VuePress custom containers: `::: tip Title` ... `:::`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::Block;
use crate::document::DocumentState;

pub const NAME: &str = "vuepress";

static OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(:{3,}\s*[\w-]+)").expect("opener pattern is valid"));
static CLOSER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*:{3,}\s*$").expect("closer pattern is valid"));

pub fn parse(state: DocumentState) -> DocumentState {
    state.carve_blocks(NAME, container_markers)
}

/// The `::: type` part of opener lines (the title stays) and whole closer
/// lines. Fenced code is skipped; stray closers are left as text.
fn container_markers(block: &Block) -> Vec<Range<usize>> {
    let mut cuts = Vec::new();
    let mut depth = 0usize;
    let mut fence: Option<&str> = None;
    let mut pos = 0;

    for line in block.value.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let trimmed = body.trim_start();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
        } else if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            fence = Some(&trimmed[..3]);
        } else if CLOSER.is_match(body) {
            if depth > 0 {
                depth -= 1;
                cuts.push(pos..pos + line.len());
            }
        } else if let Some(marker) = OPENER.captures(body).and_then(|caps| caps.get(1)) {
            depth += 1;
            cuts.push(pos + marker.start()..pos + marker.end());
            // keep the title on its own
            cuts.push(pos + body.len()..pos + line.len());
        }
        pos += line.len();
    }
    cuts
}
