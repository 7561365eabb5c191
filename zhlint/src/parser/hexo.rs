//! Hexo: front matter and `{% tag %}` syntax.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, Mark};
use crate::document::DocumentState;

pub const NAME: &str = "hexo";

/// Tags whose body is raw text up to the matching `end` tag.
const RAW_TAGS: [&str; 4] = ["codeblock", "code", "raw", "verbatim"];

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*(\w+)[^%]*?-?%\}").expect("tag pattern is valid"));

pub fn parse(state: DocumentState) -> DocumentState {
    let mut state = state.carve_blocks(NAME, front_matter).carve_blocks(NAME, raw_tag_bodies);
    for block in &mut state.blocks {
        let tags: Vec<Mark> = TAG.find_iter(&block.value).map(|m| Mark::raw(m.range())).collect();
        block.marks.extend(tags);
    }
    state
}

/// `---` on the first line through the next `---` or `...` line.
/// Unterminated front matter is left alone.
fn front_matter(block: &Block) -> Vec<Range<usize>> {
    if block.start != 0 {
        return Vec::new();
    }
    let bom = if block.value.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };

    let mut lines = block.value[bom..].split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Vec::new();
    };
    if first.trim_end() != "---" {
        return Vec::new();
    }

    let mut pos = bom + first.len();
    for line in lines {
        pos += line.len();
        let line = line.trim_end();
        if line == "---" || line == "..." {
            return vec![0..pos];
        }
    }
    Vec::new()
}

/// Raw tag pairs; an unterminated raw tag runs to the end of the block.
fn raw_tag_bodies(block: &Block) -> Vec<Range<usize>> {
    let tags: Vec<(Range<usize>, String)> = TAG
        .captures_iter(&block.value)
        .filter_map(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())))
        .collect();

    let mut cuts = Vec::new();
    let mut i = 0;
    while i < tags.len() {
        let (open, name) = &tags[i];
        if !RAW_TAGS.contains(&name.as_str()) {
            i += 1;
            continue;
        }
        let end_name = format!("end{name}");
        match tags[i + 1..].iter().position(|(_, n)| *n == end_name) {
            Some(offset) => {
                let close = &tags[i + 1 + offset].0;
                cuts.push(open.start..close.end);
                i += offset + 2;
            }
            None => {
                cuts.push(open.start..block.value.len());
                break;
            }
        }
    }
    cuts
}
