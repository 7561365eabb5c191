use std::ops::Range;

use crate::block::{Block, merge_ranges};
use crate::ignored::IgnoredCase;

/// A region a segmenter removed from linting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarvedRegion {
    /// Name of the segmenter that removed it.
    pub parser: String,
    pub start: usize,
    pub end: usize,
}

/// The state threaded through the segmenter chain.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    /// Sorted, non-overlapping blocks still to be linted.
    pub blocks: Vec<Block>,
    /// Ignore patterns: the configured ones plus any added by directives.
    pub ignored_by_rules: Vec<IgnoredCase>,
    pub ignored_by_parsers: Vec<CarvedRegion>,
}

impl DocumentState {
    /// One block spanning the whole document.
    pub fn new(content: &str, ignored_cases: Vec<IgnoredCase>) -> Self {
        DocumentState {
            content: content.to_string(),
            blocks: vec![Block::new(content, 0)],
            ignored_by_rules: ignored_cases,
            ignored_by_parsers: Vec::new(),
        }
    }

    /// Cut the block-relative ranges `cuts_for` returns out of every block,
    /// in document order, recording each cut under `parser`.
    pub fn carve_blocks<F>(mut self, parser: &str, mut cuts_for: F) -> Self
    where
        F: FnMut(&Block) -> Vec<Range<usize>>,
    {
        let blocks = std::mem::take(&mut self.blocks);
        for block in &blocks {
            let cuts = merge_ranges(cuts_for(block), block.value.len());
            self.ignored_by_parsers.extend(cuts.iter().map(|cut| CarvedRegion {
                parser: parser.to_string(),
                start: block.start + cut.start,
                end: block.start + cut.end,
            }));
            self.blocks.extend(block.carve(&cuts));
        }
        self
    }
}
