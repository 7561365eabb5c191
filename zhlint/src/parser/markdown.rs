//! Markdown: splits blocks into paragraphs, headings, table cells and list
//! item text, and marks inline syntax.

use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{Event, LinkType, Options, Parser as CmarkParser, Tag, TagEnd};
use regex::Regex;

use crate::block::{Block, Mark, MarkKind};
use crate::document::DocumentState;

pub const NAME: &str = "markdown";

static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*)?>$").expect("open tag pattern is valid"));
static CLOSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</([A-Za-z][A-Za-z0-9-]*)\s*>$").expect("close tag pattern is valid"));

/// Elements that never take a closing tag.
const VOID_ELEMENTS: [&str; 8] = ["br", "hr", "img", "input", "wbr", "area", "source", "meta"];

pub fn parse(mut state: DocumentState) -> DocumentState {
    let blocks = std::mem::take(&mut state.blocks);
    state.blocks = blocks.iter().flat_map(split_block).collect();
    state
}

fn split_block(block: &Block) -> Vec<Block> {
    let options = Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
    let parser = CmarkParser::new_ext(&block.value, options);

    let mut runs: Vec<InlineRun> = Vec::new();
    let mut inline = InlineCollector::default();
    // depth inside an element whose events are all skipped
    let mut opaque = 0usize;

    for (event, range) in parser.into_offset_iter() {
        if opaque > 0 {
            match event {
                Event::Start(_) => opaque += 1,
                Event::End(_) => opaque -= 1,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::HtmlBlock | Tag::MetadataBlock(_)) => {
                inline.flush_into(&mut runs);
                opaque = 1;
            }
            Event::Start(Tag::Image { .. })
            | Event::Start(Tag::Link {
                link_type: LinkType::Autolink | LinkType::Email,
                ..
            }) => {
                inline.opaque(range, MarkKind::Raw);
                opaque = 1;
            }
            Event::Start(Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. }) => inline.open(range),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link) => inline.close(),
            // a backslash hard break keeps its backslash verbatim
            Event::HardBreak if block.value[range.clone()].starts_with('\\') => {
                inline.opaque(range.start..range.start + 1, MarkKind::Raw);
                inline.text(range.start + 1..range.end);
            }
            Event::Text(_) | Event::SoftBreak | Event::HardBreak => inline.text(range),
            Event::Code(_) => inline.opaque(range, MarkKind::Code),
            Event::InlineHtml(html) => inline.html(range, html.trim()),
            Event::InlineMath(_)
            | Event::FootnoteReference(_)
            | Event::TaskListMarker(_) => inline.opaque(range, MarkKind::Raw),
            // block-level structure ends the current inline run
            _ => inline.flush_into(&mut runs),
        }
    }
    inline.flush_into(&mut runs);

    runs.into_iter().map(|run| run.into_block(block)).collect()
}

/// An open hyper mark and the extent of its children seen so far.
struct OpenHyper {
    /// The whole element for markdown syntax; just the opening tag for HTML.
    range: Range<usize>,
    children: Option<Range<usize>>,
    /// Lowercase element name when opened by an inline HTML tag.
    tag: Option<String>,
}

/// Collects the inline events of one paragraph-like element.
#[derive(Default)]
struct InlineCollector {
    extent: Option<Range<usize>>,
    marks: Vec<Mark>,
    covered: Vec<Range<usize>>,
    open: Vec<OpenHyper>,
}

impl InlineCollector {
    fn extend(&mut self, range: &Range<usize>) {
        self.extent = Some(match self.extent.take() {
            Some(extent) => extent.start.min(range.start)..extent.end.max(range.end),
            None => range.clone(),
        });
    }

    /// Widen the innermost open hyper mark's children to include `range`.
    fn child(&mut self, range: &Range<usize>) {
        if let Some(parent) = self.open.last_mut() {
            parent.children = Some(match parent.children.take() {
                Some(c) => c.start.min(range.start)..c.end.max(range.end),
                None => range.clone(),
            });
        }
    }

    fn text(&mut self, range: Range<usize>) {
        self.extend(&range);
        self.child(&range);
        self.covered.push(range);
    }

    fn opaque(&mut self, range: Range<usize>, kind: MarkKind) {
        self.extend(&range);
        self.child(&range);
        self.marks.push(Mark::opaque(kind, range.clone()));
        self.covered.push(range);
    }

    fn open(&mut self, range: Range<usize>) {
        self.extend(&range);
        self.open.push(OpenHyper {
            range,
            children: None,
            tag: None,
        });
    }

    /// Inline HTML: `<code>…</code>` becomes a code span, other paired tags
    /// become hyper marks with the tags as delimiters, anything else is raw.
    fn html(&mut self, range: Range<usize>, html: &str) {
        if let Some(caps) = OPEN_TAG.captures(html)
            && !html.ends_with("/>")
        {
            let name = caps[1].to_ascii_lowercase();
            if !VOID_ELEMENTS.contains(&name.as_str()) {
                self.extend(&range);
                self.open.push(OpenHyper {
                    range,
                    children: None,
                    tag: Some(name),
                });
                return;
            }
        } else if let Some(caps) = CLOSE_TAG.captures(html) {
            let name = caps[1].to_ascii_lowercase();
            if self.open.last().is_some_and(|h| h.tag.as_deref() == Some(name.as_str())) {
                self.close_tag(range);
                return;
            }
        }
        self.opaque(range, MarkKind::Raw);
    }

    fn close_tag(&mut self, close: Range<usize>) {
        let Some(open) = self.open.pop() else {
            return;
        };
        self.extend(&close);
        let whole = open.range.start..close.end;
        let is_code = open.tag.as_deref() == Some("code");
        if is_code || open.children.is_none() {
            let kind = if is_code { MarkKind::Code } else { MarkKind::Raw };
            self.marks.push(Mark::opaque(kind, whole.clone()));
            self.covered.push(whole.clone());
        } else {
            self.marks
                .push(Mark::hyper(whole.clone(), open.range.len(), close.len()));
            self.covered.push(open.range.clone());
            self.covered.push(close);
        }
        self.child(&whole);
    }

    /// Opening tags that never met their closing tag turn raw.
    fn abandon_tags(&mut self) {
        while self.open.last().is_some_and(|h| h.tag.is_some()) {
            let Some(tag) = self.open.pop() else {
                break;
            };
            self.marks.push(Mark::raw(tag.range.clone()));
            self.covered.push(tag.range.clone());
            self.child(&tag.range);
            if let Some(children) = tag.children {
                self.child(&children);
            }
        }
    }

    fn close(&mut self) {
        self.abandon_tags();
        let Some(hyper) = self.open.pop() else {
            return;
        };
        let range = hyper.range;
        match hyper.children {
            Some(children) if children.start >= range.start && children.end <= range.end => {
                self.marks
                    .push(Mark::hyper(range.clone(), children.start - range.start, range.end - children.end));
                self.covered.push(range.start..children.start);
                self.covered.push(children.end..range.end);
            }
            // nothing lintable inside: treat the whole thing as raw
            _ => {
                self.marks.push(Mark::raw(range.clone()));
                self.covered.push(range.clone());
            }
        }
        self.child(&range);
    }

    fn flush_into(&mut self, runs: &mut Vec<InlineRun>) {
        self.abandon_tags();
        let collected = std::mem::take(self);
        if let Some(range) = collected.extent {
            runs.push(InlineRun {
                range,
                marks: collected.marks,
                covered: collected.covered,
            });
        }
    }
}

struct InlineRun {
    /// Range in the parent block's value.
    range: Range<usize>,
    marks: Vec<Mark>,
    covered: Vec<Range<usize>>,
}

impl InlineRun {
    fn into_block(mut self, parent: &Block) -> Block {
        let base = self.range.start;
        let mut block = parent.slice(self.range.clone());
        block.marks.extend(self.marks.iter().map(|m| m.rebased(base)));

        // source text between inline events (`> ` prefixes of continuation
        // lines, list indentation) is not part of the content
        self.covered.sort_by_key(|r| r.start);
        let mut cursor = self.range.start;
        for covered in &self.covered {
            if covered.start > cursor
                && let Some(gap) = trim_whitespace(&parent.value, cursor..covered.start)
            {
                block.marks.push(Mark::raw(gap.start - base..gap.end - base));
            }
            cursor = cursor.max(covered.end);
        }

        block.marks.sort_by_key(|m| m.start);
        block
    }
}

fn trim_whitespace(value: &str, range: Range<usize>) -> Option<Range<usize>> {
    let text = &value[range.clone()];
    let trimmed_start = text.len() - text.trim_start().len();
    let trimmed_end = text.trim_end().len();
    (trimmed_start < trimmed_end).then(|| range.start + trimmed_start..range.start + trimmed_end)
}
