use std::ops::Range;

/// How the rule engine treats the bytes a mark covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Inline code. Opaque; wants one space between itself and adjacent content.
    Code,
    /// Raw HTML, dialect tags, images and the like. Opaque; spacing around it is left alone.
    Raw,
    /// Emphasis, links and friends. Only the opening and closing delimiters are opaque.
    Hyper,
}

/// A span inside a block that the rule engine must not rewrite.
/// Offsets are relative to the owning block's `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub kind: MarkKind,
    pub start: usize,
    pub end: usize,
    /// Length of the opening delimiter (`**`, `[`). Zero for opaque marks.
    pub open_len: usize,
    /// Length of the closing delimiter (`**`, `](url)`). Zero for opaque marks.
    pub close_len: usize,
}

impl Mark {
    pub fn code(range: Range<usize>) -> Self {
        Self::opaque(MarkKind::Code, range)
    }

    pub fn raw(range: Range<usize>) -> Self {
        Self::opaque(MarkKind::Raw, range)
    }

    pub fn opaque(kind: MarkKind, range: Range<usize>) -> Self {
        Mark {
            kind,
            start: range.start,
            end: range.end,
            open_len: 0,
            close_len: 0,
        }
    }

    pub fn hyper(range: Range<usize>, open_len: usize, close_len: usize) -> Self {
        Mark {
            kind: MarkKind::Hyper,
            start: range.start,
            end: range.end,
            open_len,
            close_len,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.kind != MarkKind::Hyper
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn open_span(&self) -> Range<usize> {
        self.start..self.start + self.open_len
    }

    pub fn close_span(&self) -> Range<usize> {
        self.end - self.close_len..self.end
    }

    /// The byte ranges the tokenizer emits as opaque tokens for this mark.
    pub fn delimiters(&self) -> Vec<Range<usize>> {
        if self.is_opaque() {
            return vec![self.span()];
        }
        [self.open_span(), self.close_span()]
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Re-express the mark relative to a block starting `base` bytes later.
    pub fn rebased(&self, base: usize) -> Mark {
        Mark {
            start: self.start - base,
            end: self.end - base,
            ..self.clone()
        }
    }

    fn fits(&self, value: &str) -> bool {
        let boundaries = [self.start, self.end, self.start + self.open_len, self.end.saturating_sub(self.close_len)];
        self.start < self.end
            && self.end <= value.len()
            && self.open_len + self.close_len <= self.end - self.start
            && (self.is_opaque() || self.open_len + self.close_len > 0)
            && boundaries.iter().all(|&b| value.is_char_boundary(b))
    }
}

/// A contiguous, independently linted region of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub value: String,
    pub marks: Vec<Mark>,
    /// Byte offset of `value` in the document.
    pub start: usize,
    /// Exclusive end offset in the document.
    pub end: usize,
}

impl Block {
    pub fn new(value: impl Into<String>, start: usize) -> Self {
        let value = value.into();
        let end = start + value.len();
        Block {
            value,
            marks: Vec::new(),
            start,
            end,
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The sub-block covering the block-relative `range`, keeping the marks
    /// that lie fully inside it.
    pub fn slice(&self, range: Range<usize>) -> Block {
        let marks = self
            .marks
            .iter()
            .filter(|m| m.start >= range.start && m.end <= range.end)
            .map(|m| m.rebased(range.start))
            .collect();
        Block {
            value: self.value[range.clone()].to_string(),
            marks,
            start: self.start + range.start,
            end: self.start + range.end,
        }
    }

    /// Remove the block-relative `cuts` and return what is left, skipping
    /// pieces that hold nothing but whitespace.
    pub fn carve(&self, cuts: &[Range<usize>]) -> Vec<Block> {
        let cuts = merge_ranges(cuts.to_vec(), self.value.len());
        if cuts.is_empty() {
            return vec![self.clone()];
        }

        let mut pieces = Vec::new();
        let mut cursor = 0;
        for cut in cuts.iter().chain(std::iter::once(&(self.value.len()..self.value.len()))) {
            if cut.start > cursor && !self.value[cursor..cut.start].trim().is_empty() {
                pieces.push(self.slice(cursor..cut.start));
            }
            cursor = cursor.max(cut.end);
        }
        pieces
    }
}

/// Sort ranges, clip them to `len` and merge the overlapping ones.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>, len: usize) -> Vec<Range<usize>> {
    ranges.retain(|r| r.start < r.end.min(len));
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        let range = range.start..range.end.min(len);
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Reduce `marks` to a set the tokenizer can consume: marks must fit the
/// value on character boundaries, opaque spans and delimiters must not
/// overlap, and hyper marks must nest properly. Outer marks win.
pub fn flatten_marks(marks: &[Mark], value: &str) -> Vec<Mark> {
    let mut candidates: Vec<&Mark> = marks.iter().filter(|m| m.fits(value)).collect();
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<Mark> = Vec::new();
    let mut claimed: Vec<Range<usize>> = Vec::new();
    for mark in candidates {
        let delimiters = mark.delimiters();
        let collides = delimiters
            .iter()
            .any(|d| claimed.iter().any(|c| d.start < c.end && c.start < d.end));
        let crosses = kept.iter().any(|k| {
            let disjoint = mark.start >= k.end || mark.end <= k.start;
            let nested = k.start <= mark.start && mark.end <= k.end;
            !disjoint && !nested
        });
        if collides || crosses {
            continue;
        }
        claimed.extend(delimiters);
        kept.push(mark.clone());
    }

    kept.sort_by_key(|m| m.start);
    kept
}
