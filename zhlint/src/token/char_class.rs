/// The width/role class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    HalfWidthContent,
    FullWidthContent,
    HalfWidthPunctuation,
    FullWidthPunctuation,
}

impl CharClass {
    pub fn is_content(self) -> bool {
        matches!(self, CharClass::HalfWidthContent | CharClass::FullWidthContent)
    }
}

/// Full-width punctuation outside the CJK symbol and full-width form blocks.
const EXTRA_FULL_WIDTH_PUNCTUATION: &[char] = &['…', '—', '–', '“', '”', '‘', '’', '·', '•', '‧'];

pub fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        return CharClass::Whitespace;
    }
    if ch.is_ascii() {
        return if ch.is_ascii_punctuation() {
            CharClass::HalfWidthPunctuation
        } else {
            CharClass::HalfWidthContent
        };
    }
    if EXTRA_FULL_WIDTH_PUNCTUATION.contains(&ch) {
        return CharClass::FullWidthPunctuation;
    }

    match ch as u32 {
        // CJK symbols and punctuation; 々 and 〇 read as ideographs
        0x3005 | 0x3007 => CharClass::FullWidthContent,
        0x3000..=0x303F => CharClass::FullWidthPunctuation,
        // full-width digits and Latin letters
        0xFF10..=0xFF19 | 0xFF21..=0xFF3A | 0xFF41..=0xFF5A => CharClass::FullWidthContent,
        0xFF01..=0xFF60 | 0xFE10..=0xFE1F | 0xFE30..=0xFE4F => CharClass::FullWidthPunctuation,
        0xFFE0..=0xFFE6 => CharClass::FullWidthPunctuation,
        _ if is_full_width_content(ch) => CharClass::FullWidthContent,
        _ => CharClass::HalfWidthContent,
    }
}

fn is_full_width_content(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x11FF     // Hangul Jamo
        | 0x2E80..=0x2FDF   // CJK radicals
        | 0x3040..=0x30FF   // Hiragana, Katakana
        | 0x3100..=0x312F   // Bopomofo
        | 0x3130..=0x318F   // Hangul compatibility Jamo
        | 0x31A0..=0x31FF
        | 0x3400..=0x4DBF   // CJK extension A
        | 0x4E00..=0x9FFF   // CJK unified ideographs
        | 0xAC00..=0xD7AF   // Hangul syllables
        | 0xF900..=0xFAFF   // CJK compatibility ideographs
        | 0x20000..=0x3134F // CJK extensions B..G
    )
}

/// Apostrophes that read as part of a word when they sit between two letters.
pub fn is_apostrophe(ch: char) -> bool {
    ch == '\'' || ch == '’'
}
