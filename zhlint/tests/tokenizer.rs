use zhlint::block::{Mark, flatten_marks};
use zhlint::token::{TokenKind, tokenize};

fn rebuild(text: &str, marks: &[Mark]) -> String {
    tokenize(text, marks)
        .tokens
        .iter()
        .map(|t| format!("{}{}", t.raw, t.raw_space_after))
        .collect()
}

fn kinds(text: &str) -> Vec<TokenKind> {
    tokenize(text, &[]).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn tokens_partition_the_block() {
    for text in [
        "",
        "   ",
        "中文english混排",
        "  他说: \"hello\" 很好\n下一行",
        "Chrome 53+ 和 Firefox… 都可以！",
        "emoji 😀 and 한국어 and ｆｕｌｌ",
    ] {
        assert_eq!(rebuild(text, &[]), text);
    }
}

#[test]
fn tokens_partition_the_block_with_marks() {
    let text = "使用`a + b`和**粗体 text**";
    let marks = [Mark::code(6..13), Mark::hyper(16..31, 2, 2)];
    assert_eq!(rebuild(text, &marks), text);
}

#[test]
fn classifies_content_and_punctuation() {
    assert_eq!(
        kinds("中文english，!"),
        vec![
            TokenKind::FullWidthContent,
            TokenKind::HalfWidthContent,
            TokenKind::FullWidthPunctuation,
            TokenKind::HalfWidthPunctuation,
        ]
    );
}

#[test]
fn each_punctuation_character_is_its_own_token() {
    let stream = tokenize("...", &[]);
    assert_eq!(stream.len(), 3);
    assert!(stream.tokens.iter().all(|t| t.raw == "."));
}

#[test]
fn apostrophe_between_letters_is_content() {
    let stream = tokenize("don't stop", &[]);
    assert_eq!(stream.tokens[0].raw, "don't");
    assert_eq!(stream.tokens[0].raw_space_after, " ");
    assert_eq!(stream.tokens[1].raw, "stop");
}

#[test]
fn whitespace_attaches_to_the_previous_token() {
    let stream = tokenize("中文  english", &[]);
    assert_eq!(stream.tokens[0].raw_space_after, "  ");
    assert_eq!(stream.tokens[0].space_after, "  ");
    assert_eq!(stream.tokens[1].index, 8);
}

#[test]
fn leading_whitespace_becomes_a_space_token() {
    let stream = tokenize("  中文", &[]);
    assert_eq!(stream.tokens[0].kind, TokenKind::Space);
    assert_eq!(stream.tokens[0].raw_space_after, "  ");
    assert!(!stream.tokens[0].is_visible());
    assert_eq!(stream.tokens[1].index, 2);
}

#[test]
fn code_marks_become_one_opaque_token() {
    let stream = tokenize("a`b c`d", &[Mark::code(1..6)]);
    assert_eq!(stream.len(), 3);
    assert_eq!(stream.tokens[1].kind, TokenKind::HyperContent);
    assert_eq!(stream.tokens[1].raw, "`b c`");
    assert!(stream.tokens[1].is_code());
}

#[test]
fn hyper_marks_become_delimiter_tokens() {
    let stream = tokenize("a**b**c", &[Mark::hyper(1..6, 2, 2)]);
    let raws: Vec<&str> = stream.tokens.iter().map(|t| t.raw.as_str()).collect();
    assert_eq!(raws, vec!["a", "**", "b", "**", "c"]);
    assert_eq!(stream.visible(), vec![0, 2, 4]);
    assert!(stream.gaps()[0].has_delimiters());
}

#[test]
fn crossing_marks_are_dropped() {
    let value = "abcdefgh";
    let marks = [Mark::hyper(0..4, 1, 1), Mark::hyper(2..6, 1, 1)];
    assert_eq!(flatten_marks(&marks, value), vec![Mark::hyper(0..4, 1, 1)]);
}

#[test]
fn marks_inside_opaque_spans_are_dropped() {
    let value = "`**a**`";
    let marks = [Mark::code(0..7), Mark::hyper(1..6, 2, 2)];
    assert_eq!(flatten_marks(&marks, value), vec![Mark::code(0..7)]);
}

#[test]
fn nested_hyper_marks_are_kept() {
    let value = "***a***";
    let marks = [Mark::hyper(0..7, 2, 2), Mark::hyper(2..5, 1, 1)];
    assert_eq!(flatten_marks(&marks, value).len(), 2);
}
