use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use zhlint::block::Mark;
use zhlint::parser::Segmenter;
use zhlint::rule::{Finding, Rule};
use zhlint::{ConfigError, IgnoredCase, IgnoredFilter, Linter, Logger, Options, run};

fn fix(text: &str) -> String {
    run(text, &Options::default()).expect("valid options").result
}

fn ignoring(pattern: &str) -> Options {
    let case: IgnoredCase = pattern.parse().expect("valid pattern");
    Options::default().with_ignored_case(case)
}

#[derive(Default)]
struct CollectingLogger {
    messages: Mutex<Vec<String>>,
}

impl Logger for CollectingLogger {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[test]
fn mixed_paragraph() {
    assert_eq!(fix("中文english混排"), "中文 english 混排");
    assert_eq!(fix("中文english混排\n"), "中文 english 混排\n");
}

#[test]
fn markdown_document() {
    let source = "# 标题Title\n\n这是一个Markdown文档，包含**粗体english**和`code`。\n\n```\n代码code不动\n```\n\n> 引用quote\n";
    let expected = "# 标题 Title\n\n这是一个 Markdown 文档，包含**粗体 english** 和 `code`。\n\n```\n代码code不动\n```\n\n> 引用 quote\n";
    assert_eq!(fix(source), expected);
}

#[test]
fn spaces_go_outside_emphasis() {
    assert_eq!(fix("**中文**english"), "**中文** english");
    assert_eq!(fix("中文**english**"), "中文 **english**");
}

#[test]
fn inline_html_gets_spaces_outside() {
    assert_eq!(fix("中文<code>x</code>中文"), "中文 <code>x</code> 中文");
    assert_eq!(fix("中文<b>english</b>中文"), "中文 <b>english</b> 中文");
    assert_eq!(fix("<i>中文</i>english"), "<i>中文</i> english");
}

#[test]
fn unpaired_inline_html_is_left_alone() {
    assert_eq!(fix("中文<br>english"), "中文<br>english");
}

#[test]
fn hexo_document() {
    let source = "---\ntitle: 标题title\n---\n{% note info %}中文english{% endnote %}\n\n{% codeblock %}\n中文english\n{% endcodeblock %}\n";
    let expected = "---\ntitle: 标题title\n---\n{% note info %}中文 english{% endnote %}\n\n{% codeblock %}\n中文english\n{% endcodeblock %}\n";
    assert_eq!(fix(source), expected);
}

#[test]
fn vuepress_container() {
    let source = "::: tip 提示tip\n中文english\n:::\n";
    let expected = "::: tip 提示 tip\n中文 english\n:::\n";
    assert_eq!(fix(source), expected);
}

#[test]
fn disabled_document_is_returned_untouched() {
    let source = "<!-- zhlint disabled -->\n中文english";
    let result = run(source, &Options::default()).expect("valid options");
    assert!(result.disabled);
    assert_eq!(result.result, source);
    assert_eq!(result.origin, source);
    assert!(result.validations.is_empty());
}

#[test]
fn disable_and_enable_directives() {
    let source = "<!-- zhlint disable -->\n中文english\n<!-- zhlint enable -->\n中文english";
    let expected = "<!-- zhlint disable -->\n中文english\n<!-- zhlint enable -->\n中文 english";
    assert_eq!(fix(source), expected);
}

#[test]
fn text_outside_blocks_is_preserved() {
    let source = "  \n\n中文english\n\n\n- 列表item\n";
    assert_eq!(fix(source), "  \n\n中文 english\n\n\n- 列表 item\n");
}

#[test]
fn fixing_is_idempotent() {
    for source in [
        "中文english混排",
        "他说:\"hello\"很好",
        "使用`a+b`计算",
        "这是一个Markdown文档，包含**粗体english**和`code`。",
        "中文(english)中文",
        "2019 年 1 月",
        "中文,中文",
        "中文\nenglish",
        "中文,english",
        "1+2=3",
        "中文<b>english</b>中文",
        "中文<code>x</code>中文",
        "---\ntitle: 标题title\n---\n{% note info %}中文english{% endnote %}\n\n{% codeblock %}\n中文english\n{% endcodeblock %}\n",
        "::: tip 提示tip\n中文english\n:::\n",
    ] {
        let once = fix(source);
        assert_eq!(fix(&once), once, "fixing {source:?} twice");
    }
}

#[test]
fn validations_are_sorted() {
    let result = run("中文english\n\n混排english中文", &Options::default()).expect("valid options");
    let indexes: Vec<usize> = result.validations.iter().map(|v| v.index).collect();
    let mut sorted = indexes.clone();
    sorted.sort();
    assert_eq!(indexes.len(), 3);
    assert_eq!(indexes, sorted);
}

// ---------------------------------------------------------------------------
// Ignored cases
// ---------------------------------------------------------------------------

#[test]
fn ignored_regions_drop_validations_by_default() {
    let result = run("中文english混排", &ignoring("english")).expect("valid options");
    let indexes: Vec<usize> = result.validations.iter().map(|v| v.index).collect();
    assert_eq!(indexes, vec![13]);
}

#[test]
fn keep_only_filter_keeps_validations_inside_ignored_regions() {
    let options = ignoring("english").with_ignored_filter(IgnoredFilter::KeepOnly);
    let result = run("中文english混排", &options).expect("valid options");
    let indexes: Vec<usize> = result.validations.iter().map(|v| v.index).collect();
    assert_eq!(indexes, vec![6]);
}

#[test]
fn regex_ignore_patterns() {
    let result = run("中文english混排", &ignoring("/eng\\w+/")).expect("valid options");
    assert_eq!(result.validations.len(), 1);
}

#[test]
fn unmatched_ignore_pattern_is_logged() {
    let logger = Arc::new(CollectingLogger::default());
    let options = ignoring("不存在").with_logger(logger.clone());
    run("中文english混排", &options).expect("valid options");

    let messages = logger.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("不存在"));
}

#[test]
fn ignore_directive_in_document() {
    let source = "<!-- zhlint ignore: english -->\n中文english混排";
    let result = run(source, &Options::default()).expect("valid options");
    assert_eq!(result.result, "<!-- zhlint ignore: english -->\n中文 english 混排");
    assert_eq!(result.validations.len(), 1);
}

#[test]
fn text_fragment_pattern() {
    let case: IgnoredCase = "前-,中,文,-后".parse().expect("valid pattern");
    let marks = zhlint::ignored::find_ignored_marks("前中间文后", 100, &[case]);
    assert_eq!(marks.len(), 1);
    assert_eq!((marks[0].start, marks[0].end), (103, 112));
}

#[test]
fn invalid_regex_pattern_is_an_error() {
    let err = "/(/".parse::<IgnoredCase>().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidIgnorePattern { .. }));
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn unknown_rule_name_fails() {
    let options = Options::default().with_rules(["space-full-width-content", "no-such-rule"]);
    let err = run("中文", &options).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRule(name) if name == "no-such-rule"));
}

#[test]
fn unknown_parser_name_fails() {
    let options = Options::default().with_parsers(["markdown", "asciidoc"]);
    let err = Linter::new(&options).err().expect("asciidoc is unknown");
    assert!(matches!(err, ConfigError::UnknownParser(name) if name == "asciidoc"));
}

#[test]
fn custom_rules_run_with_their_own_name() {
    let spread = Rule::custom("spread", |stream| {
        let mut findings = Vec::new();
        for gap in stream.gaps() {
            if stream.set_gap(gap, " ") {
                findings.push(Finding::gap(stream.gap_offset(gap), "spread out"));
            }
        }
        findings
    });
    let options = Options::default()
        .with_parsers(Vec::<&str>::new())
        .with_rules([spread]);
    let result = run("ab,cd", &options).expect("valid options");
    assert_eq!(result.result, "ab , cd");
    assert_eq!(result.validations.len(), 2);
    assert!(result.validations.iter().all(|v| v.name == "spread"));
}

#[test]
fn custom_segmenter_marks_and_mark_hyper() {
    let underline = Segmenter::custom("underline", |mut state| {
        for block in &mut state.blocks {
            block.marks.push(Mark::hyper(1..5, 1, 1));
        }
        state
    });
    let options = Options::default().with_parsers([underline]).with_rules(["mark-hyper"]);
    assert_eq!(run("x_ y_z", &options).expect("valid options").result, "x _y_z");
}

#[test]
fn linter_is_reusable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Linter>();

    let linter = Arc::new(Linter::new(&Options::default()).expect("valid options"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let linter = Arc::clone(&linter);
            std::thread::spawn(move || linter.lint("中文english").result)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "中文 english");
    }
}
