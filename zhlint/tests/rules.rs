use pretty_assertions::assert_eq;
use rstest::rstest;
use zhlint::{Options, run};

fn plain_options() -> Options {
    Options::default().with_parsers(Vec::<&str>::new())
}

fn fix_plain(text: &str) -> String {
    run(text, &plain_options()).expect("valid options").result
}

fn fix_with_rules(text: &str, rules: &[&str]) -> String {
    let options = plain_options().with_rules(rules.iter().copied());
    run(text, &options).expect("valid options").result
}

#[rstest]
#[case::mixed_content("中文english混排", "中文 english 混排")]
#[case::collapses_wide_gaps("中文  english", "中文 english")]
#[case::version_suffix("Chrome 53+", "Chrome 53+")]
#[case::colon_and_quotes("他说:\"hello\"很好", "他说: \"hello\" 很好")]
#[case::unify_comma("中文,中文", "中文，中文")]
#[case::unify_at_block_end("你好.", "你好。")]
#[case::unify_before_english("中文,english", "中文，english")]
#[case::unify_after_english("english,中文", "english，中文")]
#[case::unify_exclamation("中文!english", "中文！english")]
#[case::unify_keeps_half_pairs("1,000", "1,000")]
#[case::full_width_punctuation("中文 ， 中文", "中文，中文")]
#[case::brackets_outside("中文(english)中文", "中文 (english) 中文")]
#[case::brackets_inside("( 中文 )", "(中文)")]
#[case::quotes_outside("他说\"你好\"", "他说 \"你好\"")]
#[case::math_always_spaced("1+1", "1 + 1")]
#[case::math_already_spaced("a -b", "a - b")]
#[case::date_left_alone("2019-01-01", "2019-01-01")]
#[case::assignment_left_alone("x=1", "x=1")]
#[case::math_chain_spaced_together("1+2=3", "1 + 2 = 3")]
#[case::math_chain_mixed_operators("a*b-c", "a * b - c")]
#[case::math_chain_spaced_in_source("x = y-1", "x = y - 1")]
#[case::math_in_url_query("见 https://example.com/search?q=a+b 页面", "见 https://example.com/search?q=a+b 页面")]
#[case::backslash("中文\\english", "中文 \\english")]
#[case::traditional_nesting("「外層「內層」外層」", "「外層『內層』外層」")]
#[case::clock_time("会议在12:30开始", "会议在 12:30 开始")]
#[case::chinese_date("2019 年 1 月", "2019年1月")]
#[case::ellipsis("中文 ...", "中文...")]
#[case::english_ellipsis("Wait...what", "Wait...what")]
#[case::html_entity("中文&amp;中文", "中文&amp;中文")]
#[case::raw_compound("TCP/IP协议", "TCP/IP 协议")]
#[case::line_break("中文\nenglish", "中文\nenglish")]
#[case::backtick_code("使用`a+b`计算", "使用 `a+b` 计算")]
#[case::abbreviation("Mr.张三", "Mr.张三")]
fn fixes_plain_text(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(fix_plain(input), expected);
}

#[test]
fn abbreviation_dots_are_locked() {
    assert_eq!(fix_with_rules("Mr.张三", &["space-punctuation"]), "Mr. 张三");
    assert_eq!(fix_with_rules("Mr.张三", &["case-abbr", "space-punctuation"]), "Mr.张三");
}

#[test]
fn line_breaks_are_restored_last() {
    assert_eq!(fix_with_rules("中文\nenglish", &["space-full-width-content"]), "中文 english");
    assert_eq!(
        fix_with_rules("中文\nenglish", &["space-full-width-content", "case-linebreak"]),
        "中文\nenglish"
    );
}

#[test]
fn empty_rule_list_returns_the_input() {
    let text = "中文english ， 混排 1+1";
    let result = run(text, &plain_options().with_rules(Vec::<&str>::new())).expect("valid options");
    assert_eq!(result.result, text);
    assert!(result.validations.is_empty());
}

#[test]
fn gap_validations_point_at_the_source_gap() {
    let result = run("中文english混排", &plain_options()).expect("valid options");
    let found: Vec<(usize, usize, &str)> = result
        .validations
        .iter()
        .map(|v| (v.index, v.length, v.name.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![(6, 0, "space-full-width-content"), (13, 0, "space-full-width-content")]
    );
}

#[test]
fn content_validations_point_at_the_token() {
    let result = run("中文,中文", &plain_options()).expect("valid options");
    assert_eq!(result.validations.len(), 1);
    assert_eq!(result.validations[0].index, 6);
    assert_eq!(result.validations[0].length, 1);
    assert_eq!(result.validations[0].name, "unify-punctuation");
}

#[test]
fn spaces_around_full_width_punctuation_are_reported() {
    let result = run("中文 ， 中文", &plain_options()).expect("valid options");
    let found: Vec<(usize, usize)> = result.validations.iter().map(|v| (v.index, v.length)).collect();
    assert_eq!(found, vec![(6, 1), (10, 1)]);
    assert!(result.validations.iter().all(|v| v.name == "space-punctuation"));
}

#[test]
fn reverted_corrections_are_not_reported() {
    let result = run("2019年", &plain_options()).expect("valid options");
    assert_eq!(result.result, "2019年");
    assert!(result.validations.is_empty());
}

#[test]
fn the_last_rule_to_touch_a_gap_names_the_validation() {
    let result = run("2019  年", &plain_options()).expect("valid options");
    assert_eq!(result.result, "2019年");
    assert_eq!(result.validations.len(), 1);
    assert_eq!(result.validations[0].name, "case-datetime-zh");
    assert_eq!(result.validations[0].length, 2);
}

#[test]
fn code_span_interior_is_untouched() {
    let text = "使用`a+b , 中文english`计算";
    let fixed = fix_plain(text);
    assert!(fixed.contains("`a+b , 中文english`"));
    assert_eq!(fixed, "使用 `a+b , 中文english` 计算");
}
