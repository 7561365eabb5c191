use zhlint::block::Mark;
use zhlint::document::DocumentState;
use zhlint::parser::{hexo, ignore, markdown, vuepress};

fn state(text: &str) -> DocumentState {
    DocumentState::new(text, Vec::new())
}

fn values(state: &DocumentState) -> Vec<&str> {
    state.blocks.iter().map(|b| b.value.as_str()).collect()
}

// ---------------------------------------------------------------------------
// ignore
// ---------------------------------------------------------------------------

#[test]
fn disabled_region_is_carved_out() {
    let text = "<!-- zhlint disable -->\nA\n<!-- zhlint enable -->\nB";
    let state = ignore::parse(state(text));
    assert_eq!(values(&state), vec!["\nB"]);
    assert_eq!(state.blocks[0].start, text.len() - 2);
    assert_eq!(state.ignored_by_parsers.len(), 1);
    assert_eq!(state.ignored_by_parsers[0].parser, "ignore");
    assert_eq!(state.ignored_by_parsers[0].start, 0);
}

#[test]
fn unterminated_disable_runs_to_the_end() {
    let state = ignore::parse(state("A\n<!-- zhlint disable -->\nB\nC"));
    assert_eq!(values(&state), vec!["A\n"]);
}

#[test]
fn ignore_directive_adds_a_pattern() {
    let state = ignore::parse(state("<!-- zhlint ignore: 中文 -->\n中文english"));
    assert_eq!(state.ignored_by_rules.len(), 1);
    assert_eq!(state.ignored_by_rules[0].to_string(), "中文");
    assert_eq!(values(&state), vec!["\n中文english"]);
}

// ---------------------------------------------------------------------------
// hexo
// ---------------------------------------------------------------------------

#[test]
fn front_matter_is_carved_out() {
    let state = hexo::parse(state("---\ntitle: 标题\n---\n正文"));
    assert_eq!(values(&state), vec!["正文"]);
    assert_eq!(state.ignored_by_parsers[0].start, 0);
}

#[test]
fn unterminated_front_matter_is_content() {
    let text = "---\ntitle: 标题\n正文";
    let state = hexo::parse(state(text));
    assert_eq!(values(&state), vec![text]);
}

#[test]
fn raw_tag_bodies_are_carved_out() {
    let state = hexo::parse(state("{% raw %}中文english{% endraw %}\n正文"));
    assert_eq!(values(&state), vec!["\n正文"]);
}

#[test]
fn unterminated_raw_tag_runs_to_the_block_end() {
    let state = hexo::parse(state("正文\n{% codeblock %}\nx = 1"));
    assert_eq!(values(&state), vec!["正文\n"]);
}

#[test]
fn inline_tags_become_raw_marks() {
    let state = hexo::parse(state("前{% note %}后"));
    assert_eq!(state.blocks[0].marks, vec![Mark::raw(3..13)]);
}

// ---------------------------------------------------------------------------
// vuepress
// ---------------------------------------------------------------------------

#[test]
fn container_markers_are_carved_out() {
    let state = vuepress::parse(state("::: tip 提示\n内容\n:::\n"));
    assert_eq!(values(&state), vec![" 提示", "内容\n"]);
}

#[test]
fn containers_inside_code_fences_are_kept() {
    let text = "```\n::: tip\n```\n";
    let state = vuepress::parse(state(text));
    assert_eq!(values(&state), vec![text]);
}

#[test]
fn stray_closer_is_plain_content() {
    let text = "内容\n:::\n";
    let state = vuepress::parse(state(text));
    assert_eq!(values(&state), vec![text]);
}

// ---------------------------------------------------------------------------
// markdown
// ---------------------------------------------------------------------------

#[test]
fn paragraphs_and_headings_become_blocks() {
    let state = markdown::parse(state("# 标题\n\n段落`code`文字\n\n```\n代码\n```\n"));
    assert_eq!(values(&state), vec!["标题", "段落`code`文字"]);
    assert_eq!(state.blocks[0].start, 2);
    assert_eq!(state.blocks[1].marks, vec![Mark::code(6..12)]);
}

#[test]
fn emphasis_becomes_a_hyper_mark() {
    let state = markdown::parse(state("前**中**后"));
    assert_eq!(state.blocks[0].marks, vec![Mark::hyper(3..10, 2, 2)]);
}

#[test]
fn unterminated_code_fence_runs_to_the_end() {
    let state = markdown::parse(state("段落\n\n```\n代码english\n\n更多english\n"));
    assert_eq!(values(&state), vec!["段落"]);
}

#[test]
fn paired_inline_html_becomes_a_hyper_mark() {
    let state = markdown::parse(state("前<b>中</b>后"));
    assert_eq!(state.blocks[0].marks, vec![Mark::hyper(3..13, 3, 4)]);
}

#[test]
fn inline_code_element_becomes_a_code_mark() {
    let state = markdown::parse(state("前<code>x</code>后"));
    assert_eq!(state.blocks[0].marks, vec![Mark::code(3..17)]);
}

#[test]
fn unpaired_inline_html_is_raw() {
    let state = markdown::parse(state("前<br>后"));
    assert_eq!(state.blocks[0].marks, vec![Mark::raw(3..7)]);

    let state = markdown::parse(self::state("前<b>中后"));
    assert_eq!(state.blocks[0].marks, vec![Mark::raw(3..6)]);
}

#[test]
fn parent_marks_are_carried_into_sub_blocks() {
    let state = hexo::parse(state("标题\n\n前{% note %}后"));
    let state = markdown::parse(state);
    assert_eq!(values(&state), vec!["标题", "前{% note %}后"]);
    assert_eq!(state.blocks[1].marks, vec![Mark::raw(3..13)]);
}
