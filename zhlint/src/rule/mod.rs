//! The rule engine and the built-in rule catalog.
//!
//! Rules run in order over one block's [`TokenStream`]. Each rule rewrites
//! token content and gaps in place and returns what it changed as
//! [`Finding`]s; the engine tags every finding with the rule's name.

mod case_abbr;
mod case_backslash;
mod case_datetime;
mod case_datetime_zh;
mod case_ellipsis;
mod case_html_entity;
mod case_linebreak;
mod case_math_exp;
mod case_raw;
mod case_traditional;
mod mark_hyper;
mod mark_raw;
mod space_brackets;
mod space_full_width_content;
mod space_punctuation;
mod space_quotes;
mod unify_punctuation;

use std::fmt;
use std::sync::Arc;

use crate::token::{Gap, TokenStream};

/// A built-in rule.
pub type RuleFn = fn(&mut TokenStream) -> Vec<Finding>;

/// A caller-supplied rule.
pub type CustomRuleFn = Arc<dyn Fn(&mut TokenStream) -> Vec<Finding> + Send + Sync>;

/// What a finding points at, as a block-relative byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// The gap whose left token ends at this offset.
    Gap(usize),
    /// The token starting at this offset.
    Content(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub target: Target,
    pub message: String,
}

impl Finding {
    pub fn gap(offset: usize, message: impl Into<String>) -> Self {
        Finding {
            target: Target::Gap(offset),
            message: message.into(),
        }
    }

    pub fn content(offset: usize, message: impl Into<String>) -> Self {
        Finding {
            target: Target::Content(offset),
            message: message.into(),
        }
    }
}

/// A finding together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFinding {
    pub rule: String,
    pub finding: Finding,
}

#[derive(Clone)]
enum RuleImpl {
    Builtin(RuleFn),
    Custom(CustomRuleFn),
}

#[derive(Clone)]
pub struct Rule {
    name: String,
    apply: RuleImpl,
}

impl Rule {
    pub fn builtin(name: &str, apply: RuleFn) -> Self {
        Rule {
            name: name.to_string(),
            apply: RuleImpl::Builtin(apply),
        }
    }

    pub fn custom<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut TokenStream) -> Vec<Finding> + Send + Sync + 'static,
    {
        Rule {
            name: name.into(),
            apply: RuleImpl::Custom(Arc::new(apply)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, stream: &mut TokenStream) -> Vec<Finding> {
        match &self.apply {
            RuleImpl::Builtin(f) => f(stream),
            RuleImpl::Custom(f) => f(stream),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Named rules available for lookup, in their default order.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleCatalog { rules }
    }

    pub fn builtin() -> Self {
        RuleCatalog::new(vec![
            Rule::builtin(mark_raw::NAME, mark_raw::apply),
            Rule::builtin(mark_hyper::NAME, mark_hyper::apply),
            Rule::builtin(unify_punctuation::NAME, unify_punctuation::apply),
            Rule::builtin(case_abbr::NAME, case_abbr::apply),
            Rule::builtin(space_full_width_content::NAME, space_full_width_content::apply),
            Rule::builtin(space_punctuation::NAME, space_punctuation::apply),
            Rule::builtin(case_math_exp::NAME, case_math_exp::apply),
            Rule::builtin(case_backslash::NAME, case_backslash::apply),
            Rule::builtin(space_brackets::NAME, space_brackets::apply),
            Rule::builtin(space_quotes::NAME, space_quotes::apply),
            Rule::builtin(case_traditional::NAME, case_traditional::apply),
            Rule::builtin(case_datetime::NAME, case_datetime::apply),
            Rule::builtin(case_datetime_zh::NAME, case_datetime_zh::apply),
            Rule::builtin(case_ellipsis::NAME, case_ellipsis::apply),
            Rule::builtin(case_html_entity::NAME, case_html_entity::apply),
            Rule::builtin(case_raw::NAME, case_raw::apply),
            Rule::builtin(case_linebreak::NAME, case_linebreak::apply),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Run `rules` in order over `stream`, collecting their findings.
pub fn process_rules(stream: &mut TokenStream, rules: &[Rule]) -> Vec<RuleFinding> {
    let mut findings = Vec::new();
    for rule in rules {
        findings.extend(rule.apply(stream).into_iter().map(|finding| RuleFinding {
            rule: rule.name.clone(),
            finding,
        }));
    }
    findings
}

// ---------------------------------------------------------------------------
// Helpers shared by the rules
// ---------------------------------------------------------------------------

/// Half-width sentence punctuation.
pub(crate) const SENTENCE_PUNCTUATION: [&str; 6] = [",", ".", ";", ":", "!", "?"];

/// Set the gap and record a finding when it changed.
pub(crate) fn space_gap(
    stream: &mut TokenStream,
    gap: Gap,
    space: &str,
    message: &str,
    findings: &mut Vec<Finding>,
) {
    if stream.set_gap(gap, space) {
        findings.push(Finding::gap(stream.gap_offset(gap), message));
    }
}
