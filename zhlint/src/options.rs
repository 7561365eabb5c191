use std::sync::Arc;

use crate::ignored::{IgnoredCase, IgnoredFilter};
use crate::logger::Logger;
use crate::parser::Segmenter;
use crate::rule::Rule;

/// A rule selection: a catalog name or a rule supplied by the caller.
#[derive(Debug, Clone)]
pub enum RuleSpec {
    Named(String),
    Custom(Rule),
}

impl From<&str> for RuleSpec {
    fn from(name: &str) -> Self {
        RuleSpec::Named(name.to_string())
    }
}

impl From<Rule> for RuleSpec {
    fn from(rule: Rule) -> Self {
        RuleSpec::Custom(rule)
    }
}

/// A segmenter selection: a catalog name or a segmenter supplied by the caller.
#[derive(Debug, Clone)]
pub enum ParserSpec {
    Named(String),
    Custom(Segmenter),
}

impl From<&str> for ParserSpec {
    fn from(name: &str) -> Self {
        ParserSpec::Named(name.to_string())
    }
}

impl From<Segmenter> for ParserSpec {
    fn from(parser: Segmenter) -> Self {
        ParserSpec::Custom(parser)
    }
}

/// Linter configuration. `None` for `rules` or `hyper_parse` selects the
/// whole built-in catalog in its default order.
#[derive(Clone, Default)]
pub struct Options {
    pub rules: Option<Vec<RuleSpec>>,
    pub hyper_parse: Option<Vec<ParserSpec>>,
    pub ignored_cases: Vec<IgnoredCase>,
    pub ignored_filter: IgnoredFilter,
    pub logger: Option<Arc<dyn Logger>>,
}

impl Options {
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RuleSpec>,
    {
        self.rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_parsers<I, S>(mut self, parsers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ParserSpec>,
    {
        self.hyper_parse = Some(parsers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ignored_case(mut self, case: IgnoredCase) -> Self {
        self.ignored_cases.push(case);
        self
    }

    pub fn with_ignored_filter(mut self, filter: IgnoredFilter) -> Self {
        self.ignored_filter = filter;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }
}
