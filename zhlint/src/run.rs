use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::document::DocumentState;
use crate::error::ConfigError;
use crate::ignored::{IgnoredCase, IgnoredFilter, IgnoredMark, find_ignored_marks};
use crate::join::join;
use crate::logger::{Logger, TracingLogger};
use crate::options::{Options, ParserSpec, RuleSpec};
use crate::parser::{ParserCatalog, Segmenter};
use crate::rule::{Rule, RuleCatalog, process_rules};
use crate::token::tokenize;
use crate::validation::Validation;

static DISABLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*zhlint\s*disabled\s*-->").expect("sentinel pattern is valid"));

/// The outcome of linting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintResult {
    pub origin: String,
    /// The corrected document.
    pub result: String,
    /// Sorted by `index`.
    pub validations: Vec<Validation>,
    /// The document opted out with `<!-- zhlint disabled -->`.
    pub disabled: bool,
}

/// A linter with its rules and segmenters resolved.
#[derive(Clone)]
pub struct Linter {
    rules: Vec<Rule>,
    parsers: Vec<Segmenter>,
    ignored_cases: Vec<IgnoredCase>,
    ignored_filter: IgnoredFilter,
    logger: Arc<dyn Logger>,
}

impl Linter {
    pub fn new(options: &Options) -> Result<Self, ConfigError> {
        Self::with_catalogs(options, &RuleCatalog::builtin(), &ParserCatalog::builtin())
    }

    /// Resolve named rules and segmenters against the given catalogs.
    pub fn with_catalogs(
        options: &Options,
        rule_catalog: &RuleCatalog,
        parser_catalog: &ParserCatalog,
    ) -> Result<Self, ConfigError> {
        let rules = match &options.rules {
            None => rule_catalog.rules().to_vec(),
            Some(specs) => specs
                .iter()
                .map(|spec| match spec {
                    RuleSpec::Named(name) => rule_catalog
                        .get(name)
                        .cloned()
                        .ok_or_else(|| ConfigError::UnknownRule(name.clone())),
                    RuleSpec::Custom(rule) => Ok(rule.clone()),
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let parsers = match &options.hyper_parse {
            None => parser_catalog.parsers().to_vec(),
            Some(specs) => specs
                .iter()
                .map(|spec| match spec {
                    ParserSpec::Named(name) => parser_catalog
                        .get(name)
                        .cloned()
                        .ok_or_else(|| ConfigError::UnknownParser(name.clone())),
                    ParserSpec::Custom(parser) => Ok(parser.clone()),
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Linter {
            rules,
            parsers,
            ignored_cases: options.ignored_cases.clone(),
            ignored_filter: options.ignored_filter,
            logger: options.logger.clone().unwrap_or_else(|| Arc::new(TracingLogger) as Arc<dyn Logger>),
        })
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    pub fn lint(&self, text: &str) -> LintResult {
        if DISABLED.is_match(text) {
            tracing::debug!("document opted out of linting");
            return LintResult {
                origin: text.to_string(),
                result: text.to_string(),
                validations: Vec::new(),
                disabled: true,
            };
        }

        let state = self
            .parsers
            .iter()
            .fold(DocumentState::new(text, self.ignored_cases.clone()), |state, parser| parser.apply(state));

        let mut validations = Vec::new();
        let mut ignored_marks: Vec<IgnoredMark> = Vec::new();
        let mut rewritten: Vec<(usize, usize, String)> = Vec::with_capacity(state.blocks.len());
        for block in &state.blocks {
            let mut stream = tokenize(&block.value, &block.marks);
            let findings = process_rules(&mut stream, &self.rules);
            let joined = join(&stream, findings, block.start);
            tracing::debug!(start = block.start, end = block.end, found = joined.validations.len(), "linted block");

            ignored_marks.extend(find_ignored_marks(&block.value, block.start, &state.ignored_by_rules));
            validations.extend(joined.validations);
            rewritten.push((block.start, block.end, joined.value));
        }

        for (index, case) in state.ignored_by_rules.iter().enumerate() {
            if !ignored_marks.iter().any(|m| m.case == index) {
                self.logger.warn(&format!("ignored case `{case}` does not match anything"));
            }
        }

        validations.sort_by_key(|v| v.index);
        LintResult {
            origin: text.to_string(),
            result: replace_blocks(text, rewritten),
            validations: self.ignored_filter.apply(validations, &ignored_marks),
            disabled: false,
        }
    }
}

/// Lint `text` with a linter built from `options`.
pub fn run(text: &str, options: &Options) -> Result<LintResult, ConfigError> {
    Ok(Linter::new(options)?.lint(text))
}

/// Splice rewritten blocks into the original text; everything outside the
/// blocks is copied unchanged.
fn replace_blocks(text: &str, mut blocks: Vec<(usize, usize, String)>) -> String {
    blocks.sort_by_key(|(start, _, _)| *start);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end, value) in blocks {
        if start < cursor {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&value);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
