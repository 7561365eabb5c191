pub mod block;
pub mod document;
pub mod error;
pub mod ignored;
pub mod join;
pub mod logger;
pub mod options;
pub mod parser;
pub mod rule;
pub mod run;
pub mod token;
pub mod validation;

pub use error::ConfigError;
pub use ignored::{IgnoredCase, IgnoredFilter};
pub use logger::{Logger, TracingLogger};
pub use options::{Options, ParserSpec, RuleSpec};
pub use run::{LintResult, Linter, run};
pub use validation::Validation;
