use thiserror::Error;

/// Problems with the options handed to the linter.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("unknown parser `{0}`")]
    UnknownParser(String),

    #[error("invalid ignore pattern `{pattern}`: {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },
}
