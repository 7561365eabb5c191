use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use zhlint::{IgnoredCase, IgnoredFilter, Options};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Options(#[from] zhlint::ConfigError),
}

/// Linter settings shared by `.zhlintrc.toml` and `.test.md` front matter.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Rule names in order. Absent means every built-in rule.
    pub rules: Option<Vec<String>>,
    /// Segmenter names in order. Absent means every built-in segmenter.
    pub parsers: Option<Vec<String>>,
    /// Text fragments (`prefix-,start,end,-suffix`) or `/regex/` patterns.
    pub ignored_cases: Vec<String>,
    pub ignored_filter: IgnoredFilter,
}

impl LintConfig {
    pub const FILE_NAME: &'static str = ".zhlintrc.toml";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// An explicit `--config` path must exist; otherwise `.zhlintrc.toml`
    /// in the working directory is used when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::Read {
                config_path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
            None => Ok(Self::load_from_path(Self::FILE_NAME)?.unwrap_or_default()),
        }
    }

    /// Command line values win over the file.
    pub fn override_with(&mut self, rules: Option<Vec<String>>, parsers: Option<Vec<String>>, ignored: Vec<String>) {
        if rules.is_some() {
            self.rules = rules;
        }
        if parsers.is_some() {
            self.parsers = parsers;
        }
        self.ignored_cases.extend(ignored);
    }

    pub fn to_options(&self) -> Result<Options, ConfigError> {
        let mut options = Options::default().with_ignored_filter(self.ignored_filter);
        if let Some(rules) = &self.rules {
            options = options.with_rules(rules.iter().map(String::as_str));
        }
        if let Some(parsers) = &self.parsers {
            options = options.with_parsers(parsers.iter().map(String::as_str));
        }
        for pattern in &self.ignored_cases {
            options = options.with_ignored_case(pattern.parse::<IgnoredCase>()?);
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = LintConfig::load_from_path(temp_dir.path().join("nope.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        assert!(matches!(LintConfig::discover(Some(&path)), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(LintConfig::FILE_NAME);
        std::fs::write(
            &config_file,
            r#"
rules = ["space-full-width-content", "case-linebreak"]
parsers = ["markdown"]
ignored_cases = ["Vue.js", "/v\\d+/"]
ignored_filter = "keep-only"
"#,
        )
        .unwrap();

        let config = LintConfig::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.rules.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(config.parsers, Some(vec!["markdown".to_string()]));
        assert_eq!(config.ignored_cases.len(), 2);
        assert_eq!(config.ignored_filter, IgnoredFilter::KeepOnly);
        assert!(config.to_options().is_ok());
    }

    #[test]
    fn test_malformed_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(LintConfig::FILE_NAME);
        std::fs::write(&config_file, "rules = [").unwrap();

        let result = LintConfig::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_command_line_overrides() {
        let mut config: LintConfig = toml::from_str(r#"rules = ["mark-raw"]"#).unwrap();
        config.override_with(Some(vec!["case-linebreak".into()]), None, vec!["foo".into()]);
        assert_eq!(config.rules, Some(vec!["case-linebreak".to_string()]));
        assert_eq!(config.parsers, None);
        assert_eq!(config.ignored_cases, vec!["foo".to_string()]);
    }

    #[test]
    fn test_unknown_rule_in_config() {
        let config: LintConfig = toml::from_str(r#"rules = ["no-such-rule"]"#).unwrap();
        let options = config.to_options().unwrap();
        assert!(zhlint::Linter::new(&options).is_err());
    }

    #[test]
    fn test_invalid_ignore_pattern_in_config() {
        let config: LintConfig = toml::from_str(r#"ignored_cases = ["/(/"]"#).unwrap();
        assert!(matches!(config.to_options(), Err(ConfigError::Options(_))));
    }
}
