//! Runner for `.test.md` fixtures: TOML front matter between `---` lines,
//! then the document to lint.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use zhlint::{LintResult, Linter, Validation};

use crate::config::LintConfig;

#[derive(Debug, Deserialize)]
pub struct ExpectedValidation {
    /// Rule name that must have reported it.
    pub name: String,

    /// If set, the validation must start on this 1-based line of the input.
    #[serde(default)]
    pub line: Option<usize>,

    /// If set, a substring of the validation message.
    #[serde(default)]
    pub contains: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TestConfig {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub lint: LintConfig,

    /// The corrected document, compared with trailing whitespace trimmed.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// If present (even empty), count, order and rule names are checked.
    #[serde(default)]
    pub expect_validations: Option<Vec<ExpectedValidation>>,

    #[serde(default)]
    pub expect_disabled: bool,
}

/// Split a fixture into its config and the input document.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');
    let body = content
        .strip_prefix("---")
        .ok_or("missing opening --- front matter delimiter")?;
    let body = body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')).unwrap_or(body);

    let close = body.find("\n---").ok_or("missing closing --- front matter delimiter")?;
    let front_matter = body[..close].trim_end_matches('\r');
    let rest = &body[close + "\n---".len()..];
    let input = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')).unwrap_or(rest);

    let config = toml::from_str(front_matter).map_err(|e| format!("TOML parse error: {e}"))?;
    Ok((config, input))
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    /// `Err` holds the failure reason.
    pub outcome: Result<(), String>,
}

impl TestResult {
    fn label(&self) -> &str {
        self.description
            .as_deref()
            .or_else(|| self.path.file_stem().and_then(|s| s.to_str()))
            .unwrap_or("?")
    }
}

fn run_single_test(path: &Path) -> TestResult {
    let mut description = None;
    let outcome = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read file: {e}"))
        .and_then(|content| {
            let (config, input) = parse_test_file(&content).map_err(|e| format!("front matter error: {e}"))?;
            description = config.description.clone();
            check_fixture(&config, input)
        });

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome,
    }
}

fn check_fixture(config: &TestConfig, input: &str) -> Result<(), String> {
    let options = config.lint.to_options().map_err(|e| format!("invalid options: {e}"))?;
    let linter = Linter::new(&options).map_err(|e| format!("invalid options: {e}"))?;
    let result = linter.lint(input);

    if result.disabled != config.expect_disabled {
        return Err(format!(
            "expected disabled = {}, got {}",
            config.expect_disabled, result.disabled
        ));
    }

    if let Some(expected) = &config.expect_output {
        let actual = result.result.trim_end();
        let expected = expected.trim_end();
        if actual != expected {
            return Err(format!("output mismatch\n  expected: {expected}\n  actual:   {actual}"));
        }
    }

    if let Some(expected) = &config.expect_validations {
        check_validations(&result, expected)?;
    }
    Ok(())
}

/// 1-based line of a byte offset.
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].matches('\n').count() + 1
}

fn check_validations(result: &LintResult, expected: &[ExpectedValidation]) -> Result<(), String> {
    let actual = &result.validations;
    if actual.len() != expected.len() {
        let listed: Vec<String> = actual.iter().map(|v| format!("    - {v}")).collect();
        return Err(format!(
            "expected {} validation(s), got {}\n  actual validations:\n{}",
            expected.len(),
            actual.len(),
            if listed.is_empty() {
                "    (none)".to_string()
            } else {
                listed.join("\n")
            }
        ));
    }

    for (i, (got, want)) in actual.iter().zip(expected).enumerate() {
        check_one(&result.origin, i, got, want)?;
    }
    Ok(())
}

fn check_one(source: &str, i: usize, got: &Validation, want: &ExpectedValidation) -> Result<(), String> {
    if got.name != want.name {
        return Err(format!("validation[{i}]: expected rule {}, got {got}", want.name));
    }
    if let Some(needle) = &want.contains
        && !got.message.contains(needle.as_str())
    {
        return Err(format!("validation[{i}]: expected message containing \"{needle}\", got {got}"));
    }
    if let Some(line) = want.line {
        let actual_line = line_of(source, got.index);
        if actual_line != line {
            return Err(format!("validation[{i}]: expected on line {line}, found on line {actual_line}"));
        }
    }
    Ok(())
}

/// `.test.md` files under `root` keyed by their folder relative to `root`;
/// files directly in `root` get the empty category.
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_tests(root, root, &mut categories);
    categories.values_mut().for_each(|files| files.sort());
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_tests(&path, root, out);
            continue;
        }
        let is_fixture = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".test.md"));
        if is_fixture {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no .test.md files found in {}", path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(category), files.len());
    }
}

/// Terminal styling for the report.
struct Style {
    color: bool,
}

impl Style {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn pass(&self) -> String {
        self.paint("32", "PASS")
    }

    fn fail(&self) -> String {
        self.paint("31", "FAIL")
    }

    fn header(&self, text: &str) -> String {
        self.paint("1", text)
    }
}

/// Select the categories named on the command line; a name also selects its
/// subfolders.
fn select<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a [PathBuf]> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
    }

    let mut selected = BTreeMap::new();
    for name in requested {
        let name = name.trim_matches('/');
        let nested = format!("{name}/");
        let before = selected.len();
        for (category, files) in all {
            if category == name || category.starts_with(&nested) {
                selected.insert(category.as_str(), files.as_slice());
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!("warning: category '{name}' not found (available: {})", available.join(", "));
        }
    }
    selected
}

/// Run every fixture under `path` (or the single file `path`), optionally
/// limited to `categories`. Returns the process exit code.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { color: !no_color };

    let all = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        discover_categorized(path)
    };
    if all.is_empty() {
        eprintln!("no .test.md files found in {}", path.display());
        return 1;
    }

    let selected = if path.is_file() {
        select(&all, &[])
    } else {
        select(&all, categories)
    };
    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();
    for (category, files) in &selected {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", style.header(category_label(category)));
        }
        for file in *files {
            let result = run_single_test(file);
            if result.outcome.is_ok() {
                passed += 1;
                eprintln!("  {}  {}", style.pass(), result.label());
            } else {
                eprintln!("  {}  {}", style.fail(), result.label());
                failures.push(result);
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let Err(reason) = &failure.outcome {
                reason.lines().for_each(|line| eprintln!("  {line}"));
            }
        }
    }

    eprintln!();
    if failures.is_empty() {
        eprintln!("test result: {}. {passed} passed, 0 failed", style.paint("32", "ok"));
        0
    } else {
        eprintln!(
            "test result: {}. {passed} passed, {} failed (of {})",
            style.paint("31", "FAILED"),
            failures.len(),
            passed + failures.len()
        );
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let content = "---\ndescription = \"spacing\"\nrules = [\"space-full-width-content\"]\nexpect_output = \"中文 English\"\n---\n中文English\n";
        let (config, input) = parse_test_file(content).unwrap();
        assert_eq!(config.description.as_deref(), Some("spacing"));
        assert_eq!(config.lint.rules, Some(vec!["space-full-width-content".to_string()]));
        assert_eq!(input, "中文English\n");
        assert!(check_fixture(&config, input).is_ok());
    }

    #[test]
    fn test_missing_closing_delimiter() {
        assert!(parse_test_file("---\ndescription = \"x\"\n").is_err());
        assert!(parse_test_file("no front matter").is_err());
    }

    #[test]
    fn test_output_mismatch_is_reported() {
        let (config, input) = parse_test_file("---\nexpect_output = \"中文English\"\n---\n中文English").unwrap();
        let reason = check_fixture(&config, input).unwrap_err();
        assert!(reason.starts_with("output mismatch"));
    }

    #[test]
    fn test_line_of() {
        assert_eq!(line_of("a\nb\nc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 2), 2);
        assert_eq!(line_of("a\nb\nc", 99), 3);
    }
}
