mod config;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::Level;

use zhlint::Linter;
use zhlint::parser::ParserCatalog;
use zhlint::rule::RuleCatalog;

use crate::config::LintConfig;

const SUBCOMMANDS: &[&str] = &["check", "test", "rules", "help"];

#[derive(Parser)]
#[command(name = "zhlint", version, about = "Spacing and punctuation linter for mixed Chinese/English text")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lint files and optionally write the fixes
    Check(CheckArgs),

    /// Run .test.md fixture files
    Test(TestArgs),

    /// List the built-in rules and segmenters
    Rules,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Files to lint
    #[arg(required = true)]
    files: Vec<String>,

    /// Write the corrected text back
    #[arg(long)]
    fix: bool,

    /// Write the corrected text here instead (single input only)
    #[arg(short, long, requires = "fix")]
    output: Option<PathBuf>,

    /// Config file (defaults to ./.zhlintrc.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated rule names, replacing the configured list
    #[arg(long, value_delimiter = ',')]
    rules: Option<Vec<String>>,

    /// Comma-separated segmenter names, replacing the configured list
    #[arg(long, value_delimiter = ',')]
    parsers: Option<Vec<String>>,

    /// Extra ignore pattern. Repeatable.
    #[arg(long = "ignore")]
    ignore: Vec<String>,

    /// Don't print individual issues
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or a directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // `zhlint file.md` is shorthand for `zhlint check file.md`.
    let mut args: Vec<String> = std::env::args().collect();
    let first_pos = args.iter().skip(1).find(|a| !a.starts_with('-'));
    if first_pos.is_some_and(|a| !SUBCOMMANDS.contains(&a.as_str())) {
        args.insert(1, "check".to_string());
    }

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    match cli.command {
        Command::Check(check_args) => process::exit(do_check(check_args, cli.no_color)),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
        Command::Rules => list_catalogs(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn do_check(args: CheckArgs, no_color: bool) -> i32 {
    if args.output.is_some() && args.files.len() != 1 {
        fail("--output needs exactly one input file");
    }

    let mut lint_config = LintConfig::discover(args.config.as_deref()).unwrap_or_else(|e| fail(e));
    lint_config.override_with(args.rules, args.parsers, args.ignore);
    let linter = lint_config
        .to_options()
        .and_then(|options| Ok(Linter::new(&options)?))
        .unwrap_or_else(|e| fail(e));

    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let term_config = term::Config::default();
    let mut files = SimpleFiles::new();

    let mut found = 0usize;
    let mut fixed = 0usize;
    for path in &args.files {
        let source = std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("cannot read '{path}': {e}")));
        let result = linter.lint(&source);
        if result.disabled {
            tracing::info!(file = %path, "skipped, document disables zhlint");
            continue;
        }

        let changed = result.result != result.origin;
        let file_id = files.add(path.clone(), source);
        if !args.quiet {
            for validation in &result.validations {
                let diagnostic = validation.to_diagnostic(file_id);
                let _ = term::emit_to_write_style(&mut writer.lock(), &term_config, &files, &diagnostic);
            }
        }
        found += result.validations.len();

        if args.fix {
            let target = args.output.clone().unwrap_or_else(|| PathBuf::from(path));
            if changed || args.output.is_some() {
                std::fs::write(&target, &result.result)
                    .unwrap_or_else(|e| fail(format!("cannot write '{}': {e}", target.display())));
                tracing::info!(file = %target.display(), "wrote fixes");
            }
            fixed += result.validations.len();
        }
    }

    let remaining = found - fixed;
    if found == 0 {
        eprintln!("ok: no issues in {} file(s)", args.files.len());
    } else if remaining == 0 {
        eprintln!("fixed {found} issue(s)");
    } else {
        eprintln!("found {remaining} issue(s); run with --fix to correct them");
    }

    if remaining > 0 { 1 } else { 0 }
}

fn list_catalogs() {
    println!("rules:");
    for name in RuleCatalog::builtin().names() {
        println!("  {name}");
    }
    println!("parsers:");
    for name in ParserCatalog::builtin().names() {
        println!("  {name}");
    }
}
