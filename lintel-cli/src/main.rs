//! Lintel CLI
//!
//! Lints the HTML files named on the command line, or an inline string, and
//! prints what the rules found.
//!
//! Exit status: 0 when every input is clean, 1 when something was reported,
//! 2 when an input or the configuration could not be read.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use lintel_rules::{Diagnostic, LintReport, Linter, RuleRegistry, RuleSet, Severity};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `LINTEL_LOG=debug`.
const LOG_ENV: &str = "LINTEL_LOG";

/// Lintel, a pluggable HTML linter
#[derive(Parser, Debug)]
#[command(name = "lintel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lint files with every rule
    lintel index.html about.html

    # Lint an HTML string
    lintel --html '<p Class=x>'

    # Run only some rules
    lintel --rules tag-pair,space-tab-mixed-disabled index.html

    # Use a JSON rule set and print JSON
    lintel --config .lintelrc --format json index.html
"#)]
struct Cli {
    /// HTML files to lint
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Lint an HTML string instead of files
    #[arg(long, value_name = "HTML", conflicts_with = "files")]
    html: Option<String>,

    /// Rules to run, e.g. `tag-pair,attr-lowercase:false`
    #[arg(long, value_name = "RULES")]
    rules: Option<String>,

    /// JSON rule set, e.g. `{"tag-pair": true}`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// The report of one input
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(flatten)]
    report: LintReport,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Lint every input. Returns whether all of them are clean.
fn run(cli: &Cli) -> Result<bool> {
    let registry = RuleRegistry::with_builtin_rules();
    if cli.list_rules {
        print_rules(&registry);
        return Ok(true);
    }

    let rules = load_rule_set(cli)?;
    let inputs = load_inputs(cli)?;
    if inputs.is_empty() {
        bail!("nothing to lint: pass HTML files or --html");
    }

    let linter = Linter::new(&registry);
    let reports: Vec<FileReport> = inputs
        .into_iter()
        .map(|(file, text)| {
            debug!(file = %file, bytes = text.len(), "linting");
            FileReport {
                report: linter.verify(&text, &rules),
                file,
            }
        })
        .collect();

    match cli.format {
        Format::Text => print_text(&reports),
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(reports.iter().all(|file| file.report.is_clean()))
}

/// Resolve the rule set from `--config` and `--rules`.
///
/// `--rules` alone runs only the rules it names; with `--config` it is
/// applied on top of the file.
fn load_rule_set(cli: &Cli) -> Result<RuleSet> {
    let mut rules = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RuleSet::from_json(&text)
                .with_context(|| format!("invalid rule set in {}", path.display()))?
        }
        None if cli.rules.is_some() => RuleSet::new(),
        None => RuleSet::all(),
    };
    if let Some(list) = &cli.rules {
        let overrides = RuleSet::from_list(list).context("invalid --rules")?;
        rules.merge(&overrides);
    }
    Ok(rules)
}

/// Named inputs, read up front so an unreadable file fails the run early.
fn load_inputs(cli: &Cli) -> Result<Vec<(String, String)>> {
    if let Some(html) = &cli.html {
        return Ok(vec![("<html>".to_string(), html.clone())]);
    }
    cli.files
        .iter()
        .map(|path| -> Result<(String, String)> {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn print_rules(registry: &RuleRegistry) {
    for rule in registry.iter() {
        println!("{:<26} {}", rule.id().bold(), rule.description());
    }
}

fn print_text(reports: &[FileReport]) {
    let mut errors = 0;
    let mut warnings = 0;
    let mut infos = 0;

    for FileReport { file, report } in reports {
        for diagnostic in &report.diagnostics {
            println!("{}", format_diagnostic(file, diagnostic));
            if !diagnostic.evidence.is_empty() {
                println!("    {}", diagnostic.evidence.dimmed());
            }
        }
        for failure in &report.failures {
            println!("{file}: {} {}", "rule failed:".red(), failure.reason);
        }
        errors += report.count(Severity::Error) + report.failures.len();
        warnings += report.count(Severity::Warning);
        infos += report.count(Severity::Info);
    }

    let total = errors + warnings + infos;
    if total == 0 {
        println!("{}", "No problems found.".green());
    } else {
        println!(
            "\n{} ({errors} errors, {warnings} warnings, {infos} info) in {} files",
            format!("{total} problems").bold(),
            reports.len()
        );
    }
}

fn format_diagnostic(file: &str, diagnostic: &Diagnostic) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => diagnostic.severity.red().bold().to_string(),
        Severity::Warning => diagnostic.severity.yellow().bold().to_string(),
        Severity::Info => diagnostic.severity.blue().bold().to_string(),
    };
    format!(
        "{file}:{}: {severity}: {} {}",
        diagnostic.position(),
        diagnostic.message,
        format!("[{}]", diagnostic.rule).dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::{Cli, Format, load_inputs, load_rule_set};
    use clap::{CommandFactory, Parser};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lintel").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&["a.html", "b.html"]);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.format, Format::Text);
        assert!(load_rule_set(&cli).unwrap().is_enabled("tag-pair"));
    }

    #[test]
    fn html_conflicts_with_files() {
        let result = Cli::try_parse_from(["lintel", "--html", "<p>", "a.html"]);
        assert!(result.is_err());
    }

    #[test]
    fn rules_flag_selects_rules() {
        let cli = parse(&["--rules", "tag-pair,doctype-first:false", "--format", "json"]);
        let rules = load_rule_set(&cli).unwrap();
        assert!(rules.is_enabled("tag-pair"));
        assert!(!rules.is_enabled("doctype-first"));
        assert!(!rules.is_enabled("attr-lowercase"));
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn bad_rule_list_is_an_error() {
        let cli = parse(&["--rules", "a,,b"]);
        assert!(load_rule_set(&cli).is_err());
    }

    #[test]
    fn inline_html_input() {
        let cli = parse(&["--html", "<p>"]);
        let inputs = load_inputs(&cli).unwrap();
        assert_eq!(inputs, vec![("<html>".to_string(), "<p>".to_string())]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = parse(&["/nonexistent/lintel/input.html"]);
        let err = load_inputs(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
