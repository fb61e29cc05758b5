//! Command-line compatibility check.
//!
//! # Responsibility
//! - Load reference tables from disk and check one selection.
//! - Print findings with rationales, then the plain-text report.

use clap::Parser;
use excipient_core::{
    default_log_level, init_logging, AsymmetryPolicy, LoadOptions, ReferenceData, Session,
    Verdict,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "excipient", version, about = "Check excipients for pairwise incompatibilities")]
struct Cli {
    /// Incompatibility grid (.csv, .tsv or .json).
    #[arg(long)]
    grid: PathBuf,

    /// Explanation table with Excipient1, Excipient2, Rationale columns.
    #[arg(long)]
    explanations: Option<PathBuf>,

    /// Description table with Excipient, Description columns.
    #[arg(long)]
    descriptions: Option<PathBuf>,

    /// Refuse grids whose mirrored cells disagree.
    #[arg(long)]
    strict: bool,

    /// List the selectable excipients and exit.
    #[arg(long)]
    list: bool,

    /// Absolute directory for rolling log files. Logging is off when absent.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Excipients to check together.
    excipients: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, dir) {
            eprintln!("warning: {err}");
        }
    }

    let mut options = LoadOptions::new(&cli.grid);
    if let Some(path) = &cli.explanations {
        options = options.with_explanations(path);
    }
    if let Some(path) = &cli.descriptions {
        options = options.with_descriptions(path);
    }
    if cli.strict {
        options = options.with_asymmetry_policy(AsymmetryPolicy::Reject);
    }

    let reference = match ReferenceData::load(&options) {
        Ok(reference) => Arc::new(reference),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for conflict in reference.relation().conflicts() {
        eprintln!("warning: asymmetric grid cells: {conflict}");
    }

    if cli.list {
        for name in reference.excipient_list() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    for name in &cli.excipients {
        if !reference.relation().contains_excipient(name) {
            eprintln!("warning: `{}` is not in the incompatibility grid", name.trim());
        }
    }

    let mut session = Session::new(reference);
    let outcome = session.check(&cli.excipients);
    println!("{}", outcome.verdict.message());
    if outcome.verdict == Verdict::NoExcipients {
        return ExitCode::SUCCESS;
    }

    for finding in &outcome.findings {
        println!(
            "- {} & {} -> {} incompatibility: {}",
            finding.pair.first(),
            finding.pair.second(),
            finding.severity,
            session.explain(finding)
        );
    }

    if let Some(report) = session.active_report() {
        println!();
        print!("{}", report.render_text(None));
    }

    if outcome.verdict == Verdict::Incompatible {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
