use std::{fs, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pl0::{
    analyze_with,
    config::{self, Limits},
    render_error, Outcome,
};

/// Checks a PL/0 program for lexical, syntactic and semantic errors.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source file to analyze
    file: PathBuf,

    /// Number of columns a tab advances in reported positions
    #[arg(long, default_value_t = config::TAB_WIDTH)]
    tab_width: u32,

    /// Maximum number of nested scopes, the program scope included
    #[arg(long, default_value_t = config::MAX_NESTING_DEPTH)]
    max_nesting_depth: usize,

    /// Do not print the symbol table of an accepted program
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::from(Outcome::Aborted.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let limits = Limits {
        tab_width: args.tab_width,
        max_nesting_depth: args.max_nesting_depth,
        ..Limits::default()
    };

    let start = Instant::now();
    let analysis = analyze_with(&source, Some(file_name), limits);
    info!("Analyzed in {:?}", start.elapsed());

    for error in analysis.errors() {
        eprintln!("{}", render_error(error, &source));
    }

    let outcome = analysis.outcome();
    match outcome {
        Outcome::Success => {
            if !args.quiet {
                print!("{}", analysis.symbols);
            }
            println!("Analysis completed without errors.");
        }
        Outcome::Failed => {
            eprintln!("Analysis failed with {} error(s).", analysis.diagnostics.len());
        }
        Outcome::Aborted => {
            eprintln!("Analysis aborted.");
        }
    }

    Ok(ExitCode::from(outcome.exit_code()))
}
