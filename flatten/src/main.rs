//! Codebase flattening utility.
//!
//! Combines the relevant source files under a project root into a single
//! text file (`full_project_context.txt` by default) for LLM context.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use clap::Parser;
use flatten::exit_codes;
use flatten::io::aggregate::WriteEvent;
use flatten::io::config::resolve_config;
use flatten::io::prompt::confirm_overwrite;
use flatten::logging;
use flatten::run::{FlattenOutcome, FlattenPaths, FlattenSummary, collect_files, write_artifact};

const RULE: &str =
    "================================================================================";

#[derive(Parser)]
#[command(
    name = "flatten",
    version,
    about = "Combine a project's source files into one text file for LLM context"
)]
struct Cli {
    /// Directory to scan (defaults to the current directory).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Artifact file name, created inside the root.
    #[arg(short, long)]
    output: Option<String>,

    /// TOML file overriding ignored dirs, extensions, and excluded files.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overwrite an existing artifact without asking.
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    logging::init();
    let code = match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("\nError: {:#}", err);
            exit_codes::FAILED
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    if !root.is_dir() {
        bail!("root is not a directory: {}", root.display());
    }

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output_file = output;
        config.validate().context("invalid --output")?;
    }
    let paths = FlattenPaths::new(root, &config);

    println!("\n{RULE}");
    println!("CODEBASE FLATTENING UTILITY");
    println!("{RULE}");
    println!("Root directory: {}", paths.root.display());
    println!("Output file: {}", config.output_file);
    println!();

    if paths.output_path.exists() && !cli.yes {
        let confirmed = confirm_overwrite(
            &mut io::stdin().lock(),
            &mut io::stdout().lock(),
            &config.output_file,
        )?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(exit_codes::OK);
        }
        println!();
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("install Ctrl+C handler")?;

    println!("Scanning directory: {}", paths.root.display());
    let files = collect_files(&paths, &config);
    if interrupt.load(Ordering::Relaxed) {
        return Ok(cancelled());
    }
    println!("Found {} files to process", files.len());
    println!("Writing to: {}", paths.output_path.display());

    let outcome = write_artifact(&paths, &files, &interrupt, |event| match event {
        WriteEvent::Progress { processed } => println!("  Processed {processed} files..."),
        WriteEvent::Skipped {
            relative_path,
            failure,
        } => println!("  WARNING: Failed to process {relative_path}: {failure}"),
    })?;

    match outcome {
        FlattenOutcome::Completed(summary) => {
            print_summary(&summary);
            Ok(exit_codes::OK)
        }
        FlattenOutcome::Interrupted => Ok(cancelled()),
    }
}

fn cancelled() -> i32 {
    println!("\n\nOperation cancelled by user.");
    exit_codes::INTERRUPTED
}

fn print_summary(summary: &FlattenSummary) {
    println!("\n{RULE}");
    println!("Successfully processed {} files", summary.processed);
    if summary.skipped > 0 {
        println!("Skipped {} files due to errors", summary.skipped);
    }
    println!("Output saved to: {}", summary.output_path.display());
    println!("{RULE}");
}
