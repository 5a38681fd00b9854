//! Clip Renamer CLI
//!
//! Command-line tool for batch-renaming a subject's clip files, rewriting
//! their JSON metadata and updating the URL mapping table.

use clap::{Parser, Subcommand};
use clip_core::{process_entry, run_batch, update_table, EntryOutcome, Identity, UncertainList};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "clip-cli")]
#[command(about = "Batch-rename clip files into canonical form", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename all clips in a directory and update the mapping table
    Run {
        /// Subject's first name
        #[arg(short, long)]
        first: String,

        /// Subject's last name
        #[arg(short, long)]
        last: String,

        /// Subject's clip directory
        #[arg(short, long)]
        dir: PathBuf,

        /// Write the run report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Update only the URL mapping table
    Table {
        /// Subject's first name
        #[arg(short, long)]
        first: String,

        /// Subject's last name
        #[arg(short, long)]
        last: String,

        /// Directory holding the mapping table
        #[arg(short, long)]
        dir: PathBuf,
    },

    /// Rename a single clip or metadata file
    Rename {
        /// Subject's first name
        #[arg(short, long)]
        first: String,

        /// Subject's last name
        #[arg(short, long)]
        last: String,

        /// File to rename
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> clip_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            first,
            last,
            dir,
            report,
        } => cmd_run(&Identity::new(first.trim(), last.trim()), &dir, report.as_deref()),
        Commands::Table { first, last, dir } => {
            cmd_table(&Identity::new(first.trim(), last.trim()), &dir)
        }
        Commands::Rename { first, last, file } => {
            cmd_rename(&Identity::new(first.trim(), last.trim()), &file)
        }
    }
}

fn cmd_run(
    identity: &Identity,
    dir: &Path,
    report_path: Option<&Path>,
) -> clip_core::Result<()> {
    let report = run_batch(dir, identity)?;

    println!();
    println!("Renaming and refactoring complete.");
    println!(
        "  {} renamed, {} unchanged, {} failed",
        report.renamed, report.unchanged, report.failed
    );

    print_uncertain(&report.uncertain);

    if let Some(path) = report_path {
        report.save(path)?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

fn cmd_table(identity: &Identity, dir: &Path) -> clip_core::Result<()> {
    if !dir.is_dir() {
        return Err(clip_core::Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut uncertain = UncertainList::new();
    update_table(dir, identity, &mut uncertain);
    print_uncertain(&uncertain);

    Ok(())
}

fn cmd_rename(identity: &Identity, file: &Path) -> clip_core::Result<()> {
    let mut uncertain = UncertainList::new();

    match process_entry(file, identity, &mut uncertain) {
        EntryOutcome::Renamed { path } => println!("Renamed to {}", path.display()),
        EntryOutcome::Unchanged { path } => println!("Already canonical: {}", path.display()),
        EntryOutcome::Unmatched => println!(
            "Did not match the expected pattern: {}",
            file.display()
        ),
        EntryOutcome::Failed { message } => println!("Failed: {}", message),
    }

    Ok(())
}

fn print_uncertain(uncertain: &UncertainList) {
    if uncertain.is_empty() {
        println!("\nAll files processed successfully.");
        return;
    }

    println!("\nThe following items were skipped or uncertain:");
    for item in uncertain.items() {
        println!("    {}", item);
    }
}
