//! pdf-toolkit - Merge and split PDF files.
//!
//! Thin command-line front end over the `pdftoolkit` library.

mod cli;

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use pdftoolkit::config::LogLevel;
use pdftoolkit::io::LopdfBackend;
use pdftoolkit::output::{
    OutputFormatter, display_document_report, display_extract_report, display_merge_report,
    display_split_report,
};
use pdftoolkit::{Result, Toolkit};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_level()?);

    let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
    let toolkit = Toolkit::new(LopdfBackend::new(), formatter).with_progress(!cli.no_progress);
    let formatter = toolkit.formatter();

    match &cli.command {
        Command::Merge(args) => {
            let report = toolkit.merge(&args.to_config()?).await?;
            display_merge_report(formatter, &report);
        }
        Command::MergeDir(args) => {
            let report = toolkit.merge_directory(&args.to_config()).await?;
            display_merge_report(formatter, &report);
        }
        Command::Split(args) => {
            let report = toolkit.split(&args.to_config()?).await?;
            display_split_report(formatter, &report);
        }
        Command::SplitAt(args) => {
            let report = toolkit.split(&args.to_config()?).await?;
            display_split_report(formatter, &report);
        }
        Command::SplitPages(args) => {
            let report = toolkit.split(&args.to_config()?).await?;
            display_split_report(formatter, &report);
        }
        Command::Extract(args) => {
            let report = toolkit.extract(&args.to_config()?).await?;
            display_extract_report(formatter, &report);
        }
        Command::Info(args) => {
            let report = toolkit.info(&args.file).await?;
            if args.json {
                formatter.plain(&report.to_json()?);
            } else {
                display_document_report(formatter, &report);
            }
        }
        Command::Count(args) => {
            let pages = toolkit.count(&args.file).await?;
            formatter.plain(&pages.to_string());
        }
    }

    Ok(())
}

/// Install the diagnostic subscriber. Diagnostics go to stderr so that
/// command output on stdout stays clean for scripts.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.as_level_filter().into())
        .parse_lossy("");

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
