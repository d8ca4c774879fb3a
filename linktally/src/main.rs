use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use linktally::handlers::{print_banner, print_run_start, print_summary};
use linktally::{command_argument_builder, config_from_matches, log_filter};
use linktally_core::RunSummary;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    let quiet = matches.get_flag("quiet");

    // Logs go to stderr, the summary to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(matches.get_count("verbose")))),
        )
        .init();

    if !quiet {
        print_banner();
    }

    match run(&matches, quiet).await {
        Ok((summary, output)) => {
            if !quiet {
                print_summary(&summary, &output);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(matches: &ArgMatches, quiet: bool) -> anyhow::Result<(RunSummary, PathBuf)> {
    let config = config_from_matches(matches).map_err(anyhow::Error::msg)?;
    debug!("Resolved configuration: {:?}", config);
    if !quiet {
        print_run_start(&config);
    }

    let output = config.output_path.clone();
    let summary = linktally_core::run(config)
        .await
        .context("Run aborted")?;

    Ok((summary, output))
}
