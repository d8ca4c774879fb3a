use clap::ArgMatches;
use colored::Colorize;
use linktally_core::{OutputFormat, RunConfig, RunSummary};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Expand a leading `~` so paths from the command line behave like the shell's.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Build the run configuration from parsed arguments
pub fn config_from_matches(matches: &ArgMatches) -> Result<RunConfig, String> {
    let input = matches
        .get_one::<String>("input")
        .ok_or("--input must be provided")?;
    let output = matches
        .get_one::<String>("output")
        .ok_or("--output must be provided")?;
    let timeout = *matches.get_one::<u64>("timeout").unwrap_or(&10);
    let threads = *matches.get_one::<usize>("threads").unwrap_or(&64);
    let max_redirects = *matches.get_one::<usize>("max-redirects").unwrap_or(&5);
    let format_name = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let quiet = matches.get_flag("quiet");

    if threads == 0 {
        return Err("--threads must be at least 1".to_string());
    }

    let format = OutputFormat::from_str(format_name)
        .ok_or_else(|| format!("Unknown output format '{}'", format_name))?;

    Ok(RunConfig::new(expand_path(input), expand_path(output))
        .with_timeout(Duration::from_secs(timeout))
        .with_concurrency(threads)
        .with_max_redirects(max_redirects)
        .with_format(format)
        .with_progress(!quiet))
}

/// Default log filter for a given `-v` count.
pub fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "linktally=warn,linktally_core=warn,linktally_scanner=error",
        1 => "linktally=info,linktally_core=info,linktally_scanner=info",
        _ => "linktally=debug,linktally_core=debug,linktally_scanner=debug",
    }
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn print_banner() {
    print_divider();
    println!(
        "{} {}",
        "  LINKTALLY".bright_white().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    print_divider();
    println!();
}

pub fn print_run_start(config: &RunConfig) {
    println!(
        "{} Input: {}",
        "→".blue(),
        config.input_path.display().to_string().bright_white()
    );
    println!(
        "{} Workers: {}  Timeout: {}s",
        "→".blue(),
        config.concurrency.to_string().cyan(),
        config.timeout.as_secs().to_string().cyan()
    );
    println!();
}

pub fn print_summary(summary: &RunSummary, output: &Path) {
    println!();
    println!(
        "{} {} URLs processed",
        "✓".green().bold(),
        summary.total.to_string().bright_white()
    );
    println!(
        "  {} {} succeeded",
        "•".green(),
        summary.succeeded.to_string().cyan()
    );
    let failed = summary.failed.to_string();
    if summary.failed > 0 {
        println!("  {} {} failed", "•".yellow(), failed.yellow());
    } else {
        println!("  {} {} failed", "•".green(), failed.cyan());
    }
    println!(
        "{} Results: {}",
        "✓".green().bold(),
        output.display().to_string().bright_white()
    );
}
