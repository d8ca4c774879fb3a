use crate::collect::{RunSummary, collect};
use crate::config::RunConfig;
use crate::dispatch::Dispatcher;
use crate::error::RunError;
use crate::input::load_urls;
use indicatif::{ProgressBar, ProgressStyle};
use linktally_scanner::LinkCounter;
use tokio::fs::File;
use tokio::io::BufWriter;
use tracing::info;

/// Load the input, fetch every URL concurrently and write one line per URL
/// to the output file, in input order.
///
/// The output file is created before any request goes out, so a bad output
/// path fails fast instead of after the whole batch has been fetched.
pub async fn run(config: RunConfig) -> Result<RunSummary, RunError> {
    let urls = load_urls(&config.input_path).await?;
    info!(
        "Loaded {} URLs from {}",
        urls.len(),
        config.input_path.display()
    );

    let file = File::create(&config.output_path)
        .await
        .map_err(|source| RunError::CreateOutput {
            path: config.output_path.clone(),
            source,
        })?;
    let mut writer = BufWriter::new(file);

    let counter = LinkCounter::with_options(config.timeout, config.max_redirects)?;
    let dispatcher = Dispatcher::new(counter, config.concurrency);

    let progress = config.show_progress.then(|| progress_bar(urls.len()));

    let dispatched = dispatcher.dispatch(urls);
    let summary = collect(dispatched, &mut writer, config.format, progress.as_ref()).await?;

    if let Some(pb) = progress {
        pb.finish_with_message(format!("{} failed", summary.failed));
    }

    info!(
        "Run complete: {} URLs, {} succeeded, {} failed -> {}",
        summary.total,
        summary.succeeded,
        summary.failed,
        config.output_path.display()
    );

    Ok(summary)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
