// Fan-in: resolve handles in submission order and stream result lines

use crate::dispatch::Dispatched;
use crate::error::RunError;
use indicatif::ProgressBar;
use linktally_scanner::TaskOutcome;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<url> --> <n> internal links` / `<url> --> ERROR: <message>`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" | "jsonl" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn format_line(&self, outcome: &TaskOutcome) -> Result<String, RunError> {
        match self {
            OutputFormat::Text => Ok(outcome.to_line()),
            OutputFormat::Json => Ok(serde_json::to_string(outcome)?),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &TaskOutcome) {
        self.total += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Wait for a single handle. A task that panicked or was cancelled still
/// yields a failure for its own URL.
pub async fn resolve(dispatched: Dispatched) -> TaskOutcome {
    let Dispatched { task, handle } = dispatched;
    match handle.await {
        Ok(outcome) => outcome,
        Err(e) => TaskOutcome::failure(task.url, format!("Task did not complete: {}", e)),
    }
}

/// Await every handle strictly in the order given, writing one line per
/// task. Only writer failures abort collection.
pub async fn collect<W>(
    dispatched: Vec<Dispatched>,
    writer: &mut W,
    format: OutputFormat,
    progress: Option<&ProgressBar>,
) -> Result<RunSummary, RunError>
where
    W: AsyncWrite + Unpin,
{
    let mut summary = RunSummary::default();

    for item in dispatched {
        let index = item.task.index;
        let outcome = resolve(item).await;
        debug!("Collected task {}: {}", index, outcome.url());

        let line = format.format_line(&outcome)?;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;

        summary.record(&outcome);
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    writer.flush().await?;
    Ok(summary)
}
