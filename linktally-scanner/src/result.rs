use serde::{Deserialize, Serialize};

/// Terminal value of one fetch-and-count task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskOutcome {
    Success { url: String, internal_links: usize },
    Failure { url: String, error: String },
}

impl TaskOutcome {
    pub fn success(url: String, internal_links: usize) -> Self {
        TaskOutcome::Success {
            url,
            internal_links,
        }
    }

    pub fn failure(url: String, error: String) -> Self {
        TaskOutcome::Failure { url, error }
    }

    pub fn url(&self) -> &str {
        match self {
            TaskOutcome::Success { url, .. } | TaskOutcome::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success { .. })
    }

    /// Plain-text summary line, without the trailing newline.
    pub fn to_line(&self) -> String {
        match self {
            TaskOutcome::Success {
                url,
                internal_links,
            } => format!("{} --> {} internal links", url, internal_links),
            TaskOutcome::Failure { url, error } => format!("{} --> ERROR: {}", url, error),
        }
    }
}
