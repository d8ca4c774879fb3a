// Loading the URL list

use crate::error::RunError;
use std::path::Path;
use tokio::fs;

/// Read every URL from a newline-delimited file.
///
/// The whole file is read before anything is dispatched. An empty file is
/// not an error, it simply produces an empty run.
pub async fn load_urls(path: &Path) -> Result<Vec<String>, RunError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| RunError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parse_url_lines(&content))
}

/// One entry per line, exactly as written minus the line terminator.
///
/// Blank or padded lines are kept so they surface as error lines in the
/// output instead of silently shifting it.
pub fn parse_url_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
