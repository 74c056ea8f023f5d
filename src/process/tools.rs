//! Required executable detection.

use std::path::PathBuf;

use crate::error::{BootstrapError, Result};

/// Resolve every tool through PATH, failing on the first one missing.
pub fn require_tools<'a>(tools: impl IntoIterator<Item = &'a str>) -> Result<Vec<PathBuf>> {
    tools
        .into_iter()
        .map(|tool| match which::which(tool) {
            Ok(path) => {
                tracing::debug!(tool, path = %path.display(), "Found required tool");
                Ok(path)
            }
            Err(_) => Err(BootstrapError::MissingTool {
                tool: tool.to_string(),
            }),
        })
        .collect()
}
