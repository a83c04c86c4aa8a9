//! Run manifest — the JSON record of successfully stored photos.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One successfully copied photo, as serialized into the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub file_name: String,
    pub size: String,
}

/// Write the ordered outcome list as a JSON array, replacing any manifest
/// from a previous run. No merging.
pub fn write_manifest(path: &Path, outcomes: &[UploadOutcome]) -> anyhow::Result<()> {
    let json = serde_json::to_string(outcomes)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write manifest to {}", path.display()))?;
    tracing::debug!(entries = outcomes.len(), path = %path.display(), "manifest written");
    Ok(())
}
