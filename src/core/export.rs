//! Export of a filtered subset in its original record shape

use miette::Diagnostic;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::registry::Registry;

/// Suggested download file name
pub const EXPORT_FILE_NAME: &str = "filtered_cell_registry.json";

/// MIME type of the export artifact
pub const EXPORT_MIME: &str = "application/json";

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    #[diagnostic(code(oreg::export::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export to {}: {source}", path.display())]
    #[diagnostic(code(oreg::export::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialized export ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: &'static str,
    /// Number of records in the artifact
    pub count: usize,
}

impl ExportArtifact {
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, &self.bytes).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Original records whose id is in `ids`, in dataset order
pub fn select_raw<'r>(registry: &'r Registry, ids: &[&str]) -> Vec<&'r Value> {
    let wanted: HashSet<&str> = ids.iter().copied().collect();
    registry
        .records()
        .iter()
        .zip(registry.raw_records())
        .filter(|(record, _)| wanted.contains(record.id.as_str()))
        .map(|(_, raw)| raw)
        .collect()
}

/// Serialize the selected records as a pretty-printed JSON array
pub fn build_artifact(
    registry: &Registry,
    ids: &[&str],
    file_name: &str,
) -> Result<ExportArtifact, ExportError> {
    let selected = select_raw(registry, ids);
    let bytes = serde_json::to_vec_pretty(&selected)?;

    Ok(ExportArtifact {
        bytes,
        file_name: file_name.to_string(),
        mime: EXPORT_MIME,
        count: selected.len(),
    })
}
