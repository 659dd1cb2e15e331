//! Registry loading and lookup
//!
//! A [`Registry`] holds two views of the same document: the typed
//! [`HardwareRecord`] projection used by filtering and display, and the raw
//! JSON objects exactly as they appeared in the source file, used for export.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::entities::HardwareRecord;

/// Errors raised while loading a registry document
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("Registry file not found: {}", path.display())]
    #[diagnostic(
        code(oreg::registry::not_found),
        help("Set `registry` in oreg.yaml, export OREG_REGISTRY, or pass --registry <PATH>")
    )]
    NotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] JsonSyntaxError),

    #[error("Malformed registry {source_name}: {reason}")]
    #[diagnostic(code(oreg::registry::malformed))]
    Malformed { source_name: String, reason: String },

    #[error("Failed to read registry {}: {source}", path.display())]
    #[diagnostic(code(oreg::registry::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    /// True for both syntax and shape failures
    pub fn is_malformed(&self) -> bool {
        matches!(self, RegistryError::Syntax(_) | RegistryError::Malformed { .. })
    }

    fn malformed(source_name: &str, reason: impl Into<String>) -> Self {
        RegistryError::Malformed {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

/// JSON syntax error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid JSON in registry: {message}")]
#[diagnostic(code(oreg::registry::syntax))]
pub struct JsonSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl JsonSyntaxError {
    pub fn from_serde_error(err: &serde_json::Error, source: &str, source_name: &str) -> Self {
        let offset = line_col_to_offset(source, err.line().max(1), err.column().max(1));
        Self {
            src: NamedSource::new(source_name, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            message: err.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut current_line = 1;
    let mut line_start = 0;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            break;
        }
        if ch == '\n' {
            current_line += 1;
            line_start = i + 1;
        }
    }

    (line_start + column.saturating_sub(1)).min(source.len().saturating_sub(1))
}

/// The loaded hardware registry
#[derive(Debug, Clone)]
pub struct Registry {
    records: Vec<HardwareRecord>,
    raw: Vec<Value>,
    by_id: HashMap<String, usize>,
}

impl Registry {
    /// Load a registry document from disk
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = read_source(path)?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    /// Parse a registry document held in memory
    pub fn from_json_str(source: &str, source_name: &str) -> Result<Self, RegistryError> {
        let document: Value = serde_json::from_str(source)
            .map_err(|e| JsonSyntaxError::from_serde_error(&e, source, source_name))?;

        match document {
            Value::Array(items) => Self::from_values(items, source_name),
            other => Err(RegistryError::malformed(
                source_name,
                format!("expected a list of records, found {}", json_kind(&other)),
            )),
        }
    }

    /// Build a registry from already-parsed raw records
    pub fn from_values(raw: Vec<Value>, source_name: &str) -> Result<Self, RegistryError> {
        let mut records = Vec::with_capacity(raw.len());
        let mut by_id = HashMap::with_capacity(raw.len());

        for (index, item) in raw.iter().enumerate() {
            if !item.is_object() {
                return Err(RegistryError::malformed(
                    source_name,
                    format!("record {} is {}, expected an object", index, json_kind(item)),
                ));
            }

            let record: HardwareRecord = serde_json::from_value(item.clone()).map_err(|e| {
                let label = item
                    .get("id")
                    .and_then(Value::as_str)
                    .map(|id| format!("record {} ('{}')", index, id))
                    .unwrap_or_else(|| format!("record {}", index));
                RegistryError::malformed(source_name, format!("{}: {}", label, e))
            })?;

            if let Some(previous) = by_id.insert(record.id.clone(), index) {
                return Err(RegistryError::malformed(
                    source_name,
                    format!(
                        "duplicate id '{}' at records {} and {}",
                        record.id, previous, index
                    ),
                ));
            }
            records.push(record);
        }

        debug!(source = source_name, records = records.len(), "parsed registry");

        Ok(Self {
            records,
            raw,
            by_id,
        })
    }

    /// All records in source order
    pub fn records(&self) -> &[HardwareRecord] {
        &self.records
    }

    /// Raw JSON records in source order
    pub fn raw_records(&self) -> &[Value] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&HardwareRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// The original JSON object for a record id
    pub fn raw(&self, id: &str) -> Option<&Value> {
        self.by_id.get(id).map(|&i| &self.raw[i])
    }

    /// First record with the given name, in source order
    pub fn find_by_name(&self, name: &str) -> Option<&HardwareRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Every distinct technique across the dataset, sorted
    pub fn techniques(&self) -> Vec<String> {
        distinct(self.records.iter().flat_map(|r| r.techniques()))
    }

    /// Every distinct instrument across the dataset, sorted
    pub fn instruments(&self) -> Vec<String> {
        distinct(self.records.iter().flat_map(|r| r.instruments()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Read a registry file, mapping a missing file to `NotFound`
pub(crate) fn read_source(path: &Path) -> Result<String, RegistryError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RegistryError::NotFound {
            path: path.to_path_buf(),
        },
        _ => RegistryError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
