//! Session context: the loaded registry plus the queries run against it
//!
//! The registry is loaded once and cached. [`Session::refresh`] re-checks
//! the source file: an unchanged fingerprint (mtime + length) returns
//! immediately, a changed one re-reads the file and only re-parses when the
//! content hash differs.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

use crate::core::compare::{self, CompareError, DetailCard};
use crate::core::export::{self, ExportArtifact, ExportError, EXPORT_FILE_NAME};
use crate::core::filter::{apply_filters, FilterCriteria, FilteredView};
use crate::core::glossary::Glossary;
use crate::core::matrix::CompatibilityMatrix;
use crate::core::registry::{read_source, Registry, RegistryError};
use crate::entities::HardwareRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

impl Fingerprint {
    fn of(path: &Path) -> Result<Self, RegistryError> {
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RegistryError::NotFound {
                path: path.to_path_buf(),
            },
            _ => RegistryError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A registry session
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    fingerprint: Fingerprint,
    content_hash: String,
    registry: Arc<Registry>,
    glossary: Glossary,
    export_file: String,
}

impl Session {
    /// Load the registry at `path` with the built-in glossary
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let fingerprint = Fingerprint::of(&path)?;
        let content = read_source(&path)?;
        let registry = Registry::from_json_str(&content, &path.display().to_string())?;

        info!(path = %path.display(), records = registry.len(), "loaded registry");

        Ok(Self {
            path,
            fingerprint,
            content_hash: compute_hash(&content),
            registry: Arc::new(registry),
            glossary: Glossary::builtin(),
            export_file: EXPORT_FILE_NAME.to_string(),
        })
    }

    pub fn with_glossary(mut self, glossary: Glossary) -> Self {
        self.glossary = glossary;
        self
    }

    /// Override the suggested export file name
    pub fn with_export_file(mut self, file_name: impl Into<String>) -> Self {
        self.export_file = file_name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-check the source file, reloading if its content changed
    ///
    /// Returns true when a new registry was loaded.
    pub fn refresh(&mut self) -> Result<bool, RegistryError> {
        let fingerprint = Fingerprint::of(&self.path)?;
        if fingerprint == self.fingerprint {
            debug!(path = %self.path.display(), "registry unchanged, using cache");
            return Ok(false);
        }

        let content = read_source(&self.path)?;
        let hash = compute_hash(&content);
        if hash == self.content_hash {
            debug!(path = %self.path.display(), "registry touched but content identical");
            self.fingerprint = fingerprint;
            return Ok(false);
        }

        // A parse failure leaves the old fingerprint so the next refresh fails again
        let registry = Registry::from_json_str(&content, &self.path.display().to_string())?;
        info!(path = %self.path.display(), records = registry.len(), "reloaded registry");
        self.registry = Arc::new(registry);
        self.fingerprint = fingerprint;
        self.content_hash = hash;
        Ok(true)
    }

    /// The full dataset
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn records(&self) -> &[HardwareRecord] {
        self.registry.records()
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Filtered records plus summary metrics
    pub fn apply(&self, criteria: &FilterCriteria) -> FilteredView<'_> {
        let view = FilteredView::new(apply_filters(self.registry.records(), criteria));
        debug!(
            total = self.registry.len(),
            matched = view.len(),
            "applied filters"
        );
        view
    }

    /// Compatibility matrix over every technique in the dataset
    pub fn matrix(&self, view: &FilteredView<'_>) -> CompatibilityMatrix {
        CompatibilityMatrix::build(&view.records, &self.registry.techniques())
    }

    /// Lookup by id, the preferred detail key
    pub fn lookup_id(&self, id: &str) -> Option<&HardwareRecord> {
        self.registry.get(id)
    }

    /// Lookup by name (first match in dataset order)
    pub fn lookup_name(&self, name: &str) -> Option<&HardwareRecord> {
        self.registry.find_by_name(name)
    }

    /// Detail cards for up to three records from the filtered view
    pub fn compare<S: AsRef<str>>(
        &self,
        view: &FilteredView<'_>,
        selectors: &[S],
    ) -> Result<Vec<DetailCard>, CompareError> {
        let selected = compare::select_for_comparison(&view.records, selectors)?;
        Ok(selected
            .into_iter()
            .map(|r| DetailCard::new(r, &self.glossary))
            .collect())
    }

    /// The filtered subset as a downloadable JSON artifact
    pub fn export(&self, view: &FilteredView<'_>) -> Result<ExportArtifact, ExportError> {
        export::build_artifact(&self.registry, &view.ids(), &self.export_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const V1: &str = r#"[
        {"id": "A", "name": "Cell A", "compatibility": {"techniques": ["XRD", "XAS"]},
         "digital_twin": {"cad_available": true},
         "specifications": {"operating_limits": {"max_temp_c": 150}}},
        {"id": "B", "name": "Cell B", "compatibility": {"techniques": ["SANS"]}},
        {"id": "C", "name": "Cell C", "compatibility": {"techniques": ["XRD"]},
         "specifications": {"operating_limits": {"max_temp_c": 80, "pressure_control": true}}}
    ]"#;

    const V2: &str = r#"[{"id": "Z", "name": "Only Z", "compatibility": {"techniques": ["QENS"]}}]"#;

    fn session_with(content: &str) -> (tempfile::TempDir, Session) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("operando_cell_registry.json");
        fs::write(&path, content).unwrap();
        let session = Session::open(&path).unwrap();
        (dir, session)
    }

    #[test]
    fn test_open_missing_registry() {
        let dir = tempdir().unwrap();
        let err = Session::open(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[test]
    fn test_refresh_unchanged_uses_cache() {
        let (_dir, mut session) = session_with(V1);
        let before = session.registry();
        assert!(!session.refresh().unwrap());
        assert!(Arc::ptr_eq(&before, &session.registry()));
    }

    #[test]
    fn test_refresh_same_content_keeps_cache() {
        let (_dir, mut session) = session_with(V1);
        let before = session.registry();
        // Force a fingerprint change without changing content
        session.fingerprint.len += 1;
        fs::write(session.path(), V1).unwrap();
        assert!(!session.refresh().unwrap());
        assert!(Arc::ptr_eq(&before, &session.registry()));
    }

    #[test]
    fn test_refresh_reloads_changed_content() {
        let (_dir, mut session) = session_with(V1);
        fs::write(session.path(), V2).unwrap();
        assert!(session.refresh().unwrap());
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.registry().techniques(), vec!["QENS"]);
    }

    #[test]
    fn test_refresh_malformed_keeps_failing() {
        let (_dir, mut session) = session_with(V1);
        fs::write(session.path(), "[{\"id\": ").unwrap();

        let first = session.refresh().unwrap_err();
        assert!(first.is_malformed());
        let second = session.refresh().unwrap_err();
        assert!(second.is_malformed());

        fs::write(session.path(), V2).unwrap();
        assert!(session.refresh().unwrap());
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_refresh_after_delete_is_not_found() {
        let (_dir, mut session) = session_with(V1);
        fs::remove_file(session.path()).unwrap();
        assert!(matches!(
            session.refresh().unwrap_err(),
            RegistryError::NotFound { .. }
        ));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_dir, session) = session_with(V1);

        let xrd = FilterCriteria::new().with_technique("XRD");
        let view = session.apply(&xrd);
        assert_eq!(view.ids(), vec!["A", "C"]);

        let hot = xrd.clone().high_temp_only(true);
        let view = session.apply(&hot);
        assert_eq!(view.ids(), vec!["A"]);
        assert_eq!(view.summary.cad_ready, 1);

        let twin = hot.digital_twin_only(true);
        assert_eq!(session.apply(&twin).ids(), vec!["A"]);
        let twin_alone = FilterCriteria::new().digital_twin_only(true);
        assert_eq!(session.apply(&twin_alone).ids(), vec!["A"]);

        let artifact = session.export(&view).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_slice(&artifact.bytes).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(&parsed[0], session.registry().raw("A").unwrap());
    }

    #[test]
    fn test_matrix_columns_span_dataset() {
        let (_dir, session) = session_with(V1);
        let view = session.apply(&FilterCriteria::new().with_technique("SANS"));
        let matrix = session.matrix(&view);
        assert_eq!(matrix.techniques, vec!["SANS", "XAS", "XRD"]);
        assert_eq!(matrix.rows.len(), 1);
    }

    #[test]
    fn test_compare_from_filtered_view() {
        let (_dir, session) = session_with(V1);
        let view = session.apply(&FilterCriteria::new().with_technique("XRD"));
        let cards = session.compare(&view, &["Cell B", "C"]).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "C");
        assert!(cards[0].pressure_control);
    }

    #[test]
    fn test_lookup() {
        let (_dir, session) = session_with(V1);
        assert_eq!(session.lookup_id("B").unwrap().name, "Cell B");
        assert_eq!(session.lookup_name("Cell C").unwrap().id, "C");
        assert!(session.lookup_id("Cell C").is_none());
    }

    #[test]
    fn test_custom_export_file_name() {
        let (_dir, session) = session_with(V1);
        let session = session.with_export_file("subset.json");
        let view = session.apply(&FilterCriteria::new());
        assert_eq!(session.export(&view).unwrap().file_name, "subset.json");
    }
}
