//! Core module - registry loading, filtering and derived views

pub mod compare;
pub mod config;
pub mod export;
pub mod filter;
pub mod glossary;
pub mod matrix;
pub mod registry;
pub mod session;

pub use compare::{CompareError, DetailCard, MAX_COMPARE};
pub use config::Config;
pub use export::{ExportArtifact, ExportError, EXPORT_FILE_NAME, EXPORT_MIME};
pub use filter::{apply_filters, FilterCriteria, FilterSummary, FilteredView};
pub use glossary::{Glossary, DEFINITION_UNAVAILABLE};
pub use matrix::CompatibilityMatrix;
pub use registry::{Registry, RegistryError};
pub use session::Session;
