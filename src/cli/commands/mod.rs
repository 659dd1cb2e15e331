//! CLI command implementations

pub mod utils;

pub mod compare;
pub mod completions;
pub mod config;
pub mod export;
pub mod facets;
pub mod glossary;
pub mod list;
pub mod matrix;
pub mod summary;
