//! Technique compatibility matrix
//!
//! Columns are always every technique in the dataset so the shape of the
//! matrix is stable while filters narrow the rows.

use serde::Serialize;

use crate::entities::HardwareRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub id: String,
    pub name: String,
    /// One entry per matrix column
    pub cells: Vec<bool>,
}

/// Boolean grid of (record × technique) support
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityMatrix {
    pub techniques: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl CompatibilityMatrix {
    /// Build the grid for `records` against the full technique column set
    pub fn build(records: &[&HardwareRecord], techniques: &[String]) -> Self {
        let rows = records
            .iter()
            .map(|record| MatrixRow {
                id: record.id.clone(),
                name: record.name.clone(),
                cells: techniques.iter().map(|t| record.has_technique(t)).collect(),
            })
            .collect();

        Self {
            techniques: techniques.to_vec(),
            rows,
        }
    }

    /// True when there are no rows to show
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, technique: &str) -> Option<usize> {
        self.techniques.iter().position(|t| t == technique)
    }

    /// Cell lookup by record id and technique
    pub fn get(&self, id: &str, technique: &str) -> Option<bool> {
        let col = self.column(technique)?;
        self.rows
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.cells.get(col).copied())
    }

    /// Number of rows supporting each technique, in column order
    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.techniques.len())
            .map(|col| self.rows.iter().filter(|r| r.cells[col]).count())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{apply_filters, FilterCriteria};
    use crate::core::registry::Registry;

    fn registry() -> Registry {
        Registry::from_json_str(
            r#"[
                {"id": "A", "name": "Cell A", "compatibility": {"techniques": ["XRD", "XAS"]}},
                {"id": "B", "name": "Cell B", "compatibility": {"techniques": ["SANS"]}},
                {"id": "C", "name": "Cell C", "compatibility": {"techniques": ["XRD", "XRD"]}}
            ]"#,
            "m.json",
        )
        .unwrap()
    }

    #[test]
    fn test_build_full_matrix() {
        let registry = registry();
        let all: Vec<&HardwareRecord> = registry.records().iter().collect();
        let matrix = CompatibilityMatrix::build(&all, &registry.techniques());

        assert_eq!(matrix.techniques, vec!["SANS", "XAS", "XRD"]);
        assert_eq!(matrix.rows.len(), 3);
        assert_eq!(matrix.rows[0].cells, vec![false, true, true]);
        assert_eq!(matrix.get("B", "SANS"), Some(true));
        assert_eq!(matrix.get("B", "XRD"), Some(false));
        assert_eq!(matrix.get("B", "QENS"), None);
        assert_eq!(matrix.column_totals(), vec![1, 1, 2]);
    }

    #[test]
    fn test_columns_stable_under_filtering() {
        let registry = registry();
        let columns = registry.techniques();
        let all: Vec<&HardwareRecord> = registry.records().iter().collect();
        let full = CompatibilityMatrix::build(&all, &columns);

        let criteria = FilterCriteria::new().with_technique("SANS");
        let narrowed = CompatibilityMatrix::build(
            &apply_filters(registry.records(), &criteria),
            &columns,
        );

        assert_eq!(full.techniques, narrowed.techniques);
        assert_eq!(narrowed.rows.len(), 1);
        assert_eq!(narrowed.rows[0].name, "Cell B");
    }

    #[test]
    fn test_empty_filter_result_keeps_columns() {
        let registry = registry();
        let matrix = CompatibilityMatrix::build(&[], &registry.techniques());
        assert!(matrix.is_empty());
        assert_eq!(matrix.techniques.len(), 3);
        assert_eq!(matrix.column_totals(), vec![0, 0, 0]);
    }
}
