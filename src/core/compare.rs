//! Record lookup and side-by-side comparison
//!
//! Selectors resolve by id first and fall back to name, so records with a
//! shared name are still reachable through their id. Selectors are resolved
//! against the current filtered set only; one that no longer resolves is
//! dropped rather than treated as an error.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::core::glossary::Glossary;
use crate::entities::hardware::Limitations3r;
use crate::entities::HardwareRecord;

/// Maximum number of records shown side by side
pub const MAX_COMPARE: usize = 3;

#[derive(Debug, Error, Diagnostic)]
pub enum CompareError {
    #[error("Too many records selected for comparison: {requested} (max {max})")]
    #[diagnostic(code(oreg::compare::too_many))]
    TooManySelections { requested: usize, max: usize },
}

/// Find a record by id
pub fn find_by_id<'a>(records: &[&'a HardwareRecord], id: &str) -> Option<&'a HardwareRecord> {
    records.iter().copied().find(|r| r.id == id)
}

/// Find the first record with `name`
pub fn find_by_name<'a>(records: &[&'a HardwareRecord], name: &str) -> Option<&'a HardwareRecord> {
    records.iter().copied().find(|r| r.name == name)
}

/// Resolve a selector as an id, then as a name
pub fn resolve<'a>(records: &[&'a HardwareRecord], selector: &str) -> Option<&'a HardwareRecord> {
    find_by_id(records, selector).or_else(|| find_by_name(records, selector))
}

/// Pick the records to compare from the filtered set
///
/// With no selectors the first filtered record is used. Repeated selectors
/// count once toward the limit, unresolvable ones are skipped, and
/// selectors naming the same record collapse to one card.
pub fn select_for_comparison<'a, S: AsRef<str>>(
    filtered: &[&'a HardwareRecord],
    selectors: &[S],
) -> Result<Vec<&'a HardwareRecord>, CompareError> {
    let mut distinct: Vec<&str> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let selector = selector.as_ref();
        if !distinct.contains(&selector) {
            distinct.push(selector);
        }
    }

    if distinct.len() > MAX_COMPARE {
        return Err(CompareError::TooManySelections {
            requested: distinct.len(),
            max: MAX_COMPARE,
        });
    }

    if distinct.is_empty() {
        return Ok(filtered.first().copied().into_iter().collect());
    }

    let mut selected: Vec<&HardwareRecord> = Vec::with_capacity(distinct.len());
    for selector in distinct {
        match resolve(filtered, selector) {
            Some(record) if !selected.iter().any(|s| s.id == record.id) => selected.push(record),
            Some(_) => {}
            None => warn!(selector, "selection not in filtered set, no detail shown"),
        }
    }
    Ok(selected)
}

/// A technique annotated with its glossary definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechniqueNote {
    pub technique: String,
    pub definition: String,
}

/// Everything shown on a comparison card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailCard {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub contact: String,
    pub mailto: String,
    pub max_temp_c: f64,
    pub pressure_control: bool,
    pub cad_available: bool,
    pub techniques: Vec<TechniqueNote>,
    pub limitations_3r: Limitations3r,
}

impl DetailCard {
    pub fn new(record: &HardwareRecord, glossary: &Glossary) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: record.kind.clone(),
            contact: record.contact_display().to_string(),
            mailto: record.mailto(),
            max_temp_c: record.max_temp_c(),
            pressure_control: record.pressure_control(),
            cad_available: record.cad_available(),
            techniques: record
                .techniques()
                .iter()
                .map(|t| TechniqueNote {
                    technique: t.clone(),
                    definition: glossary.annotate(t).to_string(),
                })
                .collect(),
            limitations_3r: record.limitations_3r.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::glossary::DEFINITION_UNAVAILABLE;
    use crate::core::registry::Registry;

    fn registry() -> Registry {
        Registry::from_json_str(
            r#"[
                {"id": "A", "name": "Cell A", "type": "Coin",
                 "compatibility": {"techniques": ["XRD-CT (synchrotron)", "Raman"]},
                 "contact_info": {"primary_email": "a@example.org"},
                 "limitations_3r": {"reliability": ["Leaks above 2 bar"]}},
                {"id": "B", "name": "Shared"},
                {"id": "C", "name": "Shared"},
                {"id": "D", "name": "Cell D"}
            ]"#,
            "cmp.json",
        )
        .unwrap()
    }

    fn all(registry: &Registry) -> Vec<&HardwareRecord> {
        registry.records().iter().collect()
    }

    #[test]
    fn test_resolve_prefers_id() {
        let registry = registry();
        let records = all(&registry);
        assert_eq!(resolve(&records, "C").unwrap().id, "C");
        assert_eq!(resolve(&records, "Shared").unwrap().id, "B");
        assert!(resolve(&records, "nope").is_none());
    }

    #[test]
    fn test_default_selection_is_first_record() {
        let registry = registry();
        let records = all(&registry);
        let none: [&str; 0] = [];
        let picked = select_for_comparison(&records, &none).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "A");
    }

    #[test]
    fn test_default_selection_empty_filter() {
        let empty: Vec<&HardwareRecord> = Vec::new();
        let none: [&str; 0] = [];
        assert!(select_for_comparison(&empty, &none).unwrap().is_empty());
    }

    #[test]
    fn test_too_many_selections() {
        let registry = registry();
        let records = all(&registry);
        let err = select_for_comparison(&records, &["A", "B", "C", "D"]).unwrap_err();
        assert!(matches!(
            err,
            CompareError::TooManySelections { requested: 4, max: 3 }
        ));
    }

    #[test]
    fn test_repeated_selectors_count_once() {
        let registry = registry();
        let records = all(&registry);
        let picked = select_for_comparison(&records, &["A", "A", "A", "A"]).unwrap();
        assert_eq!(picked.len(), 1);

        let picked = select_for_comparison(&records, &["B", "C", "B", "D"]).unwrap();
        let ids: Vec<&str> = picked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_stale_selection_is_skipped() {
        let registry = registry();
        let filtered: Vec<&HardwareRecord> =
            registry.records().iter().filter(|r| r.id != "D").collect();
        let picked = select_for_comparison(&filtered, &["Cell D", "A"]).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "A");
    }

    #[test]
    fn test_duplicate_selection_collapses() {
        let registry = registry();
        let records = all(&registry);
        let picked = select_for_comparison(&records, &["A", "Cell A"]).unwrap();
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn test_detail_card() {
        let registry = registry();
        let glossary = Glossary::builtin();
        let card = DetailCard::new(registry.get("A").unwrap(), &glossary);

        assert_eq!(card.kind, "Coin");
        assert_eq!(card.mailto, "mailto:a@example.org");
        assert_eq!(card.max_temp_c, 25.0);
        assert!(!card.pressure_control);
        assert!(!card.cad_available);
        assert_eq!(card.techniques[0].definition, glossary.get("XRD").unwrap());
        assert_eq!(card.techniques[1].definition, DEFINITION_UNAVAILABLE);
        assert_eq!(card.limitations_3r.reliability, vec!["Leaks above 2 bar"]);
    }

    #[test]
    fn test_detail_card_without_contact() {
        let registry = registry();
        let card = DetailCard::new(registry.get("B").unwrap(), &Glossary::builtin());
        assert_eq!(card.contact, "N/A");
        assert_eq!(card.mailto, "mailto:N/A");
    }
}
