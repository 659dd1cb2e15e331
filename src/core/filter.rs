//! Filter engine
//!
//! Criteria combine with AND across categories and OR within a multi-select
//! category. Every step with an empty selection or unset flag is a no-op.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::entities::HardwareRecord;

/// User-selected filter criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep records supporting any of these techniques
    pub techniques: BTreeSet<String>,

    /// Keep records compatible with any of these instruments
    pub instruments: BTreeSet<String>,

    /// Keep only records with a CAD model
    pub digital_twin_only: bool,

    /// Keep only records rated to at least 100°C
    pub high_temp_only: bool,

    /// Keep only records with pressure control
    pub pressure_control: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_technique(mut self, technique: impl Into<String>) -> Self {
        self.techniques.insert(technique.into());
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instruments.insert(instrument.into());
        self
    }

    pub fn digital_twin_only(mut self, on: bool) -> Self {
        self.digital_twin_only = on;
        self
    }

    pub fn high_temp_only(mut self, on: bool) -> Self {
        self.high_temp_only = on;
        self
    }

    pub fn pressure_control(mut self, on: bool) -> Self {
        self.pressure_control = on;
        self
    }

    /// True when no step would exclude anything
    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
            && self.instruments.is_empty()
            && !self.digital_twin_only
            && !self.high_temp_only
            && !self.pressure_control
    }

    fn matches_techniques(&self, record: &HardwareRecord) -> bool {
        self.techniques.is_empty()
            || record
                .techniques()
                .iter()
                .any(|t| self.techniques.contains(t))
    }

    fn matches_instruments(&self, record: &HardwareRecord) -> bool {
        self.instruments.is_empty()
            || record
                .instruments()
                .iter()
                .any(|i| self.instruments.contains(i))
    }

    /// Whether a record passes every active step
    pub fn matches(&self, record: &HardwareRecord) -> bool {
        self.matches_techniques(record)
            && self.matches_instruments(record)
            && (!self.digital_twin_only || record.cad_available())
            && (!self.pressure_control || record.pressure_control())
            && (!self.high_temp_only || record.is_high_temp())
    }
}

/// Dashboard metrics for a filtered set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    /// Records matching the criteria
    pub total: usize,
    /// Matching records with a CAD model
    pub cad_ready: usize,
    /// Matching records rated to at least 100°C
    pub high_temp: usize,
}

impl FilterSummary {
    pub fn from_records(records: &[&HardwareRecord]) -> Self {
        Self {
            total: records.len(),
            cad_ready: records.iter().filter(|r| r.cad_available()).count(),
            high_temp: records.iter().filter(|r| r.is_high_temp()).count(),
        }
    }
}

/// Filtered subset plus its summary
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub records: Vec<&'a HardwareRecord>,
    pub summary: FilterSummary,
}

impl<'a> FilteredView<'a> {
    pub fn new(records: Vec<&'a HardwareRecord>) -> Self {
        let summary = FilterSummary::from_records(&records);
        Self { records, summary }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Ids of the filtered records, in order
    pub fn ids(&self) -> Vec<&'a str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Narrow `records` to those matching `criteria`, preserving order
pub fn apply_filters<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a HardwareRecord>
where
    I: IntoIterator<Item = &'a HardwareRecord>,
{
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}
