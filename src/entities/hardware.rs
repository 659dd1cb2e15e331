//! Hardware entity type - A sample environment in the registry
//!
//! Every nested block of the source document is optional. Accessors on
//! [`HardwareRecord`] fill in the registry defaults so callers never see a
//! missing value in a filter decision.

use serde::{Deserialize, Serialize};

/// Max temperature assumed when a record does not declare one
pub const DEFAULT_MAX_TEMP_C: f64 = 25.0;

/// Threshold (inclusive) for the "high temperature" capability
pub const HIGH_TEMP_THRESHOLD_C: f64 = 100.0;

/// Fallback shown when no contact email is recorded
pub const NO_CONTACT: &str = "N/A";

/// A single sample environment entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareRecord {
    /// Unique identifier (stable key for lookups and export)
    pub id: String,

    /// Display name
    pub name: String,

    /// Geometry / category label
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Supported techniques and instruments
    #[serde(default)]
    pub compatibility: Compatibility,

    /// Digital twin availability
    #[serde(default)]
    pub digital_twin: DigitalTwin,

    /// Operating specifications
    #[serde(default)]
    pub specifications: Specifications,

    /// Point of contact
    #[serde(default)]
    pub contact_info: ContactInfo,

    /// Qualitative reliability / representativeness / reproducibility notes
    #[serde(default)]
    pub limitations_3r: Limitations3r,
}

/// Technique and instrument compatibility
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    #[serde(default)]
    pub techniques: Vec<String>,

    #[serde(default)]
    pub instruments: Vec<String>,
}

/// Digital twin (CAD model) availability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalTwin {
    #[serde(default)]
    pub cad_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    #[serde(default)]
    pub operating_limits: OperatingLimits,
}

/// Operating envelope of the cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingLimits {
    #[serde(default)]
    pub max_temp_c: Option<f64>,

    #[serde(default)]
    pub pressure_control: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub primary_email: Option<String>,
}

/// The "3Rs" profile: ordered free-text notes per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Limitations3r {
    #[serde(default)]
    pub reliability: Vec<String>,

    #[serde(default)]
    pub representativeness: Vec<String>,

    #[serde(default)]
    pub reproducibility: Vec<String>,
}

impl Limitations3r {
    pub fn is_empty(&self) -> bool {
        self.reliability.is_empty()
            && self.representativeness.is_empty()
            && self.reproducibility.is_empty()
    }
}

impl HardwareRecord {
    pub fn techniques(&self) -> &[String] {
        &self.compatibility.techniques
    }

    pub fn instruments(&self) -> &[String] {
        &self.compatibility.instruments
    }

    pub fn has_technique(&self, technique: &str) -> bool {
        self.compatibility.techniques.iter().any(|t| t == technique)
    }

    pub fn has_instrument(&self, instrument: &str) -> bool {
        self.compatibility.instruments.iter().any(|i| i == instrument)
    }

    pub fn cad_available(&self) -> bool {
        self.digital_twin.cad_available
    }

    /// Max operating temperature, defaulting to 25°C when not declared
    pub fn max_temp_c(&self) -> f64 {
        self.specifications
            .operating_limits
            .max_temp_c
            .unwrap_or(DEFAULT_MAX_TEMP_C)
    }

    /// Whether the record reaches the high temperature threshold (≥100°C)
    pub fn is_high_temp(&self) -> bool {
        self.max_temp_c() >= HIGH_TEMP_THRESHOLD_C
    }

    /// Pressure control, absent meaning no
    pub fn pressure_control(&self) -> bool {
        self.specifications
            .operating_limits
            .pressure_control
            .unwrap_or(false)
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.contact_info.primary_email.as_deref()
    }

    /// Contact email for display, or "N/A"
    pub fn contact_display(&self) -> &str {
        self.primary_email().unwrap_or(NO_CONTACT)
    }

    /// `mailto:` link for the contact button
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.contact_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> HardwareRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_record_defaults() {
        let rec = parse(r#"{"id": "cell-1", "name": "Coin Cell"}"#);
        assert_eq!(rec.kind, "");
        assert!(rec.techniques().is_empty());
        assert!(rec.instruments().is_empty());
        assert!(!rec.cad_available());
        assert_eq!(rec.max_temp_c(), 25.0);
        assert!(!rec.is_high_temp());
        assert!(!rec.pressure_control());
        assert_eq!(rec.contact_display(), "N/A");
        assert!(rec.limitations_3r.is_empty());
    }

    #[test]
    fn test_full_record() {
        let rec = parse(
            r#"{
                "id": "cell-2",
                "name": "Pouch Cell Holder",
                "type": "Pouch",
                "compatibility": {"techniques": ["XRD", "XAS"], "instruments": ["I11"]},
                "digital_twin": {"cad_available": true},
                "specifications": {"operating_limits": {"max_temp_c": 150, "pressure_control": true}},
                "contact_info": {"primary_email": "se@example.org"},
                "limitations_3r": {"reliability": ["Seal ageing"]}
            }"#,
        );
        assert_eq!(rec.kind, "Pouch");
        assert!(rec.has_technique("XRD"));
        assert!(!rec.has_technique("xrd"));
        assert!(rec.has_instrument("I11"));
        assert!(rec.cad_available());
        assert_eq!(rec.max_temp_c(), 150.0);
        assert!(rec.is_high_temp());
        assert!(rec.pressure_control());
        assert_eq!(rec.mailto(), "mailto:se@example.org");
        assert_eq!(rec.limitations_3r.reliability, vec!["Seal ageing"]);
        assert!(rec.limitations_3r.reproducibility.is_empty());
    }

    #[test]
    fn test_high_temp_threshold_is_inclusive() {
        let rec = parse(
            r#"{"id": "a", "name": "A", "specifications": {"operating_limits": {"max_temp_c": 100}}}"#,
        );
        assert!(rec.is_high_temp());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<HardwareRecord, _> = serde_json::from_str(r#"{"name": "A"}"#);
        assert!(result.is_err());
    }
}
