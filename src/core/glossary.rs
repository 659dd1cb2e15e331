//! Technique glossary
//!
//! An ordered mapping from technique name or abbreviation to a short
//! definition. Order matters: partial matching walks the entries in
//! definition order and returns the first key contained in the candidate.

/// Sentinel returned when no glossary key matches a technique label
pub const DEFINITION_UNAVAILABLE: &str = "Definition unavailable.";

const BUILTIN: &[(&str, &str)] = &[
    (
        "Neutron Diffraction",
        "Sensitive to light elements (Li, O) and isotopes. Used to determine long-range crystal structure and phase evolution.",
    ),
    (
        "Muon spectroscopy",
        "A sensitive local probe (μ+SR) used to quantify ion diffusion rates (Li+, Na+) and pathways at the atomic scale.",
    ),
    (
        "Muon Elemental Analysis",
        "Uses negative muons (μ-SR/μXES) to probe elemental composition far below the surface without destruction.",
    ),
    (
        "SANS",
        "Small Angle Neutron Scattering. Probes nanoscale structures (1–100 nm), such as porosity, SEI formation, and particle morphology.",
    ),
    (
        "XPDF",
        "X-ray Pair Distribution Function. Probes local structure in disordered/amorphous materials (e.g., electrolytes).",
    ),
    (
        "XAS",
        "X-ray Absorption Spectroscopy. Probes oxidation states, bond lengths, and local coordination geometry.",
    ),
    (
        "XRS",
        "X-ray Raman Scattering. Provides electronic structure information using hard X-rays; suitable for bulk measurements.",
    ),
    (
        "Soft XPS",
        "X-ray Photoelectron Spectroscopy. Surface-sensitive (<10 nm) analysis of elemental composition and SEI chemistry.",
    ),
    (
        "AP-XPS",
        "Ambient Pressure XPS. Allows surface analysis at realistic pressures (solid-gas/solid-liquid interfaces), bridging the pressure gap.",
    ),
    (
        "NEXAFS",
        "Near-Edge X-ray Absorption Fine Structure. Probes electronic structure of light elements at surfaces.",
    ),
    (
        "Nano-focus XRF",
        "X-ray Fluorescence microscopy. Maps elemental distribution with nanoscale resolution.",
    ),
    (
        "XANES",
        "X-ray Absorption Near Edge Structure. Determines oxidation state and local symmetry.",
    ),
    (
        "Imaging",
        "Visualises macroscopic features like dendrites, gas evolution, and particle cracking (2D/3D).",
    ),
    (
        "XRD",
        "X-ray Diffraction. Determines crystal structure, lattice parameters, strain, and phase evolution during cycling.",
    ),
    (
        "XRD-CT",
        "X-ray Diffraction Computed Tomography. Combines diffraction contrast with tomography to map phase distributions and strain fields in 3D.",
    ),
    (
        "DFXM",
        "Dark Field X-ray Microscopy. Allows high-resolution mapping of crystal orientation and strain within individual grains.",
    ),
    (
        "EXAFS",
        "Extended X-ray Absorption Fine Structure. Analyzes average local structure and coordination numbers in materials lacking long-range order.",
    ),
    (
        "RIXS",
        "Resonant Inelastic X-ray Scattering. Probes orbital states and charge transfer dynamics.",
    ),
    (
        "Neutron Total Scattering",
        "Characterises non-crystalline/disordered materials (e.g., liquids) using H/D isotopic substitution.",
    ),
    (
        "QENS",
        "Quasi-Elastic Neutron Scattering. Probes slow diffusional processes like Li-ion hopping.",
    ),
    (
        "INS",
        "Inelastic Neutron Scattering. Probes vibrational modes to investigate material dynamics.",
    ),
    (
        "Bragg Edge Imaging",
        "Maps crystal texture, phase distribution, and lattice strain in real space.",
    ),
    (
        "Ptychography",
        "High-resolution phase-contrast imaging for nanoscale morphology.",
    ),
    (
        "Neutron Reflectometry",
        "Measures thin films and buried interfaces.",
    ),
];

/// Ordered technique glossary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<(String, String)>,
}

impl Default for Glossary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Glossary {
    /// The built-in glossary of operando techniques
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().copied())
    }

    /// Build a glossary from ordered entries
    ///
    /// A repeated key replaces the earlier definition but keeps its position.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut glossary = Self {
            entries: Vec::new(),
        };
        for (key, definition) in entries {
            let key = key.into();
            let definition = definition.into();
            match glossary.entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = definition,
                None => glossary.entries.push((key, definition)),
            }
        }
        glossary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d.as_str())
    }

    /// Entries in definition order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d.as_str()))
    }

    /// Terms sorted alphabetically
    pub fn sorted_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.entries.iter().map(|(k, _)| k.as_str()).collect();
        terms.sort_unstable();
        terms
    }

    /// First entry whose key occurs (case-insensitively) inside `technique`
    pub fn partial_match(&self, technique: &str) -> Option<(&str, &str)> {
        let candidate = technique.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| candidate.contains(&k.to_lowercase()))
            .map(|(k, d)| (k.as_str(), d.as_str()))
    }

    /// Definition for a technique label, or [`DEFINITION_UNAVAILABLE`]
    pub fn annotate(&self, technique: &str) -> &str {
        self.partial_match(technique)
            .map(|(_, d)| d)
            .unwrap_or(DEFINITION_UNAVAILABLE)
    }
}
