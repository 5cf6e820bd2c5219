//! Drug candidate models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate compound in the drug catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drug {
    /// Unique identifier within the catalog
    pub id: String,
    /// Display name (e.g., "Metformin")
    pub name: String,
    /// Molecular formula (e.g., "C4H11N5")
    pub structure: String,
    /// SMILES notation
    pub smiles: String,
    /// Binding affinity (positive)
    pub affinity: f64,
    /// Baseline compatibility percentage (0 - 100)
    pub compatibility: u8,
    /// Baseline toxicity percentage (0 - 100)
    pub toxicity: u8,
    /// Mechanism of action, searchable free text
    pub mechanism: String,
    /// Molecular targets in authored order
    pub targets: Vec<String>,
    /// Development phase
    pub phase: DevelopmentPhase,
    /// Baseline ranking weight
    pub score: i32,
}

/// Clinical development phase.
///
/// Serialized as its display label so catalog documents read naturally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum DevelopmentPhase {
    FdaApproved,
    PhaseIII,
    PhaseII,
    /// Any label outside the known set, kept verbatim
    Other(String),
}

/// Coarse toxicity classification used for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToxicityBand {
    /// Below 20%
    Low,
    /// 20% up to 40%
    Moderate,
    /// 40% and above
    High,
}

impl Drug {
    /// Create a drug with required identity fields and neutral metrics.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            structure: String::new(),
            smiles: String::new(),
            affinity: 1.0,
            compatibility: 0,
            toxicity: 0,
            mechanism: String::new(),
            targets: Vec::new(),
            phase: DevelopmentPhase::Other(String::new()),
            score: 0,
        }
    }

    /// Exact, case-sensitive target membership.
    pub fn has_target(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t == target)
    }

    /// Case-insensitive substring match against name, mechanism and targets.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.mechanism.to_lowercase().contains(needle_lower)
            || self
                .targets
                .iter()
                .any(|t| t.to_lowercase().contains(needle_lower))
    }

    /// Classify the baseline toxicity.
    pub fn toxicity_band(&self) -> ToxicityBand {
        match self.toxicity {
            0..=19 => ToxicityBand::Low,
            20..=39 => ToxicityBand::Moderate,
            _ => ToxicityBand::High,
        }
    }

    /// Percentage headroom left by the baseline toxicity.
    pub fn safety_margin(&self) -> u8 {
        100u8.saturating_sub(self.toxicity)
    }
}

impl DevelopmentPhase {
    /// Human-readable label as shown in the catalog.
    pub fn label(&self) -> &str {
        match self {
            Self::FdaApproved => "FDA Approved",
            Self::PhaseIII => "Phase III",
            Self::PhaseII => "Phase II",
            Self::Other(label) => label,
        }
    }

    /// Display ordering weight; higher means further along.
    pub fn rank(&self) -> u8 {
        match self {
            Self::FdaApproved => 3,
            Self::PhaseIII => 2,
            Self::PhaseII => 1,
            Self::Other(_) => 0,
        }
    }
}

impl From<String> for DevelopmentPhase {
    fn from(label: String) -> Self {
        match label.as_str() {
            "FDA Approved" => Self::FdaApproved,
            "Phase III" => Self::PhaseIII,
            "Phase II" => Self::PhaseII,
            _ => Self::Other(label),
        }
    }
}

impl From<DevelopmentPhase> for String {
    fn from(phase: DevelopmentPhase) -> Self {
        match phase {
            DevelopmentPhase::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for DevelopmentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_matches_any_field() {
        let mut drug = Drug::new("3", "Lovastatin");
        drug.mechanism = "HMG-CoA reductase inhibitor".into();
        drug.targets = vec!["HMG-CoA reductase".into()];

        assert!(drug.matches_query("lova"));
        assert!(drug.matches_query("reductase"));
        assert!(drug.matches_query("hmg-coa"));
        assert!(!drug.matches_query("ampk"));
    }

    #[test]
    fn test_has_target_is_exact() {
        let mut drug = Drug::new("1", "Metformin");
        drug.targets = vec!["AMPK".into(), "Complex I".into()];

        assert!(drug.has_target("AMPK"));
        assert!(!drug.has_target("ampk"));
        assert!(!drug.has_target("AMP"));
    }

    #[test]
    fn test_toxicity_bands() {
        let mut drug = Drug::new("5", "Aspirin");
        drug.toxicity = 8;
        assert_eq!(drug.toxicity_band(), ToxicityBand::Low);
        drug.toxicity = 20;
        assert_eq!(drug.toxicity_band(), ToxicityBand::Moderate);
        drug.toxicity = 39;
        assert_eq!(drug.toxicity_band(), ToxicityBand::Moderate);
        drug.toxicity = 45;
        assert_eq!(drug.toxicity_band(), ToxicityBand::High);
        assert_eq!(drug.safety_margin(), 55);
    }

    #[test]
    fn test_phase_labels_roundtrip() {
        let json = serde_json::to_string(&DevelopmentPhase::PhaseIII).unwrap();
        assert_eq!(json, "\"Phase III\"");

        let phase: DevelopmentPhase = serde_json::from_str("\"Preclinical\"").unwrap();
        assert_eq!(phase, DevelopmentPhase::Other("Preclinical".into()));
        assert_eq!(phase.rank(), 0);
        assert!(DevelopmentPhase::FdaApproved.rank() > DevelopmentPhase::PhaseII.rank());
    }
}
