//! Assessment result models.

use serde::{Deserialize, Serialize};

/// Number of optimization suggestions every assessment carries.
pub const MODIFICATION_COUNT: usize = 4;

/// Outcome of a simulated compatibility assessment.
///
/// Created fresh on every run; two runs for the same pair may differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentResult {
    /// Compatibility percentage, at most 98
    pub compatibility: u8,
    /// Toxicity percentage, at least 5
    pub toxicity: u8,
    /// Human-readable summary, never empty
    pub explanation: String,
    /// Ordered optimization suggestions, always [`MODIFICATION_COUNT`] long
    pub modifications: Vec<String>,
    /// Confidence percentage in [85, 100)
    pub confidence: u8,
}

/// Identifies which (drug, disease) pair an assessment was requested for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AssessmentKey {
    pub drug_id: String,
    pub disease_id: Option<String>,
}

impl AssessmentResult {
    /// Serialize for hand-off to the presentation layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl AssessmentKey {
    pub fn new(drug_id: impl Into<String>, disease_id: Option<String>) -> Self {
        Self {
            drug_id: drug_id.into(),
            disease_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_to_json() {
        let result = AssessmentResult {
            compatibility: 90,
            toxicity: 12,
            explanation: "The drug shows high compatibility.".into(),
            modifications: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            confidence: 91,
        };

        let json = result.to_json().unwrap();
        assert!(json.contains("\"compatibility\": 90"));

        let back: AssessmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_key_equality() {
        let a = AssessmentKey::new("5", Some("6".into()));
        let b = AssessmentKey::new("5", Some("6".into()));
        let c = AssessmentKey::new("5", None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
