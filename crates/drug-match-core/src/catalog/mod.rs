//! In-memory catalog store.
//!
//! Drugs and diseases are loaded once and never mutated afterwards. Load
//! validates id uniqueness and baseline percentage bounds.

mod seed;

pub use seed::*;

use std::collections::HashSet;

use thiserror::Error;
use tracing::info;

use crate::models::{Disease, Drug};

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Drug {id}: {field} {value} is outside 0-100")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: u8,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Immutable drug and disease catalogs.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    drugs: Vec<Drug>,
    diseases: Vec<Disease>,
}

impl CatalogStore {
    /// Build a store from already-parsed records.
    pub fn new(drugs: Vec<Drug>, diseases: Vec<Disease>) -> CatalogResult<Self> {
        check_unique("drug", drugs.iter().map(|d| d.id.as_str()))?;
        check_unique("disease", diseases.iter().map(|d| d.id.as_str()))?;

        for drug in &drugs {
            for (field, value) in [
                ("compatibility", drug.compatibility),
                ("toxicity", drug.toxicity),
            ] {
                if value > 100 {
                    return Err(CatalogError::OutOfRange {
                        id: drug.id.clone(),
                        field,
                        value,
                    });
                }
            }
        }

        info!(
            drugs = drugs.len(),
            diseases = diseases.len(),
            "catalog loaded"
        );

        Ok(Self { drugs, diseases })
    }

    /// Parse both catalogs from JSON arrays.
    pub fn from_json(drugs_json: &str, diseases_json: &str) -> CatalogResult<Self> {
        let drugs: Vec<Drug> = serde_json::from_str(drugs_json)?;
        let diseases: Vec<Disease> = serde_json::from_str(diseases_json)?;
        Self::new(drugs, diseases)
    }

    /// The built-in demonstration catalog.
    pub fn seeded() -> Self {
        Self {
            drugs: seed_drugs(),
            diseases: seed_diseases(),
        }
    }

    /// All drugs in load order.
    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    /// All diseases in load order.
    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    /// Look up a drug by id.
    pub fn drug(&self, id: &str) -> Option<&Drug> {
        self.drugs.iter().find(|d| d.id == id)
    }

    /// Look up a disease by id.
    pub fn disease(&self, id: &str) -> Option<&Disease> {
        self.diseases.iter().find(|d| d.id == id)
    }
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicate_drug_ids() {
        let drugs = vec![Drug::new("1", "Metformin"), Drug::new("1", "Rapamycin")];
        let result = CatalogStore::new(drugs, vec![]);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateId { kind: "drug", ref id }) if id == "1"
        ));
    }

    #[test]
    fn test_rejects_duplicate_disease_ids() {
        let diseases = vec![
            Disease::new("5", "Sickle Cell Disease", "Hematological"),
            Disease::new("5", "Hemophilia A", "Hematological"),
        ];
        let result = CatalogStore::new(vec![], diseases);
        assert!(matches!(result, Err(CatalogError::DuplicateId { kind: "disease", .. })));
    }

    #[test]
    fn test_rejects_out_of_range_baseline() {
        let mut drug = Drug::new("1", "Metformin");
        drug.toxicity = 120;
        let result = CatalogStore::new(vec![drug], vec![]);
        assert!(matches!(
            result,
            Err(CatalogError::OutOfRange { field: "toxicity", value: 120, .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let drugs = r#"[{
            "id": "1", "name": "Metformin", "structure": "C4H11N5",
            "smiles": "CN(C)C(=N)NC(=N)N", "affinity": 8.2,
            "compatibility": 87, "toxicity": 12, "mechanism": "AMPK activator",
            "targets": ["AMPK", "Complex I"], "phase": "FDA Approved", "score": 92
        }]"#;
        let diseases = r#"[{
            "id": "1", "name": "Huntington's Disease", "category": "Neurological",
            "prevalence": "1 in 10,000", "selected": false
        }]"#;

        let store = CatalogStore::from_json(drugs, diseases).unwrap();
        assert_eq!(store.drugs().len(), 1);
        assert_eq!(store.drug("1").map(|d| d.score), Some(92));
        assert!(store.disease("1").is_some());
        assert!(store.disease("2").is_none());
    }

    #[test]
    fn test_from_json_rejects_bad_document() {
        let result = CatalogStore::from_json("not json", "[]");
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_seeded_passes_validation() {
        let seeded = CatalogStore::seeded();
        let validated =
            CatalogStore::new(seeded.drugs().to_vec(), seeded.diseases().to_vec()).unwrap();
        assert_eq!(validated.drugs().len(), 6);
        assert_eq!(validated.diseases().len(), 8);
    }
}
