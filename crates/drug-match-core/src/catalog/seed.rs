//! Built-in demonstration catalog.

use crate::models::{DevelopmentPhase, Disease, Drug};

struct DrugSeed {
    id: &'static str,
    name: &'static str,
    structure: &'static str,
    smiles: &'static str,
    affinity: f64,
    compatibility: u8,
    toxicity: u8,
    mechanism: &'static str,
    targets: &'static [&'static str],
    score: i32,
}

const DRUGS: &[DrugSeed] = &[
    DrugSeed {
        id: "1",
        name: "Metformin",
        structure: "C4H11N5",
        smiles: "CN(C)C(=N)NC(=N)N",
        affinity: 8.2,
        compatibility: 87,
        toxicity: 12,
        mechanism: "AMPK activator",
        targets: &["AMPK", "Complex I"],
        score: 92,
    },
    DrugSeed {
        id: "2",
        name: "Rapamycin",
        structure: "C51H79NO13",
        smiles: "CC[C@H]1CC[C@@H]2[C@@H](C[C@H]([C@@H]3[C@H]2CC[C@H]4[C@@H]3CC[C@@H]([C@H]4C)O)C)C",
        affinity: 9.1,
        compatibility: 94,
        toxicity: 23,
        mechanism: "mTOR inhibitor",
        targets: &["mTOR", "FKBP12"],
        score: 88,
    },
    DrugSeed {
        id: "3",
        name: "Lovastatin",
        structure: "C24H36O5",
        smiles: "CCC(C)(C)C(=O)O[C@H]1C[C@@H](C)C=C2[C@H]1[C@H](C)C[C@@H]3[C@@H]2CC[C@@H](C3)O",
        affinity: 7.8,
        compatibility: 79,
        toxicity: 18,
        mechanism: "HMG-CoA reductase inhibitor",
        targets: &["HMG-CoA reductase"],
        score: 85,
    },
    DrugSeed {
        id: "4",
        name: "Thalidomide",
        structure: "C13H10N2O4",
        smiles: "O=C1N(C(=O)C2=CC=CC=C12)C3CCC(=O)NC3=O",
        affinity: 8.7,
        compatibility: 72,
        toxicity: 45,
        mechanism: "Immunomodulator",
        targets: &["CRBN", "TNF-α"],
        score: 76,
    },
    DrugSeed {
        id: "5",
        name: "Aspirin",
        structure: "C9H8O4",
        smiles: "CC(=O)OC1=CC=CC=C1C(=O)O",
        affinity: 6.5,
        compatibility: 91,
        toxicity: 8,
        mechanism: "COX inhibitor",
        targets: &["COX-1", "COX-2"],
        score: 89,
    },
    DrugSeed {
        id: "6",
        name: "Chloroquine",
        structure: "C18H26ClN3",
        smiles: "CCN(CC)CCCC(C)NC1=C2C=CC(=CC2=NC=C1)Cl",
        affinity: 7.3,
        compatibility: 68,
        toxicity: 32,
        mechanism: "Autophagy modulator",
        targets: &["Autophagy", "TLR"],
        score: 74,
    },
];

// (id, name, category, prevalence, selected)
const DISEASES: &[(&str, &str, &str, &str, bool)] = &[
    ("1", "Huntington's Disease", "Neurological", "1 in 10,000", false),
    ("2", "Amyotrophic Lateral Sclerosis", "Neurological", "1 in 50,000", true),
    ("3", "Duchenne Muscular Dystrophy", "Muscular", "1 in 3,500", false),
    ("4", "Cystic Fibrosis", "Respiratory", "1 in 2,500", false),
    ("5", "Sickle Cell Disease", "Hematological", "1 in 365", false),
    ("6", "Hemophilia A", "Hematological", "1 in 5,000", false),
    ("7", "Gaucher Disease", "Metabolic", "1 in 57,000", false),
    ("8", "Wilson's Disease", "Metabolic", "1 in 30,000", false),
];

/// The six demonstration drugs, all FDA approved.
pub fn seed_drugs() -> Vec<Drug> {
    DRUGS
        .iter()
        .map(|s| Drug {
            id: s.id.into(),
            name: s.name.into(),
            structure: s.structure.into(),
            smiles: s.smiles.into(),
            affinity: s.affinity,
            compatibility: s.compatibility,
            toxicity: s.toxicity,
            mechanism: s.mechanism.into(),
            targets: s.targets.iter().map(|t| t.to_string()).collect(),
            phase: DevelopmentPhase::FdaApproved,
            score: s.score,
        })
        .collect()
}

/// The eight demonstration diseases.
pub fn seed_diseases() -> Vec<Disease> {
    DISEASES
        .iter()
        .map(|&(id, name, category, prevalence, selected)| Disease {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            prevalence: prevalence.into(),
            selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_values() {
        let drugs = seed_drugs();
        let lovastatin = drugs.iter().find(|d| d.name == "Lovastatin").unwrap();
        assert_eq!(lovastatin.score, 85);
        assert!(lovastatin.mechanism.contains("reductase"));

        let metformin = &drugs[0];
        assert!(metformin.has_target("AMPK"));
        assert!(drugs.iter().all(|d| d.phase == DevelopmentPhase::FdaApproved));
    }

    #[test]
    fn test_seed_diseases_include_unruled_categories() {
        let diseases = seed_diseases();
        assert_eq!(diseases.len(), 8);
        assert!(diseases.iter().any(|d| d.known_category().is_none()));
        assert_eq!(diseases.iter().filter(|d| d.selected).count(), 1);
    }
}
