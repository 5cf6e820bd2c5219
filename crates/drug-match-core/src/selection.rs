//! Disease → drug → analysis selection flow.

use serde::{Deserialize, Serialize};

use crate::models::{Disease, Drug};

/// Where the user is in the selection flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing chosen yet
    NoSelection,
    /// A disease is chosen, no drug
    DiseaseSelected,
    /// A drug is chosen without a disease
    DrugSelected,
    /// Both chosen; the analysis can be shown
    AnalysisReady,
}

/// Current disease and drug choice.
///
/// Choosing a disease always clears the drug, because the drug list is
/// re-ranked for the new disease.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionFlow {
    disease: Option<Disease>,
    drug: Option<Drug>,
}

impl SelectionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a disease and discard any drug choice, even when `disease`
    /// is the one already selected.
    pub fn select_disease(&mut self, disease: Disease) {
        self.disease = Some(disease);
        self.drug = None;
    }

    /// Choose a drug. The disease is left as-is.
    pub fn select_drug(&mut self, drug: Drug) {
        self.drug = Some(drug);
    }

    pub fn disease(&self) -> Option<&Disease> {
        self.disease.as_ref()
    }

    pub fn drug(&self) -> Option<&Drug> {
        self.drug.as_ref()
    }

    pub fn state(&self) -> SelectionState {
        match (&self.disease, &self.drug) {
            (None, None) => SelectionState::NoSelection,
            (Some(_), None) => SelectionState::DiseaseSelected,
            (None, Some(_)) => SelectionState::DrugSelected,
            (Some(_), Some(_)) => SelectionState::AnalysisReady,
        }
    }

    pub fn is_analysis_ready(&self) -> bool {
        self.state() == SelectionState::AnalysisReady
    }

    /// Guidance text for the step the user is on.
    pub fn prompt(&self) -> &'static str {
        if self.disease.is_none() {
            "Start by selecting a target disease from the left panel"
        } else if self.drug.is_none() {
            "Now choose a drug candidate from the right panel"
        } else {
            "Analysis will appear here"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn huntington() -> Disease {
        Disease::new("1", "Huntington's Disease", "Neurological")
    }

    #[test]
    fn test_progression() {
        let mut flow = SelectionFlow::new();
        assert_eq!(flow.state(), SelectionState::NoSelection);

        flow.select_disease(huntington());
        assert_eq!(flow.state(), SelectionState::DiseaseSelected);

        flow.select_drug(Drug::new("1", "Metformin"));
        assert_eq!(flow.state(), SelectionState::AnalysisReady);
        assert!(flow.is_analysis_ready());
        assert_eq!(flow.prompt(), "Analysis will appear here");
    }

    #[test]
    fn test_reselecting_same_disease_clears_drug() {
        let mut flow = SelectionFlow::new();
        flow.select_disease(huntington());
        flow.select_drug(Drug::new("2", "Rapamycin"));

        flow.select_disease(huntington());
        assert!(flow.drug().is_none());
        assert_eq!(flow.disease().map(|d| d.id.as_str()), Some("1"));
    }

    #[test]
    fn test_drug_without_disease() {
        let mut flow = SelectionFlow::new();
        flow.select_drug(Drug::new("5", "Aspirin"));
        assert_eq!(flow.state(), SelectionState::DrugSelected);
        assert_eq!(
            flow.prompt(),
            "Start by selecting a target disease from the left panel"
        );
    }

    #[test]
    fn test_select_drug_keeps_disease() {
        let mut flow = SelectionFlow::new();
        flow.select_disease(huntington());
        flow.select_drug(Drug::new("1", "Metformin"));
        flow.select_drug(Drug::new("2", "Rapamycin"));

        assert_eq!(flow.disease().map(|d| d.name.as_str()), Some("Huntington's Disease"));
        assert_eq!(flow.drug().map(|d| d.name.as_str()), Some("Rapamycin"));
    }
}
