//! Drug-Match Core Library
//!
//! Disease-aware drug ranking with a simulated compatibility assessment.
//!
//! # Architecture
//!
//! ```text
//! Catalog Store (drugs, diseases)
//!        │
//!        ▼
//!   Filter Engine ◄── search term
//!        │
//!        ▼
//!   Ranking Engine ◄── selected disease
//!        │
//!        ▼
//!   Selection Flow: disease → drug → analysis
//!        │
//!        ▼
//!   Assessment Simulator (fixed latency, cancellable)
//!        │
//!        ▼
//!   Presentation layer (via FFI)
//! ```
//!
//! # Core Principle
//!
//! **Assessments are synthetic.** Every number the simulator produces is a
//! bounded random draw plus a fixed rule-table adjustment; nothing here is
//! pharmacological modeling.
//!
//! # Modules
//!
//! - [`catalog`]: Immutable drug and disease catalogs
//! - [`models`]: Domain types (Drug, Disease, AssessmentResult)
//! - [`rules`]: Category × attribute rule tables
//! - [`ranking`]: Search filter and disease-aware ranking
//! - [`assessment`]: Simulator and cancellable assessment handles
//! - [`selection`]: Disease → drug → analysis state
//! - [`session`]: Session façade tying the above together
//! - [`display`]: Presentation-only match percentages
//! - [`config`], [`telemetry`]: Configuration and logging

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod display;
pub mod models;
pub mod ranking;
pub mod rules;
pub mod selection;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use assessment::{AssessmentError, PendingAssessment, ScoreSource, Simulator, ThreadRngSource};
pub use catalog::CatalogStore;
pub use config::DrugMatchConfig;
pub use models::{AssessmentKey, AssessmentResult, DevelopmentPhase, Disease, Drug, KnownCategory};
pub use ranking::{filter_drugs, rank_drugs, RankingContext};
pub use selection::{SelectionFlow, SelectionState};
pub use session::{MatchSession, SessionError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DrugMatchError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Superseded: {0}")]
    Superseded(String),

    #[error("Assessment error: {0}")]
    AssessmentFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<catalog::CatalogError> for DrugMatchError {
    fn from(e: catalog::CatalogError) -> Self {
        DrugMatchError::CatalogError(e.to_string())
    }
}

impl From<AssessmentError> for DrugMatchError {
    fn from(e: AssessmentError) -> Self {
        match e {
            AssessmentError::InvalidSelection => DrugMatchError::InvalidSelection(e.to_string()),
            AssessmentError::Cancelled | AssessmentError::Superseded(_) => {
                DrugMatchError::Superseded(e.to_string())
            }
            AssessmentError::TaskFailed(_) => DrugMatchError::AssessmentFailed(e.to_string()),
        }
    }
}

impl From<SessionError> for DrugMatchError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::UnknownDrug(_) | SessionError::UnknownDisease(_) => {
                DrugMatchError::NotFound(e.to_string())
            }
            SessionError::Assessment(inner) => inner.into(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for DrugMatchError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DrugMatchError::AssessmentFailed(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install structured logging using the environment configuration.
#[uniffi::export]
pub fn init_logging() -> Result<bool, DrugMatchError> {
    let config = load_config()?;
    Ok(telemetry::init_logging(&config.logging))
}

/// Open a session over the built-in demonstration catalog.
#[uniffi::export]
pub fn open_seeded_session() -> Result<Arc<DrugMatchCore>, DrugMatchError> {
    let config = load_config()?;
    Ok(DrugMatchCore::new(CatalogStore::seeded(), &config))
}

/// Open a session over catalogs supplied as JSON arrays.
#[uniffi::export]
pub fn open_session_from_json(
    drugs_json: String,
    diseases_json: String,
) -> Result<Arc<DrugMatchCore>, DrugMatchError> {
    let config = load_config()?;
    let catalog = CatalogStore::from_json(&drugs_json, &diseases_json)?;
    Ok(DrugMatchCore::new(catalog, &config))
}

fn load_config() -> Result<DrugMatchConfig, DrugMatchError> {
    DrugMatchConfig::load().map_err(|e| DrugMatchError::ConfigError(format!("{:#}", e)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DrugMatchCore {
    catalog: Arc<CatalogStore>,
    session: Arc<Mutex<MatchSession>>,
}

impl DrugMatchCore {
    fn new(catalog: CatalogStore, config: &DrugMatchConfig) -> Arc<Self> {
        let catalog = Arc::new(catalog);
        let session = MatchSession::new(catalog.clone(), Simulator::new(&config.simulator));
        Arc::new(Self {
            catalog,
            session: Arc::new(Mutex::new(session)),
        })
    }

    fn lookup_drug(&self, id: &str) -> Result<&Drug, DrugMatchError> {
        self.catalog
            .drug(id)
            .ok_or_else(|| DrugMatchError::NotFound(format!("drug {}", id)))
    }

    fn lookup_disease(&self, id: &str) -> Result<&Disease, DrugMatchError> {
        self.catalog
            .disease(id)
            .ok_or_else(|| DrugMatchError::NotFound(format!("disease {}", id)))
    }
}

#[uniffi::export]
impl DrugMatchCore {
    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// All diseases in catalog order.
    pub fn diseases(&self) -> Vec<FfiDisease> {
        self.catalog.diseases().iter().cloned().map(Into::into).collect()
    }

    /// Get a drug by id.
    pub fn get_drug(&self, id: String) -> Option<FfiDrug> {
        self.catalog.drug(&id).cloned().map(Into::into)
    }

    // =========================================================================
    // Search & Ranking Operations
    // =========================================================================

    /// Replace the free-text search term.
    pub fn set_search_term(&self, term: String) -> Result<(), DrugMatchError> {
        self.session.lock()?.set_search_term(term);
        Ok(())
    }

    /// Drugs filtered by the search term and ranked for the selected disease.
    pub fn visible_drugs(&self) -> Result<Vec<FfiDrug>, DrugMatchError> {
        let session = self.session.lock()?;
        let drugs = session
            .visible_drugs()
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect();
        Ok(drugs)
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Select a disease; clears the drug choice.
    pub fn select_disease(&self, disease_id: String) -> Result<(), DrugMatchError> {
        self.session.lock()?.select_disease_by_id(&disease_id)?;
        Ok(())
    }

    /// Select a drug.
    pub fn select_drug(&self, drug_id: String) -> Result<(), DrugMatchError> {
        self.session.lock()?.select_drug_by_id(&drug_id)?;
        Ok(())
    }

    /// Current selection state name.
    pub fn selection_state(&self) -> Result<String, DrugMatchError> {
        Ok(format!("{:?}", self.session.lock()?.state()))
    }

    /// Guidance text for the current step.
    pub fn prompt(&self) -> Result<String, DrugMatchError> {
        Ok(self.session.lock()?.selection().prompt().to_string())
    }

    // =========================================================================
    // Display Lookups
    // =========================================================================

    /// "Disease Match" badge for a drug detail view.
    pub fn disease_match(&self, drug_id: String, disease_id: String) -> Result<u8, DrugMatchError> {
        let drug = self.lookup_drug(&drug_id)?;
        let disease = self.lookup_disease(&disease_id)?;
        Ok(display::drug_disease_match(drug, disease))
    }

    /// "Efficacy Prediction" badge; a fresh draw on every call.
    pub fn efficacy_prediction(&self) -> u8 {
        display::efficacy_prediction(&mut ThreadRngSource)
    }

    /// "Disease Match Score" for the results view.
    pub fn category_match(&self, disease_id: String) -> Result<u8, DrugMatchError> {
        Ok(display::category_match(self.lookup_disease(&disease_id)?))
    }

    // =========================================================================
    // Assessment Operations
    // =========================================================================

    /// Whether an assessment is in flight.
    pub fn is_assessment_pending(&self) -> Result<bool, DrugMatchError> {
        Ok(self.session.lock()?.is_analysis_pending())
    }

    /// Cancel the in-flight assessment, if any.
    pub fn cancel_assessment(&self) -> Result<bool, DrugMatchError> {
        Ok(self.session.lock()?.cancel_analysis())
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl DrugMatchCore {
    /// Assess the selected drug against the selected disease.
    ///
    /// Resolves after the simulated latency. Fails with `Superseded` when
    /// the selection changes before it resolves.
    pub async fn run_assessment(&self) -> Result<FfiAssessment, DrugMatchError> {
        let pending = self.session.lock()?.start_analysis()?;
        let ticket = pending.ticket();
        let outcome = pending.wait().await;

        let result = self.session.lock()?.complete_analysis(&ticket, outcome)?;
        Ok(result.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe drug.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDrug {
    pub id: String,
    pub name: String,
    pub structure: String,
    pub smiles: String,
    pub affinity: f64,
    pub compatibility: u8,
    pub toxicity: u8,
    pub toxicity_band: String,
    pub safety_margin: u8,
    pub mechanism: String,
    pub targets: Vec<String>,
    pub phase: String,
    pub phase_rank: u8,
    pub score: i32,
}

impl From<Drug> for FfiDrug {
    fn from(drug: Drug) -> Self {
        Self {
            toxicity_band: format!("{:?}", drug.toxicity_band()),
            safety_margin: drug.safety_margin(),
            phase: drug.phase.label().to_string(),
            phase_rank: drug.phase.rank(),
            id: drug.id,
            name: drug.name,
            structure: drug.structure,
            smiles: drug.smiles,
            affinity: drug.affinity,
            compatibility: drug.compatibility,
            toxicity: drug.toxicity,
            mechanism: drug.mechanism,
            targets: drug.targets,
            score: drug.score,
        }
    }
}

/// FFI-safe disease.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDisease {
    pub id: String,
    pub name: String,
    pub category: String,
    pub prevalence: String,
    pub selected: bool,
}

impl From<Disease> for FfiDisease {
    fn from(disease: Disease) -> Self {
        Self {
            id: disease.id,
            name: disease.name,
            category: disease.category,
            prevalence: disease.prevalence,
            selected: disease.selected,
        }
    }
}

/// FFI-safe assessment result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub compatibility: u8,
    pub toxicity: u8,
    pub explanation: String,
    pub modifications: Vec<String>,
    pub confidence: u8,
}

impl From<AssessmentResult> for FfiAssessment {
    fn from(result: AssessmentResult) -> Self {
        Self {
            compatibility: result.compatibility,
            toxicity: result.toxicity,
            explanation: result.explanation,
            modifications: result.modifications,
            confidence: result.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_drug_carries_display_fields() {
        let catalog = CatalogStore::seeded();
        let aspirin: FfiDrug = catalog.drug("5").cloned().unwrap().into();

        assert_eq!(aspirin.phase, "FDA Approved");
        assert_eq!(aspirin.phase_rank, DevelopmentPhase::FdaApproved.rank());
        assert_eq!(aspirin.safety_margin, 100 - aspirin.toxicity);
        assert_eq!(aspirin.toxicity_band, "Low");
    }

    #[test]
    fn test_fresh_core_state() {
        let core = DrugMatchCore::new(CatalogStore::seeded(), &DrugMatchConfig::default());
        assert!(!core.is_assessment_pending().unwrap());
        assert!(!core.cancel_assessment().unwrap());

        for _ in 0..50 {
            assert!(display::EFFICACY_PREDICTION.contains(&core.efficacy_prediction()));
        }
    }
}
