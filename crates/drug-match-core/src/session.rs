//! Interactive matching session.
//!
//! Holds the search term, the selection flow and at most one in-flight
//! assessment. Any selection change that alters the (drug, disease) pair
//! cancels the in-flight request and clears the shown result, so a late
//! result can never land on a newer selection.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::assessment::{
    AssessmentError, AssessmentTicket, PendingAssessment, Simulator, SimulatorResult,
};
use crate::catalog::CatalogStore;
use crate::models::{AssessmentKey, AssessmentResult, Disease, Drug};
use crate::ranking::RankingContext;
use crate::selection::{SelectionFlow, SelectionState};

/// Session errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown drug id: {0}")]
    UnknownDrug(String),

    #[error("Unknown disease id: {0}")]
    UnknownDisease(String),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

pub type SessionResult<T> = Result<T, SessionError>;

struct InFlight {
    request_id: Uuid,
    key: AssessmentKey,
    token: CancellationToken,
}

/// One user's walk through disease selection, drug ranking and analysis.
pub struct MatchSession {
    catalog: Arc<CatalogStore>,
    simulator: Simulator,
    search_term: String,
    flow: SelectionFlow,
    in_flight: Option<InFlight>,
    result: Option<(AssessmentKey, AssessmentResult)>,
}

impl MatchSession {
    pub fn new(catalog: Arc<CatalogStore>, simulator: Simulator) -> Self {
        Self {
            catalog,
            simulator,
            search_term: String::new(),
            flow: SelectionFlow::new(),
            in_flight: None,
            result: None,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Catalog drugs filtered by the search term and ranked for the
    /// selected disease.
    pub fn visible_drugs(&self) -> Vec<&Drug> {
        RankingContext::new(&self.search_term, self.flow.disease()).apply(self.catalog.drugs())
    }

    pub fn selection(&self) -> &SelectionFlow {
        &self.flow
    }

    pub fn state(&self) -> SelectionState {
        self.flow.state()
    }

    pub fn selected_disease(&self) -> Option<&Disease> {
        self.flow.disease()
    }

    pub fn selected_drug(&self) -> Option<&Drug> {
        self.flow.drug()
    }

    /// Select a disease by id. Clears the drug choice.
    pub fn select_disease_by_id(&mut self, id: &str) -> SessionResult<()> {
        let disease = self
            .catalog
            .disease(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownDisease(id.to_string()))?;
        self.flow.select_disease(disease);
        self.discard_stale();
        Ok(())
    }

    /// Select a drug by id.
    pub fn select_drug_by_id(&mut self, id: &str) -> SessionResult<()> {
        let drug = self
            .catalog
            .drug(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownDrug(id.to_string()))?;
        self.flow.select_drug(drug);
        self.discard_stale();
        Ok(())
    }

    /// The pair an assessment would currently be made for.
    pub fn current_key(&self) -> Option<AssessmentKey> {
        let drug = self.flow.drug()?;
        Some(AssessmentKey::new(
            drug.id.clone(),
            self.flow.disease().map(|d| d.id.clone()),
        ))
    }

    /// Start an assessment for the current selection, replacing any request
    /// already in flight.
    ///
    /// Fails with [`AssessmentError::InvalidSelection`] when no drug is
    /// selected; no pending state is recorded in that case.
    pub fn start_analysis(&mut self) -> SessionResult<PendingAssessment> {
        let pending = self
            .simulator
            .spawn_assessment(self.flow.drug(), self.flow.disease())?;

        if let Some(previous) = self.in_flight.take() {
            debug!(request_id = %previous.request_id, "replacing in-flight assessment");
            previous.token.cancel();
        }
        self.result = None;
        self.in_flight = Some(InFlight {
            request_id: pending.request_id(),
            key: pending.key().clone(),
            token: pending.cancellation_token(),
        });

        Ok(pending)
    }

    /// Record the outcome of a request started by [`start_analysis`].
    ///
    /// Only the newest request for the still-current pair is accepted;
    /// anything else is reported as superseded and leaves the session
    /// untouched.
    ///
    /// [`start_analysis`]: MatchSession::start_analysis
    pub fn complete_analysis(
        &mut self,
        ticket: &AssessmentTicket,
        outcome: SimulatorResult<AssessmentResult>,
    ) -> SessionResult<AssessmentResult> {
        let is_current = matches!(
            &self.in_flight,
            Some(f) if f.request_id == ticket.request_id && Some(&f.key) == self.current_key().as_ref()
        );
        if !is_current {
            warn!(request_id = %ticket.request_id, "dropping superseded assessment result");
            return Err(AssessmentError::Superseded(ticket.key.clone()).into());
        }

        self.in_flight = None;
        let result = outcome?;
        self.result = Some((ticket.key.clone(), result.clone()));
        Ok(result)
    }

    /// Start, wait for and record an assessment in one step.
    pub async fn analyze(&mut self) -> SessionResult<AssessmentResult> {
        let pending = self.start_analysis()?;
        let ticket = pending.ticket();
        let outcome = pending.wait().await;
        self.complete_analysis(&ticket, outcome)
    }

    /// Whether a request is still running for the current selection.
    ///
    /// A request whose handle was dropped without being completed has its
    /// token cancelled and no longer counts.
    pub fn is_analysis_pending(&self) -> bool {
        matches!(&self.in_flight, Some(f) if !f.token.is_cancelled())
    }

    /// Cancel the in-flight request, if any. Returns whether a live one
    /// existed.
    pub fn cancel_analysis(&mut self) -> bool {
        match self.in_flight.take() {
            Some(f) => {
                let was_live = !f.token.is_cancelled();
                f.token.cancel();
                was_live
            }
            None => false,
        }
    }

    /// The accepted result for the current selection.
    pub fn analysis(&self) -> Option<&AssessmentResult> {
        self.result.as_ref().map(|(_, r)| r)
    }

    fn discard_stale(&mut self) {
        let current = self.current_key();

        if let Some(f) = &self.in_flight {
            if Some(&f.key) != current.as_ref() {
                debug!(request_id = %f.request_id, "selection changed, cancelling assessment");
                f.token.cancel();
                self.in_flight = None;
            }
        }

        if let Some((key, _)) = &self.result {
            if Some(key) != current.as_ref() {
                self.result = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::assessment::SeededSource;
    use crate::config::SimulatorConfig;

    fn session() -> MatchSession {
        let simulator = Simulator::with_source(&SimulatorConfig::default(), SeededSource::new(3));
        MatchSession::new(Arc::new(CatalogStore::seeded()), simulator)
    }

    #[test]
    fn test_unknown_ids() {
        let mut s = session();
        assert_eq!(
            s.select_disease_by_id("99"),
            Err(SessionError::UnknownDisease("99".into()))
        );
        assert_eq!(s.select_drug_by_id("x"), Err(SessionError::UnknownDrug("x".into())));
        assert_eq!(s.state(), SelectionState::NoSelection);
    }

    #[test]
    fn test_visible_drugs_follow_search_and_disease() {
        let mut s = session();
        assert_eq!(s.visible_drugs().len(), 6);

        s.select_disease_by_id("7").unwrap();
        assert_eq!(s.visible_drugs()[0].name, "Lovastatin");

        s.set_search_term("cox");
        let names: Vec<&str> = s.visible_drugs().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Aspirin"]);
    }

    #[test]
    fn test_start_without_drug_is_rejected() {
        let mut s = session();
        s.select_disease_by_id("1").unwrap();

        let err = s.start_analysis().unwrap_err();
        assert_eq!(err, SessionError::Assessment(AssessmentError::InvalidSelection));
        assert!(!s.is_analysis_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_records_result() {
        let mut s = session();
        s.select_disease_by_id("5").unwrap();
        s.select_drug_by_id("5").unwrap();

        let result = s.analyze().await.unwrap();
        assert!(result.explanation.contains("antiplatelet"));
        assert_eq!(s.analysis(), Some(&result));
        assert!(!s.is_analysis_pending());

        // A new disease clears both the drug and the shown result
        s.select_disease_by_id("6").unwrap();
        assert!(s.analysis().is_none());
        assert!(s.selected_drug().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disease_change_supersedes_in_flight() {
        let mut s = session();
        s.select_disease_by_id("1").unwrap();
        s.select_drug_by_id("1").unwrap();

        let pending = s.start_analysis().unwrap();
        let ticket = pending.ticket();
        assert!(s.is_analysis_pending());

        s.select_disease_by_id("1").unwrap();
        assert!(!s.is_analysis_pending());
        assert!(pending.is_cancelled());

        let outcome = pending.wait().await;
        assert_eq!(outcome, Err(AssessmentError::Cancelled));
        assert_eq!(
            s.complete_analysis(&ticket, outcome),
            Err(SessionError::Assessment(AssessmentError::Superseded(ticket.key.clone())))
        );
        assert!(s.analysis().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_request() {
        let mut s = session();
        s.select_drug_by_id("3").unwrap();

        let first = s.start_analysis().unwrap();
        let first_ticket = first.ticket();
        let second = s.start_analysis().unwrap();
        let second_ticket = second.ticket();
        assert!(first.is_cancelled());

        // Even a late success from the first request is refused
        let fake = s.simulator.assess_now(s.selected_drug().unwrap(), None);
        assert!(s.complete_analysis(&first_ticket, Ok(fake)).is_err());

        let outcome = second.wait().await;
        let result = s.complete_analysis(&second_ticket, outcome).unwrap();
        assert_eq!(
            result.modifications[3],
            "Explore prodrug approaches to reduce toxicity"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_is_not_pending() {
        let mut s = session();
        s.select_disease_by_id("5").unwrap();
        s.select_drug_by_id("5").unwrap();

        let pending = s.start_analysis().unwrap();
        assert!(s.is_analysis_pending());

        drop(pending);
        assert!(!s.is_analysis_pending());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!s.is_analysis_pending());
        assert!(!s.cancel_analysis());
        assert!(s.analysis().is_none());
    }

    #[test]
    fn test_cancel_without_request() {
        let mut s = session();
        assert!(!s.cancel_analysis());
    }
}
