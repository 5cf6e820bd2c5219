//! Bounded-random compatibility simulator.

use std::iter;
use std::ops::Range;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SimulatorConfig;
use crate::models::{AssessmentKey, AssessmentResult, Disease, Drug};
use crate::rules::first_assessment_rule;

use super::{AssessmentError, PendingAssessment, ScoreSource, SimulatorResult, ThreadRngSource};

/// Range for the base compatibility draw.
pub const BASE_COMPATIBILITY: Range<u8> = 75..95;

/// Range for the base toxicity draw.
pub const BASE_TOXICITY: Range<u8> = 10..40;

/// Range for the confidence draw.
pub const CONFIDENCE: Range<u8> = 85..100;

/// Ceiling applied to the final compatibility.
pub const MAX_COMPATIBILITY: u8 = 98;

/// Floor applied to the final toxicity.
pub const MIN_TOXICITY: u8 = 5;

/// Adjusted compatibility above this reads as "high".
const HIGH_COMPATIBILITY_THRESHOLD: i32 = 85;

const GENERIC_MODIFICATIONS: [&str; 3] = [
    "Modify the aromatic ring system to improve selectivity",
    "Add a hydrophilic group to enhance bioavailability",
    "Consider stereochemical optimization for better binding",
];

const FALLBACK_MODIFICATION: &str = "Explore prodrug approaches to reduce toxicity";

/// Produces synthetic assessments for (drug, disease) pairs.
///
/// Cloning is cheap; clones share the same random source.
#[derive(Clone)]
pub struct Simulator {
    latency: Duration,
    source: Arc<Mutex<Box<dyn ScoreSource>>>,
}

impl Simulator {
    /// Simulator drawing from the thread RNG.
    pub fn new(config: &SimulatorConfig) -> Self {
        Self::with_source(config, ThreadRngSource)
    }

    /// Simulator drawing from a caller-supplied source.
    pub fn with_source(config: &SimulatorConfig, source: impl ScoreSource + 'static) -> Self {
        let source: Box<dyn ScoreSource> = Box::new(source);
        Self {
            latency: config.latency(),
            source: Arc::new(Mutex::new(source)),
        }
    }

    /// Simulated round-trip time.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Compute an assessment immediately, skipping the latency.
    pub fn assess_now(&self, drug: &Drug, disease: Option<&Disease>) -> AssessmentResult {
        let (base_compatibility, base_toxicity, confidence) = {
            let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
            (
                source.draw(BASE_COMPATIBILITY),
                source.draw(BASE_TOXICITY),
                source.draw(CONFIDENCE),
            )
        };

        let mut compatibility = i32::from(base_compatibility);
        let mut toxicity = i32::from(base_toxicity);
        let mut clause = String::new();

        if let Some(disease) = disease {
            if let Some(rule) = first_assessment_rule(drug, disease) {
                compatibility += rule.compatibility_delta;
                toxicity += rule.toxicity_delta;
                clause = (rule.clause)(disease);
            }
        }

        let qualifier = if compatibility > HIGH_COMPATIBILITY_THRESHOLD {
            "high"
        } else {
            "moderate"
        };
        let explanation = format!(
            "The drug shows {qualifier} compatibility due to its selective binding mechanism and \
             favorable pharmacokinetic properties. However, potential off-target effects may limit \
             its effectiveness in certain patient populations.{clause}"
        );

        let targeted = match disease {
            Some(d) => format!(
                "Optimize dosing regimen for {} conditions",
                d.category.to_lowercase()
            ),
            None => FALLBACK_MODIFICATION.to_string(),
        };
        let modifications = GENERIC_MODIFICATIONS
            .iter()
            .map(|m| m.to_string())
            .chain(iter::once(targeted))
            .collect();

        AssessmentResult {
            compatibility: clamp_percent(compatibility, 0, MAX_COMPATIBILITY),
            toxicity: clamp_percent(toxicity, MIN_TOXICITY, 100),
            explanation,
            modifications,
            confidence: clamp_percent(i32::from(confidence), 0, 100),
        }
    }

    /// Assess after the simulated latency.
    ///
    /// A missing drug is rejected before the wait begins. Dropping the
    /// returned future cancels the request.
    pub async fn run_assessment(
        &self,
        drug: Option<&Drug>,
        disease: Option<&Disease>,
    ) -> SimulatorResult<AssessmentResult> {
        let drug = drug.ok_or(AssessmentError::InvalidSelection)?;

        debug!(drug = %drug.name, disease = ?disease.map(|d| &d.name), "assessment started");
        tokio::time::sleep(self.latency).await;

        let result = self.assess_now(drug, disease);
        info!(
            drug = %drug.name,
            compatibility = result.compatibility,
            toxicity = result.toxicity,
            "assessment complete"
        );
        Ok(result)
    }

    /// Start an assessment on the tokio runtime and return its handle.
    ///
    /// A missing drug is rejected synchronously, so no handle exists for an
    /// invalid request. Must be called from within a tokio runtime.
    pub fn spawn_assessment(
        &self,
        drug: Option<&Drug>,
        disease: Option<&Disease>,
    ) -> SimulatorResult<PendingAssessment> {
        let drug = drug.ok_or(AssessmentError::InvalidSelection)?.clone();
        let disease = disease.cloned();

        let key = AssessmentKey::new(drug.id.clone(), disease.as_ref().map(|d| d.id.clone()));
        let request_id = Uuid::new_v4();
        let token = CancellationToken::new();

        let cancelled = token.clone();
        let simulator = self.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    debug!(%request_id, "assessment cancelled before completion");
                    None
                }
                _ = tokio::time::sleep(simulator.latency) => {
                    Some(simulator.assess_now(&drug, disease.as_ref()))
                }
            }
        });

        debug!(%request_id, drug_id = %key.drug_id, disease_id = ?key.disease_id, "assessment spawned");
        Ok(PendingAssessment::new(request_id, key, token, handle))
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

fn clamp_percent(value: i32, min: u8, max: u8) -> u8 {
    // Bounds are u8, so the clamped value always fits
    value.clamp(i32::from(min), i32::from(max)) as u8
}
