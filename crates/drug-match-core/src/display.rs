//! Presentation-only match percentages.
//!
//! These are fixed display constants, separate from the simulator. They are
//! not derived from an assessment and must not be reconciled with one.

use std::ops::Range;

use crate::assessment::ScoreSource;
use crate::models::{Disease, Drug, KnownCategory};
use crate::rules::first_assessment_rule;

/// Range for the "Efficacy Prediction" badge.
pub const EFFICACY_PREDICTION: Range<u8> = 75..90;

/// Shown when no drug-specific row applies.
const DEFAULT_DRUG_MATCH: u8 = 82;

/// Shown for categories outside the known set.
const DEFAULT_CATEGORY_MATCH: u8 = 84;

/// "Disease Match" badge for a drug detail view.
///
/// Uses the same first-match rows as the assessment table: 94 for
/// Neurological/AMPK, 91 for Metabolic/reductase, 89 for
/// Hematological/Aspirin.
pub fn drug_disease_match(drug: &Drug, disease: &Disease) -> u8 {
    match first_assessment_rule(drug, disease).map(|rule| rule.category) {
        Some(KnownCategory::Neurological) => 94,
        Some(KnownCategory::Metabolic) => 91,
        Some(KnownCategory::Hematological) => 89,
        None => DEFAULT_DRUG_MATCH,
    }
}

/// "Disease Match Score" on the results view, keyed on category alone.
pub fn category_match(disease: &Disease) -> u8 {
    match disease.known_category() {
        Some(KnownCategory::Neurological) => 92,
        Some(KnownCategory::Metabolic) => 89,
        Some(KnownCategory::Hematological) => 87,
        None => DEFAULT_CATEGORY_MATCH,
    }
}

/// "Efficacy Prediction" badge for a drug detail view.
///
/// Drawn fresh on every call; it carries no information about the drug.
pub fn efficacy_prediction(source: &mut dyn ScoreSource) -> u8 {
    source.draw(EFFICACY_PREDICTION)
}
