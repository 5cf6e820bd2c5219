//! Disease-aware re-ranking.

use std::cmp::Reverse;

use tracing::debug;

use crate::models::{Disease, Drug};
use crate::rules::ranking_bonus;

/// Baseline score plus every ranking bonus the disease grants this drug.
pub fn adjusted_score(drug: &Drug, disease: &Disease) -> i32 {
    drug.score + ranking_bonus(drug, disease)
}

/// Order drugs by adjusted score, highest first.
///
/// Without a disease the input order is returned as-is. Drugs with equal
/// adjusted scores keep their input order.
pub fn rank_drugs<'a>(drugs: &[&'a Drug], disease: Option<&Disease>) -> Vec<&'a Drug> {
    let Some(disease) = disease else {
        return drugs.to_vec();
    };

    let mut scored: Vec<(i32, &'a Drug)> = drugs
        .iter()
        .map(|&drug| (adjusted_score(drug, disease), drug))
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|&(score, _)| Reverse(score));

    debug!(
        disease = %disease.name,
        category = %disease.category,
        candidates = scored.len(),
        top = scored.first().map(|(_, d)| d.name.as_str()).unwrap_or(""),
        "ranked drugs for disease"
    );

    scored.into_iter().map(|(_, drug)| drug).collect()
}
