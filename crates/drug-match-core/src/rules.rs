//! Disease-category rule tables.
//!
//! Each row pairs a known category with a predicate on drug attributes.
//! Ranking sums every matching row; assessment applies only the first
//! matching row. Rows are evaluated in table order.
//!
//! ```text
//! ranking                                     bonus
//!   Neurological   targets ∋ "AMPK"            +10
//!   Metabolic      mechanism ⊇ "reductase"     +15
//!   Neurological   name = "Rapamycin"          +20
//!   Hematological  name = "Aspirin"            +15
//!
//! assessment (first match)            compat  tox
//!   Neurological   targets ∋ "AMPK"      +5     0
//!   Metabolic      mechanism ⊇ "reductase" +8  -5
//!   Hematological  name = "Aspirin"      +6     0
//! ```

use crate::models::{Disease, Drug, KnownCategory};

/// A test against a drug's authored attributes. All comparisons are
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrugPredicate {
    /// Exact membership in `targets`
    HasTarget(&'static str),
    /// Substring of `mechanism`
    MechanismContains(&'static str),
    /// Exact `name`
    NameIs(&'static str),
}

impl DrugPredicate {
    pub fn matches(&self, drug: &Drug) -> bool {
        match *self {
            Self::HasTarget(target) => drug.has_target(target),
            Self::MechanismContains(fragment) => drug.mechanism.contains(fragment),
            Self::NameIs(name) => drug.name == name,
        }
    }
}

/// Additive ranking bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingRule {
    pub category: KnownCategory,
    pub predicate: DrugPredicate,
    pub bonus: i32,
}

/// Assessment adjustment; at most one applies per run.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentRule {
    pub category: KnownCategory,
    pub predicate: DrugPredicate,
    pub compatibility_delta: i32,
    pub toxicity_delta: i32,
    /// Builds the explanation clause for the matched disease
    pub clause: fn(&Disease) -> String,
}

pub const RANKING_RULES: &[RankingRule] = &[
    RankingRule {
        category: KnownCategory::Neurological,
        predicate: DrugPredicate::HasTarget("AMPK"),
        bonus: 10,
    },
    RankingRule {
        category: KnownCategory::Metabolic,
        predicate: DrugPredicate::MechanismContains("reductase"),
        bonus: 15,
    },
    RankingRule {
        category: KnownCategory::Neurological,
        predicate: DrugPredicate::NameIs("Rapamycin"),
        bonus: 20,
    },
    RankingRule {
        category: KnownCategory::Hematological,
        predicate: DrugPredicate::NameIs("Aspirin"),
        bonus: 15,
    },
];

pub const ASSESSMENT_RULES: &[AssessmentRule] = &[
    AssessmentRule {
        category: KnownCategory::Neurological,
        predicate: DrugPredicate::HasTarget("AMPK"),
        compatibility_delta: 5,
        toxicity_delta: 0,
        clause: ampk_clause,
    },
    AssessmentRule {
        category: KnownCategory::Metabolic,
        predicate: DrugPredicate::MechanismContains("reductase"),
        compatibility_delta: 8,
        toxicity_delta: -5,
        clause: reductase_clause,
    },
    AssessmentRule {
        category: KnownCategory::Hematological,
        predicate: DrugPredicate::NameIs("Aspirin"),
        compatibility_delta: 6,
        toxicity_delta: 0,
        clause: antiplatelet_clause,
    },
];

fn ampk_clause(disease: &Disease) -> String {
    format!(
        " The drug's AMPK activation mechanism shows enhanced compatibility with {}, as AMPK pathways are crucial in neurological disorders.",
        disease.name
    )
}

fn reductase_clause(disease: &Disease) -> String {
    format!(
        " The reductase inhibition mechanism is particularly well-suited for {}, showing improved safety profile in metabolic conditions.",
        disease.name
    )
}

fn antiplatelet_clause(disease: &Disease) -> String {
    format!(
        " Aspirin's antiplatelet effects demonstrate strong therapeutic potential for {} management.",
        disease.name
    )
}

impl RankingRule {
    pub fn applies(&self, category: KnownCategory, drug: &Drug) -> bool {
        self.category == category && self.predicate.matches(drug)
    }
}

impl AssessmentRule {
    pub fn applies(&self, category: KnownCategory, drug: &Drug) -> bool {
        self.category == category && self.predicate.matches(drug)
    }
}

/// Sum of every ranking bonus that applies. Zero for unknown categories.
pub fn ranking_bonus(drug: &Drug, disease: &Disease) -> i32 {
    let Some(category) = disease.known_category() else {
        return 0;
    };
    RANKING_RULES
        .iter()
        .filter(|rule| rule.applies(category, drug))
        .map(|rule| rule.bonus)
        .sum()
}

/// The first assessment rule that applies, if any.
pub fn first_assessment_rule(drug: &Drug, disease: &Disease) -> Option<&'static AssessmentRule> {
    let category = disease.known_category()?;
    ASSESSMENT_RULES
        .iter()
        .find(|rule| rule.applies(category, drug))
}
