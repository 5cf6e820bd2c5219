//! Drug filtering and disease-aware ranking.
//!
//! Pipeline: Catalog → Filter (search term) → Rank (selected disease)
//!
//! Both stages are pure and borrow from the catalog; they can run on every
//! keystroke without copying drug records.

mod filter;
mod ranker;

pub use filter::*;
pub use ranker::*;

use crate::models::{Disease, Drug};

/// The inputs that determine the visible drug list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingContext<'a> {
    pub search_term: &'a str,
    pub disease: Option<&'a Disease>,
}

impl<'a> RankingContext<'a> {
    pub fn new(search_term: &'a str, disease: Option<&'a Disease>) -> Self {
        Self {
            search_term,
            disease,
        }
    }

    /// Filter then rank `drugs`.
    pub fn apply<'d>(&self, drugs: &'d [Drug]) -> Vec<&'d Drug> {
        let filtered = filter_drugs(drugs, self.search_term);
        rank_drugs(&filtered, self.disease)
    }
}
