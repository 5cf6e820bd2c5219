//! Free-text drug filter.

use crate::models::Drug;

/// Narrow `drugs` to those whose name, mechanism or any target contains
/// `search_term`, ignoring case.
///
/// An empty term keeps every drug. Relative order is preserved.
pub fn filter_drugs<'a>(drugs: &'a [Drug], search_term: &str) -> Vec<&'a Drug> {
    if search_term.is_empty() {
        return drugs.iter().collect();
    }

    let needle = search_term.to_lowercase();
    drugs.iter().filter(|d| d.matches_query(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_drugs;

    fn names<'a>(drugs: &[&'a Drug]) -> Vec<&'a str> {
        drugs.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_empty_term_keeps_everything_in_order() {
        let drugs = seed_drugs();
        let filtered = filter_drugs(&drugs, "");
        let expected: Vec<&str> = drugs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names(&filtered), expected);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let drugs = seed_drugs();
        assert_eq!(names(&filter_drugs(&drugs, "ASPIRIN")), vec!["Aspirin"]);
    }

    #[test]
    fn test_matches_mechanism() {
        let drugs = seed_drugs();
        // "mTOR inhibitor", "HMG-CoA reductase inhibitor", "COX inhibitor"
        assert_eq!(
            names(&filter_drugs(&drugs, "inhibitor")),
            vec!["Rapamycin", "Lovastatin", "Aspirin"]
        );
    }

    #[test]
    fn test_matches_target() {
        let drugs = seed_drugs();
        assert_eq!(names(&filter_drugs(&drugs, "cox-2")), vec!["Aspirin"]);
        assert_eq!(names(&filter_drugs(&drugs, "fkbp")), vec!["Rapamycin"]);
    }

    #[test]
    fn test_no_match() {
        let drugs = seed_drugs();
        assert!(filter_drugs(&drugs, "kinase").is_empty());
    }
}
