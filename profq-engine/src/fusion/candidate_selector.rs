// Candidate Selector - Best-of-N Reconciliation
//
// Given candidates from several extraction methods in preference order,
// accepts the first excellent one outright; otherwise reconciles the two
// highest-scoring candidates.

use std::cmp::Ordering;
use tracing::{debug, info};

use crate::fusion::reconciler::Reconciler;
use crate::types::{CandidateRecord, CanonicalRecord, QualityAssessment, Tier};

/// Candidate Selector
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    reconciler: Reconciler,
}

impl CandidateSelector {
    pub fn new(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Select (and if needed reconcile) the best candidate
    ///
    /// `candidates` are `(label, record)` pairs in preference order. Empty
    /// records are skipped. Ties in score keep preference order.
    pub fn select_best<'a, I>(&self, candidates: I) -> Option<CanonicalRecord>
    where
        I: IntoIterator<Item = (&'a str, &'a CandidateRecord)>,
    {
        let scorer = self.reconciler.scorer();

        let mut scored: Vec<(&str, &CandidateRecord, QualityAssessment)> = Vec::new();
        for (label, record) in candidates {
            if record.is_empty() {
                debug!(source = label, "Skipping empty candidate");
                continue;
            }

            let assessment = scorer.score(record, label);
            if assessment.tier == Tier::Excellent {
                info!(source = label, "Excellent quality found, skipping remaining candidates");
                return Some(self.reconciler.stamp(record.clone(), label));
            }
            scored.push((label, record, assessment));
        }

        // Stable: equal scores keep preference order
        scored.sort_by(|a, b| b.2.score.partial_cmp(&a.2.score).unwrap_or(Ordering::Equal));

        let mut ranked = scored.into_iter();
        let (best_label, best_record, best_quality) = ranked.next()?;

        info!(
            source = best_label,
            score = best_quality.score,
            tier = %best_quality.tier,
            "Best candidate selected"
        );

        match ranked.next() {
            Some((second_label, second_record, _)) => {
                info!(source = second_label, "Combining with runner-up");
                self.reconciler.combine(
                    Some(best_record),
                    Some(second_record),
                    best_label,
                    second_label,
                )
            }
            None => Some(self.reconciler.stamp(best_record.clone(), best_label)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldValue, COMBINED_LABEL};

    fn excellent_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("username", "a")
            .with("full_name", "A")
            .with("followers", 1)
            .with("following", 2)
            .with("posts", 3)
            .with("is_verified", true)
            .with("is_private", false)
            .with("user_id", "1")
            .with("direct_id", "2")
    }

    fn acceptable_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("username", "a")
            .with("full_name", "A")
            .with("followers", 0)
            .with("following", 5)
            .with("posts", 9)
            .with("user_id", "1")
    }

    fn poor_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("username", "a")
            .with("followers", 120)
            .with("biography", "bio")
    }

    #[test]
    fn test_no_candidates_is_none() {
        let selector = CandidateSelector::default();
        let empty = CandidateRecord::new();
        assert!(selector.select_best(Vec::new()).is_none());
        assert!(selector.select_best(vec![("html", &empty)]).is_none());
    }

    #[test]
    fn test_first_excellent_short_circuits() {
        let excellent = excellent_record();
        let other = excellent_record().with("username", "other");

        let canonical = CandidateSelector::default()
            .select_best(vec![("chrome", &excellent), ("api", &other)])
            .unwrap();

        assert_eq!(canonical.extraction_method, "chrome");
        assert_eq!(canonical.fields, excellent);
        assert_eq!(canonical.tier(), Tier::Excellent);
    }

    #[test]
    fn test_single_candidate_returned_as_is() {
        let poor = poor_record();
        let canonical = CandidateSelector::default()
            .select_best(vec![("html", &poor)])
            .unwrap();
        assert_eq!(canonical.extraction_method, "html");
        assert_eq!(canonical.fields, poor);
        assert!(!canonical.is_persistable());
    }

    #[test]
    fn test_best_two_are_reconciled() {
        let acceptable = acceptable_record();
        let poor = poor_record();
        let empty = CandidateRecord::new();

        // Preference order puts the poor record first; ranking fixes that
        let canonical = CandidateSelector::default()
            .select_best(vec![("html", &poor), ("chrome", &empty), ("api", &acceptable)])
            .unwrap();

        // acceptable is not good, poor does not beat it: combined, api as base
        assert_eq!(canonical.extraction_method, COMBINED_LABEL);
        assert_eq!(canonical.get("followers"), Some(&FieldValue::Int(120)));
        assert_eq!(canonical.get("biography"), Some(&FieldValue::text("bio")));
        assert_eq!(canonical.get("following"), Some(&FieldValue::Int(5)));
        assert!(canonical.is_persistable());
    }
}
