// Reconciler - Field-Wise Merge of Two Candidate Records
//
// Picks a dominant record by quality tier/score, then fills its invalid
// fields from the other record and replaces untrustworthy zero counters.

use profq_common::ProfileField;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::types::{
    to_number, CandidateRecord, CanonicalRecord, Tier, COMBINED_LABEL, RESERVED_KEYS,
};
use crate::validators::QualityScorer;

/// Reconciler
///
/// Stateless; every call scores its inputs afresh.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    scorer: QualityScorer,
}

impl Reconciler {
    pub fn new(scorer: QualityScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    /// Reconcile a primary and a fallback candidate
    ///
    /// # Decision order
    /// 1. Primary tier excellent or good → primary is base, `primary_label`
    /// 2. Fallback score strictly higher → fallback is base, `fallback_label`
    /// 3. Otherwise → primary is base, `"combined"`
    ///
    /// Empty records count as missing. Returns `None` only when both are.
    pub fn combine(
        &self,
        primary: Option<&CandidateRecord>,
        fallback: Option<&CandidateRecord>,
        primary_label: &str,
        fallback_label: &str,
    ) -> Option<CanonicalRecord> {
        let primary = primary.filter(|r| !r.is_empty());
        let fallback = fallback.filter(|r| !r.is_empty());

        let (primary, fallback) = match (primary, fallback) {
            (None, None) => {
                debug!("No data from either source");
                return None;
            }
            (Some(only), None) => return Some(self.stamp(only.clone(), primary_label)),
            (None, Some(only)) => return Some(self.stamp(only.clone(), fallback_label)),
            (Some(p), Some(f)) => (p, f),
        };

        let primary_quality = self.scorer.score(primary, primary_label);
        let fallback_quality = self.scorer.score(fallback, fallback_label);

        info!(
            primary = primary_label,
            primary_tier = %primary_quality.tier,
            primary_score = primary_quality.score,
            fallback = fallback_label,
            fallback_tier = %fallback_quality.tier,
            fallback_score = fallback_quality.score,
            "Reconciling candidate records"
        );

        let merged = if matches!(primary_quality.tier, Tier::Excellent | Tier::Good) {
            info!("Using {} data (satisfactory quality)", primary_label);
            self.stamp(self.merge_fields(primary, fallback), primary_label)
        } else if fallback_quality.score > primary_quality.score {
            info!("Using {} data (higher quality)", fallback_label);
            self.stamp(self.merge_fields(fallback, primary), fallback_label)
        } else {
            info!("Combining best fields of both sources");
            self.stamp(self.merge_fields(primary, fallback), COMBINED_LABEL)
        };

        Some(merged)
    }

    /// Merge `donor` into a copy of `base`
    ///
    /// - A field invalid in `base` but valid in `donor` takes the donor value
    /// - A counter that coerces to 0 in `base` takes a positive donor value
    ///
    /// Keys present only in `donor` are carried over when the donor value is
    /// valid. Merging a record with itself returns it unchanged.
    pub fn merge_fields(&self, base: &CandidateRecord, donor: &CandidateRecord) -> CandidateRecord {
        let validator = self.scorer.validator();
        let mut merged = base.clone();

        let keys: BTreeSet<&str> = base.keys().chain(donor.keys()).collect();

        for key in keys {
            let base_value = base.get(key);
            let donor_value = donor.get(key);

            if !validator.is_valid(base_value, key) && validator.is_valid(donor_value, key) {
                if let Some(value) = donor_value {
                    debug!(field = key, "Taking value from secondary source");
                    merged.insert(key, value.clone());
                }
            } else if key.parse::<ProfileField>().map_or(false, |f| f.is_counter()) {
                let base_number = to_number(base_value);
                let donor_number = to_number(donor_value);

                if base_number == 0.0 && donor_number > 0.0 {
                    if let Some(value) = donor_value {
                        debug!(
                            field = key,
                            value = donor_number,
                            "Replacing zero counter with secondary source value"
                        );
                        merged.insert(key, value.clone());
                    }
                }
            }
        }

        merged
    }

    /// Attach provenance and a fresh assessment
    pub fn stamp(&self, mut fields: CandidateRecord, label: &str) -> CanonicalRecord {
        for key in RESERVED_KEYS {
            fields.remove(key);
        }

        let data_quality = self.scorer.score(&fields, label);

        CanonicalRecord {
            fields,
            extraction_method: label.to_string(),
            data_quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    fn reconciler() -> Reconciler {
        Reconciler::default()
    }

    fn good_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("username", "a")
            .with("full_name", "A")
            .with("followers", 439)
            .with("following", 647)
            .with("posts", 119)
            .with("is_verified", false)
            .with("is_private", false)
            .with("user_id", "123")
    }

    fn poor_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("username", "a")
            .with("full_name", FieldValue::Null)
            .with("followers", 0)
            .with("following", 0)
            .with("posts", 0)
    }

    #[test]
    fn test_merge_with_self_is_identity() {
        let r = reconciler();
        for record in [good_record(), poor_record(), CandidateRecord::new()] {
            assert_eq!(r.merge_fields(&record, &record), record);
        }
    }

    #[test]
    fn test_zero_counter_replaced_by_positive_donor() {
        let base = CandidateRecord::new().with("followers", 0);
        let donor = CandidateRecord::new().with("followers", 150);
        let merged = reconciler().merge_fields(&base, &donor);
        assert_eq!(merged.get("followers"), Some(&FieldValue::Int(150)));
    }

    #[test]
    fn test_nonzero_base_counter_kept() {
        let base = CandidateRecord::new().with("followers", 150);
        let donor = CandidateRecord::new().with("followers", 0);
        let merged = reconciler().merge_fields(&base, &donor);
        assert_eq!(merged.get("followers"), Some(&FieldValue::Int(150)));
    }

    #[test]
    fn test_zero_override_takes_donor_value_as_is() {
        let base = CandidateRecord::new().with("posts", "0");
        let donor = CandidateRecord::new().with("posts", "42");
        let merged = reconciler().merge_fields(&base, &donor);
        assert_eq!(merged.get("posts"), Some(&FieldValue::text("42")));
    }

    #[test]
    fn test_zero_override_only_for_counters() {
        let base = CandidateRecord::new().with("biography", 0);
        let donor = CandidateRecord::new().with("biography", 5);
        let merged = reconciler().merge_fields(&base, &donor);
        assert_eq!(merged.get("biography"), Some(&FieldValue::Int(0)));
    }

    #[test]
    fn test_invalid_base_filled_from_donor() {
        let base = CandidateRecord::new()
            .with("full_name", "N/A")
            .with("is_private", "true");
        let donor = CandidateRecord::new()
            .with("full_name", "Felipe")
            .with("is_private", true)
            .with("external_url", "https://example.com");

        let merged = reconciler().merge_fields(&base, &donor);
        assert_eq!(merged.get("full_name"), Some(&FieldValue::text("Felipe")));
        assert_eq!(merged.get("is_private"), Some(&FieldValue::Bool(true)));
        assert_eq!(
            merged.get("external_url"),
            Some(&FieldValue::text("https://example.com"))
        );
    }

    #[test]
    fn test_invalid_donor_never_overwrites() {
        let base = CandidateRecord::new().with("full_name", "");
        let donor = CandidateRecord::new()
            .with("full_name", "   ")
            .with("user_id", FieldValue::Null);

        let merged = reconciler().merge_fields(&base, &donor);
        assert_eq!(merged.get("full_name"), Some(&FieldValue::text("")));
        assert!(!merged.contains_key("user_id"));
    }

    #[test]
    fn test_combine_both_empty_is_none() {
        let r = reconciler();
        assert!(r.combine(None, None, "api", "html").is_none());
        let empty = CandidateRecord::new();
        assert!(r.combine(Some(&empty), Some(&empty), "api", "html").is_none());
    }

    #[test]
    fn test_combine_one_sided_returns_other_unchanged() {
        let r = reconciler();
        let good = good_record();

        let only_fallback = r.combine(None, Some(&good), "html", "api").unwrap();
        assert_eq!(only_fallback.fields, good);
        assert_eq!(only_fallback.extraction_method, "api");
        assert_eq!(only_fallback.data_quality.source_label, "api");
        assert_eq!(only_fallback.tier(), Tier::Good);

        let empty = CandidateRecord::new();
        let only_primary = r.combine(Some(&good), Some(&empty), "html", "api").unwrap();
        assert_eq!(only_primary.fields, good);
        assert_eq!(only_primary.extraction_method, "html");
    }

    #[test]
    fn test_combine_prefers_higher_scoring_fallback() {
        let canonical = reconciler()
            .combine(Some(&poor_record()), Some(&good_record()), "html", "api")
            .unwrap();

        assert_eq!(canonical.extraction_method, "api");
        assert_eq!(canonical.fields, good_record());
        assert_eq!(canonical.tier(), Tier::Good);
        assert_eq!(canonical.data_quality.score, 0.8);
        assert!(!canonical.data_quality.should_fallback);
    }

    #[test]
    fn test_combine_keeps_good_primary_and_fills_gaps() {
        let donor = poor_record()
            .with("direct_id", "998877")
            .with("biography", "from html");

        let canonical = reconciler()
            .combine(Some(&good_record()), Some(&donor), "api", "html")
            .unwrap();

        assert_eq!(canonical.extraction_method, "api");
        assert_eq!(canonical.get("followers"), Some(&FieldValue::Int(439)));
        assert_eq!(canonical.get("direct_id"), Some(&FieldValue::text("998877")));
        assert_eq!(canonical.tier(), Tier::Excellent);
        assert_eq!(canonical.data_quality.source_label, "api");
    }

    #[test]
    fn test_combine_tie_reports_combined_with_primary_base() {
        let primary = CandidateRecord::new()
            .with("username", "from_primary")
            .with("followers", 0)
            .with("following", 0)
            .with("posts", 0);
        let fallback = CandidateRecord::new()
            .with("username", "from_fallback")
            .with("followers", 10)
            .with("following", 20)
            .with("full_name", FieldValue::Null)
            .with("biography", "bio");

        let r = reconciler();
        assert_eq!(
            r.scorer().score(&primary, "p").score,
            r.scorer().score(&fallback, "f").score
        );

        let canonical = r.combine(Some(&primary), Some(&fallback), "p", "f").unwrap();
        assert_eq!(canonical.extraction_method, COMBINED_LABEL);
        assert_eq!(canonical.get("username"), Some(&FieldValue::text("from_primary")));
        assert_eq!(canonical.get("followers"), Some(&FieldValue::Int(10)));
        assert_eq!(canonical.get("following"), Some(&FieldValue::Int(20)));
        assert_eq!(canonical.get("posts"), Some(&FieldValue::Int(0)));
        assert_eq!(canonical.get("biography"), Some(&FieldValue::text("bio")));
        assert_eq!(canonical.data_quality.source_label, COMBINED_LABEL);
    }

    #[test]
    fn test_stamp_drops_stale_annotations() {
        let record = good_record()
            .with("extraction_method", "stale")
            .with("data_quality", "stale");
        let canonical = reconciler().stamp(record, "api");
        assert!(!canonical.fields.contains_key("extraction_method"));
        assert!(!canonical.fields.contains_key("data_quality"));
        assert_eq!(canonical.extraction_method, "api");
    }

    #[test]
    fn test_canonical_record_serializes_flat() {
        let canonical = reconciler().stamp(good_record(), "api");
        let json = serde_json::to_value(&canonical).unwrap();
        assert_eq!(json["username"], "a");
        assert_eq!(json["followers"], 439);
        assert_eq!(json["extraction_method"], "api");
        assert_eq!(json["data_quality"]["tier"], "good");
        assert_eq!(json["data_quality"]["missing_optional"][0], "direct_id");
    }
}
