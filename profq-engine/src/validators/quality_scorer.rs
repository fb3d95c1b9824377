//! Quality Scorer
//!
//! Assesses how trustworthy a single candidate record is and whether another
//! extraction method should be tried.
//!
//! # Scoring Algorithm
//! - Every taxonomy field contributes equally: `score = valid / total`
//! - Essential misses are listed and produce an issue each (counter fields
//!   get their own message); optional misses are only listed
//! - Tier is the first threshold reached from the top:
//!   excellent ≥ 0.9, good ≥ 0.7, acceptable ≥ 0.5, poor ≥ 0.3, else invalid
//!
//! # Fallback Recommendation
//! Recommended when any of:
//! 1. Three or more essential fields are missing
//! 2. Score is below the acceptable threshold
//! 3. All counters are zero or absent and the profile is not known private
//! 4. Neither `direct_id` nor `user_id` is present
//!
//! After the rule, counters that are all exactly zero force the
//! recommendation on regardless.
//!
//! # Example
//! ```rust,ignore
//! use profq_engine::validators::QualityScorer;
//!
//! let scorer = QualityScorer::new();
//! let assessment = scorer.score(&record, "html");
//!
//! println!("Quality: {:.1}% ({})", assessment.score * 100.0, assessment.tier);
//! ```

use profq_common::{EngineConfig, ProfileField, QualityThresholds};
use tracing::debug;

use crate::types::{is_absent, CandidateRecord, FieldValue, Issue, QualityAssessment, Tier};
use crate::validators::field_validator::{is_valid_for_kind, FieldValidator};

/// Quality Scorer
///
/// Holds the tier thresholds and the validator (which owns the taxonomy).
/// Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    validator: FieldValidator,
    thresholds: QualityThresholds,
}

impl QualityScorer {
    /// Create scorer with the default taxonomy and thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            validator: FieldValidator::new(config.taxonomy.clone()),
            thresholds: config.thresholds,
        }
    }

    pub fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Score a candidate record produced by `source_label`
    pub fn score(&self, record: &CandidateRecord, source_label: &str) -> QualityAssessment {
        let taxonomy = self.validator.taxonomy();
        let total_field_count = taxonomy.total();

        if record.is_empty() {
            debug!(source = source_label, "Scoring empty record");
            return QualityAssessment {
                score: 0.0,
                tier: Tier::Invalid,
                missing_essential: taxonomy.essential_fields(),
                missing_optional: taxonomy.optional_fields(),
                valid_field_count: 0,
                total_field_count,
                source_label: source_label.to_string(),
                should_fallback: true,
                issues: vec![Issue::NullData],
            };
        }

        let mut valid_field_count = 0;
        let mut missing_essential = Vec::new();
        let mut missing_optional = Vec::new();
        let mut issues = Vec::new();

        for spec in &taxonomy.essential {
            if is_valid_for_kind(record.field(spec.field), spec.kind()) {
                valid_field_count += 1;
            } else {
                missing_essential.push(spec.field);
                issues.push(if spec.field.is_counter() {
                    Issue::MissingNumericField(spec.field)
                } else {
                    Issue::MissingEssentialField(spec.field)
                });
            }
        }

        for spec in &taxonomy.optional {
            if is_valid_for_kind(record.field(spec.field), spec.kind()) {
                valid_field_count += 1;
            } else {
                missing_optional.push(spec.field);
            }
        }

        let score = if total_field_count == 0 {
            0.0
        } else {
            valid_field_count as f64 / total_field_count as f64
        };
        let tier = Tier::from_score(score, &self.thresholds);

        let mut should_fallback = self.should_use_fallback(record, score, &missing_essential);

        if counters_all_zero(record) {
            issues.push(Issue::AllCountersZero);
            should_fallback = true;
        }

        if record
            .field(ProfileField::FullName)
            .map_or(true, FieldValue::is_placeholder)
        {
            issues.push(Issue::MissingName);
        }

        if is_absent(record.field(ProfileField::UserId)) {
            issues.push(Issue::MissingUserId);
        }

        debug!(
            source = source_label,
            score = score,
            tier = %tier,
            valid = valid_field_count,
            total = total_field_count,
            fallback = should_fallback,
            issues = issues.len(),
            "Quality scoring complete"
        );

        QualityAssessment {
            score,
            tier,
            missing_essential,
            missing_optional,
            valid_field_count,
            total_field_count,
            source_label: source_label.to_string(),
            should_fallback,
            issues,
        }
    }

    /// Fallback decision rule, before the zero-counter override
    pub fn should_use_fallback(
        &self,
        record: &CandidateRecord,
        score: f64,
        missing_essential: &[ProfileField],
    ) -> bool {
        if missing_essential.len() >= 3 {
            return true;
        }

        if score < self.thresholds.acceptable {
            return true;
        }

        // Zero or absent counters on a profile not known to be private
        let counters_empty = ProfileField::COUNTERS.iter().all(|field| {
            let value = record.field(*field);
            is_absent(value) || value.map_or(false, FieldValue::is_numeric_zero)
        });
        let is_private = record
            .field(ProfileField::IsPrivate)
            .map_or(false, FieldValue::to_bool);
        if counters_empty && !is_private {
            return true;
        }

        if is_absent(record.field(ProfileField::DirectId))
            && is_absent(record.field(ProfileField::UserId))
        {
            return true;
        }

        false
    }
}

/// Every counter present and numerically zero
fn counters_all_zero(record: &CandidateRecord) -> bool {
    ProfileField::COUNTERS
        .iter()
        .all(|field| record.field(*field).map_or(false, FieldValue::is_numeric_zero))
}

// ============================================================================
// Tests
// ============================================================================
