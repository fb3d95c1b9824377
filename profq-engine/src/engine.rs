//! Engine facade
//!
//! Bundles validator, scorer, reconciler and selector behind one value built
//! from an [`EngineConfig`]. The engine is immutable after construction and
//! `Send + Sync`, so one instance can be shared behind an `Arc`.

use profq_common::EngineConfig;

use crate::fusion::{CandidateSelector, Reconciler};
use crate::types::{CandidateRecord, CanonicalRecord, FieldValue, QualityAssessment};
use crate::validators::QualityScorer;

/// Profile quality scoring and reconciliation engine
#[derive(Debug, Clone)]
pub struct QualityEngine {
    config: EngineConfig,
    selector: CandidateSelector,
}

impl QualityEngine {
    pub fn new(config: EngineConfig) -> Self {
        let scorer = QualityScorer::with_config(&config);
        Self {
            config,
            selector: CandidateSelector::new(Reconciler::new(scorer)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &QualityScorer {
        self.reconciler().scorer()
    }

    pub fn reconciler(&self) -> &Reconciler {
        self.selector.reconciler()
    }

    pub fn is_valid(&self, value: Option<&FieldValue>, field_name: &str) -> bool {
        self.scorer().validator().is_valid(value, field_name)
    }

    pub fn score(&self, record: &CandidateRecord, source_label: &str) -> QualityAssessment {
        self.scorer().score(record, source_label)
    }

    pub fn combine(
        &self,
        primary: Option<&CandidateRecord>,
        fallback: Option<&CandidateRecord>,
        primary_label: &str,
        fallback_label: &str,
    ) -> Option<CanonicalRecord> {
        self.reconciler()
            .combine(primary, fallback, primary_label, fallback_label)
    }

    pub fn merge_fields(&self, base: &CandidateRecord, donor: &CandidateRecord) -> CandidateRecord {
        self.reconciler().merge_fields(base, donor)
    }

    pub fn select_best<'a, I>(&self, candidates: I) -> Option<CanonicalRecord>
    where
        I: IntoIterator<Item = (&'a str, &'a CandidateRecord)>,
    {
        self.selector.select_best(candidates)
    }
}

impl Default for QualityEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_sync() {
        assert_send_sync::<QualityEngine>();
    }

    #[test]
    fn test_default_engine_uses_default_config() {
        let engine = QualityEngine::default();
        assert_eq!(engine.config().taxonomy.total(), 10);
        assert_eq!(engine.scorer().thresholds().excellent, 0.9);
        assert!(engine.is_valid(Some(&FieldValue::Int(3)), "posts"));
        assert!(!engine.is_valid(Some(&FieldValue::text("N/A")), "biography"));
    }
}
