//! profq-engine - Profile data quality scoring and multi-source reconciliation
//!
//! Pure engine: receives in-memory candidate records, returns assessments and
//! canonical records. No network, file or database access.
//!
//! Candidates → validators (score) → fusion (reconcile) → CanonicalRecord

pub mod engine;
pub mod fusion;
pub mod report;
pub mod types;
pub mod validators;

pub use engine::QualityEngine;
pub use report::QualityReport;
pub use types::{CandidateRecord, CanonicalRecord, FieldValue, Issue, QualityAssessment, Tier};

pub use profq_common::{EngineConfig, FieldKind, FieldTaxonomy, ProfileField, QualityThresholds};
