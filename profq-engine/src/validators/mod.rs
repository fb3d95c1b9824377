//! Validation Layer
//!
//! # Validators
//! 1. **field_validator** - Per-field "present and usable" predicate
//! 2. **quality_scorer** - Record-level score, tier and fallback recommendation

pub mod field_validator;
pub mod quality_scorer;

pub use field_validator::{is_valid_for_kind, FieldValidator};
pub use quality_scorer::QualityScorer;
