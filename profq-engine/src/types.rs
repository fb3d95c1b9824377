//! Core Types for profile quality scoring and reconciliation
//!
//! - [`FieldValue`]: heterogeneous value of one record field
//! - [`CandidateRecord`]: one extraction method's snapshot of a profile
//! - [`QualityAssessment`]: derived, immutable scoring result
//! - [`CanonicalRecord`]: reconciled record with provenance and assessment

use profq_common::{ProfileField, QualityThresholds};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder some extractors emit instead of leaving a field empty
pub const PLACEHOLDER: &str = "N/A";

/// Provenance label used when fields were taken from both records
pub const COMBINED_LABEL: &str = "combined";

/// Record keys owned by [`CanonicalRecord`] annotations
pub const RESERVED_KEYS: [&str; 2] = ["extraction_method", "data_quality"];

// ============================================================================
// Field values
// ============================================================================

/// Value of a single record field
///
/// Deserializes from any JSON scalar. Arrays and objects are rejected by
/// serde; extractors only produce scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Null, empty string, or the `"N/A"` placeholder (case-sensitive)
    pub fn is_placeholder(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty() || s == PLACEHOLDER,
            _ => false,
        }
    }

    /// Numeric value, or 0 for anything that is not a number or digit string
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Int(n) => *n as f64,
            Self::Float(f) => *f,
            Self::Text(s) if is_digit_string(s) => s.parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Boolean value, or false for anything that is not a genuine boolean
    pub fn to_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Number equal to zero; strings never qualify
    pub fn is_numeric_zero(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Non-empty string of ASCII decimal digits
pub fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Missing key, null, or empty string
pub fn is_absent(value: Option<&FieldValue>) -> bool {
    match value {
        None | Some(FieldValue::Null) => true,
        Some(FieldValue::Text(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numeric coercion of an optional value; absent coerces to 0
pub fn to_number(value: Option<&FieldValue>) -> f64 {
    value.map_or(0.0, FieldValue::to_number)
}

// ============================================================================
// Candidate record
// ============================================================================

/// One extraction method's snapshot of a profile
///
/// Keys are kept in sorted order so merged output is deterministic. Keys
/// outside the taxonomy are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn field(&self, field: ProfileField) -> Option<&FieldValue> {
        self.fields.get(field.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for CandidateRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Quality tiers and issues
// ============================================================================

/// Discretized quality bucket, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Invalid,
    Poor,
    Acceptable,
    Good,
    Excellent,
}

impl Tier {
    /// First tier whose threshold the score reaches, checked top down
    pub fn from_score(score: f64, thresholds: &QualityThresholds) -> Self {
        if score >= thresholds.excellent {
            Self::Excellent
        } else if score >= thresholds.good {
            Self::Good
        } else if score >= thresholds.acceptable {
            Self::Acceptable
        } else if score >= thresholds.poor {
            Self::Poor
        } else {
            Self::Invalid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Poor => "poor",
            Self::Acceptable => "acceptable",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    /// Good enough to hand to the caller's store
    pub fn is_persistable(&self) -> bool {
        *self >= Self::Acceptable
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic finding attached to an assessment
///
/// Serializes as its human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issue {
    NullData,
    MissingEssentialField(ProfileField),
    MissingNumericField(ProfileField),
    AllCountersZero,
    MissingName,
    MissingUserId,
}

impl Issue {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NullData => "null-data",
            Self::MissingEssentialField(_) => "missing-essential-field",
            Self::MissingNumericField(_) => "missing-numeric-field",
            Self::AllCountersZero => "all-counters-zero",
            Self::MissingName => "missing-name",
            Self::MissingUserId => "missing-user-id",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullData => write!(f, "completely null data"),
            Self::MissingEssentialField(field) => {
                write!(f, "essential field '{}' is missing", field)
            }
            Self::MissingNumericField(field) => {
                write!(f, "numeric field '{}' is null or invalid", field)
            }
            Self::AllCountersZero => write!(
                f,
                "all counters are zero (possibly private profile or extraction error)"
            ),
            Self::MissingName => write!(f, "full name missing"),
            Self::MissingUserId => write!(f, "user id missing (needed for direct messaging)"),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Assessment and canonical record
// ============================================================================

/// Result of scoring one record
///
/// Created fresh on every scoring call and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityAssessment {
    /// valid_field_count / total_field_count
    pub score: f64,
    pub tier: Tier,
    pub missing_essential: Vec<ProfileField>,
    pub missing_optional: Vec<ProfileField>,
    pub valid_field_count: usize,
    pub total_field_count: usize,
    /// Extraction method name, for diagnostics only
    pub source_label: String,
    /// Recommend trying (or preferring) another extraction method
    pub should_fallback: bool,
    pub issues: Vec<Issue>,
}

impl QualityAssessment {
    pub fn has_issue(&self, issue: &Issue) -> bool {
        self.issues.contains(issue)
    }
}

/// Reconciled record with provenance and its own assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    #[serde(flatten)]
    pub fields: CandidateRecord,
    /// Winning source label, or `"combined"`
    pub extraction_method: String,
    /// Assessment of `fields` under `extraction_method`
    pub data_quality: QualityAssessment,
}

impl CanonicalRecord {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn tier(&self) -> Tier {
        self.data_quality.tier
    }

    pub fn is_persistable(&self) -> bool {
        self.data_quality.tier.is_persistable()
    }
}
