//! Field Validator
//!
//! Decides whether a single field value counts as present and usable given
//! the field's kind. Pure predicate: wrong-typed values are invalid, never
//! an error.
//!
//! # Rules
//! - Absent, null, `""` and `"N/A"` are invalid for every kind
//! - **numeric**: non-negative number, or a string of ASCII digits
//! - **boolean**: genuine boolean only (`"true"` as text is invalid)
//! - **short_text**: string that is non-blank after trimming
//! - **free_text** and unknown keys: presence is sufficient

use profq_common::{FieldKind, FieldTaxonomy};

use crate::types::{is_digit_string, FieldValue};

/// Validity of a value for a field kind
pub fn is_valid_for_kind(value: Option<&FieldValue>, kind: FieldKind) -> bool {
    let value = match value {
        Some(v) if !v.is_placeholder() => v,
        _ => return false,
    };

    match kind {
        FieldKind::Numeric => match value {
            FieldValue::Int(n) => *n >= 0,
            FieldValue::Float(f) => *f >= 0.0,
            FieldValue::Text(s) => is_digit_string(s),
            _ => false,
        },
        FieldKind::Boolean => matches!(value, FieldValue::Bool(_)),
        FieldKind::ShortText => matches!(value, FieldValue::Text(s) if !s.trim().is_empty()),
        FieldKind::FreeText => true,
    }
}

/// Field Validator
///
/// Resolves each record key to its kind through the taxonomy, then applies
/// [`is_valid_for_kind`].
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    taxonomy: FieldTaxonomy,
}

impl FieldValidator {
    pub fn new(taxonomy: FieldTaxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &FieldTaxonomy {
        &self.taxonomy
    }

    /// Is `value` present and usable for record key `field_name`?
    pub fn is_valid(&self, value: Option<&FieldValue>, field_name: &str) -> bool {
        is_valid_for_kind(value, self.taxonomy.kind_of(field_name))
    }
}
