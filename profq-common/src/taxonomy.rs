//! Profile field taxonomy
//!
//! Fixed catalogue of the profile fields the engine knows about, each
//! classified as essential or optional and tagged with the kind that governs
//! its validation. Unknown field names are never part of the taxonomy; the
//! validator treats them as free text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Semantic kind of a profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Non-negative counter (number or pure-digit string)
    Numeric,
    /// Genuine boolean only
    Boolean,
    /// Identifier-like text; must be non-blank after trimming
    ShortText,
    /// Presence is sufficient
    FreeText,
}

/// Known profile fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Username,
    FullName,
    Followers,
    Following,
    Posts,
    IsVerified,
    IsPrivate,
    UserId,
    DirectId,
    Biography,
}

impl ProfileField {
    /// Counter fields subject to the zero-counter checks and merge override
    pub const COUNTERS: [ProfileField; 3] = [Self::Followers, Self::Following, Self::Posts];

    /// Record key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FullName => "full_name",
            Self::Followers => "followers",
            Self::Following => "following",
            Self::Posts => "posts",
            Self::IsVerified => "is_verified",
            Self::IsPrivate => "is_private",
            Self::UserId => "user_id",
            Self::DirectId => "direct_id",
            Self::Biography => "biography",
        }
    }

    /// Kind used when the taxonomy does not override it
    pub fn natural_kind(&self) -> FieldKind {
        match self {
            Self::Followers | Self::Following | Self::Posts => FieldKind::Numeric,
            Self::IsVerified | Self::IsPrivate => FieldKind::Boolean,
            Self::Username | Self::FullName | Self::UserId | Self::DirectId => {
                FieldKind::ShortText
            }
            Self::Biography => FieldKind::FreeText,
        }
    }

    pub fn is_counter(&self) -> bool {
        Self::COUNTERS.contains(self)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "username" => Ok(Self::Username),
            "full_name" => Ok(Self::FullName),
            "followers" => Ok(Self::Followers),
            "following" => Ok(Self::Following),
            "posts" => Ok(Self::Posts),
            "is_verified" => Ok(Self::IsVerified),
            "is_private" => Ok(Self::IsPrivate),
            "user_id" => Ok(Self::UserId),
            "direct_id" => Ok(Self::DirectId),
            "biography" => Ok(Self::Biography),
            _ => Err(()),
        }
    }
}

/// One taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: ProfileField,
    /// Overrides the field's natural kind when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
}

impl FieldSpec {
    pub fn new(field: ProfileField) -> Self {
        Self { field, kind: None }
    }

    pub fn with_kind(field: ProfileField, kind: FieldKind) -> Self {
        Self {
            field,
            kind: Some(kind),
        }
    }

    /// Effective kind for validation
    pub fn kind(&self) -> FieldKind {
        self.kind.unwrap_or_else(|| self.field.natural_kind())
    }
}

/// Essential/optional field classification
///
/// Order is significant: missing-field lists and issues follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTaxonomy {
    #[serde(default = "default_essential")]
    pub essential: Vec<FieldSpec>,
    #[serde(default = "default_optional")]
    pub optional: Vec<FieldSpec>,
}

fn default_essential() -> Vec<FieldSpec> {
    [
        ProfileField::Username,
        ProfileField::FullName,
        ProfileField::Followers,
        ProfileField::Following,
        ProfileField::Posts,
    ]
    .into_iter()
    .map(FieldSpec::new)
    .collect()
}

fn default_optional() -> Vec<FieldSpec> {
    [
        ProfileField::IsVerified,
        ProfileField::IsPrivate,
        ProfileField::UserId,
        ProfileField::DirectId,
        ProfileField::Biography,
    ]
    .into_iter()
    .map(FieldSpec::new)
    .collect()
}

impl Default for FieldTaxonomy {
    fn default() -> Self {
        Self {
            essential: default_essential(),
            optional: default_optional(),
        }
    }
}

impl FieldTaxonomy {
    /// Number of fields a record is scored against
    pub fn total(&self) -> usize {
        self.essential.len() + self.optional.len()
    }

    /// All entries, essential first
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.essential.iter().chain(self.optional.iter())
    }

    pub fn essential_fields(&self) -> Vec<ProfileField> {
        self.essential.iter().map(|s| s.field).collect()
    }

    pub fn optional_fields(&self) -> Vec<ProfileField> {
        self.optional.iter().map(|s| s.field).collect()
    }

    /// Kind for a record key
    ///
    /// Taxonomy overrides first, then the field's natural kind. Keys that are
    /// not profile fields at all are free text.
    pub fn kind_of(&self, name: &str) -> FieldKind {
        match name.parse::<ProfileField>() {
            Ok(field) => self
                .iter()
                .find(|spec| spec.field == field)
                .map(FieldSpec::kind)
                .unwrap_or_else(|| field.natural_kind()),
            Err(()) => FieldKind::FreeText,
        }
    }

    /// Reject empty taxonomies and duplicate fields
    pub fn validate(&self) -> Result<()> {
        if self.total() == 0 {
            return Err(Error::InvalidTaxonomy(
                "at least one essential or optional field is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for spec in self.iter() {
            if !seen.insert(spec.field) {
                return Err(Error::InvalidTaxonomy(format!(
                    "field '{}' listed more than once",
                    spec.field
                )));
            }
        }

        Ok(())
    }
}
