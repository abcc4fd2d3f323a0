//! Field kind and classification enums for the metadata system

use serde::{Deserialize, Serialize};

/// Declared kind of a field; drives widgets, validators and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    LongText,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    SingleChoice,
    Reference,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::LongText => "long_text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::SingleChoice => "single_choice",
            Self::Reference => "reference",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleChoice)
    }
}

/// Where a field comes from in the entity structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    #[default]
    Specific,   // business field of this entity
    Identifier, // primary key
    Timestamp,  // created_at / updated_at
}

impl FieldSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Identifier => "identifier",
            Self::Timestamp => "timestamp",
        }
    }

    /// Identifier and timestamp fields never appear in forms
    pub fn is_system(&self) -> bool {
        !matches!(self, Self::Specific)
    }
}

/// Explicit form inclusion marker of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormInclusion {
    #[default]
    Default,
    Include,
    Exclude,
}

/// UI affordance a field may take part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Groupable,
    Sortable,
    Filterable,
    Searchable,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groupable => "groupable",
            Self::Sortable => "sortable",
            Self::Filterable => "filterable",
            Self::Searchable => "searchable",
        }
    }
}
