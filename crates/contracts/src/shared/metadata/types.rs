//! Core metadata types for CRM entities
//!
//! All types use 'static lifetimes so that every entity declares its
//! metadata as compile-time constants.

use std::borrow::Cow;

use serde::Serialize;

use super::field_type::{Capability, FieldKind, FieldSource, FormInclusion};
use super::model::title_case;
use super::validation::ValidationRules;

// ============================================================================
// Entity-level metadata
// ============================================================================

/// Metadata for an entity type
/// All string fields are 'static for zero-cost compile-time access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityMetadataInfo {
    pub entity_index: &'static str,
    /// Class name, e.g. "Company"
    pub entity_name: &'static str,
    /// Singular storage name, e.g. "company"
    pub collection_name: &'static str,
    pub table_name: &'static str,
    /// Endpoint name used by the API and UI, e.g. "companies"
    pub api_endpoint: &'static str,
    pub default_sort_field: Option<&'static str>,
    pub ui: EntityUiMetadata,
}

/// UI metadata for entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntityUiMetadata {
    /// Singular display name override
    pub element_name: Option<&'static str>,
    /// Plural display name override (irregular plurals live here)
    pub list_name: Option<&'static str>,
    pub icon: Option<&'static str>,
}

// ============================================================================
// Choices
// ============================================================================

/// One entry of a labeled choice set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceEntry {
    pub value: &'static str,
    pub label: Option<&'static str>,
    pub description: Option<&'static str>,
    /// Ordering hint, lower first
    pub order: Option<i32>,
}

impl ChoiceEntry {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label: Some(label),
            description: None,
            order: None,
        }
    }

    /// Entry without a label; displays its raw value
    pub const fn bare(value: &'static str) -> Self {
        Self {
            value,
            label: None,
            description: None,
            order: None,
        }
    }

    pub const fn described(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    pub const fn ordered(self, order: i32) -> Self {
        Self {
            order: Some(order),
            ..self
        }
    }

    pub fn display_label(&self) -> &'static str {
        self.label.unwrap_or(self.value)
    }
}

// ============================================================================
// Field-level metadata
// ============================================================================

/// Metadata for a single field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldMetadata {
    pub name: &'static str,
    pub kind: FieldKind,
    pub source: FieldSource,
    pub ui: FieldUiMetadata,
    pub validation: ValidationRules,
    pub choices: &'static [ChoiceEntry],
    /// Explicit display order of choice values, overrides insertion order
    pub choice_order: Option<&'static [&'static str]>,
    pub groupable: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub searchable: bool,
    /// Storage column when it differs from `name`
    pub column: Option<&'static str>,
    /// Endpoint name of the referenced entity type
    pub ref_entity: Option<&'static str>,
}

/// UI metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldUiMetadata {
    pub label: Option<&'static str>,
    pub placeholder: Option<&'static str>,
    pub unit: Option<&'static str>,
    pub help: Option<&'static str>,
    pub visible_in_list: bool,
    pub column_width: Option<u32>,
    pub form: FormInclusion,
    /// Hidden from quick-create / modal forms
    pub modal_exclude: bool,
}

impl FieldUiMetadata {
    pub const fn new() -> Self {
        Self {
            label: None,
            placeholder: None,
            unit: None,
            help: None,
            visible_in_list: true,
            column_width: None,
            form: FormInclusion::Default,
            modal_exclude: false,
        }
    }
}

/// Default values for FieldUiMetadata
impl Default for FieldUiMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMetadata {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            source: FieldSource::Specific,
            ui: FieldUiMetadata::new(),
            validation: ValidationRules::none(),
            choices: &[],
            choice_order: None,
            groupable: false,
            sortable: false,
            filterable: false,
            searchable: false,
            column: None,
            ref_entity: None,
        }
    }

    // ------------------------------------------------------------------
    // const builders used by entity declarations
    // ------------------------------------------------------------------

    pub const fn identifier(self) -> Self {
        Self {
            source: FieldSource::Identifier,
            ..self
        }
    }

    pub const fn timestamp(self) -> Self {
        Self {
            source: FieldSource::Timestamp,
            ui: FieldUiMetadata {
                visible_in_list: false,
                ..self.ui
            },
            ..self
        }
    }

    pub const fn label(self, label: &'static str) -> Self {
        Self {
            ui: FieldUiMetadata {
                label: Some(label),
                ..self.ui
            },
            ..self
        }
    }

    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self {
            ui: FieldUiMetadata {
                placeholder: Some(placeholder),
                ..self.ui
            },
            ..self
        }
    }

    pub const fn unit(self, unit: &'static str) -> Self {
        Self {
            ui: FieldUiMetadata {
                unit: Some(unit),
                ..self.ui
            },
            ..self
        }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self {
            ui: FieldUiMetadata {
                help: Some(help),
                ..self.ui
            },
            ..self
        }
    }

    pub const fn hidden_in_list(self) -> Self {
        Self {
            ui: FieldUiMetadata {
                visible_in_list: false,
                ..self.ui
            },
            ..self
        }
    }

    pub const fn column_width(self, width: u32) -> Self {
        Self {
            ui: FieldUiMetadata {
                column_width: Some(width),
                ..self.ui
            },
            ..self
        }
    }

    pub const fn include_in_form(self) -> Self {
        Self {
            ui: FieldUiMetadata {
                form: FormInclusion::Include,
                ..self.ui
            },
            ..self
        }
    }

    pub const fn exclude_from_form(self) -> Self {
        Self {
            ui: FieldUiMetadata {
                form: FormInclusion::Exclude,
                ..self.ui
            },
            ..self
        }
    }

    pub const fn modal_exclude(self) -> Self {
        Self {
            ui: FieldUiMetadata {
                modal_exclude: true,
                ..self.ui
            },
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            validation: ValidationRules {
                required: true,
                ..self.validation
            },
            ..self
        }
    }

    pub const fn max_length(self, max_length: usize) -> Self {
        Self {
            validation: ValidationRules {
                max_length: Some(max_length),
                ..self.validation
            },
            ..self
        }
    }

    pub const fn min_value(self, min: f64) -> Self {
        Self {
            validation: ValidationRules {
                min: Some(min),
                ..self.validation
            },
            ..self
        }
    }

    pub const fn max_value(self, max: f64) -> Self {
        Self {
            validation: ValidationRules {
                max: Some(max),
                ..self.validation
            },
            ..self
        }
    }

    pub const fn choices(self, choices: &'static [ChoiceEntry]) -> Self {
        Self { choices, ..self }
    }

    pub const fn choice_order(self, order: &'static [&'static str]) -> Self {
        Self {
            choice_order: Some(order),
            ..self
        }
    }

    pub const fn groupable(self) -> Self {
        Self {
            groupable: true,
            ..self
        }
    }

    pub const fn sortable(self) -> Self {
        Self {
            sortable: true,
            ..self
        }
    }

    pub const fn filterable(self) -> Self {
        Self {
            filterable: true,
            ..self
        }
    }

    pub const fn searchable(self) -> Self {
        Self {
            searchable: true,
            ..self
        }
    }

    pub const fn column(self, column: &'static str) -> Self {
        Self {
            column: Some(column),
            ..self
        }
    }

    pub const fn references(self, entity: &'static str) -> Self {
        Self {
            ref_entity: Some(entity),
            ..self
        }
    }

    // ------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------

    /// Human label; title-cased name when none is declared
    pub fn display_label(&self) -> Cow<'static, str> {
        match self.ui.label {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(title_case(self.name)),
        }
    }

    /// Check if field is optional
    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }

    pub fn is_system(&self) -> bool {
        self.source.is_system()
    }

    /// Storage column backing this field
    pub fn db_column(&self) -> &'static str {
        self.column.unwrap_or(self.name)
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Groupable => self.groupable,
            Capability::Sortable => self.sortable,
            Capability::Filterable => self.filterable,
            Capability::Searchable => self.searchable,
        }
    }

    pub fn choice(&self, value: &str) -> Option<&'static ChoiceEntry> {
        self.choices.iter().find(|c| c.value == value)
    }

    /// Choices in display order
    ///
    /// An explicit `choice_order` wins; values it does not mention follow in
    /// declaration order. Without it, ordering hints sort the entries
    /// (unhinted last), and with no hints at all the declaration order stands.
    pub fn ordered_choices(&self) -> Vec<&'static ChoiceEntry> {
        let choices: &'static [ChoiceEntry] = self.choices;

        if let Some(order) = self.choice_order {
            let mut result: Vec<&'static ChoiceEntry> = order
                .iter()
                .filter_map(|value| choices.iter().find(|c| c.value == *value))
                .collect();
            for choice in choices {
                if !order.contains(&choice.value) {
                    result.push(choice);
                }
            }
            return result;
        }

        let mut result: Vec<&'static ChoiceEntry> = choices.iter().collect();
        if result.iter().any(|c| c.order.is_some()) {
            result.sort_by_key(|c| c.order.unwrap_or(i32::MAX));
        }
        result
    }
}
