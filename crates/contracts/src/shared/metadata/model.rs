//! Aggregate metadata of one entity type
//!
//! `ModelMetadata` is built once from an entity's static declaration and is
//! immutable afterwards. Everything beyond the declared fields is derived on
//! demand.

use serde::Serialize;

use super::field_type::{Capability, FieldKind, FieldSource, FormInclusion};
use super::types::{EntityMetadataInfo, FieldMetadata};

/// Number of columns a list view shows at most
pub const MAX_LIST_COLUMNS: usize = 6;

// ============================================================================
// Entity handle
// ============================================================================

/// Static metadata source of an entity type
pub trait EntityDescriptor {
    fn entity_metadata_info() -> &'static EntityMetadataInfo;
    fn field_metadata() -> &'static [FieldMetadata];
}

/// Handle to the declaration of one entity type
#[derive(Debug, Clone, Copy)]
pub struct EntityRef {
    pub info: &'static EntityMetadataInfo,
    pub fields: &'static [FieldMetadata],
}

impl EntityRef {
    pub const fn new(info: &'static EntityMetadataInfo, fields: &'static [FieldMetadata]) -> Self {
        Self { info, fields }
    }

    pub fn of<T: EntityDescriptor>() -> Self {
        Self::new(T::entity_metadata_info(), T::field_metadata())
    }

    pub fn entity_name(&self) -> &'static str {
        self.info.entity_name
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.info, other.info)
    }
}

impl Eq for EntityRef {}

// ============================================================================
// Model metadata
// ============================================================================

/// Whether form inclusion is opt-in or opt-out for an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormInclusionMode {
    Whitelist,
    Blacklist,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    #[serde(skip)]
    pub entity_ref: EntityRef,
    pub entity_index: &'static str,
    pub entity_name: &'static str,
    pub display_name_singular: String,
    pub display_name_plural: String,
    pub api_endpoint: String,
    pub default_sort_field: String,
    pub fields: Vec<FieldMetadata>,
}

impl ModelMetadata {
    /// Build metadata from an entity declaration
    pub fn from_entity(entity_ref: EntityRef) -> Self {
        let info = entity_ref.info;
        let fields = entity_ref.fields.to_vec();

        debug_assert!(
            fields
                .iter()
                .all(|f| f.choices.is_empty() || f.kind == FieldKind::SingleChoice),
            "choices declared on a non-choice field of {}",
            info.entity_name
        );

        let display_name_singular = info
            .ui
            .element_name
            .map(str::to_string)
            .unwrap_or_else(|| title_case(info.entity_name));
        let display_name_plural = info
            .ui
            .list_name
            .map(str::to_string)
            .unwrap_or_else(|| pluralize(&display_name_singular));

        let default_sort_field = match info.default_sort_field {
            Some(field) => field.to_string(),
            None if fields.iter().any(|f| f.name == "name") => "name".to_string(),
            None => fields
                .iter()
                .find(|f| f.source == FieldSource::Identifier)
                .map(|f| f.name)
                .unwrap_or("id")
                .to_string(),
        };

        Self {
            entity_ref,
            entity_index: info.entity_index,
            entity_name: info.entity_name,
            display_name_singular,
            display_name_plural,
            api_endpoint: info.api_endpoint.to_string(),
            default_sort_field,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn identifier_field(&self) -> Option<&FieldMetadata> {
        self.fields
            .iter()
            .find(|f| f.source == FieldSource::Identifier)
            .or_else(|| self.field("id"))
    }

    pub fn fields_with(&self, capability: Capability) -> Vec<&FieldMetadata> {
        self.fields.iter().filter(|f| f.has(capability)).collect()
    }

    pub fn groupable_fields(&self) -> Vec<&FieldMetadata> {
        self.fields_with(Capability::Groupable)
    }

    pub fn sortable_fields(&self) -> Vec<&FieldMetadata> {
        self.fields_with(Capability::Sortable)
    }

    pub fn filterable_fields(&self) -> Vec<&FieldMetadata> {
        self.fields_with(Capability::Filterable)
    }

    pub fn searchable_fields(&self) -> Vec<&FieldMetadata> {
        self.fields_with(Capability::Searchable)
    }

    /// Whitelist as soon as any field opts in explicitly
    pub fn form_inclusion_mode(&self) -> FormInclusionMode {
        if self.fields.iter().any(|f| f.ui.form == FormInclusion::Include) {
            FormInclusionMode::Whitelist
        } else {
            FormInclusionMode::Blacklist
        }
    }

    /// Fields eligible for the full create/edit form, declaration order
    pub fn form_fields(&self) -> Vec<&FieldMetadata> {
        let mode = self.form_inclusion_mode();
        self.fields
            .iter()
            .filter(|f| !f.is_system())
            .filter(|f| match mode {
                FormInclusionMode::Whitelist => f.ui.form == FormInclusion::Include,
                FormInclusionMode::Blacklist => f.ui.form != FormInclusion::Exclude,
            })
            .collect()
    }

    pub fn list_display_fields(&self) -> Vec<&FieldMetadata> {
        self.fields
            .iter()
            .filter(|f| f.ui.visible_in_list && f.source != FieldSource::Timestamp)
            .take(MAX_LIST_COLUMNS)
            .collect()
    }

    pub fn display_config(&self) -> DisplayConfig {
        let title_field = if self.has_field("name") {
            "name".to_string()
        } else {
            self.fields
                .iter()
                .find(|f| !f.is_system() && f.kind == FieldKind::Text)
                .or_else(|| self.identifier_field())
                .map(|f| f.name.to_string())
                .unwrap_or_else(|| "id".to_string())
        };

        let list_columns = self
            .list_display_fields()
            .into_iter()
            .map(|f| ListColumn {
                field: f.name.to_string(),
                label: f.display_label().into_owned(),
                sortable: f.sortable,
                width: f.ui.column_width,
                unit: f.ui.unit.map(str::to_string),
            })
            .collect();

        let detail_fields = self
            .fields
            .iter()
            .filter(|f| f.source != FieldSource::Identifier)
            .map(|f| DetailField {
                field: f.name.to_string(),
                label: f.display_label().into_owned(),
                kind: f.kind,
                unit: f.ui.unit.map(str::to_string),
                help: f.ui.help.map(str::to_string),
            })
            .collect();

        DisplayConfig {
            title_field,
            list_columns,
            detail_fields,
        }
    }
}

// ============================================================================
// Display configuration
// ============================================================================

/// List and detail display configuration of an entity type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayConfig {
    pub title_field: String,
    pub list_columns: Vec<ListColumn>,
    pub detail_fields: Vec<DetailField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListColumn {
    pub field: String,
    pub label: String,
    pub sortable: bool,
    pub width: Option<u32>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub field: String,
    pub label: String,
    pub kind: FieldKind,
    pub unit: Option<String>,
    pub help: Option<String>,
}

// ============================================================================
// Naming helpers
// ============================================================================

/// "expected_close_date" -> "Expected Close Date"
pub fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Regular English plural: consonant+y -> ies, sibilants -> es, else s
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('y') && !ends_with_vowel_y(&lower) {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

/// Inverse of [`pluralize`] for regular plurals
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if ["ses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with('s') && !lower.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

fn ends_with_vowel_y(lower: &str) -> bool {
    let mut chars = lower.chars().rev();
    chars.next();
    matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::{ChoiceEntry, EntityUiMetadata};

    static INFO: EntityMetadataInfo = EntityMetadataInfo {
        entity_index: "t001",
        entity_name: "Widget",
        collection_name: "widget",
        table_name: "t001_widget",
        api_endpoint: "widgets",
        default_sort_field: None,
        ui: EntityUiMetadata {
            element_name: None,
            list_name: None,
            icon: None,
        },
    };

    const STATES: &[ChoiceEntry] = &[ChoiceEntry::new("on", "On"), ChoiceEntry::new("off", "Off")];

    static FIELDS: &[FieldMetadata] = &[
        FieldMetadata::new("id", FieldKind::Integer).identifier().sortable(),
        FieldMetadata::new("name", FieldKind::Text).required().sortable().searchable(),
        FieldMetadata::new("state", FieldKind::SingleChoice)
            .choices(STATES)
            .groupable()
            .filterable(),
        FieldMetadata::new("a", FieldKind::Text),
        FieldMetadata::new("b", FieldKind::Text),
        FieldMetadata::new("c", FieldKind::Text),
        FieldMetadata::new("d", FieldKind::Text),
        FieldMetadata::new("e", FieldKind::Text).exclude_from_form(),
        FieldMetadata::new("created_at", FieldKind::DateTime).timestamp(),
    ];

    fn model() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::new(&INFO, FIELDS))
    }

    #[test]
    fn test_display_names_from_rules() {
        let meta = model();
        assert_eq!(meta.display_name_singular, "Widget");
        assert_eq!(meta.display_name_plural, "Widgets");
        assert_eq!(meta.default_sort_field, "name");
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("Opportunity"), "Opportunities");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Task"), "Tasks");
        assert_eq!(singularize("opportunities"), "opportunity");
        assert_eq!(singularize("tasks"), "task");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("address"), "address");
    }

    #[test]
    fn test_list_display_is_capped() {
        let meta = model();
        let names: Vec<_> = meta.list_display_fields().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), MAX_LIST_COLUMNS);
        assert_eq!(names, vec!["id", "name", "state", "a", "b", "c"]);
    }

    #[test]
    fn test_capability_sets_are_independent() {
        let meta = model();
        let groupable: Vec<_> = meta.groupable_fields().iter().map(|f| f.name).collect();
        let sortable: Vec<_> = meta.sortable_fields().iter().map(|f| f.name).collect();
        assert_eq!(groupable, vec!["state"]);
        assert_eq!(sortable, vec!["id", "name"]);
        assert_eq!(meta.searchable_fields().len(), 1);
    }

    #[test]
    fn test_form_fields_blacklist_mode() {
        let meta = model();
        assert_eq!(meta.form_inclusion_mode(), FormInclusionMode::Blacklist);
        let names: Vec<_> = meta.form_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "state", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_display_config() {
        let config = model().display_config();
        assert_eq!(config.title_field, "name");
        assert_eq!(config.list_columns[1].label, "Name");
        assert!(config.detail_fields.iter().all(|f| f.field != "id"));
    }
}
