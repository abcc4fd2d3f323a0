use crate::shared::metadata::{
    ChoiceEntry, EntityMetadataInfo, EntityUiMetadata, FieldKind, FieldMetadata,
};

pub const STATUSES: &[ChoiceEntry] = &[
    ChoiceEntry::new("todo", "To Do"),
    ChoiceEntry::new("in_progress", "In Progress"),
    ChoiceEntry::new("done", "Done"),
];

pub const PRIORITIES: &[ChoiceEntry] = &[
    ChoiceEntry::new("low", "Low"),
    ChoiceEntry::new("medium", "Medium"),
    ChoiceEntry::new("high", "High"),
];

pub static ENTITY_METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_index: "a004",
    entity_name: "Task",
    collection_name: "task",
    table_name: "a004_task",
    api_endpoint: "tasks",
    default_sort_field: Some("due_date"),
    ui: EntityUiMetadata {
        element_name: None,
        list_name: None,
        icon: Some("check-square"),
    },
};

// Tasks opt fields into forms explicitly; `completed` is toggled from the list
pub static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::new("id", FieldKind::Integer)
        .identifier()
        .label("ID")
        .sortable(),
    FieldMetadata::new("title", FieldKind::Text)
        .required()
        .max_length(200)
        .sortable()
        .searchable()
        .include_in_form(),
    FieldMetadata::new("description", FieldKind::LongText)
        .searchable()
        .hidden_in_list()
        .include_in_form()
        .modal_exclude(),
    FieldMetadata::new("status", FieldKind::SingleChoice)
        .required()
        .choices(STATUSES)
        .groupable()
        .sortable()
        .filterable()
        .include_in_form(),
    FieldMetadata::new("priority", FieldKind::SingleChoice)
        .choices(PRIORITIES)
        .choice_order(&["high", "medium", "low"])
        .groupable()
        .sortable()
        .filterable()
        .include_in_form(),
    FieldMetadata::new("due_date", FieldKind::Date)
        .groupable()
        .sortable()
        .include_in_form(),
    FieldMetadata::new("opportunity", FieldKind::Reference)
        .column("opportunity_id")
        .references("opportunities")
        .groupable()
        .filterable()
        .include_in_form()
        .modal_exclude(),
    FieldMetadata::new("completed", FieldKind::Boolean).sortable(),
    FieldMetadata::new("created_at", FieldKind::DateTime).timestamp(),
    FieldMetadata::new("updated_at", FieldKind::DateTime).timestamp(),
];
