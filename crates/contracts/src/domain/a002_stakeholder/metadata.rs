use crate::shared::metadata::{
    ChoiceEntry, EntityMetadataInfo, EntityUiMetadata, FieldKind, FieldMetadata,
};

pub const INFLUENCE_LEVELS: &[ChoiceEntry] = &[
    ChoiceEntry::new("high", "High").described("Decision maker"),
    ChoiceEntry::new("medium", "Medium").described("Shapes the decision"),
    ChoiceEntry::new("low", "Low"),
];

pub static ENTITY_METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_index: "a002",
    entity_name: "Stakeholder",
    collection_name: "stakeholder",
    table_name: "a002_stakeholder",
    api_endpoint: "stakeholders",
    default_sort_field: None,
    ui: EntityUiMetadata {
        element_name: None,
        list_name: None,
        icon: Some("user"),
    },
};

pub static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::new("id", FieldKind::Integer)
        .identifier()
        .label("ID")
        .sortable(),
    FieldMetadata::new("name", FieldKind::Text)
        .required()
        .max_length(150)
        .sortable()
        .searchable(),
    FieldMetadata::new("email", FieldKind::Text)
        .max_length(254)
        .placeholder("name@company.com")
        .searchable(),
    FieldMetadata::new("job_title", FieldKind::Text)
        .max_length(120)
        .searchable(),
    FieldMetadata::new("company", FieldKind::Reference)
        .column("company_id")
        .references("companies")
        .groupable()
        .filterable(),
    FieldMetadata::new("influence", FieldKind::SingleChoice)
        .choices(INFLUENCE_LEVELS)
        .groupable()
        .sortable()
        .filterable(),
    FieldMetadata::new("phone", FieldKind::Text)
        .max_length(40)
        .hidden_in_list()
        .modal_exclude(),
    FieldMetadata::new("notes", FieldKind::LongText)
        .hidden_in_list()
        .modal_exclude(),
    FieldMetadata::new("created_at", FieldKind::DateTime).timestamp(),
    FieldMetadata::new("updated_at", FieldKind::DateTime).timestamp(),
];
