use crate::shared::metadata::{
    ChoiceEntry, EntityMetadataInfo, EntityUiMetadata, FieldKind, FieldMetadata,
};

/// Pipeline stages, in pipeline order
pub const STAGES: &[ChoiceEntry] = &[
    ChoiceEntry::new("open", "Open"),
    ChoiceEntry::new("proposal", "Proposal"),
    ChoiceEntry::new("negotiation", "Negotiation"),
    ChoiceEntry::new("won", "Won").described("Closed with a signed deal"),
    ChoiceEntry::new("lost", "Lost"),
];

pub static ENTITY_METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_index: "a003",
    entity_name: "Opportunity",
    collection_name: "opportunity",
    table_name: "a003_opportunity",
    api_endpoint: "opportunities",
    default_sort_field: None,
    ui: EntityUiMetadata {
        element_name: None,
        list_name: None,
        icon: Some("briefcase"),
    },
};

pub static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::new("id", FieldKind::Integer)
        .identifier()
        .label("ID")
        .sortable(),
    FieldMetadata::new("name", FieldKind::Text)
        .required()
        .max_length(200)
        .sortable()
        .searchable(),
    FieldMetadata::new("company", FieldKind::Reference)
        .column("company_id")
        .references("companies")
        .groupable()
        .filterable(),
    FieldMetadata::new("stage", FieldKind::SingleChoice)
        .required()
        .choices(STAGES)
        .groupable()
        .sortable()
        .filterable(),
    FieldMetadata::new("value", FieldKind::Decimal)
        .label("Deal Value")
        .min_value(0.0)
        .unit("USD")
        .groupable()
        .sortable(),
    FieldMetadata::new("probability", FieldKind::Integer)
        .min_value(0.0)
        .max_value(100.0)
        .unit("%")
        .help("Estimated chance of closing")
        .sortable(),
    FieldMetadata::new("expected_close_date", FieldKind::Date)
        .groupable()
        .sortable(),
    FieldMetadata::new("description", FieldKind::LongText)
        .hidden_in_list()
        .modal_exclude(),
    FieldMetadata::new("created_at", FieldKind::DateTime)
        .timestamp()
        .sortable(),
    FieldMetadata::new("updated_at", FieldKind::DateTime).timestamp(),
];
