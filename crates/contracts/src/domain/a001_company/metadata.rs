use crate::shared::metadata::{
    ChoiceEntry, EntityMetadataInfo, EntityUiMetadata, FieldKind, FieldMetadata,
};

pub const INDUSTRIES: &[ChoiceEntry] = &[
    ChoiceEntry::new("technology", "Technology"),
    ChoiceEntry::new("finance", "Finance"),
    ChoiceEntry::new("healthcare", "Healthcare"),
    ChoiceEntry::new("retail", "Retail"),
    ChoiceEntry::new("manufacturing", "Manufacturing"),
    ChoiceEntry::new("other", "Other"),
];

pub const SIZES: &[ChoiceEntry] = &[
    ChoiceEntry::new("startup", "Startup").described("Fewer than 10 employees"),
    ChoiceEntry::new("small", "Small").described("10 to 49 employees"),
    ChoiceEntry::new("medium", "Medium").described("50 to 249 employees"),
    ChoiceEntry::new("enterprise", "Enterprise").described("250 employees or more"),
];

pub static ENTITY_METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_index: "a001",
    entity_name: "Company",
    collection_name: "company",
    table_name: "a001_company",
    api_endpoint: "companies",
    default_sort_field: None,
    ui: EntityUiMetadata {
        element_name: None,
        list_name: Some("Companies"),
        icon: Some("building"),
    },
};

pub static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::new("id", FieldKind::Integer)
        .identifier()
        .label("ID")
        .sortable()
        .column_width(80),
    FieldMetadata::new("name", FieldKind::Text)
        .required()
        .max_length(200)
        .sortable()
        .searchable(),
    FieldMetadata::new("industry", FieldKind::SingleChoice)
        .choices(INDUSTRIES)
        .groupable()
        .sortable()
        .filterable(),
    FieldMetadata::new("size", FieldKind::SingleChoice)
        .label("Company Size")
        .choices(SIZES)
        .groupable()
        .filterable(),
    FieldMetadata::new("annual_revenue", FieldKind::Decimal)
        .min_value(0.0)
        .unit("USD")
        .groupable()
        .sortable(),
    FieldMetadata::new("website", FieldKind::Text)
        .max_length(255)
        .placeholder("https://")
        .searchable()
        .hidden_in_list()
        .modal_exclude(),
    FieldMetadata::new("description", FieldKind::LongText)
        .hidden_in_list()
        .modal_exclude(),
    FieldMetadata::new("created_at", FieldKind::DateTime)
        .timestamp()
        .sortable(),
    FieldMetadata::new("updated_at", FieldKind::DateTime).timestamp(),
];
