//! Metadata types for describing CRM entity types
//!
//! Every entity type declares its metadata as `'static` constants
//! (`ENTITY_METADATA` + `FIELDS` in its domain module). The backend turns
//! those declarations into [`ModelMetadata`] and derives forms, dropdowns and
//! grouping behavior from them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::domain::a001_company::Company;
//! use contracts::shared::metadata::{EntityRef, ModelMetadata};
//!
//! let meta = ModelMetadata::from_entity(EntityRef::of::<Company>());
//! for field in meta.groupable_fields() {
//!     println!("{}: {}", field.name, field.display_label());
//! }
//! ```

mod field_type;
mod model;
mod record;
mod types;
mod validation;

pub use field_type::{Capability, FieldKind, FieldSource, FormInclusion};
pub use model::{
    pluralize, singularize, title_case, DetailField, DisplayConfig, EntityDescriptor, EntityRef,
    FormInclusionMode, ListColumn, ModelMetadata, MAX_LIST_COLUMNS,
};
pub use record::{resolve_path, FieldValue, Record};
pub use types::{ChoiceEntry, EntityMetadataInfo, EntityUiMetadata, FieldMetadata, FieldUiMetadata};
pub use validation::ValidationRules;
