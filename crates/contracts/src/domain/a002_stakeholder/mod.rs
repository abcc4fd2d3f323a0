pub mod aggregate;
mod metadata;

pub use aggregate::Stakeholder;
pub use metadata::{ENTITY_METADATA, FIELDS, INFLUENCE_LEVELS};
