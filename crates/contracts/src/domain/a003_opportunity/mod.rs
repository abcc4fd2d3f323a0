pub mod aggregate;
mod metadata;

pub use aggregate::Opportunity;
pub use metadata::{ENTITY_METADATA, FIELDS, STAGES};
