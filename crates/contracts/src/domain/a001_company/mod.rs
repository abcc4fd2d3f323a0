pub mod aggregate;
mod metadata;

pub use aggregate::Company;
pub use metadata::{ENTITY_METADATA, FIELDS, INDUSTRIES, SIZES};
