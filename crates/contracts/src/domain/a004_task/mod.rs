pub mod aggregate;
mod metadata;

pub use aggregate::Task;
pub use metadata::{ENTITY_METADATA, FIELDS, PRIORITIES, STATUSES};
