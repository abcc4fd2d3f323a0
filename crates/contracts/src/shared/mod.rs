pub mod dropdown;
pub mod forms;
pub mod grouping;
pub mod metadata;
pub mod query;
