pub mod config;
pub mod data;
pub mod dropdown;
pub mod error;
pub mod format;
pub mod forms;
pub mod grouping;
pub mod metadata;
pub mod query;
