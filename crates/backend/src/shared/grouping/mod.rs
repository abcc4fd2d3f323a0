//! Grouping of loaded entity collections

pub mod config;
pub mod grouper;

pub use config::{resolve_config, GroupingConfig, GroupingConfigs, ValueRange};
pub use grouper::{group, group_with_config, CustomGrouper};
