pub mod builder;

pub use builder::{build_dropdown, build_filter_dropdown, build_ui_context, direction_dropdown};
