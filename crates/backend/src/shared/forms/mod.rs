//! Form schemas derived from field metadata

pub mod builder;
pub mod validation;

pub use builder::{build_field, build_form_schema};
pub use validation::validate_submission;
