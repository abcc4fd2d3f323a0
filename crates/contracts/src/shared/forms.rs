//! Form definitions derived from field metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metadata::FieldKind;

/// Which form is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Create / edit page
    #[default]
    Full,
    /// Quick-create modal
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    TextArea,
    Select,
    Number,
    DatePicker,
    DateTimePicker,
    Checkbox,
    ReferenceSelect,
}

/// Validator attached to a form field
///
/// Every field carries exactly one of `Required` / `Optional`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validator {
    Required,
    Optional,
    Length { max: usize },
    NumberRange { min: Option<f64>, max: Option<f64> },
    Choice { allowed: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Render hints passed to the template layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub widget: Widget,
    pub required: bool,
    pub validators: Vec<Validator>,
    pub choices: Vec<ChoiceOption>,
    pub placeholder: String,
    pub attrs: RenderAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_entity: Option<String>,
}

impl FieldDefinition {
    pub fn has_validator(&self, predicate: impl Fn(&Validator) -> bool) -> bool {
        self.validators.iter().any(predicate)
    }
}

/// Per-field validation messages of a submitted form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_serializes_tagged() {
        let json = serde_json::to_value(Validator::Length { max: 200 }).unwrap();
        assert_eq!(json["type"], "length");
        assert_eq!(json["max"], 200);
    }

    #[test]
    fn test_form_errors_collects_per_field() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());
        errors.add("name", "Name is required");
        errors.add("name", "Name must be at most 3 characters");
        assert_eq!(errors.get("name").map(|m| m.len()), Some(2));
        assert!(errors.get("stage").is_none());
    }
}
