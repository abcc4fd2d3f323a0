use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use contracts::shared::forms::{FieldDefinition, FormErrors, Validator};
use contracts::shared::metadata::{FieldKind, ValidationRules};

/// Check submitted raw values against a form schema
///
/// Missing keys count as empty strings. Fields outside the schema are ignored.
pub fn validate_submission(
    schema: &[FieldDefinition],
    values: &HashMap<String, String>,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    for field in schema {
        let raw = values.get(&field.name).map(String::as_str).unwrap_or("");
        if let Err(message) = validate_field(field, raw) {
            errors.add(&field.name, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!("Form submission rejected: {:?}", errors.errors);
        Err(errors)
    }
}

fn validate_field(field: &FieldDefinition, raw: &str) -> Result<(), String> {
    let rules = rules_of(field);
    let value = raw.trim();

    rules.validate_string(raw, &field.label)?;
    if value.is_empty() {
        return Ok(());
    }

    match field.kind {
        FieldKind::Integer => {
            let number = value
                .parse::<i64>()
                .map_err(|_| format!("{} must be a whole number", field.label))?;
            rules.validate_number(number as f64, &field.label)?;
        }
        FieldKind::Decimal => {
            let number = value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| format!("{} must be a number", field.label))?;
            rules.validate_number(number, &field.label)?;
        }
        FieldKind::Date => {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| format!("{} must be a date (YYYY-MM-DD)", field.label))?;
        }
        FieldKind::DateTime => {
            let valid = DateTime::parse_from_rfc3339(value).is_ok()
                || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
                || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok();
            if !valid {
                return Err(format!("{} must be a date and time", field.label));
            }
        }
        FieldKind::Boolean => {
            if !matches!(value, "true" | "false" | "on" | "off" | "1" | "0") {
                return Err(format!("{} must be true or false", field.label));
            }
        }
        FieldKind::Reference => {
            value
                .parse::<i64>()
                .map_err(|_| format!("{} must reference an existing record", field.label))?;
        }
        FieldKind::Text | FieldKind::LongText | FieldKind::SingleChoice => {}
    }

    for validator in &field.validators {
        if let Validator::Choice { allowed } = validator {
            if !allowed.iter().any(|a| a == value) {
                return Err(format!("{} must be one of the listed options", field.label));
            }
        }
    }

    Ok(())
}

/// Collect the definition's validators back into validation rules
fn rules_of(field: &FieldDefinition) -> ValidationRules {
    field
        .validators
        .iter()
        .fold(ValidationRules::none(), |rules, validator| match validator {
            Validator::Required => ValidationRules {
                required: true,
                ..rules
            },
            Validator::Optional => rules,
            Validator::Length { max } => ValidationRules {
                max_length: Some(*max),
                ..rules
            },
            Validator::NumberRange { min, max } => ValidationRules {
                min: *min,
                max: *max,
                ..rules
            },
            Validator::Choice { .. } => rules,
        })
}
