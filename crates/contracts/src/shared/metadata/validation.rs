//! Validation rules for metadata fields

use serde::Serialize;

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub const fn has_range(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} is required", field_label));
        }

        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Err(format!(
                    "{} must be at most {} characters",
                    field_label, max
                ));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} must be at most {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("   ", "Name").is_err());
        assert!(rules.validate_string("Acme", "Name").is_ok());
    }

    #[test]
    fn test_max_length_counts_chars() {
        let rules = ValidationRules {
            max_length: Some(3),
            ..ValidationRules::none()
        };
        assert!(rules.validate_string("äöü", "Code").is_ok());
        assert!(rules.validate_string("abcd", "Code").is_err());
    }

    #[test]
    fn test_number_bounds_are_inclusive() {
        let rules = ValidationRules {
            min: Some(0.0),
            max: Some(100.0),
            ..ValidationRules::none()
        };
        assert!(rules.validate_number(0.0, "Probability").is_ok());
        assert!(rules.validate_number(100.0, "Probability").is_ok());
        assert!(rules.validate_number(100.5, "Probability").is_err());
        assert!(rules.validate_number(-1.0, "Probability").is_err());
    }
}
