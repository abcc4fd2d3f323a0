//! Attribute access on loaded entities
//!
//! The engine never sees concrete entity structs; it reads attributes through
//! [`Record`], including one relationship hop for dotted paths.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Value of one entity attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view used by value-range bucketing
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Key used for grouping and filter matching; `None` for null or blank
    pub fn group_key(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Integer(i) => Some(i.to_string()),
            Self::Decimal(d) => {
                if d.fract() == 0.0 && d.abs() < 1e15 {
                    Some(format!("{}", *d as i64))
                } else {
                    Some(d.to_string())
                }
            }
            Self::Boolean(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Some(dt.to_rfc3339()),
        }
    }

    pub fn matches_any(&self, values: &[String]) -> bool {
        match self.group_key() {
            Some(key) => values.iter().any(|v| v == &key),
            None => false,
        }
    }

    pub fn contains_text(&self, needle_lower: &str) -> bool {
        match self {
            Self::Text(s) => s.to_lowercase().contains(needle_lower),
            _ => false,
        }
    }

    /// Ordering for in-memory sorts; nulls first, numbers across kinds
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => a.group_key().cmp(&b.group_key()),
            },
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Attribute access on a loaded entity
pub trait Record {
    /// Value of an attribute; `Null` for unknown names
    fn value(&self, field: &str) -> FieldValue;

    /// Loaded related entity for a relationship field
    fn related(&self, _relation: &str) -> Option<&dyn Record> {
        None
    }
}

/// Resolve `field` or `relation.field`; anything deeper or malformed is null
pub fn resolve_path<R: Record + ?Sized>(record: &R, path: &str) -> FieldValue {
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return FieldValue::Null;
    }

    match segments.as_slice() {
        [field] => record.value(field),
        [relation, field] => record
            .related(relation)
            .map(|related| related.value(field))
            .unwrap_or(FieldValue::Null),
        _ => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parent {
        name: String,
    }

    impl Record for Parent {
        fn value(&self, field: &str) -> FieldValue {
            match field {
                "name" => self.name.as_str().into(),
                _ => FieldValue::Null,
            }
        }
    }

    struct Child {
        amount: f64,
        parent: Option<Parent>,
    }

    impl Record for Child {
        fn value(&self, field: &str) -> FieldValue {
            match field {
                "amount" => self.amount.into(),
                _ => FieldValue::Null,
            }
        }

        fn related(&self, relation: &str) -> Option<&dyn Record> {
            match relation {
                "parent" => self.parent.as_ref().map(|p| p as &dyn Record),
                _ => None,
            }
        }
    }

    #[test]
    fn test_resolve_one_hop() {
        let child = Child {
            amount: 10.0,
            parent: Some(Parent {
                name: "Acme".into(),
            }),
        };
        assert_eq!(resolve_path(&child, "amount"), FieldValue::Decimal(10.0));
        assert_eq!(resolve_path(&child, "parent.name"), FieldValue::Text("Acme".into()));
    }

    #[test]
    fn test_malformed_paths_are_null() {
        let child = Child {
            amount: 1.0,
            parent: None,
        };
        assert!(resolve_path(&child, "parent.name").is_null());
        assert!(resolve_path(&child, "parent..name").is_null());
        assert!(resolve_path(&child, "a.b.c").is_null());
        assert!(resolve_path(&child, "").is_null());
        assert!(resolve_path(&child, "unknown").is_null());
    }

    #[test]
    fn test_group_key() {
        assert_eq!(FieldValue::Decimal(1500.0).group_key(), Some("1500".into()));
        assert_eq!(FieldValue::Text("  ".into()).group_key(), None);
        assert_eq!(FieldValue::Boolean(true).group_key(), Some("true".into()));
        assert_eq!(FieldValue::Null.group_key(), None);
    }

    #[test]
    fn test_sort_cmp_mixed_numbers() {
        assert_eq!(
            FieldValue::Integer(2).sort_cmp(&FieldValue::Decimal(1.5)),
            Ordering::Greater
        );
        assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::Integer(0)), Ordering::Less);
    }
}
