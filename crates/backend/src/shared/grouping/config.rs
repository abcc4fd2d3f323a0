//! Grouping configurations
//!
//! A configuration says how to bucket a collection for one `group_by` key:
//! the field path to read, the default bucket for missing values, an optional
//! value-range table and an optional explicit key order. Entity types declare
//! configurations explicitly; any other groupable field gets one derived from
//! its metadata.

use std::collections::HashMap;

use contracts::shared::metadata::{FieldKind, ModelMetadata};

pub const DEFAULT_BUCKET_KEY: &str = "Other";
pub const DEFAULT_BUCKET_LABEL: &str = "Other";

/// One row of a value-range table: values `>= minimum` land in `key`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRange {
    pub minimum: f64,
    pub key: String,
    pub label: String,
}

impl ValueRange {
    pub fn new(minimum: f64, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            minimum,
            key: key.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingConfig {
    /// `field` or `relation.field`
    pub field_path: String,
    pub default_key: String,
    pub default_label: String,
    pub ranges: Vec<ValueRange>,
    /// Explicit group order; groups it does not name follow alphabetically
    pub order: Option<Vec<String>>,
    /// Labels by group key
    pub labels: HashMap<String, String>,
}

impl GroupingConfig {
    pub fn new(field_path: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            default_key: DEFAULT_BUCKET_KEY.to_string(),
            default_label: DEFAULT_BUCKET_LABEL.to_string(),
            ranges: Vec::new(),
            order: None,
            labels: HashMap::new(),
        }
    }

    pub fn default_bucket(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.default_key = key.into();
        self.default_label = label.into();
        self
    }

    pub fn ranges(mut self, ranges: Vec<ValueRange>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn order<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(key.into(), label.into());
        self
    }

    /// Bucket of a numeric value; thresholds are scanned highest first and
    /// the first one the value reaches wins
    pub fn range_for(&self, value: f64) -> Option<&ValueRange> {
        let mut ranges: Vec<&ValueRange> = self.ranges.iter().collect();
        ranges.sort_by(|a, b| b.minimum.total_cmp(&a.minimum));
        ranges.into_iter().find(|r| value >= r.minimum)
    }

    pub fn label_for(&self, key: &str) -> String {
        if key == self.default_key {
            return self.default_label.clone();
        }
        if let Some(range) = self.ranges.iter().find(|r| r.key == key) {
            return range.label.clone();
        }
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Explicit grouping configurations of one entity type, by `group_by` key
#[derive(Debug, Clone, Default)]
pub struct GroupingConfigs {
    configs: HashMap<String, GroupingConfig>,
}

impl GroupingConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, group_by: impl Into<String>, config: GroupingConfig) -> Self {
        self.configs.insert(group_by.into(), config);
        self
    }

    pub fn get(&self, group_by: &str) -> Option<&GroupingConfig> {
        self.configs.get(group_by)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }
}

/// Configuration for `group_by`: explicit first, then derived from metadata
pub fn resolve_config(
    group_by: &str,
    configs: &GroupingConfigs,
    meta: &ModelMetadata,
) -> Option<GroupingConfig> {
    let group_by = group_by.trim();
    if group_by.is_empty() {
        return None;
    }
    if let Some(config) = configs.get(group_by) {
        return Some(config.clone());
    }
    derive_config(group_by, meta)
}

fn derive_config(group_by: &str, meta: &ModelMetadata) -> Option<GroupingConfig> {
    match group_by.split('.').collect::<Vec<_>>().as_slice() {
        [name] => {
            let field = meta.field(name).filter(|f| f.groupable)?;
            let config = match field.kind {
                FieldKind::SingleChoice => {
                    let choices = field.ordered_choices();
                    let base = GroupingConfig::new(field.name)
                        .order(choices.iter().map(|c| c.value))
                        .default_bucket(
                            DEFAULT_BUCKET_KEY,
                            format!("No {}", field.display_label()),
                        );
                    choices.iter().fold(base, |config, choice| {
                        config.label(choice.value, choice.display_label())
                    })
                }
                // Group by the related entity's name, not its id
                FieldKind::Reference => {
                    GroupingConfig::new(format!("{}.name", field.name)).default_bucket(
                        DEFAULT_BUCKET_KEY,
                        format!("No {}", field.display_label()),
                    )
                }
                _ => GroupingConfig::new(field.name),
            };
            Some(config)
        }
        [relation, attribute] if !attribute.trim().is_empty() => {
            let field = meta
                .field(relation)
                .filter(|f| f.groupable && f.kind == FieldKind::Reference)?;
            Some(
                GroupingConfig::new(format!("{}.{}", field.name, attribute.trim())).default_bucket(
                    DEFAULT_BUCKET_KEY,
                    format!("No {}", field.display_label()),
                ),
            )
        }
        _ => None,
    }
}
