use std::collections::HashMap;

use contracts::shared::grouping::EntityGroup;
use contracts::shared::metadata::{resolve_path, ModelMetadata, Record};

use super::config::{resolve_config, GroupingConfig, GroupingConfigs};

pub const ALL_GROUP_KEY: &str = "all";

/// Entity-specific grouping; `None` hands over to configuration-based grouping
///
/// Always consulted first. Receives `""` when no `group_by` was requested.
pub type CustomGrouper<'a, T> = &'a dyn Fn(&[T], &str) -> Option<Vec<EntityGroup<T>>>;

/// Group `entities` for `group_by`
///
/// A custom grouper result is used verbatim, with or without `group_by`.
/// Otherwise the grouping configuration is resolved; without one all entities
/// land in a single `all` group. Every entity ends up in exactly one group.
pub fn group<T: Record + Clone>(
    entities: &[T],
    group_by: Option<&str>,
    meta: &ModelMetadata,
    configs: &GroupingConfigs,
    custom_grouper: Option<CustomGrouper<'_, T>>,
) -> Vec<EntityGroup<T>> {
    let group_by = group_by.map(str::trim).unwrap_or("");

    if let Some(grouper) = custom_grouper {
        if let Some(groups) = grouper(entities, group_by) {
            return groups;
        }
    }

    if group_by.is_empty() {
        return vec![all_group(entities, meta)];
    }

    match resolve_config(group_by, configs, meta) {
        Some(config) => group_with_config(entities, &config),
        None => {
            tracing::debug!(
                "No grouping configuration for {}.{}, returning one group",
                meta.entity_name,
                group_by
            );
            vec![all_group(entities, meta)]
        }
    }
}

/// Bucket entities by a resolved configuration
pub fn group_with_config<T: Record + Clone>(
    entities: &[T],
    config: &GroupingConfig,
) -> Vec<EntityGroup<T>> {
    let mut buckets: HashMap<String, Vec<T>> = HashMap::new();
    for entity in entities {
        let key = bucket_key(entity, config);
        buckets.entry(key).or_default().push(entity.clone());
    }

    let mut keys: Vec<String> = Vec::with_capacity(buckets.len());
    if let Some(order) = &config.order {
        for key in order {
            if buckets.contains_key(key) && !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    let mut rest: Vec<String> = buckets
        .keys()
        .filter(|k| !keys.contains(k))
        .cloned()
        .collect();
    rest.sort();
    keys.extend(rest);

    keys.into_iter()
        .filter_map(|key| {
            let entities = buckets.remove(&key)?;
            let label = config.label_for(&key);
            Some(EntityGroup::new(key, label, entities))
        })
        .collect()
}

fn bucket_key<T: Record>(entity: &T, config: &GroupingConfig) -> String {
    let value = resolve_path(entity, &config.field_path);

    if !config.ranges.is_empty() {
        return value
            .as_f64()
            .and_then(|v| config.range_for(v))
            .map(|range| range.key.clone())
            .unwrap_or_else(|| config.default_key.clone());
    }

    value
        .group_key()
        .unwrap_or_else(|| config.default_key.clone())
}

fn all_group<T: Clone>(entities: &[T], meta: &ModelMetadata) -> EntityGroup<T> {
    EntityGroup::new(
        ALL_GROUP_KEY,
        format!("All {}", meta.display_name_plural),
        entities.to_vec(),
    )
}
