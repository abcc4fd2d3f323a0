use serde::Serialize;

/// One bucket of a grouped collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityGroup<T> {
    pub key: String,
    pub label: String,
    pub entities: Vec<T>,
    pub count: usize,
}

impl<T> EntityGroup<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, entities: Vec<T>) -> Self {
        let count = entities.len();
        Self {
            key: key.into(),
            label: label.into(),
            entities,
            count,
        }
    }
}

/// Grouped list response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedList<T> {
    pub group_by: Option<String>,
    pub total: usize,
    pub groups: Vec<EntityGroup<T>>,
}

impl<T> GroupedList<T> {
    pub fn new(group_by: Option<String>, groups: Vec<EntityGroup<T>>) -> Self {
        let total = groups.iter().map(|g| g.count).sum();
        Self {
            group_by,
            total,
            groups,
        }
    }

    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.groups.iter().map(|g| (g.key.as_str(), g.count)).collect()
    }
}
