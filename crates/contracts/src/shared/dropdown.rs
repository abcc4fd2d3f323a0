use serde::{Deserialize, Serialize};

use super::metadata::DisplayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Options of one dropdown plus its current selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownConfig {
    pub options: Vec<DropdownOption>,
    pub current_value: Option<String>,
    pub placeholder: String,
}

impl DropdownConfig {
    pub fn values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }
}

/// Filter dropdown of one choice field; the leading empty value means "all"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDropdown {
    pub field: String,
    pub label: String,
    pub options: Vec<DropdownOption>,
    pub current_values: Vec<String>,
    pub placeholder: String,
}

/// Everything the list view needs to render its controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiContext {
    pub group_by: DropdownConfig,
    pub sort_by: DropdownConfig,
    pub sort_direction: DropdownConfig,
    pub filters: Vec<FilterDropdown>,
    pub search: Option<String>,
    pub display: DisplayConfig,
}
