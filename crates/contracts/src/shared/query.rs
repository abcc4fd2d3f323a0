use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parsed filter-array parameters: key -> ordered non-empty values
pub type FilterMap = BTreeMap<String, Vec<String>>;

/// Sort direction; anything that is not `desc` reads as ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Request parameters after normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedParams {
    pub group_by: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    /// Free-text search term (`q`)
    pub search: Option<String>,
    pub filters: FilterMap,
}

impl NormalizedParams {
    pub fn filter(&self, key: &str) -> Option<&[String]> {
        self.filters.get(key).map(Vec::as_slice)
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Serialize back to query pairs, filter arrays comma-joined
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(group_by) = &self.group_by {
            pairs.push(("group_by".to_string(), group_by.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by".to_string(), sort_by.clone()));
        }
        pairs.push((
            "sort_direction".to_string(),
            self.sort_direction.as_str().to_string(),
        ));
        if let Some(search) = &self.search {
            pairs.push(("q".to_string(), search.clone()));
        }
        for (key, values) in &self.filters {
            pairs.push((key.clone(), values.join(",")));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse(" DESC "), SortDirection::Desc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::parse(""), SortDirection::Asc);
    }

    #[test]
    fn test_query_pairs_join_filters() {
        let mut params = NormalizedParams {
            group_by: Some("stage".into()),
            ..Default::default()
        };
        params
            .filters
            .insert("stage".into(), vec!["won".into(), "lost".into()]);

        let pairs = params.to_query_pairs();
        assert!(pairs.contains(&("group_by".into(), "stage".into())));
        assert!(pairs.contains(&("stage".into(), "won,lost".into())));
        assert!(pairs.contains(&("sort_direction".into(), "asc".into())));
    }
}
