//! Queryable collections
//!
//! The engine filters and sorts through [`Queryable`] only. Two adapters exist:
//! sea-orm selects (SQL) and [`MemoryQuery`] over already loaded records.

use std::cmp::Ordering;
use std::str::FromStr;

use contracts::shared::metadata::{EntityDescriptor, Record};
use contracts::shared::query::SortDirection;
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, Select};

/// Query-builder capability consumed by the filter/sort/search engine
///
/// Column names are storage columns (`FieldMetadata::db_column`).
pub trait Queryable: Sized {
    fn has_attribute(&self, column: &str) -> bool;

    fn order_by(self, column: &str, direction: SortDirection) -> Self;

    /// Keep rows whose column equals one of `values`
    fn filter_in(self, column: &str, values: &[String]) -> Self;

    /// Keep rows where any of `columns` contains `term`, case-insensitive
    fn search_any(self, columns: &[&str], term: &str) -> Self;
}

// ============================================================================
// sea-orm
// ============================================================================

fn column_of<E: EntityTrait>(column: &str) -> Option<E::Column> {
    <E::Column as FromStr>::from_str(column).ok()
}

impl<E: EntityTrait> Queryable for Select<E> {
    fn has_attribute(&self, column: &str) -> bool {
        column_of::<E>(column).is_some()
    }

    fn order_by(self, column: &str, direction: SortDirection) -> Self {
        let Some(col) = column_of::<E>(column) else {
            return self;
        };
        let order = match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        QueryOrder::order_by(self, col, order)
    }

    fn filter_in(self, column: &str, values: &[String]) -> Self {
        match column_of::<E>(column) {
            // SQLite applies the column's affinity to the IN list
            Some(col) => QueryFilter::filter(self, col.is_in(values.iter().cloned())),
            None => self,
        }
    }

    fn search_any(self, columns: &[&str], term: &str) -> Self {
        let pattern = format!("%{}%", term);
        let condition = columns
            .iter()
            .filter_map(|c| column_of::<E>(c))
            .fold(Condition::any(), |cond, col| cond.add(col.like(pattern.as_str())));

        if condition.is_empty() {
            self
        } else {
            QueryFilter::filter(self, condition)
        }
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Queryable over records that are already loaded
///
/// Filters apply immediately; orderings are collected and applied by
/// [`MemoryQuery::all`], first ordering most significant, like SQL.
#[derive(Debug, Clone)]
pub struct MemoryQuery<T> {
    items: Vec<T>,
    ordering: Vec<(String, SortDirection)>,
}

impl<T> MemoryQuery<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ordering: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Record> MemoryQuery<T> {
    /// Execute the collected orderings
    pub fn all(self) -> Vec<T> {
        let Self {
            mut items,
            ordering,
        } = self;
        if !ordering.is_empty() {
            items.sort_by(|a, b| {
                for (column, direction) in &ordering {
                    let ord = a.value(column).sort_cmp(&b.value(column));
                    let ord = match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }
        items
    }
}

impl<T: Record + EntityDescriptor> Queryable for MemoryQuery<T> {
    fn has_attribute(&self, column: &str) -> bool {
        T::field_metadata()
            .iter()
            .any(|f| f.name == column || f.db_column() == column)
    }

    fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        if self.has_attribute(column) {
            self.ordering.push((column.to_string(), direction));
        }
        self
    }

    fn filter_in(mut self, column: &str, values: &[String]) -> Self {
        if self.has_attribute(column) {
            self.items.retain(|item| item.value(column).matches_any(values));
        }
        self
    }

    fn search_any(mut self, columns: &[&str], term: &str) -> Self {
        let needle = term.to_lowercase();
        let columns: Vec<&str> = columns
            .iter()
            .copied()
            .filter(|c| self.has_attribute(c))
            .collect();
        if columns.is_empty() {
            return self;
        }
        self.items
            .retain(|item| columns.iter().any(|c| item.value(c).contains_text(&needle)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_company::Company;
    use sea_orm::{DbBackend, QueryTrait};

    use crate::domain::a001_company::repository;

    fn companies() -> Vec<Company> {
        let mut a = Company::new(1, "Beta Ltd");
        a.industry = Some("finance".into());
        let mut b = Company::new(2, "Acme");
        b.industry = Some("technology".into());
        let mut c = Company::new(3, "Corex");
        c.industry = Some("technology".into());
        vec![a, b, c]
    }

    #[test]
    fn test_memory_order_and_filter() {
        let result = MemoryQuery::new(companies())
            .filter_in("industry", &["technology".to_string()])
            .order_by("name", SortDirection::Desc)
            .all();
        let names: Vec<_> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Corex", "Acme"]);
    }

    #[test]
    fn test_memory_first_ordering_wins() {
        let result = MemoryQuery::new(companies())
            .order_by("industry", SortDirection::Asc)
            .order_by("name", SortDirection::Asc)
            .all();
        let ids: Vec<_> = result.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_memory_search_is_case_insensitive() {
        let result = MemoryQuery::new(companies())
            .search_any(&["name", "website"], "ACM")
            .all();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_memory_unknown_column_is_ignored() {
        let query = MemoryQuery::new(companies());
        assert!(!query.has_attribute("bogus"));
        let result = query
            .filter_in("bogus", &["x".to_string()])
            .order_by("bogus", SortDirection::Desc)
            .all();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_select_builds_sql() {
        let select = repository::Entity::find();
        assert!(select.has_attribute("industry"));
        assert!(!select.has_attribute("bogus"));

        let sql = Queryable::order_by(select, "name", SortDirection::Desc)
            .filter_in("industry", &["finance".to_string()])
            .search_any(&["name", "bogus"], "ac")
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r#"ORDER BY "a001_company"."name" DESC"#), "{sql}");
        assert!(sql.contains(r#""a001_company"."industry" IN ('finance')"#), "{sql}");
        assert!(sql.contains(r#""a001_company"."name" LIKE '%ac%'"#), "{sql}");
    }
}
