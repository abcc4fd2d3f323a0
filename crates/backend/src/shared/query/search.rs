use contracts::shared::metadata::ModelMetadata;

use super::queryable::Queryable;

/// Case-insensitive substring search over the entity's searchable fields
pub fn apply_search<Q: Queryable>(query: Q, term: Option<&str>, meta: &ModelMetadata) -> Q {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return query;
    };

    let columns: Vec<&str> = meta
        .searchable_fields()
        .into_iter()
        .map(|f| f.db_column())
        .filter(|c| query.has_attribute(c))
        .collect();

    if columns.is_empty() {
        tracing::debug!("{} has no searchable columns", meta.entity_name);
        return query;
    }
    query.search_any(&columns, term)
}
