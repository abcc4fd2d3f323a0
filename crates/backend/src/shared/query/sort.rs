use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::SortDirection;

use super::queryable::Queryable;

/// Order `query` by `field`, degrading instead of failing
///
/// `field` resolves through the metadata to its storage column and must exist
/// on the query. An unresolved field falls back to `name` ascending, then to
/// the identifier. Without a field the entity's default sort field is used.
pub fn apply_sort<Q: Queryable>(
    query: Q,
    field: Option<&str>,
    direction: SortDirection,
    meta: &ModelMetadata,
) -> Q {
    let requested = field.map(str::trim).filter(|f| !f.is_empty());

    match requested {
        Some(name) => match resolve_column(&query, name, meta) {
            Some(column) => query.order_by(column, direction),
            None => {
                tracing::debug!(
                    "Sort field '{}' not found on {}, using fallback",
                    name,
                    meta.entity_name
                );
                fallback_sort(query, meta)
            }
        },
        None => match resolve_column(&query, &meta.default_sort_field, meta) {
            Some(column) => query.order_by(column, direction),
            None => fallback_sort(query, meta),
        },
    }
}

fn resolve_column<'a, Q: Queryable>(query: &Q, name: &'a str, meta: &ModelMetadata) -> Option<&'a str> {
    let column = match meta.field(name) {
        Some(field) => field.db_column(),
        None => name,
    };
    query.has_attribute(column).then_some(column)
}

fn fallback_sort<Q: Queryable>(query: Q, meta: &ModelMetadata) -> Q {
    if meta.has_field("name") && query.has_attribute("name") {
        return query.order_by("name", SortDirection::Asc);
    }

    let identifier = meta.identifier_field().map(|f| f.db_column()).unwrap_or("id");
    if query.has_attribute(identifier) {
        query.order_by(identifier, SortDirection::Asc)
    } else {
        query
    }
}
