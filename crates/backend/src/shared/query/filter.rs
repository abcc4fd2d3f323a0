use contracts::shared::metadata::{FieldKind, ModelMetadata};
use contracts::shared::query::{FilterMap, NormalizedParams};

use super::queryable::Queryable;

/// Entity-specific filtering: receives the query and the parsed filter dict
pub type CustomFilter<'a, Q> = &'a dyn Fn(Q, &FilterMap) -> Q;

/// Apply filters through `custom_filter`; without one the query is returned as is
pub fn apply_filters<Q: Queryable>(
    query: Q,
    params: &NormalizedParams,
    custom_filter: Option<CustomFilter<'_, Q>>,
) -> Q {
    match custom_filter {
        Some(filter) => filter(query, &params.filters),
        None => query,
    }
}

/// Filter on every filterable field present in `filters`
///
/// Choice values outside the field's choice set and non-numeric reference ids
/// are dropped; a filter left without valid values is ignored.
pub fn filter_choice_fields<Q: Queryable>(
    mut query: Q,
    filters: &FilterMap,
    meta: &ModelMetadata,
) -> Q {
    for field in meta.filterable_fields() {
        let Some(raw) = filters
            .get(field.name)
            .or_else(|| filters.get(field.db_column()))
        else {
            continue;
        };

        let values: Vec<String> = match field.kind {
            FieldKind::SingleChoice => raw
                .iter()
                .filter(|v| field.choice(v).is_some())
                .cloned()
                .collect(),
            FieldKind::Reference | FieldKind::Integer => raw
                .iter()
                .filter(|v| v.parse::<i64>().is_ok())
                .cloned()
                .collect(),
            _ => raw.clone(),
        };

        if values.is_empty() {
            tracing::debug!(
                "Ignoring filter on {}.{}: no valid values in {:?}",
                meta.entity_name,
                field.name,
                raw
            );
            continue;
        }

        let column = field.db_column();
        if !query.has_attribute(column) {
            tracing::debug!("{} has no column '{}', filter skipped", meta.entity_name, column);
            continue;
        }
        query = query.filter_in(column, &values);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::{parse_parameters, MemoryQuery};
    use contracts::domain::a003_opportunity::Opportunity;
    use contracts::shared::metadata::EntityRef;

    fn meta() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::of::<Opportunity>())
    }

    fn opportunities() -> Vec<Opportunity> {
        let mut deals = vec![
            Opportunity::new(1, "A", "won"),
            Opportunity::new(2, "B", "lost"),
            Opportunity::new(3, "C", "open"),
        ];
        deals[0].company_id = Some(7);
        deals
    }

    #[test]
    fn test_no_custom_filter_means_no_filtering() {
        let params = parse_parameters([("stage", "won")]);
        let result = apply_filters(MemoryQuery::new(opportunities()), &params, None).all();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_custom_filter_receives_filter_dict() {
        let meta = meta();
        let params = parse_parameters([("stage", "won,lost")]);
        let filter = |q: MemoryQuery<Opportunity>, filters: &FilterMap| {
            filter_choice_fields(q, filters, &meta)
        };
        let result = apply_filters(MemoryQuery::new(opportunities()), &params, Some(&filter)).all();
        let ids: Vec<_> = result.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_invalid_choice_values_are_dropped() {
        let params = parse_parameters([("stage", "won,bogus")]);
        let result = filter_choice_fields(MemoryQuery::new(opportunities()), &params.filters, &meta()).all();
        assert_eq!(result.len(), 1);

        let params = parse_parameters([("stage", "bogus")]);
        let result = filter_choice_fields(MemoryQuery::new(opportunities()), &params.filters, &meta()).all();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_reference_filter_by_id() {
        let params = parse_parameters([("company", "7,abc")]);
        let result = filter_choice_fields(MemoryQuery::new(opportunities()), &params.filters, &meta()).all();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_non_filterable_keys_are_ignored() {
        let params = parse_parameters([("name", "A"), ("page", "2")]);
        let result = filter_choice_fields(MemoryQuery::new(opportunities()), &params.filters, &meta()).all();
        assert_eq!(result.len(), 3);
    }
}
