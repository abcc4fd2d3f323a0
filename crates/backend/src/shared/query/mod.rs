//! Parameter normalization, filtering, sorting and search

pub mod filter;
pub mod params;
pub mod queryable;
pub mod search;
pub mod sort;

pub use filter::{apply_filters, filter_choice_fields, CustomFilter};
pub use params::{parse_parameters, parse_query_string};
pub use queryable::{MemoryQuery, Queryable};
pub use search::apply_search;
pub use sort::apply_sort;

use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::NormalizedParams;

/// Filter, search and sort in one pass, in that order
pub fn apply_params<Q: Queryable>(
    query: Q,
    params: &NormalizedParams,
    meta: &ModelMetadata,
    custom_filter: Option<CustomFilter<'_, Q>>,
) -> Q {
    let query = apply_filters(query, params, custom_filter);
    let query = apply_search(query, params.search.as_deref(), meta);
    apply_sort(query, params.sort_by.as_deref(), params.sort_direction, meta)
}
