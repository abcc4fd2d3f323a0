//! Request parameter normalization
//!
//! `group_by`, `sort_by`, `sort_direction` and `q` are scalar controls. Every
//! other key is a filter array that accepts repeated keys (`stage=won&stage=lost`),
//! a comma-joined value (`stage=won,lost`) or both; all forms flatten into the
//! same ordered list of trimmed non-empty values.

use contracts::shared::query::{NormalizedParams, SortDirection};

pub const GROUP_BY: &str = "group_by";
pub const SORT_BY: &str = "sort_by";
pub const SORT_DIRECTION: &str = "sort_direction";
pub const SEARCH: &str = "q";

/// Normalize raw `(key, value)` pairs in request order
pub fn parse_parameters<I, K, V>(raw: I) -> NormalizedParams
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut params = NormalizedParams::default();

    for (key, value) in raw {
        let key = key.as_ref().trim();
        let value = value.as_ref();

        match key {
            GROUP_BY => set_scalar(&mut params.group_by, value),
            SORT_BY => set_scalar(&mut params.sort_by, value),
            SORT_DIRECTION => params.sort_direction = SortDirection::parse(value),
            SEARCH => set_scalar(&mut params.search, value),
            _ => {
                let key = key.strip_suffix("[]").unwrap_or(key).trim();
                if key.is_empty() {
                    continue;
                }
                let values: Vec<String> = split_values(value).collect();
                if values.is_empty() {
                    continue;
                }
                params
                    .filters
                    .entry(key.to_string())
                    .or_default()
                    .extend(values);
            }
        }
    }

    params
}

/// Normalize a raw query string (`a=1&b=2,3`), percent-decoding keys and values
pub fn parse_query_string(query: &str) -> NormalizedParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs = query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode(key), decode(value))
        });
    parse_parameters(pairs)
}

fn set_scalar(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

fn split_values(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_joined_equals_repeated() {
        let joined = parse_parameters([("stage", "a,b,c")]);
        let repeated = parse_parameters([("stage", "a"), ("stage", "b"), ("stage", "c")]);
        assert_eq!(joined, repeated);
        assert_eq!(joined.filter("stage"), Some(&["a".to_string(), "b".into(), "c".into()][..]));
    }

    #[test]
    fn test_mixed_forms_flatten_in_order() {
        let params = parse_parameters([
            ("industry[]", " technology , finance"),
            ("industry", ""),
            ("industry", "retail,,"),
        ]);
        assert_eq!(
            params.filter("industry"),
            Some(&["technology".to_string(), "finance".into(), "retail".into()][..])
        );
    }

    #[test]
    fn test_scalar_controls() {
        let params = parse_parameters([
            ("group_by", "stage"),
            ("sort_by", " value "),
            ("sort_direction", "DESC"),
            ("q", "acme"),
        ]);
        assert_eq!(params.group_by.as_deref(), Some("stage"));
        assert_eq!(params.sort_by.as_deref(), Some("value"));
        assert_eq!(params.sort_direction, SortDirection::Desc);
        assert_eq!(params.search.as_deref(), Some("acme"));
        assert!(!params.has_filters());
    }

    #[test]
    fn test_blank_and_unknown_values_degrade() {
        let params = parse_parameters([
            ("group_by", "  "),
            ("sort_direction", "sideways"),
            ("stage", " , "),
        ]);
        assert_eq!(params.group_by, None);
        assert_eq!(params.sort_direction, SortDirection::Asc);
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_query_string_decoding() {
        let params = parse_query_string("?group_by=stage&q=big+deal&stage=won%2Clost&company%5B%5D=3");
        assert_eq!(params.group_by.as_deref(), Some("stage"));
        assert_eq!(params.search.as_deref(), Some("big deal"));
        assert_eq!(params.filter("stage"), Some(&["won".to_string(), "lost".into()][..]));
        assert_eq!(params.filter("company"), Some(&["3".to_string()][..]));
    }

    #[test]
    fn test_query_string_round_trip() {
        let params = parse_query_string("group_by=stage&stage=won&stage=lost");
        let again = parse_parameters(params.to_query_pairs());
        assert_eq!(params, again);
    }
}
