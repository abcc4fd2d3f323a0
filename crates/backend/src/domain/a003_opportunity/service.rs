use std::collections::BTreeMap;

use chrono::Datelike;
use contracts::domain::a003_opportunity::Opportunity;
use contracts::shared::grouping::{EntityGroup, GroupedList};
use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::{FilterMap, NormalizedParams};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select};

use super::repository::{self, Column, Entity};
use crate::shared::grouping::{group, GroupingConfig, GroupingConfigs, ValueRange};
use crate::shared::query::{apply_params, filter_choice_fields};

const CLOSED_STAGES: [&str; 2] = ["won", "lost"];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub fn grouping_configs() -> GroupingConfigs {
    GroupingConfigs::new()
        .with(
            "value",
            GroupingConfig::new("value")
                .ranges(vec![
                    ValueRange::new(100_000.0, "large", "Large ($100k+)"),
                    ValueRange::new(10_000.0, "medium", "Medium ($10k - $100k)"),
                    ValueRange::new(0.0, "small", "Small (under $10k)"),
                ])
                .order(["large", "medium", "small"])
                .default_bucket("unvalued", "No value"),
        )
        .with(
            "probability",
            GroupingConfig::new("probability")
                .ranges(vec![
                    ValueRange::new(75.0, "likely", "Likely"),
                    ValueRange::new(25.0, "possible", "Possible"),
                    ValueRange::new(0.0, "unlikely", "Unlikely"),
                ])
                .order(["likely", "possible", "unlikely"])
                .default_bucket("unknown", "Not estimated"),
        )
}

/// Choice filters plus `closed` (won or lost) and `min_value`
pub fn custom_filter(query: Select<Entity>, filters: &FilterMap, meta: &ModelMetadata) -> Select<Entity> {
    let mut query = filter_choice_fields(query, filters, meta);

    match filters.get("closed").and_then(|v| v.first()).map(String::as_str) {
        Some("true" | "1") => query = query.filter(Column::Stage.is_in(CLOSED_STAGES)),
        Some("false" | "0") => query = query.filter(Column::Stage.is_not_in(CLOSED_STAGES)),
        _ => {}
    }

    if let Some(min) = filters
        .get("min_value")
        .and_then(|v| v.first())
        .and_then(|v| v.parse::<f64>().ok())
    {
        query = query.filter(Column::Value.gte(min));
    }
    query
}

/// Month buckets for `group_by=expected_close_date`, chronological, undated last
pub fn group_by_close_month(opportunities: &[Opportunity], group_by: &str) -> Option<Vec<EntityGroup<Opportunity>>> {
    if group_by != "expected_close_date" {
        return None;
    }

    let mut months: BTreeMap<(i32, u32), Vec<Opportunity>> = BTreeMap::new();
    let mut undated = Vec::new();
    for opportunity in opportunities {
        match opportunity.expected_close_date {
            Some(date) => months
                .entry((date.year(), date.month()))
                .or_default()
                .push(opportunity.clone()),
            None => undated.push(opportunity.clone()),
        }
    }

    let mut groups: Vec<EntityGroup<Opportunity>> = months
        .into_iter()
        .map(|((year, month), items)| {
            EntityGroup::new(format!("{year}-{month:02}"), month_label(year, month), items)
        })
        .collect();
    if !undated.is_empty() {
        groups.push(EntityGroup::new("no_date", "No close date", undated));
    }
    Some(groups)
}

fn month_label(year: i32, month: u32) -> String {
    let name = MONTHS.get(month as usize - 1).copied().unwrap_or("Unknown");
    format!("{} {}", name, year)
}

pub async fn list_grouped(
    conn: &DatabaseConnection,
    meta: &ModelMetadata,
    params: &NormalizedParams,
) -> anyhow::Result<GroupedList<Opportunity>> {
    let filter = |query: Select<Entity>, filters: &FilterMap| custom_filter(query, filters, meta);
    let select = apply_params(Entity::find(), params, meta, Some(&filter));
    let opportunities = repository::fetch(conn, select).await?;

    let groups = group(
        &opportunities,
        params.group_by.as_deref(),
        meta,
        &grouping_configs(),
        Some(&group_by_close_month),
    );
    Ok(GroupedList::new(params.group_by.clone(), groups))
}

pub fn is_closed(opportunity: &Opportunity) -> bool {
    CLOSED_STAGES.contains(&opportunity.stage.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_company::repository as company_repository;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::query::parse_parameters;
    use contracts::domain::a001_company::Company;
    use chrono::NaiveDate;
    use contracts::shared::metadata::EntityRef;

    fn meta() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::of::<Opportunity>())
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    async fn seeded() -> DatabaseConnection {
        let conn = connect_in_memory().await.unwrap();
        let acme = company_repository::insert(&conn, &Company::new(0, "Acme")).await.unwrap();
        let rows = [
            ("Renewal", "won", Some(250_000.0), date(2025, 3, 10)),
            ("Expansion", "won", Some(40_000.0), date(2025, 3, 28)),
            ("Pilot", "lost", Some(5_000.0), date(2025, 1, 5)),
            ("Audit", "open", None, None),
        ];
        for (name, stage, value, close) in rows {
            let mut deal = Opportunity::new(0, name, stage);
            deal.value = value;
            deal.expected_close_date = close;
            deal.company_id = Some(acme);
            repository::insert(&conn, &deal).await.unwrap();
        }
        conn
    }

    #[tokio::test]
    async fn test_group_by_stage_counts() {
        let conn = seeded().await;
        let params = parse_parameters([("group_by", "stage")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.counts(), vec![("open", 1), ("won", 2), ("lost", 1)]);
        assert_eq!(result.group_by.as_deref(), Some("stage"));
    }

    #[tokio::test]
    async fn test_group_by_value_range() {
        let conn = seeded().await;
        let params = parse_parameters([("group_by", "value")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(
            result.counts(),
            vec![("large", 1), ("medium", 1), ("small", 1), ("unvalued", 1)]
        );
    }

    #[tokio::test]
    async fn test_group_by_close_month() {
        let conn = seeded().await;
        let params = parse_parameters([("group_by", "expected_close_date")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.counts(), vec![("2025-01", 1), ("2025-03", 2), ("no_date", 1)]);
        assert_eq!(result.groups[1].label, "March 2025");
    }

    #[tokio::test]
    async fn test_closed_filter_and_company_loaded() {
        let conn = seeded().await;
        let params = parse_parameters([("closed", "true"), ("sort_by", "value"), ("sort_direction", "desc")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        let names: Vec<_> = result.groups[0].entities.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Renewal", "Expansion", "Pilot"]);
        assert!(result.groups[0].entities.iter().all(is_closed));
        assert_eq!(
            result.groups[0].entities[0].company.as_ref().map(|c| c.name.as_str()),
            Some("Acme")
        );

        let params = parse_parameters([("closed", "false")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_close_month_grouper_ignores_other_keys() {
        assert!(group_by_close_month(&[], "stage").is_none());
        assert_eq!(group_by_close_month(&[], "expected_close_date"), Some(vec![]));
    }
}
