use contracts::domain::a001_company::Company;
use contracts::shared::grouping::GroupedList;
use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::{FilterMap, NormalizedParams};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select};

use super::repository::{self, Column, Entity};
use crate::shared::grouping::{group, GroupingConfig, GroupingConfigs, ValueRange};
use crate::shared::query::{apply_params, filter_choice_fields};

/// Revenue bands for `group_by=annual_revenue`
pub fn grouping_configs() -> GroupingConfigs {
    GroupingConfigs::new().with(
        "annual_revenue",
        GroupingConfig::new("annual_revenue")
            .ranges(vec![
                ValueRange::new(100_000_000.0, "enterprise", "$100M+"),
                ValueRange::new(10_000_000.0, "mid_market", "$10M - $100M"),
                ValueRange::new(0.0, "small_business", "Under $10M"),
            ])
            .order(["enterprise", "mid_market", "small_business"])
            .default_bucket("unknown", "Revenue unknown"),
    )
}

/// Choice filters plus `min_revenue`
pub fn custom_filter(query: Select<Entity>, filters: &FilterMap, meta: &ModelMetadata) -> Select<Entity> {
    let query = filter_choice_fields(query, filters, meta);

    let min_revenue = filters
        .get("min_revenue")
        .and_then(|values| values.first())
        .and_then(|v| v.parse::<f64>().ok());
    match min_revenue {
        Some(min) => query.filter(Column::AnnualRevenue.gte(min)),
        None => query,
    }
}

pub async fn list_grouped(
    conn: &DatabaseConnection,
    meta: &ModelMetadata,
    params: &NormalizedParams,
) -> anyhow::Result<GroupedList<Company>> {
    let filter = |query: Select<Entity>, filters: &FilterMap| custom_filter(query, filters, meta);
    let select = apply_params(Entity::find(), params, meta, Some(&filter));
    let companies = repository::fetch(conn, select).await?;

    let groups = group(
        &companies,
        params.group_by.as_deref(),
        meta,
        &grouping_configs(),
        None,
    );
    Ok(GroupedList::new(params.group_by.clone(), groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::query::parse_parameters;
    use contracts::shared::metadata::EntityRef;

    fn meta() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::of::<Company>())
    }

    async fn seeded() -> DatabaseConnection {
        let conn = connect_in_memory().await.unwrap();
        let rows = [
            ("Acme", "technology", Some(250_000_000.0)),
            ("Borealis Bank", "finance", Some(40_000_000.0)),
            ("Cedar Clinic", "healthcare", Some(2_000_000.0)),
            ("Delta Labs", "technology", None),
        ];
        for (name, industry, revenue) in rows {
            let mut company = Company::new(0, name);
            company.industry = Some(industry.into());
            company.annual_revenue = revenue;
            repository::insert(&conn, &company).await.unwrap();
        }
        conn
    }

    #[tokio::test]
    async fn test_group_by_revenue_band() {
        let conn = seeded().await;
        let params = parse_parameters([("group_by", "annual_revenue")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(
            result.counts(),
            vec![("enterprise", 1), ("mid_market", 1), ("small_business", 1), ("unknown", 1)]
        );
        assert_eq!(result.groups[3].label, "Revenue unknown");
        assert_eq!(result.total, 4);
    }

    #[tokio::test]
    async fn test_filter_and_search() {
        let conn = seeded().await;
        let params = parse_parameters([("industry", "technology,bogus"), ("sort_by", "name"), ("sort_direction", "desc")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        let names: Vec<_> = result.groups[0].entities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Delta Labs", "Acme"]);

        let params = parse_parameters([("q", "BANK")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.total, 1);

        let params = parse_parameters([("min_revenue", "10000000")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.total, 2);
    }

    #[tokio::test]
    async fn test_bogus_sort_falls_back_to_name() {
        let conn = seeded().await;
        let params = parse_parameters([("sort_by", "bogus"), ("sort_direction", "desc")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.groups[0].key, "all");
        assert_eq!(result.groups[0].entities[0].name, "Acme");
    }
}
