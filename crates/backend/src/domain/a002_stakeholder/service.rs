use contracts::domain::a002_stakeholder::Stakeholder;
use contracts::shared::grouping::GroupedList;
use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::{FilterMap, NormalizedParams};
use sea_orm::{DatabaseConnection, EntityTrait, Select};

use super::repository::{self, Entity};
use crate::shared::grouping::{group, GroupingConfigs};
use crate::shared::query::{apply_params, filter_choice_fields};

pub async fn list_grouped(
    conn: &DatabaseConnection,
    meta: &ModelMetadata,
    params: &NormalizedParams,
) -> anyhow::Result<GroupedList<Stakeholder>> {
    let filter = |query: Select<Entity>, filters: &FilterMap| filter_choice_fields(query, filters, meta);
    let select = apply_params(Entity::find(), params, meta, Some(&filter));
    let stakeholders = repository::fetch(conn, select).await?;

    let groups = group(
        &stakeholders,
        params.group_by.as_deref(),
        meta,
        &GroupingConfigs::new(),
        None,
    );
    Ok(GroupedList::new(params.group_by.clone(), groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_company::repository as company_repository;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::query::parse_parameters;
    use contracts::domain::a001_company::Company;
    use contracts::shared::metadata::EntityRef;

    fn meta() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::of::<Stakeholder>())
    }

    #[tokio::test]
    async fn test_group_by_company_name() {
        let conn = connect_in_memory().await.unwrap();
        let acme = company_repository::insert(&conn, &Company::new(0, "Acme")).await.unwrap();
        let zenith = company_repository::insert(&conn, &Company::new(0, "Zenith")).await.unwrap();

        for (name, company_id, influence) in [
            ("Dana Ortiz", Some(zenith), "high"),
            ("Lee Park", Some(acme), "low"),
            ("Sam Reyes", Some(acme), "high"),
            ("Kim Vo", None, "medium"),
        ] {
            let mut person = Stakeholder::new(0, name);
            person.company_id = company_id;
            person.influence = Some(influence.into());
            repository::insert(&conn, &person).await.unwrap();
        }

        let params = parse_parameters([("group_by", "company")]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.counts(), vec![("Acme", 2), ("Other", 1), ("Zenith", 1)]);
        assert_eq!(result.groups[1].label, "No Company");
        assert!(result.groups[0].entities.iter().all(|s| s.company.is_some()));

        let acme_id = acme.to_string();
        let params = parse_parameters([("influence", "high"), ("company", acme_id.as_str())]);
        let result = list_grouped(&conn, &meta(), &params).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.groups[0].entities[0].name, "Sam Reyes");
    }
}
