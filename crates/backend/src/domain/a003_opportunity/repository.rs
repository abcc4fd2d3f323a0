use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a003_opportunity::Opportunity;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use crate::domain::a001_company::repository as company;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_opportunity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub company_id: Option<i64>,
    pub stage: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub value: Option<f64>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<NaiveDate>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "company::Entity",
        from = "Column::CompanyId",
        to = "company::Column::Id"
    )]
    Company,
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Opportunity {
    fn from(m: Model) -> Self {
        Opportunity {
            id: m.id,
            name: m.name,
            company_id: m.company_id,
            stage: m.stage,
            value: m.value,
            probability: m.probability,
            expected_close_date: m.expected_close_date,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
            company: None,
        }
    }
}

/// Run a prepared select, loading each opportunity's company
pub async fn fetch(conn: &DatabaseConnection, select: Select<Entity>) -> anyhow::Result<Vec<Opportunity>> {
    let rows = select.find_also_related(company::Entity).all(conn).await?;
    let items = rows
        .into_iter()
        .map(|(model, company)| Opportunity {
            company: company.map(Into::into),
            ..model.into()
        })
        .collect();
    Ok(items)
}

pub async fn insert(conn: &DatabaseConnection, aggregate: &Opportunity) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(aggregate.name.clone()),
        company_id: Set(aggregate.company_id),
        stage: Set(aggregate.stage.clone()),
        value: Set(aggregate.value),
        probability: Set(aggregate.probability),
        expected_close_date: Set(aggregate.expected_close_date),
        description: Set(aggregate.description.clone()),
        created_at: Set(aggregate.created_at),
        updated_at: Set(aggregate.updated_at),
    };
    let model = active.insert(conn).await?;
    Ok(model.id)
}
