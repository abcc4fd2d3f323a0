use chrono::{DateTime, Utc};
use contracts::domain::a002_stakeholder::Stakeholder;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use crate::domain::a001_company::repository as company;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_stakeholder")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub company_id: Option<i64>,
    pub influence: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
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

impl From<Model> for Stakeholder {
    fn from(m: Model) -> Self {
        Stakeholder {
            id: m.id,
            name: m.name,
            email: m.email,
            job_title: m.job_title,
            company_id: m.company_id,
            influence: m.influence,
            phone: m.phone,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
            company: None,
        }
    }
}

/// Run a prepared select, loading each stakeholder's company
pub async fn fetch(conn: &DatabaseConnection, select: Select<Entity>) -> anyhow::Result<Vec<Stakeholder>> {
    let rows = select.find_also_related(company::Entity).all(conn).await?;
    let items = rows
        .into_iter()
        .map(|(model, company)| Stakeholder {
            company: company.map(Into::into),
            ..model.into()
        })
        .collect();
    Ok(items)
}

pub async fn insert(conn: &DatabaseConnection, aggregate: &Stakeholder) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(aggregate.name.clone()),
        email: Set(aggregate.email.clone()),
        job_title: Set(aggregate.job_title.clone()),
        company_id: Set(aggregate.company_id),
        influence: Set(aggregate.influence.clone()),
        phone: Set(aggregate.phone.clone()),
        notes: Set(aggregate.notes.clone()),
        created_at: Set(aggregate.created_at),
        updated_at: Set(aggregate.updated_at),
    };
    let model = active.insert(conn).await?;
    Ok(model.id)
}
