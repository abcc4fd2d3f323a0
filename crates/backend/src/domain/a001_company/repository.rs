use chrono::{DateTime, Utc};
use contracts::domain::a001_company::Company;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub annual_revenue: Option<f64>,
    pub website: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Company {
    fn from(m: Model) -> Self {
        Company {
            id: m.id,
            name: m.name,
            industry: m.industry,
            size: m.size,
            annual_revenue: m.annual_revenue,
            website: m.website,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Run a prepared select
pub async fn fetch(conn: &DatabaseConnection, select: Select<Entity>) -> anyhow::Result<Vec<Company>> {
    let items = select.all(conn).await?.into_iter().map(Into::into).collect();
    Ok(items)
}

pub async fn count(conn: &DatabaseConnection) -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn).await?)
}

pub async fn insert(conn: &DatabaseConnection, aggregate: &Company) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(aggregate.name.clone()),
        industry: Set(aggregate.industry.clone()),
        size: Set(aggregate.size.clone()),
        annual_revenue: Set(aggregate.annual_revenue),
        website: Set(aggregate.website.clone()),
        description: Set(aggregate.description.clone()),
        created_at: Set(aggregate.created_at),
        updated_at: Set(aggregate.updated_at),
    };
    let model = active.insert(conn).await?;
    Ok(model.id)
}
