use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a004_task::Task;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use crate::domain::a003_opportunity::repository as opportunity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub opportunity_id: Option<i64>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "opportunity::Entity",
        from = "Column::OpportunityId",
        to = "opportunity::Column::Id"
    )]
    Opportunity,
}

impl Related<opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Opportunity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(m: Model) -> Self {
        Task {
            id: m.id,
            title: m.title,
            description: m.description,
            status: m.status,
            priority: m.priority,
            due_date: m.due_date,
            opportunity_id: m.opportunity_id,
            completed: m.completed,
            created_at: m.created_at,
            updated_at: m.updated_at,
            opportunity: None,
        }
    }
}

/// Run a prepared select, loading each task's opportunity
pub async fn fetch(conn: &DatabaseConnection, select: Select<Entity>) -> anyhow::Result<Vec<Task>> {
    let rows = select.find_also_related(opportunity::Entity).all(conn).await?;
    let items = rows
        .into_iter()
        .map(|(model, opportunity)| Task {
            opportunity: opportunity.map(Into::into),
            ..model.into()
        })
        .collect();
    Ok(items)
}

pub async fn insert(conn: &DatabaseConnection, aggregate: &Task) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: NotSet,
        title: Set(aggregate.title.clone()),
        description: Set(aggregate.description.clone()),
        status: Set(aggregate.status.clone()),
        priority: Set(aggregate.priority.clone()),
        due_date: Set(aggregate.due_date),
        opportunity_id: Set(aggregate.opportunity_id),
        completed: Set(aggregate.completed),
        created_at: Set(aggregate.created_at),
        updated_at: Set(aggregate.updated_at),
    };
    let model = active.insert(conn).await?;
    Ok(model.id)
}
