use chrono::{Duration, NaiveDate, Utc};
use contracts::domain::a004_task::Task;
use contracts::shared::grouping::{EntityGroup, GroupedList};
use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::{FilterMap, NormalizedParams};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select};

use super::repository::{self, Column, Entity};
use crate::shared::grouping::{group, GroupingConfigs};
use crate::shared::query::{apply_params, filter_choice_fields};

/// Due-date buckets in display order
const DUE_BUCKETS: [(&str, &str); 6] = [
    ("overdue", "Overdue"),
    ("today", "Due Today"),
    ("this_week", "Due This Week"),
    ("later", "Later"),
    ("no_date", "No Due Date"),
    ("completed", "Completed"),
];

fn parse_flag(filters: &FilterMap, key: &str) -> Option<bool> {
    match filters.get(key)?.first()?.as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Choice filters plus `completed` and `overdue` flags
pub fn custom_filter(
    query: Select<Entity>,
    filters: &FilterMap,
    meta: &ModelMetadata,
    today: NaiveDate,
) -> Select<Entity> {
    let mut query = filter_choice_fields(query, filters, meta);

    if let Some(completed) = parse_flag(filters, "completed") {
        query = query.filter(Column::Completed.eq(completed));
    }
    if parse_flag(filters, "overdue") == Some(true) {
        query = query
            .filter(Column::Completed.eq(false))
            .filter(Column::DueDate.lt(today));
    }
    query
}

/// Bucket key of one task relative to `today`
pub fn due_bucket(task: &Task, today: NaiveDate) -> &'static str {
    if task.completed {
        return "completed";
    }
    match task.due_date {
        None => "no_date",
        Some(due) if due < today => "overdue",
        Some(due) if due == today => "today",
        Some(due) if due <= today + Duration::days(7) => "this_week",
        Some(_) => "later",
    }
}

/// Relative due-date grouping for `group_by=due_date`
pub fn group_by_due_date(tasks: &[Task], group_by: &str, today: NaiveDate) -> Option<Vec<EntityGroup<Task>>> {
    if group_by != "due_date" {
        return None;
    }

    let groups = DUE_BUCKETS
        .iter()
        .filter_map(|(key, label)| {
            let members: Vec<Task> = tasks
                .iter()
                .filter(|t| due_bucket(t, today) == *key)
                .cloned()
                .collect();
            (!members.is_empty()).then(|| EntityGroup::new(*key, *label, members))
        })
        .collect();
    Some(groups)
}

pub async fn list_grouped(
    conn: &DatabaseConnection,
    meta: &ModelMetadata,
    params: &NormalizedParams,
) -> anyhow::Result<GroupedList<Task>> {
    list_grouped_on(conn, meta, params, Utc::now().date_naive()).await
}

/// Same as [`list_grouped`] with an explicit current date
pub async fn list_grouped_on(
    conn: &DatabaseConnection,
    meta: &ModelMetadata,
    params: &NormalizedParams,
    today: NaiveDate,
) -> anyhow::Result<GroupedList<Task>> {
    let filter = |query: Select<Entity>, filters: &FilterMap| custom_filter(query, filters, meta, today);
    let select = apply_params(Entity::find(), params, meta, Some(&filter));
    let tasks = repository::fetch(conn, select).await?;

    let grouper = |items: &[Task], group_by: &str| group_by_due_date(items, group_by, today);
    let groups = group(
        &tasks,
        params.group_by.as_deref(),
        meta,
        &GroupingConfigs::new(),
        Some(&grouper),
    );
    Ok(GroupedList::new(params.group_by.clone(), groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_opportunity::repository as opportunity_repository;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::query::parse_parameters;
    use contracts::domain::a003_opportunity::Opportunity;
    use contracts::shared::metadata::EntityRef;

    fn meta() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::of::<Task>())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    async fn seeded() -> DatabaseConnection {
        let conn = connect_in_memory().await.unwrap();
        let deal = opportunity_repository::insert(&conn, &Opportunity::new(0, "Renewal", "open"))
            .await
            .unwrap();
        let rows = [
            ("Send contract", "todo", "high", Some(-2), false),
            ("Call CFO", "in_progress", "medium", Some(0), false),
            ("Prepare demo", "todo", "low", Some(3), false),
            ("Quarterly review", "todo", "medium", Some(30), false),
            ("Update notes", "todo", "low", None, false),
            ("Kickoff", "done", "high", Some(-10), true),
        ];
        for (title, status, priority, offset, completed) in rows {
            let mut task = Task::new(0, title);
            task.status = status.into();
            task.priority = Some(priority.into());
            task.due_date = offset.map(|days| today() + Duration::days(days));
            task.completed = completed;
            task.opportunity_id = Some(deal);
            repository::insert(&conn, &task).await.unwrap();
        }
        conn
    }

    #[tokio::test]
    async fn test_group_by_due_date() {
        let conn = seeded().await;
        let params = parse_parameters([("group_by", "due_date")]);
        let result = list_grouped_on(&conn, &meta(), &params, today()).await.unwrap();
        assert_eq!(
            result.counts(),
            vec![
                ("overdue", 1),
                ("today", 1),
                ("this_week", 1),
                ("later", 1),
                ("no_date", 1),
                ("completed", 1)
            ]
        );
        assert_eq!(result.total, 6);
    }

    #[tokio::test]
    async fn test_priority_groups_follow_choice_order() {
        let conn = seeded().await;
        let params = parse_parameters([("group_by", "priority")]);
        let result = list_grouped_on(&conn, &meta(), &params, today()).await.unwrap();
        assert_eq!(result.counts(), vec![("high", 2), ("medium", 2), ("low", 2)]);
    }

    #[tokio::test]
    async fn test_flags() {
        let conn = seeded().await;
        let params = parse_parameters([("overdue", "true")]);
        let result = list_grouped_on(&conn, &meta(), &params, today()).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.groups[0].entities[0].title, "Send contract");

        let params = parse_parameters([("completed", "false"), ("status", "todo")]);
        let result = list_grouped_on(&conn, &meta(), &params, today()).await.unwrap();
        assert_eq!(result.total, 4);
    }

    #[tokio::test]
    async fn test_default_sort_is_due_date_and_opportunity_loaded() {
        let conn = seeded().await;
        let params = parse_parameters([("completed", "false")]);
        let result = list_grouped_on(&conn, &meta(), &params, today()).await.unwrap();
        let titles: Vec<_> = result.groups[0].entities.iter().map(|t| t.title.as_str()).collect();
        // SQLite sorts NULL first
        assert_eq!(
            titles,
            vec!["Update notes", "Send contract", "Call CFO", "Prepare demo", "Quarterly review"]
        );
        assert!(result.groups[0].entities.iter().all(|t| t.opportunity.is_some()));
    }

    #[test]
    fn test_due_bucket_boundaries() {
        let mut task = Task::new(1, "x");
        task.due_date = Some(today() + Duration::days(7));
        assert_eq!(due_bucket(&task, today()), "this_week");
        task.due_date = Some(today() + Duration::days(8));
        assert_eq!(due_bucket(&task, today()), "later");
        task.completed = true;
        assert_eq!(due_bucket(&task, today()), "completed");
        assert!(group_by_due_date(&[task], "status", today()).is_none());
    }
}
