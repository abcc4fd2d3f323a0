//! Demo data for an empty database

use chrono::{Duration, Utc};
use contracts::domain::a001_company::Company;
use contracts::domain::a002_stakeholder::Stakeholder;
use contracts::domain::a003_opportunity::Opportunity;
use contracts::domain::a004_task::Task;
use sea_orm::DatabaseConnection;

use crate::domain::{a001_company, a002_stakeholder, a003_opportunity, a004_task};

struct DemoCompany {
    name: &'static str,
    industry: &'static str,
    size: &'static str,
    revenue: f64,
    website: &'static str,
}

const COMPANIES: &[DemoCompany] = &[
    DemoCompany {
        name: "Acme Corporation",
        industry: "technology",
        size: "enterprise",
        revenue: 250_000_000.0,
        website: "https://acme.example.com",
    },
    DemoCompany {
        name: "Borealis Bank",
        industry: "finance",
        size: "enterprise",
        revenue: 40_000_000.0,
        website: "https://borealis.example.com",
    },
    DemoCompany {
        name: "Cedar Health",
        industry: "healthcare",
        size: "medium",
        revenue: 8_500_000.0,
        website: "https://cedar.example.com",
    },
];

/// Insert demo companies, stakeholders, opportunities and tasks
///
/// Does nothing when companies already exist. Returns whether data was written.
pub async fn seed_demo(conn: &DatabaseConnection) -> anyhow::Result<bool> {
    if a001_company::repository::count(conn).await? > 0 {
        tracing::debug!("Database already has data, demo seed skipped");
        return Ok(false);
    }

    let mut company_ids = Vec::with_capacity(COMPANIES.len());
    for demo in COMPANIES {
        let mut company = Company::new(0, demo.name);
        company.industry = Some(demo.industry.into());
        company.size = Some(demo.size.into());
        company.annual_revenue = Some(demo.revenue);
        company.website = Some(demo.website.into());
        company_ids.push(a001_company::repository::insert(conn, &company).await?);
    }

    let people = [
        ("Dana Ortiz", "Chief Technology Officer", "high", 0),
        ("Lee Park", "Procurement Lead", "medium", 0),
        ("Sam Reyes", "Chief Financial Officer", "high", 1),
        ("Kim Vo", "Practice Manager", "low", 2),
    ];
    for (name, title, influence, company) in people {
        let mut person = Stakeholder::new(0, name);
        person.job_title = Some(title.into());
        person.influence = Some(influence.into());
        person.company_id = company_ids.get(company).copied();
        person.email = Some(format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', ".")
        ));
        a002_stakeholder::repository::insert(conn, &person).await?;
    }

    let today = Utc::now().date_naive();
    let deals = [
        ("Platform renewal", "negotiation", 180_000.0, 70, 20, 0),
        ("Analytics add-on", "proposal", 24_000.0, 40, 45, 0),
        ("Core banking pilot", "won", 65_000.0, 100, -15, 1),
        ("Clinic scheduling", "open", 6_500.0, 20, 60, 2),
        ("Records migration", "lost", 12_000.0, 0, -40, 2),
    ];
    let mut deal_ids = Vec::with_capacity(deals.len());
    for (name, stage, value, probability, close_in, company) in deals {
        let mut deal = Opportunity::new(0, name, stage);
        deal.value = Some(value);
        deal.probability = Some(probability);
        deal.expected_close_date = Some(today + Duration::days(close_in));
        deal.company_id = company_ids.get(company).copied();
        deal_ids.push(a003_opportunity::repository::insert(conn, &deal).await?);
    }

    let tasks = [
        ("Send revised contract", "in_progress", "high", Some(-1), 0),
        ("Schedule security review", "todo", "medium", Some(0), 0),
        ("Prepare pricing sheet", "todo", "high", Some(4), 1),
        ("Kickoff call", "done", "medium", Some(-14), 2),
        ("Collect requirements", "todo", "low", None, 3),
    ];
    for (title, status, priority, due_in, deal) in tasks {
        let mut task = Task::new(0, title);
        task.status = status.into();
        task.priority = Some(priority.into());
        task.due_date = due_in.map(|days| today + Duration::days(days));
        task.completed = status == "done";
        task.opportunity_id = deal_ids.get(deal).copied();
        a004_task::repository::insert(conn, &task).await?;
    }

    tracing::info!(
        "Seeded demo data: {} companies, {} stakeholders, {} opportunities, {} tasks",
        company_ids.len(),
        people.len(),
        deal_ids.len(),
        tasks.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::shared::metadata::{EntityDescriptor, EntityRef, FieldKind, ModelMetadata, Record};
    use sea_orm::EntityTrait;

    fn assert_declared_choices<T: Record + EntityDescriptor>(records: &[T]) {
        let meta = ModelMetadata::from_entity(EntityRef::of::<T>());
        assert!(!records.is_empty(), "{}", meta.entity_name);
        for field in meta.fields.iter().filter(|f| f.kind == FieldKind::SingleChoice) {
            for record in records {
                if let Some(value) = record.value(field.name).group_key() {
                    assert!(
                        field.choice(&value).is_some(),
                        "{}.{} = {value}",
                        meta.entity_name,
                        field.name
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn test_seeded_choice_values_are_declared() {
        let conn = connect_in_memory().await.unwrap();
        seed_demo(&conn).await.unwrap();

        let companies = a001_company::repository::fetch(&conn, a001_company::repository::Entity::find()).await.unwrap();
        assert_declared_choices(&companies);
        let people = a002_stakeholder::repository::fetch(&conn, a002_stakeholder::repository::Entity::find()).await.unwrap();
        assert_declared_choices(&people);
        let deals = a003_opportunity::repository::fetch(&conn, a003_opportunity::repository::Entity::find()).await.unwrap();
        assert_declared_choices(&deals);
        let tasks = a004_task::repository::fetch(&conn, a004_task::repository::Entity::find()).await.unwrap();
        assert_declared_choices(&tasks);
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let conn = connect_in_memory().await.unwrap();
        assert!(seed_demo(&conn).await.unwrap());
        assert!(!seed_demo(&conn).await.unwrap());
        assert_eq!(a001_company::repository::count(&conn).await.unwrap(), 3);
    }
}
