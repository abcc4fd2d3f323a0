use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::metadata::{ENTITY_METADATA, FIELDS};
use crate::domain::a003_opportunity::Opportunity;
use crate::shared::metadata::{
    EntityDescriptor, EntityMetadataInfo, FieldMetadata, FieldValue, Record,
};

/// Follow-up work item, optionally attached to an opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub opportunity_id: Option<i64>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity: Option<Opportunity>,
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: None,
            status: "todo".to_string(),
            priority: None,
            due_date: None,
            opportunity_id: None,
            completed: false,
            created_at: now,
            updated_at: now,
            opportunity: None,
        }
    }
}

impl Record for Task {
    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => self.id.into(),
            "title" => self.title.clone().into(),
            "description" => self.description.clone().into(),
            "status" => self.status.clone().into(),
            "priority" => self.priority.clone().into(),
            "due_date" => self.due_date.into(),
            "opportunity" | "opportunity_id" => self.opportunity_id.into(),
            "completed" => self.completed.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }

    fn related(&self, relation: &str) -> Option<&dyn Record> {
        match relation {
            "opportunity" => self.opportunity.as_ref().map(|o| o as &dyn Record),
            _ => None,
        }
    }
}

impl EntityDescriptor for Task {
    fn entity_metadata_info() -> &'static EntityMetadataInfo {
        &ENTITY_METADATA
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}
