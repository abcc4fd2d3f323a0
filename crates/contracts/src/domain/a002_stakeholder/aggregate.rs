use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metadata::{ENTITY_METADATA, FIELDS};
use crate::domain::a001_company::Company;
use crate::shared::metadata::{
    EntityDescriptor, EntityMetadataInfo, FieldMetadata, FieldValue, Record,
};

/// A person at a company involved in a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub company_id: Option<i64>,
    pub influence: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Loaded relation, present when the list query joined it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl Stakeholder {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            email: None,
            job_title: None,
            company_id: None,
            influence: None,
            phone: None,
            notes: None,
            created_at: now,
            updated_at: now,
            company: None,
        }
    }
}

impl Record for Stakeholder {
    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "email" => self.email.clone().into(),
            "job_title" => self.job_title.clone().into(),
            "company" | "company_id" => self.company_id.into(),
            "influence" => self.influence.clone().into(),
            "phone" => self.phone.clone().into(),
            "notes" => self.notes.clone().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }

    fn related(&self, relation: &str) -> Option<&dyn Record> {
        match relation {
            "company" => self.company.as_ref().map(|c| c as &dyn Record),
            _ => None,
        }
    }
}

impl EntityDescriptor for Stakeholder {
    fn entity_metadata_info() -> &'static EntityMetadataInfo {
        &ENTITY_METADATA
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}
