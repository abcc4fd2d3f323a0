use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::metadata::{ENTITY_METADATA, FIELDS};
use crate::domain::a001_company::Company;
use crate::shared::metadata::{
    EntityDescriptor, EntityMetadataInfo, FieldMetadata, FieldValue, Record,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: i64,
    pub name: String,
    pub company_id: Option<i64>,
    pub stage: String,
    pub value: Option<f64>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl Opportunity {
    pub fn new(id: i64, name: impl Into<String>, stage: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            company_id: None,
            stage: stage.into(),
            value: None,
            probability: None,
            expected_close_date: None,
            description: None,
            created_at: now,
            updated_at: now,
            company: None,
        }
    }

    /// Attach the owning company, keeping the foreign key in sync
    pub fn with_company(mut self, company: Company) -> Self {
        self.company_id = Some(company.id);
        self.company = Some(company);
        self
    }
}

impl Record for Opportunity {
    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "company" | "company_id" => self.company_id.into(),
            "stage" => self.stage.clone().into(),
            "value" => self.value.into(),
            "probability" => self.probability.into(),
            "expected_close_date" => self.expected_close_date.into(),
            "description" => self.description.clone().into(),
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

impl EntityDescriptor for Opportunity {
    fn entity_metadata_info() -> &'static EntityMetadataInfo {
        &ENTITY_METADATA
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}
