use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metadata::{ENTITY_METADATA, FIELDS};
use crate::shared::metadata::{
    EntityDescriptor, EntityMetadataInfo, FieldMetadata, FieldValue, Record,
};

/// A customer or prospect organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub annual_revenue: Option<f64>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            industry: None,
            size: None,
            annual_revenue: None,
            website: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Company {
    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "industry" => self.industry.clone().into(),
            "size" => self.size.clone().into(),
            "annual_revenue" => self.annual_revenue.into(),
            "website" => self.website.clone().into(),
            "description" => self.description.clone().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl EntityDescriptor for Company {
    fn entity_metadata_info() -> &'static EntityMetadataInfo {
        &ENTITY_METADATA
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}
