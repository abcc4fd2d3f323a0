//! CRM entity declarations
//!
//! Each aggregate module declares `ENTITY_METADATA` and `FIELDS` as statics
//! and implements [`EntityDescriptor`](crate::shared::metadata::EntityDescriptor)
//! and [`Record`](crate::shared::metadata::Record) on its aggregate struct.

pub mod a001_company;
pub mod a002_stakeholder;
pub mod a003_opportunity;
pub mod a004_task;

use crate::shared::metadata::EntityRef;

/// Declarations of every CRM entity type, in registration order
pub fn all_entities() -> [EntityRef; 4] {
    [
        EntityRef::of::<a001_company::Company>(),
        EntityRef::of::<a002_stakeholder::Stakeholder>(),
        EntityRef::of::<a003_opportunity::Opportunity>(),
        EntityRef::of::<a004_task::Task>(),
    ]
}
