pub mod a001_company;
pub mod a002_stakeholder;
pub mod a003_opportunity;
pub mod a004_task;
