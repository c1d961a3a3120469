//! SeaORM entities for the marketplace tables.

pub mod bid;
pub mod employee;
pub mod organization;
pub mod organization_responsible;
pub mod tender;
