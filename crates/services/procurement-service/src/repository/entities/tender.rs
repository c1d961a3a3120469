//! Tender database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainError, Tender};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tenders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_type: String,
    pub status: String,
    /// Stored as `uuid`; databases created with a `VARCHAR` column need a migration first.
    pub organization_id: Uuid,
    pub version: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Tender {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Tender {
            id: model.id,
            name: model.name,
            description: model.description.unwrap_or_default(),
            service_type: model.service_type.parse()?,
            status: model.status.parse()?,
            organization_id: model.organization_id,
            version: model.version,
            created_at: model.created_at.and_utc(),
        })
    }
}

impl From<&Tender> for ActiveModel {
    fn from(tender: &Tender) -> Self {
        ActiveModel {
            id: Set(tender.id),
            name: Set(tender.name.clone()),
            description: Set(Some(tender.description.clone())),
            service_type: Set(tender.service_type.as_str().to_string()),
            status: Set(tender.status.as_str().to_string()),
            organization_id: Set(tender.organization_id),
            version: Set(tender.version),
            created_at: Set(tender.created_at.naive_utc()),
        }
    }
}
