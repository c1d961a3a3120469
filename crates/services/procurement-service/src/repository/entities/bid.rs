//! Bid database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Bid, DomainError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bid")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    /// `uuid` column, like `author_id`; older `VARCHAR` schemas must be migrated.
    pub tender_id: Uuid,
    pub author_type: String,
    pub author_id: Uuid,
    pub version: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Bid {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Bid {
            id: model.id,
            name: model.name,
            description: model.description.unwrap_or_default(),
            status: model.status,
            tender_id: model.tender_id,
            author_type: model.author_type.parse()?,
            author_id: model.author_id,
            version: model.version,
            created_at: model.created_at.and_utc(),
        })
    }
}

impl From<&Bid> for ActiveModel {
    fn from(bid: &Bid) -> Self {
        ActiveModel {
            id: Set(bid.id),
            name: Set(bid.name.clone()),
            description: Set(Some(bid.description.clone())),
            status: Set(bid.status.clone()),
            tender_id: Set(bid.tender_id),
            author_type: Set(bid.author_type.as_str().to_string()),
            author_id: Set(bid.author_id),
            version: Set(bid.version),
            created_at: Set(bid.created_at.naive_utc()),
        }
    }
}
