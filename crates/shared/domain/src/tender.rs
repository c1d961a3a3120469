//! Tender domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::*;
use crate::error::{DomainError, DomainResult};
use crate::{OrganizationId, TenderId};

/// Kind of work a tender requests.
///
/// Any other string is "undefined" and fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenderServiceType {
    Construction,
    Delivery,
    Manufacture,
}

impl TenderServiceType {
    /// Every defined service type, used when a listing has no filter
    pub const ALL: [TenderServiceType; 3] = [
        TenderServiceType::Construction,
        TenderServiceType::Delivery,
        TenderServiceType::Manufacture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenderServiceType::Construction => SERVICE_TYPE_CONSTRUCTION,
            TenderServiceType::Delivery => SERVICE_TYPE_DELIVERY,
            TenderServiceType::Manufacture => SERVICE_TYPE_MANUFACTURE,
        }
    }
}

impl FromStr for TenderServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SERVICE_TYPE_CONSTRUCTION => Ok(TenderServiceType::Construction),
            SERVICE_TYPE_DELIVERY => Ok(TenderServiceType::Delivery),
            SERVICE_TYPE_MANUFACTURE => Ok(TenderServiceType::Manufacture),
            other => Err(DomainError::UnknownServiceType(other.to_string())),
        }
    }
}

impl fmt::Display for TenderServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tender lifecycle status: Created -> Published -> Closed.
///
/// Transitions are not validated; an authorized caller may set any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenderStatus {
    Created,
    Published,
    Closed,
}

impl TenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenderStatus::Created => TENDER_STATUS_CREATED,
            TenderStatus::Published => TENDER_STATUS_PUBLISHED,
            TenderStatus::Closed => TENDER_STATUS_CLOSED,
        }
    }
}

impl FromStr for TenderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TENDER_STATUS_CREATED => Ok(TenderStatus::Created),
            TENDER_STATUS_PUBLISHED => Ok(TenderStatus::Published),
            TENDER_STATUS_CLOSED => Ok(TenderStatus::Closed),
            other => Err(DomainError::UnknownTenderStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tender domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: TenderId,
    pub name: String,
    pub description: String,
    pub service_type: TenderServiceType,
    pub status: TenderStatus,
    pub organization_id: OrganizationId,
    /// Never compared or incremented by the service layer
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl Tender {
    /// Build a freshly created tender with a server-assigned id, status and timestamp.
    pub fn create(new: NewTender) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            service_type: new.service_type,
            status: TenderStatus::Created,
            organization_id: new.organization_id,
            version: INITIAL_VERSION,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the fields present in `update`, leaving absent ones untouched.
    pub fn apply(mut self, update: &TenderUpdate) -> DomainResult<Self> {
        if let Some(service_type) = update.service_type()? {
            self.service_type = service_type;
        }
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        Ok(self)
    }
}

/// Tender creation data transfer object
#[derive(Debug, Clone, PartialEq)]
pub struct NewTender {
    pub name: String,
    pub description: String,
    pub service_type: TenderServiceType,
    pub organization_id: OrganizationId,
}

/// Partial tender update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Raw service type, decoded on use
    pub service_type: Option<String>,
}

impl TenderUpdate {
    /// Decode the requested service type, if any.
    pub fn service_type(&self) -> DomainResult<Option<TenderServiceType>> {
        self.service_type.as_deref().map(str::parse).transpose()
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.service_type.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tender() -> Tender {
        Tender::create(NewTender {
            name: "Bridge".to_string(),
            description: "Build a bridge".to_string(),
            service_type: TenderServiceType::Construction,
            organization_id: Uuid::new_v4(),
        })
    }

    #[test]
    fn test_create_assigns_server_fields() {
        let before = Utc::now();
        let t = tender();

        assert!(!t.id.is_nil());
        assert_eq!(t.status, TenderStatus::Created);
        assert_eq!(t.version, INITIAL_VERSION);
        assert!(t.created_at >= before);
    }

    #[test]
    fn test_apply_only_overwrites_present_fields() {
        let original = tender();
        let update = TenderUpdate {
            description: Some("X".to_string()),
            ..Default::default()
        };

        let updated = original.clone().apply(&update).unwrap();

        assert_eq!(updated.description, "X");
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.service_type, original.service_type);
    }

    #[test]
    fn test_apply_rejects_unknown_service_type() {
        let update = TenderUpdate {
            service_type: Some("Catering".to_string()),
            ..Default::default()
        };

        assert_eq!(
            tender().apply(&update),
            Err(DomainError::UnknownServiceType("Catering".to_string()))
        );
    }

    #[test]
    fn test_service_type_round_trips_wire_value() {
        for service_type in TenderServiceType::ALL {
            assert_eq!(service_type.as_str().parse(), Ok(service_type));
        }
        assert!("".parse::<TenderServiceType>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Published".parse(), Ok(TenderStatus::Published));
        assert_eq!(
            "published".parse::<TenderStatus>(),
            Err(DomainError::UnknownTenderStatus("published".to_string()))
        );
    }
}
