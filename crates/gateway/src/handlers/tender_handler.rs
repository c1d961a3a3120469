//! Tender handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use axum_extra::extract::Query as MultiQuery;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{NewTender, Tender, TenderServiceType, TenderStatus, TenderUpdate};

use super::{parse_id, require_username, PageQuery, UserQuery};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Tender creation request with validation
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    #[serde(default)]
    pub description: String,
    pub service_type: String,
    pub organization_id: Uuid,
    #[validate(length(min = 1, message = "Creator username is required"))]
    pub creator_username: String,
}

/// Partial tender update; absent or null fields stay unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequest {
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    pub service_type: Option<String>,
}

impl From<EditTenderRequest> for TenderUpdate {
    fn from(req: EditTenderRequest) -> Self {
        TenderUpdate {
            name: req.name,
            description: req.description,
            service_type: req.service_type,
        }
    }
}

/// Listing filter; `service_type` may repeat
#[derive(Debug, Default, Deserialize)]
pub struct ListTendersQuery {
    #[serde(default)]
    pub service_type: Vec<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub status: String,
}

/// Create tender routes
pub fn tender_routes() -> Router<AppState> {
    Router::new()
        .route("/tenders", get(list_tenders))
        .route("/tenders/new", post(create_tender))
        .route("/tenders/my", get(list_my_tenders))
        .route("/tenders/:id/status", get(get_tender_status).put(set_tender_status))
        .route("/tenders/:id/edit", patch(edit_tender))
}

pub async fn create_tender(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTenderRequest>,
) -> AppResult<Json<Tender>> {
    let new_tender = NewTender {
        name: req.name,
        description: req.description,
        service_type: req.service_type.parse()?,
        organization_id: req.organization_id,
    };

    let tender = state
        .deadline(state.tenders.create_tender(new_tender, &req.creator_username))
        .await?;
    Ok(Json(tender))
}

pub async fn list_tenders(
    State(state): State<AppState>,
    MultiQuery(query): MultiQuery<ListTendersQuery>,
) -> AppResult<Json<Vec<Tender>>> {
    let service_types = query
        .service_type
        .iter()
        .map(|raw| raw.parse::<TenderServiceType>())
        .collect::<Result<Vec<_>, _>>()?;
    let window = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .window()?;

    let tenders = state
        .deadline(state.tenders.list_tenders(service_types, window))
        .await?;
    Ok(Json(tenders))
}

pub async fn list_my_tenders(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<Tender>>> {
    let window = page.window()?;

    let tenders = state
        .deadline(state.tenders.list_my_tenders(user.username()?, window))
        .await?;
    Ok(Json(tenders))
}

pub async fn get_tender_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(user): Query<UserQuery>,
) -> AppResult<Json<TenderStatus>> {
    let tender_id = parse_id(&id)?;

    let status = state
        .deadline(state.tenders.get_status(tender_id, user.username()?))
        .await?;
    Ok(Json(status))
}

pub async fn set_tender_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<Tender>> {
    let tender_id = parse_id(&id)?;
    let status: TenderStatus = query.status.parse()?;

    let tender = state
        .deadline(
            state
                .tenders
                .set_status(tender_id, require_username(&query.username)?, status),
        )
        .await?;
    Ok(Json(tender))
}

pub async fn edit_tender(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(user): Query<UserQuery>,
    ValidatedJson(req): ValidatedJson<EditTenderRequest>,
) -> AppResult<Json<Tender>> {
    let tender_id = parse_id(&id)?;

    let tender = state
        .deadline(
            state
                .tenders
                .edit_tender(tender_id, TenderUpdate::from(req), user.username()?),
        )
        .await?;
    Ok(Json(tender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

    #[test]
    fn test_edit_request_keeps_empty_strings() {
        let req: EditTenderRequest =
            serde_json::from_str(r#"{"description": "", "serviceType": null}"#).unwrap();
        let update = TenderUpdate::from(req);

        assert_eq!(update.name, None);
        assert_eq!(update.description.as_deref(), Some(""));
        assert_eq!(update.service_type, None);
    }

    #[test]
    fn test_create_request_limits() {
        let req = CreateTenderRequest {
            name: "n".repeat(MAX_NAME_LENGTH as usize),
            description: "d".repeat(MAX_DESCRIPTION_LENGTH as usize),
            service_type: "Delivery".to_string(),
            organization_id: Uuid::new_v4(),
            creator_username: "alice".to_string(),
        };
        assert!(req.validate().is_ok());

        let anonymous = CreateTenderRequest {
            creator_username: String::new(),
            service_type: req.service_type.clone(),
            name: req.name.clone(),
            description: String::new(),
            ..req
        };
        assert!(anonymous.validate().is_err());

        let too_long = CreateTenderRequest {
            name: "n".repeat(MAX_NAME_LENGTH as usize + 1),
            ..req
        };
        assert!(too_long.validate().is_err());
    }
}
