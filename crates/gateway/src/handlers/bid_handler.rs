//! Bid handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Bid, NewBid};

use super::{parse_id, require_username, UserQuery};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Bid creation request with validation
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    #[serde(default)]
    pub description: String,
    pub tender_id: Uuid,
    /// `Organization` or `User`
    pub author_type: String,
    pub author_id: Uuid,
}

impl From<CreateBidRequest> for NewBid {
    fn from(req: CreateBidRequest) -> Self {
        NewBid {
            name: req.name,
            description: req.description,
            tender_id: req.tender_id,
            author_type: req.author_type,
            author_id: req.author_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionQuery {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub decision: String,
}

/// Create bid routes
pub fn bid_routes() -> Router<AppState> {
    Router::new()
        .route("/bids/new", post(create_bid))
        .route("/bids/my", get(list_my_bids))
        .route("/bids/:id/list", get(list_tender_bids))
        .route("/bids/:id/status", get(get_bid_status))
        .route("/bids/:id/submit_decision", put(submit_decision))
}

pub async fn create_bid(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateBidRequest>,
) -> AppResult<Json<Bid>> {
    let bid = state
        .deadline(state.bids.create_bid(NewBid::from(req)))
        .await?;
    Ok(Json(bid))
}

pub async fn list_my_bids(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
) -> AppResult<Json<Vec<Bid>>> {
    let bids = state
        .deadline(state.bids.list_my_bids(user.username()?))
        .await?;
    Ok(Json(bids))
}

/// Bids of a tender; the path carries the tender id
pub async fn list_tender_bids(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(user): Query<UserQuery>,
) -> AppResult<Json<Vec<Bid>>> {
    let tender_id = parse_id(&id)?;

    let bids = state
        .deadline(state.bids.list_tender_bids(tender_id, user.username()?))
        .await?;
    Ok(Json(bids))
}

pub async fn get_bid_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(user): Query<UserQuery>,
) -> AppResult<Json<String>> {
    let bid_id = parse_id(&id)?;

    let status = state
        .deadline(state.bids.get_status(bid_id, user.username()?))
        .await?;
    Ok(Json(status))
}

pub async fn submit_decision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DecisionQuery>,
) -> AppResult<Json<Bid>> {
    let bid_id = parse_id(&id)?;

    let bid = state
        .deadline(
            state
                .bids
                .submit_decision(bid_id, &query.decision, require_username(&query.username)?),
        )
        .await?;
    Ok(Json(bid))
}
