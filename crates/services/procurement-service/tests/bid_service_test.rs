//! Bid service behavior over the in-memory store.

mod support;

use common::AppError;
use domain::{NewBid, Tender, TenderServiceType, TenderStatus, BID_STATUS_CREATED};
use procurement_service_lib::service::{BidService, TenderService};
use support::{Fixture, OUTSIDER, OWNER};
use uuid::Uuid;

async fn open_tender(fx: &Fixture) -> Tender {
    fx.tenders
        .create_tender(fx.new_tender("Warehouse", TenderServiceType::Construction), OWNER)
        .await
        .unwrap()
}

fn user_bid(name: &str, tender_id: Uuid, author_id: Uuid) -> NewBid {
    NewBid {
        name: name.to_string(),
        description: "Offer".to_string(),
        tender_id,
        author_type: "User".to_string(),
        author_id,
    }
}

#[tokio::test]
async fn test_create_bid_by_user() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;

    let bid = fx
        .bids
        .create_bid(user_bid("First", tender.id, fx.outsider_id))
        .await
        .unwrap();

    assert_eq!(bid.status, BID_STATUS_CREATED);
    assert_eq!(bid.version, 1);
    assert_eq!(bid.tender_id, tender.id);
}

#[tokio::test]
async fn test_create_bid_by_organization() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;
    let mut new = user_bid("Corporate", tender.id, fx.organization_id);
    new.author_type = "Organization".to_string();

    let result = fx.bids.create_bid(new).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_bid_unknown_author() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;

    let result = fx
        .bids
        .create_bid(user_bid("Ghost", tender.id, Uuid::new_v4()))
        .await;

    assert!(matches!(result, Err(AppError::UserNotExists)));
}

#[tokio::test]
async fn test_create_bid_unknown_author_type() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;
    let mut new = user_bid("Beep", tender.id, fx.outsider_id);
    new.author_type = "Robot".to_string();

    let result = fx.bids.create_bid(new).await;

    assert!(matches!(result, Err(AppError::WrongInputFormat(_))));
}

#[tokio::test]
async fn test_list_my_bids_ordered_by_name() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;
    for name in ["zeta", "alpha"] {
        fx.bids
            .create_bid(user_bid(name, tender.id, fx.outsider_id))
            .await
            .unwrap();
    }

    let bids = fx.bids.list_my_bids(OUTSIDER).await.unwrap();

    let names: Vec<_> = bids.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_list_tender_bids_for_owner_only() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;
    fx.bids
        .create_bid(user_bid("Offer", tender.id, fx.outsider_id))
        .await
        .unwrap();

    let owner_view = fx.bids.list_tender_bids(tender.id, OWNER).await.unwrap();
    let outsider_view = fx.bids.list_tender_bids(tender.id, OUTSIDER).await;

    assert_eq!(owner_view.len(), 1);
    assert!(matches!(outsider_view, Err(AppError::NotEnoughRights)));
}

#[tokio::test]
async fn test_bid_status_for_author() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;
    let bid = fx
        .bids
        .create_bid(user_bid("Offer", tender.id, fx.outsider_id))
        .await
        .unwrap();

    let status = fx.bids.get_status(bid.id, OUTSIDER).await.unwrap();
    let denied = fx.bids.get_status(bid.id, OWNER).await;

    assert_eq!(status, BID_STATUS_CREATED);
    assert!(matches!(denied, Err(AppError::NotEnoughRights)));
}

#[tokio::test]
async fn test_bid_status_missing_bid() {
    let fx = Fixture::new().await;

    let result = fx.bids.get_status(Uuid::new_v4(), OWNER).await;

    assert!(matches!(result, Err(AppError::NotEnoughRights)));
}

#[tokio::test]
async fn test_submit_decision_missing_bid() {
    let fx = Fixture::new().await;

    let result = fx
        .bids
        .submit_decision(Uuid::new_v4(), "Approved", OWNER)
        .await;

    assert!(matches!(result, Err(AppError::BidNotFound)));
}

#[tokio::test]
async fn test_submit_decision_rejected_keeps_tender_status() {
    let fx = Fixture::new().await;
    let tender = open_tender(&fx).await;
    fx.tenders
        .set_status(tender.id, OWNER, TenderStatus::Published)
        .await
        .unwrap();
    let bid = fx
        .bids
        .create_bid(user_bid("Offer", tender.id, fx.outsider_id))
        .await
        .unwrap();

    fx.bids
        .submit_decision(bid.id, "Rejected", OUTSIDER)
        .await
        .unwrap();

    let stored = fx.store.tender(tender.id).await.unwrap();
    assert_eq!(stored.status, TenderStatus::Published);
}
