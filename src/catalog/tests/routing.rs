use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::common::*;
use crate::catalog::filter::ListingFilter;
use crate::catalog::router::{
    browse_handler, create_listing_handler, detail_handler, session_handler,
    submit_inquiry_handler, toggle_responded_handler, CatalogRouterState,
};
use crate::catalog::store::MemoryCatalog;
use crate::session::SessionAuthority;

fn state_with(sessions: Arc<SessionAuthority>) -> CatalogRouterState<MemoryCatalog> {
    CatalogRouterState::new(Arc::new(MemoryCatalog::new()), sessions)
}

#[tokio::test]
async fn browse_returns_ok_for_default_filter() {
    let state = state_with(anonymous_session());
    state
        .listings
        .browse(&ListingFilter::default())
        .expect("service reachable");

    let response = browse_handler(State(state), Query(ListingFilter::default())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn browse_rejects_out_of_contract_category() {
    let state = state_with(anonymous_session());
    let filter = ListingFilter {
        category: Some("Lease".to_string()),
        ..ListingFilter::default()
    };

    let response = browse_handler(State(state), Query(filter)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn detail_of_unknown_listing_is_not_found() {
    let state = state_with(anonymous_session());
    let response = detail_handler(State(state), Path("prop-404404".to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_without_admin_session_is_unauthorized() {
    let state = state_with(anonymous_session());
    let response =
        create_listing_handler(State(state), Json(available_rent_draft("Blocked"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_with_admin_session_is_created() {
    let state = state_with(admin_session());
    let response =
        create_listing_handler(State(state), Json(available_rent_draft("Permitted"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn inquiry_submission_is_open_to_visitors() {
    let state = state_with(anonymous_session());
    let response = submit_inquiry_handler(
        State(state),
        Path("prop-000001".to_string()),
        Json(inquiry_draft("Dana")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn toggle_responded_maps_missing_inquiry_to_not_found() {
    let state = state_with(admin_session());
    let response =
        toggle_responded_handler(State(state), Path("inq-404404".to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_event_feed_flips_the_admin_gate() {
    let state = state_with({
        // Authority still in its bootstrap state; events drive it from here.
        let sessions = SessionAuthority::new(
            Box::new(crate::session::SingleAdminPolicy::new(ADMIN_EMAIL)),
            Box::new(QuietIdentity),
        );
        Arc::new(sessions)
    });

    let blocked =
        create_listing_handler(State(state.clone()), Json(available_rent_draft("Early"))).await;
    assert_eq!(blocked.status(), StatusCode::UNAUTHORIZED);

    let event = serde_json::json!({ "email": ADMIN_EMAIL });
    let resolved = session_handler(
        State(state.clone()),
        Json(serde_json::from_value(event).expect("valid event")),
    )
    .await;
    assert_eq!(resolved.status(), StatusCode::OK);

    let allowed =
        create_listing_handler(State(state), Json(available_rent_draft("Late"))).await;
    assert_eq!(allowed.status(), StatusCode::CREATED);
}
