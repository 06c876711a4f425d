use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::dashboard;
use super::domain::{InquiryDraft, InquiryId, ListingStatus, PropertyDraft, PropertyId};
use super::filter::ListingFilter;
use super::inquiries::InquiryService;
use super::listings::{ListingService, FEATURED_LIMIT};
use super::store::CatalogStore;
use super::CatalogError;
use crate::session::{Principal, SessionAuthority};

/// Shared state for the catalog router.
pub struct CatalogRouterState<S> {
    pub listings: Arc<ListingService<S>>,
    pub inquiries: Arc<InquiryService<S>>,
    pub store: Arc<S>,
    pub sessions: Arc<SessionAuthority>,
}

impl<S> Clone for CatalogRouterState<S> {
    fn clone(&self) -> Self {
        Self {
            listings: Arc::clone(&self.listings),
            inquiries: Arc::clone(&self.inquiries),
            store: Arc::clone(&self.store),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<S: CatalogStore> CatalogRouterState<S> {
    pub fn new(store: Arc<S>, sessions: Arc<SessionAuthority>) -> Self {
        Self {
            listings: Arc::new(ListingService::new(Arc::clone(&store), Arc::clone(&sessions))),
            inquiries: Arc::new(InquiryService::new(Arc::clone(&store), Arc::clone(&sessions))),
            store,
            sessions,
        }
    }
}

/// HTTP surface over the catalog core. Visitor routes are open; admin routes
/// rely on the services' own session gate, so a missing admin session yields
/// 401 from the domain layer rather than from middleware.
pub fn catalog_router<S: CatalogStore + 'static>(state: CatalogRouterState<S>) -> Router {
    Router::new()
        .route("/api/v1/listings", get(browse_handler::<S>))
        .route("/api/v1/listings/featured", get(featured_handler::<S>))
        .route("/api/v1/listings/:id", get(detail_handler::<S>))
        .route(
            "/api/v1/listings/:id/inquiries",
            post(submit_inquiry_handler::<S>),
        )
        .route(
            "/api/v1/admin/listings",
            get(manage_listings_handler::<S>).post(create_listing_handler::<S>),
        )
        .route(
            "/api/v1/admin/listings/:id",
            put(update_listing_handler::<S>).delete(delete_listing_handler::<S>),
        )
        .route(
            "/api/v1/admin/listings/:id/images",
            put(set_images_handler::<S>),
        )
        .route(
            "/api/v1/admin/listings/:id/status",
            put(set_status_handler::<S>),
        )
        .route("/api/v1/admin/inquiries", get(list_inquiries_handler::<S>))
        .route(
            "/api/v1/admin/inquiries/:id/responded",
            post(toggle_responded_handler::<S>),
        )
        .route("/api/v1/admin/dashboard", get(dashboard_handler::<S>))
        .route("/api/v1/admin/session", post(session_handler::<S>))
        .with_state(state)
}

fn error_response(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::NotFound => StatusCode::NOT_FOUND,
        CatalogError::Unauthorized => StatusCode::UNAUTHORIZED,
        CatalogError::Store(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub(crate) async fn browse_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Query(filter): Query<ListingFilter>,
) -> Response {
    match state.listings.browse(&filter) {
        Ok(listings) => (StatusCode::OK, Json(listings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn featured_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
) -> Response {
    match state.listings.featured(FEATURED_LIMIT) {
        Ok(listings) => (StatusCode::OK, Json(listings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.listings.get(&PropertyId(id)) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_inquiry_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<InquiryDraft>,
) -> Response {
    match state.inquiries.submit(PropertyId(id), draft) {
        Ok(inquiry) => (StatusCode::CREATED, Json(inquiry)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn manage_listings_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
) -> Response {
    match state.listings.manage_all() {
        Ok(listings) => (StatusCode::OK, Json(listings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_listing_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Json(draft): Json<PropertyDraft>,
) -> Response {
    match state.listings.create(draft) {
        Ok(listing) => (StatusCode::CREATED, Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_listing_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<PropertyDraft>,
) -> Response {
    match state.listings.update(&PropertyId(id), draft) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_listing_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.listings.delete(&PropertyId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn set_images_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
    Json(urls): Json<Vec<String>>,
) -> Response {
    match state.listings.set_images(&PropertyId(id), urls) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    status: ListingStatus,
}

pub(crate) async fn set_status_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Response {
    match state.listings.set_status(&PropertyId(id), body.status) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_inquiries_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
) -> Response {
    match state.inquiries.list_all() {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn toggle_responded_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.inquiries.toggle_responded(&InquiryId(id)) {
        Ok(inquiry) => (StatusCode::OK, Json(inquiry)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
) -> Response {
    match dashboard::snapshot(state.store.as_ref(), state.sessions.as_ref(), Utc::now()) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Session-change event feed from the presentation layer. `email: null`
/// reports a signed-out session.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionEvent {
    email: Option<String>,
}

pub(crate) async fn session_handler<S: CatalogStore>(
    State(state): State<CatalogRouterState<S>>,
    Json(event): Json<SessionEvent>,
) -> Response {
    let principal = event.email.map(Principal::new);
    match state.sessions.on_session_change(principal.as_ref()) {
        Ok(auth_state) => (
            StatusCode::OK,
            Json(json!({ "state": auth_state.label() })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
