use std::sync::Arc;

use super::common::*;
use crate::catalog::domain::{InquiryId, PropertyId, ValidationError};
use crate::catalog::inquiries::{InquiryService, UNKNOWN_PROPERTY_TITLE};
use crate::catalog::listings::ListingService;
use crate::catalog::store::MemoryCatalog;
use crate::catalog::CatalogError;

fn services(
    store: Arc<MemoryCatalog>,
) -> (ListingService<MemoryCatalog>, InquiryService<MemoryCatalog>) {
    let sessions = admin_session();
    (
        ListingService::new(store.clone(), sessions.clone()),
        InquiryService::new(store, sessions),
    )
}

#[test]
fn submit_needs_no_session_and_defaults_to_unresponded() {
    let store = Arc::new(MemoryCatalog::new());
    let service = InquiryService::new(store, anonymous_session());

    let inquiry = service
        .submit(PropertyId("prop-000001".to_string()), inquiry_draft("Dana"))
        .expect("submit succeeds");

    assert!(!inquiry.responded);
    assert!(!inquiry.id.0.is_empty());
    assert_eq!(inquiry.name, "Dana");
    assert_eq!(inquiry.phone, None);
}

#[test]
fn submit_does_not_verify_the_listing_exists() {
    let store = Arc::new(MemoryCatalog::new());
    let service = InquiryService::new(store, anonymous_session());

    // Fire-and-forget reference: no listing with this id was ever created.
    let inquiry = service
        .submit(PropertyId("prop-999999".to_string()), inquiry_draft("Lee"))
        .expect("submit succeeds");
    assert_eq!(inquiry.property_id.0, "prop-999999");
}

#[test]
fn submit_rejects_blank_message() {
    let service = InquiryService::new(Arc::new(MemoryCatalog::new()), anonymous_session());

    let mut draft = inquiry_draft("Sam");
    draft.message = String::new();

    match service.submit(PropertyId("prop-000001".to_string()), draft) {
        Err(CatalogError::Validation(ValidationError::MissingField { field: "message" })) => {}
        other => panic!("expected message validation error, got {other:?}"),
    }
}

#[test]
fn list_all_joins_titles_and_tolerates_dangling_references() {
    let store = Arc::new(MemoryCatalog::new());
    let (listings, inquiries) = services(store.clone());

    let kept = listings
        .create(available_rent_draft("Kept listing"))
        .expect("create");
    let doomed = listings
        .create(available_rent_draft("Doomed listing"))
        .expect("create");

    inquiries
        .submit(kept.id.clone(), inquiry_draft("Ana"))
        .expect("submit");
    inquiries
        .submit(doomed.id.clone(), inquiry_draft("Bo"))
        .expect("submit");

    listings.delete(&doomed.id).expect("delete");

    let views = inquiries.list_all().expect("list all succeeds");
    assert_eq!(views.len(), 2);

    let by_name = |name: &str| {
        views
            .iter()
            .find(|view| view.inquiry.name == name)
            .expect("inquiry present")
    };
    assert_eq!(by_name("Ana").property_title, "Kept listing");
    assert_eq!(by_name("Bo").property_title, UNKNOWN_PROPERTY_TITLE);
}

#[test]
fn list_all_is_newest_first_and_admin_only() {
    let store = Arc::new(MemoryCatalog::new());
    let (_, inquiries) = services(store.clone());

    inquiries
        .submit(PropertyId("prop-000001".to_string()), inquiry_draft("First"))
        .expect("submit");
    inquiries
        .submit(PropertyId("prop-000001".to_string()), inquiry_draft("Second"))
        .expect("submit");

    let views = inquiries.list_all().expect("list all");
    assert_eq!(views[0].inquiry.name, "Second");
    assert_eq!(views[1].inquiry.name, "First");

    let gated = InquiryService::new(store, anonymous_session());
    match gated.list_all() {
        Err(CatalogError::Unauthorized) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[test]
fn toggle_responded_inverts_and_double_toggle_restores() {
    let store = Arc::new(MemoryCatalog::new());
    let (_, inquiries) = services(store);

    let inquiry = inquiries
        .submit(PropertyId("prop-000001".to_string()), inquiry_draft("Kim"))
        .expect("submit");
    assert!(!inquiry.responded);

    let once = inquiries
        .toggle_responded(&inquiry.id)
        .expect("first toggle");
    assert!(once.responded);

    let twice = inquiries
        .toggle_responded(&inquiry.id)
        .expect("second toggle");
    assert!(!twice.responded);
}

#[test]
fn toggle_responded_requires_admin_and_existence() {
    let store = Arc::new(MemoryCatalog::new());
    let (_, inquiries) = services(store.clone());

    match inquiries.toggle_responded(&InquiryId("inq-404404".to_string())) {
        Err(CatalogError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }

    let submitted = inquiries
        .submit(PropertyId("prop-000001".to_string()), inquiry_draft("Val"))
        .expect("submit");

    let gated = InquiryService::new(store, anonymous_session());
    match gated.toggle_responded(&submitted.id) {
        Err(CatalogError::Unauthorized) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }
}
