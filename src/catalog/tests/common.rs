use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::catalog::domain::{
    Category, Inquiry, InquiryDraft, InquiryId, ListingStatus, Property, PropertyDraft, PropertyId,
};
use crate::catalog::filter::ListingQuery;
use crate::catalog::store::{CatalogStore, StoreError};
use crate::session::{
    IdentityError, IdentityGateway, Principal, SessionAuthority, SingleAdminPolicy,
};

pub(super) const ADMIN_EMAIL: &str = "owner@example.com";

#[derive(Debug, Default)]
pub(super) struct QuietIdentity;

impl IdentityGateway for QuietIdentity {
    fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(())
    }

    fn authorize_url(&self, redirect_to: &str) -> String {
        format!("https://id.example/authorize?redirect_to={redirect_to}")
    }
}

fn authority() -> SessionAuthority {
    SessionAuthority::new(
        Box::new(SingleAdminPolicy::new(ADMIN_EMAIL)),
        Box::new(QuietIdentity),
    )
}

/// Authority with an established administrator session.
pub(super) fn admin_session() -> Arc<SessionAuthority> {
    let sessions = authority();
    sessions
        .on_session_change(Some(&Principal::new(ADMIN_EMAIL)))
        .expect("admin session resolves");
    Arc::new(sessions)
}

/// Authority resolved to no session at all.
pub(super) fn anonymous_session() -> Arc<SessionAuthority> {
    let sessions = authority();
    sessions
        .on_session_change(None)
        .expect("sign-out resolves");
    Arc::new(sessions)
}

pub(super) fn draft(
    title: &str,
    city: &str,
    state: &str,
    category: Category,
    status: ListingStatus,
) -> PropertyDraft {
    PropertyDraft {
        title: title.to_string(),
        description: format!("{title} with a walkable block and recent updates."),
        price: 1250.0,
        location_city: city.to_string(),
        location_state: state.to_string(),
        property_type: "Apartment".to_string(),
        category,
        status,
        bedrooms: 2,
        bathrooms: 1,
        sqft: 900,
        images: Vec::new(),
    }
}

pub(super) fn available_rent_draft(title: &str) -> PropertyDraft {
    draft(title, "Austin", "TX", Category::Rent, ListingStatus::Available)
}

pub(super) fn inquiry_draft(name: &str) -> InquiryDraft {
    InquiryDraft {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        message: "Is this still available for a viewing next week?".to_string(),
        phone: None,
    }
}

/// Store whose every call fails, for error-propagation coverage.
#[derive(Debug, Default)]
pub(super) struct UnavailableCatalog;

fn offline() -> StoreError {
    StoreError::Unavailable("catalog offline".to_string())
}

impl CatalogStore for UnavailableCatalog {
    fn insert_property(&self, _draft: PropertyDraft) -> Result<Property, StoreError> {
        Err(offline())
    }

    fn fetch_property(&self, _id: &PropertyId) -> Result<Option<Property>, StoreError> {
        Err(offline())
    }

    fn list_properties(&self, _query: &ListingQuery) -> Result<Vec<Property>, StoreError> {
        Err(offline())
    }

    fn list_all_properties(&self) -> Result<Vec<Property>, StoreError> {
        Err(offline())
    }

    fn replace_property(&self, _property: Property) -> Result<(), StoreError> {
        Err(offline())
    }

    fn delete_property(&self, _id: &PropertyId) -> Result<(), StoreError> {
        Err(offline())
    }

    fn count_properties(&self, _status: Option<ListingStatus>) -> Result<u64, StoreError> {
        Err(offline())
    }

    fn insert_inquiry(
        &self,
        _property_id: PropertyId,
        _draft: InquiryDraft,
    ) -> Result<Inquiry, StoreError> {
        Err(offline())
    }

    fn fetch_inquiry(&self, _id: &InquiryId) -> Result<Option<Inquiry>, StoreError> {
        Err(offline())
    }

    fn replace_inquiry(&self, _inquiry: Inquiry) -> Result<(), StoreError> {
        Err(offline())
    }

    fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError> {
        Err(offline())
    }

    fn count_inquiries(&self, _since: Option<DateTime<Utc>>) -> Result<u64, StoreError> {
        Err(offline())
    }
}
