//! Catalog & inquiry domain core: the data model, the visitor filter
//! resolver, both lifecycle managers, and the HTTP surface over them.

pub mod dashboard;
pub mod domain;
pub mod filter;
pub mod inquiries;
pub mod listings;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use dashboard::DashboardSnapshot;
pub use domain::{
    Category, Inquiry, InquiryDraft, InquiryId, ListingStatus, Property, PropertyDraft,
    PropertyId, ValidationError,
};
pub use filter::{CategoryFilter, ListingFilter, ListingQuery};
pub use inquiries::{InquiryService, InquiryView, UNKNOWN_PROPERTY_TITLE};
pub use listings::ListingService;
pub use router::{catalog_router, CatalogRouterState};
pub use store::{CatalogStore, MemoryCatalog, StoreError};

use crate::session::SessionError;

/// Failure taxonomy at the service boundary. Validation and authorization are
/// resolved before any write; store failures propagate unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("record not found")]
    NotFound,
    #[error("administrator session required")]
    Unauthorized,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CatalogError::NotFound,
            other => CatalogError::Store(other),
        }
    }
}

impl From<SessionError> for CatalogError {
    fn from(_: SessionError) -> Self {
        CatalogError::Unauthorized
    }
}
