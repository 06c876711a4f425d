use std::sync::Arc;

use super::domain::{ListingStatus, Property, PropertyDraft, PropertyId};
use super::filter::{ListingFilter, ListingQuery};
use super::store::CatalogStore;
use super::CatalogError;
use crate::session::SessionAuthority;

/// Default number of listings surfaced on the landing page.
pub const FEATURED_LIMIT: usize = 3;

/// Listing lifecycle manager. Browse and detail reads are open to any
/// principal; every mutation asks the session authority for an administrator
/// verdict before touching the store.
pub struct ListingService<S> {
    store: Arc<S>,
    sessions: Arc<SessionAuthority>,
}

impl<S: CatalogStore> ListingService<S> {
    pub fn new(store: Arc<S>, sessions: Arc<SessionAuthority>) -> Self {
        Self { store, sessions }
    }

    /// Resolve a visitor filter set against the store. Only Available
    /// listings are ever returned; a store read failure surfaces unchanged
    /// and is not retried.
    pub fn browse(&self, filter: &ListingFilter) -> Result<Vec<Property>, CatalogError> {
        let query = filter.resolve()?;
        Ok(self.store.list_properties(&query)?)
    }

    /// First `limit` Available listings, store default order.
    pub fn featured(&self, limit: usize) -> Result<Vec<Property>, CatalogError> {
        let mut listings = self.store.list_properties(&ListingQuery::available())?;
        listings.truncate(limit);
        Ok(listings)
    }

    /// Public detail read for a single listing.
    pub fn get(&self, id: &PropertyId) -> Result<Property, CatalogError> {
        self.store.fetch_property(id)?.ok_or(CatalogError::NotFound)
    }

    /// Every listing regardless of status, newest first. Admin-only.
    pub fn manage_all(&self) -> Result<Vec<Property>, CatalogError> {
        self.sessions.require_admin()?;
        Ok(self.store.list_all_properties()?)
    }

    /// Create a listing from a validated draft. The store assigns identity
    /// and `created_at`; images default to an empty sequence.
    pub fn create(&self, draft: PropertyDraft) -> Result<Property, CatalogError> {
        self.sessions.require_admin()?;
        draft.validate()?;

        let property = self.store.insert_property(draft)?;
        tracing::info!(listing = %property.id.0, title = %property.title, "listing created");
        Ok(property)
    }

    /// Full-record replace of every mutable field in a single write. `id` and
    /// `created_at` are preserved; last writer wins on concurrent updates.
    pub fn update(&self, id: &PropertyId, draft: PropertyDraft) -> Result<Property, CatalogError> {
        self.sessions.require_admin()?;
        draft.validate()?;

        let mut property = self.store.fetch_property(id)?.ok_or(CatalogError::NotFound)?;
        property.apply_draft(draft);
        self.store.replace_property(property.clone())?;
        tracing::info!(listing = %property.id.0, "listing updated");
        Ok(property)
    }

    /// Remove a listing. Inquiries referencing it are left behind on purpose;
    /// their reads tolerate the dangling id.
    pub fn delete(&self, id: &PropertyId) -> Result<(), CatalogError> {
        self.sessions.require_admin()?;
        self.store.delete_property(id)?;
        tracing::info!(listing = %id.0, "listing deleted");
        Ok(())
    }

    /// Replace the image sequence wholesale. Order is display order, with the
    /// cover image at index 0.
    pub fn set_images(
        &self,
        id: &PropertyId,
        urls: Vec<String>,
    ) -> Result<Property, CatalogError> {
        self.sessions.require_admin()?;

        let mut property = self.store.fetch_property(id)?.ok_or(CatalogError::NotFound)?;
        property.images = urls;
        self.store.replace_property(property.clone())?;
        Ok(property)
    }

    /// Set the availability status. Transitions are unconstrained.
    pub fn set_status(
        &self,
        id: &PropertyId,
        status: ListingStatus,
    ) -> Result<Property, CatalogError> {
        self.sessions.require_admin()?;

        let mut property = self.store.fetch_property(id)?.ok_or(CatalogError::NotFound)?;
        property.status = status;
        self.store.replace_property(property.clone())?;
        tracing::info!(listing = %property.id.0, status = status.label(), "listing status set");
        Ok(property)
    }
}
