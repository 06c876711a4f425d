use std::sync::Arc;

use serde::Serialize;

use super::domain::{Inquiry, InquiryDraft, InquiryId, PropertyId};
use super::store::CatalogStore;
use super::CatalogError;
use crate::session::SessionAuthority;

/// Title reported for inquiries whose listing has since been deleted.
pub const UNKNOWN_PROPERTY_TITLE: &str = "Unknown";

/// An inquiry joined best-effort with the title of the listing it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryView {
    pub inquiry: Inquiry,
    pub property_title: String,
}

/// Inquiry lifecycle manager. Submission is open to anyone; triage is
/// admin-only.
pub struct InquiryService<S> {
    store: Arc<S>,
    sessions: Arc<SessionAuthority>,
}

impl<S: CatalogStore> InquiryService<S> {
    pub fn new(store: Arc<S>, sessions: Arc<SessionAuthority>) -> Self {
        Self { store, sessions }
    }

    /// Record a visitor inquiry against a listing. The reference is
    /// fire-and-forget: the listing is not checked for existence, and the
    /// store assigns identity, `created_at`, and `responded = false`.
    pub fn submit(
        &self,
        property_id: PropertyId,
        draft: InquiryDraft,
    ) -> Result<Inquiry, CatalogError> {
        draft.validate()?;

        let inquiry = self.store.insert_inquiry(property_id, draft)?;
        tracing::info!(inquiry = %inquiry.id.0, listing = %inquiry.property_id.0, "inquiry submitted");
        Ok(inquiry)
    }

    /// All inquiries newest first, each joined with its listing title. An
    /// inquiry whose listing no longer exists is reported with the
    /// [`UNKNOWN_PROPERTY_TITLE`] sentinel instead of failing the read.
    pub fn list_all(&self) -> Result<Vec<InquiryView>, CatalogError> {
        self.sessions.require_admin()?;

        self.store
            .list_inquiries()?
            .into_iter()
            .map(|inquiry| {
                let property_title = match self.store.fetch_property(&inquiry.property_id)? {
                    Some(property) => property.title,
                    None => UNKNOWN_PROPERTY_TITLE.to_string(),
                };
                Ok(InquiryView {
                    inquiry,
                    property_title,
                })
            })
            .collect()
    }

    /// Invert the `responded` flag. Not a no-op when repeated: two calls net
    /// back to the original value.
    pub fn toggle_responded(&self, id: &InquiryId) -> Result<Inquiry, CatalogError> {
        self.sessions.require_admin()?;

        let mut inquiry = self.store.fetch_inquiry(id)?.ok_or(CatalogError::NotFound)?;
        inquiry.responded = !inquiry.responded;
        self.store.replace_inquiry(inquiry.clone())?;
        Ok(inquiry)
    }
}
