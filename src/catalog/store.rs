use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::domain::{
    Inquiry, InquiryDraft, InquiryId, ListingStatus, Property, PropertyDraft, PropertyId,
};
use super::filter::ListingQuery;

/// Durable storage contract for the catalog. Implementations assign ids and
/// `created_at` on insert; `replace_*` is full-record, last-writer-wins.
pub trait CatalogStore: Send + Sync {
    fn insert_property(&self, draft: PropertyDraft) -> Result<Property, StoreError>;
    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, StoreError>;
    /// Listings matching the resolved visitor predicate, in store default order.
    fn list_properties(&self, query: &ListingQuery) -> Result<Vec<Property>, StoreError>;
    /// Every listing regardless of status, newest first (admin management view).
    fn list_all_properties(&self) -> Result<Vec<Property>, StoreError>;
    fn replace_property(&self, property: Property) -> Result<(), StoreError>;
    fn delete_property(&self, id: &PropertyId) -> Result<(), StoreError>;
    fn count_properties(&self, status: Option<ListingStatus>) -> Result<u64, StoreError>;

    fn insert_inquiry(
        &self,
        property_id: PropertyId,
        draft: InquiryDraft,
    ) -> Result<Inquiry, StoreError>;
    fn fetch_inquiry(&self, id: &InquiryId) -> Result<Option<Inquiry>, StoreError>;
    fn replace_inquiry(&self, inquiry: Inquiry) -> Result<(), StoreError>;
    /// All inquiries, newest first.
    fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError>;
    fn count_inquiries(&self, since: Option<DateTime<Utc>>) -> Result<u64, StoreError>;
}

/// Failures surfaced by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// In-process store keyed by generated ids. Backs the demo binary and every
/// test; insertion order doubles as the store default order.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: Mutex<MemoryTables>,
    property_seq: AtomicU64,
    inquiry_seq: AtomicU64,
}

#[derive(Debug, Default)]
struct MemoryTables {
    properties: BTreeMap<String, Property>,
    inquiries: BTreeMap<String, Inquiry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryTables> {
        // A poisoned table still holds consistent data; keep serving it.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_property_id(&self) -> PropertyId {
        let id = self.property_seq.fetch_add(1, Ordering::Relaxed) + 1;
        PropertyId(format!("prop-{id:06}"))
    }

    fn next_inquiry_id(&self) -> InquiryId {
        let id = self.inquiry_seq.fetch_add(1, Ordering::Relaxed) + 1;
        InquiryId(format!("inq-{id:06}"))
    }
}

impl CatalogStore for MemoryCatalog {
    fn insert_property(&self, draft: PropertyDraft) -> Result<Property, StoreError> {
        let id = self.next_property_id();
        let mut property = Property {
            id: id.clone(),
            title: String::new(),
            description: String::new(),
            price: 0.0,
            location_city: String::new(),
            location_state: String::new(),
            property_type: String::new(),
            category: draft.category,
            status: draft.status,
            bedrooms: 0,
            bathrooms: 0,
            sqft: 0,
            images: Vec::new(),
            created_at: Utc::now(),
        };
        property.apply_draft(draft);

        self.lock().properties.insert(id.0, property.clone());
        Ok(property)
    }

    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, StoreError> {
        Ok(self.lock().properties.get(&id.0).cloned())
    }

    fn list_properties(&self, query: &ListingQuery) -> Result<Vec<Property>, StoreError> {
        Ok(self
            .lock()
            .properties
            .values()
            .filter(|property| query.matches(property))
            .cloned()
            .collect())
    }

    fn list_all_properties(&self) -> Result<Vec<Property>, StoreError> {
        let mut listings: Vec<Property> = self.lock().properties.values().cloned().collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(listings)
    }

    fn replace_property(&self, property: Property) -> Result<(), StoreError> {
        let mut tables = self.lock();
        match tables.properties.get_mut(&property.id.0) {
            Some(slot) => {
                *slot = property;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete_property(&self, id: &PropertyId) -> Result<(), StoreError> {
        match self.lock().properties.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn count_properties(&self, status: Option<ListingStatus>) -> Result<u64, StoreError> {
        let tables = self.lock();
        let count = match status {
            Some(status) => tables
                .properties
                .values()
                .filter(|property| property.status == status)
                .count(),
            None => tables.properties.len(),
        };
        Ok(count as u64)
    }

    fn insert_inquiry(
        &self,
        property_id: PropertyId,
        draft: InquiryDraft,
    ) -> Result<Inquiry, StoreError> {
        let id = self.next_inquiry_id();
        let inquiry = Inquiry {
            id: id.clone(),
            property_id,
            name: draft.name,
            email: draft.email,
            message: draft.message,
            phone: draft.phone,
            responded: false,
            created_at: Utc::now(),
        };

        self.lock().inquiries.insert(id.0, inquiry.clone());
        Ok(inquiry)
    }

    fn fetch_inquiry(&self, id: &InquiryId) -> Result<Option<Inquiry>, StoreError> {
        Ok(self.lock().inquiries.get(&id.0).cloned())
    }

    fn replace_inquiry(&self, inquiry: Inquiry) -> Result<(), StoreError> {
        let mut tables = self.lock();
        match tables.inquiries.get_mut(&inquiry.id.0) {
            Some(slot) => {
                *slot = inquiry;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError> {
        let mut inquiries: Vec<Inquiry> = self.lock().inquiries.values().cloned().collect();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(inquiries)
    }

    fn count_inquiries(&self, since: Option<DateTime<Utc>>) -> Result<u64, StoreError> {
        let tables = self.lock();
        let count = match since {
            Some(cutoff) => tables
                .inquiries
                .values()
                .filter(|inquiry| inquiry.created_at >= cutoff)
                .count(),
            None => tables.inquiries.len(),
        };
        Ok(count as u64)
    }
}
