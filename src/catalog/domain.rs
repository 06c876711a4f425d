use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog listings, assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Identifier wrapper for visitor inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

/// Whether a listing is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Rent,
    Sale,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Sale => "Sale",
        }
    }
}

/// Listing availability as shown to visitors. Transitions are unconstrained;
/// the administrator may set any value at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Available,
    Sold,
    Rented,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Available => "Available",
            ListingStatus::Sold => "Sold",
            ListingStatus::Rented => "Rented",
        }
    }
}

/// A persisted listing. `id` and `created_at` are store-assigned and immutable;
/// everything else is replaced wholesale on admin update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location_city: String,
    pub location_state: String,
    pub property_type: String,
    pub category: Category,
    pub status: ListingStatus,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft: u32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Replace every admin-editable field from a draft, keeping identity and
    /// creation time untouched.
    pub fn apply_draft(&mut self, draft: PropertyDraft) {
        let PropertyDraft {
            title,
            description,
            price,
            location_city,
            location_state,
            property_type,
            category,
            status,
            bedrooms,
            bathrooms,
            sqft,
            images,
        } = draft;

        self.title = title;
        self.description = description;
        self.price = price;
        self.location_city = location_city;
        self.location_state = location_state;
        self.property_type = property_type;
        self.category = category;
        self.status = status;
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self.sqft = sqft;
        self.images = images;
    }

    /// First image in display order, used as the card cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Admin-submitted listing fields, validated before any write. Counts are
/// unsigned, so non-negativity holds by construction; price is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location_city: String,
    pub location_state: String,
    pub property_type: String,
    pub category: Category,
    pub status: ListingStatus,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub sqft: u32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PropertyDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        required("description", &self.description)?;
        required("location_city", &self.location_city)?;
        required("location_state", &self.location_state)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

/// A visitor inquiry against a listing. `property_id` is a weak reference:
/// deleting the listing leaves the inquiry behind, and reads tolerate the
/// dangling id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub property_id: PropertyId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub responded: bool,
    pub created_at: DateTime<Utc>,
}

/// Visitor-supplied contact fields for an inquiry submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl InquiryDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        required("message", &self.message)?;
        Ok(())
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Input rejected before any write reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field '{field}' is empty")]
    MissingField { field: &'static str },
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("unknown category '{value}' (expected Rent, Sale, or any)")]
    UnknownCategory { value: String },
}
