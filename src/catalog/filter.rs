use serde::Deserialize;

use super::domain::{Category, ListingStatus, Property, ValidationError};

/// Visitor filter set exactly as it arrives from the query string. Field names
/// match the public URL contract (`?location=…&category=…&type=…&price=…`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub property_type: Option<String>,
    #[serde(default, rename = "price")]
    pub price_range: Option<String>,
}

impl ListingFilter {
    /// Normalize the wire-level filter into a store predicate.
    ///
    /// `price_range` is accepted but not applied: the catalog has never
    /// defined a range grammar for it, so rather than guessing one the field
    /// is an acknowledged no-op. Everything else resolves per the search
    /// contract; an out-of-contract `category` value is rejected outright.
    pub fn resolve(&self) -> Result<ListingQuery, ValidationError> {
        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("any") => CategoryFilter::Any,
            Some("Rent") => CategoryFilter::Only(Category::Rent),
            Some("Sale") => CategoryFilter::Only(Category::Sale),
            Some(other) => {
                return Err(ValidationError::UnknownCategory {
                    value: other.to_string(),
                })
            }
        };

        let property_type = self
            .property_type
            .as_deref()
            .map(str::trim)
            .filter(|kind| !kind.is_empty() && *kind != "any")
            .map(str::to_string);

        if self.price_range.as_deref().is_some_and(|range| range != "any") {
            tracing::debug!(price = ?self.price_range, "price filter accepted but not applied");
        }

        Ok(ListingQuery {
            location,
            category,
            property_type,
        })
    }
}

/// Category predicate after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Only(Category),
}

/// Normalized predicate over listings. Availability is baked in: the resolver
/// only ever surfaces listings open for inquiry, and callers cannot override
/// that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub location: Option<String>,
    pub category: CategoryFilter,
    pub property_type: Option<String>,
}

impl ListingQuery {
    /// Predicate matching every Available listing.
    pub fn available() -> Self {
        Self {
            location: None,
            category: CategoryFilter::Any,
            property_type: None,
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        if property.status != ListingStatus::Available {
            return false;
        }

        if let Some(needle) = &self.location {
            let city = property.location_city.to_lowercase();
            let state = property.location_state.to_lowercase();
            if !city.contains(needle.as_str()) && !state.contains(needle.as_str()) {
                return false;
            }
        }

        if let CategoryFilter::Only(category) = self.category {
            if property.category != category {
                return false;
            }
        }

        if let Some(kind) = &self.property_type {
            if property.property_type != *kind {
                return false;
            }
        }

        true
    }
}
