//! Domain core for a property-listing catalog.
//!
//! Anonymous visitors browse and filter listings and submit inquiries; a
//! single configured administrator manages the listing lifecycle and triages
//! inquiries. Storage, identity, and object hosting are consumed through
//! traits so the core stays independent of any particular backend.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;
