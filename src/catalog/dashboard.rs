use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::domain::ListingStatus;
use super::store::CatalogStore;
use super::CatalogError;
use crate::session::SessionAuthority;

/// Window for the "new inquiries" counter.
pub const NEW_INQUIRY_WINDOW_DAYS: i64 = 7;

/// Admin landing-page counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub total_properties: u64,
    pub available_properties: u64,
    pub total_inquiries: u64,
    pub new_inquiries: u64,
}

/// Build the dashboard counters as of `now`. Admin-only.
pub fn snapshot<S: CatalogStore>(
    store: &S,
    sessions: &SessionAuthority,
    now: DateTime<Utc>,
) -> Result<DashboardSnapshot, CatalogError> {
    sessions.require_admin()?;

    let cutoff = now - Duration::days(NEW_INQUIRY_WINDOW_DAYS);

    Ok(DashboardSnapshot {
        total_properties: store.count_properties(None)?,
        available_properties: store.count_properties(Some(ListingStatus::Available))?,
        total_inquiries: store.count_inquiries(None)?,
        new_inquiries: store.count_inquiries(Some(cutoff))?,
    })
}
