//! Client-side time-window filtering
//!
//! The search service has no "last N hours" parameter, so callers over-fetch
//! [`WINDOW_FETCH_SIZE`] records and trim them here.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use super::types::DiscussionRecord;

/// Number of records requested when a time window is applied afterwards
pub const WINDOW_FETCH_SIZE: u32 = 100;

/// Timestamp a window is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindowFilter {
    pub reference_field: ReferenceField,
    pub max_age: Duration,
}

impl TimeWindowFilter {
    /// Window covering the last `hours` hours of the given field
    pub fn hours(reference_field: ReferenceField, hours: u32) -> Self {
        Self {
            reference_field,
            max_age: Duration::hours(i64::from(hours)),
        }
    }
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 (with offset) and zone-less timestamps, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn reference_timestamp<'a>(record: &'a DiscussionRecord, field: ReferenceField) -> Option<&'a str> {
    let primary = match field {
        ReferenceField::CreatedAt => record.created_at.as_deref(),
        ReferenceField::UpdatedAt => record.updated_at.as_deref(),
    };
    primary.or(record.created_at.as_deref())
}

/// Keep records whose reference timestamp lies within the window, then truncate
///
/// A record without the reference timestamp falls back to its creation time and
/// is dropped when that is missing too. Unparseable timestamps drop the record.
/// The remote order is preserved.
pub fn filter_by_age(
    records: Vec<DiscussionRecord>,
    window: &TimeWindowFilter,
    now: DateTime<Utc>,
    page_size: usize,
) -> Vec<DiscussionRecord> {
    // A window reaching past the representable range covers everything
    let cutoff = now
        .checked_sub_signed(window.max_age)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    records
        .into_iter()
        .filter(|record| {
            let Some(raw) = reference_timestamp(record, window.reference_field) else {
                log::debug!("Dropping discussion {} from window: no timestamp", record.id);
                return false;
            };
            match parse_timestamp(raw) {
                Some(ts) => ts >= cutoff,
                None => {
                    log::debug!(
                        "Dropping discussion {} from window: unparseable timestamp {raw:?}",
                        record.id
                    );
                    false
                }
            }
        })
        .take(page_size)
        .collect()
}
