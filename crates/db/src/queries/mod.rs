//! Typed query modules, one per stored concern.

pub mod cache;
pub mod comments;
pub mod issues;
pub mod repositories;
pub mod sync;

use chrono::{DateTime, Utc};

/// Unix seconds → `DateTime<Utc>`. Out-of-range values collapse to the epoch
/// rather than failing the whole row.
pub(crate) fn ts_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

pub(crate) fn opt_ts_to_datetime(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.map(ts_to_datetime)
}
