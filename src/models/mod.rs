//! Domain models
//!
//! Cars and users as the store holds them, with parsed timestamps and typed enums,
//! plus display models for CLI output.

mod car;
pub mod display;
mod user;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::StoreError;

pub use car::{Car, CarStatus, CarType, Location, NewCar};
pub use display::{CarDisplay, SummaryDisplay, UserDisplay};
pub use user::{NewUser, User, UserStatus};

/// Parse an RFC 3339 wire timestamp into UTC.
pub(crate) fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidPayload(format!("{}: {} ({})", field, e, value)))
}

/// Format a timestamp for the wire.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
