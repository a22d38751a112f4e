//! Error log timestamp handling
//!
//! Entries carry local wall-clock time followed by an IANA zone name, e.g.
//! `10-Nov-2024 14:23:01 Asia/Jakarta`. Comparisons happen on the resolved
//! instant, so entries written under different zones order correctly.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::LogError;

const TIMESTAMP_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Parse an error log timestamp into an instant with its offset
///
/// Returns None for unknown zones, malformed text and local times that fall
/// into a DST gap. Ambiguous local times resolve to the earlier instant.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let (local, zone) = text.trim().rsplit_once(' ')?;
    let naive = NaiveDateTime::parse_from_str(local, TIMESTAMP_FORMAT).ok()?;
    let tz = zone.parse::<Tz>().ok()?;
    let resolved = tz.from_local_datetime(&naive).earliest()?;
    Some(resolved.fixed_offset())
}

/// Resolve an IANA zone name
pub fn resolve_time_zone(name: &str) -> Result<Tz, LogError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| LogError::InvalidTimeZone(name.to_string()))
}

/// First second of `date` in `tz`, as UTC
///
/// None when the day lies at the edge of the representable range.
pub fn day_start(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

/// Last second (23:59:59) of `date` in `tz`, as UTC
pub fn day_end(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let last = NaiveTime::from_hms_opt(23, 59, 59)?;
    local_to_utc(date.and_time(last), tz)
}

fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    // Skip forward out of a DST gap; an hour covers every zone in the database
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}
