//! Common types used across the platform

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// WKT point in `lon lat` order, as EDR position queries expect
    pub fn wkt_point(&self) -> String {
        format!("POINT({} {})", self.longitude, self.latitude)
    }
}

/// Fixed offset from UTC in minutes, positive east of Greenwich
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct UtcOffsetMinutes(pub i32);

impl UtcOffsetMinutes {
    pub const UTC: UtcOffsetMinutes = UtcOffsetMinutes(0);

    /// Convert a browser `Date#getTimezoneOffset` value, which counts minutes west of UTC
    pub fn from_minutes_west(minutes_west: i32) -> Self {
        Self(-minutes_west)
    }

    pub fn minutes(self) -> i32 {
        self.0
    }

    pub fn to_fixed(self) -> FixedOffset {
        FixedOffset::east_opt(self.0 * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// The UTC instant at which `date` starts in the given offset, shifted by `hour` hours
pub fn local_instant(date: NaiveDate, hour: u32, offset: UtcOffsetMinutes) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour));
    Utc.from_utc_datetime(&(local - Duration::minutes(i64::from(offset.minutes()))))
}

/// Local midnight that opens the day containing `instant`, expressed in UTC
pub fn local_midnight(instant: DateTime<Utc>, offset: UtcOffsetMinutes) -> DateTime<Utc> {
    let local_date = instant.with_timezone(&offset.to_fixed()).date_naive();
    local_instant(local_date, 0, offset)
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Envelope used by every JSON endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentResponse<T> {
    pub content: T,
}

impl<T> ContentResponse<T> {
    pub fn new(content: T) -> Self {
        Self { content }
    }
}
