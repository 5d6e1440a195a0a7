//! Offline coordinate to timezone lookup

use std::sync::Arc;

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use shared::{Coordinates, UtcOffsetMinutes};
use tzf_rs::DefaultFinder;

/// Resolves the UTC offset in force at a location
#[derive(Clone)]
pub struct TimezoneLookup {
    finder: Arc<DefaultFinder>,
}

impl TimezoneLookup {
    pub fn new() -> Self {
        Self {
            finder: Arc::new(DefaultFinder::new()),
        }
    }

    /// IANA zone containing the coordinates, if any
    pub fn zone(&self, location: Coordinates) -> Option<Tz> {
        let name = self.finder.get_tz_name(location.longitude, location.latitude);
        name.parse::<Tz>().ok()
    }

    /// Offset at `instant`; open sea and unknown zones fall back to UTC
    pub fn offset_at(&self, location: Coordinates, instant: DateTime<Utc>) -> UtcOffsetMinutes {
        match self.zone(location) {
            Some(zone) => offset_in_zone(zone, instant),
            None => {
                tracing::warn!(
                    latitude = location.latitude,
                    longitude = location.longitude,
                    "No timezone found for location, using UTC"
                );
                UtcOffsetMinutes::UTC
            }
        }
    }
}

impl Default for TimezoneLookup {
    fn default() -> Self {
        Self::new()
    }
}

pub fn offset_in_zone(zone: Tz, instant: DateTime<Utc>) -> UtcOffsetMinutes {
    let seconds = zone
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    UtcOffsetMinutes(seconds / 60)
}
