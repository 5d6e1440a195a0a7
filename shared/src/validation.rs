//! Validation utilities for Wearcast requests
//!
//! Every check runs before any outbound call is made; messages are returned
//! to clients as-is.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::models::{Photo, ACCEPTED_PHOTO_TYPES, MAX_PHOTOS, MAX_PHOTO_BYTES};
use crate::types::UtcOffsetMinutes;

/// Grace period for request latency when comparing against "now"
pub const REQUEST_GRACE_SECONDS: i64 = 60;

/// Largest offset any real timezone uses
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

// ============================================================================
// Location
// ============================================================================

pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if latitude.is_finite() && (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err("Invalid latitude")
    }
}

pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if longitude.is_finite() && (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err("Invalid longitude")
    }
}

// ============================================================================
// Time
// ============================================================================

/// Instant must fall within `[now - 1 minute, now + max_forecast_days]`
pub fn validate_trip_instant(
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    max_forecast_days: i64,
) -> Result<(), &'static str> {
    let earliest = now - Duration::seconds(REQUEST_GRACE_SECONDS);
    let latest = now + Duration::days(max_forecast_days);
    if instant < earliest || instant > latest {
        return Err("Trip date outside forecast range");
    }
    Ok(())
}

pub fn validate_utc_offset(offset: UtcOffsetMinutes) -> Result<(), &'static str> {
    if offset.minutes().abs() > MAX_UTC_OFFSET_MINUTES {
        return Err("Invalid UTC offset");
    }
    Ok(())
}

/// Whether a trip ending at `end` still ends today (UTC), so same-day hazard data applies
pub fn ends_today(end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let earliest = now - Duration::seconds(REQUEST_GRACE_SECONDS);
    let end_of_day = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN)) + Duration::days(1);
    end >= earliest && end < end_of_day
}

// ============================================================================
// Uploads
// ============================================================================

/// At most ten PNG or JPEG photos, each under 5 MB
pub fn validate_photos(photos: &[Photo]) -> Result<(), &'static str> {
    if photos.len() > MAX_PHOTOS {
        return Err("Too many photos");
    }
    for photo in photos {
        if !ACCEPTED_PHOTO_TYPES.contains(&photo.content_type.as_str()) {
            return Err("Unsupported photo type");
        }
        if photo.size() >= MAX_PHOTO_BYTES {
            return Err("Photo too large");
        }
    }
    Ok(())
}
