//! Trip window and contextual trip details

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{local_midnight, UtcOffsetMinutes};
use crate::validation::{validate_trip_instant, validate_utc_offset};

/// Remaining hours of a forecast day covered by the three 6-hour ensemble buckets
pub const ENSEMBLE_DAY_SPAN_HOURS: i64 = 18;

/// Validated start and end of a trip, with the client's UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    utc_offset: UtcOffsetMinutes,
}

impl TripWindow {
    /// Validate a window against the forecast horizon anchored at `now`
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        utc_offset: UtcOffsetMinutes,
        now: DateTime<Utc>,
        max_forecast_days: i64,
    ) -> Result<Self, &'static str> {
        validate_trip_instant(start, now, max_forecast_days).map_err(|_| "Invalid starting date")?;
        validate_trip_instant(end, now, max_forecast_days).map_err(|_| "Invalid end date")?;
        if start > end {
            return Err("Start date must be before end date");
        }
        validate_utc_offset(utc_offset)?;

        Ok(Self {
            start,
            end,
            utc_offset,
        })
    }

    /// Build from epoch milliseconds as sent by browsers
    pub fn from_millis(
        start_ms: i64,
        end_ms: i64,
        utc_offset: UtcOffsetMinutes,
        now: DateTime<Utc>,
        max_forecast_days: i64,
    ) -> Result<Self, &'static str> {
        let start = DateTime::from_timestamp_millis(start_ms).ok_or("Invalid starting date")?;
        let end = DateTime::from_timestamp_millis(end_ms).ok_or("Invalid end date")?;
        Self::new(start, end, utc_offset, now, max_forecast_days)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn utc_offset(&self) -> UtcOffsetMinutes {
        self.utc_offset
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Ensemble query window: local midnight of the first day up to 18 hours into the last day
    pub fn precipitation_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let day_start = local_midnight(self.start, self.utc_offset);
        let day_end = local_midnight(self.end, self.utc_offset)
            + Duration::hours(ENSEMBLE_DAY_SPAN_HOURS);
        (day_start, day_end)
    }
}

/// Non-meteorological context that travels with the feature set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripContext {
    pub place_class: Option<String>,
    pub place_type: Option<String>,
    pub activity: Option<String>,
    pub chosen_clothes: Option<String>,
}
