//! Request parameters shared by the trip endpoints

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{validate_latitude, validate_longitude, Coordinates, TripWindow, UtcOffsetMinutes};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Location and trip window; dates are epoch milliseconds, `utcOffset` is the browser's `getTimezoneOffset`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TripParams {
    #[validate(range(min = -90.0, max = 90.0, message = "Invalid latitude"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Invalid longitude"))]
    pub lon: f64,

    #[serde(rename = "startDate")]
    pub start_date: i64,

    #[serde(rename = "endDate")]
    pub end_date: i64,

    #[serde(rename = "utcOffset", default)]
    pub utc_offset: i32,
}

/// Location and trip end for the same-day hazard endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HazardParams {
    #[validate(range(min = -90.0, max = 90.0, message = "Invalid latitude"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Invalid longitude"))]
    pub lon: f64,

    #[serde(rename = "endDate")]
    pub end_date: i64,
}

/// Range checks pass NaN through, so finiteness is checked separately
fn checked_location(lat: f64, lon: f64) -> AppResult<Coordinates> {
    validate_latitude(lat).map_err(|m| AppError::validation("lat", m))?;
    validate_longitude(lon).map_err(|m| AppError::validation("lon", m))?;
    Ok(Coordinates::new(lat, lon))
}

fn window_field(message: &str) -> &'static str {
    match message {
        "Invalid starting date" => "startDate",
        "Invalid UTC offset" => "utcOffset",
        _ => "endDate",
    }
}

impl TripParams {
    pub fn location(&self) -> AppResult<Coordinates> {
        self.validate()?;
        checked_location(self.lat, self.lon)
    }

    pub fn window(&self, now: DateTime<Utc>, max_forecast_days: i64) -> AppResult<TripWindow> {
        TripWindow::from_millis(
            self.start_date,
            self.end_date,
            UtcOffsetMinutes::from_minutes_west(self.utc_offset),
            now,
            max_forecast_days,
        )
        .map_err(|message| AppError::validation(window_field(message), message))
    }
}

impl HazardParams {
    pub fn location(&self) -> AppResult<Coordinates> {
        self.validate()?;
        checked_location(self.lat, self.lon)
    }

    pub fn end(&self) -> AppResult<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.end_date)
            .ok_or_else(|| AppError::validation("endDate", "Invalid end date"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn params(lat: f64, lon: f64) -> TripParams {
        TripParams {
            lat,
            lon,
            start_date: now().timestamp_millis(),
            end_date: (now() + Duration::hours(6)).timestamp_millis(),
            utc_offset: -120,
        }
    }

    fn field_of(err: AppError) -> String {
        match err {
            AppError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_params() {
        let p = params(48.15, 17.11);
        assert_eq!(p.location().unwrap(), Coordinates::new(48.15, 17.11));
        let window = p.window(now(), 7).unwrap();
        assert_eq!(window.utc_offset(), UtcOffsetMinutes(120));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        assert_eq!(field_of(params(200.0, 0.0).location().unwrap_err()), "lat");
        assert_eq!(field_of(params(0.0, -190.0).location().unwrap_err()), "lon");
        assert_eq!(field_of(params(f64::NAN, 0.0).location().unwrap_err()), "lat");
    }

    #[test]
    fn test_window_errors_name_their_field() {
        let mut p = params(0.0, 0.0);
        p.start_date = (now() - Duration::hours(2)).timestamp_millis();
        assert_eq!(field_of(p.window(now(), 7).unwrap_err()), "startDate");

        let mut p = params(0.0, 0.0);
        p.end_date = (now() + Duration::days(9)).timestamp_millis();
        assert_eq!(field_of(p.window(now(), 7).unwrap_err()), "endDate");
    }

    #[test]
    fn test_query_names_are_camel_case() {
        let p: TripParams = serde_json::from_value(serde_json::json!({
            "lat": 1.0, "lon": 2.0, "startDate": 10, "endDate": 20
        }))
        .unwrap();
        assert_eq!(p.start_date, 10);
        assert_eq!(p.utc_offset, 0);
    }
}
