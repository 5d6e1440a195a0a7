//! Daily forecast integration tests
//!
//! Tests for the day/night strip including:
//! - Destination-local day planning and rollover
//! - Night and noon sampling from a CoverageJSON response
//! - Per-day ensemble precipitation chance
//! - Response field naming

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use shared::{
    forecast_instants, plan_days, precipitation_probability, CoverageCollection,
    DailyForecastBuilder, TripWindow, UtcOffsetMinutes, DAILY_PARAMETERS,
    ENSEMBLE_PRECIPITATION_PARAMETER,
};

fn now() -> DateTime<Utc> {
    // Monday
    Utc.with_ymd_and_hms(2024, 10, 14, 6, 0, 0).unwrap()
}

fn window(start: DateTime<Utc>, end: DateTime<Utc>, client: i32) -> TripWindow {
    TripWindow::new(start, end, UtcOffsetMinutes(client), now(), 7).unwrap()
}

/// Night/noon coverages for `DAILY_PARAMETERS`, one temperature and cloud pair per instant
fn daily_collection(readings: &[(f64, f64)]) -> CoverageCollection {
    let coverages: Vec<Value> = readings
        .iter()
        .flat_map(|(kelvin, cloud)| {
            [
                json!({ "type": "Coverage", "ranges": { "temperature_gnd-surf": { "values": [kelvin] } } }),
                json!({ "type": "Coverage", "ranges": { "total-cloud-cover_atmosphere": { "values": [cloud] } } }),
            ]
        })
        .collect();

    serde_json::from_value(json!({
        "type": "CoverageCollection",
        "parameters": {
            "temperature_gnd-surf": { "unit": { "symbol": "K" } },
            "total-cloud-cover_atmosphere": { "unit": { "symbol": "%" } }
        },
        "coverages": coverages,
    }))
    .unwrap()
}

/// Three 6-hour buckets for each of the 30 members, `wet` of them above the threshold
fn day_ensemble(wet: usize) -> CoverageCollection {
    let coverages: Vec<Value> = (0..90)
        .map(|i| {
            let value_mm = if i < wet { 1.2 } else { 0.0 };
            let mut ranges = Map::new();
            ranges.insert(
                format!("{ENSEMBLE_PRECIPITATION_PARAMETER}_mem-{}", i / 3 + 1),
                json!({ "values": [value_mm] }),
            );
            json!({ "ranges": Value::Object(ranges) })
        })
        .collect();
    serde_json::from_value(json!({ "coverages": coverages })).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Three-day trip to a destination sharing the client's offset
    #[test]
    fn test_three_day_strip() {
        let start = now() + Duration::hours(1);
        let trip = window(start, start + Duration::days(2), 120);
        let slots = plan_days(&trip, UtcOffsetMinutes(120));
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].night, Utc.with_ymd_and_hms(2024, 10, 13, 22, 0, 0).unwrap());

        let instants = forecast_instants(&slots);
        assert_eq!(instants.len(), 6);
        assert_eq!(instants[1], Utc.with_ymd_and_hms(2024, 10, 14, 10, 0, 0).unwrap());

        let coverage = daily_collection(&[
            (278.15, 90.0),
            (288.15, 10.5),
            (279.15, 90.0),
            (289.15, 30.5),
            (280.15, 90.0),
            (290.15, 50.5),
        ]);
        coverage.require(&DAILY_PARAMETERS).unwrap();

        let mut builder = DailyForecastBuilder::new(&slots);
        builder.apply_samples(&coverage.samples().unwrap()).unwrap();
        for (day, wet) in [0, 45, 90].into_iter().enumerate() {
            let readings = day_ensemble(wet)
                .ensemble_readings(ENSEMBLE_PRECIPITATION_PARAMETER)
                .unwrap();
            builder.set_precipitation(day, precipitation_probability(&readings));
        }
        let days = builder.finish();

        let names: Vec<_> = days.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["MON", "TUE", "WED"]);
        assert_eq!(days[0].night_temp, Some(5));
        assert_eq!(days[0].day_temp, Some(15));
        assert_eq!(days[2].day_temp, Some(17));
        assert_eq!(days[1].cloud_coverage, Some(30));
        assert_eq!(
            days.iter().map(|d| d.precipitation).collect::<Vec<_>>(),
            vec![Some(0), Some(50), Some(100)]
        );
    }

    /// Late evening on a UTC clock is already the next day in Tokyo
    #[test]
    fn test_far_east_destination_starts_next_day() {
        let start = Utc.with_ymd_and_hms(2024, 10, 14, 20, 0, 0).unwrap();
        let slots = plan_days(&window(start, start, 0), UtcOffsetMinutes(540));
        assert_eq!(slots[0].local_date, NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
        assert_eq!(slots[0].name(), "TUE");
        assert_eq!(slots[0].noon, Utc.with_ymd_and_hms(2024, 10, 15, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_short_sample_list_is_rejected() {
        let start = now() + Duration::hours(1);
        let slots = plan_days(&window(start, start + Duration::days(1), 0), UtcOffsetMinutes::UTC);
        let coverage = daily_collection(&[(280.0, 10.0), (285.0, 20.0)]);

        let mut builder = DailyForecastBuilder::new(&slots);
        assert!(builder.apply_samples(&coverage.samples().unwrap()).is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let start = now() + Duration::hours(1);
        let slots = plan_days(&window(start, start, 0), UtcOffsetMinutes::UTC);
        let mut builder = DailyForecastBuilder::new(&slots);
        builder
            .apply_samples(&daily_collection(&[(273.15, 0.0), (283.15, 75.0)]).samples().unwrap())
            .unwrap();
        builder.set_precipitation(0, 0.2);

        let value = serde_json::to_value(builder.finish()).unwrap();
        assert_eq!(
            value,
            json!([{
                "name": "MON",
                "dayTemp": 10,
                "nightTemp": 0,
                "cloudCoverage": 75,
                "precipitation": 20
            }])
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// One slot per started 24 hours, on consecutive destination dates
        #[test]
        fn prop_slots_are_consecutive_days(
            start_minutes in 0i64..3 * 24 * 60,
            length_minutes in 0i64..4 * 24 * 60,
            client in -720i32..=840,
            location in -720i32..=840,
        ) {
            let start = now() + Duration::minutes(start_minutes);
            let trip = window(start, start + Duration::minutes(length_minutes), client);
            let slots = plan_days(&trip, UtcOffsetMinutes(location));

            prop_assert_eq!(slots.len() as i64, length_minutes / (24 * 60) + 1);
            for pair in slots.windows(2) {
                prop_assert_eq!(pair[1].local_date - pair[0].local_date, Duration::days(1));
            }
            for slot in &slots {
                prop_assert_eq!(slot.noon - slot.night, Duration::hours(12));
            }
        }
    }
}
