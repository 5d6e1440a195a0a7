//! Time Sampler
//!
//! Chooses the forecast instants to request for a trip. Long trips get a fixed
//! number of evenly spaced samples; trips short enough that the spacing would
//! drop below one hour are enumerated hour by hour instead.

use chrono::{DateTime, Duration, Utc};

use crate::error::PipelineError;
use crate::models::TripWindow;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

pub fn sample_timestamps(
    window: &TripWindow,
    sample_count: usize,
) -> Result<Vec<DateTime<Utc>>, PipelineError> {
    if sample_count == 0 {
        return Err(PipelineError::InvalidSampleCount);
    }
    let count = i64::try_from(sample_count).map_err(|_| PipelineError::InvalidSampleCount)?;

    let interval_ms = window.duration().num_milliseconds() / count;
    if interval_ms < HOUR_MS {
        return Ok(hourly(window.start(), window.end()));
    }

    Ok((0..count)
        .map(|i| window.start() + Duration::milliseconds(interval_ms * i))
        .collect())
}

/// One instant per hour from `start`, closing with `end` itself when it is off the hourly grid
fn hourly(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut instants = Vec::new();
    let mut current = start;
    while current <= end {
        instants.push(current);
        current += Duration::milliseconds(HOUR_MS);
    }
    if instants.last().is_some_and(|last| *last < end) {
        instants.push(end);
    }
    instants
}

/// One instant per 24 hours from the trip start while still inside the window
pub fn daily_timestamps(window: &TripWindow) -> Vec<DateTime<Utc>> {
    let mut instants = Vec::new();
    let mut current = window.start();
    while current <= window.end() {
        instants.push(current);
        current += Duration::milliseconds(DAY_MS);
    }
    instants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UtcOffsetMinutes;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn window(minutes: i64) -> TripWindow {
        TripWindow::new(
            now(),
            now() + Duration::minutes(minutes),
            UtcOffsetMinutes::UTC,
            now(),
            7,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_sample_count_is_configuration_error() {
        assert_eq!(
            sample_timestamps(&window(60), 0),
            Err(PipelineError::InvalidSampleCount)
        );
    }

    #[test]
    fn test_long_trip_uses_uniform_spacing() {
        let samples = sample_timestamps(&window(48 * 60), 24).unwrap();
        assert_eq!(samples.len(), 24);
        assert_eq!(samples[0], now());
        assert_eq!(samples[1] - samples[0], Duration::hours(2));
        assert_eq!(samples[23], now() + Duration::hours(46));
    }

    #[test]
    fn test_short_trip_switches_to_hourly() {
        let samples = sample_timestamps(&window(5 * 60), 24).unwrap();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[5], now() + Duration::hours(5));
    }

    #[test]
    fn test_hourly_appends_off_grid_end() {
        let samples = sample_timestamps(&window(150), 24).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(*samples.last().unwrap(), now() + Duration::minutes(150));
    }

    #[test]
    fn test_zero_length_trip_has_one_sample() {
        let samples = sample_timestamps(&window(0), 24).unwrap();
        assert_eq!(samples, vec![now()]);
    }

    #[test]
    fn test_daily_timestamps() {
        let days = daily_timestamps(&window(2 * 24 * 60 + 30));
        assert_eq!(days.len(), 3);
        assert_eq!(days[2], now() + Duration::days(2));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Length is the configured count unless the spacing falls under an hour
        #[test]
        fn prop_sample_length(minutes in 0i64..=7 * 24 * 60, count in 1usize..=64) {
            let samples = sample_timestamps(&window(minutes), count).unwrap();
            let duration_ms = minutes * 60 * 1000;
            if duration_ms / count as i64 >= HOUR_MS {
                prop_assert_eq!(samples.len(), count);
            } else {
                let hours = (duration_ms + HOUR_MS - 1) / HOUR_MS;
                prop_assert_eq!(samples.len() as i64, hours + 1);
            }
        }

        /// Samples are strictly increasing and stay inside the window
        #[test]
        fn prop_samples_ordered_and_bounded(minutes in 0i64..=7 * 24 * 60, count in 1usize..=64) {
            let w = window(minutes);
            let samples = sample_timestamps(&w, count).unwrap();
            prop_assert!(samples.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(samples.iter().all(|s| *s >= w.start() && *s <= w.end()));
        }
    }
}
