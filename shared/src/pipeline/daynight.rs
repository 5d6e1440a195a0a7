//! Day/Night Splitter
//!
//! Builds the short-range strip shown next to the trip: for each calendar day
//! at the destination, the temperature at local midnight and local noon, the
//! noon cloud cover and the chance of precipitation over the day.
//!
//! Days are enumerated on the client's clock (that is where the trip dates
//! were picked) and shifted onto the destination's calendar when the
//! destination is already on the next (or still on the previous) day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};

use super::sampler::daily_timestamps;
use super::units::temperature_celsius;
use crate::error::PipelineError;
use crate::models::{DailyForecast, ForecastParameter, TripWindow, VariableSample, ENSEMBLE_DAY_SPAN_HOURS};
use crate::types::{local_instant, UtcOffsetMinutes};

const MINUTES_PER_DAY: i32 = 24 * 60;

/// One destination-local calendar day and the instants sampled for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    pub local_date: NaiveDate,
    /// Midnight opening the day
    pub night: DateTime<Utc>,
    pub noon: DateTime<Utc>,
}

impl DaySlot {
    pub fn new(local_date: NaiveDate, location_offset: UtcOffsetMinutes) -> Self {
        Self {
            local_date,
            night: local_instant(local_date, 0, location_offset),
            noon: local_instant(local_date, 12, location_offset),
        }
    }

    pub fn name(&self) -> &'static str {
        weekday_name(self.local_date.weekday())
    }

    /// Ensemble window for the day's precipitation chance
    pub fn precipitation_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.night, self.night + Duration::hours(ENSEMBLE_DAY_SPAN_HOURS))
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SUN",
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
    }
}

/// Whether a client-local time `minutes_since_midnight` is already tomorrow at a place `relative_offset` minutes ahead
pub fn needs_rollover(minutes_since_midnight: i32, relative_offset: i32) -> bool {
    MINUTES_PER_DAY - minutes_since_midnight < relative_offset
}

/// Mirror of [`needs_rollover`] for destinations behind the client
pub fn needs_rollback(minutes_since_midnight: i32, relative_offset: i32) -> bool {
    minutes_since_midnight + relative_offset < 0
}

/// Destination-local days covered by the trip, one per 24 hours from the start
pub fn plan_days(window: &TripWindow, location_offset: UtcOffsetMinutes) -> Vec<DaySlot> {
    let client_offset = window.utc_offset();
    let relative = location_offset.minutes() - client_offset.minutes();

    daily_timestamps(window)
        .into_iter()
        .map(|instant| {
            let client_local = instant.with_timezone(&client_offset.to_fixed());
            let minutes = (client_local.hour() * 60 + client_local.minute()) as i32;
            let mut date = client_local.date_naive();
            if needs_rollover(minutes, relative) {
                date = date.checked_add_signed(Duration::days(1)).unwrap_or(date);
            } else if needs_rollback(minutes, relative) {
                date = date.checked_sub_signed(Duration::days(1)).unwrap_or(date);
            }
            DaySlot::new(date, location_offset)
        })
        .collect()
}

/// Forecast instants in the order the builder expects: night then noon for each day
pub fn forecast_instants(slots: &[DaySlot]) -> Vec<DateTime<Utc>> {
    slots
        .iter()
        .flat_map(|slot| [slot.night, slot.noon])
        .collect()
}

/// Fills [`DailyForecast`] entries as their samples and probabilities resolve
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastBuilder {
    days: Vec<DailyForecast>,
}

impl DailyForecastBuilder {
    pub fn new(slots: &[DaySlot]) -> Self {
        Self {
            days: slots.iter().map(|slot| DailyForecast::named(slot.name())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Samples must come in [`forecast_instants`] order
    pub fn apply_samples(&mut self, samples: &[VariableSample]) -> Result<(), PipelineError> {
        if samples.len() != self.days.len() * 2 {
            return Err(PipelineError::MalformedCoverage(format!(
                "expected {} daily samples, got {}",
                self.days.len() * 2,
                samples.len()
            )));
        }

        for (day, pair) in self.days.iter_mut().zip(samples.chunks(2)) {
            let (night, noon) = (&pair[0], &pair[1]);
            day.night_temp = celsius(night);
            day.day_temp = celsius(noon);
            day.cloud_coverage = noon
                .parameter(ForecastParameter::CloudCover)
                .filter(|m| m.value.is_finite())
                .map(|m| m.value.floor() as i64);
        }
        Ok(())
    }

    pub fn set_precipitation(&mut self, day: usize, probability: f64) {
        if let Some(forecast) = self.days.get_mut(day) {
            forecast.precipitation = Some((probability.clamp(0.0, 1.0) * 100.0).floor() as i64);
        }
    }

    pub fn finish(self) -> Vec<DailyForecast> {
        self.days
    }
}

fn celsius(sample: &VariableSample) -> Option<i64> {
    sample
        .parameter(ForecastParameter::Temperature)
        .filter(|m| m.value.is_finite())
        .map(|m| temperature_celsius(m.value, m.unit.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap()
    }

    fn window(start: DateTime<Utc>, end: DateTime<Utc>, client: i32) -> TripWindow {
        TripWindow::new(start, end, UtcOffsetMinutes(client), now(), 7).unwrap()
    }

    #[test]
    fn test_late_start_rolls_over_for_eastern_destination() {
        // 23:00 on the client clock is already 01:00 tomorrow two hours east
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 23, 0, 0).unwrap();
        let slots = plan_days(&window(start, start, 0), UtcOffsetMinutes(120));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].local_date, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!(slots[0].night, Utc.with_ymd_and_hms(2024, 6, 3, 22, 0, 0).unwrap());
        assert_eq!(slots[0].noon, Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_no_rollover_when_destination_shares_the_day() {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let slots = plan_days(&window(start, start, 0), UtcOffsetMinutes(120));
        assert_eq!(slots[0].local_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn test_early_start_rolls_back_for_western_destination() {
        let start = Utc.with_ymd_and_hms(2024, 6, 4, 1, 0, 0).unwrap();
        let slots = plan_days(&window(start, start, 0), UtcOffsetMinutes(-300));
        assert_eq!(slots[0].local_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(slots[0].night, Utc.with_ymd_and_hms(2024, 6, 3, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_client_offset_is_relative() {
        // Client and destination share a timezone: no shift at 23:00 local
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 21, 0, 0).unwrap();
        let slots = plan_days(&window(start, start, 120), UtcOffsetMinutes(120));
        assert_eq!(slots[0].local_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn test_one_slot_per_day_with_weekday_names() {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
        let end = start + Duration::days(2);
        let slots = plan_days(&window(start, end, 0), UtcOffsetMinutes::UTC);
        let names: Vec<_> = slots.iter().map(DaySlot::name).collect();
        assert_eq!(names, vec!["MON", "TUE", "WED"]);
    }

    #[test]
    fn test_precipitation_window_is_eighteen_hours() {
        let slot = DaySlot::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), UtcOffsetMinutes::UTC);
        let (from, to) = slot.precipitation_window();
        assert_eq!(to - from, Duration::hours(18));
    }

    #[test]
    fn test_builder_fills_days() {
        let slots = [
            DaySlot::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), UtcOffsetMinutes::UTC),
            DaySlot::new(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(), UtcOffsetMinutes::UTC),
        ];
        assert_eq!(forecast_instants(&slots).len(), 4);

        let reading = |temp: f64, cloud: f64| -> VariableSample {
            [
                (ForecastParameter::Temperature.name(), Measurement::new(temp, Some("K".to_string()))),
                (ForecastParameter::CloudCover.name(), Measurement::new(cloud, Some("%".to_string()))),
            ]
            .into_iter()
            .collect()
        };

        let mut builder = DailyForecastBuilder::new(&slots);
        builder
            .apply_samples(&[
                reading(283.15, 10.0),
                reading(293.65, 45.7),
                reading(280.0, 0.0),
                reading(290.0, 99.9),
            ])
            .unwrap();
        builder.set_precipitation(0, 0.333);
        builder.set_precipitation(1, 1.0);

        let days = builder.finish();
        assert_eq!(days[0].name, "MON");
        assert_eq!(days[0].night_temp, Some(10));
        assert_eq!(days[0].day_temp, Some(20));
        assert_eq!(days[0].cloud_coverage, Some(45));
        assert_eq!(days[0].precipitation, Some(33));
        assert_eq!(days[1].cloud_coverage, Some(99));
        assert_eq!(days[1].precipitation, Some(100));
        assert!(days.iter().all(DailyForecast::is_complete));
    }

    #[test]
    fn test_builder_rejects_short_sample_list() {
        let slots = [DaySlot::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), UtcOffsetMinutes::UTC)];
        let mut builder = DailyForecastBuilder::new(&slots);
        assert!(matches!(
            builder.apply_samples(&[VariableSample::new()]),
            Err(PipelineError::MalformedCoverage(_))
        ));
    }
}
