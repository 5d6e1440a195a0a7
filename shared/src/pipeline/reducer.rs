//! Variable Reducer
//!
//! Folds the per-instant samples of one trip into running extrema. All state
//! lives on a [`TripAggregate`] owned by the request that builds it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ForecastParameter, VariableSample};

/// Running extrema, seeded with the first observed value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub fn seed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }
}

/// Variables whose range across the trip is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedVariable {
    Temperature,
    ApparentTemperature,
    DewPoint,
    WindGust,
    Pressure,
    SnowDepth,
    CloudCoverage,
    Visibility,
    IceCover,
    Humidity,
}

impl TrackedVariable {
    pub const ALL: [TrackedVariable; 10] = [
        TrackedVariable::Temperature,
        TrackedVariable::ApparentTemperature,
        TrackedVariable::DewPoint,
        TrackedVariable::WindGust,
        TrackedVariable::Pressure,
        TrackedVariable::SnowDepth,
        TrackedVariable::CloudCoverage,
        TrackedVariable::Visibility,
        TrackedVariable::IceCover,
        TrackedVariable::Humidity,
    ];

    pub fn parameter(&self) -> ForecastParameter {
        match self {
            TrackedVariable::Temperature => ForecastParameter::Temperature,
            TrackedVariable::ApparentTemperature => ForecastParameter::ApparentTemperature,
            TrackedVariable::DewPoint => ForecastParameter::DewPoint,
            TrackedVariable::WindGust => ForecastParameter::WindGust,
            TrackedVariable::Pressure => ForecastParameter::Pressure,
            TrackedVariable::SnowDepth => ForecastParameter::SnowDepth,
            TrackedVariable::CloudCoverage => ForecastParameter::CloudCover,
            TrackedVariable::Visibility => ForecastParameter::Visibility,
            TrackedVariable::IceCover => ForecastParameter::IceCover,
            TrackedVariable::Humidity => ForecastParameter::RelativeHumidity,
        }
    }
}

/// Request-scoped reduction state for one trip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripAggregate {
    ranges: BTreeMap<TrackedVariable, MinMax>,
    units: BTreeMap<TrackedVariable, String>,
    frozen_precipitation_max: Option<f64>,
    precipitation_probability: f64,
}

impl TripAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce a whole sample sequence
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a VariableSample>) -> Self {
        let mut aggregate = Self::new();
        for sample in samples {
            aggregate.observe(sample);
        }
        aggregate
    }

    /// Fold one instant into the running ranges; missing or non-finite values are skipped
    pub fn observe(&mut self, sample: &VariableSample) {
        for variable in TrackedVariable::ALL {
            let Some(measurement) = sample.parameter(variable.parameter()) else {
                continue;
            };
            if !measurement.value.is_finite() {
                continue;
            }
            self.ranges
                .entry(variable)
                .and_modify(|range| range.observe(measurement.value))
                .or_insert_with(|| MinMax::seed(measurement.value));
            if let Some(unit) = &measurement.unit {
                self.units.entry(variable).or_insert_with(|| unit.clone());
            }
        }

        if let Some(frozen) = sample.parameter(ForecastParameter::FrozenPrecipitation) {
            if frozen.value.is_finite() {
                self.frozen_precipitation_max = Some(
                    self.frozen_precipitation_max
                        .map_or(frozen.value, |max| max.max(frozen.value)),
                );
            }
        }
    }

    pub fn set_precipitation_probability(&mut self, probability: f64) {
        self.precipitation_probability = probability.clamp(0.0, 1.0);
    }

    pub fn range(&self, variable: TrackedVariable) -> Option<MinMax> {
        self.ranges.get(&variable).copied()
    }

    pub fn unit(&self, variable: TrackedVariable) -> Option<&str> {
        self.units.get(&variable).map(String::as_str)
    }

    pub fn frozen_precipitation_max(&self) -> Option<f64> {
        self.frozen_precipitation_max
    }

    pub fn precipitation_probability(&self) -> f64 {
        self.precipitation_probability
    }
}
