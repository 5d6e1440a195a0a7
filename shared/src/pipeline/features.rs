//! Feature Formatter
//!
//! Renders a reduced trip into the fixed, ordered `Label: value` block the
//! advice generator reads. Entries with nothing worth saying are [`FeatureValue::Absent`]
//! and never rendered.

use serde::Serialize;

use super::bucket::{
    fog_from_visibility, PressureLevel, CLOUD_COVERAGE, HUMIDITY, PRECIPITATION_CHANCE,
    PRECIPITATION_KIND,
};
use super::reducer::{MinMax, TrackedVariable, TripAggregate};
use super::units::{temperature_celsius, to_hectopascal};
use crate::models::TripContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FeatureValue {
    Absent,
    Text(String),
}

impl FeatureValue {
    /// Blank text collapses to `Absent`
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            FeatureValue::Absent
        } else {
            FeatureValue::Text(value)
        }
    }

    pub fn optional(value: Option<&str>) -> Self {
        value.map_or(FeatureValue::Absent, FeatureValue::text)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Absent => None,
            FeatureValue::Text(text) => Some(text),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FeatureValue::Absent)
    }

    fn with_suffix(self, suffix: &str) -> Self {
        match self {
            FeatureValue::Text(text) => FeatureValue::Text(format!("{text}{suffix}")),
            FeatureValue::Absent => FeatureValue::Absent,
        }
    }
}

/// Single value when both ends format the same, otherwise `"min to max"`
pub fn format_min_max(range: MinMax, format: impl Fn(f64) -> String) -> String {
    let min = format(range.min);
    let max = format(range.max);
    if min == max {
        min
    } else {
        format!("{min} to {max}")
    }
}

/// Pair of bucket labels, skipping slots that carry no label
pub fn format_label_pair(low: Option<&str>, high: Option<&str>) -> FeatureValue {
    match (low, high) {
        (Some(low), Some(high)) if low == high => FeatureValue::text(low),
        (Some(low), Some(high)) => FeatureValue::text(format!("{low} to {high}")),
        (Some(only), None) | (None, Some(only)) => FeatureValue::text(only),
        (None, None) => FeatureValue::Absent,
    }
}

/// Ordered feature block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureSet {
    entries: Vec<(&'static str, FeatureValue)>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &'static str, value: FeatureValue) {
        self.entries.push((label, value));
    }

    pub fn get(&self, label: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value)
    }

    /// Labels that will be rendered, in order
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_absent())
            .map(|(label, _)| *label)
            .collect()
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .filter_map(|(label, value)| value.as_text().map(|text| format!("{label}: {text}")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn from_aggregate(aggregate: &TripAggregate, context: &TripContext) -> Self {
        let mut features = Self::new();

        features.push("Temperature", celsius_feature(aggregate, TrackedVariable::Temperature));
        features.push(
            "Apparent temperature",
            celsius_feature(aggregate, TrackedVariable::ApparentTemperature),
        );
        features.push("Precipitation", precipitation_feature(aggregate));
        features.push(
            "Wind gusts",
            range_feature(aggregate, TrackedVariable::WindGust, |v| {
                format!("{}", v.floor() as i64)
            })
            .with_suffix(" m/s"),
        );
        features.push("Pressure", pressure_feature(aggregate));
        features.push("Snow depth", snow_depth_feature(aggregate));
        features.push(
            "Cloud coverage",
            label_range_feature(aggregate, TrackedVariable::CloudCoverage, |v| {
                CLOUD_COVERAGE.classify(v)
            }),
        );
        features.push("Fog type", fog_feature(aggregate));
        features.push("Ice cover", ice_cover_feature(aggregate));
        features.push(
            "Humidity",
            label_range_feature(aggregate, TrackedVariable::Humidity, |v| HUMIDITY.classify(v)),
        );
        features.push(
            "Dew point temperature",
            celsius_feature(aggregate, TrackedVariable::DewPoint),
        );

        let location: Vec<&str> = [context.place_class.as_deref(), context.place_type.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        features.push("Location", FeatureValue::text(location.join(", ")));
        features.push("Activity", FeatureValue::optional(context.activity.as_deref()));
        features.push(
            "Chosen clothes",
            FeatureValue::optional(context.chosen_clothes.as_deref()),
        );

        features
    }
}

fn range_feature(
    aggregate: &TripAggregate,
    variable: TrackedVariable,
    format: impl Fn(f64) -> String,
) -> FeatureValue {
    aggregate
        .range(variable)
        .map_or(FeatureValue::Absent, |range| {
            FeatureValue::text(format_min_max(range, format))
        })
}

fn celsius_feature(aggregate: &TripAggregate, variable: TrackedVariable) -> FeatureValue {
    let unit = aggregate.unit(variable);
    range_feature(aggregate, variable, |v| {
        temperature_celsius(v, unit).to_string()
    })
    .with_suffix(" degrees celsius")
}

fn label_range_feature(
    aggregate: &TripAggregate,
    variable: TrackedVariable,
    classify: impl Fn(f64) -> Option<&'static str>,
) -> FeatureValue {
    aggregate
        .range(variable)
        .map_or(FeatureValue::Absent, |range| {
            format_label_pair(classify(range.min), classify(range.max))
        })
}

fn precipitation_feature(aggregate: &TripAggregate) -> FeatureValue {
    let chance = PRECIPITATION_CHANCE.split(aggregate.precipitation_probability());
    let kind = PRECIPITATION_KIND.classify(aggregate.frozen_precipitation_max().unwrap_or(0.0));
    match (chance, kind) {
        (Some(chance), Some(kind)) => FeatureValue::text(format!("{chance} chance of {kind}")),
        _ => FeatureValue::Absent,
    }
}

fn pressure_feature(aggregate: &TripAggregate) -> FeatureValue {
    let unit = aggregate.unit(TrackedVariable::Pressure);
    range_feature(aggregate, TrackedVariable::Pressure, |v| {
        PressureLevel::from_hpa(to_hectopascal(v, unit))
            .as_str()
            .to_string()
    })
}

/// Only reported when there is snow on the ground at some point
fn snow_depth_feature(aggregate: &TripAggregate) -> FeatureValue {
    match aggregate.range(TrackedVariable::SnowDepth) {
        Some(range) if range.max > 0.0 => FeatureValue::text(format_min_max(range, |v| {
            format!("{}", (v * 100.0).round() / 100.0)
        }))
        .with_suffix(" m"),
        _ => FeatureValue::Absent,
    }
}

/// Best visibility gives the lightest fog
fn fog_feature(aggregate: &TripAggregate) -> FeatureValue {
    aggregate
        .range(TrackedVariable::Visibility)
        .map_or(FeatureValue::Absent, |range| {
            format_label_pair(fog_from_visibility(range.max), fog_from_visibility(range.min))
        })
}

fn ice_cover_feature(aggregate: &TripAggregate) -> FeatureValue {
    match aggregate.range(TrackedVariable::IceCover) {
        Some(range) if range.max > 0.0 => FeatureValue::text("yes"),
        _ => FeatureValue::Absent,
    }
}
