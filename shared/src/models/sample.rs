//! Per-instant forecast samples

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ForecastParameter;

/// A forecast value together with the unit symbol the API reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Measurement {
    pub fn new(value: f64, unit: Option<String>) -> Self {
        Self { value, unit }
    }
}

/// Every parameter value observed at one forecast instant, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableSample {
    values: BTreeMap<String, Measurement>,
}

impl VariableSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, measurement: Measurement) {
        self.values.insert(name.into(), measurement);
    }

    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.values.get(name)
    }

    pub fn parameter(&self, parameter: ForecastParameter) -> Option<&Measurement> {
        self.get(parameter.name())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Measurement)> for VariableSample {
    fn from_iter<I: IntoIterator<Item = (S, Measurement)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
