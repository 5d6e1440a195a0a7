//! CoverageJSON documents returned by EDR position queries
//!
//! A multi-instant query answers with one coverage per (instant, parameter)
//! pair, grouped so that every `parameters.len()` consecutive coverages belong
//! to the same instant. Each coverage's `ranges` is decoded into a name-keyed
//! map, so the values of an instant are looked up by parameter name rather
//! than by position.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{ForecastParameter, Measurement, VariableSample};
use crate::error::PipelineError;
use crate::pipeline::ensemble::{member_for_index, member_key, EnsembleReading};

/// `CoverageCollection` document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoverageCollection {
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterInfo>,
    #[serde(default)]
    pub coverages: Vec<Coverage>,
}

/// Parameter metadata; only the unit is of interest here
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParameterInfo {
    #[serde(default)]
    pub unit: Option<UnitInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitInfo {
    #[serde(default)]
    pub symbol: Option<UnitSymbol>,
}

/// CoverageJSON allows the unit symbol as a bare string or as an object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UnitSymbol {
    Plain(String),
    Detailed { value: String },
}

impl UnitSymbol {
    pub fn as_str(&self) -> &str {
        match self {
            UnitSymbol::Plain(s) => s,
            UnitSymbol::Detailed { value } => value,
        }
    }
}

/// A single coverage, also used as a top-level document for single-instant queries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Coverage {
    #[serde(default)]
    pub ranges: BTreeMap<String, NdArray>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NdArray {
    #[serde(default)]
    pub values: Vec<Option<f64>>,
}

impl NdArray {
    pub fn first_value(&self) -> Option<f64> {
        self.values.first().copied().flatten()
    }
}

impl Coverage {
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.ranges.get(name).and_then(NdArray::first_value)
    }
}

impl CoverageCollection {
    pub fn unit_of(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(name)
            .and_then(|p| p.unit.as_ref())
            .and_then(|u| u.symbol.as_ref())
            .map(UnitSymbol::as_str)
    }

    /// Fail when a requested parameter is not declared by the response
    pub fn require(&self, parameters: &[ForecastParameter]) -> Result<(), PipelineError> {
        match parameters
            .iter()
            .find(|p| !self.parameters.contains_key(p.name()))
        {
            Some(missing) => Err(PipelineError::MissingParameter(missing.name().to_string())),
            None => Ok(()),
        }
    }

    /// Group coverages into one sample per forecast instant
    pub fn samples(&self) -> Result<Vec<VariableSample>, PipelineError> {
        let parameter_count = self.parameters.len();
        if parameter_count == 0 {
            if self.coverages.is_empty() {
                return Ok(Vec::new());
            }
            return Err(PipelineError::MalformedCoverage(
                "coverages present without parameter metadata".to_string(),
            ));
        }

        let samples = self
            .coverages
            .chunks(parameter_count)
            .map(|chunk| {
                chunk
                    .iter()
                    .flat_map(|coverage| coverage.ranges.iter())
                    .filter_map(|(name, range)| {
                        range.first_value().map(|value| {
                            let unit = self.unit_of(name).map(str::to_string);
                            (name.clone(), Measurement::new(value, unit))
                        })
                    })
                    .collect::<VariableSample>()
            })
            .collect();

        Ok(samples)
    }

    /// Flatten a member-major ensemble response into per-member readings
    pub fn ensemble_readings(&self, parameter: &str) -> Result<Vec<EnsembleReading>, PipelineError> {
        let total = self.coverages.len();
        self.coverages
            .iter()
            .enumerate()
            .map(|(index, coverage)| {
                let member = member_for_index(index, total);
                let key = member_key(parameter, member);
                let range = coverage
                    .ranges
                    .get(&key)
                    .ok_or_else(|| PipelineError::MissingParameter(key.clone()))?;
                let value_mm = range.first_value().ok_or_else(|| {
                    PipelineError::MalformedCoverage(format!("{key} has no value"))
                })?;
                Ok(EnsembleReading { member, value_mm })
            })
            .collect()
    }
}
