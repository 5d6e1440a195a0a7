//! Shared types and the forecast reduction pipeline for Wearcast
//!
//! This crate holds everything that does not perform I/O: request models,
//! input validation, and the aggregation steps that turn raw forecast
//! samples into the feature text handed to the advice generator.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use pipeline::{
    daily_timestamps, forecast_instants, plan_days, precipitation_probability, sample_timestamps,
    summarize_air_quality, DailyForecastBuilder, DaySlot, EnsembleReading, FeatureSet, FeatureValue, MinMax,
    TrackedVariable, TripAggregate,
};
pub use types::*;
pub use validation::*;
