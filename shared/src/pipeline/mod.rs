//! Forecast reduction pipeline
//!
//! Leaf-first: [`sampler`] picks the instants to query, [`reducer`] and
//! [`ensemble`] condense the answers, [`bucket`] turns continuous values into
//! categories, [`features`] renders the text handed to the advice generator.
//! [`daynight`] drives the separate day/night forecast strip and [`air`]
//! categorises air quality with the same bucket tables.

pub mod air;
pub mod bucket;
pub mod daynight;
pub mod ensemble;
pub mod features;
pub mod reducer;
pub mod sampler;
pub mod units;

pub use bucket::{normalize, valsplit, BucketTable, EmptyBucket, PressureLevel};
pub use air::summarize_air_quality;
pub use daynight::{forecast_instants, plan_days, DailyForecastBuilder, DaySlot};
pub use ensemble::{precipitation_probability, EnsembleReading};
pub use features::{format_min_max, FeatureSet, FeatureValue};
pub use reducer::{MinMax, TrackedVariable, TripAggregate};
pub use sampler::{daily_timestamps, sample_timestamps};
