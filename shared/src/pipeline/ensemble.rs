//! Ensemble Precipitation Estimator

use serde::{Deserialize, Serialize};

/// Number of perturbed runs in the ensemble
pub const ENSEMBLE_MEMBERS: usize = 30;

/// Accumulation above which a 6-hour bucket counts as wet
pub const WET_THRESHOLD_MM: f64 = 0.1;

/// One member's accumulated precipitation over a 6-hour bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleReading {
    pub member: usize,
    pub value_mm: f64,
}

/// 1-based member of the reading at `index` in a member-major list of `total` readings
pub fn member_for_index(index: usize, total: usize) -> usize {
    if total == 0 {
        return 1;
    }
    let per_member = total as f64 / ENSEMBLE_MEMBERS as f64;
    let member = (index as f64 / per_member).floor() as usize + 1;
    member.min(ENSEMBLE_MEMBERS)
}

/// Range key under which a member's values are published
pub fn member_key(parameter: &str, member: usize) -> String {
    format!("{parameter}_mem-{member}")
}

/// Share of readings, across all members and buckets, that exceed the wet threshold
pub fn precipitation_probability(readings: &[EnsembleReading]) -> f64 {
    if readings.is_empty() {
        tracing::warn!("Ensemble response had no coverages, assuming no precipitation");
        return 0.0;
    }
    let wet = readings
        .iter()
        .filter(|r| r.value_mm > WET_THRESHOLD_MM)
        .count();
    wet as f64 / readings.len() as f64
}
