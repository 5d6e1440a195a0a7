//! Categorical Bucketizer
//!
//! Maps a continuous value onto an ordered list of named categories. Each
//! variable has one [`BucketTable`]; a slot holding `None` is a category that
//! exists for spacing but is not worth mentioning.

use serde::{Deserialize, Serialize};

/// Relative value at or below which a reading counts as noise
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Widening added to each bucket so the top of the range stays in the last bucket
const BUCKET_PADDING: f64 = 0.01;

/// What to report when a value does not clear the noise threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBucket {
    FirstBucket,
    Label(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketTable {
    /// Raw value that normalizes to 1.0
    pub scale: f64,
    pub labels: &'static [Option<&'static str>],
    pub empty: EmptyBucket,
    pub threshold: f64,
}

impl BucketTable {
    /// Bucket an already-normalized value in `[0, 1]`
    pub fn split(&self, value: f64) -> Option<&'static str> {
        valsplit(value, self.labels, self.empty, self.threshold)
    }

    /// Normalize a raw value against the table scale, then bucket it
    pub fn classify(&self, raw: f64) -> Option<&'static str> {
        self.split(normalize(raw, self.scale))
    }
}

/// Clamp to `[0, max]` and scale to `[0, 1]`
pub fn normalize(value: f64, max: f64) -> f64 {
    if max <= 0.0 || value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max) / max
}

pub fn valsplit(
    value: f64,
    labels: &'static [Option<&'static str>],
    empty: EmptyBucket,
    threshold: f64,
) -> Option<&'static str> {
    if labels.is_empty() {
        return None;
    }
    // `!(>)` also routes NaN to the empty bucket
    if !(value > threshold) {
        return match empty {
            EmptyBucket::FirstBucket => labels[0],
            EmptyBucket::Label(label) => Some(label),
        };
    }
    let width = 1.0 / labels.len() as f64 + BUCKET_PADDING;
    let index = ((value / width).floor() as usize).min(labels.len() - 1);
    labels[index]
}

pub const PRECIPITATION_CHANCE: BucketTable = BucketTable {
    scale: 1.0,
    labels: &[Some("low"), Some("medium"), Some("high")],
    empty: EmptyBucket::Label("no"),
    threshold: DEFAULT_THRESHOLD,
};

/// Keyed on the frozen share of precipitation, in percent
pub const PRECIPITATION_KIND: BucketTable = BucketTable {
    scale: 100.0,
    labels: &[Some("rain with snow"), Some("snow")],
    empty: EmptyBucket::Label("rain"),
    threshold: DEFAULT_THRESHOLD,
};

pub const CLOUD_COVERAGE: BucketTable = BucketTable {
    scale: 100.0,
    labels: &[Some("clear"), Some("partial"), Some("overcast"), Some("thick")],
    empty: EmptyBucket::FirstBucket,
    threshold: DEFAULT_THRESHOLD,
};

pub const HUMIDITY: BucketTable = BucketTable {
    scale: 100.0,
    labels: &[Some("low"), Some("medium"), Some("high"), Some("very high")],
    empty: EmptyBucket::FirstBucket,
    threshold: DEFAULT_THRESHOLD,
};

/// Visibility in metres; see [`fog_from_visibility`]
pub const FOG: BucketTable = BucketTable {
    scale: 50_000.0,
    labels: &[None, None, None, Some("haze"), Some("light fog"), Some("thick fog")],
    empty: EmptyBucket::FirstBucket,
    threshold: DEFAULT_THRESHOLD,
};

pub const AIR_QUALITY_INDEX: BucketTable = BucketTable {
    scale: 300.0,
    labels: &[None, None, Some("Unhealthy"), Some("Very Unhealthy"), Some("Hazardous")],
    empty: EmptyBucket::FirstBucket,
    threshold: DEFAULT_THRESHOLD,
};

pub const POLLEN: BucketTable = BucketTable {
    scale: 4.0,
    labels: &[None, Some("Low"), Some("Medium"), Some("High")],
    empty: EmptyBucket::FirstBucket,
    threshold: DEFAULT_THRESHOLD,
};

pub const MOLD: BucketTable = POLLEN;

/// Fog grows as visibility shrinks, so the normalized visibility is inverted
pub fn fog_from_visibility(visibility_m: f64) -> Option<&'static str> {
    FOG.split(1.0 - normalize(visibility_m, FOG.scale))
}

/// Surface pressure category from fixed absolute thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Low,
    Medium,
    High,
}

impl PressureLevel {
    pub const LOW_MAX_HPA: f64 = 1002.5;
    pub const MEDIUM_MAX_HPA: f64 = 1031.5;

    pub fn from_hpa(hpa: f64) -> Self {
        if hpa <= Self::LOW_MAX_HPA {
            PressureLevel::Low
        } else if hpa <= Self::MEDIUM_MAX_HPA {
            PressureLevel::Medium
        } else {
            PressureLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PressureLevel::Low => "low",
            PressureLevel::Medium => "medium",
            PressureLevel::High => "high",
        }
    }
}
