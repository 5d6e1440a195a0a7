//! Hazard alerts

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Haines index above which a fire-spread advisory is raised
pub const HAINES_ALERT_THRESHOLD: f64 = 5.0;

/// Alert as published by the upstream alert feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawAlert {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: String,
}

/// `{ "alerts": [...] }` feed document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFeed {
    #[serde(default)]
    pub alerts: Vec<RawAlert>,
}

impl AlertFeed {
    /// Keep the first alert for every distinct title, in feed order
    pub fn unique_by_title(self) -> Vec<RawAlert> {
        let mut seen = HashSet::new();
        self.alerts
            .into_iter()
            .filter(|alert| seen.insert(alert.title.clone()))
            .collect()
    }
}

/// Alert returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub description: String,
    pub severity: String,
}

/// Synthetic advisory for a high Haines index, or `None` when fire risk is unremarkable
pub fn haines_advisory(haines_index: Option<f64>) -> Option<RawAlert> {
    match haines_index {
        Some(index) if index > HAINES_ALERT_THRESHOLD => Some(RawAlert {
            title: "High Haines Index".to_string(),
            description: "The Haines index is high. Take care when lighting fires because they can spread quickly.".to_string(),
            severity: "advisory".to_string(),
        }),
        _ => None,
    }
}
