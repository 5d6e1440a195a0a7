//! Hazard alerts for same-day trips

use chrono::{DateTime, Utc};
use shared::{haines_advisory, Alert, Coordinates, ForecastParameter, RawAlert};

use crate::error::AppResult;
use crate::external::{EdrClient, LlmClient, WeatherbitClient};
use crate::prompts;

#[derive(Clone)]
pub struct AlertService {
    edr: EdrClient,
    weatherbit: WeatherbitClient,
    llm: LlmClient,
}

impl AlertService {
    pub fn new(edr: EdrClient, weatherbit: WeatherbitClient, llm: LlmClient) -> Self {
        Self {
            edr,
            weatherbit,
            llm,
        }
    }

    pub async fn alerts(&self, location: Coordinates, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let (feed, haines) = tokio::try_join!(
            self.weatherbit.alerts(location),
            self.edr
                .current_value(location, ForecastParameter::HainesIndex, now),
        )?;

        let raw: Vec<RawAlert> = haines_advisory(haines)
            .into_iter()
            .chain(feed.unique_by_title())
            .collect();

        let mut alerts = Vec::with_capacity(raw.len());
        for alert in raw {
            alerts.push(self.summarize(alert).await);
        }
        Ok(alerts)
    }

    async fn summarize(&self, alert: RawAlert) -> Alert {
        let description = match self
            .llm
            .summarize(prompts::ALERT_SUMMARY, &alert.description)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(title = %alert.title, "Alert summary failed, keeping original text: {}", e);
                alert.description
            }
        };

        Alert {
            title: alert.title,
            description,
            severity: alert.severity,
        }
    }
}
