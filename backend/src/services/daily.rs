//! Day/night forecast strip

use shared::{
    forecast_instants, plan_days, precipitation_probability, Coordinates, DailyForecast,
    DailyForecastBuilder, TripWindow, DAILY_PARAMETERS,
};
use tokio::task::JoinSet;

use crate::error::{AppError, AppResult};
use crate::external::edr::Collection;
use crate::external::{EdrClient, TimezoneLookup};

#[derive(Clone)]
pub struct DailyForecastService {
    edr: EdrClient,
    timezones: TimezoneLookup,
}

impl DailyForecastService {
    pub fn new(edr: EdrClient, timezones: TimezoneLookup) -> Self {
        Self { edr, timezones }
    }

    pub async fn forecast(
        &self,
        location: Coordinates,
        window: &TripWindow,
    ) -> AppResult<Vec<DailyForecast>> {
        let location_offset = self.timezones.offset_at(location, window.start());
        let slots = plan_days(window, location_offset);
        if slots.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            days = slots.len(),
            offset_minutes = location_offset.minutes(),
            "Planned daily forecast"
        );

        let mut builder = DailyForecastBuilder::new(&slots);

        let mut ensembles = JoinSet::new();
        for (day, slot) in slots.iter().enumerate() {
            let edr = self.edr.clone();
            let (from, to) = slot.precipitation_window();
            ensembles.spawn(async move {
                edr.ensemble_precipitation(location, from, to)
                    .await
                    .map(|readings| (day, precipitation_probability(&readings)))
            });
        }

        let series = self
            .edr
            .position_series(
                Collection::Surface,
                location,
                &DAILY_PARAMETERS,
                &forecast_instants(&slots),
            )
            .await?;
        builder.apply_samples(&series.samples()?)?;

        while let Some(joined) = ensembles.join_next().await {
            let (day, probability) = joined
                .map_err(|e| AppError::Internal(format!("Ensemble task failed: {}", e)))??;
            builder.set_precipitation(day, probability);
        }

        Ok(builder.finish())
    }
}
