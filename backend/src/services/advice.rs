//! Trip advice pipeline
//!
//! Samples the trip window, fetches deterministic and ensemble forecasts,
//! reduces them into a feature block and asks the text generator for
//! clothing advice and precautions.

use shared::{
    precipitation_probability, sample_timestamps, Coordinates, FeatureSet, Photo, TripAggregate,
    TripContext, TripWindow, HEIGHT_ABOVE_GROUND_PARAMETERS, SURFACE_PARAMETERS,
};

use crate::error::AppResult;
use crate::external::edr::Collection;
use crate::external::{ClassifierClient, EdrClient, LlmClient};
use crate::prompts;

/// Shown instead of advice when the generator cannot be reached
pub const ADVICE_FALLBACK: &str = "LLM runner currently unavailable";

/// Everything an advice request carries once validated
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub location: Coordinates,
    pub window: TripWindow,
    pub context: TripContext,
    pub photos: Vec<Photo>,
}

#[derive(Clone)]
pub struct AdviceService {
    edr: EdrClient,
    llm: LlmClient,
    classifier: ClassifierClient,
    sample_count: usize,
}

impl AdviceService {
    pub fn new(
        edr: EdrClient,
        llm: LlmClient,
        classifier: ClassifierClient,
        sample_count: usize,
    ) -> Self {
        Self {
            edr,
            llm,
            classifier,
            sample_count,
        }
    }

    /// Reduce the forecast for a trip into its feature block
    pub async fn features(&self, request: &AdviceRequest) -> AppResult<FeatureSet> {
        let instants = sample_timestamps(&request.window, self.sample_count)?;
        let (from, to) = request.window.precipitation_window();

        let (surface, height, readings) = tokio::try_join!(
            self.edr.position_series(
                Collection::Surface,
                request.location,
                &SURFACE_PARAMETERS,
                &instants,
            ),
            self.edr.position_series(
                Collection::HeightAboveGround,
                request.location,
                &HEIGHT_ABOVE_GROUND_PARAMETERS,
                &instants,
            ),
            self.edr.ensemble_precipitation(request.location, from, to),
        )?;

        let surface_samples = surface.samples()?;
        let height_samples = height.samples()?;
        let mut aggregate =
            TripAggregate::from_samples(surface_samples.iter().chain(height_samples.iter()));
        aggregate.set_precipitation_probability(precipitation_probability(&readings));

        let mut context = request.context.clone();
        if !request.photos.is_empty() {
            context.chosen_clothes = Some(self.classifier.classify(&request.photos).await?);
        }

        Ok(FeatureSet::from_aggregate(&aggregate, &context))
    }

    pub async fn advise(&self, request: &AdviceRequest) -> AppResult<String> {
        let features = self.features(request).await?;
        let text = features.render();
        tracing::debug!(features = %text, "Rendered trip features");

        let instruction = if request.photos.is_empty() {
            prompts::ADVICE_WITHOUT_CLOTHES
        } else {
            prompts::ADVICE_WITH_CLOTHES
        };

        let (advice, precautions) = tokio::join!(
            self.llm.generate(instruction, &text),
            self.llm.generate(prompts::PRECAUTIONS, &text),
        );
        Ok(compose_advice(advice, precautions))
    }
}

/// Advice falls back to a fixed notice; a missing precaution line is simply left out
pub fn compose_advice(advice: AppResult<String>, precautions: AppResult<String>) -> String {
    let advice = advice.unwrap_or_else(|e| {
        tracing::warn!("Advice generation failed: {}", e);
        ADVICE_FALLBACK.to_string()
    });

    match precautions {
        Ok(precautions) => format!("{}\n{}", advice, precautions),
        Err(e) => {
            tracing::warn!("Precaution generation failed: {}", e);
            advice
        }
    }
}
