//! Trip advice endpoint
//!
//! Accepts a multipart form so clothing photos can travel with the trip
//! details.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use chrono::Utc;
use shared::{validate_photos, ContentResponse, Photo, TripContext};

use super::params::TripParams;
use crate::error::{AppError, AppResult};
use crate::services::{AdviceRequest, AdviceService};
use crate::AppState;

/// Text fields and uploads of an advice form, before validation
#[derive(Debug, Default)]
struct AdviceForm {
    lat: Option<String>,
    lon: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    utc_offset: Option<String>,
    context: TripContext,
    photos: Vec<Photo>,
}

fn parse_number<T: std::str::FromStr>(
    value: Option<&str>,
    field: &str,
    message: &str,
) -> AppResult<T> {
    value
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| AppError::validation(field, message))
}

impl AdviceForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::ValidationError(format!("Malformed form: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "photos" | "photos[]" => form.photos.push(read_photo(field).await?),
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::ValidationError(format!("Malformed form: {}", e)))?;
                    form.set_text(&name, value);
                }
            }
        }
        Ok(form)
    }

    fn set_text(&mut self, name: &str, value: String) {
        let non_empty = Some(value).filter(|v| !v.trim().is_empty());
        match name {
            "lat" => self.lat = non_empty,
            "lon" => self.lon = non_empty,
            "startDate" => self.start_date = non_empty,
            "endDate" => self.end_date = non_empty,
            "utcOffset" => self.utc_offset = non_empty,
            "class" => self.context.place_class = non_empty,
            "type" => self.context.place_type = non_empty,
            "activity" => self.context.activity = non_empty,
            _ => tracing::debug!(field = name, "Ignoring unknown form field"),
        }
    }

    fn params(&self) -> AppResult<TripParams> {
        Ok(TripParams {
            lat: parse_number(self.lat.as_deref(), "lat", "Invalid latitude")?,
            lon: parse_number(self.lon.as_deref(), "lon", "Invalid longitude")?,
            start_date: parse_number(self.start_date.as_deref(), "startDate", "Invalid starting date")?,
            end_date: parse_number(self.end_date.as_deref(), "endDate", "Invalid end date")?,
            utc_offset: match self.utc_offset.as_deref() {
                Some(_) => parse_number(self.utc_offset.as_deref(), "utcOffset", "Invalid UTC offset")?,
                None => 0,
            },
        })
    }
}

async fn read_photo(field: Field<'_>) -> AppResult<Photo> {
    let file_name = field.file_name().unwrap_or("photo").to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("{}: {}", file_name, e)))?;
    Ok(Photo::new(file_name, content_type, bytes.to_vec()))
}

pub async fn get_advice(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ContentResponse<String>>> {
    let form = AdviceForm::read(multipart).await?;
    let params = form.params()?;
    let location = params.location()?;
    let window = params.window(Utc::now(), state.config.forecast.max_forecast_days)?;
    validate_photos(&form.photos).map_err(|m| AppError::InvalidUpload(m.to_string()))?;

    let request = AdviceRequest {
        location,
        window,
        context: form.context,
        photos: form.photos,
    };
    let service = AdviceService::new(
        state.edr.clone(),
        state.llm.clone(),
        state.classifier.clone(),
        state.config.forecast.sample_count,
    );
    let content = service.advise(&request).await?;
    Ok(Json(ContentResponse::new(content)))
}
