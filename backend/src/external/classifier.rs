//! Clothing photo classifier
//!
//! Photos are forwarded as one multipart upload; the service answers with a
//! plain-text, comma-separated list of the garments it recognised.

use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::Photo;
use tracing::instrument;

use super::http_client;
use crate::config::ClassifierConfig;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ClassifierClient {
    client: Client,
    endpoint: String,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> AppResult<Self> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            endpoint: config.endpoint.clone(),
        })
    }

    fn form(photos: &[Photo]) -> AppResult<Form> {
        photos.iter().try_fold(Form::new(), |form, photo| {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.content_type)
                .map_err(|e| AppError::InvalidUpload(format!("{}: {}", photo.file_name, e)))?;
            Ok(form.part("photos", part))
        })
    }

    /// Garments recognised in the photos
    #[instrument(skip_all, fields(photos = photos.len()))]
    pub async fn classify(&self, photos: &[Photo]) -> AppResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form(photos)?)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Classifier request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamFetch(format!("Classifier returned {}", status)));
        }

        let labels = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Classifier body could not be read: {}", e)))?;
        Ok(labels.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_rejects_bad_mime() {
        let photo = Photo::new("a.png", "not a mime", vec![1, 2, 3]);
        assert!(matches!(
            ClassifierClient::form(&[photo]),
            Err(AppError::InvalidUpload(_))
        ));
    }

    #[test]
    fn test_form_accepts_images() {
        let photos = [
            Photo::new("a.png", "image/png", vec![1]),
            Photo::new("b.jpg", "image/jpeg", vec![2]),
        ];
        assert!(ClassifierClient::form(&photos).is_ok());
    }
}
