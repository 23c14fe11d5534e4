//! Image-generation collaborator. Best-effort: a failure here never fails
//! the submission, the result simply ships without an image.

use crate::{config::Config, domain::ImageProvider, errors::ImageError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::time::Duration;
use tracing;

#[derive(Clone)]
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    timeout: Duration,
}

impl OpenAiImageProvider {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            api_base: config.openai_api_base.clone(),
            timeout: config.image_timeout,
        }
    }
}

fn build_prompt(animal: &str) -> String {
    format!(
        "Ilustración estilo póster, colorida y amigable, de un {} que \
         representa una personalidad. Sin texto.",
        animal
    )
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, animal: &str) -> Result<Vec<u8>, ImageError> {
        let payload = serde_json::json!({
            "prompt": build_prompt(animal),
            "n": 1,
            "size": "1024x1024",
            "response_format": "b64_json"
        });

        tracing::debug!(%animal, "Requesting image generation");

        let res = self
            .client
            .post(format!("{}/images/generations", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ImageError::UpstreamStatus { status, body });
        }

        let body: serde_json::Value = res.json().await?;
        let b64 = body
            .get("data")
            .and_then(|d| d.get(0))
            .and_then(|d| d.get("b64_json"))
            .and_then(|d| d.as_str())
            .ok_or_else(|| {
                ImageError::MalformedPayload("missing data[0].b64_json".to_string())
            })?;

        let bytes = BASE64
            .decode(b64)
            .map_err(|e| ImageError::MalformedPayload(format!("invalid base64: {}", e)))?;

        tracing::debug!(%animal, byte_count = bytes.len(), "Image generated");
        Ok(bytes)
    }
}
