//! OpenAI image generation client.
//!
//! Calls the images endpoint for a single picture and returns its bytes. The provider usually
//! answers with a short-lived URL, which is downloaded with a fixed 20 second timeout; inline
//! base64 payloads are decoded directly. Failures are reported as [`ClientError`], with
//! content-policy refusals kept distinct.

use async_openai::{
    config::OpenAIConfig,
    types::{CreateImageRequestArgs, Image, ImageModel, ImageSize},
    Client,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use openai_client::{build_client, mask_token, ClientError};
use std::sync::Arc;
use std::time::Duration;

/// Timeout applied to downloading the generated image.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// A generated picture.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    /// Provider URL the bytes were downloaded from, when the answer was a URL.
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

/// OpenAI image generation client.
#[derive(Clone)]
pub struct ImageGenerationClient {
    client: Arc<Client<OpenAIConfig>>,
    http: reqwest::Client,
    model: String,
    size: ImageSize,
    masked_key: String,
}

fn image_model(name: &str) -> ImageModel {
    match name {
        "dall-e-2" => ImageModel::DallE2,
        "dall-e-3" => ImageModel::DallE3,
        other => ImageModel::Other(other.to_string()),
    }
}

impl ImageGenerationClient {
    /// Client for the default API base URL.
    pub fn new(api_key: String) -> Result<Self, ClientError> {
        Self::build(api_key, None)
    }

    /// Client for a custom base URL (compatible services, test servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, ClientError> {
        Self::build(api_key, Some(base_url))
    }

    fn build(api_key: String, base_url: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            client: Arc::new(build_client(&api_key, base_url.as_deref())),
            http,
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: ImageSize::S1024x1024,
            masked_key: mask_token(&api_key),
        })
    }

    /// Sets the model (dall-e-2, dall-e-3 or any compatible name).
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates one image for `prompt` and returns its bytes.
    #[tracing::instrument(skip(self), fields(model = %self.model))]
    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        tracing::info!(
            size = ?self.size,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %self.masked_key,
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(image_model(&self.model))
            .size(self.size)
            .n(1)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI image generation request JSON");
        }

        let response = self.client.images().create(request).await?;

        let first = response
            .data
            .first()
            .ok_or_else(|| ClientError::MalformedResponse("response has no images".into()))?;
        let image: &Image = first;

        match image {
            Image::Url {
                url,
                revised_prompt,
            } => {
                tracing::info!(image_url = %url, "OpenAI image generation completed");
                let bytes = self.download(url).await?;
                Ok(GeneratedImage {
                    bytes,
                    url: Some(url.clone()),
                    revised_prompt: revised_prompt.clone(),
                })
            }
            Image::B64Json {
                b64_json,
                revised_prompt,
            } => {
                let bytes = BASE64
                    .decode(b64_json.as_bytes())
                    .map_err(|e| ClientError::MalformedResponse(format!("invalid base64 image: {}", e)))?;
                tracing::info!(bytes = bytes.len(), "OpenAI image generation completed (inline)");
                Ok(GeneratedImage {
                    bytes,
                    url: None,
                    revised_prompt: revised_prompt.clone(),
                })
            }
        }
    }

    /// Downloads the generated image; non-success statuses and timeouts are transport errors.
    async fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ClientError::Transport(format!("image download failed: {}", e)))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("image download failed: {}", e)))?;
        if bytes.is_empty() {
            return Err(ClientError::MalformedResponse("downloaded image is empty".into()));
        }
        Ok(bytes.to_vec())
    }
}
