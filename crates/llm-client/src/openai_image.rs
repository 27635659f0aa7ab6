//! [`ImageGenerator`] backed by image-generation-client.

use async_trait::async_trait;
use image_generation_client::ImageGenerationClient;
use relay_core::Result;
use tracing::{info, instrument};

use super::{relay_error, ImageGenerator};

#[derive(Clone)]
pub struct OpenAIImageGenerator {
    client: ImageGenerationClient,
}

impl OpenAIImageGenerator {
    pub fn new(client: ImageGenerationClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageGenerator for OpenAIImageGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.client.model()))]
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        let image = self
            .client
            .generate_image(prompt)
            .await
            .map_err(relay_error)?;
        if let Some(revised) = &image.revised_prompt {
            info!(revised_prompt = %revised, "image prompt revised by provider");
        }
        Ok(image.bytes)
    }
}
