use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::ImageGenerationService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new(api_key, model, Duration::from_secs(120), client),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let request = ImageRequest {
            contents: vec![Content::text(None, prompts::image_prompt(prompt))],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let mut image_data = None;
        for part in response.parts() {
            match part {
                Part::Text { text } => {
                    tracing::info!("Gemini image commentary: {}", text.trim());
                }
                Part::InlineData { inline_data } if image_data.is_none() => {
                    image_data = Some(inline_data);
                }
                Part::InlineData { .. } => {
                    tracing::debug!("Ignoring additional inline image part");
                }
            }
        }

        let image_data = image_data.ok_or_else(|| {
            tracing::error!("Gemini response contained no image part");
            Error::NoImageProduced
        })?;

        tracing::debug!(
            "Gemini returned image with mime_type: {}",
            image_data.mime_type
        );

        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD
            .decode(&image_data.data)
            .map_err(|e| Error::AiProvider(format!("Failed to decode Gemini base64 image: {}", e)))
    }
}
