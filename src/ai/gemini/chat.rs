use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse};
use crate::ai::reply::parse_json_reply;
use crate::ai::ChatService;
use crate::models::{ComicPrompt, GeneratedTemplate};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest {
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ChatGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatGenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
}

fn template_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "template": { "type": "STRING" },
            "word_types": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["template", "word_types"],
        "propertyOrdering": ["template", "word_types"]
    })
}

fn comic_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "comic_prompt": { "type": "STRING" },
            "panel_suggestions": { "type": "STRING" }
        },
        "required": ["comic_prompt", "panel_suggestions"],
        "propertyOrdering": ["comic_prompt", "panel_suggestions"]
    })
}

pub struct GeminiChatClient {
    http: GeminiHttpClient,
    temperature: f32,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new(api_key, model, Duration::from_secs(30), client),
            temperature: 1.0,
        }
    }

    async fn structured_call<T: DeserializeOwned>(
        &self,
        what: &str,
        system: &str,
        user: String,
        schema: Value,
    ) -> Result<T> {
        let request = ChatRequest {
            system_instruction: Some(Content::text(None, system)),
            contents: vec![Content::text(Some("user"), user)],
            generation_config: ChatGenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let text = response
            .first_text()
            .ok_or_else(|| Error::AiProvider(format!("No text in Gemini {} response", what)))?;

        parse_json_reply(text, what)
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiChatClient);

#[async_trait]
impl ChatService for GeminiChatClient {
    async fn generate_template(&self, topic: &str) -> Result<GeneratedTemplate> {
        tracing::info!("Generating template for topic: {}", topic);

        self.structured_call(
            "template",
            prompts::TEMPLATE_SYSTEM,
            prompts::render(prompts::TEMPLATE_USER, &[("topic", topic)]),
            template_schema(),
        )
        .await
    }

    async fn generate_comic_prompt(&self, completed_text: &str) -> Result<ComicPrompt> {
        tracing::info!("Generating comic prompt");

        self.structured_call(
            "comic prompt",
            prompts::COMIC_SYSTEM,
            prompts::render(prompts::COMIC_USER, &[("story", completed_text)]),
            comic_schema(),
        )
        .await
    }
}
