//! Data models and structures
//!
//! Defines the stored session records, the JSON bodies of the HTTP API, and
//! the environment-driven configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Template as returned by the language model, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedTemplate {
    pub template: String,
    pub word_types: Vec<String>,
}

/// Comic brief derived from a completed story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComicPrompt {
    pub comic_prompt: String,
    pub panel_suggestions: String,
}

/// A validated template held in the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: Uuid,
    pub text: String,
    pub placeholder_names: Vec<String>,
    pub topic: String,
}

/// A filled-in template plus its comic brief. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedMadLib {
    pub id: Uuid,
    pub template_id: Uuid,
    pub completed_text: String,
    pub comic_prompt: String,
    pub panel_suggestions: String,
}

/// Where a generated illustration was written.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub madlib_id: Uuid,
    pub filename: String,
    pub path: PathBuf,
}

// HTTP request/response bodies
#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub template_id: String,
    pub template: String,
    pub word_types: Vec<String>,
    pub topic: String,
}

impl From<&Template> for TemplateResponse {
    fn from(template: &Template) -> Self {
        Self {
            template_id: template.id.to_string(),
            template: template.text.clone(),
            word_types: template.placeholder_names.clone(),
            topic: template.topic.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserInputsRequest {
    pub template_id: String,
    /// `{word_type: user_input}`
    pub user_inputs: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletedMadLibResponse {
    pub madlib_id: String,
    pub completed_text: String,
    pub comic_prompt: String,
    pub panel_suggestions: String,
}

impl From<&CompletedMadLib> for CompletedMadLibResponse {
    fn from(madlib: &CompletedMadLib) -> Self {
        Self {
            madlib_id: madlib.id.to_string(),
            completed_text: madlib.completed_text.clone(),
            comic_prompt: madlib.comic_prompt.clone(),
            panel_suggestions: madlib.panel_suggestions.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationRequest {
    pub madlib_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    pub madlib_id: String,
    pub image_url: String,
    pub status: String,
}

impl From<&GeneratedImage> for ImageGenerationResponse {
    fn from(image: &GeneratedImage) -> Self {
        Self {
            madlib_id: image.madlib_id.to_string(),
            image_url: format!("/api/images/{}", image.filename),
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
    pub templates_count: usize,
    pub madlibs_count: usize,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub chat_model: String,
    pub image_model: String,
    pub image_dir: PathBuf,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_key: lookup("GOOGLE_API_KEY")
                .ok_or_else(|| crate::Error::Config("GOOGLE_API_KEY not set".to_string()))?,
            chat_model: lookup("MADLIBS_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            image_model: lookup("MADLIBS_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            image_dir: lookup("MADLIBS_IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("generated_images")),
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: lookup("API_PORT").unwrap_or_else(|| "8000".to_string()),
        })
    }
}
