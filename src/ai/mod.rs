//! AI service integration for template, comic prompt, and image generation
//!
//! Capabilities are exposed as traits so the app can run against the Gemini
//! REST API in production and against mocks in tests.

pub mod gemini;
pub mod mock;
pub mod reply;

pub use gemini::{GeminiChatClient, GeminiImageClient};
pub use mock::{MockChatClient, MockImageGenerationClient};

use crate::models::{ComicPrompt, GeneratedTemplate};
use crate::Result;
use async_trait::async_trait;

/// Language-model calls used by the madlib flow.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Ask for a template about `topic`. The result is not yet validated.
    async fn generate_template(&self, topic: &str) -> Result<GeneratedTemplate>;

    /// Turn a completed story into a four panel comic brief.
    async fn generate_comic_prompt(&self, completed_text: &str) -> Result<ComicPrompt>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Render `prompt` and return the raw image bytes.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}
