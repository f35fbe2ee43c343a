//! Application orchestration for the template → story → illustration flow.

use crate::ai::{ChatService, GeminiChatClient, GeminiImageClient, ImageGenerationService};
use crate::error::RecordKind;
use crate::images::ImageStore;
use crate::madlib;
use crate::models::{CompletedMadLib, Config, GeneratedImage, HealthResponse, Template};
use crate::store::{InMemorySessionStore, SessionStore};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// Sequences the language-model, image and storage services per request.
pub struct MadLibsApp {
    chat: Box<dyn ChatService>,
    image_gen: Box<dyn ImageGenerationService>,
    store: Box<dyn SessionStore>,
    images: ImageStore,
    api_key_configured: bool,
}

/// Injectable service bundle used to construct [`MadLibsApp`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub store: Box<dyn SessionStore>,
}

fn parse_id(kind: RecordKind, id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| Error::not_found(kind, id))
}

impl MadLibsApp {
    pub fn with_services(
        services: AppServices,
        images: ImageStore,
        api_key_configured: bool,
    ) -> Self {
        Self {
            chat: services.chat,
            image_gen: services.image_gen,
            store: services.store,
            images,
            api_key_configured,
        }
    }

    /// Build the app against the Gemini API from environment configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Chat model: {}", config.chat_model);
        info!("Image model: {}", config.image_model);

        let chat = GeminiChatClient::new_with_client(
            config.api_key.clone(),
            config.chat_model.clone(),
            http_client.clone(),
        );
        let image_gen = GeminiImageClient::new_with_client(
            config.api_key.clone(),
            config.image_model.clone(),
            http_client,
        );

        let images = ImageStore::new(&config.image_dir)?;
        info!("Storing images in {}", images.image_dir().display());

        Ok(Self::with_services(
            AppServices {
                chat: Box::new(chat),
                image_gen: Box::new(image_gen),
                store: Box::new(InMemorySessionStore::new()),
            },
            images,
            !config.api_key.is_empty(),
        ))
    }

    /// Generate, validate and store a template for `topic`.
    pub async fn generate_template(&self, topic: &str) -> Result<Template> {
        info!("Generating template for topic: {}", topic);

        let generated = self.chat.generate_template(topic).await?;
        madlib::check_placeholders(&generated.template, &generated.word_types)?;

        let template = Template {
            id: Uuid::new_v4(),
            text: generated.template,
            placeholder_names: generated.word_types,
            topic: topic.to_string(),
        };
        self.store.put_template(template.clone()).await;

        info!(
            "Stored template {} with {} placeholders",
            template.id,
            template.placeholder_names.len()
        );
        Ok(template)
    }

    /// Fill a stored template with `user_inputs` and derive its comic brief.
    ///
    /// A placeholder missing from `user_inputs` is filled with an empty string.
    pub async fn submit_madlib(
        &self,
        template_id: &str,
        user_inputs: &HashMap<String, String>,
    ) -> Result<CompletedMadLib> {
        let template_id = parse_id(RecordKind::Template, template_id)?;
        let template = self.store.get_template(&template_id).await?;

        let values: Vec<String> = template
            .placeholder_names
            .iter()
            .map(|name| user_inputs.get(name).cloned().unwrap_or_default())
            .collect();
        let completed_text = madlib::fill(
            &template.text,
            template.placeholder_names.as_slice(),
            values.as_slice(),
        );

        let comic = self.chat.generate_comic_prompt(&completed_text).await?;

        let completed = CompletedMadLib {
            id: Uuid::new_v4(),
            template_id,
            completed_text,
            comic_prompt: comic.comic_prompt,
            panel_suggestions: comic.panel_suggestions,
        };
        self.store.put_madlib(completed.clone()).await;

        info!("Stored madlib {} from template {}", completed.id, template_id);
        Ok(completed)
    }

    /// Illustrate a stored madlib and write the image to `<madlib_id>.png`.
    pub async fn generate_image(&self, madlib_id: &str) -> Result<GeneratedImage> {
        let madlib_id = parse_id(RecordKind::MadLib, madlib_id)?;
        let completed = self.store.get_madlib(&madlib_id).await?;

        info!("Generating image for madlib {}", madlib_id);
        let image_data = self.image_gen.generate_image(&completed.comic_prompt).await?;
        let path = self.images.save_png(&madlib_id, &image_data).await?;

        Ok(GeneratedImage {
            madlib_id,
            filename: ImageStore::filename_for(&madlib_id),
            path,
        })
    }

    /// Stored image bytes and their content type.
    pub async fn read_image(&self, filename: &str) -> Result<(Vec<u8>, &'static str)> {
        let bytes = self.images.read(filename).await?;
        let content_type = crate::images::content_type(&bytes);
        Ok((bytes, content_type))
    }

    pub async fn health(&self) -> HealthResponse {
        let counts = self.store.counts().await;
        HealthResponse {
            status: "healthy".to_string(),
            api_key_configured: self.api_key_configured,
            templates_count: counts.templates,
            madlibs_count: counts.madlibs,
        }
    }
}
