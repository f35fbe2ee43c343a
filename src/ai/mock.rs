use super::{ChatService, ImageGenerationService};
use crate::models::{ComicPrompt, GeneratedTemplate};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted [`ChatService`]. Configured responses are returned in order and
/// cycle; with none configured a small valid template is produced.
#[derive(Clone)]
pub struct MockChatClient {
    template_responses: Arc<Mutex<Vec<GeneratedTemplate>>>,
    comic_responses: Arc<Mutex<Vec<ComicPrompt>>>,
    failure: Option<String>,
    template_calls: Arc<Mutex<usize>>,
    comic_calls: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            template_responses: Arc::new(Mutex::new(Vec::new())),
            comic_responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            template_calls: Arc::new(Mutex::new(0)),
            comic_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_template_response(self, template: &str, word_types: &[&str]) -> Self {
        self.template_responses
            .lock()
            .unwrap()
            .push(GeneratedTemplate {
                template: template.to_string(),
                word_types: word_types.iter().map(|w| w.to_string()).collect(),
            });
        self
    }

    pub fn with_comic_response(self, comic_prompt: &str, panel_suggestions: &str) -> Self {
        self.comic_responses.lock().unwrap().push(ComicPrompt {
            comic_prompt: comic_prompt.to_string(),
            panel_suggestions: panel_suggestions.to_string(),
        });
        self
    }

    /// Every call fails with [`Error::AiProvider`].
    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn get_template_call_count(&self) -> usize {
        *self.template_calls.lock().unwrap()
    }

    pub fn get_comic_call_count(&self) -> usize {
        *self.comic_calls.lock().unwrap()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::AiProvider(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn generate_template(&self, topic: &str) -> Result<GeneratedTemplate> {
        let count = {
            let mut count = self.template_calls.lock().unwrap();
            *count += 1;
            *count
        };
        self.check_failure()?;

        let responses = self.template_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GeneratedTemplate {
                template: format!(
                    "On a trip about {}, a {{adjective}} {{noun}} decided to {{verb}}.",
                    topic
                ),
                word_types: vec!["adjective".into(), "noun".into(), "verb".into()],
            })
        } else {
            Ok(responses[(count - 1) % responses.len()].clone())
        }
    }

    async fn generate_comic_prompt(&self, completed_text: &str) -> Result<ComicPrompt> {
        let count = {
            let mut count = self.comic_calls.lock().unwrap();
            *count += 1;
            *count
        };
        self.check_failure()?;

        let responses = self.comic_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ComicPrompt {
                comic_prompt: format!("A four panel comic of: {}", completed_text),
                panel_suggestions: "Panel 1: setup. Panel 2: twist. Panel 3: chaos. Panel 4: punchline."
                    .to_string(),
            })
        } else {
            Ok(responses[(count - 1) % responses.len()].clone())
        }
    }
}

/// Scripted [`ImageGenerationService`].
#[derive(Clone)]
pub struct MockImageGenerationClient {
    image_responses: Arc<Mutex<Vec<Vec<u8>>>>,
    text_only: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            image_responses: Arc::new(Mutex::new(Vec::new())),
            text_only: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, response: Vec<u8>) -> Self {
        self.image_responses.lock().unwrap().push(response);
        self
    }

    /// Behave like a backend that answers with commentary only.
    pub fn with_text_only_responses(mut self) -> Self {
        self.text_only = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, oldest first.
    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// A 1x1 PNG.
    fn placeholder_png() -> Result<Vec<u8>> {
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )?;
        Ok(bytes)
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let count = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        if self.text_only {
            return Err(Error::NoImageProduced);
        }

        let responses = self.image_responses.lock().unwrap();
        if responses.is_empty() {
            Self::placeholder_png()
        } else {
            Ok(responses[(count - 1) % responses.len()].clone())
        }
    }
}
