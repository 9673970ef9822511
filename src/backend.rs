use async_trait::async_trait;
use llmapi::{ImageGenerationConfig, LLMClient, LLMMessageType, LLMType};

use crate::config::AppConfig;
use crate::constants::{OUTPUT_ASPECT_RATIO, OUTPUT_IMAGE_COUNT, OUTPUT_IMAGE_MIME};
use crate::models::{GeneratedImage, ImagePayload};

/// The two external AI endpoints a composition needs. Errors are plain
/// messages; the compositor attaches the slot or composition they belong to.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Turns an image into a free-text description fit for a text-to-image
    /// prompt.
    async fn describe_image(
        &self,
        image: &ImagePayload,
        instruction: &str,
    ) -> Result<String, String>;

    /// Renders a prompt.
    async fn synthesize_image(
        &self,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<Synthesis, String>;
}

/// What a synthesis call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    Image(GeneratedImage),
    /// The service answered without an image. `filtered` holds the reasons
    /// its safety filter gave, if any.
    Empty { filtered: Vec<String> },
}

/// Synthesis settings every composition uses: one 3:4 JPEG.
pub fn composition_image_config() -> ImageGenerationConfig {
    ImageGenerationConfig {
        number_of_images: OUTPUT_IMAGE_COUNT,
        output_mime_type: OUTPUT_IMAGE_MIME.to_string(),
        aspect_ratio: OUTPUT_ASPECT_RATIO.to_string(),
    }
}

/// Gemini for descriptions, Imagen for synthesis, sharing one connection
/// pool and the credential from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    describer: LLMClient,
    painter: LLMClient,
}

impl GeminiBackend {
    pub fn new(config: &AppConfig) -> Self {
        let http = llmapi::HttpClient::new();
        Self {
            describer: LLMClient::with_http(
                http.clone(),
                &config.api_key,
                &config.endpoint,
                &config.describe_model,
                LLMType::Chat,
            ),
            painter: LLMClient::with_http(
                http,
                &config.api_key,
                &config.endpoint,
                &config.image_model,
                LLMType::Image,
            ),
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn describe_image(
        &self,
        image: &ImagePayload,
        instruction: &str,
    ) -> Result<String, String> {
        let part = LLMMessageType::image_bytes(&image.bytes, image.mime_type.clone());
        llmapi::describe_image(&self.describer, part, instruction)
            .await
            .map_err(|err| format!("{err:#}"))
    }

    async fn synthesize_image(
        &self,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<Synthesis, String> {
        let output = llmapi::generate_images(&self.painter, prompt, config)
            .await
            .map_err(|err| format!("{err:#}"))?;

        Ok(match output.images.into_iter().next() {
            Some(image) => Synthesis::Image(GeneratedImage {
                mime_type: image.mime_type,
                base64: image.data_b64,
            }),
            None => Synthesis::Empty {
                filtered: output.filtered_reasons,
            },
        })
    }
}
