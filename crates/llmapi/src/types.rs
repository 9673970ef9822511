use crate::utils;
use reqwest::Client;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMType {
    Chat,
    Image,
}

#[derive(Clone, Debug)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE {
        data_b64: String,
        mime_type: Option<String>,
    },
}
impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }
    pub fn image_b64(data_b64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            mime_type: Some(mime_type.into()),
        }
    }
    pub fn image_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::image_b64(utils::encode_byte_to_base64(bytes), mime_type)
    }

    /// The MIME type sent upstream for an image part; JPEG when unset.
    pub fn resolved_mime_type(&self) -> Option<String> {
        match self {
            LLMMessageType::TEXT(_) => None,
            LLMMessageType::IMAGE { mime_type, .. } => Some(
                mime_type
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .unwrap_or("image/jpeg")
                    .to_string(),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMUserType {
    Human,
    AI,
    System,
}
impl LLMUserType {
    pub fn parse(role_str: &str) -> Option<Self> {
        match role_str.trim().to_lowercase().as_str() {
            "user" | "human" => Some(LLMUserType::Human),
            "model" | "ai" | "assistant" => Some(LLMUserType::AI),
            "system" => Some(LLMUserType::System),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
}

impl LLMMessage {
    pub fn new(role: &str, content: Vec<LLMMessageType>) -> Self {
        Self {
            role: LLMUserType::parse(role).unwrap_or(LLMUserType::Human),
            content,
        }
    }
}

/// Options for an Imagen `predict` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageGenerationConfig {
    pub number_of_images: u32,
    pub output_mime_type: String,
    pub aspect_ratio: String,
}

/// An image returned by the synthesis endpoint, still base64 encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImageData {
    pub mime_type: String,
    pub data_b64: String,
}

/// Everything a `predict` call produced: the usable images and the reasons
/// given for samples the safety filter dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictOutput {
    pub images: Vec<GeneratedImageData>,
    pub filtered_reasons: Vec<String>,
}

/// Connection settings for one model. The HTTP connection pool is shared by
/// clones, so build one per model at startup and clone it freely.
#[derive(Clone)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
    pub(crate) llm_type: LLMType,
    pub(crate) http: Client,
}

impl LLMClient {
    pub fn with_http(
        http: Client,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
        llm_type: LLMType,
    ) -> Self {
        let default_model: String = default_model.into();
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model
                .trim()
                .trim_start_matches("models/")
                .to_string(),
            llm_type,
            http,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn llm_type(&self) -> LLMType {
        self.llm_type
    }

    pub(crate) fn method_url(&self, method: &str) -> String {
        format!(
            "{}/{}:{}",
            self.endpoint.trim_end_matches('/'),
            self.default_model,
            method
        )
    }
}

impl fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMClient")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("default_model", &self.default_model)
            .field("llm_type", &self.llm_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_models_prefix_and_builds_urls() {
        let client = LLMClient::with_http(
            Client::new(),
            "key",
            "https://example.test/v1beta/models/",
            "models/gemini-2.5-flash",
            LLMType::Chat,
        );
        assert_eq!(client.default_model(), "gemini-2.5-flash");
        assert_eq!(
            client.method_url("generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client =
            LLMClient::with_http(Client::new(), "super-secret", "https://x", "m", LLMType::Image);
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn image_mime_falls_back_to_jpeg() {
        let explicit = LLMMessageType::image_b64("AA==", "image/webp");
        assert_eq!(explicit.resolved_mime_type().as_deref(), Some("image/webp"));

        let unset = LLMMessageType::IMAGE {
            data_b64: "AA==".into(),
            mime_type: None,
        };
        assert_eq!(unset.resolved_mime_type().as_deref(), Some("image/jpeg"));

        let bare = LLMMessageType::IMAGE {
            data_b64: "AA==".into(),
            mime_type: Some("  ".into()),
        };
        assert_eq!(bare.resolved_mime_type().as_deref(), Some("image/jpeg"));
        assert_eq!(LLMMessageType::text("hi").resolved_mime_type(), None);
    }
}
