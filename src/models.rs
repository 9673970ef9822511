use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Scenario,
    Model,
    Clothing,
    Accessory,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Scenario, Slot::Model, Slot::Clothing, Slot::Accessory];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Scenario => "scenario",
            Slot::Model => "model",
            Slot::Clothing => "clothing",
            Slot::Accessory => "accessory",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Scenario => "Scenario",
            Slot::Model => "Model",
            Slot::Clothing => "Clothing",
            Slot::Accessory => "Accessory",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Slot::Scenario => 0,
            Slot::Model => 1,
            Slot::Clothing => 2,
            Slot::Accessory => 3,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One uploaded image. Cloning shares the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl ImagePayload {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// The four inputs of a composition, any of which may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    pub scenario: Option<ImagePayload>,
    pub model: Option<ImagePayload>,
    pub clothing: Option<ImagePayload>,
    pub accessory: Option<ImagePayload>,
}

impl ImageSet {
    pub fn get(&self, slot: Slot) -> Option<&ImagePayload> {
        match slot {
            Slot::Scenario => self.scenario.as_ref(),
            Slot::Model => self.model.as_ref(),
            Slot::Clothing => self.clothing.as_ref(),
            Slot::Accessory => self.accessory.as_ref(),
        }
    }

    pub fn set(&mut self, slot: Slot, payload: Option<ImagePayload>) {
        let target = match slot {
            Slot::Scenario => &mut self.scenario,
            Slot::Model => &mut self.model,
            Slot::Clothing => &mut self.clothing,
            Slot::Accessory => &mut self.accessory,
        };
        *target = payload;
    }

    pub fn missing(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64: String,
}

impl GeneratedImage {
    pub fn data_url(&self) -> String {
        llmapi::utils::to_data_url(&self.mime_type, &self.base64)
    }

    pub fn is_empty(&self) -> bool {
        self.base64.trim().is_empty()
    }
}

impl Serialize for GeneratedImage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data_url())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub artistic: GeneratedImage,
    pub expository: GeneratedImage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(GenerationResult),
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPreview {
    pub slot: Slot,
    pub label: &'static str,
    pub preview_uri: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub slots: Vec<SlotPreview>,
    pub style: String,
    pub all_uploaded: bool,
    pub can_generate: bool,
    pub request: RequestState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImagePayload {
    pub slot: Slot,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub data_base64: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOption {
    pub value: &'static str,
    pub label: &'static str,
}
