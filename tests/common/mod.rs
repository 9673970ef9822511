#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fashion_compositor_lib::{
    GeneratedImage, GenerativeBackend, ImagePayload, ImageSet, Slot, Synthesis,
};
use llmapi::ImageGenerationConfig;
use parking_lot::Mutex;
use tokio::sync::Barrier;

/// In-memory stand-in for the Gemini services. Descriptions echo the image
/// bytes so each slot is recognisable in the prompts.
#[derive(Default)]
pub struct ScriptedBackend {
    pub describe_calls: AtomicUsize,
    pub synthesize_calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    pub instructions: Mutex<Vec<String>>,
    pub described: Mutex<Vec<String>>,
    pub fail_description_for: Mutex<HashSet<String>>,
    pub fail_synthesis: Mutex<bool>,
    pub empty_synthesis: Mutex<bool>,
    pub filtered_reasons: Mutex<Vec<String>>,
    pub synthesis_delay: Mutex<Option<Duration>>,
    /// When set, every call waits here until the whole batch has arrived.
    pub describe_barrier: Option<Barrier>,
    pub synthesis_barrier: Option<Barrier>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_description(marker: &str) -> Arc<Self> {
        let backend = Self::default();
        backend.fail_description_for.lock().insert(marker.to_string());
        Arc::new(backend)
    }

    /// Descriptions only finish once all four are in flight, and syntheses
    /// only once both are.
    pub fn batched() -> Arc<Self> {
        Arc::new(Self {
            describe_barrier: Some(Barrier::new(Slot::ALL.len())),
            synthesis_barrier: Some(Barrier::new(2)),
            ..Self::default()
        })
    }

    pub fn describe_count(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn synthesize_count(&self) -> usize {
        self.synthesize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn describe_image(
        &self,
        image: &ImagePayload,
        instruction: &str,
    ) -> Result<String, String> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.instructions.lock().push(instruction.to_string());
        if let Some(barrier) = &self.describe_barrier {
            barrier.wait().await;
        }

        let marker = String::from_utf8_lossy(&image.bytes).to_string();
        if self.fail_description_for.lock().contains(&marker) {
            return Err("503 Service Unavailable".to_string());
        }
        self.described.lock().push(marker.clone());
        Ok(format!("description of {marker}"))
    }

    async fn synthesize_image(
        &self,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<Synthesis, String> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        if let Some(barrier) = &self.synthesis_barrier {
            barrier.wait().await;
        }

        let delay = *self.synthesis_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_synthesis.lock() {
            return Err("quota exceeded".to_string());
        }
        if *self.empty_synthesis.lock() {
            return Ok(Synthesis::Empty {
                filtered: self.filtered_reasons.lock().clone(),
            });
        }
        Ok(Synthesis::Image(GeneratedImage {
            mime_type: config.output_mime_type.clone(),
            base64: "/9j/4AAQSkZJRg==".to_string(),
        }))
    }
}

pub fn image(marker: &str) -> ImagePayload {
    ImagePayload::new(marker.as_bytes().to_vec(), "image/png")
}

pub fn full_set() -> ImageSet {
    let mut set = ImageSet::default();
    for slot in Slot::ALL {
        set.set(slot, Some(image(slot.as_str())));
    }
    set
}
