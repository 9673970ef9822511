//! Turns four reference images and a style into two generated compositions.
//!
//! The four descriptions are requested together and all must succeed before
//! any prompt is built. The two syntheses run together the same way. The
//! first failure in either batch aborts the whole composition.

use std::sync::Arc;
use std::time::Instant;

use llmapi::ImageGenerationConfig;

use crate::backend::{composition_image_config, GenerativeBackend, Synthesis};
use crate::constants::DESCRIBE_INSTRUCTION;
use crate::error::ComposeError;
use crate::models::{GeneratedImage, GenerationResult, ImagePayload, ImageSet, Slot};
use crate::prompts::{build_prompts, SceneDescriptions};
use crate::styles::StyleSelection;

const ARTISTIC: &str = "artistic";
const EXPOSITORY: &str = "expository";

#[derive(Clone)]
pub struct Compositor {
    backend: Arc<dyn GenerativeBackend>,
    instruction: String,
    image_config: ImageGenerationConfig,
}

impl Compositor {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            backend,
            instruction: DESCRIBE_INSTRUCTION.to_string(),
            image_config: composition_image_config(),
        }
    }

    pub async fn compose(
        &self,
        images: &ImageSet,
        style: StyleSelection,
    ) -> Result<GenerationResult, ComposeError> {
        let (Some(scenario), Some(model), Some(clothing), Some(accessory)) = (
            images.scenario.as_ref(),
            images.model.as_ref(),
            images.clothing.as_ref(),
            images.accessory.as_ref(),
        ) else {
            return Err(ComposeError::IncompleteInput {
                missing: images.missing(),
            });
        };

        let started = Instant::now();
        tracing::info!(style = style.token(), "composition started");

        let (scenario, model, clothing, accessory) = futures::try_join!(
            self.describe(Slot::Scenario, scenario),
            self.describe(Slot::Model, model),
            self.describe(Slot::Clothing, clothing),
            self.describe(Slot::Accessory, accessory)
        )?;

        let prompts = build_prompts(
            &SceneDescriptions {
                scenario,
                model,
                clothing,
                accessory,
            },
            style,
        );

        let (artistic, expository) = futures::try_join!(
            self.synthesize(ARTISTIC, &prompts.artistic),
            self.synthesize(EXPOSITORY, &prompts.expository)
        )?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "composition finished"
        );
        Ok(GenerationResult {
            artistic,
            expository,
        })
    }

    async fn describe(&self, slot: Slot, image: &ImagePayload) -> Result<String, ComposeError> {
        tracing::debug!(%slot, "requesting description");
        let description = self
            .backend
            .describe_image(image, &self.instruction)
            .await
            .map_err(|reason| {
                tracing::warn!(%slot, %reason, "description failed");
                ComposeError::Description { slot, reason }
            })?;

        let description = description.trim();
        if description.is_empty() {
            return Err(ComposeError::Description {
                slot,
                reason: "the service returned an empty description".to_string(),
            });
        }
        Ok(description.to_string())
    }

    async fn synthesize(
        &self,
        composition: &str,
        prompt: &str,
    ) -> Result<GeneratedImage, ComposeError> {
        tracing::debug!(composition, "requesting synthesis");
        let image = self
            .backend
            .synthesize_image(prompt, &self.image_config)
            .await
            .map_err(|reason| {
                tracing::warn!(composition, %reason, "synthesis failed");
                ComposeError::Synthesis {
                    composition: composition.to_string(),
                    reason,
                }
            })?;

        match image {
            Synthesis::Image(image) if !image.is_empty() => Ok(image),
            Synthesis::Image(_) => Err(ComposeError::EmptySynthesis {
                composition: composition.to_string(),
                filtered: Vec::new(),
            }),
            Synthesis::Empty { filtered } => Err(ComposeError::EmptySynthesis {
                composition: composition.to_string(),
                filtered,
            }),
        }
    }
}
