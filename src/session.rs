use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::GenerativeBackend;
use crate::compositor::Compositor;
use crate::error::{ComposeError, UploadError};
use crate::fs_utils::{decode_upload, read_image_file};
use crate::models::{
    GenerationResult, ImagePayload, RequestState, SessionSnapshot, Slot, UploadImagePayload,
};
use crate::styles::StyleSelection;
use crate::uploads::{PreviewRegistry, UploadManager, UploadOutcome};

struct SessionState {
    uploads: UploadManager,
    style: StyleSelection,
    request: RequestState,
}

impl SessionState {
    fn can_generate(&self) -> bool {
        self.uploads.is_ready() && !self.request.is_loading()
    }
}

/// Everything one window works on: the four slots, the chosen style and the
/// outcome of the last generation. The lock is never held across an await,
/// so uploads stay responsive while a composition is running.
pub struct ComposerSession {
    compositor: Compositor,
    state: Mutex<SessionState>,
}

impl ComposerSession {
    pub fn new(backend: Arc<dyn GenerativeBackend>, registry: PreviewRegistry) -> Self {
        Self {
            compositor: Compositor::new(backend),
            state: Mutex::new(SessionState {
                uploads: UploadManager::new(registry),
                style: StyleSelection::default(),
                request: RequestState::Idle,
            }),
        }
    }

    /// Returns the new preview URI. Non-images are refused and the slot keeps
    /// whatever it held.
    pub fn upload(&self, slot: Slot, payload: ImagePayload) -> Result<String, UploadError> {
        match self.state.lock().uploads.submit(slot, payload) {
            UploadOutcome::Accepted { preview_uri } => Ok(preview_uri),
            UploadOutcome::Rejected { mime_type } => {
                Err(UploadError::NotAnImage { slot, mime_type })
            }
        }
    }

    pub fn upload_encoded(&self, payload: UploadImagePayload) -> Result<String, UploadError> {
        let (slot, image) = decode_upload(payload)?;
        self.upload(slot, image)
    }

    pub async fn upload_file(&self, slot: Slot, path: &Path) -> Result<String, UploadError> {
        let image = read_image_file(path).await?;
        self.upload(slot, image)
    }

    pub fn clear(&self, slot: Slot) -> bool {
        self.state.lock().uploads.clear(slot)
    }

    /// Unknown tokens leave the current selection in place.
    pub fn select_style(&self, token: &str) -> Result<StyleSelection, ComposeError> {
        let style = StyleSelection::parse(token)?;
        self.state.lock().style = style;
        Ok(style)
    }

    pub fn style(&self) -> StyleSelection {
        self.state.lock().style
    }

    pub fn can_generate(&self) -> bool {
        self.state.lock().can_generate()
    }

    pub fn request_state(&self) -> RequestState {
        self.state.lock().request.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            slots: state.uploads.previews(),
            style: state.style.token().to_string(),
            all_uploaded: state.uploads.is_ready(),
            can_generate: state.can_generate(),
            request: state.request.clone(),
        }
    }

    /// Runs one composition over the current uploads. The request state goes
    /// to `Loading` for the duration and then records the outcome; the
    /// uploads are never modified.
    pub async fn generate(&self) -> Result<GenerationResult, ComposeError> {
        let (images, style) = {
            let mut state = self.state.lock();
            if state.request.is_loading() {
                return Err(ComposeError::Busy);
            }
            let images = state.uploads.image_set();
            if !images.is_complete() {
                return Err(ComposeError::IncompleteInput {
                    missing: images.missing(),
                });
            }
            state.request = RequestState::Loading;
            (images, state.style)
        };

        let result = self.compositor.compose(&images, style).await;

        let mut state = self.state.lock();
        state.request = match &result {
            Ok(generated) => RequestState::Success(generated.clone()),
            Err(err) => {
                tracing::error!(error = %err, "composition failed");
                RequestState::Error(err.to_string())
            }
        };
        result
    }

    /// Revokes every outstanding preview. Called when the window closes.
    pub fn shutdown(&self) {
        self.state.lock().uploads.release_all();
    }
}
