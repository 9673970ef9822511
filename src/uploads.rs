//! Upload slots and the preview resources derived from them.
//!
//! Every filled slot owns exactly one live preview URI in the shared
//! [`PreviewRegistry`]. Replacing or clearing a slot revokes its URI before
//! the new one is handed out, and dropping the manager revokes everything it
//! still holds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::constants::PREVIEW_SCHEME;
use crate::models::{ImagePayload, ImageSet, Slot, SlotPreview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted { preview_uri: String },
    Rejected { mime_type: String },
}

/// Bytes behind every live preview URI, keyed by the URI path
/// (`<slot>/<n>`). Clones share the same table, so the protocol handler and
/// the upload manager see the same previews.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    entries: Mutex<HashMap<String, ImagePayload>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&self, slot: Slot, payload: ImagePayload) -> String {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let key = format!("{}/{}", slot.as_str(), id);
        self.inner.entries.lock().insert(key.clone(), payload);
        preview_uri(&key)
    }

    /// Returns false when the URI was not live.
    pub fn revoke(&self, uri: &str) -> bool {
        self.inner
            .entries
            .lock()
            .remove(preview_key(uri))
            .is_some()
    }

    /// Looks up a preview by URI or bare path, as the protocol handler sees it.
    pub fn resolve(&self, uri_or_path: &str) -> Option<ImagePayload> {
        self.inner
            .entries
            .lock()
            .get(preview_key(uri_or_path))
            .cloned()
    }

    pub fn active_count(&self) -> usize {
        self.inner.entries.lock().len()
    }
}

#[cfg(not(windows))]
fn preview_uri(key: &str) -> String {
    format!("{PREVIEW_SCHEME}://localhost/{key}")
}

// WebView2 only exposes custom schemes through the http://<scheme>.localhost form.
#[cfg(windows)]
fn preview_uri(key: &str) -> String {
    format!("http://{PREVIEW_SCHEME}.localhost/{key}")
}

fn preview_key(uri: &str) -> &str {
    let without_scheme = uri
        .split_once("://")
        .map(|(_, rest)| rest.split_once('/').map(|(_, path)| path).unwrap_or(""))
        .unwrap_or(uri);
    let without_query = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);
    without_query.trim_start_matches('/')
}

#[derive(Debug, Clone)]
struct SlotEntry {
    payload: ImagePayload,
    preview_uri: String,
}

/// The four upload slots.
#[derive(Debug)]
pub struct UploadManager {
    registry: PreviewRegistry,
    slots: [Option<SlotEntry>; 4],
}

impl UploadManager {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            slots: Default::default(),
        }
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    /// Stores `payload` in `slot` when it is an image. Anything else leaves
    /// the slot exactly as it was.
    pub fn submit(&mut self, slot: Slot, payload: ImagePayload) -> UploadOutcome {
        if !payload.is_image() {
            tracing::warn!(%slot, mime_type = %payload.mime_type, "ignoring non-image upload");
            return UploadOutcome::Rejected {
                mime_type: payload.mime_type,
            };
        }

        self.release(slot);

        let preview_uri = self.registry.allocate(slot, payload.clone());
        tracing::info!(
            %slot,
            mime_type = %payload.mime_type,
            size = payload.bytes.len(),
            "image uploaded"
        );
        self.slots[slot.index()] = Some(SlotEntry {
            payload,
            preview_uri: preview_uri.clone(),
        });

        UploadOutcome::Accepted { preview_uri }
    }

    /// Empties a slot. Returns false when it was already empty.
    pub fn clear(&mut self, slot: Slot) -> bool {
        self.release(slot)
    }

    fn release(&mut self, slot: Slot) -> bool {
        match self.slots[slot.index()].take() {
            Some(entry) => {
                self.registry.revoke(&entry.preview_uri);
                true
            }
            None => false,
        }
    }

    pub fn release_all(&mut self) {
        for slot in Slot::ALL {
            self.release(slot);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn preview_uri(&self, slot: Slot) -> Option<&str> {
        self.slots[slot.index()]
            .as_ref()
            .map(|entry| entry.preview_uri.as_str())
    }

    pub fn previews(&self) -> Vec<SlotPreview> {
        Slot::ALL
            .into_iter()
            .map(|slot| {
                let entry = self.slots[slot.index()].as_ref();
                SlotPreview {
                    slot,
                    label: slot.label(),
                    preview_uri: entry.map(|entry| entry.preview_uri.clone()),
                    file_name: entry.and_then(|entry| entry.payload.file_name.clone()),
                }
            })
            .collect()
    }

    pub fn image_set(&self) -> ImageSet {
        let mut set = ImageSet::default();
        for slot in Slot::ALL {
            set.set(
                slot,
                self.slots[slot.index()]
                    .as_ref()
                    .map(|entry| entry.payload.clone()),
            );
        }
        set
    }
}

impl Drop for UploadManager {
    fn drop(&mut self) {
        self.release_all();
    }
}
