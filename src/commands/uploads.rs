use std::path::PathBuf;

use tauri::State;

use crate::models::{SessionSnapshot, Slot, UploadImagePayload};
use crate::session::ComposerSession;

#[tauri::command]
pub fn get_session(session: State<'_, ComposerSession>) -> SessionSnapshot {
    session.snapshot()
}

/// Drag-and-drop or file-picker upload read by the webview.
#[tauri::command]
pub fn upload_image(
    session: State<'_, ComposerSession>,
    payload: UploadImagePayload,
) -> Result<SessionSnapshot, String> {
    session
        .upload_encoded(payload)
        .map_err(|err| err.to_string())?;
    Ok(session.snapshot())
}

/// Native file drop: the shell hands over a path instead of the bytes.
#[tauri::command]
pub async fn upload_image_file(
    session: State<'_, ComposerSession>,
    slot: Slot,
    path: String,
) -> Result<SessionSnapshot, String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err("File path cannot be empty.".into());
    }

    session
        .upload_file(slot, &PathBuf::from(trimmed))
        .await
        .map_err(|err| err.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
pub fn clear_image(session: State<'_, ComposerSession>, slot: Slot) -> SessionSnapshot {
    session.clear(slot);
    session.snapshot()
}
