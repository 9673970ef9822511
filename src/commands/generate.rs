use tauri::State;

use crate::models::{GenerationResult, StyleOption};
use crate::session::ComposerSession;
use crate::styles::style_options;

#[tauri::command]
pub fn list_styles() -> Vec<StyleOption> {
    style_options()
}

#[tauri::command]
pub fn select_style(session: State<'_, ComposerSession>, style: String) -> Result<String, String> {
    session
        .select_style(&style)
        .map(|selected| selected.token().to_string())
        .map_err(|err| err.to_string())
}

/// Resolves once both compositions are ready or the first step fails. The
/// front end keeps the trigger disabled meanwhile; a second call while one is
/// running is refused.
#[tauri::command]
pub async fn generate_compositions(
    session: State<'_, ComposerSession>,
) -> Result<GenerationResult, String> {
    session.generate().await.map_err(|err| err.to_string())
}
