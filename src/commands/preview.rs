use tauri::http::header::CONTENT_TYPE;
use tauri::http::{HeaderValue, Response, StatusCode};

use crate::uploads::PreviewRegistry;

/// Answers a `preview://` request from the registry. Revoked or unknown
/// previews are a 404.
pub fn preview_response(registry: &PreviewRegistry, path: &str) -> Response<Vec<u8>> {
    match registry.resolve(path) {
        Some(image) => {
            let mut response = Response::new(image.bytes.to_vec());
            if let Ok(value) = HeaderValue::from_str(&image.mime_type) {
                response.headers_mut().insert(CONTENT_TYPE, value);
            }
            response
        }
        None => {
            tracing::debug!(path, "preview not found");
            let mut response = Response::new(Vec::new());
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        }
    }
}
