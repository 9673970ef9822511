use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use tokio::fs;

use crate::error::UploadError;
use crate::models::{ImagePayload, Slot, UploadImagePayload};

pub fn resolve_mime_type(candidate: Option<&str>, path: &Path) -> String {
    if let Some(value) = candidate {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

pub fn sanitize_file_name(file_name: &str) -> Option<String> {
    let trimmed = file_name.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed.contains("..")
        || trimmed.contains('\0')
    {
        return None;
    }

    Some(trimmed.to_string())
}

/// Reads a dropped or picked file into memory. The MIME type comes from the
/// extension; callers decide whether a non-image is acceptable.
pub async fn read_image_file(path: &Path) -> Result<ImagePayload, UploadError> {
    let bytes = fs::read(path)
        .await
        .map_err(|err| UploadError::ReadFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    let mime_type = resolve_mime_type(None, path);
    let payload = ImagePayload::new(bytes, mime_type);

    Ok(match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => payload.with_file_name(name),
        None => payload,
    })
}

/// Decodes a base64 upload coming from the webview (drag-and-drop or file
/// picker).
pub fn decode_upload(payload: UploadImagePayload) -> Result<(Slot, ImagePayload), UploadError> {
    let UploadImagePayload {
        slot,
        file_name,
        mime_type,
        data_base64,
    } = payload;

    let file_name = match file_name {
        Some(name) => Some(
            sanitize_file_name(&name).ok_or(UploadError::InvalidFileName { name })?,
        ),
        None => None,
    };

    let (declared_mime, encoded) = split_data_url(data_base64.trim());
    let bytes = BASE64_ENGINE
        .decode(encoded)
        .map_err(|_| UploadError::InvalidEncoding { slot })?;
    if bytes.is_empty() {
        return Err(UploadError::Empty { slot });
    }

    // explicit type, then the data URL header, then the file extension
    let candidate = mime_type
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .or(declared_mime);
    let guessed_from = Path::new(file_name.as_deref().unwrap_or_default());
    let mime_type = resolve_mime_type(candidate, guessed_from);

    let image = ImagePayload::new(bytes, mime_type);
    Ok((
        slot,
        match file_name {
            Some(name) => image.with_file_name(name),
            None => image,
        },
    ))
}

/// Splits `data:<mime>;base64,<payload>` into its MIME type and payload.
/// Plain base64 comes back unchanged with no MIME type.
fn split_data_url(data: &str) -> (Option<&str>, &str) {
    let Some(rest) = data.strip_prefix("data:") else {
        return (None, data);
    };
    let Some((header, encoded)) = rest.split_once(',') else {
        return (None, data);
    };
    let mime = header
        .split(';')
        .next()
        .map(str::trim)
        .filter(|mime| !mime.is_empty());
    (mime, encoded)
}
