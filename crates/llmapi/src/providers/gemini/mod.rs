mod api;
pub mod models;
pub use api::{
    build_predict_body, convert_body_parts_gemini, collect_predictions, response_to_text_data,
    send_generate_request, send_predict_request,
};

use anyhow::{Result, anyhow};

use crate::types::{ImageGenerationConfig, LLMClient, LLMMessage, LLMMessageType, PredictOutput};

/// Asks a chat model to describe one image. The image goes first, followed by
/// the instruction text, in a single user turn.
pub async fn describe_image(
    client: &LLMClient,
    image: LLMMessageType,
    instruction: &str,
) -> Result<String> {
    let message = LLMMessage::new("Human", vec![image, LLMMessageType::text(instruction)]);
    let response = send_generate_request(client, vec![message]).await?;
    let text = response_to_text_data(&response)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Gemini returned an empty description"));
    }
    Ok(trimmed.to_string())
}

/// Runs one Imagen `predict` call. No images means the service answered but
/// produced nothing; `filtered_reasons` says why when the safety filter did it.
pub async fn generate_images(
    client: &LLMClient,
    prompt: &str,
    config: &ImageGenerationConfig,
) -> Result<PredictOutput> {
    let response = send_predict_request(client, prompt, config).await?;
    let output = collect_predictions(response, &config.output_mime_type);
    if !output.filtered_reasons.is_empty() {
        tracing::warn!(
            reasons = ?output.filtered_reasons,
            kept = output.images.len(),
            "Imagen filtered samples"
        );
    }
    Ok(output)
}
