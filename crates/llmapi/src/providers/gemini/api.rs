use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::types::{
    GeneratedImageData, ImageGenerationConfig, LLMClient, LLMMessage, LLMMessageType, LLMUserType,
    PredictOutput,
};

use super::models::{GeminiResponse, PredictResponse};

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| {
            let mime = part.resolved_mime_type();
            match part {
                LLMMessageType::TEXT(text) => json!({ "text": text }),
                LLMMessageType::IMAGE { data_b64, .. } => json!({
                    "inlineData": {
                        "mimeType": mime,
                        "data": data_b64
                    }
                }),
            }
        })
        .collect()
}

pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            let role = role_to_str(m.role);
            json!({
                "role": role,
                "parts": convert_body_parts_gemini(m.content)
            })
        })
        .collect()
}

fn role_to_str(role: LLMUserType) -> &'static str {
    match role {
        LLMUserType::Human => "user",
        LLMUserType::AI => "model",
        LLMUserType::System => "system",
    }
}

pub fn build_predict_body(prompt: &str, config: &ImageGenerationConfig) -> Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": {
            "sampleCount": config.number_of_images.max(1),
            "aspectRatio": config.aspect_ratio,
            "outputOptions": { "mimeType": config.output_mime_type }
        }
    })
}

async fn post_json<T: DeserializeOwned>(
    api_client: &LLMClient,
    url: &str,
    body: &Value,
    call: &str,
) -> Result<T> {
    let response = api_client
        .http
        .post(url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .with_context(|| format!("HTTP request ({call}) failed"))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .with_context(|| format!("Reading {call} response body failed"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "Gemini {call} failed: status {} body {}",
            status,
            response_text
        ));
    }

    serde_json::from_str(&response_text)
        .with_context(|| format!("Failed to decode {call} JSON. Raw: {}", response_text))
}

pub async fn send_generate_request(
    api_client: &LLMClient,
    messages: Vec<LLMMessage>,
) -> Result<GeminiResponse> {
    let url = api_client.method_url("generateContent");
    let body = json!({
        "contents": convert_messages_to_gemini_contents(messages)
    });

    tracing::debug!(model = api_client.default_model(), "sending generateContent");
    post_json(api_client, &url, &body, "generateContent").await
}

pub async fn send_predict_request(
    api_client: &LLMClient,
    prompt: &str,
    config: &ImageGenerationConfig,
) -> Result<PredictResponse> {
    let url = api_client.method_url("predict");
    let body = build_predict_body(prompt, config);

    tracing::debug!(
        model = api_client.default_model(),
        aspect_ratio = %config.aspect_ratio,
        "sending predict"
    );
    post_json(api_client, &url, &body, "predict").await
}

pub fn response_to_text_data(response: &GeminiResponse) -> Result<String> {
    //get only 1 text response
    if let Some(candidate) = response.candidates.first() {
        let mut full_text = String::new();
        for part in &candidate.content.parts {
            if let Some(text) = &part.text {
                full_text.push_str(text);
            }
        }
        match candidate.finish_reason.as_deref() {
            Some(reason) if full_text.trim().is_empty() && reason != "STOP" => {
                Err(anyhow!("Gemini stopped without text: {reason}"))
            }
            _ => Ok(full_text),
        }
    } else if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        Err(anyhow!("Prompt was blocked: {reason}"))
    } else {
        Err(anyhow!("No candidates found"))
    }
}

/// Splits predictions into usable images and filter reasons. The MIME type
/// falls back to `default_mime` when the service omits it.
pub fn collect_predictions(response: PredictResponse, default_mime: &str) -> PredictOutput {
    let mut output = PredictOutput::default();
    for prediction in response.predictions {
        let data = prediction
            .bytes_base64_encoded
            .filter(|data| !data.trim().is_empty());
        let Some(data) = data else {
            if let Some(reason) = prediction.rai_filtered_reason {
                output.filtered_reasons.push(reason);
            }
            continue;
        };
        let mime_type = prediction
            .mime_type
            .map(|mime| mime.trim().to_string())
            .filter(|mime| !mime.is_empty())
            .unwrap_or_else(|| default_mime.to_string());
        output.images.push(GeneratedImageData {
            mime_type,
            data_b64: data,
        });
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_part_uses_inline_data() {
        let parts = convert_body_parts_gemini(vec![
            LLMMessageType::image_b64("QUJD", "image/png"),
            LLMMessageType::text("describe"),
        ]);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "QUJD");
        assert_eq!(parts[1]["text"], "describe");
    }

    #[test]
    fn messages_carry_gemini_roles() {
        let contents = convert_messages_to_gemini_contents(vec![
            LLMMessage::new("Human", vec![LLMMessageType::text("a")]),
            LLMMessage::new("assistant", vec![LLMMessageType::text("b")]),
        ]);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
    }

    #[test]
    fn predict_body_carries_config() {
        let config = ImageGenerationConfig {
            number_of_images: 1,
            output_mime_type: "image/jpeg".into(),
            aspect_ratio: "3:4".into(),
        };
        let body = build_predict_body("a red coat", &config);
        assert_eq!(body["instances"][0]["prompt"], "a red coat");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "3:4");
        assert_eq!(body["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn text_is_joined_from_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "A sunlit " }, { "text": "terrace." }], "role": "model" } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response_to_text_data(&response).unwrap(), "A sunlit terrace.");
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = response_to_text_data(&response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn unfinished_candidate_reports_finish_reason() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        }))
        .unwrap();
        let err = response_to_text_data(&response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn predictions_keep_filter_reasons_apart() {
        let response: PredictResponse = serde_json::from_value(json!({
            "predictions": [
                { "raiFilteredReason": "Contains a public figure" },
                { "bytesBase64Encoded": "QUJD" },
                { "bytesBase64Encoded": "REVG", "mimeType": "image/png" }
            ]
        }))
        .unwrap();
        let output = collect_predictions(response, "image/jpeg");
        assert_eq!(output.images.len(), 2);
        assert_eq!(output.images[0].mime_type, "image/jpeg");
        assert_eq!(output.images[1].mime_type, "image/png");
        assert_eq!(output.filtered_reasons, vec!["Contains a public figure"]);
    }

    #[test]
    fn missing_predictions_yield_nothing() {
        let response: PredictResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            collect_predictions(response, "image/jpeg"),
            PredictOutput::default()
        );
    }
}
