use thiserror::Error;

use crate::models::Slot;

/// Startup configuration errors. Any of these is fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key} is not set")]
    MissingKey { key: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

/// Errors raised while turning user input into an image payload.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("'{mime_type}' is not an image; the {slot} slot was left unchanged")]
    NotAnImage { slot: Slot, mime_type: String },

    #[error("Invalid file name: {name}")]
    InvalidFileName { name: String },

    #[error("Unable to read file '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Uploaded data for the {slot} slot is not valid base64")]
    InvalidEncoding { slot: Slot },

    #[error("Uploaded file for the {slot} slot is empty")]
    Empty { slot: Slot },
}

/// Errors raised by a composition attempt. None of them affect the uploads.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("All four images must be provided (missing: {})", format_slots(.missing))]
    IncompleteInput { missing: Vec<Slot> },

    #[error("A composition is already being generated")]
    Busy,

    #[error("Unknown style '{token}'")]
    UnknownStyle { token: String },

    #[error("Could not describe the {slot} image: {reason}")]
    Description { slot: Slot, reason: String },

    #[error("Image generation failed for the {composition} composition: {reason}")]
    Synthesis { composition: String, reason: String },

    #[error(
        "Image generation returned no image for the {composition} composition{}",
        format_filtered(.filtered)
    )]
    EmptySynthesis {
        composition: String,
        filtered: Vec<String>,
    },
}

fn format_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|slot| slot.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_filtered(reasons: &[String]) -> String {
    if reasons.is_empty() {
        String::new()
    } else {
        format!(" (filtered: {})", reasons.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_input_lists_missing_slots() {
        let err = ComposeError::IncompleteInput {
            missing: vec![Slot::Clothing, Slot::Accessory],
        };
        assert_eq!(
            err.to_string(),
            "All four images must be provided (missing: clothing, accessory)"
        );
    }

    #[test]
    fn empty_synthesis_names_filter_reasons() {
        let plain = ComposeError::EmptySynthesis {
            composition: "artistic".into(),
            filtered: Vec::new(),
        };
        assert_eq!(
            plain.to_string(),
            "Image generation returned no image for the artistic composition"
        );

        let filtered = ComposeError::EmptySynthesis {
            composition: "expository".into(),
            filtered: vec!["Contains a public figure".into()],
        };
        assert_eq!(
            filtered.to_string(),
            "Image generation returned no image for the expository composition \
             (filtered: Contains a public figure)"
        );
    }
}
