pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_DESCRIBE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";
pub const DESCRIBE_MODEL_ENV: &str = "GEMINI_DESCRIBE_MODEL";
pub const IMAGE_MODEL_ENV: &str = "GEMINI_IMAGE_MODEL";

pub const OUTPUT_IMAGE_MIME: &str = "image/jpeg";
pub const OUTPUT_ASPECT_RATIO: &str = "3:4";
pub const OUTPUT_IMAGE_COUNT: u32 = 1;

pub const PREVIEW_SCHEME: &str = "preview";

pub const DESCRIBE_INSTRUCTION: &str = "Describe this image for a detailed text-to-image AI prompt. \
Focus on the main subject, the colors, the style and the key elements. Be descriptive and evocative.";
