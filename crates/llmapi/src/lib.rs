pub mod providers;
pub mod types;
pub mod utils;

pub use reqwest::Client as HttpClient;

pub use providers::gemini::{describe_image, generate_images};
pub use types::{
    GeneratedImageData, ImageGenerationConfig, LLMClient, LLMMessage, LLMMessageType, LLMType,
    PredictOutput,
};
