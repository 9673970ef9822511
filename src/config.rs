use std::env;

use crate::constants::{
    API_KEY_ENV, DEFAULT_DESCRIBE_MODEL, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL,
    DESCRIBE_MODEL_ENV, ENDPOINT_ENV, IMAGE_MODEL_ENV,
};
use crate::error::ConfigError;

/// Everything needed to build the Gemini clients. Loaded once at startup and
/// handed to [`crate::backend::GeminiBackend::new`].
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub endpoint: String,
    pub describe_model: String,
    pub image_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(&lookup, API_KEY_ENV).ok_or_else(|| ConfigError::MissingKey {
            key: API_KEY_ENV.to_string(),
        })?;

        let endpoint = non_empty(&lookup, ENDPOINT_ENV)
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: ENDPOINT_ENV.to_string(),
                value: endpoint,
            });
        }

        Ok(Self {
            api_key,
            endpoint,
            describe_model: non_empty(&lookup, DESCRIBE_MODEL_ENV)
                .unwrap_or_else(|| DEFAULT_DESCRIBE_MODEL.to_string()),
            image_model: non_empty(&lookup, IMAGE_MODEL_ENV)
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("describe_model", &self.describe_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == API_KEY_ENV));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
    }

    #[test]
    fn defaults_fill_optional_values() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.endpoint, DEFAULT_GEMINI_ENDPOINT);
        assert_eq!(config.describe_model, DEFAULT_DESCRIBE_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn overrides_are_respected_and_validated() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (IMAGE_MODEL_ENV, "imagen-4.0-ultra-generate-001"),
        ]))
        .unwrap();
        assert_eq!(config.image_model, "imagen-4.0-ultra-generate-001");

        let err = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (ENDPOINT_ENV, "ftp://nope"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn debug_hides_the_key() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "secret")])).unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
