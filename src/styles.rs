use crate::error::ComposeError;
use crate::models::StyleOption;

pub struct StylePreset {
    pub value: &'static str,
    pub label: &'static str,
}

/// The first entry is the default selection.
pub const PHOTO_STYLES: &[StylePreset] = &[
    StylePreset {
        value: "high-fashion-editorial",
        label: "High-Fashion Editorial",
    },
    StylePreset {
        value: "cinematic",
        label: "Cinematic",
    },
    StylePreset {
        value: "vintage-film",
        label: "Vintage Film",
    },
    StylePreset {
        value: "minimalist-studio",
        label: "Minimalist Studio",
    },
    StylePreset {
        value: "urban-street-style",
        label: "Urban Street Style",
    },
    StylePreset {
        value: "golden-hour",
        label: "Golden Hour",
    },
    StylePreset {
        value: "black-and-white",
        label: "Black and White",
    },
    StylePreset {
        value: "neon-noir",
        label: "Neon Noir",
    },
    StylePreset {
        value: "surreal-dreamscape",
        label: "Surreal Dreamscape",
    },
];

/// A style token that is known to be one of [`PHOTO_STYLES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSelection(&'static str);

impl StyleSelection {
    pub fn parse(token: &str) -> Result<Self, ComposeError> {
        let token = token.trim();
        PHOTO_STYLES
            .iter()
            .find(|preset| preset.value.eq_ignore_ascii_case(token))
            .map(|preset| Self(preset.value))
            .ok_or_else(|| ComposeError::UnknownStyle {
                token: token.to_string(),
            })
    }

    pub fn token(&self) -> &'static str {
        self.0
    }

    /// The phrase substituted into prompts: `vintage-film` -> `vintage film`.
    pub fn prompt_label(&self) -> String {
        self.0.replace('-', " ")
    }
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self(PHOTO_STYLES[0].value)
    }
}

pub fn style_options() -> Vec<StyleOption> {
    PHOTO_STYLES
        .iter()
        .map(|preset| StyleOption {
            value: preset.value,
            label: preset.label,
        })
        .collect()
}
