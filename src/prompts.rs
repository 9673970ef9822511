use crate::styles::StyleSelection;

/// The four image descriptions a composition is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneDescriptions {
    pub scenario: String,
    pub model: String,
    pub clothing: String,
    pub accessory: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionPrompts {
    pub artistic: String,
    pub expository: String,
}

pub fn build_prompts(descriptions: &SceneDescriptions, style: StyleSelection) -> CompositionPrompts {
    CompositionPrompts {
        artistic: artistic_prompt(descriptions, style),
        expository: expository_prompt(descriptions),
    }
}

/// Luxury-campaign editorial shot in the selected style.
pub fn artistic_prompt(descriptions: &SceneDescriptions, style: StyleSelection) -> String {
    let SceneDescriptions {
        scenario,
        model,
        clothing,
        accessory,
    } = descriptions;
    let style_label = style.prompt_label();

    format!(
        "Create a visually striking haute couture editorial advertisement with a \"{style_label}\" aesthetic.
  - Scenario: {scenario}.
  - Model: {model}.
  - Clothing: The model is wearing {clothing}.
  - Accessory: The model is showing off {accessory}.
  - The overall composition must be artistic, coherent and of the highest photographic quality, suitable for a luxury brand campaign. The elements must blend seamlessly. Make sure the lighting and mood match the requested style."
    )
}

/// Clean e-commerce product showcase. Independent of the selected style.
pub fn expository_prompt(descriptions: &SceneDescriptions) -> String {
    let SceneDescriptions {
        scenario,
        model,
        clothing,
        accessory,
    } = descriptions;

    format!(
        "Generate a clean, high-end composition for an e-commerce product showcase on a neutral, minimalist background.
  - The image must clearly and attractively display the following items:
  - Clothing: {clothing}.
  - Accessory: {accessory}.
  - The items should be presented as if worn by a mannequin or model reflecting the essence of: {model}.
  - The overall feel should be inspired by the atmosphere of: {scenario}.
  - The composition must be well lit, sharp and focused on the products, with a tidy and aesthetically pleasing arrangement."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptions() -> SceneDescriptions {
        SceneDescriptions {
            scenario: "a rain-soaked Tokyo alley".into(),
            model: "a tall woman with short silver hair".into(),
            clothing: "a crimson wool trench coat".into(),
            accessory: "a gold chain handbag".into(),
        }
    }

    #[test]
    fn artistic_prompt_contains_style_and_every_description() {
        let style = StyleSelection::parse("neon-noir").unwrap();
        let prompt = artistic_prompt(&descriptions(), style);
        assert!(prompt.contains("\"neon noir\" aesthetic"));
        for part in [
            "a rain-soaked Tokyo alley",
            "a tall woman with short silver hair",
            "a crimson wool trench coat",
            "a gold chain handbag",
        ] {
            assert!(prompt.contains(part), "missing {part}");
        }
    }

    #[test]
    fn expository_prompt_lists_products_first() {
        let prompt = expository_prompt(&descriptions());
        let clothing = prompt.find("a crimson wool trench coat").unwrap();
        let scenario = prompt.find("a rain-soaked Tokyo alley").unwrap();
        assert!(clothing < scenario);
        assert!(prompt.contains("neutral, minimalist background"));
    }

    #[test]
    fn style_only_changes_the_style_phrase() {
        let a = build_prompts(&descriptions(), StyleSelection::parse("cinematic").unwrap());
        let b = build_prompts(&descriptions(), StyleSelection::parse("golden-hour").unwrap());

        assert_eq!(a.expository, b.expository);
        assert_ne!(a.artistic, b.artistic);
        assert_eq!(
            a.artistic.replace("\"cinematic\"", "\"golden hour\""),
            b.artistic
        );
    }
}
