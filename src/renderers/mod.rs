//! Serializers from an assembled description plus its `PromptSpec` into each
//! image model's literal prompt syntax. All renderers are pure and total.

mod banana;
mod dalle;
mod midjourney;
mod sdxl;

pub use banana::render_banana;
pub use dalle::render_dalle;
pub use midjourney::render_midjourney;
pub use sdxl::{render_sdxl, sdxl_negative};

use crate::models::{PromptSpec, TargetModel};

pub type Renderer = fn(&str, &PromptSpec) -> String;

pub fn renderer_for(model: TargetModel) -> Renderer {
    match model {
        TargetModel::Midjourney => render_midjourney,
        TargetModel::Sdxl => render_sdxl,
        TargetModel::Dalle => render_dalle,
        TargetModel::Banana => render_banana,
    }
}

/// Dispatch on a raw model identifier; anything unrecognised renders for Midjourney.
pub fn renderer_for_name(model: &str) -> Renderer {
    TargetModel::parse(model).map(renderer_for).unwrap_or(render_midjourney)
}

/// The negative prompt string shipped alongside the variants for `model`.
pub fn negative_prompt(model: TargetModel, spec: &PromptSpec) -> String {
    match model {
        TargetModel::Sdxl => sdxl_negative(spec),
        _ => spec.negative.join(", "),
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}


#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::burger_spec;

    #[test]
    fn unknown_model_names_fall_back_to_midjourney() {
        let spec = burger_spec();
        let rendered = renderer_for_name("stable-cascade")("burger", &spec);
        assert_eq!(rendered, render_midjourney("burger", &spec));
    }

    #[test]
    fn renderers_are_pure() {
        let spec = burger_spec();
        for model in TargetModel::ALL {
            let render = renderer_for(*model);
            assert_eq!(render("gourmet  burger\n shot", &spec), render("gourmet  burger\n shot", &spec));
        }
        assert_eq!(spec, burger_spec());
    }

    #[test]
    fn only_sdxl_extends_the_negative_prompt() {
        let spec = burger_spec();
        assert_eq!(negative_prompt(TargetModel::Dalle, &spec), "artificial, blurry, low quality");
        assert!(negative_prompt(TargetModel::Sdxl, &spec).ends_with("cropped, username"));
    }
}
