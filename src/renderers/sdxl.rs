use crate::models::PromptSpec;

use super::collapse_whitespace;

pub const SDXL_QUALITY_TAGS: &[&str] = &[
    "masterpiece",
    "best quality",
    "ultra detailed",
    "sharp focus",
    "professional food photography",
];

pub const SDXL_NEGATIVE_TAGS: &[&str] = &[
    "low quality",
    "worst quality",
    "jpeg artifacts",
    "pixelated",
    "cropped",
    "username",
];

pub fn render_sdxl(assembled: &str, _spec: &PromptSpec) -> String {
    collapse_whitespace(&format!("{}, {assembled}", SDXL_QUALITY_TAGS.join(", ")))
}

/// The spec's negatives followed by the SDXL-specific tags.
pub fn sdxl_negative(spec: &PromptSpec) -> String {
    spec.negative
        .iter()
        .map(String::as_str)
        .chain(SDXL_NEGATIVE_TAGS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::fixtures::burger_spec;

    #[test]
    fn prefixes_quality_tags() {
        let rendered = render_sdxl("gourmet burger  photography", &burger_spec());
        assert!(rendered.starts_with("masterpiece, best quality, ultra detailed"));
        assert!(rendered.ends_with("professional food photography, gourmet burger photography"));
    }

    #[test]
    fn negative_extends_spec_list() {
        assert_eq!(
            sdxl_negative(&burger_spec()),
            "artificial, blurry, low quality, low quality, worst quality, jpeg artifacts, pixelated, cropped, username"
        );
        let mut empty = burger_spec();
        empty.negative.clear();
        assert!(sdxl_negative(&empty).starts_with("low quality, worst quality"));
    }
}
