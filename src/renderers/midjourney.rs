use crate::models::PromptSpec;

use super::collapse_whitespace;

/// Flag-style prompt: `[sref-url] text --ar … --stylize 750 --quality 2 --v 6 [--sref … --sw 100 --iw 2]`.
pub fn render_midjourney(assembled: &str, spec: &PromptSpec) -> String {
    let text = collapse_whitespace(assembled);
    let mut params = vec![
        format!("--ar {}", spec.aspect_ratio_hint()),
        "--stylize 750".to_string(),
        "--quality 2".to_string(),
        "--v 6".to_string(),
    ];

    match spec.reference_url() {
        Some(url) => {
            params.push(format!("--sref {url}"));
            params.push("--sw 100".to_string());
            params.push("--iw 2".to_string());
            format!("{url} {text} {}", params.join(" "))
        }
        None => format!("{text} {}", params.join(" ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::fixtures::burger_spec;

    #[test]
    fn appends_flags_in_order() {
        let rendered = render_midjourney("gourmet   burger\nphotography", &burger_spec());
        assert_eq!(
            rendered,
            "gourmet burger photography --ar 1:1 --stylize 750 --quality 2 --v 6"
        );
    }

    #[test]
    fn missing_aspect_hint_defaults_to_square() {
        let mut spec = burger_spec();
        spec.model_hints.clear();
        assert!(render_midjourney("burger", &spec).contains("--ar 1:1"));
    }

    #[test]
    fn reference_url_seeds_and_style_references() {
        let mut spec = burger_spec();
        spec.model_hints.insert("aspectRatio".into(), "4:5".into());
        spec.reference_image_url = Some("https://cdn.example.com/ref.png".into());
        let rendered = render_midjourney("burger", &spec);
        assert!(rendered.starts_with("https://cdn.example.com/ref.png burger --ar 4:5"));
        assert!(rendered.contains("--v 6"));
        assert!(rendered.ends_with("--sref https://cdn.example.com/ref.png --sw 100 --iw 2"));
    }
}
