use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::PromptSpec;

use super::collapse_whitespace;

static REPEATED_PERIODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(\s*\.)+").expect("valid period regex"));

/// Natural-language paragraph built straight from the spec; the assembled text is not used.
pub fn render_dalle(_assembled: &str, spec: &PromptSpec) -> String {
    let mut paragraph = format!("A professional food photograph of {}.", spec.subject);
    if !spec.ingredients.is_empty() {
        paragraph.push_str(&format!(" The dish features {}.", spec.ingredients.join(", ")));
    }
    for part in [&spec.lighting, &spec.camera, &spec.background] {
        paragraph.push_str(&format!(" {part}."));
    }
    if !spec.props.is_empty() {
        paragraph.push_str(&format!(" Styled with {}.", spec.props.join(", ")));
    }
    paragraph.push_str(&format!(" {}. {}.", spec.mood, spec.style));
    if !spec.constraints.is_empty() {
        paragraph.push_str(&format!(" {}.", spec.constraints.join(". ")));
    }

    let collapsed = collapse_whitespace(&paragraph);
    REPEATED_PERIODS.replace_all(&collapsed, ".").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::fixtures::burger_spec;
    use pretty_assertions::assert_eq;

    #[test]
    fn composes_paragraph_from_fields() {
        assert_eq!(
            render_dalle("ignored", &burger_spec()),
            "A professional food photograph of gourmet burger. The dish features wagyu patty, cheddar cheese, brioche bun. \
bright natural daylight. shot at 45-degree angle. clean white seamless studio background. Styled with napkin, sauce drizzle. \
fresh atmosphere, modern, clean. professional food photography."
        );
    }

    #[test]
    fn collapses_doubled_periods() {
        let mut spec = burger_spec();
        spec.subject = "pho.".into();
        spec.ingredients.clear();
        spec.props.clear();
        spec.lighting = "soft light...".into();
        spec.constraints = vec!["no hands.".into()];
        let rendered = render_dalle("", &spec);
        assert!(rendered.starts_with("A professional food photograph of pho. soft light. shot at"));
        assert!(rendered.ends_with("no hands."));
        assert!(!rendered.contains(".."));
        assert!(!rendered.contains(". ."));
    }
}
