use crate::models::{PromptSpec, ShotType, VariantKind};
use crate::presets::camera_phrase;

use super::collapse_whitespace;

pub const FLUX_QUALITY_TRIGGER: &str = "ultra realistic, 8k, photorealistic masterpiece";

/// Section-labelled block for Flux-style models.
///
/// The camera line always comes from the shot type the user picked (carried in
/// `modelHints.shotType`), never from `spec.camera`, which a hosted model may have written.
/// The assembled text is only consulted to recognise which variant is being rendered.
pub fn render_banana(assembled: &str, spec: &PromptSpec) -> String {
    let shot = spec.shot_type_hint().unwrap_or(ShotType::Angle45);
    let mut sections = Vec::with_capacity(5);

    if let Some(url) = spec.reference_url() {
        sections.push(format!(
            "CORE MANDATE: Recreate the dish shown in the reference image ({url}). Keep its exact composition, plating, crockery, portion sizes and the position of every element; only improve lighting and photographic quality."
        ));
    }

    let mut subject = vec![spec.subject.clone()];
    if !spec.ingredients.is_empty() {
        subject.push(format!("Featuring {}", spec.ingredients.join(", ")));
    }
    subject.push(spec.plating.clone());
    if !spec.props.is_empty() {
        subject.push(format!("Styled with {}", spec.props.join(", ")));
    }
    sections.push(format!("SUBJECT: {}", sentences(&subject)));

    let blur = if shot == ShotType::TopDown {
        "everything on the surface in sharp focus, no background blur"
    } else {
        "background softly blurred with shallow depth of field"
    };
    sections.push(format!(
        "SETTING & COMPOSITION: {}",
        sentences(&[
            camera_phrase(shot).to_string(),
            spec.composition.clone(),
            format!("{}, {blur}", spec.background),
        ])
    ));

    sections.push(format!(
        "LIGHTING: {}",
        sentences(&[spec.lighting.clone(), spec.mood.clone()])
    ));

    let mut technical = vec![spec.style.clone()];
    if let Some(kind) = VariantKind::detect(assembled) {
        let mut direction = format!("Style direction: {}", kind.modifier_block());
        if let Some(cue) = spec.variant_cues.as_ref().map(|c| c.cue_for(kind).trim()).filter(|c| !c.is_empty()) {
            direction.push_str("; ");
            direction.push_str(cue);
        }
        technical.push(direction);
    }
    if !spec.constraints.is_empty() {
        technical.push(format!("Constraints: {}", spec.constraints.join("; ")));
    }
    technical.push(format!("Aspect ratio {}", spec.aspect_ratio_hint()));
    technical.push(FLUX_QUALITY_TRIGGER.to_string());
    sections.push(format!("TECHNICAL SPECS: {}", sentences(&technical)));

    sections
        .iter()
        .map(|s| collapse_whitespace(s))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sentences(parts: &[String]) -> String {
    let mut out: Vec<String> = parts
        .iter()
        .map(|p| p.trim().trim_end_matches('.').trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if out.is_empty() {
        return String::new();
    }
    if let Some(last) = out.last_mut() {
        last.push('.');
    }
    out.join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::fixtures::burger_spec;
    use crate::variants::assemble_variant;

    #[test]
    fn emits_labelled_sections() {
        let spec = burger_spec();
        let rendered = render_banana("", &spec);
        let labels: Vec<&str> = rendered
            .split("\n\n")
            .map(|s| s.split(':').next().unwrap_or_default())
            .collect();
        assert_eq!(labels, vec!["SUBJECT", "SETTING & COMPOSITION", "LIGHTING", "TECHNICAL SPECS"]);
        assert!(rendered.starts_with(
            "SUBJECT: gourmet burger. Featuring wagyu patty, cheddar cheese, brioche bun. modern American plating. Styled with napkin, sauce drizzle."
        ));
        assert!(rendered.ends_with("Aspect ratio 1:1. ultra realistic, 8k, photorealistic masterpiece."));
    }

    #[test]
    fn uses_user_shot_type_not_model_camera() {
        let mut spec = burger_spec();
        spec.camera = "dutch angle from below".into();
        spec.model_hints.insert("shotType".into(), "top_down".into());
        let rendered = render_banana("", &spec);
        assert!(!rendered.contains("dutch angle"));
        assert!(rendered.contains("shot from directly above"));
        assert!(rendered.contains("no background blur"));

        spec.model_hints.insert("shotType".into(), "eye_level".into());
        assert!(render_banana("", &spec).contains("shallow depth of field"));
    }

    #[test]
    fn reference_image_adds_core_mandate() {
        let mut spec = burger_spec();
        spec.reference_image_url = Some("https://cdn.example.com/nasi.jpg".into());
        let rendered = render_banana("", &spec);
        assert!(rendered.starts_with("CORE MANDATE: Recreate the dish shown in the reference image (https://cdn.example.com/nasi.jpg)"));
    }

    #[test]
    fn carries_variant_direction() {
        let spec = burger_spec();
        let assembled = assemble_variant(&spec, VariantKind::PunchySocial);
        let rendered = render_banana(&assembled, &spec);
        assert!(rendered.contains("Style direction: scroll-stopping, vibrant and bold, instagram-worthy, trendy food styling."));
    }
}
