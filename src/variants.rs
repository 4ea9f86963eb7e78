use crate::models::{PromptSpec, VariantKind};

impl VariantKind {
    /// Fixed phrase block appended to the description for this variant.
    pub fn modifiers(&self) -> &'static [&'static str] {
        match self {
            VariantKind::SafeCommercial => &[
                "clean commercial look",
                "professional advertising quality",
                "menu-ready",
                "broad appeal",
            ],
            VariantKind::PremiumEditorial => &[
                "editorial food photography",
                "magazine quality",
                "artistic composition",
                "sophisticated mood",
            ],
            VariantKind::PunchySocial => &[
                "scroll-stopping",
                "vibrant and bold",
                "instagram-worthy",
                "trendy food styling",
            ],
        }
    }

    pub fn modifier_block(&self) -> String {
        self.modifiers().join(", ")
    }

    /// Finds the variant whose modifier block appears in an assembled description.
    pub fn detect(assembled: &str) -> Option<VariantKind> {
        VariantKind::ALL
            .iter()
            .copied()
            .find(|kind| assembled.contains(&kind.modifier_block()))
    }
}

/// Pre-render description for one variant. The spec itself is never changed.
pub fn assemble_variant(spec: &PromptSpec, kind: VariantKind) -> String {
    let ingredients = if spec.ingredients.is_empty() {
        String::new()
    } else {
        format!("with {}", spec.ingredients.join(", "))
    };
    let props = if spec.props.is_empty() {
        String::new()
    } else {
        format!("props: {}", spec.props.join(", "))
    };
    let cue = spec
        .variant_cues
        .as_ref()
        .map(|cues| cues.cue_for(kind).trim().to_string())
        .unwrap_or_default();

    let segments = [
        spec.subject.clone(),
        ingredients,
        spec.plating.clone(),
        spec.lighting.clone(),
        spec.camera.clone(),
        spec.background.clone(),
        props,
        spec.mood.clone(),
        spec.style.clone(),
        kind.modifier_block(),
        cue,
        spec.constraints.join(", "),
    ];

    segments
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeneratorInput, MarketingGoal, VariantCues};
    use crate::spec_builder::build_spec;

    fn spec() -> PromptSpec {
        let mut input = GeneratorInput::new("Tonkotsu Ramen", MarketingGoal::SocialFeed);
        input.key_ingredients = Some("chashu, ajitama egg".into());
        build_spec(&input)
    }

    #[test]
    fn assembles_segments_in_order() {
        let text = assemble_variant(&spec(), VariantKind::PunchySocial);
        assert!(text.starts_with("Tonkotsu Ramen, with chashu, ajitama egg, appetizing modern plating style"));
        assert!(text.ends_with("scroll-stopping, vibrant and bold, instagram-worthy, trendy food styling"));
        assert!(!text.contains("props:"));
        assert!(!text.contains(", ,"));
    }

    #[test]
    fn variants_differ_but_spec_does_not_change() {
        let spec = spec();
        let before = spec.clone();
        let texts: Vec<String> = VariantKind::ALL.iter().map(|k| assemble_variant(&spec, *k)).collect();
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert_eq!(spec, before);
    }

    #[test]
    fn cues_follow_modifiers_and_constraints_close() {
        let mut spec = spec();
        spec.constraints = vec!["leave negative space for text overlay".into()];
        spec.variant_cues = Some(VariantCues {
            safe_commercial: "high-key studio light".into(),
            premium_editorial: "shot on Kodachrome".into(),
            punchy_social: "harsh flash".into(),
        });
        let text = assemble_variant(&spec, VariantKind::PremiumEditorial);
        assert!(text.ends_with("sophisticated mood, shot on Kodachrome, leave negative space for text overlay"));
    }

    #[test]
    fn detects_variant_from_modifier_block() {
        let text = assemble_variant(&spec(), VariantKind::SafeCommercial);
        assert_eq!(VariantKind::detect(&text), Some(VariantKind::SafeCommercial));
        assert_eq!(VariantKind::detect("plain text"), None);
    }
}
