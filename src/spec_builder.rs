//! Deterministic template mode: maps a validated request onto a `PromptSpec`.

use std::collections::BTreeMap;

use crate::models::{
    DietaryFlag, GeneratorInput, PromptSpec, QuickFix, HINT_ASPECT_RATIO, HINT_SHOT_TYPE,
    HINT_TARGET_MODEL,
};
use crate::presets::{
    background_phrase, brand_keywords, camera_phrase, composition_rule, lighting_magic,
    mood_lighting, quality_phrase, FOOD_REALISM_BOOSTERS, NEGATIVE_PROMPT_BASE,
};

pub const BRIGHTER_LIGHTING_PREFIX: &str = "bright, well-lit ";
pub const PREMIUM_STYLE_SUFFIX: &str = ", luxury high-end presentation, premium quality";
pub const CLOSER_SHOT_SUFFIX: &str = ", tight crop, filling the frame";
pub const STEAM_PROP: &str = "visible steam rising";
pub const CRISP_PROP: &str = "crispy golden texture";
pub const MAX_PROPS_WITH_LESS_PROPS: usize = 2;

pub const STRICT_INGREDIENTS_CONSTRAINT: &str =
    "only show specified ingredients, no additional garnishes or extras";
pub const NEGATIVE_SPACE_CONSTRAINT: &str = "leave negative space for text overlay";
pub const HALAL_CONSTRAINT: &str = "halal-certified presentation";
pub const VEGAN_CONSTRAINT: &str = "plant-based, no animal products visible";
pub const STRICT_NEGATIVES: [&str; 2] = ["extra garnishes", "additional ingredients"];

/// Builds the canonical spec for `input`. Total and pure: identical input gives an identical spec.
pub fn build_spec(input: &GeneratorInput) -> PromptSpec {
    let mood = input.resolved_mood();
    let shot_type = input.resolved_shot_type();
    let background = input.resolved_background();

    let brand = input
        .brand_vibe
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(brand_keywords)
        .unwrap_or_default();

    let mut lighting = mood_lighting(mood)[0].to_string();
    if let Some(style) = input.lighting_style {
        lighting = format!("{lighting}, {}", lighting_magic(style));
    }

    let composition = composition_rule(input.marketing_goal).to_string();
    let ingredients = split_ingredients(input.key_ingredients.as_deref().unwrap_or_default());
    let mut props: Vec<String> = input.props.iter().map(|p| p.as_str().replace('_', " ")).collect();
    let mut camera = camera_phrase(shot_type).to_string();
    let mut style_extra = "";

    // Quick fixes, always in this order regardless of how the request listed them.
    if input.has_quick_fix(QuickFix::MoreSteam) {
        push_unique(&mut props, STEAM_PROP);
    }
    if input.has_quick_fix(QuickFix::CrispTexture) {
        push_unique(&mut props, CRISP_PROP);
    }
    if input.has_quick_fix(QuickFix::BrighterLighting) {
        lighting = brighten(&lighting);
    }
    if input.has_quick_fix(QuickFix::LessProps) {
        props.truncate(MAX_PROPS_WITH_LESS_PROPS);
    }
    if input.has_quick_fix(QuickFix::MorePremium) {
        style_extra = PREMIUM_STYLE_SUFFIX;
    }
    if input.has_quick_fix(QuickFix::CloserShot) && !camera.ends_with(CLOSER_SHOT_SUFFIX) {
        camera.push_str(CLOSER_SHOT_SUFFIX);
    }

    let mut constraints = Vec::new();
    if input.strict_ingredients {
        constraints.push(STRICT_INGREDIENTS_CONSTRAINT.to_string());
    }
    if input.leave_negative_space {
        constraints.push(NEGATIVE_SPACE_CONSTRAINT.to_string());
    }
    if input.has_dietary_flag(DietaryFlag::Halal) {
        constraints.push(HALAL_CONSTRAINT.to_string());
    }
    if input.has_dietary_flag(DietaryFlag::Vegan) {
        constraints.push(VEGAN_CONSTRAINT.to_string());
    }

    let mut negative: Vec<String> = NEGATIVE_PROMPT_BASE.iter().map(|s| s.to_string()).collect();
    if input.strict_ingredients {
        negative.extend(STRICT_NEGATIVES.iter().map(|s| s.to_string()));
    }

    let mut style = format!(
        "professional food photography{style_extra}, {}",
        FOOD_REALISM_BOOSTERS[..5].join(", ")
    );
    let mut boosts = input.quality_boosts.clone();
    boosts.sort();
    boosts.dedup();
    for boost in boosts {
        style.push_str(", ");
        style.push_str(quality_phrase(boost));
    }

    let mood_text = if brand.is_empty() {
        format!("{mood} atmosphere")
    } else {
        format!("{mood} atmosphere, {}", brand.join(", "))
    };

    let cuisine = input
        .cuisine_style
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("modern");

    let model_hints = BTreeMap::from([
        (HINT_ASPECT_RATIO.to_string(), input.aspect_ratio.as_str().to_string()),
        (HINT_TARGET_MODEL.to_string(), input.target_model.as_str().to_string()),
        (HINT_SHOT_TYPE.to_string(), shot_type.as_str().to_string()),
    ]);

    PromptSpec {
        subject: input.dish_name.trim().to_string(),
        ingredients,
        plating: format!("appetizing {cuisine} plating style"),
        composition,
        lighting,
        camera,
        background: background_phrase(background).to_string(),
        props,
        mood: mood_text,
        style,
        constraints,
        negative,
        model_hints,
        variant_cues: None,
        reference_image_url: input.reference_url().map(str::to_string),
    }
}

/// Comma-separated free text to an ordered ingredient list, blanks dropped.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prefixes the brightness qualifier once; an already-brightened phrase is returned unchanged.
pub fn brighten(lighting: &str) -> String {
    if lighting.starts_with(BRIGHTER_LIGHTING_PREFIX) {
        lighting.to_string()
    } else {
        format!("{BRIGHTER_LIGHTING_PREFIX}{lighting}")
    }
}

fn push_unique(props: &mut Vec<String>, prop: &str) {
    if !props.iter().any(|p| p == prop) {
        props.push(prop.to_string());
    }
}
