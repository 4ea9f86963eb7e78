//! Instruction text sent to hosted models when they author the spec.

use crate::models::GeneratorInput;

const PERSONA: &str = "You are a world-class Senior Food Photographer and Creative Director with 20 years of experience in high-end F&B marketing.
Your goal is to craft the image specification that sells the food, tells a brand story, and triggers appetite appeal.";

const ANTI_SLOP: &str = "CRITICAL: COMBAT \"AI SLOP\" & PLASTIC LOOK
- Avoid perfection: do NOT use words like \"perfect\", \"flawless\", \"pristine\" unless the marketing goal strictly demands it.
- Emphasize texture: use tactile words such as \"porous\", \"flaky\", \"uneven\", \"coarse\", \"gooey\", \"charred\", \"bubbling\".
- Imperfections are key: mention stray crumbs, slight sauce splatter, melting edges, steam mist, oil separation.
- Camera quality: specify film grain, shot on 35mm, 8k raw photo, ultra-realistic texture, depth of field.";

const SOURCE_OF_TRUTH: &str = "SOURCE OF TRUTH
- When a VISUAL ANALYSIS is provided it describes a real photo of the dish and is the source of truth for everything physical: what the dish is, visible ingredients, plating, crockery, quantities and the position of each element. Write subject and ingredients from the analysis, even when the user's dish name or ingredient text disagrees.
- The user's input stays authoritative for everything about the shoot: marketing goal, mood, shot type, background, aspect ratio, target model and constraints.
- Without a visual analysis, the user's dish name and ingredients are the source of truth. Do not invent ingredients when strict ingredients is true.";

const VARIANT_CUES: &str = "GENERATE 3 DISTINCT VARIANTS
Provide one short styling sentence for each use case in the 'variantCues' object:
1. safe_commercial: high-key, evenly lit, clear product focus, studio lighting, sharp focus; clean but the ingredients must look real, not plastic.
2. premium_editorial: raw and authentic; chiaroscuro lighting, deep shadows, rich textures, shot on Kodachrome, film grain, imperfect plating, natural window light.
3. punchy_social: phone eats first; harsh flash, high contrast, vibrant, hard shadows, authentic messy vibe, up close macro.";

const SCHEMA: &str = "Return a PromptSpec JSON object with exactly these fields:
- subject: the main dish (feel free to enhance with adjectives)
- ingredients: array of visible ingredients, describing their state (\"crispy\", \"charred\")
- plating: description of plating style
- composition: composition rules for the shot
- lighting: lighting setup, using technical terms like rim light, gobo, softbox
- camera: camera angle and settings
- background: background description with context
- props: array of props to include
- mood: overall mood and atmosphere
- style: photography style keywords
- constraints: array of constraints to follow
- negative: array of things to avoid
- modelHints: object with aspectRatio and targetModel
- variantCues: object with safe_commercial, premium_editorial and punchy_social strings
Return ONLY valid JSON, no markdown code blocks.";

pub fn system_prompt() -> String {
    [PERSONA, ANTI_SLOP, SOURCE_OF_TRUTH, VARIANT_CUES, SCHEMA].join("\n\n")
}

/// Every resolved field of the request, one per line.
pub fn user_prompt(input: &GeneratorInput) -> String {
    let join = |items: Vec<&str>, empty: &str| {
        if items.is_empty() { empty.to_string() } else { items.join(", ") }
    };
    let text = |value: &Option<String>, empty: &str| {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty()).unwrap_or(empty).to_string()
    };

    let mut lines = vec![
        "Generate a PromptSpec for:".to_string(),
        format!("Dish: {}", input.dish_name.trim()),
        format!("Key Ingredients: {}", text(&input.key_ingredients, "not specified")),
        format!("Cuisine Style: {}", text(&input.cuisine_style, "modern")),
        format!("Dietary Flags: {}", join(input.dietary_flags.iter().map(|f| f.as_str()).collect(), "none")),
        format!("Marketing Goal: {}", input.marketing_goal),
        format!("Brand Vibe: {}", text(&input.brand_vibe, "professional")),
        format!("Mood: {}", input.resolved_mood()),
        format!("Shot Type: {}", input.resolved_shot_type()),
        format!("Background: {}", input.resolved_background()),
        format!("Lighting Style: {}", input.lighting_style.map(|l| l.as_str()).unwrap_or("not specified")),
        format!("Quality Boosts: {}", join(input.quality_boosts.iter().map(|q| q.as_str()).collect(), "none")),
        format!("Props: {}", join(input.props.iter().map(|p| p.as_str()).collect(), "minimal")),
        format!("Quick Fixes: {}", join(input.quick_fixes.iter().map(|q| q.as_str()).collect(), "none")),
        format!("Aspect Ratio: {}", input.aspect_ratio),
        format!("Target Model: {}", input.target_model),
        format!("Strict Ingredients: {}", input.strict_ingredients),
        format!("Leave Negative Space: {}", input.leave_negative_space),
    ];
    if let Some(url) = input.reference_url() {
        lines.push(format!("Reference Image URL: {url}"));
    }
    if let Some(analysis) = input.visual_analysis.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        lines.push(String::new());
        lines.push("VISUAL ANALYSIS (source of truth for the dish's appearance):".to_string());
        lines.push(analysis.to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarketingGoal, Prop};

    #[test]
    fn system_prompt_covers_persona_rules_and_cues() {
        let prompt = system_prompt();
        assert!(prompt.contains("Senior Food Photographer"));
        assert!(prompt.contains("AI SLOP"));
        assert!(prompt.contains("SOURCE OF TRUTH"));
        assert!(prompt.contains("punchy_social"));
    }

    #[test]
    fn user_prompt_lists_resolved_fields() {
        let mut input = GeneratorInput::new("Beef Rendang", MarketingGoal::PromoBanner);
        input.props = vec![Prop::Herbs, Prop::Napkin];
        let prompt = user_prompt(&input);
        assert!(prompt.contains("Dish: Beef Rendang"));
        assert!(prompt.contains("Props: herbs, napkin"));
        assert!(prompt.contains("Marketing Goal: promo_banner"));
        assert!(prompt.contains("Shot Type: angle_45"));
        assert!(prompt.contains("Aspect Ratio: 1:1"));
        assert!(!prompt.contains("VISUAL ANALYSIS"));
    }

    #[test]
    fn visual_analysis_is_appended() {
        let mut input = GeneratorInput::new("Nasi Lemak", MarketingGoal::MenuHero);
        input.visual_analysis = Some("Fried egg at 11 o'clock on a banana leaf".into());
        let prompt = user_prompt(&input);
        assert!(prompt.ends_with("Fried egg at 11 o'clock on a banana leaf"));
    }
}
