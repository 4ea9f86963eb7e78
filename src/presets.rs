//! Static phrase tables the spec builder draws from.

use serde::Serialize;

use crate::models::{Background, LightingStyle, MarketingGoal, Mood, QualityBoost, ShotType};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BrandVibePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

pub const BRAND_VIBE_PRESETS: &[BrandVibePreset] = &[
    BrandVibePreset {
        id: "modern_minimalist",
        name: "Modern Minimalist",
        description: "Clean, sophisticated, lots of white space",
        keywords: &["minimalist", "clean", "modern", "sophisticated", "white space"],
    },
    BrandVibePreset {
        id: "rustic_artisan",
        name: "Rustic Artisan",
        description: "Handcrafted feel, natural textures, warm tones",
        keywords: &["rustic", "artisan", "handcrafted", "natural", "warm"],
    },
    BrandVibePreset {
        id: "bold_vibrant",
        name: "Bold & Vibrant",
        description: "High contrast, saturated colors, energetic",
        keywords: &["bold", "vibrant", "saturated", "energetic", "colorful"],
    },
    BrandVibePreset {
        id: "luxury_premium",
        name: "Luxury Premium",
        description: "High-end, elegant, dark moody tones",
        keywords: &["luxury", "premium", "elegant", "sophisticated", "moody"],
    },
    BrandVibePreset {
        id: "casual_friendly",
        name: "Casual & Friendly",
        description: "Approachable, warm, family-style",
        keywords: &["casual", "friendly", "approachable", "warm", "inviting"],
    },
    BrandVibePreset {
        id: "street_authentic",
        name: "Street Authentic",
        description: "Raw, genuine, documentary-style",
        keywords: &["street", "authentic", "raw", "genuine", "documentary"],
    },
    BrandVibePreset {
        id: "health_wellness",
        name: "Health & Wellness",
        description: "Fresh, bright, natural ingredients focus",
        keywords: &["healthy", "fresh", "natural", "bright", "organic"],
    },
    BrandVibePreset {
        id: "indulgent_comfort",
        name: "Indulgent Comfort",
        description: "Rich, satisfying, comfort food vibes",
        keywords: &["indulgent", "comfort", "rich", "satisfying", "hearty"],
    },
];

/// Keywords for a brand vibe id. Unknown ids degrade to the id itself.
pub fn brand_keywords(id: &str) -> Vec<String> {
    match BRAND_VIBE_PRESETS.iter().find(|p| p.id == id) {
        Some(preset) => preset.keywords.iter().map(|k| k.to_string()).collect(),
        None => vec![id.to_string()],
    }
}

/// Lighting phrases per mood; the builder always takes the first.
pub fn mood_lighting(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Fresh => &[
            "bright natural daylight",
            "soft diffused window light",
            "airy backlight with gentle rim lighting",
        ],
        Mood::Indulgent => &[
            "warm golden hour light",
            "dramatic side lighting with deep shadows",
            "soft spotlight with dark background",
        ],
        Mood::Cozy => &[
            "warm ambient tungsten light",
            "soft candlelit atmosphere",
            "gentle morning light through curtains",
        ],
        Mood::Premium => &[
            "controlled studio lighting with subtle gradients",
            "dramatic chiaroscuro with single key light",
            "elegant rim lighting on dark backdrop",
        ],
        Mood::Street => &[
            "harsh midday sun with strong shadows",
            "neon street lights mixed with natural light",
            "overcast diffused outdoor light",
        ],
    }
}

pub fn lighting_magic(style: LightingStyle) -> &'static str {
    match style {
        LightingStyle::Softbox => "professional softbox lighting with soft even illumination",
        LightingStyle::Volumetric => "volumetric lighting with atmospheric haze and light rays",
        LightingStyle::GoldenHour => "warm golden hour sunlight with long shadows",
        LightingStyle::RimLighting => "dramatic rim lighting highlighting edges",
        LightingStyle::NaturalWindow => "soft natural window light with gentle shadows",
        LightingStyle::DramaticShadow => "dramatic chiaroscuro lighting with deep shadows",
    }
}

pub fn quality_phrase(boost: QualityBoost) -> &'static str {
    match boost {
        QualityBoost::Resolution8k => "8k resolution, ultra high definition",
        QualityBoost::Photorealistic => "photorealistic, lifelike quality",
        QualityBoost::CommercialGrade => "commercial grade advertising photography",
        QualityBoost::Lens85mm => "shot on 85mm lens, professional portrait focal length",
        QualityBoost::BokehEffect => "beautiful bokeh effect, creamy background blur",
        QualityBoost::SharpFocus => "sharp focus on the food, tack sharp details",
        QualityBoost::VibrantColors => "vibrant colors, rich color palette",
    }
}

/// Composition rule per marketing goal. Exhaustive over the goal enum.
pub fn composition_rule(goal: MarketingGoal) -> &'static str {
    match goal {
        MarketingGoal::MenuHero => "centered hero composition, dish as clear focal point, clean edges",
        MarketingGoal::PromoBanner => "rule of thirds, negative space on left or right for text overlay",
        MarketingGoal::SocialFeed => "centered or slightly off-center, strong visual impact, scroll-stopping",
        MarketingGoal::SocialStory => "vertical composition, subject in center-lower third, space for text above",
        MarketingGoal::DeliveryListing => "top-down or 45-degree, portion clearly visible, clean background",
    }
}

pub fn camera_phrase(shot: ShotType) -> &'static str {
    match shot {
        ShotType::TopDown => "shot from directly above, flat lay perspective, 90-degree angle",
        ShotType::Angle45 => "shot at 45-degree angle, classic food photography perspective, eye-catching diagonal",
        ShotType::EyeLevel => "shot at eye level, immersive perspective, looking straight at the dish",
        ShotType::Macro => "extreme close-up macro shot, focus on textures and details, shallow depth of field",
    }
}

pub fn background_phrase(background: Background) -> &'static str {
    match background {
        Background::StudioSeamless => "clean white seamless studio background",
        Background::Marble => "elegant white marble surface with subtle veining",
        Background::RusticWood => "warm rustic wooden table surface with natural grain",
        Background::CafeTable => "cafe table setting with ambient blur background",
        Background::BananaLeaf => "fresh green banana leaf as natural plating surface",
        Background::StreetStall => "authentic street food stall environment",
    }
}

pub const FOOD_REALISM_BOOSTERS: &[&str] = &[
    "realistic food texture",
    "appetizing presentation",
    "professional food photography",
    "sharp focus on food details",
    "natural color accuracy",
    "mouthwatering appearance",
    "crispy golden edges where applicable",
    "glistening sauce sheen",
    "visible steam rising",
    "condensation droplets on cold items",
    "caramelized surfaces",
    "fresh herb garnish details",
];

pub const NEGATIVE_PROMPT_BASE: &[&str] = &[
    "artificial looking",
    "plastic food",
    "oversaturated",
    "blurry",
    "out of focus",
    "distorted",
    "unappetizing",
    "dirty plate",
    "messy background",
    "low quality",
    "amateur photography",
    "text",
    "watermark",
    "logo",
    "signature",
    "human hands visible",
    "fingers in frame",
    "deformed food",
    "melted incorrectly",
    "wrong proportions",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_brand_vibe_degrades_to_id() {
        assert_eq!(brand_keywords("neon_noir"), vec!["neon_noir".to_string()]);
        assert_eq!(brand_keywords("rustic_artisan").len(), 5);
    }

    #[test]
    fn every_mood_has_lighting() {
        for mood in Mood::ALL {
            assert!(!mood_lighting(*mood).is_empty());
        }
    }
}
