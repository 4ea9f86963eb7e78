use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use thiserror::Error;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

/// Declares a closed wire enum: serde names, `as_str`, a human label and the full value list.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self { $($name::$variant => $wire),+ }
            }

            pub fn label(&self) -> &'static str {
                match self { $($name::$variant => $label),+ }
            }

            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(MarketingGoal {
    MenuHero => ("menu_hero", "Menu Hero Shot"),
    PromoBanner => ("promo_banner", "Promo Banner"),
    SocialFeed => ("social_feed", "Social Feed (IG/FB)"),
    SocialStory => ("social_story", "Social Story/Reel"),
    DeliveryListing => ("delivery_listing", "Delivery App Listing"),
});

wire_enum!(Mood {
    Fresh => ("fresh", "Fresh & Light"),
    Indulgent => ("indulgent", "Indulgent & Rich"),
    Cozy => ("cozy", "Cozy & Warm"),
    Premium => ("premium", "Premium & Elegant"),
    Street => ("street", "Street & Authentic"),
});

wire_enum!(ShotType {
    TopDown => ("top_down", "Top-Down (Flat Lay)"),
    Angle45 => ("angle_45", "45° Angle"),
    EyeLevel => ("eye_level", "Eye Level"),
    Macro => ("macro", "Macro Close-up"),
});

wire_enum!(Background {
    StudioSeamless => ("studio_seamless", "Studio Seamless"),
    Marble => ("marble", "Marble Surface"),
    RusticWood => ("rustic_wood", "Rustic Wood"),
    CafeTable => ("cafe_table", "Cafe Table"),
    BananaLeaf => ("banana_leaf", "Banana Leaf"),
    StreetStall => ("street_stall", "Street Food Stall"),
});

wire_enum!(LightingStyle {
    Softbox => ("softbox", "Softbox Lighting"),
    Volumetric => ("volumetric", "Volumetric Lighting"),
    GoldenHour => ("golden_hour", "Golden Hour"),
    RimLighting => ("rim_lighting", "Rim Lighting"),
    NaturalWindow => ("natural_window", "Natural Window Light"),
    DramaticShadow => ("dramatic_shadow", "Dramatic Shadows"),
});

wire_enum!(QualityBoost {
    Resolution8k => ("8k_resolution", "8K Resolution"),
    Photorealistic => ("photorealistic", "Photorealistic"),
    CommercialGrade => ("commercial_grade", "Commercial Grade"),
    Lens85mm => ("85mm_lens", "Shot on 85mm Lens"),
    BokehEffect => ("bokeh_effect", "Bokeh Effect"),
    SharpFocus => ("sharp_focus", "Sharp Focus on Food"),
    VibrantColors => ("vibrant_colors", "Vibrant Colors"),
});

wire_enum!(AspectRatio {
    Square => ("1:1", "Square (1:1)"),
    Portrait => ("4:5", "Portrait (4:5)"),
    Story => ("9:16", "Story (9:16)"),
    Landscape => ("16:9", "Landscape (16:9)"),
});

wire_enum!(TargetModel {
    Midjourney => ("midjourney", "Midjourney"),
    Sdxl => ("sdxl", "SDXL"),
    Dalle => ("dalle", "DALL·E 3"),
    Banana => ("banana", "Nano Banana"),
});

wire_enum!(DietaryFlag {
    Halal => ("halal", "Halal"),
    Vegan => ("vegan", "Vegan"),
    Vegetarian => ("vegetarian", "Vegetarian"),
    GlutenFree => ("gluten_free", "Gluten-Free"),
});

wire_enum!(Prop {
    Chopsticks => ("chopsticks", "Chopsticks"),
    ForkKnife => ("fork_knife", "Fork & Knife"),
    Napkin => ("napkin", "Napkin"),
    Herbs => ("herbs", "Fresh Herbs"),
    SauceDrizzle => ("sauce_drizzle", "Sauce Drizzle"),
    Steam => ("steam", "Steam"),
    IceCubes => ("ice_cubes", "Ice Cubes"),
    Condensation => ("condensation", "Condensation"),
    LimeWedge => ("lime_wedge", "Lime Wedge"),
    ChiliFlakes => ("chili_flakes", "Chili Flakes"),
    SesameSeeds => ("sesame_seeds", "Sesame Seeds"),
    GarnishLeaf => ("garnish_leaf", "Garnish Leaf"),
});

wire_enum!(QuickFix {
    BrighterLighting => ("brighter_lighting", "Brighter lighting"),
    LessProps => ("less_props", "Less props"),
    MorePremium => ("more_premium", "More premium"),
    CloserShot => ("closer_shot", "Closer shot"),
    MoreSteam => ("more_steam", "More steam/heat"),
    CrispTexture => ("crisp_texture", "Crisp texture"),
});

wire_enum!(VariantKind {
    SafeCommercial => ("safe_commercial", "Safe Commercial"),
    PremiumEditorial => ("premium_editorial", "Premium Editorial"),
    PunchySocial => ("punchy_social", "Punchy Social"),
});

impl Default for AspectRatio {
    fn default() -> Self { AspectRatio::Square }
}

impl Default for TargetModel {
    fn default() -> Self { TargetModel::Midjourney }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorInput {
    pub dish_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_style: Option<String>,
    #[serde(default)]
    pub dietary_flags: Vec<DietaryFlag>,
    pub marketing_goal: MarketingGoal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_vibe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_style: Option<LightingStyle>,
    #[serde(default)]
    pub quality_boosts: Vec<QualityBoost>,
    #[serde(default)]
    pub props: Vec<Prop>,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub target_model: TargetModel,
    #[serde(default)]
    pub strict_ingredients: bool,
    #[serde(default)]
    pub leave_negative_space: bool,
    #[serde(default)]
    pub enable_vision: bool,
    #[serde(default)]
    pub quick_fixes: Vec<QuickFix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_analysis: Option<String>,
    /// Base64-encoded reference photo, only consumed by the vision pre-step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("malformed request: {0}")] Malformed(String),
    #[error("{message}")] InvalidField { field: String, message: String },
    #[error("Dish name is required")] MissingDishName,
    #[error("Must be a valid URL: {0}")] InvalidReferenceUrl(String),
    #[error("reference image is not valid base64")] InvalidReferenceImage,
}

impl InputError {
    /// Field the error is attributed to in the `details` of a 400 response.
    pub fn field(&self) -> &str {
        match self {
            InputError::Malformed(_) => "body",
            InputError::InvalidField { field, .. } => field,
            InputError::MissingDishName => "dishName",
            InputError::InvalidReferenceUrl(_) => "referenceImageUrl",
            InputError::InvalidReferenceImage => "referenceImage",
        }
    }
}

impl GeneratorInput {
    pub fn new(dish_name: impl Into<String>, marketing_goal: MarketingGoal) -> Self {
        Self {
            dish_name: dish_name.into(),
            key_ingredients: None,
            cuisine_style: None,
            dietary_flags: Vec::new(),
            marketing_goal,
            brand_vibe: None,
            mood: None,
            shot_type: None,
            background: None,
            lighting_style: None,
            quality_boosts: Vec::new(),
            props: Vec::new(),
            aspect_ratio: AspectRatio::default(),
            target_model: TargetModel::default(),
            strict_ingredients: false,
            leave_negative_space: false,
            enable_vision: false,
            quick_fixes: Vec::new(),
            reference_image_url: None,
            visual_analysis: None,
            reference_image: None,
        }
    }

    /// Deserializes and validates a raw request body. Unknown enum values are rejected here.
    pub fn from_json(value: serde_json::Value) -> Result<Self, InputError> {
        let input: GeneratorInput = serde_json::from_value(value.clone())
            .map_err(|e| locate_field_error(&value, e))?;
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.dish_name.trim().is_empty() {
            return Err(InputError::MissingDishName);
        }
        if let Some(url) = self.reference_image_url.as_deref().filter(|u| !u.is_empty()) {
            reqwest::Url::parse(url).map_err(|_| InputError::InvalidReferenceUrl(url.to_string()))?;
        }
        if let Some(data) = &self.reference_image {
            decode_image_payload(data).map_err(|_| InputError::InvalidReferenceImage)?;
        }
        Ok(())
    }

    pub fn resolved_mood(&self) -> Mood { self.mood.unwrap_or(Mood::Fresh) }

    pub fn resolved_shot_type(&self) -> ShotType { self.shot_type.unwrap_or(ShotType::Angle45) }

    pub fn resolved_background(&self) -> Background { self.background.unwrap_or(Background::StudioSeamless) }

    pub fn has_quick_fix(&self, fix: QuickFix) -> bool { self.quick_fixes.contains(&fix) }

    pub fn has_dietary_flag(&self, flag: DietaryFlag) -> bool { self.dietary_flags.contains(&flag) }

    /// The reference image URL, if one was supplied and is non-blank.
    pub fn reference_url(&self) -> Option<&str> {
        self.reference_image_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

static MISSING_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"missing field `(\w+)`").expect("valid missing-field regex"));

/// Attributes a deserialization failure to the request field that caused it. Each present field
/// is re-checked alone on top of a minimal valid request; a missing required field is read off
/// the serde message.
fn locate_field_error(value: &serde_json::Value, err: serde_json::Error) -> InputError {
    let message = err.to_string();
    if let Some(field) = MISSING_FIELD.captures(&message).and_then(|c| c.get(1)) {
        return InputError::InvalidField { field: field.as_str().to_string(), message };
    }
    if let Some(object) = value.as_object() {
        for (key, field_value) in object {
            let mut single = serde_json::json!({
                "dishName": "_",
                "marketingGoal": MarketingGoal::MenuHero,
            });
            single[key.as_str()] = field_value.clone();
            if let Err(e) = serde_json::from_value::<GeneratorInput>(single) {
                return InputError::InvalidField { field: key.clone(), message: e.to_string() };
            }
        }
    }
    InputError::Malformed(message)
}

/// Decodes a base64 image, accepting an optional `data:<mime>;base64,` prefix.
pub fn decode_image_payload(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = data.trim();
    let encoded = match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, b64)| b64).unwrap_or(rest),
        None => data,
    };
    base64::engine::general_purpose::STANDARD.decode(encoded.trim())
}

pub const HINT_ASPECT_RATIO: &str = "aspectRatio";
pub const HINT_TARGET_MODEL: &str = "targetModel";
pub const HINT_SHOT_TYPE: &str = "shotType";

/// Per-variant styling sentences a hosted model may attach to a spec.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VariantCues {
    pub safe_commercial: String,
    pub premium_editorial: String,
    pub punchy_social: String,
}

impl VariantCues {
    pub fn cue_for(&self, kind: VariantKind) -> &str {
        match kind {
            VariantKind::SafeCommercial => &self.safe_commercial,
            VariantKind::PremiumEditorial => &self.premium_editorial,
            VariantKind::PunchySocial => &self.punchy_social,
        }
    }
}

/// Canonical, model-independent description of the image to produce.
/// Every field is always present; empty collections stand in for "nothing".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptSpec {
    pub subject: String,
    pub ingredients: Vec<String>,
    pub plating: String,
    pub composition: String,
    pub lighting: String,
    pub camera: String,
    pub background: String,
    pub props: Vec<String>,
    pub mood: String,
    pub style: String,
    pub constraints: Vec<String>,
    pub negative: Vec<String>,
    pub model_hints: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_cues: Option<VariantCues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_url: Option<String>,
}

impl PromptSpec {
    pub fn aspect_ratio_hint(&self) -> &str {
        self.model_hints.get(HINT_ASPECT_RATIO).map(String::as_str).unwrap_or("1:1")
    }

    pub fn shot_type_hint(&self) -> Option<ShotType> {
        self.model_hints.get(HINT_SHOT_TYPE).and_then(|s| ShotType::parse(s))
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.reference_image_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Overwrites the user-owned hints and the reference URL with what the user actually sent.
    pub fn stamp_user_intent(&mut self, input: &GeneratorInput) {
        self.model_hints.insert(HINT_ASPECT_RATIO.into(), input.aspect_ratio.as_str().into());
        self.model_hints.insert(HINT_TARGET_MODEL.into(), input.target_model.as_str().into());
        self.model_hints.insert(HINT_SHOT_TYPE.into(), input.resolved_shot_type().as_str().into());
        self.reference_image_url = input.reference_url().map(str::to_string);
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VariantPrompt {
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: VariantKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOutputs {
    pub variant_a: VariantPrompt,
    pub variant_b: VariantPrompt,
    pub variant_c: VariantPrompt,
    pub negative: String,
    pub settings: BTreeMap<String, String>,
}

impl RenderedOutputs {
    pub fn variants(&self) -> [&VariantPrompt; 3] {
        [&self.variant_a, &self.variant_b, &self.variant_c]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratorOutput {
    pub spec: PromptSpec,
    pub outputs: RenderedOutputs,
}
