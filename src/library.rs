//! Curated starter prompts per dish category.

use serde::{Deserialize, Serialize};

use crate::models::{Background, MarketingGoal, Mood};
use crate::presets::{background_phrase, composition_rule, mood_lighting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    Burger,
    FriedChicken,
    Noodles,
    Desserts,
    Coffee,
    Cocktails,
    Sushi,
    Bakery,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PromptCategory,
    pub goals: &'static [MarketingGoal],
    pub description: &'static str,
    pub base_prompt: &'static str,
    pub negative_prompt: &'static str,
    pub tags: &'static [&'static str],
}

use MarketingGoal::*;

pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        id: "burger_hero",
        name: "Classic Burger Hero",
        category: PromptCategory::Burger,
        goals: &[MenuHero, SocialFeed],
        description: "Towering gourmet burger with all the fixings",
        base_prompt: "professional food photography of a gourmet burger, juicy beef patty with melted cheese dripping, fresh lettuce, ripe tomato slice, sesame seed bun, {lighting}, {composition}, {background}, appetizing steam rising, sharp focus, 8k resolution, commercial quality",
        negative_prompt: "artificial, plastic, flat, dry, unappetizing, blurry, amateur",
        tags: &["burger", "american", "gourmet", "comfort food"],
    },
    PromptTemplate {
        id: "fried_chicken_crispy",
        name: "Crispy Fried Chicken",
        category: PromptCategory::FriedChicken,
        goals: &[MenuHero, DeliveryListing],
        description: "Golden crispy fried chicken with perfect crust",
        base_prompt: "professional food photography of crispy fried chicken, golden brown crust with visible crunch texture, steam rising, {lighting}, {composition}, {background}, garnished with fresh herbs, sharp focus, commercial food photography, 8k",
        negative_prompt: "soggy, pale, burnt, oily puddle, unappetizing, blurry, amateur",
        tags: &["chicken", "fried", "crispy", "comfort food"],
    },
    PromptTemplate {
        id: "ramen_bowl",
        name: "Steaming Ramen Bowl",
        category: PromptCategory::Noodles,
        goals: &[MenuHero, SocialFeed],
        description: "Rich ramen with soft-boiled egg and chashu",
        base_prompt: "professional food photography of authentic ramen bowl, rich tonkotsu broth, perfectly cooked noodles, soft-boiled ajitama egg with runny yolk, tender chashu pork slices, fresh green onions, nori sheet, visible steam rising, {lighting}, {composition}, {background}, shot with 85mm lens, shallow depth of field, 8k",
        negative_prompt: "overcooked egg, cloudy broth, soggy noodles, artificial, blurry",
        tags: &["ramen", "japanese", "noodles", "soup", "comfort food"],
    },
    PromptTemplate {
        id: "chocolate_cake",
        name: "Decadent Chocolate Cake",
        category: PromptCategory::Desserts,
        goals: &[MenuHero, SocialFeed, PromoBanner],
        description: "Rich chocolate layer cake with ganache",
        base_prompt: "professional food photography of decadent chocolate layer cake, glossy dark chocolate ganache dripping down sides, visible moist cake layers, chocolate shavings on top, {lighting}, {composition}, {background}, elegant plating on dark slate, commercial dessert photography, 8k",
        negative_prompt: "dry, crumbly, dull, flat chocolate, artificial, melted mess",
        tags: &["chocolate", "cake", "dessert", "indulgent"],
    },
    PromptTemplate {
        id: "latte_art",
        name: "Artisan Latte Art",
        category: PromptCategory::Coffee,
        goals: &[SocialFeed, SocialStory],
        description: "Beautiful latte art in ceramic cup",
        base_prompt: "professional beverage photography of artisan latte with intricate rosetta latte art, creamy microfoam, served in ceramic cup on wooden table, {lighting}, {composition}, {background}, coffee beans scattered, steam wisps, shallow depth of field, warm cozy atmosphere, 8k",
        negative_prompt: "spilled, messy, no foam, cold looking, artificial, blurry",
        tags: &["coffee", "latte", "cafe", "artisan"],
    },
    PromptTemplate {
        id: "cocktail_tropical",
        name: "Tropical Cocktail",
        category: PromptCategory::Cocktails,
        goals: &[MenuHero, SocialFeed],
        description: "Vibrant tropical cocktail with garnishes",
        base_prompt: "professional beverage photography of tropical cocktail, vibrant orange and pink gradient, served in tiki glass with crushed ice, fresh pineapple wedge, orchid flower garnish, paper umbrella, {lighting}, {composition}, {background}, condensation droplets on glass, tropical vibes, 8k",
        negative_prompt: "watered down, dull colors, no ice, artificial, blurry, cheap looking",
        tags: &["cocktail", "tropical", "drinks", "bar"],
    },
    PromptTemplate {
        id: "sushi_platter",
        name: "Premium Sushi Platter",
        category: PromptCategory::Sushi,
        goals: &[MenuHero, PromoBanner],
        description: "Assorted premium sushi and sashimi",
        base_prompt: "professional food photography of premium sushi platter, assorted nigiri with fresh salmon, tuna, yellowtail, and uni, perfect rice texture, wasabi and pickled ginger, {lighting}, {composition}, {background}, served on elegant black slate, chopsticks nearby, Japanese minimalist presentation, 8k",
        negative_prompt: "dry fish, brown fish, messy rice, cheap looking, artificial, blurry",
        tags: &["sushi", "japanese", "seafood", "premium"],
    },
    PromptTemplate {
        id: "croissant_fresh",
        name: "Fresh Butter Croissant",
        category: PromptCategory::Bakery,
        goals: &[SocialFeed, DeliveryListing],
        description: "Flaky golden croissant fresh from oven",
        base_prompt: "professional food photography of fresh butter croissant, golden brown flaky layers visible, light dusting of flour, {lighting}, {composition}, {background}, served on rustic wooden board, warm morning atmosphere, visible steam, artisan bakery quality, 8k",
        negative_prompt: "burnt, pale, flat, dense, artificial, blurry, store-bought looking",
        tags: &["croissant", "bakery", "pastry", "breakfast"],
    },
];

pub fn template_by_id(id: &str) -> Option<&'static PromptTemplate> {
    PROMPT_TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates matching every filter that is set.
pub fn find_templates(category: Option<PromptCategory>, goal: Option<MarketingGoal>) -> Vec<&'static PromptTemplate> {
    PROMPT_TEMPLATES
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .filter(|t| goal.map_or(true, |g| t.goals.contains(&g)))
        .collect()
}

impl PromptTemplate {
    /// Substitutes the `{lighting}`, `{composition}` and `{background}` placeholders from the preset tables.
    pub fn fill(&self, mood: Mood, goal: MarketingGoal, background: Background) -> String {
        self.base_prompt
            .replace("{lighting}", mood_lighting(mood)[0])
            .replace("{composition}", composition_rule(goal))
            .replace("{background}", background_phrase(background))
    }
}
