use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    cache::{cache_key, ResponseCache},
    config::Config,
    library::{find_templates, template_by_id, PromptCategory, PromptTemplate},
    models::{
        AspectRatio, Background, DietaryFlag, GeneratorInput, InputError, LightingStyle,
        MarketingGoal, Mood, Prop, QualityBoost, QuickFix, ShotType, TargetModel,
    },
    pipeline::generate_output,
    presets::BRAND_VIBE_PRESETS,
    providers::{provider_from_config, GeminiClient, SpecProvider},
    rate_limit::{RateLimitDecision, TokenBucketLimiter},
    store::{SaveRequest, SavedPromptStore},
    vision::VisionAnalyzer,
};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SpecProvider>,
    pub cache: Arc<ResponseCache>,
    pub limiter: Arc<TokenBucketLimiter>,
    pub saved: Arc<SavedPromptStore>,
    pub vision: Option<Arc<VisionAnalyzer>>,
}

impl AppState {
    /// Default cache and limiter, no vision.
    pub fn new(provider: Arc<dyn SpecProvider>) -> Self {
        Self {
            provider,
            cache: Arc::default(),
            limiter: Arc::default(),
            saved: Arc::default(),
            vision: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let vision = config.gemini_api_key.as_ref().map(|key| {
            let gemini = GeminiClient::new(key.clone(), config.gemini_api_base.clone(), config.gemini_model.clone());
            Arc::new(VisionAnalyzer::new(gemini, config.vision_model.clone()))
        });
        Self {
            provider: provider_from_config(config),
            cache: Arc::new(ResponseCache::new(config.cache_capacity)),
            limiter: Arc::new(TokenBucketLimiter::new(
                config.rate_limit_max_tokens,
                config.rate_limit_refill_rate,
                config.rate_limit_refill_interval,
            )),
            saved: Arc::default(),
            vision,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate_prompts))
        .route("/api/presets", get(list_presets))
        .route("/api/library", get(list_library))
        .route("/api/library/:id", get(get_library_template))
        .route("/api/saved", post(save_prompt).get(list_saved))
        .route("/api/saved/:id", get(get_saved).delete(delete_saved))
        .with_state(state)
}

/// First `X-Forwarded-For` hop, else a shared anonymous bucket.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("anonymous")
        .to_string()
}

fn rate_limited(decision: RateLimitDecision) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [
            ("x-ratelimit-remaining", decision.remaining.to_string()),
            ("x-ratelimit-reset", decision.reset_at.to_string()),
        ],
        Json(json!({ "error": "Rate limit exceeded", "resetAt": decision.reset_at })),
    )
        .into_response()
}

fn invalid_input(err: &InputError) -> Response {
    tracing::warn!("⚠️ Rejected input: {}", err);
    let mut details = serde_json::Map::new();
    details.insert(err.field().to_string(), Value::String(err.to_string()));
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid input", "details": details }))).into_response()
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "mode": state.provider.name() }))
}

pub async fn generate_prompts(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let client = client_key(&headers);
    let decision = state.limiter.consume(&client);
    if !decision.allowed {
        tracing::warn!("🚫 Rate limit hit for {}", client);
        return rate_limited(decision);
    }

    let mut input = match serde_json::from_slice::<Value>(&body)
        .map_err(|e| InputError::Malformed(e.to_string()))
        .and_then(GeneratorInput::from_json)
    {
        Ok(input) => input,
        Err(e) => return invalid_input(&e),
    };

    let key = cache_key(&input);
    let (output, cache_status) = match state.cache.get(&key) {
        Some(output) => {
            tracing::info!("💾 Cache hit for '{}'", input.dish_name);
            (output, "HIT")
        }
        None => {
            if input.enable_vision && input.visual_analysis.is_none() {
                if let (Some(vision), Some(image)) = (&state.vision, input.reference_image.as_deref()) {
                    // analysis failures are logged inside and the request proceeds without one
                    if let Ok(analysis) = vision.analyze(image).await {
                        input.visual_analysis = Some(analysis);
                    }
                }
            }
            let output = generate_output(&input, state.provider.as_ref()).await;
            state.cache.insert(key, output.clone());
            (output, "MISS")
        }
    };

    tracing::info!("✅ Prompts ready for '{}' ({})", input.dish_name, cache_status);
    (
        [
            ("x-cache", cache_status.to_string()),
            ("x-mode", state.provider.name().to_string()),
            ("x-ratelimit-remaining", decision.remaining.to_string()),
        ],
        Json(output),
    )
        .into_response()
}

#[derive(Serialize)]
struct PresetOption {
    value: &'static str,
    label: &'static str,
}

macro_rules! options {
    ($ty:ty) => {
        <$ty>::ALL.iter().map(|v| PresetOption { value: v.as_str(), label: v.label() }).collect::<Vec<_>>()
    };
}

pub async fn list_presets() -> Json<Value> {
    Json(json!({
        "marketingGoals": options!(MarketingGoal),
        "moods": options!(Mood),
        "shotTypes": options!(ShotType),
        "backgrounds": options!(Background),
        "lightingStyles": options!(LightingStyle),
        "qualityBoosts": options!(QualityBoost),
        "aspectRatios": options!(AspectRatio),
        "targetModels": options!(TargetModel),
        "dietaryFlags": options!(DietaryFlag),
        "props": options!(Prop),
        "quickFixes": options!(QuickFix),
        "brandVibes": BRAND_VIBE_PRESETS,
    }))
}

#[derive(Deserialize)]
pub struct LibraryQuery {
    category: Option<PromptCategory>,
    goal: Option<MarketingGoal>,
}

pub async fn list_library(Query(query): Query<LibraryQuery>) -> Json<Vec<&'static PromptTemplate>> {
    Json(find_templates(query.category, query.goal))
}

#[derive(Deserialize)]
pub struct FillQuery {
    mood: Option<Mood>,
    goal: Option<MarketingGoal>,
    background: Option<Background>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledTemplate {
    template: &'static PromptTemplate,
    filled_prompt: String,
}

pub async fn get_library_template(
    Path(id): Path<String>,
    Query(query): Query<FillQuery>,
) -> Result<Json<FilledTemplate>, StatusCode> {
    let template = template_by_id(&id).ok_or(StatusCode::NOT_FOUND)?;
    let goal = query.goal.or_else(|| template.goals.first().copied()).unwrap_or(MarketingGoal::MenuHero);
    let filled_prompt = template.fill(
        query.mood.unwrap_or(Mood::Fresh),
        goal,
        query.background.unwrap_or(Background::StudioSeamless),
    );
    Ok(Json(FilledTemplate { template, filled_prompt }))
}

pub async fn save_prompt(State(state): State<AppState>, Json(body): Json<SaveRequest>) -> Response {
    let saved = state.saved.save(body);
    tracing::info!("📌 Saved prompt {} for '{}'", saved.id, saved.input.dish_name);
    (StatusCode::CREATED, Json(saved)).into_response()
}

pub async fn list_saved(State(state): State<AppState>) -> Response {
    Json(state.saved.list()).into_response()
}

pub async fn get_saved(Path(id): Path<Uuid>, State(state): State<AppState>) -> Response {
    if let Some(p) = state.saved.get(&id) { Json(p).into_response() } else { StatusCode::NOT_FOUND.into_response() }
}

pub async fn delete_saved(Path(id): Path<Uuid>, State(state): State<AppState>) -> StatusCode {
    if state.saved.delete(&id) { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}
