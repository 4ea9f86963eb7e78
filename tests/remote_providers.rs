//! Hosted-model providers against in-process stand-ins for the Gemini and Anthropic APIs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};

use dish_prompt_studio::models::{AspectRatio, GeneratorInput, MarketingGoal, ShotType, TargetModel};
use dish_prompt_studio::pipeline::generate_output;
use dish_prompt_studio::providers::{
    AnthropicClient, GeminiClient, RemoteSpecProvider, RetryPolicy, SpecProvider,
};
use dish_prompt_studio::spec_builder::build_spec;

fn model_spec() -> Value {
    json!({
        "subject": "charcoal-grilled satay skewers",
        "ingredients": ["chicken thigh", "peanut sauce"],
        "plating": "banana leaf on a rattan tray",
        "composition": "diagonal skewers leading to the sauce bowl",
        "lighting": "low warm side light with smoke haze",
        "camera": "45-degree angle, 85mm",
        "background": "night market stall",
        "props": ["cucumber", "red onion"],
        "mood": "smoky, street-side",
        "style": ["street food editorial", "photorealistic"],
        "constraints": [],
        "negative": ["plastic look"],
        "modelHints": {"aspectRatio": "9:16", "targetModel": "dalle"}
    })
}

fn satay() -> GeneratorInput {
    let mut input = GeneratorInput::new("Satay", MarketingGoal::SocialFeed);
    input.aspect_ratio = AspectRatio::Story;
    input.target_model = TargetModel::Midjourney;
    input.shot_type = Some(ShotType::EyeLevel);
    input
}

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn gemini_rate_limited_once(State(calls): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
        return (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": {"message": "quota"}})));
    }
    let text = format!("```json\n{}\n```", model_spec());
    (
        StatusCode::OK,
        Json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})),
    )
}

#[tokio::test]
async fn gemini_retries_rate_limit_then_uses_model_spec() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(
        Router::new()
            .route("/models/:call", post(gemini_rate_limited_once))
            .with_state(calls.clone()),
    )
    .await;

    let client = GeminiClient::new("test-key".into(), base, "gemini-2.0-flash".into());
    let provider = RemoteSpecProvider::new(client, RetryPolicy::new(Duration::ZERO));
    assert_eq!(provider.name(), "gemini");

    let spec = provider.generate_spec(&satay()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(spec.subject, "charcoal-grilled satay skewers");
    assert_eq!(spec.style, "street food editorial, photorealistic");
    // user choices win over whatever hints the model wrote
    assert_eq!(spec.model_hints["aspectRatio"], "9:16");
    assert_eq!(spec.model_hints["targetModel"], "midjourney");
    assert_eq!(spec.model_hints["shotType"], "eye_level");
}

#[tokio::test]
async fn gemini_client_error_falls_back_without_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    async fn bad_request(State(calls): State<Arc<AtomicUsize>>) -> impl IntoResponse {
        calls.fetch_add(1, Ordering::SeqCst);
        (StatusCode::BAD_REQUEST, "API key not valid")
    }
    let base = serve(
        Router::new()
            .route("/models/:call", post(bad_request))
            .with_state(calls.clone()),
    )
    .await;

    let client = GeminiClient::new("bad-key".into(), base, "gemini-2.0-flash".into());
    let provider = RemoteSpecProvider::new(client, RetryPolicy::new(Duration::ZERO));
    let spec = provider.generate_spec(&satay()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(spec, build_spec(&satay()));
}

#[tokio::test]
async fn unreachable_host_falls_back_to_template_spec() {
    let client = GeminiClient::new("k".into(), "http://127.0.0.1:1".into(), "gemini-2.0-flash".into());
    let provider = RemoteSpecProvider::new(client, RetryPolicy::new(Duration::ZERO));
    let output = generate_output(&satay(), &provider).await;
    assert_eq!(output.spec, build_spec(&satay()));
    assert!(output.outputs.variant_a.prompt.contains("--ar 9:16"));
}

#[tokio::test]
async fn anthropic_prose_answer_falls_back() {
    async fn prose() -> Json<Value> {
        Json(json!({"content": [{"type": "text", "text": "I'd love to help with your satay shoot!"}]}))
    }
    let base = serve(Router::new().route("/messages", post(prose))).await;

    let client = AnthropicClient::new("sk-test".into(), base, "claude-sonnet-4-20250514".into());
    let provider = RemoteSpecProvider::new(client, RetryPolicy::new(Duration::ZERO));
    assert_eq!(provider.name(), "anthropic");
    assert_eq!(provider.generate_spec(&satay()).await, build_spec(&satay()));
}

#[tokio::test]
async fn anthropic_spec_is_used_and_stamped() {
    async fn answer(Json(request): Json<Value>) -> Json<Value> {
        assert_eq!(request["messages"][0]["role"], "user");
        assert!(request["system"].as_str().unwrap_or_default().contains("JSON"));
        let text = format!("Here you go:\n{}", model_spec());
        Json(json!({"content": [{"type": "text", "text": text}]}))
    }
    let base = serve(Router::new().route("/messages", post(answer))).await;

    let client = AnthropicClient::new("sk-test".into(), base, "claude-sonnet-4-20250514".into());
    let provider = RemoteSpecProvider::new(client, RetryPolicy::new(Duration::ZERO));
    let spec = provider.generate_spec(&satay()).await;
    assert_eq!(spec.plating, "banana leaf on a rattan tray");
    assert_eq!(spec.model_hints["targetModel"], "midjourney");
}
