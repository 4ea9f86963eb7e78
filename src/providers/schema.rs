//! Validation of hosted-model output against the `PromptSpec` contract.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{PromptSpec, VariantCues};

#[derive(Debug, Error, PartialEq)]
pub enum SpecValidationError {
    #[error("no JSON object found in model response")] NoJson,
    #[error("invalid JSON: {0}")] Syntax(String),
    #[error("JSON does not match PromptSpec: {0}")] Schema(String),
}

/// `style` may come back as one string or a list of keywords.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StyleField {
    Text(String),
    List(Vec<String>),
}

impl StyleField {
    fn normalize(self) -> String {
        match self {
            StyleField::Text(s) => s,
            StyleField::List(items) => items.join(", "),
        }
    }
}

/// Wire shape as the model writes it. Every field is required; extra keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPromptSpec {
    subject: String,
    ingredients: Vec<String>,
    plating: String,
    composition: String,
    lighting: String,
    camera: String,
    background: String,
    props: Vec<String>,
    mood: String,
    style: StyleField,
    constraints: Vec<String>,
    negative: Vec<String>,
    model_hints: BTreeMap<String, String>,
    #[serde(default)]
    variant_cues: Option<VariantCues>,
    #[serde(default)]
    reference_image_url: Option<String>,
}

impl From<RawPromptSpec> for PromptSpec {
    fn from(raw: RawPromptSpec) -> Self {
        PromptSpec {
            subject: raw.subject,
            ingredients: raw.ingredients,
            plating: raw.plating,
            composition: raw.composition,
            lighting: raw.lighting,
            camera: raw.camera,
            background: raw.background,
            props: raw.props,
            mood: raw.mood,
            style: raw.style.normalize(),
            constraints: raw.constraints,
            negative: raw.negative,
            model_hints: raw.model_hints,
            variant_cues: raw.variant_cues,
            reference_image_url: raw.reference_image_url,
        }
    }
}

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json|JSON)?\s*([\s\S]*?)```").expect("valid fence regex"));

/// The JSON object the model meant to return. A fenced block wins; otherwise the first `{`
/// that starts a complete JSON value, so stray braces in surrounding prose are skipped.
pub fn extract_json_object(text: &str) -> Result<serde_json::Value, SpecValidationError> {
    if let Some(block) = FENCED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        if let Ok(value) = first_object(block.as_str()) {
            return Ok(value);
        }
    }
    first_object(text)
}

fn first_object(text: &str) -> Result<serde_json::Value, SpecValidationError> {
    let mut first_error = None;
    for (start, _) in text.match_indices('{') {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<serde_json::Value>();
        match stream.next() {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| SpecValidationError::Syntax(e.to_string()));
            }
            None => {}
        }
    }
    Err(first_error.unwrap_or(SpecValidationError::NoJson))
}

pub fn parse_spec(text: &str) -> Result<PromptSpec, SpecValidationError> {
    let value = extract_json_object(text)?;
    let raw: RawPromptSpec =
        serde_json::from_value(value).map_err(|e| SpecValidationError::Schema(e.to_string()))?;
    Ok(raw.into())
}
