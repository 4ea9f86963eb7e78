//! Reference-photo analysis. Produces free text that feeds `GeneratorInput::visual_analysis`.

use base64::Engine;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::decode_image_payload;
use crate::providers::{GeminiClient, LlmError};

pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";

const ANALYSIS_INSTRUCTION: &str = "Analyze this food/product image and provide a detailed visual description for a photography prompt.

CRITICAL: Focus on REALISM and AUTHENTICITY to prevent \"AI Slop\".
- Identify textures: uneven browning, oil glisten, crumbs, condensation, sauce drips, rough surfaces.
- Lighting: describe natural shadows, reflections, and light fall-off.
- \"Perfectly imperfect\" details: charred edges, steam mist, scattered herbs, organic arrangement.
- Core elements: main subject color palette and material properties.
- CROCKERY & PLATING: describe the EXACT plate/bowl type (e.g. \"stainless steel shallow bowl with wide rim\", \"banana leaf on rattan\").
- QUANTITY & DISTRIBUTION: count visible pieces of meat and garnish; describe exact colors (e.g. \"light golden fried rice\").
- SPATIAL LAYOUT: describe the EXACT position of every element (e.g. \"fried egg at 11 o'clock\").
- LAYERING: what sits on top of what.

Your goal is to enable a FORENSIC RECONSTRUCTION of the scene. The generated image must have the EXACT same layout.";

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("reference image is not valid base64: {0}")] Decode(#[from] base64::DecodeError),
    #[error("vision request failed: {0}")] Request(#[from] LlmError),
}

pub struct VisionAnalyzer {
    gemini: GeminiClient,
    model: String,
}

impl VisionAnalyzer {
    pub fn new(gemini: GeminiClient, model: String) -> Self {
        Self { gemini, model }
    }

    pub async fn analyze(&self, image: &str) -> Result<String, VisionError> {
        let bytes = decode_image_payload(image)?;
        let mime_type = sniff_mime_type(&bytes);
        info!("🔍 Analyzing {} reference image ({} bytes)", mime_type, bytes.len());

        let payload = json!({
            "contents": [{
                "parts": [
                    {"text": ANALYSIS_INSTRUCTION},
                    {"inline_data": {
                        "mime_type": mime_type,
                        "data": base64::engine::general_purpose::STANDARD.encode(&bytes)
                    }}
                ]
            }]
        });

        match self.gemini.generate_content(&self.model, payload).await {
            Ok(description) => {
                info!("✅ Vision analysis produced {} chars", description.len());
                Ok(description)
            }
            Err(e) => {
                warn!("⚠️ Vision analysis failed: {}", e);
                Err(e.into())
            }
        }
    }
}

/// MIME type from the image's magic bytes; unknown formats are sent as JPEG.
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("image/jpeg")
}
