//! Request-level orchestration: spec → three variants → rendered output bundle.

use tracing::info;

use crate::models::{
    GeneratorInput, GeneratorOutput, PromptSpec, RenderedOutputs, TargetModel, VariantKind,
    VariantPrompt,
};
use crate::providers::SpecProvider;
use crate::renderers::{negative_prompt, renderer_for};
use crate::settings::resolve_settings;
use crate::variants::assemble_variant;

pub fn render_variant(spec: &PromptSpec, kind: VariantKind, model: TargetModel) -> String {
    let assembled = assemble_variant(spec, kind);
    renderer_for(model)(&assembled, spec)
}

/// Renders an already-produced spec for the request's target model and aspect ratio.
pub fn render_output(input: &GeneratorInput, spec: PromptSpec) -> GeneratorOutput {
    let model = input.target_model;
    let variant = |kind| VariantPrompt { prompt: render_variant(&spec, kind, model), kind };

    let outputs = RenderedOutputs {
        variant_a: variant(VariantKind::SafeCommercial),
        variant_b: variant(VariantKind::PremiumEditorial),
        variant_c: variant(VariantKind::PunchySocial),
        negative: negative_prompt(model, &spec),
        settings: resolve_settings(model, input.aspect_ratio),
    };
    GeneratorOutput { spec, outputs }
}

pub async fn generate_output(input: &GeneratorInput, provider: &dyn SpecProvider) -> GeneratorOutput {
    info!("🚀 Generating prompts for '{}' via {} ({})", input.dish_name, provider.name(), input.target_model);
    let spec = provider.generate_spec(input).await;
    render_output(input, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectRatio, MarketingGoal, QuickFix};
    use crate::providers::LocalProvider;
    use crate::spec_builder::build_spec;
    use pretty_assertions::assert_eq;

    fn wagyu() -> GeneratorInput {
        let mut input = GeneratorInput::new("Wagyu Beef Burger", MarketingGoal::MenuHero);
        input.key_ingredients = Some("wagyu patty, cheddar cheese".into());
        input
    }

    #[tokio::test]
    async fn wagyu_example_bundle() {
        let output = generate_output(&wagyu(), &LocalProvider).await;
        assert_eq!(output.spec, build_spec(&wagyu()));
        for variant in output.outputs.variants() {
            assert!(!variant.prompt.is_empty());
            assert!(variant.prompt.contains("--ar 1:1"));
            assert!(variant.prompt.ends_with("--v 6"));
        }
        assert_eq!(output.outputs.variant_a.kind, VariantKind::SafeCommercial);
        assert_eq!(output.outputs.variant_b.kind, VariantKind::PremiumEditorial);
        assert_eq!(output.outputs.variant_c.kind, VariantKind::PunchySocial);
        assert!(!output.outputs.negative.is_empty());
        assert_eq!(output.outputs.settings["Version"], "--v 6");
    }

    #[tokio::test]
    async fn brighter_lighting_reaches_variant_a() {
        let mut input = wagyu();
        input.quick_fixes = vec![QuickFix::BrighterLighting, QuickFix::MorePremium];
        let output = generate_output(&input, &LocalProvider).await;
        assert!(output.outputs.variant_a.prompt.contains("bright"));
    }

    #[tokio::test]
    async fn dalle_landscape_settings() {
        let mut input = wagyu();
        input.target_model = TargetModel::Dalle;
        input.aspect_ratio = AspectRatio::Landscape;
        let output = generate_output(&input, &LocalProvider).await;
        assert_eq!(output.outputs.settings["Size"], "1792x1024");
        assert!(output.outputs.variant_a.prompt.starts_with("A professional food photograph of Wagyu Beef Burger."));
    }

    #[tokio::test]
    async fn sdxl_bundle_uses_quality_tags_and_sdxl_negative() {
        let mut input = wagyu();
        input.target_model = TargetModel::Sdxl;
        let output = generate_output(&input, &LocalProvider).await;
        for variant in output.outputs.variants() {
            assert!(variant.prompt.starts_with("masterpiece, best quality"));
        }
        assert!(output.outputs.negative.ends_with("username"));
    }

    #[tokio::test]
    async fn local_output_is_deterministic() {
        let first = generate_output(&wagyu(), &LocalProvider).await;
        let second = generate_output(&wagyu(), &LocalProvider).await;
        assert_eq!(first, second);
    }
}
