use std::collections::BTreeMap;

use crate::models::{AspectRatio, TargetModel};

pub fn sdxl_resolution(aspect: AspectRatio) -> &'static str {
    match aspect {
        AspectRatio::Square => "1024x1024",
        AspectRatio::Portrait => "896x1120",
        AspectRatio::Story => "768x1344",
        AspectRatio::Landscape => "1344x768",
    }
}

pub fn dalle_size(aspect: AspectRatio) -> &'static str {
    match aspect {
        AspectRatio::Square => "1024x1024",
        AspectRatio::Landscape => "1792x1024",
        AspectRatio::Portrait | AspectRatio::Story => "1024x1792",
    }
}

/// Recommended generation parameters for a model at an aspect ratio.
pub fn resolve_settings(model: TargetModel, aspect: AspectRatio) -> BTreeMap<String, String> {
    let entries: Vec<(&str, String)> = match model {
        // Flux-style models have no table of their own and share Midjourney's.
        TargetModel::Midjourney | TargetModel::Banana => vec![
            ("Aspect Ratio", format!("--ar {aspect}")),
            ("Stylize", "--stylize 750".into()),
            ("Quality", "--quality 2".into()),
            ("Version", "--v 6".into()),
            ("Note", "Add --no text artifacts, watermark for cleaner output".into()),
        ],
        TargetModel::Sdxl => vec![
            ("CFG Scale", "7-7.5".into()),
            ("Steps", "28-35".into()),
            ("Sampler", "DPM++ 2M Karras".into()),
            ("Clip Skip", "2".into()),
            ("Resolution", sdxl_resolution(aspect).into()),
            ("Note", "Use food photography LoRA if available".into()),
        ],
        TargetModel::Dalle => vec![
            ("Quality", "HD".into()),
            ("Style", "Natural".into()),
            ("Size", dalle_size(aspect).into()),
            ("Note", "DALL-E 3 generates natural-looking food well".into()),
        ],
    };

    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Lookup by raw identifiers; unknown models use the Midjourney table, unknown ratios square.
pub fn resolve_settings_by_name(model: &str, aspect: &str) -> BTreeMap<String, String> {
    resolve_settings(
        TargetModel::parse(model).unwrap_or_default(),
        AspectRatio::parse(aspect).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midjourney_table_carries_version_flag() {
        let settings = resolve_settings(TargetModel::Midjourney, AspectRatio::Portrait);
        assert_eq!(settings["Version"], "--v 6");
        assert_eq!(settings["Aspect Ratio"], "--ar 4:5");
    }

    #[test]
    fn dalle_landscape_is_wide() {
        assert_eq!(resolve_settings(TargetModel::Dalle, AspectRatio::Landscape)["Size"], "1792x1024");
        assert_eq!(resolve_settings(TargetModel::Dalle, AspectRatio::Story)["Size"], "1024x1792");
    }

    #[test]
    fn sdxl_resolution_follows_ratio() {
        for (aspect, expected) in [
            (AspectRatio::Square, "1024x1024"),
            (AspectRatio::Portrait, "896x1120"),
            (AspectRatio::Story, "768x1344"),
            (AspectRatio::Landscape, "1344x768"),
        ] {
            assert_eq!(resolve_settings(TargetModel::Sdxl, aspect)["Resolution"], expected);
        }
    }

    #[test]
    fn unknown_model_name_uses_midjourney_table() {
        assert_eq!(
            resolve_settings_by_name("imagen", "16:9"),
            resolve_settings(TargetModel::Midjourney, AspectRatio::Landscape)
        );
    }
}
