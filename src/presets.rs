//! Fixed preset tables: quality presets, undesired-content presets, model
//! options, generation modes and quick-pick presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Balanced,
    Artistic,
    Photorealistic,
    Anime,
    #[default]
    Hoyoverse,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QualityPresetConfig {
    pub id: QualityPreset,
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub description: &'static str,
}

pub const QUALITY_PRESETS: &[QualityPresetConfig] = &[
    QualityPresetConfig {
        id: QualityPreset::Balanced,
        name: "Balanced",
        tags: &["masterpiece", "very aesthetic"],
        description: "Standard quality tags for consistent results",
    },
    QualityPresetConfig {
        id: QualityPreset::Artistic,
        name: "Artistic",
        tags: &["masterpiece", "very aesthetic", "absurdres"],
        description: "Enhanced resolution and artistic quality",
    },
    QualityPresetConfig {
        id: QualityPreset::Photorealistic,
        name: "Photorealistic",
        tags: &["masterpiece", "best quality", "highres", "ultra-detailed"],
        description: "Realistic rendering with high detail",
    },
    QualityPresetConfig {
        id: QualityPreset::Anime,
        name: "Anime",
        tags: &["masterpiece", "very aesthetic", "newest", "anime coloring"],
        description: "Modern anime art style",
    },
    QualityPresetConfig {
        id: QualityPreset::Hoyoverse,
        name: "Hoyoverse",
        tags: &["masterpiece", "very aesthetic", "official art"],
        description: "HSR/Genshin signature quality",
    },
];

impl QualityPreset {
    pub const ALL: [QualityPreset; 5] = [
        QualityPreset::Balanced,
        QualityPreset::Artistic,
        QualityPreset::Photorealistic,
        QualityPreset::Anime,
        QualityPreset::Hoyoverse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QualityPreset::Balanced => "balanced",
            QualityPreset::Artistic => "artistic",
            QualityPreset::Photorealistic => "photorealistic",
            QualityPreset::Anime => "anime",
            QualityPreset::Hoyoverse => "hoyoverse",
        }
    }

    pub fn config(self) -> &'static QualityPresetConfig {
        // QUALITY_PRESETS is declared in ALL order.
        &QUALITY_PRESETS[self as usize]
    }

    pub fn tags(self) -> &'static [&'static str] {
        self.config().tags
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("Unknown quality preset: {}", value))
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UndesiredPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static str,
    pub nsfw: bool,
}

pub const UNDESIRED_PRESETS: &[UndesiredPreset] = &[
    UndesiredPreset {
        id: "heavy",
        name: "Heavy",
        description: "Maximum quality filtering - recommended default",
        tags: "lowres, artistic error, film grain, scan artifacts, worst quality, bad quality, \
               jpeg artifacts, very displeasing, chromatic aberration, dithering, halftone, \
               screentone, multiple views, logo, too many watermarks, negative space, blank page",
        nsfw: false,
    },
    UndesiredPreset {
        id: "light",
        name: "Light",
        description: "Minimal filtering for artistic styles",
        tags: "lowres, artistic error, scan artifacts, worst quality, bad quality, \
               jpeg artifacts, multiple views, very displeasing, too many watermarks, \
               negative space, blank page",
        nsfw: false,
    },
    UndesiredPreset {
        id: "human-focus",
        name: "Human Focus",
        description: "Optimized for character art with anatomy fixes",
        tags: "lowres, artistic error, film grain, scan artifacts, worst quality, bad quality, \
               jpeg artifacts, very displeasing, chromatic aberration, dithering, halftone, \
               screentone, multiple views, logo, too many watermarks, negative space, \
               blank page, @_@, mismatched pupils, glowing eyes, bad anatomy",
        nsfw: false,
    },
    UndesiredPreset {
        id: "furry-focus",
        name: "Furry Focus",
        description: "Optimized for furry art",
        tags: "lowres, artistic error, worst quality, bad quality, jpeg artifacts, \
               very displeasing, chromatic aberration, multiple views, logo, \
               too many watermarks, negative space, blank page, bad anatomy, wrong anatomy",
        nsfw: false,
    },
    UndesiredPreset {
        id: "nsfw-heavy",
        name: "NSFW Heavy",
        description: "For explicit content with anatomy focus",
        tags: "lowres, artistic error, film grain, scan artifacts, worst quality, bad quality, \
               jpeg artifacts, very displeasing, chromatic aberration, multiple views, logo, \
               too many watermarks, bad anatomy, wrong anatomy, extra limbs, missing limbs, \
               bad hands, bad fingers, extra fingers, missing fingers",
        nsfw: true,
    },
    UndesiredPreset {
        id: "none",
        name: "None",
        description: "No undesired content filtering",
        tags: "",
        nsfw: false,
    },
];

pub fn undesired_preset(id: &str) -> Option<&'static UndesiredPreset> {
    UNDESIRED_PRESETS.iter().find(|preset| preset.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub quality_tags: &'static str,
    pub recommended_guidance: Range,
    pub recommended_steps: Range,
}

const GUIDANCE: Range = Range {
    min: 2,
    max: 6,
    default: 5,
};

const STEPS: Range = Range {
    min: 20,
    max: 50,
    default: 28,
};

pub const MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption {
        id: "v45-full",
        name: "V4.5 Full",
        description: "Comprehensive dataset, more creative freedom",
        quality_tags: "no text, best quality, very aesthetic, absurdres",
        recommended_guidance: GUIDANCE,
        recommended_steps: STEPS,
    },
    ModelOption {
        id: "v45-curated",
        name: "V4.5 Curated",
        description: "Cleaner dataset, safer outputs",
        quality_tags: "location, masterpiece, no text, -0.8::feet::, rating:general",
        recommended_guidance: GUIDANCE,
        recommended_steps: STEPS,
    },
];

/// Model option by id, falling back to the first model.
pub fn model_option(id: &str) -> &'static ModelOption {
    MODEL_OPTIONS
        .iter()
        .find(|model| model.id == id)
        .unwrap_or(&MODEL_OPTIONS[0])
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationMode {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub nsfw: bool,
}

pub const GENERATION_MODES: &[GenerationMode] = &[
    GenerationMode {
        id: "guided",
        name: "Guided",
        icon: "✏️",
        description: "Step by step prompt building",
        nsfw: false,
    },
    GenerationMode {
        id: "random",
        name: "Full Random",
        icon: "🎲",
        description: "Randomize everything",
        nsfw: false,
    },
    GenerationMode {
        id: "nsfw",
        name: "NSFW",
        icon: "🔞",
        description: "Adult content mode",
        nsfw: true,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StylePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub category: &'static str,
}

pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset {
        id: "hsr-character",
        name: "HSR Character",
        tags: &[
            "honkai: star rail",
            "anime style",
            "official art",
            "detailed",
            "dramatic lighting",
        ],
        category: "hoyoverse",
    },
    StylePreset {
        id: "genshin-character",
        name: "Genshin Character",
        tags: &[
            "genshin impact",
            "anime style",
            "fantasy",
            "detailed",
            "volumetric lighting",
        ],
        category: "hoyoverse",
    },
    StylePreset {
        id: "fantasy-portrait",
        name: "Fantasy Portrait",
        tags: &[
            "portrait",
            "fantasy",
            "detailed",
            "dramatic lighting",
            "rim lighting",
        ],
        category: "general",
    },
    StylePreset {
        id: "action-scene",
        name: "Action Scene",
        tags: &[
            "dynamic pose",
            "action",
            "motion blur",
            "dramatic lighting",
            "energy",
        ],
        category: "general",
    },
    StylePreset {
        id: "cozy-slice",
        name: "Cozy Slice of Life",
        tags: &[
            "soft lighting",
            "warm colors",
            "casual clothes",
            "smile",
            "relaxed pose",
        ],
        category: "general",
    },
    StylePreset {
        id: "dark-aesthetic",
        name: "Dark Aesthetic",
        tags: &[
            "dark background",
            "dramatic lighting",
            "chiaroscuro",
            "serious",
            "low key lighting",
        ],
        category: "general",
    },
];

pub fn style_preset(id: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|preset| preset.id == id)
}

/// A named set of selection categories to randomize together.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RandomPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub categories: &'static [&'static str],
}

pub const RANDOM_PRESETS: &[RandomPreset] = &[
    RandomPreset {
        id: "full-random",
        name: "Full Random",
        icon: "🎲",
        categories: &[
            "gender",
            "bodyType",
            "hairColor",
            "hairLength",
            "hairStyle",
            "eyeColor",
            "expression",
            "clothingStyle",
            "accessory",
            "standingPose",
            "composition",
            "indoorLocation",
            "lighting",
            "artStyle",
            "quality",
        ],
    },
    RandomPreset {
        id: "character-only",
        name: "Random Character",
        icon: "👤",
        categories: &[
            "gender",
            "bodyType",
            "hairColor",
            "hairLength",
            "hairStyle",
            "eyeColor",
            "expression",
        ],
    },
    RandomPreset {
        id: "outfit-only",
        name: "Random Outfit",
        icon: "👗",
        categories: &["clothingStyle", "outfitDetail", "accessory"],
    },
    RandomPreset {
        id: "scene-only",
        name: "Random Scene",
        icon: "🏞️",
        categories: &[
            "indoorLocation",
            "outdoorLocation",
            "time",
            "weather",
            "lighting",
        ],
    },
    RandomPreset {
        id: "pose-only",
        name: "Random Pose",
        icon: "🤸",
        categories: &["standingPose", "sittingPose", "expression", "looking"],
    },
];

pub fn random_preset(id: &str) -> Option<&'static RandomPreset> {
    RANDOM_PRESETS.iter().find(|preset| preset.id == id)
}

/// Emphasis syntax reference, strongest first.
pub const EMPHASIS_EXAMPLES: &[(&str, &str)] = &[
    ("strong", "{{tag}}"),
    ("medium", "{tag}"),
    ("weak", "[tag]"),
    ("numerical", "1.5::tag::"),
    ("negative", "-1::tag::"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_preset_table_matches_enum_order() {
        for preset in QualityPreset::ALL {
            assert_eq!(preset.config().id, preset);
        }
        assert_eq!(
            QualityPreset::Hoyoverse.tags(),
            &["masterpiece", "very aesthetic", "official art"]
        );
    }

    #[test]
    fn test_quality_preset_parses_case_insensitively() {
        assert_eq!("Anime".parse::<QualityPreset>(), Ok(QualityPreset::Anime));
        assert!("cinematic".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn test_undesired_preset_tags_are_joined_cleanly() {
        let heavy = undesired_preset("heavy").expect("heavy preset");
        assert!(heavy.tags.starts_with("lowres, artistic error"));
        assert!(heavy.tags.contains("dithering, halftone"));
        assert!(!heavy.tags.contains("  "));
        assert_eq!(undesired_preset("none").map(|preset| preset.tags), Some(""));
    }

    #[test]
    fn test_model_option_falls_back_to_first() {
        assert_eq!(model_option("v45-curated").name, "V4.5 Curated");
        assert_eq!(model_option("v3").id, "v45-full");
        assert_eq!(model_option("v45-full").recommended_steps.default, 28);
    }
}
