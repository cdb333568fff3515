use crate::negatives::generate_negatives;
use crate::normalizer::normalize;
use crate::parser::{parse, Bucket, ParsedPrompt};
use crate::presets::QualityPreset;
use crate::repetition::{generate_repetitions, RepetitionLevel, RepetitionSettings};
use crate::tokens::{token_budget, TokenBudget};
use crate::weighting::{apply_emphasis, weight_level_of, WeightLevel};
use serde::{Deserialize, Serialize};

pub const MIN_AUTO_WEIGHT_LEVEL: f64 = 0.8;
pub const MAX_AUTO_WEIGHT_LEVEL: f64 = 1.5;

/// User-tunable enhancement switches. Persisted as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancementSettings {
    pub auto_weight: bool,
    pub auto_weight_level: f64,
    pub smart_repetition: RepetitionSettings,
    pub auto_negatives: bool,
    pub booru_normalization: bool,
    pub quality_preset: QualityPreset,
    pub show_before_after: bool,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            auto_weight: true,
            auto_weight_level: 1.0,
            smart_repetition: RepetitionSettings::default(),
            auto_negatives: true,
            booru_normalization: true,
            quality_preset: QualityPreset::Hoyoverse,
            show_before_after: true,
        }
    }
}

/// Partial update for [`EnhancementSettings`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancementSettingsPatch {
    pub auto_weight: Option<bool>,
    pub auto_weight_level: Option<f64>,
    pub smart_repetition: Option<RepetitionSettings>,
    pub repetition_level: Option<RepetitionLevel>,
    pub auto_negatives: Option<bool>,
    pub booru_normalization: Option<bool>,
    pub quality_preset: Option<QualityPreset>,
    pub show_before_after: Option<bool>,
}

impl EnhancementSettings {
    pub fn apply(&mut self, patch: EnhancementSettingsPatch) {
        if let Some(value) = patch.auto_weight {
            self.auto_weight = value;
        }
        if let Some(value) = patch.auto_weight_level.filter(|value| value.is_finite()) {
            self.auto_weight_level = value.clamp(MIN_AUTO_WEIGHT_LEVEL, MAX_AUTO_WEIGHT_LEVEL);
        }
        if let Some(value) = patch.smart_repetition {
            self.smart_repetition = value;
        }
        if let Some(level) = patch.repetition_level {
            self.smart_repetition.level = level;
        }
        if let Some(value) = patch.auto_negatives {
            self.auto_negatives = value;
        }
        if let Some(value) = patch.booru_normalization {
            self.booru_normalization = value;
        }
        if let Some(value) = patch.quality_preset {
            self.quality_preset = value;
        }
        if let Some(value) = patch.show_before_after {
            self.show_before_after = value;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Weight,
    Repeat,
    Normalize,
    Reorder,
    Negative,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Weight => "weight",
            ChangeKind::Repeat => "repeat",
            ChangeKind::Normalize => "normalize",
            ChangeKind::Reorder => "reorder",
            ChangeKind::Negative => "negative",
        }
    }
}

/// One step the enhancer took, for before/after display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub original: String,
    pub result: String,
    pub reason: String,
}

impl Change {
    fn new(kind: ChangeKind, original: &str, result: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            original: original.to_string(),
            result: result.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedPrompt {
    pub original: String,
    pub enhanced: String,
    pub tokens: TokenBudget,
    pub changes: Vec<Change>,
    pub negatives: Vec<String>,
}

/// Runs the enhancement pipeline under a set of settings.
#[derive(Debug, Clone, Default)]
pub struct PromptEnhancer {
    settings: EnhancementSettings,
}

impl PromptEnhancer {
    pub fn new(settings: EnhancementSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EnhancementSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, patch: EnhancementSettingsPatch) {
        self.settings.apply(patch);
    }

    pub fn reset_settings(&mut self) {
        self.settings = EnhancementSettings::default();
    }

    /// Enhances a comma-separated prompt.
    ///
    /// Never fails: empty or malformed input yields an empty enhanced prompt.
    pub fn enhance(&self, original: &str, is_nsfw: bool) -> EnhancedPrompt {
        let settings = &self.settings;
        let mut changes = Vec::new();

        let mut working: Vec<String> = original
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        if settings.booru_normalization {
            for tag in working.iter_mut() {
                let normalized = normalize(tag);
                if normalized != *tag {
                    changes.push(Change::new(
                        ChangeKind::Normalize,
                        tag,
                        &normalized,
                        "Booru tag normalization",
                    ));
                    *tag = normalized;
                }
            }
        }

        let parsed = parse(&working.join(", "));

        let preset_tags: Vec<String> = settings
            .quality_preset
            .tags()
            .iter()
            .filter(|tag| !parsed.quality.iter().any(|existing| existing == *tag))
            .map(|tag| tag.to_string())
            .collect();

        let reordered = reorder_by_priority(&parsed, &preset_tags);
        if reordered.join(", ") != working.join(", ") {
            changes.push(Change::new(
                ChangeKind::Reorder,
                "original order",
                "priority order",
                "Optimized tag ordering for NovelAI",
            ));
        }

        let mut final_tags = if settings.auto_weight {
            reordered
                .into_iter()
                .map(|tag| {
                    let level = weight_level_of(&tag);
                    if level == WeightLevel::Normal {
                        return tag;
                    }
                    let weighted = apply_emphasis(&tag, level, settings.auto_weight_level);
                    if weighted != tag {
                        changes.push(Change::new(
                            ChangeKind::Weight,
                            &tag,
                            &weighted,
                            format!("{} emphasis applied", level),
                        ));
                    }
                    weighted
                })
                .collect()
        } else {
            reordered
        };

        let repetition = &settings.smart_repetition;
        if repetition.level != RepetitionLevel::None {
            let original_tags: Vec<String> = original
                .split(',')
                .map(|tag| tag.trim().to_lowercase())
                .collect();
            for rep in generate_repetitions(&original_tags, repetition.level, repetition.flags()) {
                for variation in rep.variations {
                    let present = final_tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(variation));
                    if !present {
                        final_tags.push(variation.to_string());
                        changes.push(Change::new(
                            ChangeKind::Repeat,
                            &rep.original,
                            variation,
                            "Smart repetition for reinforcement",
                        ));
                    }
                }
            }
        }

        let negatives = if settings.auto_negatives {
            let negatives = generate_negatives(original, is_nsfw);
            changes.push(Change::new(
                ChangeKind::Negative,
                "",
                &format!("{} negative tags", negatives.len()),
                "Auto-generated based on content",
            ));
            negatives
        } else {
            Vec::new()
        };

        let enhanced = final_tags.join(", ");
        let tokens = token_budget(&enhanced, &parsed);
        log::debug!(
            "Enhanced prompt: {} changes, {} tokens ({})",
            changes.len(),
            tokens.count,
            tokens.status.as_str()
        );

        EnhancedPrompt {
            original: original.to_string(),
            enhanced,
            tokens,
            changes,
            negatives,
        }
    }
}

/// Preset quality tags first, then every bucket but quality in priority
/// order. Parsed quality tags are dropped; the preset stands in for them.
fn reorder_by_priority(parsed: &ParsedPrompt, preset_tags: &[String]) -> Vec<String> {
    let mut ordered = preset_tags.to_vec();
    for bucket in Bucket::ALL.into_iter().skip(1) {
        ordered.extend(parsed.bucket(bucket).iter().cloned());
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenStatus;

    fn enhancer_with(patch: EnhancementSettingsPatch) -> PromptEnhancer {
        let mut enhancer = PromptEnhancer::default();
        enhancer.update_settings(patch);
        enhancer
    }

    fn plain() -> EnhancementSettingsPatch {
        EnhancementSettingsPatch {
            auto_weight: Some(false),
            repetition_level: Some(RepetitionLevel::None),
            auto_negatives: Some(false),
            booru_normalization: Some(false),
            ..EnhancementSettingsPatch::default()
        }
    }

    #[test]
    fn test_default_pipeline() {
        let enhancer = PromptEnhancer::default();
        let result = enhancer.enhance("1girl, silver hair, smile, forest", false);

        assert_eq!(
            result.enhanced,
            "masterpiece, very aesthetic, official art, {1girl}, {silver hair}, smile, forest, grey hair"
        );
        let kinds: Vec<ChangeKind> = result.changes.iter().map(|change| change.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Reorder,
                ChangeKind::Weight,
                ChangeKind::Weight,
                ChangeKind::Repeat,
                ChangeKind::Negative,
            ]
        );
        assert_eq!(result.changes[1].reason, "critical emphasis applied");
        assert_eq!(result.changes[2].reason, "strong emphasis applied");
        assert_eq!(
            result.changes[4].result,
            format!("{} negative tags", result.negatives.len())
        );
        assert!(result.negatives.contains(&"crying".to_string()));
        assert_eq!(result.tokens.status, TokenStatus::Optimal);
    }

    #[test]
    fn test_normalization_is_logged_per_tag() {
        let enhancer = enhancer_with(EnhancementSettingsPatch {
            booru_normalization: Some(true),
            ..plain()
        });
        let result = enhancer.enhance("woods, brunette", false);
        let normalized: Vec<(&str, &str)> = result
            .changes
            .iter()
            .filter(|change| change.kind == ChangeKind::Normalize)
            .map(|change| (change.original.as_str(), change.result.as_str()))
            .collect();
        assert_eq!(
            normalized,
            vec![("woods", "forest"), ("brunette", "brown hair")]
        );
        assert!(result.enhanced.ends_with("brown hair, forest"));
    }

    #[test]
    fn test_preset_injection_is_a_single_reorder() {
        let enhancer = enhancer_with(EnhancementSettingsPatch {
            quality_preset: Some(QualityPreset::Balanced),
            ..plain()
        });
        let result = enhancer.enhance("1girl, smile", false);
        assert_eq!(result.enhanced, "masterpiece, very aesthetic, 1girl, smile");
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].kind, ChangeKind::Reorder);
    }

    #[test]
    fn test_parsed_quality_tags_outside_the_preset_are_dropped() {
        let enhancer = enhancer_with(EnhancementSettingsPatch {
            quality_preset: Some(QualityPreset::Balanced),
            ..plain()
        });
        let result = enhancer.enhance("1girl, best quality", false);
        assert_eq!(result.enhanced, "masterpiece, very aesthetic, 1girl");
    }

    #[test]
    fn test_empty_prompt_only_injects_preset() {
        let enhancer = PromptEnhancer::default();
        let result = enhancer.enhance("", false);
        assert_eq!(
            result.enhanced,
            "masterpiece, very aesthetic, official art"
        );
        assert_eq!(result.changes[0].kind, ChangeKind::Reorder);
        assert_eq!(result.original, "");
    }

    #[test]
    fn test_repetition_skips_variations_already_present() {
        let enhancer = enhancer_with(EnhancementSettingsPatch {
            repetition_level: Some(RepetitionLevel::Strong),
            quality_preset: Some(QualityPreset::Balanced),
            ..plain()
        });
        let result = enhancer.enhance("silver hair, white hair", false);
        let repeated: Vec<&str> = result
            .changes
            .iter()
            .filter(|change| change.kind == ChangeKind::Repeat)
            .map(|change| change.result.as_str())
            .collect();
        // "white hair" is already in the prompt
        assert_eq!(repeated, vec!["grey hair"]);
    }

    #[test]
    fn test_enhance_is_deterministic() {
        let enhancer = PromptEnhancer::default();
        let prompt = "1girl, long hair, large breasts, standing, dramatic lighting";
        assert_eq!(enhancer.enhance(prompt, true), enhancer.enhance(prompt, true));
    }

    #[test]
    fn test_update_and_reset_settings() {
        let mut enhancer = PromptEnhancer::default();
        enhancer.update_settings(EnhancementSettingsPatch {
            auto_weight_level: Some(3.0),
            quality_preset: Some(QualityPreset::Anime),
            ..EnhancementSettingsPatch::default()
        });
        assert_eq!(enhancer.settings().auto_weight_level, MAX_AUTO_WEIGHT_LEVEL);
        assert_eq!(enhancer.settings().quality_preset, QualityPreset::Anime);
        assert!(enhancer.settings().auto_negatives);

        enhancer.reset_settings();
        assert_eq!(enhancer.settings(), &EnhancementSettings::default());
    }

    #[test]
    fn test_non_finite_weight_level_is_ignored() {
        let enhancer = enhancer_with(EnhancementSettingsPatch {
            auto_weight: Some(true),
            auto_weight_level: Some(f64::NAN),
            ..plain()
        });
        assert_eq!(enhancer.settings().auto_weight_level, 1.0);

        let result = enhancer.enhance("silver hair", false);
        assert!(!result.enhanced.contains("NaN"));
        assert!(result.enhanced.contains("{silver hair}"));

        let mut enhancer = enhancer;
        enhancer.update_settings(EnhancementSettingsPatch {
            auto_weight_level: Some(f64::INFINITY),
            ..EnhancementSettingsPatch::default()
        });
        assert_eq!(enhancer.settings().auto_weight_level, 1.0);
    }

    #[test]
    fn test_repetition_reads_tags_before_normalization() {
        let enhancer = enhancer_with(EnhancementSettingsPatch {
            booru_normalization: Some(true),
            repetition_level: Some(RepetitionLevel::Strong),
            smart_repetition: Some(RepetitionSettings {
                level: RepetitionLevel::Strong,
                repeat_hair: false,
                repeat_body: false,
                repeat_clothing: false,
                repeat_pose: true,
            }),
            ..plain()
        });
        let result = enhancer.enhance("seated", false);
        assert!(result.enhanced.contains("sitting"));
        assert!(result
            .changes
            .iter()
            .any(|change| change.kind == ChangeKind::Normalize && change.original == "seated"));
        // "seated" matches no pose keyword, only its normalized form does
        assert!(result
            .changes
            .iter()
            .all(|change| change.kind != ChangeKind::Repeat));
    }

    #[test]
    fn test_settings_round_trip_through_camel_case_json() {
        let json = r#"{"autoWeight":false,"qualityPreset":"anime","smartRepetition":
            {"level":"strong","repeatHair":true,"repeatBody":false,"repeatClothing":true,"repeatPose":false}}"#;
        let settings: EnhancementSettings = serde_json::from_str(json).expect("settings json");
        assert!(!settings.auto_weight);
        assert_eq!(settings.quality_preset, QualityPreset::Anime);
        assert_eq!(settings.smart_repetition.level, RepetitionLevel::Strong);
        // missing fields fall back to defaults
        assert!(settings.booru_normalization);
        assert_eq!(settings.auto_weight_level, 1.0);
    }
}
