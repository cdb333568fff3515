use crate::presets::{model_option, undesired_preset};
use crate::tags::flat_category;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "v45-full")]
    V45Full,
    #[serde(rename = "v45-curated")]
    V45Curated,
}

impl ModelId {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::V45Full => "v45-full",
            ModelId::V45Curated => "v45-curated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "v45-full" => Some(ModelId::V45Full),
            "v45-curated" => Some(ModelId::V45Curated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Guided,
    Random,
    Nsfw,
}

/// The structured tag selection a prompt is built from.
///
/// Field names serialize in camelCase; missing fields take their defaults,
/// so partial configs (templates) deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptConfig {
    pub model: ModelId,
    pub mode: Mode,
    pub dataset_prefix: Option<String>,

    pub gender: Vec<String>,
    pub body_type: Vec<String>,
    pub species: Vec<String>,

    pub hair_color: Vec<String>,
    pub hair_length: Vec<String>,
    pub hair_style: Vec<String>,

    pub eye_color: Vec<String>,
    pub eye_style: Vec<String>,

    pub skin: Vec<String>,

    pub clothing_style: Vec<String>,
    pub outfit_detail: Vec<String>,
    pub accessory: Vec<String>,
    pub weapon: Vec<String>,

    pub pose: Vec<String>,
    pub expression: Vec<String>,
    pub looking: Vec<String>,

    pub composition: Vec<String>,

    pub location: Vec<String>,
    pub time: Vec<String>,
    pub weather: Vec<String>,

    pub lighting: Vec<String>,
    pub effect: Vec<String>,
    pub art_style: Vec<String>,
    pub year_tag: Option<String>,

    pub quality: Vec<String>,

    pub nsfw_body: Vec<String>,
    pub nsfw_clothing: Vec<String>,
    pub nsfw_pose: Vec<String>,
    pub rating: Option<String>,

    pub undesired_preset: String,
    pub custom_undesired: String,

    pub custom_tags: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            model: ModelId::V45Full,
            mode: Mode::Guided,
            dataset_prefix: None,
            gender: Vec::new(),
            body_type: Vec::new(),
            species: Vec::new(),
            hair_color: Vec::new(),
            hair_length: Vec::new(),
            hair_style: Vec::new(),
            eye_color: Vec::new(),
            eye_style: Vec::new(),
            skin: Vec::new(),
            clothing_style: Vec::new(),
            outfit_detail: Vec::new(),
            accessory: Vec::new(),
            weapon: Vec::new(),
            pose: Vec::new(),
            expression: Vec::new(),
            looking: Vec::new(),
            composition: Vec::new(),
            location: Vec::new(),
            time: Vec::new(),
            weather: Vec::new(),
            lighting: Vec::new(),
            effect: Vec::new(),
            art_style: Vec::new(),
            year_tag: None,
            quality: vec!["masterpiece".to_string(), "very aesthetic".to_string()],
            nsfw_body: Vec::new(),
            nsfw_clothing: Vec::new(),
            nsfw_pose: Vec::new(),
            rating: None,
            undesired_preset: "heavy".to_string(),
            custom_undesired: String::new(),
            custom_tags: String::new(),
        }
    }
}

/// Tag-list categories of [`PromptConfig`], by their serialized names.
pub const LIST_CATEGORIES: &[&str] = &[
    "gender",
    "bodyType",
    "species",
    "hairColor",
    "hairLength",
    "hairStyle",
    "eyeColor",
    "eyeStyle",
    "skin",
    "clothingStyle",
    "outfitDetail",
    "accessory",
    "weapon",
    "pose",
    "expression",
    "looking",
    "composition",
    "location",
    "time",
    "weather",
    "lighting",
    "effect",
    "artStyle",
    "quality",
    "nsfwBody",
    "nsfwClothing",
    "nsfwPose",
];

impl PromptConfig {
    /// The tag list behind a serialized category name.
    pub fn list(&self, category: &str) -> Option<&Vec<String>> {
        let list = match category {
            "gender" => &self.gender,
            "bodyType" => &self.body_type,
            "species" => &self.species,
            "hairColor" => &self.hair_color,
            "hairLength" => &self.hair_length,
            "hairStyle" => &self.hair_style,
            "eyeColor" => &self.eye_color,
            "eyeStyle" => &self.eye_style,
            "skin" => &self.skin,
            "clothingStyle" => &self.clothing_style,
            "outfitDetail" => &self.outfit_detail,
            "accessory" => &self.accessory,
            "weapon" => &self.weapon,
            "pose" => &self.pose,
            "expression" => &self.expression,
            "looking" => &self.looking,
            "composition" => &self.composition,
            "location" => &self.location,
            "time" => &self.time,
            "weather" => &self.weather,
            "lighting" => &self.lighting,
            "effect" => &self.effect,
            "artStyle" => &self.art_style,
            "quality" => &self.quality,
            "nsfwBody" => &self.nsfw_body,
            "nsfwClothing" => &self.nsfw_clothing,
            "nsfwPose" => &self.nsfw_pose,
            _ => return None,
        };
        Some(list)
    }

    pub fn list_mut(&mut self, category: &str) -> Option<&mut Vec<String>> {
        let list = match category {
            "gender" => &mut self.gender,
            "bodyType" => &mut self.body_type,
            "species" => &mut self.species,
            "hairColor" => &mut self.hair_color,
            "hairLength" => &mut self.hair_length,
            "hairStyle" => &mut self.hair_style,
            "eyeColor" => &mut self.eye_color,
            "eyeStyle" => &mut self.eye_style,
            "skin" => &mut self.skin,
            "clothingStyle" => &mut self.clothing_style,
            "outfitDetail" => &mut self.outfit_detail,
            "accessory" => &mut self.accessory,
            "weapon" => &mut self.weapon,
            "pose" => &mut self.pose,
            "expression" => &mut self.expression,
            "looking" => &mut self.looking,
            "composition" => &mut self.composition,
            "location" => &mut self.location,
            "time" => &mut self.time,
            "weather" => &mut self.weather,
            "lighting" => &mut self.lighting,
            "effect" => &mut self.effect,
            "artStyle" => &mut self.art_style,
            "quality" => &mut self.quality,
            "nsfwBody" => &mut self.nsfw_body,
            "nsfwClothing" => &mut self.nsfw_clothing,
            "nsfwPose" => &mut self.nsfw_pose,
            _ => return None,
        };
        Some(list)
    }

    /// Every selected tag across all list categories.
    pub fn selected_tags(&self) -> Vec<String> {
        LIST_CATEGORIES
            .iter()
            .filter_map(|category| self.list(category))
            .flatten()
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub model: String,
    pub guidance: f64,
    pub steps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub config: PromptConfig,
    pub main_prompt: String,
    pub undesired_content: String,
    pub model_settings: ModelSettings,
}

/// Joins the selection in prompt order; blank parts are dropped.
pub fn build_prompt(config: &PromptConfig) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(prefix) = &config.dataset_prefix {
        parts.push(prefix);
    }

    let ordered: [&Vec<String>; 26] = [
        &config.gender,
        &config.body_type,
        &config.species,
        &config.hair_color,
        &config.hair_length,
        &config.hair_style,
        &config.eye_color,
        &config.eye_style,
        &config.skin,
        &config.nsfw_body,
        &config.clothing_style,
        &config.outfit_detail,
        &config.nsfw_clothing,
        &config.accessory,
        &config.weapon,
        &config.pose,
        &config.nsfw_pose,
        &config.expression,
        &config.looking,
        &config.composition,
        &config.location,
        &config.time,
        &config.weather,
        &config.lighting,
        &config.effect,
        &config.art_style,
    ];
    for list in ordered {
        parts.extend(list.iter().map(String::as_str));
    }

    if let Some(year) = &config.year_tag {
        parts.push(year);
    }
    parts.extend(config.quality.iter().map(String::as_str));
    if let Some(rating) = &config.rating {
        parts.push(rating);
    }
    parts.push(config.custom_tags.trim());

    parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Preset undesired tags followed by the user's own additions.
pub fn undesired_content(config: &PromptConfig) -> String {
    let preset = undesired_preset(&config.undesired_preset)
        .map(|preset| preset.tags)
        .unwrap_or("");
    let custom = config.custom_undesired.trim();

    match (preset.is_empty(), custom.is_empty()) {
        (_, true) => preset.to_string(),
        (true, false) => custom.to_string(),
        (false, false) => format!("{}, {}", preset, custom),
    }
}

/// Recommended sampler settings for the selected model.
pub fn model_settings(config: &PromptConfig) -> ModelSettings {
    let model = model_option(config.model.as_str());
    ModelSettings {
        model: model.name.to_string(),
        guidance: f64::from(model.recommended_guidance.default),
        steps: model.recommended_steps.default,
    }
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push(HEX[(byte >> 4) as usize] as char);
        output.push(HEX[(byte & 0x0f) as usize] as char);
    }
    output
}

/// A short unique id derived from time, a process counter and `seed`.
pub fn generate_id(seed: &str, timestamp_ms: i64) -> String {
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut hasher = Sha256::new();
    hasher.update(timestamp_ms.to_le_bytes());
    hasher.update(counter.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(seed.as_bytes());
    let mut hex = hex_encode(&hasher.finalize()[..]);
    hex.truncate(24);
    hex
}

/// Snapshots the current selection as a finished prompt.
pub fn generate_prompt(config: &PromptConfig, now: DateTime<Utc>) -> GeneratedPrompt {
    let timestamp = now.timestamp_millis();
    let main_prompt = build_prompt(config);
    GeneratedPrompt {
        id: generate_id(&main_prompt, timestamp),
        timestamp,
        config: config.clone(),
        undesired_content: undesired_content(config),
        model_settings: model_settings(config),
        main_prompt,
    }
}

/// Adds `tag` to a list category, or removes it if already selected.
///
/// Returns false when `category` is not a list category.
pub fn toggle_tag(config: &mut PromptConfig, category: &str, tag: &str) -> bool {
    let Some(list) = config.list_mut(category) else {
        return false;
    };
    match list.iter().position(|existing| existing == tag) {
        Some(index) => {
            list.remove(index);
        }
        None => list.push(tag.to_string()),
    }
    true
}

fn random_tags<R: Rng + ?Sized>(
    source: &str,
    count: usize,
    nsfw: bool,
    rng: &mut R,
) -> Vec<String> {
    flat_category(source, nsfw)
        .choose_multiple(rng, count)
        .map(|tag| tag.name.to_string())
        .collect()
}

fn random_tag<R: Rng + ?Sized>(source: &str, nsfw: bool, rng: &mut R) -> Vec<String> {
    random_tags(source, 1, nsfw, rng)
}

/// Replaces each named category with one or two random catalog tags.
///
/// Names that are not both a catalog selection category and a list field
/// of the config are skipped.
pub fn randomize_categories<R: Rng + ?Sized>(
    config: &mut PromptConfig,
    categories: &[&str],
    nsfw: bool,
    rng: &mut R,
) {
    for category in categories {
        if config.list(category).is_none() || flat_category(category, true).is_empty() {
            continue;
        }
        let count = rng.gen_range(1..=2);
        let picked = random_tags(category, count, nsfw, rng);
        if let Some(list) = config.list_mut(category) {
            *list = picked;
        }
    }
}

/// Builds a fresh, fully random selection.
pub fn generate_full_random<R: Rng + ?Sized>(nsfw: bool, rng: &mut R) -> PromptConfig {
    let mut config = PromptConfig {
        mode: Mode::Random,
        ..PromptConfig::default()
    };

    config.gender = random_tag("gender", nsfw, rng);
    if rng.gen::<f64>() > 0.5 {
        config.body_type = random_tag("bodyType", nsfw, rng);
    }
    if rng.gen::<f64>() > 0.7 {
        config.species = random_tag("species", nsfw, rng);
    }

    config.hair_color = random_tag("hairColor", nsfw, rng);
    config.hair_length = random_tag("hairLength", nsfw, rng);
    if rng.gen::<f64>() > 0.5 {
        config.hair_style = random_tag("hairStyle", nsfw, rng);
    }

    config.eye_color = random_tag("eyeColor", nsfw, rng);

    let count = rng.gen_range(1..=2);
    config.clothing_style = random_tags("clothingStyle", count, nsfw, rng);
    if rng.gen::<f64>() > 0.6 {
        let count = rng.gen_range(1..=2);
        config.accessory = random_tags("accessory", count, nsfw, rng);
    }

    let pose_roll: f64 = rng.gen();
    let pose_source = if pose_roll < 0.6 {
        "standingPose"
    } else if pose_roll < 0.85 {
        "sittingPose"
    } else {
        "lyingPose"
    };
    config.pose = random_tag(pose_source, nsfw, rng);

    config.expression = random_tag("expression", nsfw, rng);
    config.looking = random_tag("looking", nsfw, rng);
    config.composition = random_tag("composition", nsfw, rng);

    let location_source = if rng.gen::<f64>() > 0.5 {
        "indoorLocation"
    } else {
        "outdoorLocation"
    };
    config.location = random_tag(location_source, nsfw, rng);

    if rng.gen::<f64>() > 0.6 {
        config.time = random_tag("time", nsfw, rng);
    }
    if rng.gen::<f64>() > 0.8 {
        config.weather = random_tag("weather", nsfw, rng);
    }

    let count = rng.gen_range(1..=2);
    config.lighting = random_tags("lighting", count, nsfw, rng);

    if rng.gen::<f64>() > 0.7 {
        config.effect = random_tag("effect", nsfw, rng);
    }
    if rng.gen::<f64>() > 0.5 {
        config.art_style = random_tag("artStyle", nsfw, rng);
    }

    if nsfw {
        config.mode = Mode::Nsfw;
        let count = rng.gen_range(1..=2);
        config.nsfw_body = random_tags("nsfwBody", count, true, rng);
        if rng.gen::<f64>() > 0.5 {
            config.nsfw_clothing = random_tag("nsfwClothing", true, rng);
        }
        config.rating = Some(if rng.gen::<f64>() > 0.5 {
            "rating:explicit".to_string()
        } else {
            "rating:questionable".to_string()
        });
        config.undesired_preset = "nsfw-heavy".to_string();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::FlatTag;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_build_prompt_orders_parts() {
        let config = PromptConfig {
            dataset_prefix: Some("fur dataset".to_string()),
            gender: vec!["1girl".to_string()],
            hair_color: vec!["silver hair".to_string()],
            nsfw_body: vec!["wide hips".to_string()],
            clothing_style: vec!["dress".to_string()],
            year_tag: Some("year 2024".to_string()),
            rating: Some("rating:general".to_string()),
            custom_tags: "  glowing sword  ".to_string(),
            ..PromptConfig::default()
        };
        assert_eq!(
            build_prompt(&config),
            "fur dataset, 1girl, silver hair, wide hips, dress, year 2024, masterpiece, \
             very aesthetic, rating:general, glowing sword"
        );
    }

    #[test]
    fn test_build_prompt_drops_blank_parts() {
        let config = PromptConfig {
            gender: vec!["".to_string(), "1boy".to_string()],
            quality: Vec::new(),
            custom_tags: "   ".to_string(),
            ..PromptConfig::default()
        };
        assert_eq!(build_prompt(&config), "1boy");
    }

    #[test]
    fn test_undesired_content_combines_preset_and_custom() {
        let mut config = PromptConfig {
            undesired_preset: "none".to_string(),
            custom_undesired: " extra arms ".to_string(),
            ..PromptConfig::default()
        };
        assert_eq!(undesired_content(&config), "extra arms");

        config.undesired_preset = "light".to_string();
        let content = undesired_content(&config);
        assert!(content.starts_with("lowres, artistic error"));
        assert!(content.ends_with("blank page, extra arms"));

        config.undesired_preset = "unknown".to_string();
        config.custom_undesired.clear();
        assert_eq!(undesired_content(&config), "");
    }

    #[test]
    fn test_model_settings_use_recommended_defaults() {
        let config = PromptConfig {
            model: ModelId::V45Curated,
            ..PromptConfig::default()
        };
        let settings = model_settings(&config);
        assert_eq!(settings.model, "V4.5 Curated");
        assert_eq!(settings.guidance, 5.0);
        assert_eq!(settings.steps, 28);
    }

    #[test]
    fn test_generate_prompt_snapshots_config() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let config = PromptConfig {
            gender: vec!["1girl".to_string()],
            ..PromptConfig::default()
        };
        let first = generate_prompt(&config, now);
        let second = generate_prompt(&config, now);
        assert_eq!(first.timestamp, now.timestamp_millis());
        assert_eq!(first.main_prompt, "1girl, masterpiece, very aesthetic");
        assert_eq!(first.config, config);
        assert_eq!(first.id.len(), 24);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_toggle_tag_adds_and_removes() {
        let mut config = PromptConfig::default();
        assert!(toggle_tag(&mut config, "hairColor", "blue hair"));
        assert_eq!(config.hair_color, vec!["blue hair"]);
        assert!(toggle_tag(&mut config, "hairColor", "blue hair"));
        assert!(config.hair_color.is_empty());
        assert!(!toggle_tag(&mut config, "customTags", "x"));
    }

    #[test]
    fn test_randomize_categories_only_touches_named_lists() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut config = PromptConfig::default();
        randomize_categories(
            &mut config,
            &["hairColor", "standingPose", "nsfwBody"],
            false,
            &mut rng,
        );

        let colors: Vec<FlatTag> = flat_category("hairColor", false);
        assert!((1..=2).contains(&config.hair_color.len()));
        assert!(config
            .hair_color
            .iter()
            .all(|tag| colors.iter().any(|known| known.name == tag.as_str())));
        // nsfw tags are filtered out entirely
        assert!(config.nsfw_body.is_empty());
        assert!(config.pose.is_empty());
        assert!(config.eye_color.is_empty());
    }

    #[test]
    fn test_full_random_respects_nsfw_flag() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let config = generate_full_random(false, &mut rng);
            assert_eq!(config.gender.len(), 1);
            assert_eq!(config.hair_color.len(), 1);
            assert_eq!(config.pose.len(), 1);
            assert!(config.nsfw_body.is_empty());
            assert!(config.rating.is_none());
            assert_eq!(config.undesired_preset, "heavy");
            assert_eq!(config.quality, vec!["masterpiece", "very aesthetic"]);
        }

        let config = generate_full_random(true, &mut rng);
        assert_eq!(config.mode, Mode::Nsfw);
        assert!(!config.nsfw_body.is_empty());
        assert_eq!(config.undesired_preset, "nsfw-heavy");
        assert!(matches!(
            config.rating.as_deref(),
            Some("rating:explicit") | Some("rating:questionable")
        ));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: PromptConfig =
            serde_json::from_str(r#"{"hairColor":["pink hair"],"model":"v45-curated"}"#)
                .expect("partial config");
        assert_eq!(config.hair_color, vec!["pink hair"]);
        assert_eq!(config.model, ModelId::V45Curated);
        assert_eq!(config.undesired_preset, "heavy");
        assert_eq!(config.quality, vec!["masterpiece", "very aesthetic"]);
    }
}
