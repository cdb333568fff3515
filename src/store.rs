//! Persisted user state: generation history, saved templates, app settings
//! and enhancer settings.
//!
//! Every store keeps its value in memory and rewrites the whole JSON document
//! under its key after each mutation. A missing or unreadable document loads
//! as the default; a failed write is logged and the in-memory state is kept.

use crate::database::KeyValueStore;
use crate::enhancer::{EnhancementSettings, EnhancementSettingsPatch};
use crate::generator::{generate_id, GeneratedPrompt, ModelId, PromptConfig};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const HISTORY_KEY: &str = "mipref_history";
pub const TEMPLATES_KEY: &str = "mipref_templates";
pub const SETTINGS_KEY: &str = "mipref_settings";
pub const ENHANCER_SETTINGS_KEY: &str = "mipref_enhancer_settings";

pub const STORE_KEYS: [&str; 4] = [
    HISTORY_KEY,
    TEMPLATES_KEY,
    SETTINGS_KEY,
    ENHANCER_SETTINGS_KEY,
];

pub const MAX_HISTORY: usize = 100;

pub type SharedStore = Arc<dyn KeyValueStore>;

fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let content = match store.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return T::default(),
        Err(error) => {
            log::warn!("Failed to read {}: {}", key, error);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(error) => {
            log::warn!("Discarding unreadable {} ({}), using defaults", key, error);
            T::default()
        }
    }
}

pub(crate) fn persist_value<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let payload = serde_json::to_string(value)
        .map_err(|error| format!("Failed to serialize {}: {}", key, error))?;

    store
        .set(key, &payload)
        .map_err(|error| format!("Failed to save {}: {}", key, error))
}

fn persist_or_log<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(error) = persist_value(store, key, value) {
        log::error!("{}", error);
    }
}

// ────────────────────────── History ──────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub prompt: GeneratedPrompt,
    pub timestamp: i64,
    #[serde(default)]
    pub favorite: bool,
}

impl HistoryEntry {
    pub fn new(prompt: GeneratedPrompt, now: DateTime<Utc>) -> Self {
        let timestamp = now.timestamp_millis();
        Self {
            id: prompt.id.clone(),
            prompt,
            timestamp,
            favorite: false,
        }
    }
}

pub struct HistoryStore {
    store: SharedStore,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn load(store: SharedStore) -> Self {
        let entries = load_or_default(store.as_ref(), HISTORY_KEY);
        Self { store, entries }
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn favorites(&self) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|entry| entry.favorite).collect()
    }

    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
        self.persist();
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Flips the favorite flag; returns the new value, or `None` for an unknown id.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|entry| entry.id == id)?;
        entry.favorite = !entry.favorite;
        let favorite = entry.favorite;
        self.persist();
        Some(favorite)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        persist_or_log(self.store.as_ref(), HISTORY_KEY, &self.entries);
    }
}

// ────────────────────────── Templates ──────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Partial documents deserialize with unspecified fields at their defaults.
    #[serde(default)]
    pub config: PromptConfig,
    pub created_at: i64,
    pub updated_at: i64,
}

impl SavedTemplate {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        config: PromptConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let timestamp = now.timestamp_millis();
        Self {
            id: generate_id(&name, timestamp),
            name,
            description: description.into(),
            config,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

pub struct TemplateStore {
    store: SharedStore,
    templates: Vec<SavedTemplate>,
}

impl TemplateStore {
    pub fn load(store: SharedStore) -> Self {
        let templates = load_or_default(store.as_ref(), TEMPLATES_KEY);
        Self { store, templates }
    }

    pub fn list(&self) -> &[SavedTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&SavedTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Looks a template up by id, falling back to a case-insensitive name match.
    pub fn find(&self, id_or_name: &str) -> Option<&SavedTemplate> {
        self.get(id_or_name).or_else(|| {
            self.templates
                .iter()
                .find(|template| template.name.eq_ignore_ascii_case(id_or_name))
        })
    }

    /// Replaces the template with the same id in place, or appends it.
    pub fn save(&mut self, template: SavedTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
        self.persist();
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        let removed = self.templates.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        persist_or_log(self.store.as_ref(), TEMPLATES_KEY, &self.templates);
    }
}

// ────────────────────────── App settings ──────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub nsfw_enabled: bool,
    pub nsfw_confirmed: bool,
    pub default_model: ModelId,
    pub default_undesired_preset: String,
    pub default_guidance: f64,
    pub default_steps: u32,
    pub show_token_count: bool,
    pub compact_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            nsfw_enabled: false,
            nsfw_confirmed: false,
            default_model: ModelId::V45Full,
            default_undesired_preset: "heavy".to_string(),
            default_guidance: 5.0,
            default_steps: 28,
            show_token_count: true,
            compact_mode: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettingsPatch {
    pub nsfw_enabled: Option<bool>,
    pub nsfw_confirmed: Option<bool>,
    pub default_model: Option<ModelId>,
    pub default_undesired_preset: Option<String>,
    pub default_guidance: Option<f64>,
    pub default_steps: Option<u32>,
    pub show_token_count: Option<bool>,
    pub compact_mode: Option<bool>,
}

impl AppSettings {
    pub fn apply(&mut self, patch: AppSettingsPatch) {
        if let Some(value) = patch.nsfw_enabled {
            self.nsfw_enabled = value;
        }
        if let Some(value) = patch.nsfw_confirmed {
            self.nsfw_confirmed = value;
        }
        if let Some(value) = patch.default_model {
            self.default_model = value;
        }
        if let Some(value) = patch.default_undesired_preset {
            self.default_undesired_preset = value;
        }
        if let Some(value) = patch.default_guidance {
            self.default_guidance = value;
        }
        if let Some(value) = patch.default_steps {
            self.default_steps = value;
        }
        if let Some(value) = patch.show_token_count {
            self.show_token_count = value;
        }
        if let Some(value) = patch.compact_mode {
            self.compact_mode = value;
        }
    }
}

pub struct SettingsStore {
    store: SharedStore,
    settings: AppSettings,
}

impl SettingsStore {
    pub fn load(store: SharedStore) -> Self {
        let settings = load_or_default(store.as_ref(), SETTINGS_KEY);
        Self { store, settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn update(&mut self, patch: AppSettingsPatch) {
        self.settings.apply(patch);
        self.persist();
    }

    pub fn reset(&mut self) {
        self.settings = AppSettings::default();
        self.persist();
    }

    pub fn enable_nsfw(&mut self) {
        self.settings.nsfw_enabled = true;
        self.settings.nsfw_confirmed = true;
        self.persist();
    }

    /// Leaves `nsfw_confirmed` set so re-enabling skips the age gate.
    pub fn disable_nsfw(&mut self) {
        self.settings.nsfw_enabled = false;
        self.persist();
    }

    fn persist(&self) {
        persist_or_log(self.store.as_ref(), SETTINGS_KEY, &self.settings);
    }
}

// ────────────────────────── Enhancer settings ──────────────────────────

pub struct EnhancerSettingsStore {
    store: SharedStore,
    settings: EnhancementSettings,
}

impl EnhancerSettingsStore {
    pub fn load(store: SharedStore) -> Self {
        let settings = load_or_default(store.as_ref(), ENHANCER_SETTINGS_KEY);
        Self { store, settings }
    }

    pub fn settings(&self) -> &EnhancementSettings {
        &self.settings
    }

    pub fn save(&mut self, settings: EnhancementSettings) {
        self.settings = settings;
        self.persist();
    }

    pub fn update(&mut self, patch: EnhancementSettingsPatch) {
        self.settings.apply(patch);
        self.persist();
    }

    pub fn reset(&mut self) {
        self.save(EnhancementSettings::default());
    }

    fn persist(&self) {
        persist_or_log(self.store.as_ref(), ENHANCER_SETTINGS_KEY, &self.settings);
    }
}

/// All persisted state, opened over one backing store.
pub struct Workspace {
    pub history: HistoryStore,
    pub templates: TemplateStore,
    pub settings: SettingsStore,
    pub enhancer: EnhancerSettingsStore,
}

impl Workspace {
    pub fn open(store: SharedStore) -> Self {
        Self {
            history: HistoryStore::load(Arc::clone(&store)),
            templates: TemplateStore::load(Arc::clone(&store)),
            settings: SettingsStore::load(Arc::clone(&store)),
            enhancer: EnhancerSettingsStore::load(store),
        }
    }
}

// ────────────────────────── Local storage import ──────────────────────────

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: Vec<String>,
    pub skipped_existing: Vec<String>,
    pub skipped_unknown: Vec<String>,
    pub failed: Vec<String>,
}

fn validate_value(key: &str, value: &serde_json::Value) -> Result<(), String> {
    fn check<T: DeserializeOwned>(value: &serde_json::Value) -> Result<(), String> {
        T::deserialize(value)
            .map(|_| ())
            .map_err(|error| error.to_string())
    }

    match key {
        HISTORY_KEY => check::<Vec<HistoryEntry>>(value),
        TEMPLATES_KEY => check::<Vec<SavedTemplate>>(value),
        SETTINGS_KEY => check::<AppSettings>(value),
        ENHANCER_SETTINGS_KEY => check::<EnhancementSettings>(value),
        _ => Err(format!("unknown key {}", key)),
    }
}

/// Copies a browser local-storage dump into the store.
///
/// Each value may be the JSON-encoded string local storage holds or the
/// inline document. Values that would not load as their store type are
/// rejected; existing keys are kept unless `overwrite` is set.
pub fn import_local_storage(
    store: &dyn KeyValueStore,
    dump: &serde_json::Map<String, serde_json::Value>,
    overwrite: bool,
    dry_run: bool,
) -> crate::error::Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for (key, raw) in dump {
        if !STORE_KEYS.contains(&key.as_str()) {
            summary.skipped_unknown.push(key.clone());
            continue;
        }

        let value = match raw {
            serde_json::Value::String(encoded) => match serde_json::from_str(encoded) {
                Ok(value) => value,
                Err(error) => {
                    log::warn!("Skipping {}: value is not JSON ({})", key, error);
                    summary.failed.push(key.clone());
                    continue;
                }
            },
            inline => inline.clone(),
        };

        if let Err(error) = validate_value(key, &value) {
            log::warn!("Skipping {}: {}", key, error);
            summary.failed.push(key.clone());
            continue;
        }

        if !overwrite && store.get(key)?.is_some() {
            summary.skipped_existing.push(key.clone());
            continue;
        }

        if !dry_run {
            store.set(key, &serde_json::to_string(&value)?)?;
        }
        summary.imported.push(key.clone());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Database, MemoryStore};
    use crate::generator::generate_prompt;
    use crate::presets::QualityPreset;
    use chrono::TimeZone;

    fn memory() -> SharedStore {
        Arc::new(MemoryStore::new())
    }

    fn entry(label: &str, millis: i64) -> HistoryEntry {
        let now = Utc
            .timestamp_millis_opt(millis)
            .single()
            .expect("valid timestamp");
        let mut config = PromptConfig::default();
        config.custom_tags = label.to_string();
        HistoryEntry::new(generate_prompt(&config, now), now)
    }

    #[test]
    fn test_history_keeps_newest_hundred() {
        let store = memory();
        let mut history = HistoryStore::load(Arc::clone(&store));
        for index in 0..101 {
            history.add(entry(&format!("tag{}", index), 1_700_000_000_000 + index));
        }

        assert_eq!(history.entries().len(), MAX_HISTORY);
        assert!(history.entries()[0].prompt.main_prompt.contains("tag100"));
        assert!(history.entries()[99].prompt.main_prompt.contains("tag1"));
        assert!(history
            .entries()
            .iter()
            .all(|e| !e.prompt.main_prompt.ends_with("tag0")));

        let reloaded = HistoryStore::load(store);
        assert_eq!(reloaded.entries(), history.entries());
    }

    #[test]
    fn test_history_entry_reuses_prompt_id() {
        let saved = entry("1girl", 1_700_000_000_000);
        assert_eq!(saved.id, saved.prompt.id);

        let mut history = HistoryStore::load(memory());
        let id = saved.prompt.id.clone();
        history.add(saved);
        assert_eq!(history.toggle_favorite(&id), Some(true));
    }

    #[test]
    fn test_history_favorite_and_remove() {
        let store = memory();
        let mut history = HistoryStore::load(Arc::clone(&store));
        let first = entry("first", 1);
        let second = entry("second", 2);
        let first_id = first.id.clone();
        let second_id = second.id.clone();
        history.add(first);
        history.add(second);

        assert_eq!(history.toggle_favorite(&first_id), Some(true));
        assert_eq!(history.toggle_favorite("missing"), None);
        assert_eq!(history.favorites().len(), 1);
        assert_eq!(history.favorites()[0].id, first_id);

        assert!(history.remove(&second_id));
        assert!(!history.remove(&second_id));
        assert!(history.get(&second_id).is_none());

        let reloaded = HistoryStore::load(Arc::clone(&store));
        assert_eq!(reloaded.entries().len(), 1);
        assert!(reloaded.entries()[0].favorite);

        history.clear();
        assert!(HistoryStore::load(store).entries().is_empty());
    }

    #[test]
    fn test_template_save_upserts_by_id() {
        let store = memory();
        let mut templates = TemplateStore::load(Arc::clone(&store));
        let now = Utc::now();
        let mut template = SavedTemplate::new("Knight", "armored", PromptConfig::default(), now);
        templates.save(template.clone());
        templates.save(SavedTemplate::new("Mage", "", PromptConfig::default(), now));

        template.description = "heavy armor".to_string();
        templates.save(template.clone());
        assert_eq!(templates.list().len(), 2);
        assert_eq!(templates.list()[0].description, "heavy armor");
        assert_eq!(templates.find("mage").map(|t| t.name.as_str()), Some("Mage"));

        assert!(templates.delete(&template.id));
        let reloaded = TemplateStore::load(store);
        assert_eq!(reloaded.list().len(), 1);
        assert!(reloaded.get(&template.id).is_none());
    }

    #[test]
    fn test_template_with_partial_config_loads() {
        let store = memory();
        store
            .set(
                TEMPLATES_KEY,
                r#"[{"id":"t1","name":"Partial","description":"","config":{"hairColor":["silver hair"]},"createdAt":1,"updatedAt":2}]"#,
            )
            .unwrap();

        let templates = TemplateStore::load(store);
        let template = templates.get("t1").expect("template should load");
        assert_eq!(template.config.hair_color, vec!["silver hair".to_string()]);
        assert_eq!(template.config.undesired_preset, "heavy");
    }

    #[test]
    fn test_settings_nsfw_toggles() {
        let store = memory();
        let mut settings = SettingsStore::load(Arc::clone(&store));
        assert_eq!(settings.settings(), &AppSettings::default());

        settings.enable_nsfw();
        settings.disable_nsfw();
        let reloaded = SettingsStore::load(Arc::clone(&store));
        assert!(!reloaded.settings().nsfw_enabled);
        assert!(reloaded.settings().nsfw_confirmed);

        settings.update(AppSettingsPatch {
            default_steps: Some(40),
            compact_mode: Some(true),
            ..Default::default()
        });
        assert_eq!(settings.settings().default_steps, 40);
        assert!(settings.settings().compact_mode);
        assert_eq!(settings.settings().default_guidance, 5.0);

        settings.reset();
        assert_eq!(SettingsStore::load(store).settings(), &AppSettings::default());
    }

    #[test]
    fn test_unreadable_value_falls_back_to_default() {
        let store = memory();
        store.set(SETTINGS_KEY, "{not json").unwrap();
        store.set(HISTORY_KEY, "42").unwrap();

        let workspace = Workspace::open(store);
        assert_eq!(workspace.settings.settings(), &AppSettings::default());
        assert!(workspace.history.entries().is_empty());
    }

    #[test]
    fn test_settings_accept_original_camel_case_document() {
        let store = memory();
        store
            .set(
                SETTINGS_KEY,
                r#"{"nsfwEnabled":true,"nsfwConfirmed":true,"defaultModel":"v45-curated","defaultSteps":35}"#,
            )
            .unwrap();

        let settings = SettingsStore::load(store);
        assert!(settings.settings().nsfw_enabled);
        assert_eq!(settings.settings().default_model, ModelId::V45Curated);
        assert_eq!(settings.settings().default_steps, 35);
        assert!(settings.settings().show_token_count);
    }

    #[test]
    fn test_enhancer_settings_persist_on_sqlite() {
        let db: SharedStore =
            Arc::new(Database::open_in_memory().expect("failed to create in-memory db"));
        let mut enhancer = EnhancerSettingsStore::load(Arc::clone(&db));
        enhancer.update(EnhancementSettingsPatch {
            quality_preset: Some(QualityPreset::Anime),
            auto_negatives: Some(false),
            ..Default::default()
        });

        let reloaded = EnhancerSettingsStore::load(Arc::clone(&db));
        assert_eq!(reloaded.settings().quality_preset, QualityPreset::Anime);
        assert!(!reloaded.settings().auto_negatives);

        enhancer.reset();
        assert_eq!(
            EnhancerSettingsStore::load(db).settings(),
            &EnhancementSettings::default()
        );
    }

    #[test]
    fn test_import_accepts_encoded_and_inline_values() {
        let store = memory();
        store.set(TEMPLATES_KEY, "[]").unwrap();
        let dump: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
            r#"{
                "mipref_settings": "{\"nsfwEnabled\":true}",
                "mipref_history": [],
                "mipref_templates": [],
                "mipref_enhancer_settings": "not json",
                "theme": "dark"
            }"#,
        )
        .unwrap();

        let summary = import_local_storage(store.as_ref(), &dump, false, false).unwrap();
        assert_eq!(summary.skipped_existing, vec![TEMPLATES_KEY.to_string()]);
        assert_eq!(summary.skipped_unknown, vec!["theme".to_string()]);
        assert_eq!(summary.failed, vec![ENHANCER_SETTINGS_KEY.to_string()]);
        assert_eq!(summary.imported.len(), 2);

        let workspace = Workspace::open(store);
        assert!(workspace.settings.settings().nsfw_enabled);
    }

    #[test]
    fn test_import_rejects_wrong_shape_and_honors_dry_run() {
        let store = memory();
        let dump: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
            r#"{ "mipref_history": {"not": "a list"}, "mipref_settings": {"defaultSteps": 40} }"#,
        )
        .unwrap();

        let summary = import_local_storage(store.as_ref(), &dump, true, true).unwrap();
        assert_eq!(summary.failed, vec![HISTORY_KEY.to_string()]);
        assert_eq!(summary.imported, vec![SETTINGS_KEY.to_string()]);
        assert!(store.keys().unwrap().is_empty());
    }
}
