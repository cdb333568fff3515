use crate::{
    database::{Database, MemoryStore},
    enhancer::{EnhancedPrompt, EnhancementSettings, EnhancementSettingsPatch, PromptEnhancer},
    error::{MiprefError, Result},
    export::{export_history, format_clipboard_text, ExportFormat},
    generator::{
        generate_full_random, generate_prompt, randomize_categories, toggle_tag, GeneratedPrompt,
        ModelId, PromptConfig,
    },
    negatives::generate_negatives,
    normalizer::{normalize_tags, suggestions_for, variations_of},
    parser::{self, Bucket, DEFAULT_TOKEN_TARGET},
    presets::{
        random_preset, style_preset, QualityPreset, EMPHASIS_EXAMPLES, GENERATION_MODES,
        MODEL_OPTIONS, QUALITY_PRESETS, RANDOM_PRESETS, STYLE_PRESETS, UNDESIRED_PRESETS,
    },
    repetition::RepetitionLevel,
    store::{AppSettingsPatch, HistoryEntry, SavedTemplate, SharedStore, Workspace},
    tags::{self, SearchOptions},
    tokens::{estimate_tokens, estimate_tokens_by_words, token_budget},
    undo::UndoRedo,
    weighting::apply_auto_weighting,
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DB_FILE: &str = "mipref.db";

/// Tag-based prompt builder and enhancer for anime image generation
#[derive(Debug, Parser)]
#[command(name = "mipref", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the prompt store (overrides MIPREF_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full enhancement pipeline on a prompt
    Enhance(EnhanceArgs),
    /// Show how a prompt's tags are classified
    Parse(PromptArgs),
    /// Rewrite tags to their canonical booru form
    Normalize(PromptArgs),
    /// Generate the negative prompt for a prompt
    Negatives(NegativesArgs),
    /// Show the emphasis each tag would receive
    Weight(WeightArgs),
    /// Estimate the token cost of a prompt
    Tokens(PromptArgs),
    /// Drop low-priority tags until a prompt fits a token target
    Truncate(TruncateArgs),
    /// Build a prompt from tag selections or a template
    Build(BuildArgs),
    /// Generate a random prompt
    Random(RandomArgs),
    /// Enhance one prompt per input line in parallel
    Batch(BatchArgs),
    /// Edit a prompt interactively with undo and redo
    Session(SessionArgs),
    /// Browse and manage generation history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// Manage saved templates
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },
    /// Show or change application settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Show or change enhancer settings
    Enhancer {
        #[command(subcommand)]
        command: EnhancerCommand,
    },
    /// Query the tag catalog
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },
    /// List quality, undesired, model, style and random presets
    Presets(PresetsArgs),
}

/// A prompt given inline, or read from stdin when omitted.
#[derive(Debug, Clone, Args)]
pub struct PromptArgs {
    /// Comma-separated prompt
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,
}

/// Global flags shared by every handler.
pub struct CommandContext {
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
    pub json: bool,
}

impl CommandContext {
    fn open_store(&self) -> Result<SharedStore> {
        if self.ephemeral {
            log::debug!("Using in-memory store");
            return Ok(Arc::new(MemoryStore::new()));
        }

        let data_dir = crate::resolve_data_dir(self.data_dir.as_deref())?;
        std::fs::create_dir_all(&data_dir)?;
        let db = Database::new(&data_dir.join(DB_FILE))?;
        Ok(Arc::new(db))
    }

    fn workspace(&self) -> Result<Workspace> {
        Ok(Workspace::open(self.open_store()?))
    }
}

/// Dispatches a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let ctx = CommandContext {
        data_dir: cli.data_dir,
        ephemeral: cli.ephemeral,
        json: cli.json,
    };

    match cli.command {
        Command::Enhance(args) => run_enhance(&ctx, args),
        Command::Parse(args) => run_parse(&ctx, args),
        Command::Normalize(args) => run_normalize(&ctx, args),
        Command::Negatives(args) => run_negatives(&ctx, args),
        Command::Weight(args) => run_weight(&ctx, args),
        Command::Tokens(args) => run_tokens(&ctx, args),
        Command::Truncate(args) => run_truncate(&ctx, args),
        Command::Build(args) => run_build(&ctx, args),
        Command::Random(args) => run_random(&ctx, args),
        Command::Batch(args) => run_batch(&ctx, args),
        Command::Session(args) => run_session_command(&ctx, args),
        Command::History { command } => run_history(&ctx, command),
        Command::Template { command } => run_template(&ctx, command),
        Command::Settings { command } => run_settings(&ctx, command),
        Command::Enhancer { command } => run_enhancer(&ctx, command),
        Command::Tags { command } => run_tags(&ctx, command),
        Command::Presets(args) => run_presets(&ctx, args),
    }
}

fn read_prompt(prompt: Option<String>) -> Result<String> {
    if let Some(prompt) = prompt {
        return Ok(prompt);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Reads a YAML or JSON document; YAML is a superset, so one parser covers both.
fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

fn parse_model(value: &str) -> std::result::Result<ModelId, String> {
    ModelId::parse(value).ok_or_else(|| {
        format!(
            "Unknown model '{}'. Use 'v45-full' or 'v45-curated'.",
            value
        )
    })
}

fn parse_repetition_level(value: &str) -> std::result::Result<RepetitionLevel, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Ok(RepetitionLevel::None),
        "light" => Ok(RepetitionLevel::Light),
        "medium" => Ok(RepetitionLevel::Medium),
        "strong" => Ok(RepetitionLevel::Strong),
        other => Err(format!(
            "Unknown repetition level '{}'. Use none, light, medium or strong.",
            other
        )),
    }
}

fn parse_weight_level(value: &str) -> std::result::Result<f64, String> {
    let level: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Expected a number, got '{}'", value))?;
    if !level.is_finite() {
        return Err(format!("Weight level must be a finite number, got '{}'", value));
    }
    Ok(level)
}

fn parse_switch(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("Expected on/off, got '{}'", other)),
    }
}

fn require_nsfw_enabled(workspace: &Workspace) -> Result<()> {
    if workspace.settings.settings().nsfw_enabled {
        return Ok(());
    }
    Err(MiprefError::InvalidInput(
        "NSFW content is disabled. Enable it with `mipref settings nsfw on`.".to_string(),
    ))
}

include!("commands/prompt.rs");

include!("commands/generate.rs");

include!("commands/batch.rs");

include!("commands/session.rs");

include!("commands/library.rs");

include!("commands/catalog.rs");
