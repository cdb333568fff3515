// ────────────────────────── History ──────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryCommand {
    /// List recent prompts, newest first
    List {
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Maximum entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Print one entry as a clipboard block
    Show { id: String },
    /// Toggle the favorite flag of an entry
    Favorite { id: String },
    /// Delete one entry
    Remove { id: String },
    /// Delete all entries
    Clear,
    /// Export history as json, csv or yaml
    Export {
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },
}

fn run_history(ctx: &CommandContext, command: HistoryCommand) -> Result<()> {
    let mut workspace = ctx.workspace()?;
    let history = &mut workspace.history;

    match command {
        HistoryCommand::List { favorites, limit } => {
            let entries: Vec<&HistoryEntry> = if favorites {
                history.favorites()
            } else {
                history.entries().iter().collect()
            };
            let entries: Vec<&HistoryEntry> = entries.into_iter().take(limit).collect();

            if ctx.json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("History is empty");
            }
            for entry in entries {
                let when = chrono::DateTime::from_timestamp_millis(entry.timestamp)
                    .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "{} {} {} {}",
                    entry.id,
                    when,
                    if entry.favorite { "*" } else { " " },
                    entry.prompt.main_prompt
                );
            }
        }
        HistoryCommand::Show { id } => {
            let entry = history
                .get(&id)
                .ok_or_else(|| MiprefError::NotFound(format!("history entry '{}'", id)))?;
            if ctx.json {
                return print_json(entry);
            }
            println!("{}", clipboard_block(&entry.prompt));
        }
        HistoryCommand::Favorite { id } => {
            let favorite = history
                .toggle_favorite(&id)
                .ok_or_else(|| MiprefError::NotFound(format!("history entry '{}'", id)))?;
            println!(
                "{} {}",
                id,
                if favorite { "marked as favorite" } else { "unmarked" }
            );
        }
        HistoryCommand::Remove { id } => {
            if !history.remove(&id) {
                return Err(MiprefError::NotFound(format!("history entry '{}'", id)));
            }
            println!("Removed {}", id);
        }
        HistoryCommand::Clear => {
            let count = history.entries().len();
            history.clear();
            println!("Cleared {} entries", count);
        }
        HistoryCommand::Export {
            format,
            output,
            favorites,
        } => {
            let entries: Vec<HistoryEntry> = if favorites {
                history.favorites().into_iter().cloned().collect()
            } else {
                history.entries().to_vec()
            };
            let rendered = export_history(&entries, format)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    log::info!(
                        "Exported {} history entries as {} to {}",
                        entries.len(),
                        format,
                        path.display()
                    );
                    println!("Exported {} entries to {}", entries.len(), path.display());
                }
                None => println!("{}", rendered),
            }
        }
    }
    Ok(())
}

// ────────────────────────── Templates ──────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum TemplateCommand {
    /// List saved templates
    List,
    /// Print a template's config as YAML
    Show { template: String },
    /// Save a template from a config file or tag selections
    Save(TemplateSaveArgs),
    /// Delete a template
    Delete { template: String },
}

#[derive(Debug, Clone, Args)]
pub struct TemplateSaveArgs {
    /// Template name
    #[arg(short, long)]
    pub name: String,

    /// Short description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// YAML or JSON config; unspecified fields take their defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Toggle a tag in a category, e.g. `pose=sitting` (repeatable)
    #[arg(long = "tag", value_name = "CATEGORY=TAG")]
    pub tags: Vec<String>,

    /// Overwrite the template with this id
    #[arg(long)]
    pub id: Option<String>,
}

fn run_template(ctx: &CommandContext, command: TemplateCommand) -> Result<()> {
    let mut workspace = ctx.workspace()?;

    match command {
        TemplateCommand::List => {
            let templates = workspace.templates.list();
            if ctx.json {
                return print_json(templates);
            }
            if templates.is_empty() {
                println!("No templates saved");
            }
            for template in templates {
                println!("{}  {}  {}", template.id, template.name, template.description);
            }
        }
        TemplateCommand::Show { template } => {
            let found = workspace
                .templates
                .find(&template)
                .ok_or_else(|| MiprefError::NotFound(format!("template '{}'", template)))?;
            if ctx.json {
                return print_json(found);
            }
            print!("{}", serde_yaml::to_string(found)?);
        }
        TemplateCommand::Save(args) => {
            let mut config = match &args.config {
                Some(path) => read_document::<PromptConfig>(path)?,
                None => base_config(&workspace),
            };
            apply_tag_selections(&mut config, &args.tags)?;

            let now = Utc::now();
            let template = match args
                .id
                .as_deref()
                .and_then(|id| workspace.templates.get(id))
            {
                Some(existing) => SavedTemplate {
                    name: args.name,
                    description: args.description,
                    config,
                    updated_at: now.timestamp_millis(),
                    ..existing.clone()
                },
                None => SavedTemplate::new(args.name, args.description, config, now),
            };

            let id = template.id.clone();
            workspace.templates.save(template);
            println!("Saved template {}", id);
        }
        TemplateCommand::Delete { template } => {
            let id = workspace
                .templates
                .find(&template)
                .map(|found| found.id.clone())
                .ok_or_else(|| MiprefError::NotFound(format!("template '{}'", template)))?;
            workspace.templates.delete(&id);
            println!("Deleted template {}", id);
        }
    }
    Ok(())
}

// ────────────────────────── Settings ──────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Restore defaults
    Reset,
    /// Enable or disable NSFW content
    Nsfw {
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Change individual settings
    Set(SettingsSetArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SettingsSetArgs {
    #[arg(long, value_parser = parse_model)]
    pub default_model: Option<ModelId>,
    #[arg(long)]
    pub default_undesired_preset: Option<String>,
    #[arg(long)]
    pub default_guidance: Option<f64>,
    #[arg(long)]
    pub default_steps: Option<u32>,
    #[arg(long, value_parser = parse_switch)]
    pub show_token_count: Option<bool>,
    #[arg(long, value_parser = parse_switch)]
    pub compact_mode: Option<bool>,
}

fn run_settings(ctx: &CommandContext, command: SettingsCommand) -> Result<()> {
    let mut workspace = ctx.workspace()?;
    let settings = &mut workspace.settings;

    match command {
        SettingsCommand::Show => {}
        SettingsCommand::Reset => settings.reset(),
        SettingsCommand::Nsfw { enabled: true } => settings.enable_nsfw(),
        SettingsCommand::Nsfw { enabled: false } => settings.disable_nsfw(),
        SettingsCommand::Set(args) => {
            if let Some(preset) = &args.default_undesired_preset {
                if crate::presets::undesired_preset(preset).is_none() {
                    return Err(MiprefError::InvalidInput(format!(
                        "Unknown undesired preset '{}'",
                        preset
                    )));
                }
            }
            settings.update(AppSettingsPatch {
                default_model: args.default_model,
                default_undesired_preset: args.default_undesired_preset,
                default_guidance: args.default_guidance,
                default_steps: args.default_steps,
                show_token_count: args.show_token_count,
                compact_mode: args.compact_mode,
                ..Default::default()
            });
        }
    }

    if ctx.json {
        return print_json(settings.settings());
    }
    print!("{}", serde_yaml::to_string(settings.settings())?);
    Ok(())
}

// ────────────────────────── Enhancer settings ──────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum EnhancerCommand {
    /// Print the enhancer settings
    Show,
    /// Restore defaults
    Reset,
    /// Change individual enhancer settings
    Set(EnhancerSetArgs),
}

#[derive(Debug, Clone, Args)]
pub struct EnhancerSetArgs {
    #[arg(long, value_parser = parse_switch)]
    pub auto_weight: Option<bool>,
    /// Emphasis multiplier, clamped to 0.8..=1.5
    #[arg(long, value_parser = parse_weight_level)]
    pub weight_level: Option<f64>,
    #[arg(long, value_parser = parse_repetition_level)]
    pub repetition: Option<RepetitionLevel>,
    #[arg(long, value_parser = parse_switch)]
    pub repeat_hair: Option<bool>,
    #[arg(long, value_parser = parse_switch)]
    pub repeat_body: Option<bool>,
    #[arg(long, value_parser = parse_switch)]
    pub repeat_clothing: Option<bool>,
    #[arg(long, value_parser = parse_switch)]
    pub repeat_pose: Option<bool>,
    #[arg(long, value_parser = parse_switch)]
    pub auto_negatives: Option<bool>,
    #[arg(long, value_parser = parse_switch)]
    pub normalize: Option<bool>,
    #[arg(long)]
    pub preset: Option<QualityPreset>,
    #[arg(long, value_parser = parse_switch)]
    pub show_before_after: Option<bool>,
}

impl EnhancerSetArgs {
    fn into_patch(self, current: &EnhancementSettings) -> EnhancementSettingsPatch {
        let mut repetition = current.smart_repetition.clone();
        let mut repetition_changed = false;
        for (flag, value) in [
            (&mut repetition.repeat_hair, self.repeat_hair),
            (&mut repetition.repeat_body, self.repeat_body),
            (&mut repetition.repeat_clothing, self.repeat_clothing),
            (&mut repetition.repeat_pose, self.repeat_pose),
        ] {
            if let Some(value) = value {
                *flag = value;
                repetition_changed = true;
            }
        }

        EnhancementSettingsPatch {
            auto_weight: self.auto_weight,
            auto_weight_level: self.weight_level,
            smart_repetition: repetition_changed.then_some(repetition),
            repetition_level: self.repetition,
            auto_negatives: self.auto_negatives,
            booru_normalization: self.normalize,
            quality_preset: self.preset,
            show_before_after: self.show_before_after,
        }
    }
}

fn run_enhancer(ctx: &CommandContext, command: EnhancerCommand) -> Result<()> {
    let mut workspace = ctx.workspace()?;
    let enhancer = &mut workspace.enhancer;

    match command {
        EnhancerCommand::Show => {}
        EnhancerCommand::Reset => enhancer.reset(),
        EnhancerCommand::Set(args) => {
            let patch = args.into_patch(enhancer.settings());
            enhancer.update(patch);
        }
    }

    if ctx.json {
        return print_json(enhancer.settings());
    }
    print!("{}", serde_yaml::to_string(enhancer.settings())?);
    Ok(())
}
