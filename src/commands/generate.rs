// ────────────────────────── Prompt generation ──────────────────────────

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Start from a saved template (id or name)
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Start from a YAML or JSON config file
    #[arg(long, value_name = "FILE", conflicts_with = "template")]
    pub config: Option<PathBuf>,

    /// Toggle a tag in a category, e.g. `hairColor=silver hair` (repeatable)
    #[arg(long = "tag", value_name = "CATEGORY=TAG")]
    pub tags: Vec<String>,

    /// Add the art-style tags of a style preset
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Extra free-form tags appended at the end
    #[arg(long, value_name = "TAGS")]
    pub custom: Option<String>,

    /// Model to generate for
    #[arg(long, value_parser = parse_model)]
    pub model: Option<ModelId>,

    /// Undesired content preset id
    #[arg(long, value_name = "PRESET")]
    pub undesired_preset: Option<String>,

    /// Extra undesired tags
    #[arg(long, value_name = "TAGS")]
    pub undesired: Option<String>,

    /// Do not record the result in history
    #[arg(long)]
    pub no_history: bool,
}

fn split_tag_selection(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(category, tag)| (category.trim(), tag.trim()))
        .filter(|(category, tag)| !category.is_empty() && !tag.is_empty())
        .ok_or_else(|| {
            MiprefError::InvalidInput(format!("Expected CATEGORY=TAG, got '{}'", raw))
        })
}

fn apply_tag_selections(config: &mut PromptConfig, selections: &[String]) -> Result<()> {
    for raw in selections {
        let (category, tag) = split_tag_selection(raw)?;
        if !toggle_tag(config, category, tag) {
            return Err(MiprefError::InvalidInput(format!(
                "Unknown category '{}'",
                category
            )));
        }
    }
    Ok(())
}

fn uses_nsfw(config: &PromptConfig) -> bool {
    config.mode == crate::generator::Mode::Nsfw
        || !config.nsfw_body.is_empty()
        || !config.nsfw_clothing.is_empty()
        || !config.nsfw_pose.is_empty()
}

fn base_config(workspace: &Workspace) -> PromptConfig {
    let settings = workspace.settings.settings();
    PromptConfig {
        model: settings.default_model,
        undesired_preset: settings.default_undesired_preset.clone(),
        ..PromptConfig::default()
    }
}

fn run_build(ctx: &CommandContext, args: BuildArgs) -> Result<()> {
    let mut workspace = ctx.workspace()?;

    let mut config = if let Some(name) = &args.template {
        workspace
            .templates
            .find(name)
            .map(|template| template.config.clone())
            .ok_or_else(|| MiprefError::NotFound(format!("template '{}'", name)))?
    } else if let Some(path) = &args.config {
        read_document::<PromptConfig>(path)?
    } else {
        base_config(&workspace)
    };

    apply_tag_selections(&mut config, &args.tags)?;
    if let Some(id) = &args.style {
        let style = style_preset(id)
            .ok_or_else(|| MiprefError::NotFound(format!("style preset '{}'", id)))?;
        for tag in style.tags {
            if !config.art_style.iter().any(|existing| existing == tag) {
                config.art_style.push(tag.to_string());
            }
        }
    }
    if let Some(custom) = args.custom {
        config.custom_tags = custom;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(preset) = args.undesired_preset {
        config.undesired_preset = preset;
    }
    if let Some(undesired) = args.undesired {
        config.custom_undesired = undesired;
    }

    if uses_nsfw(&config) {
        require_nsfw_enabled(&workspace)?;
    }

    let prompt = generate_prompt(&config, Utc::now());
    finish_generated(ctx, &mut workspace, prompt, args.no_history)
}

#[derive(Debug, Clone, Args)]
pub struct RandomArgs {
    /// Randomize only the categories of a named preset
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Include NSFW tags (requires NSFW to be enabled)
    #[arg(long)]
    pub nsfw: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not record the result in history
    #[arg(long)]
    pub no_history: bool,
}

fn run_random(ctx: &CommandContext, args: RandomArgs) -> Result<()> {
    let mut workspace = ctx.workspace()?;
    if args.nsfw {
        require_nsfw_enabled(&workspace)?;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = match &args.preset {
        Some(id) => {
            let preset = random_preset(id).ok_or_else(|| {
                let known: Vec<&str> = RANDOM_PRESETS.iter().map(|preset| preset.id).collect();
                MiprefError::NotFound(format!(
                    "random preset '{}' (available: {})",
                    id,
                    known.join(", ")
                ))
            })?;
            let mut config = base_config(&workspace);
            randomize_categories(&mut config, preset.categories, args.nsfw, &mut rng);
            config
        }
        None => {
            let mut config = generate_full_random(args.nsfw, &mut rng);
            config.model = workspace.settings.settings().default_model;
            config
        }
    };

    let prompt = generate_prompt(&config, Utc::now());
    finish_generated(ctx, &mut workspace, prompt, args.no_history)
}

fn finish_generated(
    ctx: &CommandContext,
    workspace: &mut Workspace,
    prompt: GeneratedPrompt,
    no_history: bool,
) -> Result<()> {
    if !no_history {
        workspace
            .history
            .add(HistoryEntry::new(prompt.clone(), Utc::now()));
    }

    if ctx.json {
        return print_json(&prompt);
    }

    println!("{}", clipboard_block(&prompt));
    if workspace.settings.settings().show_token_count {
        println!();
        println!("Tokens: {}", estimate_tokens(&prompt.main_prompt));
    }
    Ok(())
}

fn clipboard_block(prompt: &GeneratedPrompt) -> String {
    format_clipboard_text(
        &prompt.main_prompt,
        &prompt.undesired_content,
        &prompt.model_settings.model,
        prompt.model_settings.guidance,
        prompt.model_settings.steps,
    )
}
