// ────────────────────────── Tag catalog ──────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum TagsCommand {
    /// Search tag names and aliases
    Search {
        query: String,
        /// Include NSFW tags
        #[arg(long)]
        nsfw: bool,
        /// Minimum popularity (1 to 5)
        #[arg(long, default_value_t = 1)]
        min_popularity: u8,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// List popular tags
    Popular {
        #[arg(long)]
        nsfw: bool,
    },
    /// Find where a tag lives in the catalog
    Lookup { name: String },
    /// Suggest tags missing from a selection
    Suggest {
        /// Selected tags
        tags: Vec<String>,
        #[arg(long)]
        nsfw: bool,
    },
    /// List selection categories, or the tags of one
    List {
        category: Option<String>,
        #[arg(long)]
        nsfw: bool,
    },
}

fn print_tag_records(ctx: &CommandContext, records: &[&crate::catalog::TagRecord]) -> Result<()> {
    if ctx.json {
        return print_json(records);
    }
    for record in records {
        let marker = if record.nsfw { " [nsfw]" } else { "" };
        println!("{:<28} {}{}", record.text, "*".repeat(record.popularity as usize), marker);
    }
    Ok(())
}

fn run_tags(ctx: &CommandContext, command: TagsCommand) -> Result<()> {
    match command {
        TagsCommand::Search {
            query,
            nsfw,
            min_popularity,
            limit,
        } => {
            let results = tags::search(
                &query,
                SearchOptions {
                    include_nsfw: nsfw,
                    min_popularity,
                    limit,
                },
            );
            print_tag_records(ctx, &results)
        }
        TagsCommand::Popular { nsfw } => print_tag_records(ctx, &tags::popular(nsfw)),
        TagsCommand::Lookup { name } => {
            let location = tags::lookup(&name)
                .ok_or_else(|| MiprefError::NotFound(format!("tag '{}'", name)))?;
            if ctx.json {
                return print_json(&location);
            }
            println!(
                "{} ({} / {}), popularity {}",
                location.tag.text, location.category, location.subcategory, location.tag.popularity
            );
            if !location.tag.aliases.is_empty() {
                println!("aliases: {}", location.tag.aliases.join(", "));
            }
            Ok(())
        }
        TagsCommand::Suggest { tags: selected, nsfw } => {
            let selected: Vec<String> = selected.iter().map(|tag| tag.to_lowercase()).collect();
            print_tag_records(ctx, &tags::suggested(&selected, nsfw))
        }
        TagsCommand::List { category, nsfw } => match category {
            Some(key) => {
                let flat = tags::flat_category(&key, nsfw);
                if flat.is_empty() {
                    let records: Vec<&crate::catalog::TagRecord> = tags::category_tags(&key)
                        .into_iter()
                        .filter(|tag| nsfw || !tag.nsfw)
                        .collect();
                    if records.is_empty() {
                        return Err(MiprefError::NotFound(format!("category '{}'", key)));
                    }
                    return print_tag_records(ctx, &records);
                }
                if ctx.json {
                    return print_json(&flat);
                }
                for tag in flat {
                    println!("{}", tag.name);
                }
                Ok(())
            }
            None => {
                let all = tags::all_flat(nsfw);
                if ctx.json {
                    return print_json(&all);
                }
                for (key, flat) in all {
                    println!("{:<16} {} tags", key, flat.len());
                }
                Ok(())
            }
        },
    }
}

// ────────────────────────── Presets ──────────────────────────

#[derive(Debug, Clone, Args)]
pub struct PresetsArgs {
    /// Include NSFW presets
    #[arg(long)]
    pub nsfw: bool,
}

fn run_presets(ctx: &CommandContext, args: PresetsArgs) -> Result<()> {
    let undesired: Vec<_> = UNDESIRED_PRESETS
        .iter()
        .filter(|preset| args.nsfw || !preset.nsfw)
        .collect();
    let modes: Vec<_> = GENERATION_MODES
        .iter()
        .filter(|mode| args.nsfw || !mode.nsfw)
        .collect();

    if ctx.json {
        return print_json(&serde_json::json!({
            "quality": QUALITY_PRESETS,
            "undesired": undesired,
            "models": MODEL_OPTIONS,
            "modes": modes,
            "styles": STYLE_PRESETS,
            "random": RANDOM_PRESETS,
            "emphasis": EMPHASIS_EXAMPLES,
        }));
    }

    println!("Quality presets:");
    for preset in QUALITY_PRESETS {
        println!("  {:<16} {}", preset.id.as_str(), preset.tags.join(", "));
    }
    println!("Undesired presets:");
    for preset in undesired {
        println!("  {:<16} {}", preset.id, preset.description);
    }
    println!("Models:");
    for model in MODEL_OPTIONS {
        println!(
            "  {:<16} {} (guidance {}, steps {})",
            model.id, model.name, model.recommended_guidance.default, model.recommended_steps.default
        );
    }
    println!("Modes:");
    for mode in modes {
        println!("  {:<16} {}", mode.id, mode.description);
    }
    println!("Styles:");
    for style in STYLE_PRESETS {
        println!("  {:<16} {}", style.id, style.tags.join(", "));
    }
    println!("Random presets:");
    for preset in RANDOM_PRESETS {
        println!("  {:<16} {}", preset.id, preset.categories.join(", "));
    }
    println!("Emphasis syntax:");
    for (syntax, meaning) in EMPHASIS_EXAMPLES {
        println!("  {:<16} {}", syntax, meaning);
    }
    Ok(())
}
