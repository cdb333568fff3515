// ────────────────────────── Prompt pipeline ──────────────────────────

#[derive(Debug, Clone, Args)]
pub struct EnhanceArgs {
    /// Comma-separated prompt (read from stdin when omitted)
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Treat the prompt as NSFW (defaults to the nsfw setting)
    #[arg(long)]
    pub nsfw: bool,

    /// Quality preset for this run
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<QualityPreset>,

    /// Emphasis multiplier for this run (0.8 to 1.5)
    #[arg(long, value_name = "LEVEL", value_parser = parse_weight_level)]
    pub weight_level: Option<f64>,

    /// Repetition level for this run
    #[arg(long, value_name = "LEVEL", value_parser = parse_repetition_level)]
    pub repetition: Option<RepetitionLevel>,

    /// Skip automatic emphasis
    #[arg(long)]
    pub no_weight: bool,

    /// Skip negative generation
    #[arg(long)]
    pub no_negatives: bool,

    /// Skip booru normalization
    #[arg(long)]
    pub no_normalize: bool,

    /// Print the enhanced prompt as a clipboard block
    #[arg(long)]
    pub clipboard: bool,
}

impl EnhanceArgs {
    fn overrides(&self) -> EnhancementSettingsPatch {
        EnhancementSettingsPatch {
            auto_weight: self.no_weight.then_some(false),
            auto_weight_level: self.weight_level,
            repetition_level: self.repetition,
            auto_negatives: self.no_negatives.then_some(false),
            booru_normalization: self.no_normalize.then_some(false),
            quality_preset: self.preset,
            ..Default::default()
        }
    }
}

fn run_enhance(ctx: &CommandContext, args: EnhanceArgs) -> Result<()> {
    let workspace = ctx.workspace()?;
    let mut enhancer = PromptEnhancer::new(workspace.enhancer.settings().clone());
    enhancer.update_settings(args.overrides());

    let is_nsfw = args.nsfw || workspace.settings.settings().nsfw_enabled;
    let prompt = read_prompt(args.prompt.clone())?;
    let result = enhancer.enhance(&prompt, is_nsfw);

    if ctx.json {
        return print_json(&result);
    }

    if args.clipboard {
        let app = workspace.settings.settings();
        let model = crate::presets::model_option(app.default_model.as_str());
        println!(
            "{}",
            format_clipboard_text(
                &result.enhanced,
                &result.negatives.join(", "),
                model.name,
                app.default_guidance,
                app.default_steps,
            )
        );
        return Ok(());
    }

    print_enhanced(&result, enhancer.settings().show_before_after);
    Ok(())
}

fn print_enhanced(result: &EnhancedPrompt, show_changes: bool) {
    if show_changes {
        println!("Before: {}", result.original);
        println!("After:  {}", result.enhanced);
    } else {
        println!("{}", result.enhanced);
    }

    if !result.negatives.is_empty() {
        println!();
        println!("Negative: {}", result.negatives.join(", "));
    }

    println!();
    println!(
        "Tokens: {} ({})",
        result.tokens.count,
        result.tokens.status.as_str()
    );

    if show_changes && !result.changes.is_empty() {
        println!();
        println!("Changes:");
        for change in &result.changes {
            if change.original.is_empty() {
                println!("  [{}] {} ({})", change.kind.as_str(), change.result, change.reason);
            } else {
                println!(
                    "  [{}] {} -> {} ({})",
                    change.kind.as_str(),
                    change.original,
                    change.result,
                    change.reason
                );
            }
        }
    }
}

fn run_parse(ctx: &CommandContext, args: PromptArgs) -> Result<()> {
    let prompt = read_prompt(args.prompt)?;
    let parsed = parser::parse(&prompt);

    if ctx.json {
        return print_json(&parsed);
    }

    for bucket in Bucket::ALL {
        let tags = parsed.bucket(bucket);
        if !tags.is_empty() {
            println!("{:<12} {}", bucket.as_str(), tags.join(", "));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
struct NormalizeReport {
    normalized: String,
    replacements: Vec<Replacement>,
}

#[derive(Debug, Clone, Serialize)]
struct Replacement {
    original: String,
    normalized: String,
    variations: Vec<&'static str>,
    suggestions: &'static [&'static str],
}

fn run_normalize(ctx: &CommandContext, args: PromptArgs) -> Result<()> {
    let prompt = read_prompt(args.prompt)?;
    let (normalized, replaced) = normalize_tags(&prompt);
    let report = NormalizeReport {
        normalized,
        replacements: replaced
            .into_iter()
            .map(|(original, normalized)| Replacement {
                variations: variations_of(&normalized),
                suggestions: suggestions_for(&normalized),
                original,
                normalized,
            })
            .collect(),
    };

    if ctx.json {
        return print_json(&report);
    }

    println!("{}", report.normalized);
    for replacement in &report.replacements {
        println!("  {} -> {}", replacement.original, replacement.normalized);
    }
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct NegativesArgs {
    /// Comma-separated prompt (read from stdin when omitted)
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Add the NSFW negative set
    #[arg(long)]
    pub nsfw: bool,
}

fn run_negatives(ctx: &CommandContext, args: NegativesArgs) -> Result<()> {
    let prompt = read_prompt(args.prompt)?;
    let negatives = generate_negatives(&prompt, args.nsfw);

    if ctx.json {
        return print_json(&negatives);
    }
    println!("{}", negatives.join(", "));
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct WeightArgs {
    /// Comma-separated prompt (read from stdin when omitted)
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Emphasis multiplier (0.8 to 1.5)
    #[arg(long, default_value_t = 1.0, value_parser = parse_weight_level)]
    pub multiplier: f64,
}

fn run_weight(ctx: &CommandContext, args: WeightArgs) -> Result<()> {
    let prompt = read_prompt(args.prompt)?;
    let tags: Vec<String> = parser::split_tags(&prompt).collect();
    let multiplier = args.multiplier.clamp(
        crate::enhancer::MIN_AUTO_WEIGHT_LEVEL,
        crate::enhancer::MAX_AUTO_WEIGHT_LEVEL,
    );
    let weighted = apply_auto_weighting(&tags, multiplier);

    if ctx.json {
        return print_json(&weighted);
    }
    for tag in &weighted {
        println!("{:<8} {}", tag.level.as_str(), tag.render());
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
struct TokenReport {
    #[serde(flatten)]
    budget: crate::tokens::TokenBudget,
    by_words: usize,
}

fn run_tokens(ctx: &CommandContext, args: PromptArgs) -> Result<()> {
    let prompt = read_prompt(args.prompt)?;
    let report = TokenReport {
        budget: token_budget(&prompt, &parser::parse(&prompt)),
        by_words: estimate_tokens_by_words(&prompt),
    };

    if ctx.json {
        return print_json(&report);
    }

    let breakdown = &report.budget.breakdown;
    println!(
        "{} tokens ({}), ~{} by word count",
        report.budget.count,
        report.budget.status.as_str(),
        report.by_words
    );
    for (label, count) in [
        ("quality", breakdown.quality),
        ("subject", breakdown.subject),
        ("features", breakdown.features),
        ("details", breakdown.details),
        ("pose", breakdown.pose),
        ("scene", breakdown.scene),
        ("composition", breakdown.composition),
        ("style", breakdown.style),
    ] {
        if count > 0 {
            println!("  {:<12} {}", label, count);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct TruncateArgs {
    /// Comma-separated prompt (read from stdin when omitted)
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Token target
    #[arg(long, default_value_t = DEFAULT_TOKEN_TARGET)]
    pub target: usize,
}

fn run_truncate(ctx: &CommandContext, args: TruncateArgs) -> Result<()> {
    let prompt = read_prompt(args.prompt)?;
    let truncated = parser::truncate(&prompt, args.target);

    if ctx.json {
        return print_json(&serde_json::json!({
            "prompt": truncated,
            "tokens": estimate_tokens(&truncated),
            "target": args.target,
        }));
    }
    println!("{}", truncated);
    Ok(())
}

#[cfg(test)]
mod prompt_tests {
    use super::*;

    #[test]
    fn test_weight_level_rejects_non_finite_values() {
        assert_eq!(parse_weight_level("1.2"), Ok(1.2));
        assert!(parse_weight_level("NaN").is_err());
        assert!(parse_weight_level("inf").is_err());
        assert!(parse_weight_level("heavy").is_err());
    }

    #[test]
    fn test_cli_rejects_nan_weight_level() {
        assert!(Cli::try_parse_from(["mipref", "enhance", "1girl", "--weight-level", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["mipref", "weight", "1girl", "--multiplier", "nan"]).is_err());
        assert!(Cli::try_parse_from(["mipref", "enhance", "1girl", "--weight-level", "1.3"]).is_ok());
    }
}
