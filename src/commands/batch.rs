// ────────────────────────── Batch enhancement ──────────────────────────

const DEFAULT_BATCH_THREADS: usize = 8;

fn batch_threads() -> usize {
    if let Ok(raw) = std::env::var("MIPREF_BATCH_THREADS") {
        if let Ok(parsed) = raw.parse::<usize>() {
            return parsed.clamp(1, 32);
        }
    }

    let cpu_count = std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(4);
    cpu_count.clamp(1, DEFAULT_BATCH_THREADS)
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// File with one prompt per line (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Treat every prompt as NSFW
    #[arg(long)]
    pub nsfw: bool,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Enhances each non-blank line independently; output order follows input order.
pub fn enhance_batch(
    enhancer: &PromptEnhancer,
    prompts: &[String],
    is_nsfw: bool,
    threads: usize,
) -> Result<Vec<EnhancedPrompt>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("mipref-batch-{}", idx))
        .build()
        .map_err(|error| {
            MiprefError::InvalidInput(format!("Failed to create batch thread pool: {}", error))
        })?;

    Ok(pool.install(|| {
        prompts
            .par_iter()
            .map(|prompt| enhancer.enhance(prompt, is_nsfw))
            .collect()
    }))
}

fn run_batch(ctx: &CommandContext, args: BatchArgs) -> Result<()> {
    let content = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let prompts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let workspace = ctx.workspace()?;
    let enhancer = PromptEnhancer::new(workspace.enhancer.settings().clone());
    let is_nsfw = args.nsfw || workspace.settings.settings().nsfw_enabled;

    let threads = batch_threads();
    let started = Instant::now();
    let results = enhance_batch(&enhancer, &prompts, is_nsfw, threads)?;
    log::info!(
        "Enhanced {} prompts on {} threads in {:?}",
        results.len(),
        threads,
        started.elapsed()
    );

    let rendered = if ctx.json {
        serde_json::to_string_pretty(&results)?
    } else {
        results
            .iter()
            .map(|result| result.enhanced.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            println!("Wrote {} prompts to {}", results.len(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
