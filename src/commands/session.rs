// ────────────────────────── Interactive session ──────────────────────────

#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Initial prompt
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Edits closer together than this collapse into one undo step
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,
}

const SESSION_HELP: &str = "\
commands:
  set <prompt>     replace the prompt
  add <tag>        append a tag
  remove <tag>     remove a tag
  undo | redo      step through edits
  show             print the prompt
  enhance          run the enhancer on the prompt
  tokens           estimate tokens
  clear            empty the prompt and its history
  quit";

fn session_tags(prompt: &str) -> Vec<String> {
    prompt
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Line-oriented prompt editor. Each edit is recorded with the time it was
/// read; undo and redo restore snapshots directly.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    enhancer: &PromptEnhancer,
    initial: &str,
    debounce: Duration,
) -> std::io::Result<String> {
    let mut prompt = initial.trim().to_string();
    let mut history =
        UndoRedo::with_options(prompt.clone(), crate::undo::DEFAULT_MAX_HISTORY, debounce);

    for line in input.lines() {
        let line = line?;
        let now = Instant::now();
        history.tick(now);

        let (command, rest) = match line.trim().split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.trim(), ""),
        };

        let edited = match command {
            "" => false,
            "set" => {
                prompt = session_tags(rest).join(", ");
                true
            }
            "add" if !rest.is_empty() => {
                let mut tags = session_tags(&prompt);
                tags.extend(session_tags(rest));
                prompt = tags.join(", ");
                true
            }
            "remove" if !rest.is_empty() => {
                let mut tags = session_tags(&prompt);
                let before = tags.len();
                tags.retain(|tag| !tag.eq_ignore_ascii_case(rest));
                if tags.len() == before {
                    writeln!(output, "not found: {}", rest)?;
                }
                prompt = tags.join(", ");
                tags.len() != before
            }
            "undo" => {
                match history.undo() {
                    Some(restored) => prompt = restored,
                    None => writeln!(output, "nothing to undo")?,
                }
                writeln!(output, "{}", prompt)?;
                false
            }
            "redo" => {
                match history.redo() {
                    Some(restored) => prompt = restored,
                    None => writeln!(output, "nothing to redo")?,
                }
                writeln!(output, "{}", prompt)?;
                false
            }
            "show" => {
                writeln!(output, "{}", prompt)?;
                false
            }
            "enhance" => {
                let result = enhancer.enhance(&prompt, false);
                writeln!(output, "{}", result.enhanced)?;
                if !result.negatives.is_empty() {
                    writeln!(output, "negative: {}", result.negatives.join(", "))?;
                }
                false
            }
            "tokens" => {
                let count = estimate_tokens(&prompt);
                writeln!(
                    output,
                    "{} tokens ({})",
                    count,
                    crate::tokens::token_status(count).as_str()
                )?;
                false
            }
            "clear" => {
                prompt.clear();
                history.clear(&prompt);
                false
            }
            "help" => {
                writeln!(output, "{}", SESSION_HELP)?;
                false
            }
            "quit" | "exit" => break,
            other => {
                writeln!(output, "unknown command '{}', try 'help'", other)?;
                false
            }
        };

        if edited {
            history.record(&prompt, now);
        }
    }

    Ok(prompt)
}

fn run_session_command(ctx: &CommandContext, args: SessionArgs) -> Result<()> {
    let workspace = ctx.workspace()?;
    let enhancer = PromptEnhancer::new(workspace.enhancer.settings().clone());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let final_prompt = run_session(
        stdin.lock(),
        &mut stdout,
        &enhancer,
        args.prompt.as_deref().unwrap_or(""),
        Duration::from_millis(args.debounce_ms),
    )?;

    if !final_prompt.is_empty() {
        println!("{}", final_prompt);
    }
    Ok(())
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str, debounce: Duration) -> (String, String) {
        let mut output = Vec::new();
        let final_prompt = run_session(
            Cursor::new(script.to_string()),
            &mut output,
            &PromptEnhancer::default(),
            "",
            debounce,
        )
        .expect("session should not fail on in-memory io");
        (final_prompt, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn test_undo_restores_previous_edit() {
        let (prompt, output) = run(
            "set 1girl\nadd silver hair\nadd smile\nundo\n",
            Duration::ZERO,
        );
        assert_eq!(prompt, "1girl, silver hair");
        assert_eq!(output.lines().last(), Some("1girl, silver hair"));
    }

    #[test]
    fn test_redo_after_undo() {
        let (prompt, _) = run(
            "set 1girl\nadd smile\nundo\nredo\n",
            Duration::ZERO,
        );
        assert_eq!(prompt, "1girl, smile");
    }

    #[test]
    fn test_rapid_edits_undo_as_one_step() {
        let (prompt, _) = run(
            "set 1girl\nadd smile\nadd forest\nundo\n",
            Duration::from_secs(3600),
        );
        assert_eq!(prompt, "");
    }

    #[test]
    fn test_remove_and_unknown_command() {
        let (prompt, output) = run(
            "set 1girl, smile, forest\nremove SMILE\nremove cat\nbogus\nquit\nadd ignored\n",
            Duration::ZERO,
        );
        assert_eq!(prompt, "1girl, forest");
        assert!(output.contains("not found: cat"));
        assert!(output.contains("unknown command 'bogus'"));
    }

    #[test]
    fn test_clear_drops_history() {
        let (prompt, output) = run("set 1girl\nclear\nundo\n", Duration::ZERO);
        assert_eq!(prompt, "");
        assert!(output.contains("nothing to undo"));
    }
}
