pub mod catalog;
pub mod database;
pub mod enhancer;
pub mod error;
pub mod export;
pub mod generator;
pub mod keywords;
pub mod negatives;
pub mod normalizer;
pub mod parser;
pub mod presets;
pub mod repetition;
pub mod store;
pub mod tags;
pub mod tokens;
pub mod undo;
pub mod weighting;

pub mod commands;

use clap::Parser;
use error::{MiprefError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "mipref";

/// Resolves where the store lives: an explicit directory, then
/// `MIPREF_DATA_DIR`, then the platform data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    data_dir_from(explicit, |name| std::env::var(name).ok())
}

fn data_dir_from<F>(explicit: Option<&Path>, env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    if let Some(dir) = non_empty("MIPREF_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = non_empty("XDG_DATA_HOME") {
        return Ok(PathBuf::from(dir).join(APP_DIR_NAME));
    }
    if let Some(home) = non_empty("HOME") {
        return Ok(PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME));
    }
    if let Some(dir) = non_empty("APPDATA") {
        return Ok(PathBuf::from(dir).join(APP_DIR_NAME));
    }

    Err(MiprefError::InvalidInput(
        "Could not determine a data directory; pass --data-dir or set MIPREF_DATA_DIR".to_string(),
    ))
}

/// Entry point for the `mipref` binary. Returns the process exit code.
pub fn run() -> i32 {
    env_logger::init();

    let cli = commands::Cli::parse();
    match commands::execute(cli) {
        Ok(()) => 0,
        Err(error) => {
            log::debug!("Command failed: {:?}", error);
            eprintln!("Error: {}", error);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_explicit_dir_wins() {
        let dir = data_dir_from(
            Some(Path::new("/tmp/explicit")),
            env_of(&[("MIPREF_DATA_DIR", "/tmp/env")]),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn test_env_precedence() {
        let env = env_of(&[
            ("MIPREF_DATA_DIR", ""),
            ("XDG_DATA_HOME", "/data"),
            ("HOME", "/home/user"),
        ]);
        assert_eq!(data_dir_from(None, env).unwrap(), PathBuf::from("/data/mipref"));

        let env = env_of(&[("HOME", "/home/user"), ("APPDATA", "C:/AppData")]);
        assert_eq!(
            data_dir_from(None, env).unwrap(),
            PathBuf::from("/home/user/.local/share/mipref")
        );

        let env = env_of(&[("APPDATA", "/appdata")]);
        assert_eq!(data_dir_from(None, env).unwrap(), PathBuf::from("/appdata/mipref"));
    }

    #[test]
    fn test_no_dir_is_an_error() {
        assert!(matches!(
            data_dir_from(None, env_of(&[])),
            Err(MiprefError::InvalidInput(_))
        ));
    }
}
