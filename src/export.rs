use crate::error::{MiprefError, Result};
use crate::store::HistoryEntry;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Yaml,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = MiprefError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(MiprefError::InvalidInput(format!(
                "Unsupported export format '{}'. Use 'json', 'csv' or 'yaml'.",
                other
            ))),
        }
    }
}

/// Flattened row for tabular export.
#[derive(Debug, Clone, Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    timestamp: String,
    favorite: bool,
    model: &'a str,
    guidance: f64,
    steps: u32,
    prompt: &'a str,
    undesired_content: &'a str,
}

impl<'a> ExportRow<'a> {
    fn from_entry(entry: &'a HistoryEntry) -> Self {
        let timestamp = chrono::DateTime::from_timestamp_millis(entry.timestamp)
            .map(|time| time.to_rfc3339())
            .unwrap_or_default();
        Self {
            id: &entry.id,
            timestamp,
            favorite: entry.favorite,
            model: &entry.prompt.model_settings.model,
            guidance: entry.prompt.model_settings.guidance,
            steps: entry.prompt.model_settings.steps,
            prompt: &entry.prompt.main_prompt,
            undesired_content: &entry.prompt.undesired_content,
        }
    }
}

/// Renders history entries in the requested format.
///
/// JSON and YAML carry the full entries (readable back as history); CSV
/// carries one flattened row per entry.
pub fn export_history(entries: &[HistoryEntry], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(entries)?),
        ExportFormat::Csv => build_csv_export(entries),
    }
}

fn build_csv_export(entries: &[HistoryEntry]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for entry in entries {
        wtr.serialize(ExportRow::from_entry(entry))?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| MiprefError::InvalidInput(format!("CSV export is not UTF-8: {}", e)))
}

/// The block copied to the clipboard for pasting into the generator.
pub fn format_clipboard_text(
    prompt: &str,
    undesired: &str,
    model: &str,
    guidance: f64,
    steps: u32,
) -> String {
    format!(
        "[Prompt]\n{}\n\n[Undesired Content]\n{}\n\n[Settings]\nModel: {}\nGuidance: {}\nSteps: {}",
        prompt, undesired, model, guidance, steps
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_prompt, PromptConfig};
    use chrono::{TimeZone, Utc};

    fn sample_entries() -> Vec<HistoryEntry> {
        let now = Utc
            .timestamp_millis_opt(1_700_000_000_000)
            .single()
            .expect("valid timestamp");
        let mut config = PromptConfig::default();
        config.gender = vec!["1girl".to_string()];
        config.custom_tags = "holding umbrella, rain".to_string();
        let mut entry = HistoryEntry::new(generate_prompt(&config, now), now);
        entry.favorite = true;
        vec![entry]
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(MiprefError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_json_export_reads_back_as_history() {
        let entries = sample_entries();
        let json = export_history(&entries, ExportFormat::Json).unwrap();
        assert!(json.contains("\"mainPrompt\""));
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_yaml_export_reads_back_as_history() {
        let entries = sample_entries();
        let yaml = export_history(&entries, ExportFormat::Yaml).unwrap();
        let parsed: Vec<HistoryEntry> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_csv_export_quotes_prompt_commas() {
        let entries = sample_entries();
        let csv = export_history(&entries, ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,timestamp,favorite,model,guidance,steps,prompt,undesired_content")
        );
        let row = lines.next().expect("one data row");
        assert!(row.starts_with(&entries[0].id));
        assert!(row.contains("2023-11-14T22:13:20+00:00"));
        assert!(row.contains("\"1girl, masterpiece, very aesthetic, holding umbrella, rain\""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_history_exports() {
        assert_eq!(export_history(&[], ExportFormat::Json).unwrap(), "[]");
        assert_eq!(export_history(&[], ExportFormat::Csv).unwrap(), "");
    }

    #[test]
    fn test_clipboard_block() {
        let text = format_clipboard_text("1girl, smile", "lowres", "NAI Diffusion V4.5 Full", 5.0, 28);
        assert_eq!(
            text,
            "[Prompt]\n1girl, smile\n\n[Undesired Content]\nlowres\n\n[Settings]\nModel: NAI Diffusion V4.5 Full\nGuidance: 5\nSteps: 28"
        );
    }
}
