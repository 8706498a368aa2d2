use super::types::{Scenario, SimpleEvent};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

fn detect_format(path: &Path) -> Result<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        _ => anyhow::bail!(
            "Unsupported file type for {}. Use .yaml, .yml or .json",
            path.display()
        ),
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = detect_format(path)?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match format {
        FileFormat::Yaml => serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse {}: invalid YAML", path.display())),
        FileFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}: invalid JSON", path.display())),
    }
}

/// Load a monthly scenario script from a YAML or JSON file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    load_file(path)
}

/// Load a flat event list for the simple scorer from a YAML or JSON file.
pub fn load_events(path: &Path) -> Result<Vec<SimpleEvent>> {
    load_file(path)
}
