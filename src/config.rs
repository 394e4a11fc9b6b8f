// src/config.rs
// =============================================================================
// Settings for a mirroring run.
//
// Settings can come from two places:
// 1. A JSON settings file (appsettings.json in the working directory by
//    default, or the file passed with --config)
// 2. Command-line arguments, which win over the file
//
// Settings file layout:
//   {
//     "WebScraping": {
//       "BaseUrl": "https://books.toscrape.com/",
//       "DestinationFolderName": "mirror",
//       "RequestTimeoutSecs": 30
//     }
//   }
//
// Blank values are passed through as-is: deciding that a run can't start is
// the crawler's job, not the config loader's.
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// Settings file looked up in the working directory when --config isn't given
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// The "WebScraping" section of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScrapingSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub destination_folder_name: Option<String>,
    /// Per-request timeout; no timeout when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(default)]
    web_scraping: ScrapingSettings,
}

// Final values for one run, after merging file and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSettings {
    pub base_url: String,
    pub destination: String,
    pub request_timeout: Option<Duration>,
}

// Loads the "WebScraping" section from a JSON file
//
// Parameters:
//   path: settings file to read
//   required: when false, a missing file just means "no settings"
pub fn load_settings(path: &Path, required: bool) -> Result<ScrapingSettings> {
    if !required && !path.exists() {
        return Ok(ScrapingSettings::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;

    parse_settings(&raw)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}

fn parse_settings(raw: &str) -> Result<ScrapingSettings> {
    let file: SettingsFile = serde_json::from_str(raw)?;
    Ok(file.web_scraping)
}

impl ScrapingSettings {
    // Applies command-line overrides on top of the file values
    pub fn merge(self, base_url: Option<String>, destination: Option<String>) -> MirrorSettings {
        MirrorSettings {
            base_url: base_url.or(self.base_url).unwrap_or_default(),
            destination: destination
                .or(self.destination_folder_name)
                .unwrap_or_default(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
