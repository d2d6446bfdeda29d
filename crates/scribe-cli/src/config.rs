//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use scribe_core::util::normalize_text_option;
use scribe_core::HexColor;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    /// Database used when neither `--db-path` nor `SCRIBE_DB_PATH` is set
    #[serde(default)]
    pub db_path: Option<String>,
    #[serde(default)]
    pub default_banner_color: Option<String>,
    #[serde(default)]
    pub default_body_color: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scribe")
        .join(CONFIG_FILE_NAME)
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    pub fn db_path(&self) -> Option<PathBuf> {
        normalize_text_option(self.db_path.clone()).map(PathBuf::from)
    }

    /// Banner color for new notes, falling back to the built-in default
    pub fn banner_color(&self) -> Result<HexColor, String> {
        parse_color_option("default_banner_color", self.default_banner_color.as_deref())
            .map(|color| color.unwrap_or_else(HexColor::default_banner))
    }

    /// Body color for new notes, falling back to the built-in default
    pub fn body_color(&self) -> Result<HexColor, String> {
        parse_color_option("default_body_color", self.default_body_color.as_deref())
            .map(|color| color.unwrap_or_else(HexColor::default_body))
    }

    fn normalize(&mut self) {
        self.version = default_config_version();
        self.db_path = normalize_text_option(self.db_path.take());
        self.default_banner_color = normalize_text_option(self.default_banner_color.take());
        self.default_body_color = normalize_text_option(self.default_body_color.take());
    }
}

fn parse_color_option(key: &str, value: Option<&str>) -> Result<Option<HexColor>, String> {
    value
        .map(|raw| {
            raw.parse::<HexColor>()
                .map_err(|error| format!("Invalid {key} in config: {error}"))
        })
        .transpose()
}
