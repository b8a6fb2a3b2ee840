use crate::error::{Result, RowkeepError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_DIR_ENV: &str = "ROWKEEP_CONFIG_DIR";

/// Configuration for rowkeep, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowkeepConfig {
    /// Navigating from an unknown cursor wraps to a boundary record when true,
    /// and reports "record not found" when false.
    #[serde(default = "default_true")]
    pub wrap_unknown: bool,

    /// Print the blank record instead of a "no records" notice.
    #[serde(default)]
    pub show_blank: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RowkeepConfig {
    fn default() -> Self {
        Self {
            wrap_unknown: true,
            show_blank: false,
        }
    }
}

impl RowkeepConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RowkeepConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Set a value by key, parsing it from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed = parse_bool(value)
            .ok_or_else(|| RowkeepError::Config(format!("Invalid boolean: {}", value)))?;
        match key {
            "wrap_unknown" => self.wrap_unknown = parsed,
            "show_blank" => self.show_blank = parsed,
            _ => return Err(RowkeepError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("wrap_unknown", self.wrap_unknown.to_string()),
            ("show_blank", self.show_blank.to_string()),
        ]
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Resolve the config directory: explicit path, then `ROWKEEP_CONFIG_DIR`,
/// then the platform config dir.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "rowkeep", "rowkeep")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| RowkeepError::Config("Could not determine config dir".to_string()))
}
