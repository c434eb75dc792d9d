use crate::error::{LifeError, Result};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`. Every field is optional; the command line wins
/// over anything set here.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulationSettings {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub density: Option<f64>,
    pub immortal_fraction: Option<f64>,
    pub delay: Option<f32>,
    pub elder_age: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub scheme: Option<u8>,
    pub standard_char: Option<char>,
    pub immortal_char: Option<char>,
    pub dead_char: Option<char>,
}

impl Settings {
    /// Load the default config file. Missing means defaults; unreadable or
    /// malformed logs a warning and also means defaults.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load an explicitly named config file; any failure is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LifeError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LifeError::Settings(e.to_string()))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifeterm")
            .join("config.toml")
    }
}
