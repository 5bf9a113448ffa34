use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::problem::{Difficulty, Operation};
use crate::session::attempt::EntryOrder;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_operation")]
    pub operation: Operation,
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
    #[serde(default)]
    pub entry_order: EntryOrder,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Fixed RNG seed for reproducible problem sequences.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_difficulty() -> Difficulty {
    Difficulty::ThreeDigit
}
fn default_operation() -> Operation {
    Operation::Addition
}
fn default_show_hints() -> bool {
    false
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            operation: default_operation(),
            show_hints: default_show_hints(),
            entry_order: EntryOrder::default(),
            theme: default_theme(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("regroup")
            .join("config.toml")
    }

    /// Resets a theme name that no longer resolves to the default.
    pub fn validate(&mut self, available_themes: &[String]) {
        if !available_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
    }
}
