use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::{LookaheadSelector, Priority};
use crate::error::ConfigError;
use crate::game::Piece;

/// Whether player two is the computer or a second person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    VsComputer,
    TwoPlayer,
}

/// Players and mode for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Asked at the console when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<GameMode>,
    pub player_one: String,
    pub player_two: String,
    pub computer: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: None,
            player_one: "Player 1".to_string(),
            player_two: "Player 2".to_string(),
            computer: "Computer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub priority: Priority,
    /// Seed for the random fallback; the OS RNG is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AiConfig {
    /// Build the computer opponent described by this section.
    pub fn selector(&self, name: &str, piece: Piece) -> LookaheadSelector {
        match self.seed {
            Some(seed) => LookaheadSelector::with_seed(name, piece, self.priority, seed),
            None => LookaheadSelector::new(name, piece, self.priority),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ai: AiConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("game.player_one", &self.game.player_one),
            ("game.player_two", &self.game.player_two),
            ("game.computer", &self.game.computer),
        ];
        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }

        if self.log.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "log.level '{}' is not one of trace, debug, info, warn, error",
                self.log.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
