use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::content::SourceKind;
use crate::settings::{Difficulty, GameSettings, SearchMode, SettingsProvider};
use crate::utils::{GameError, GameResult};

pub const ENV_PREFIX: &str = "FRENZY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub content: ContentConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Settings preset. Anything left unset falls back to the game defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_file: Option<PathBuf>,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    pub text_width: usize,
    pub skip_settings_menu: bool,
    pub tick_interval_ms: u64,
    pub low_time_warning_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Placeholder,
            items_file: None,
            api_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 10,
            retries: 2,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            text_width: 80,
            skip_settings_menu: false,
            tick_interval_ms: 1000,
            low_time_warning_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl GameConfig {
    pub fn to_settings(&self) -> GameSettings {
        let defaults = GameSettings::default();
        GameSettings {
            mode: self.mode.unwrap_or(defaults.mode),
            search_term: self.search_term.clone().unwrap_or(defaults.search_term),
            difficulty: self.difficulty.unwrap_or(defaults.difficulty),
            time_limit_seconds: self.time_limit_seconds.unwrap_or(defaults.time_limit_seconds),
            round_count: self.round_count.unwrap_or(defaults.round_count),
        }
    }
}

impl Config {
    /// Layers built-in defaults, the TOML file at `path` (if any) and
    /// `FRENZY__SECTION__KEY` environment variables, in that order.
    pub fn load(path: Option<&Path>) -> GameResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let default_config = Self::default();
            default_config.save_to_file(path)?;
        }

        Self::load(Some(path))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GameError::configuration(format!("Failed to create config directory: {}", e)))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| GameError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.ui.text_width < 40 {
            return Err(GameError::configuration("Text width must be at least 40"));
        }
        if self.ui.tick_interval_ms == 0 {
            return Err(GameError::configuration("Tick interval must be greater than 0"));
        }

        match self.content.source {
            SourceKind::File if self.content.items_file.is_none() => {
                return Err(GameError::configuration("File content source needs an items file"));
            }
            SourceKind::Http if self.content.api_url.trim().is_empty() => {
                return Err(GameError::configuration("HTTP content source needs an API URL"));
            }
            SourceKind::Http if self.content.request_timeout_secs == 0 => {
                return Err(GameError::configuration("Request timeout must be greater than 0"));
            }
            _ => {}
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
        if cli_config.skip_settings_menu {
            self.ui.skip_settings_menu = true;
        }
        if let Some(source) = cli_config.source {
            self.content.source = source;
        }
        if let Some(items_file) = cli_config.items_file {
            self.content.items_file = Some(items_file);
            if cli_config.source.is_none() {
                self.content.source = SourceKind::File;
            }
        }
        if let Some(api_url) = cli_config.api_url {
            self.content.api_url = api_url;
        }
        if let Some(search_term) = cli_config.search_term {
            self.game.mode = Some(SearchMode::Search);
            self.game.search_term = Some(search_term);
        }
        if let Some(difficulty) = cli_config.difficulty {
            self.game.difficulty = Some(difficulty);
        }
        if let Some(seconds) = cli_config.time_limit_seconds {
            self.game.time_limit_seconds = Some(seconds);
        }
        if let Some(rounds) = cli_config.round_count {
            self.game.round_count = Some(rounds);
        }
    }
}

impl SettingsProvider for Config {
    fn settings(&self) -> GameSettings {
        self.game.to_settings()
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
    pub skip_settings_menu: bool,
    pub source: Option<SourceKind>,
    pub items_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub search_term: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub time_limit_seconds: Option<u32>,
    pub round_count: Option<usize>,
}
