use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Settings error: {message}")]
    Settings { message: String },

    #[error("Content error: {message}")]
    Content { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Interface error: {message}")]
    Interface { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GameError {
    pub fn settings<S: Into<String>>(message: S) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    pub fn content<S: Into<String>>(message: S) -> Self {
        Self::Content {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn interface<S: Into<String>>(message: S) -> Self {
        Self::Interface {
            message: message.into(),
        }
    }

    /// Whether this error came from fetching round content rather than from
    /// local setup. The engine turns these into its content-error state.
    pub fn is_content_failure(&self) -> bool {
        matches!(self, Self::Content { .. } | Self::Http(_) | Self::Json(_))
    }
}
