pub mod settings;
pub mod provider;

pub use settings::{
    Difficulty, GameSettings, SearchMode, DEFAULT_ROUND_COUNT, DEFAULT_TIME_LIMIT_SECONDS,
    ROUND_COUNT_CHOICES, TIME_LIMIT_CHOICES,
};
pub use provider::{SettingsProvider, StaticSettings};
