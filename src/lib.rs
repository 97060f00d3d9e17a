pub mod core;
pub mod settings;
pub mod content;
pub mod ui;
pub mod config;
pub mod utils;

pub use crate::core::{engine::RoundEngine, game_state::GameState, round::RoundItem, GuessOutcome};
pub use crate::settings::{GameSettings, SettingsProvider};
pub use crate::content::RoundItemSource;
pub use crate::ui::GameInterface;
pub use crate::config::Config;

// Re-export commonly used types
pub type Result<T> = anyhow::Result<T>;

// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
