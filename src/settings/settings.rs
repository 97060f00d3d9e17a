use serde::{Deserialize, Serialize};
use std::fmt;
use crate::utils::{GameError, GameResult};

pub const TIME_LIMIT_CHOICES: [u32; 4] = [30, 60, 90, 120];
pub const ROUND_COUNT_CHOICES: [usize; 4] = [5, 10, 15, 20];

pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 60;
pub const DEFAULT_ROUND_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Random,
    Search,
    /// Reserved. Shown on the settings screen but never playable.
    Build,
}

impl SearchMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random Photos",
            Self::Search => "Search Term",
            Self::Build => "Build Word",
        }
    }

    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Build)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Search => "search",
            Self::Build => "build",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Caption-length cap sent along with item requests.
    pub fn title_length_cap(self) -> usize {
        match self {
            Self::Easy => 50,
            Self::Medium => 100,
            Self::Hard => 200,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty '{}' (expected easy, medium or hard)", other)),
        }
    }
}

/// Configuration fixed before play. Read-only once a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub mode: SearchMode,
    pub search_term: String,
    pub difficulty: Difficulty,
    pub time_limit_seconds: u32,
    pub round_count: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: SearchMode::Random,
            search_term: String::new(),
            difficulty: Difficulty::Medium,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            round_count: DEFAULT_ROUND_COUNT,
        }
    }
}

impl GameSettings {
    pub fn random() -> Self {
        Self::default()
    }

    pub fn search<S: Into<String>>(term: S) -> Self {
        Self {
            mode: SearchMode::Search,
            search_term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_round_count(mut self, rounds: usize) -> Self {
        self.round_count = rounds;
        self
    }

    /// The `query` value sent to an image source.
    pub fn query(&self) -> &str {
        match self.mode {
            SearchMode::Search => self.search_term.trim(),
            _ => "random",
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        if !self.mode.is_enabled() {
            return Err(GameError::settings(format!(
                "Mode '{}' is not available yet",
                self.mode
            )));
        }

        if self.mode == SearchMode::Search && self.search_term.trim().is_empty() {
            return Err(GameError::settings("A search term is required in search mode"));
        }

        if !TIME_LIMIT_CHOICES.contains(&self.time_limit_seconds) {
            return Err(GameError::settings(format!(
                "Time limit must be one of {:?} seconds, got {}",
                TIME_LIMIT_CHOICES, self.time_limit_seconds
            )));
        }

        if !ROUND_COUNT_CHOICES.contains(&self.round_count) {
            return Err(GameError::settings(format!(
                "Round count must be one of {:?}, got {}",
                ROUND_COUNT_CHOICES, self.round_count
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();

        assert_eq!(settings.mode, SearchMode::Random);
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.time_limit_seconds, 60);
        assert_eq!(settings.round_count, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{"mode": "search", "search_term": "dogs"}"#).unwrap();

        assert_eq!(settings, GameSettings::search("dogs"));
    }

    #[test]
    fn test_search_requires_term() {
        assert!(GameSettings::search("   ").validate().is_err());
        assert!(GameSettings::search("beach").validate().is_ok());
    }

    #[test]
    fn test_build_mode_rejected() {
        let settings = GameSettings {
            mode: SearchMode::Build,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_enumerated_choices() {
        assert!(GameSettings::random().with_time_limit(45).validate().is_err());
        assert!(GameSettings::random().with_time_limit(120).validate().is_ok());
        assert!(GameSettings::random().with_round_count(7).validate().is_err());
        assert!(GameSettings::random().with_round_count(20).validate().is_ok());
    }

    #[test]
    fn test_difficulty_caps() {
        assert_eq!(Difficulty::Easy.title_length_cap(), 50);
        assert_eq!(Difficulty::Medium.title_length_cap(), 100);
        assert_eq!(Difficulty::Hard.title_length_cap(), 200);
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_query() {
        assert_eq!(GameSettings::random().query(), "random");
        assert_eq!(GameSettings::search(" sunset ").query(), "sunset");
    }
}
