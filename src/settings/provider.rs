use crate::settings::GameSettings;

/// Supplies the settings a game is played with. Read once at game start.
pub trait SettingsProvider {
    fn settings(&self) -> GameSettings;
}

/// A provider that hands out a fixed set of settings.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    settings: GameSettings,
}

impl StaticSettings {
    pub fn new(settings: GameSettings) -> Self {
        Self { settings }
    }
}

impl SettingsProvider for StaticSettings {
    fn settings(&self) -> GameSettings {
        self.settings.clone()
    }
}

impl From<GameSettings> for StaticSettings {
    fn from(settings: GameSettings) -> Self {
        Self::new(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    #[test]
    fn test_static_settings() {
        let provider = StaticSettings::new(GameSettings::search("cats").with_difficulty(Difficulty::Hard));
        let settings = provider.settings();

        assert_eq!(settings.search_term, "cats");
        assert_eq!(settings.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_default_provider() {
        let provider = StaticSettings::default();
        assert_eq!(provider.settings(), GameSettings::default());
    }
}
