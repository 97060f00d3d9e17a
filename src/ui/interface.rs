use dialoguer::{Confirm, Input, Select};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::content::{source_from_config, RoundItemSource};
use crate::core::{IntervalScheduler, RoundEngine, RoundPhase};
use crate::settings::{
    Difficulty, GameSettings, SearchMode, SettingsProvider, ROUND_COUNT_CHOICES, TIME_LIMIT_CHOICES,
};
use crate::ui::{Display, ThemeManager};
use crate::utils::{GameError, GameResult};
use tracing::{debug, info, warn, Level};

/// What the player typed during a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Guess(String),
    Forfeit,
    Quit,
}

impl PlayerCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/forfeit" | "/f" => Self::Forfeit,
            "/quit" | "/q" => Self::Quit,
            other => Self::Guess(other.to_string()),
        }
    }
}

/// How a single game ended from the interface's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameEnd {
    Finished,
    ContentError,
    Quit,
}

pub struct GameInterface {
    display: Display,
    source: Box<dyn RoundItemSource>,
    config: Config,
}

impl GameInterface {
    pub async fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        let theme_manager = ThemeManager::new();
        let mut display = Display::new(theme_manager, config.ui.text_width)
            .map_err(|e| GameError::interface(format!("Failed to create display: {}", e)))?;

        if !display.set_theme(&config.ui.theme) {
            let themes = display.get_available_themes().join(", ");
            warn!("Unknown theme '{}', using default (available: {})", config.ui.theme, themes);
        }

        let source = source_from_config(&config.content)?;

        Ok(Self {
            display,
            source,
            config,
        })
    }

    pub async fn run(&mut self) -> GameResult<()> {
        info!("Starting game interface");

        self.display.clear_screen().ok();
        self.show_game_title()?;

        let settings = if self.config.ui.skip_settings_menu {
            self.config.settings()
        } else {
            self.settings_menu(self.config.settings())?
        };
        settings.validate()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match self.play(settings.clone(), &mut lines).await? {
                GameEnd::Quit | GameEnd::ContentError => break,
                GameEnd::Finished => {}
            }

            self.display.show_prompt("Play again? [y/N]")?;
            match lines.next_line().await? {
                Some(answer) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") => continue,
                _ => break,
            }
        }

        self.display.show_success("Thanks for playing Stock Photo Frenzy!").ok();
        Ok(())
    }

    fn show_game_title(&self) -> GameResult<()> {
        self.display.show_title("📸 Stock Photo Frenzy")?;
        self.display.show_message("Name the words in the hidden caption before time runs out.", "info")?;
        self.display.show_message(&format!("Version {}", crate::VERSION), "info")?;
        println!();
        Ok(())
    }

    /// The settings screen. Returns settings the player confirmed.
    pub fn settings_menu(&self, initial: GameSettings) -> GameResult<GameSettings> {
        let mut settings = initial;

        let modes = [SearchMode::Random, SearchMode::Search, SearchMode::Build];
        let mode_labels: Vec<String> = modes
            .iter()
            .map(|mode| {
                if mode.is_enabled() {
                    mode.label().to_string()
                } else {
                    format!("{} (coming soon)", mode.label())
                }
            })
            .collect();

        loop {
            let default = modes.iter().position(|m| *m == settings.mode).unwrap_or(0);
            let selection = Select::new()
                .with_prompt("Photo source")
                .items(&mode_labels)
                .default(default)
                .interact()
                .map_err(|e| GameError::interface(format!("Mode selection error: {}", e)))?;

            if modes[selection].is_enabled() {
                settings.mode = modes[selection];
                break;
            }
            self.display.show_warning("That mode is not available yet.")?;
        }

        if settings.mode == SearchMode::Search {
            settings.search_term = Input::<String>::new()
                .with_prompt("Search term")
                .with_initial_text(settings.search_term.clone())
                .validate_with(|term: &String| -> Result<(), &'static str> {
                    if term.trim().is_empty() {
                        Err("Please enter a search term")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()
                .map_err(|e| GameError::interface(format!("Search term input error: {}", e)))?;
        } else {
            settings.search_term.clear();
        }

        let difficulty_labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();
        let selection = Select::new()
            .with_prompt("Difficulty")
            .items(&difficulty_labels)
            .default(Difficulty::ALL.iter().position(|d| *d == settings.difficulty).unwrap_or(1))
            .interact()
            .map_err(|e| GameError::interface(format!("Difficulty selection error: {}", e)))?;
        settings.difficulty = Difficulty::ALL[selection];

        let selection = Select::new()
            .with_prompt("Time limit (seconds)")
            .items(&TIME_LIMIT_CHOICES)
            .default(TIME_LIMIT_CHOICES.iter().position(|t| *t == settings.time_limit_seconds).unwrap_or(1))
            .interact()
            .map_err(|e| GameError::interface(format!("Time limit selection error: {}", e)))?;
        settings.time_limit_seconds = TIME_LIMIT_CHOICES[selection];

        let selection = Select::new()
            .with_prompt("Number of rounds")
            .items(&ROUND_COUNT_CHOICES)
            .default(ROUND_COUNT_CHOICES.iter().position(|r| *r == settings.round_count).unwrap_or(1))
            .interact()
            .map_err(|e| GameError::interface(format!("Round selection error: {}", e)))?;
        settings.round_count = ROUND_COUNT_CHOICES[selection];

        let start = Confirm::new()
            .with_prompt("Start game?")
            .default(true)
            .interact()
            .map_err(|e| GameError::interface(format!("Confirmation error: {}", e)))?;

        if !start {
            return self.settings_menu(settings);
        }

        info!(
            "Settings chosen: mode={}, difficulty={}, {}s, {} rounds",
            settings.mode, settings.difficulty, settings.time_limit_seconds, settings.round_count
        );
        Ok(settings)
    }

    async fn play(&self, settings: GameSettings, lines: &mut Lines<BufReader<Stdin>>) -> GameResult<GameEnd> {
        let (tick_tx, mut ticks) = mpsc::unbounded_channel();
        let scheduler = IntervalScheduler::new(Duration::from_millis(self.config.ui.tick_interval_ms), tick_tx);
        let mut engine = RoundEngine::new(settings, scheduler);

        self.display.show_message("Loading images...", "info")?;
        engine.load_from(self.source.as_ref()).await;

        if let Some(reason) = engine.content_error() {
            self.display.show_error(reason)?;
            self.display.show_message("Restart the game to try again.", "info")?;
            return Ok(GameEnd::ContentError);
        }

        self.render_round(&engine)?;
        let warn_below = self.config.ui.low_time_warning_secs;

        loop {
            let phase = engine.phase().clone();
            match phase {
                RoundPhase::Playing => {
                    tokio::select! {
                        Some(tick) = ticks.recv() => {
                            engine.on_timer(tick);
                            let state = engine.state();
                            if engine.phase() == &RoundPhase::Revealed {
                                self.display.show_warning("Time's up!")?;
                                self.render_reveal(&engine)?;
                            } else if state.seconds_remaining % 10 == 0 || state.seconds_remaining <= 5 {
                                self.display.show_timer(state, warn_below)?;
                            }
                        }
                        line = lines.next_line() => {
                            let Some(line) = line? else {
                                return Ok(GameEnd::Quit);
                            };
                            match PlayerCommand::parse(&line) {
                                PlayerCommand::Quit => return Ok(GameEnd::Quit),
                                PlayerCommand::Forfeit => {
                                    engine.forfeit_round();
                                    self.render_reveal(&engine)?;
                                }
                                PlayerCommand::Guess(text) => {
                                    let outcome = engine.submit_guess(&text);
                                    self.display.show_guess_outcome(&outcome, engine.state())?;
                                    if engine.phase() == &RoundPhase::Revealed {
                                        self.render_reveal(&engine)?;
                                    }
                                }
                            }
                        }
                    }
                }
                RoundPhase::Revealed => {
                    let prompt = if engine.state().is_last_round() {
                        "Press Enter to see your final score (/q to quit)"
                    } else {
                        "Press Enter for the next round (/q to quit)"
                    };
                    self.display.show_prompt(prompt)?;

                    match lines.next_line().await? {
                        None => return Ok(GameEnd::Quit),
                        Some(line) if PlayerCommand::parse(&line) == PlayerCommand::Quit => {
                            return Ok(GameEnd::Quit);
                        }
                        Some(_) => {
                            engine.advance_round();
                            if engine.phase() == &RoundPhase::Playing {
                                self.render_round(&engine)?;
                            }
                        }
                    }
                }
                RoundPhase::GameOver => {
                    self.display.clear_screen().ok();
                    if tracing::enabled!(Level::DEBUG) {
                        debug!("Session events:\n{}", engine.export_events()?);
                    }
                    self.display.show_game_over(engine.state(), engine.summary())?;
                    return Ok(GameEnd::Finished);
                }
                RoundPhase::Loading | RoundPhase::ContentError { .. } => {
                    return Ok(GameEnd::ContentError);
                }
            }
        }
    }

    fn render_round(&self, engine: &RoundEngine) -> GameResult<()> {
        self.display.clear_screen().ok();
        self.display.show_round_header(engine.state())?;

        if let Some(item) = engine.current_item() {
            self.display.show_image(item)?;
        }

        self.display.show_message(
            "Type a word from the caption and press Enter. /f to forfeit, /q to quit.",
            "info",
        )?;
        Ok(())
    }

    fn render_reveal(&self, engine: &RoundEngine) -> GameResult<()> {
        self.display.show_round_header(engine.state())?;
        self.display.show_guessed_words(engine.guessed_words())?;
        if let Some(item) = engine.current_item() {
            self.display.show_reveal(item, engine.state())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(PlayerCommand::parse("/f"), PlayerCommand::Forfeit);
        assert_eq!(PlayerCommand::parse(" /forfeit "), PlayerCommand::Forfeit);
        assert_eq!(PlayerCommand::parse("/q"), PlayerCommand::Quit);
        assert_eq!(PlayerCommand::parse("  Beach "), PlayerCommand::Guess("Beach".to_string()));
    }

    #[tokio::test]
    async fn test_interface_creation() {
        let interface = GameInterface::new(Config::default()).await;
        assert!(interface.is_ok());
    }

    #[tokio::test]
    async fn test_interface_rejects_file_source_without_path() {
        let mut config = Config::default();
        config.content.source = crate::content::SourceKind::File;

        assert!(GameInterface::new(config).await.is_err());
    }
}
