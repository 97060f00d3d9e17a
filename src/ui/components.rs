use console::Term;
use std::io::{self, Write};
use crate::ui::ThemeManager;
use crate::core::{GameState, GuessOutcome, GuessedWords, RoundItem, SessionSummary};

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    text_width: usize,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, text_width: usize) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
            text_width,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");

        let border = "═".repeat(self.text_width);
        let styled_border = self.theme_manager.apply_style(&border, "separator");

        writeln!(io::stdout(), "{}", styled_title)?;
        writeln!(io::stdout(), "{}", styled_border)?;
        writeln!(io::stdout())?;

        Ok(())
    }

    pub fn show_round_header(&self, state: &GameState) -> io::Result<()> {
        let header = self.theme_manager.apply_style(&format_header(state), "header");
        writeln!(io::stdout(), "{}", header)?;
        self.show_separator()
    }

    pub fn show_image(&self, item: &RoundItem) -> io::Result<()> {
        if item.image_url.is_empty() {
            return self.show_error("Error loading image.");
        }

        writeln!(io::stdout(), "🖼  {}", item.image_url)?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_guessed_words(&self, guessed: &GuessedWords) -> io::Result<()> {
        let words = format!("Guessed words: {}", guessed.joined(", "));
        self.show_wrapped_text(&words, "guessed")
    }

    pub fn show_timer(&self, state: &GameState, warn_below: u32) -> io::Result<()> {
        let style = if state.seconds_remaining <= warn_below { "timer_low" } else { "timer" };
        let text = format!("⏱  {} left", state.get_time_formatted());
        let styled = self.theme_manager.apply_style(&text, style);
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn show_guess_outcome(&self, outcome: &GuessOutcome, state: &GameState) -> io::Result<()> {
        match outcome {
            GuessOutcome::Accepted { word, points, completed } => {
                self.show_message(&format_accepted(word, *points, state), "accepted")?;
                if *completed {
                    self.show_message("🎉 Title complete! +100 bonus", "bonus")?;
                }
            }
            GuessOutcome::AlreadyGuessed => self.show_message("Already guessed", "rejected")?,
            GuessOutcome::NotInCaption => self.show_message("Not in the title", "rejected")?,
            GuessOutcome::Empty | GuessOutcome::Ignored => {}
        }
        Ok(())
    }

    pub fn show_reveal(&self, item: &RoundItem, state: &GameState) -> io::Result<()> {
        self.show_separator()?;
        let caption = if item.full_title.is_empty() {
            "No title available"
        } else {
            item.full_title.as_str()
        };
        self.show_wrapped_text(&format!("Full title: {}", caption), "caption")?;

        let score = format!("Points this round: {}", state.round_score);
        self.show_message(&score, "score")?;
        Ok(())
    }

    pub fn show_game_over(&self, state: &GameState, summary: &SessionSummary) -> io::Result<()> {
        self.show_title("Game Over!")?;
        self.show_message(&format!("Final Score: {}", state.total_score), "score")?;
        writeln!(io::stdout())?;

        for line in format_summary(summary) {
            self.show_message(&line, "info")?;
        }

        self.show_separator()
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("✅ {}", message), "success")
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("⚠️ {}", message), "warning")
    }

    pub fn show_separator(&self) -> io::Result<()> {
        let separator = "━".repeat(self.text_width);
        let styled = self.theme_manager.apply_style(&separator, "separator");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn show_prompt(&self, prompt: &str) -> io::Result<()> {
        let styled_prompt = self.theme_manager.apply_style(prompt, "info");
        print!("{} ", styled_prompt);
        io::stdout().flush()
    }

    fn show_wrapped_text(&self, text: &str, style: &str) -> io::Result<()> {
        for line in wrap_text(text, self.text_width) {
            let styled_line = self.theme_manager.apply_style(&line, style);
            writeln!(io::stdout(), "{}", styled_line)?;
        }
        Ok(())
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}

pub fn format_header(state: &GameState) -> String {
    format!(
        "Round: {} of {} | Points: {} | Time: {}s",
        state.round_number, state.total_rounds, state.total_score, state.seconds_remaining
    )
}

/// Feedback for an accepted word. `state` is read after the guess was scored,
/// so its multiplier is the factor that guess earned.
pub fn format_accepted(word: &str, points: u32, state: &GameState) -> String {
    format!("✔ {} +{} (multiplier x{})", word, points, state.multiplier)
}

pub fn format_summary(summary: &SessionSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Rounds played: {}", summary.rounds_played),
        format!(
            "Titles completed: {} | Timed out: {} | Forfeited: {}",
            summary.rounds_completed, summary.rounds_timed_out, summary.rounds_forfeited
        ),
        format!("Words guessed: {}", summary.words_guessed),
    ];

    if let Some((round, score)) = summary.best_round {
        lines.push(format!("Best round: {} ({} points)", round, score));
    }
    if let Some(word) = &summary.longest_word {
        lines.push(format!("Longest word: {}", word));
    }

    lines
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if !current_line.is_empty() && current_line.chars().count() + word.chars().count() + 1 > width {
            lines.push(std::mem::take(&mut current_line));
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualScheduler, RoundEngine};
    use crate::settings::GameSettings;

    #[test]
    fn test_display_creation() {
        let display = Display::new(ThemeManager::new(), 80);
        assert!(display.is_ok());
    }

    #[test]
    fn test_format_header() {
        let mut state = GameState::new(60);
        state.total_rounds = 10;
        state.total_score = 121;
        state.seconds_remaining = 42;

        assert_eq!(format_header(&state), "Round: 1 of 10 | Points: 121 | Time: 42s");
    }

    #[test]
    fn test_format_accepted_shows_factor_used() {
        let mut engine = RoundEngine::new(GameSettings::default(), ManualScheduler::new());
        engine.load(Ok(vec![RoundItem::new("https://img/1", "red car fast", "red car fast")]));

        let GuessOutcome::Accepted { word, points, .. } = engine.submit_guess("red") else {
            panic!("red should be accepted");
        };
        assert_eq!(format_accepted(&word, points, engine.state()), "✔ red +3 (multiplier x1)");

        let GuessOutcome::Accepted { word, points, .. } = engine.submit_guess("car") else {
            panic!("car should be accepted");
        };
        assert_eq!(format_accepted(&word, points, engine.state()), "✔ car +6 (multiplier x2)");
    }

    #[test]
    fn test_format_summary() {
        let summary = SessionSummary {
            rounds_played: 2,
            rounds_completed: 1,
            rounds_timed_out: 1,
            rounds_forfeited: 0,
            words_guessed: 3,
            best_round: Some((1, 121)),
            longest_word: None,
        };

        let lines = format_summary(&summary);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "Best round: 1 (121 points)");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);

        assert!(wrap_text("   ", 10).is_empty());
    }
}
