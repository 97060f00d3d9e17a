use serde::{Deserialize, Serialize};

/// Flat completion bonus for guessing every distinct caption word.
pub const COMPLETION_BONUS: u32 = 100;

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Loading,
    Playing,
    Revealed,
    GameOver,
    ContentError { reason: String },
}

/// The player-visible game state. Single source of truth for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub round_number: u32,
    pub total_rounds: u32,
    pub total_score: u32,
    pub round_score: u32,
    pub multiplier: u32,
    pub round_active: bool,
    pub title_complete: bool,
    pub seconds_remaining: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn new(time_limit_seconds: u32) -> Self {
        Self {
            round_number: 1,
            total_rounds: 0,
            total_score: 0,
            round_score: 0,
            multiplier: 0,
            round_active: false,
            title_complete: false,
            seconds_remaining: time_limit_seconds,
            game_over: false,
        }
    }

    /// Points for the next accepted word at the current multiplier.
    pub fn points_for(&self, word: &str) -> u32 {
        word.chars().count() as u32 * (self.multiplier + 1)
    }

    pub fn award(&mut self, points: u32) {
        self.round_score += points;
        self.total_score += points;
    }

    pub fn begin_round(&mut self, round_number: u32, time_limit_seconds: u32) {
        self.round_number = round_number;
        self.round_score = 0;
        self.multiplier = 0;
        self.round_active = true;
        self.title_complete = false;
        self.seconds_remaining = time_limit_seconds;
    }

    pub fn end_round(&mut self) {
        self.round_active = false;
    }

    pub fn finish(&mut self) {
        self.round_active = false;
        self.game_over = true;
    }

    pub fn is_last_round(&self) -> bool {
        self.round_number >= self.total_rounds
    }

    pub fn get_time_formatted(&self) -> String {
        let minutes = self.seconds_remaining / 60;
        let seconds = self.seconds_remaining % 60;

        if minutes > 0 {
            format!("{}m {:02}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_state_creation() {
        let state = GameState::new(60);

        assert_eq!(state.round_number, 1);
        assert_eq!(state.total_score, 0);
        assert_eq!(state.seconds_remaining, 60);
        assert!(!state.round_active);
        assert!(!state.game_over);
    }

    #[test]
    fn test_points_scale_with_multiplier() {
        let mut state = GameState::new(60);
        assert_eq!(state.points_for("car"), 3);

        state.multiplier = 2;
        assert_eq!(state.points_for("fast"), 12);
    }

    #[test]
    fn test_award_updates_both_scores() {
        let mut state = GameState::new(60);
        state.total_score = 50;
        state.award(COMPLETION_BONUS);

        assert_eq!(state.round_score, 100);
        assert_eq!(state.total_score, 150);
    }

    #[test]
    fn test_begin_round_resets_round_fields() {
        let mut state = GameState::new(30);
        state.round_score = 40;
        state.multiplier = 3;
        state.title_complete = true;
        state.seconds_remaining = 0;
        state.total_score = 40;

        state.begin_round(2, 30);

        assert_eq!(state.round_number, 2);
        assert_eq!(state.round_score, 0);
        assert_eq!(state.multiplier, 0);
        assert!(state.round_active);
        assert!(!state.title_complete);
        assert_eq!(state.seconds_remaining, 30);
        assert_eq!(state.total_score, 40);
    }

    #[test]
    fn test_finish_never_leaves_round_active() {
        let mut state = GameState::new(30);
        state.begin_round(1, 30);
        state.finish();

        assert!(state.game_over);
        assert!(!state.round_active);
    }

    #[test]
    fn test_time_formatting() {
        let mut state = GameState::new(120);
        assert_eq!(state.get_time_formatted(), "2m 00s");

        state.seconds_remaining = 75;
        assert_eq!(state.get_time_formatted(), "1m 15s");

        state.seconds_remaining = 9;
        assert_eq!(state.get_time_formatted(), "9s");
    }
}
