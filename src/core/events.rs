use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::core::RoundItem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventType {
    GameStarted,
    ContentUnavailable,
    RoundStarted,
    GuessAccepted,
    GuessRejected,
    RoundRevealed,
    GameOver,
}

/// Why a round stopped accepting guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealCause {
    Timeout,
    Forfeit,
    Completed,
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn game_started(total_rounds: usize, time_limit_seconds: u32) -> Self {
        let data = serde_json::json!({
            "total_rounds": total_rounds,
            "time_limit_seconds": time_limit_seconds
        });
        Self::new(GameEventType::GameStarted, data)
    }

    pub fn content_unavailable(reason: &str) -> Self {
        let data = serde_json::json!({
            "reason": reason
        });
        Self::new(GameEventType::ContentUnavailable, data)
    }

    pub fn round_started(round: u32, item: &RoundItem) -> Self {
        let data = serde_json::json!({
            "round": round,
            "image_url": item.image_url,
            "word_count": item.distinct_words().len()
        });
        Self::new(GameEventType::RoundStarted, data)
    }

    pub fn guess_accepted(round: u32, word: &str, points: u32, multiplier: u32) -> Self {
        let data = serde_json::json!({
            "round": round,
            "word": word,
            "points": points,
            "multiplier": multiplier
        });
        Self::new(GameEventType::GuessAccepted, data)
    }

    pub fn guess_rejected(round: u32, guess: &str, reason: &str) -> Self {
        let data = serde_json::json!({
            "round": round,
            "guess": guess,
            "reason": reason
        });
        Self::new(GameEventType::GuessRejected, data)
    }

    pub fn round_revealed(round: u32, cause: RevealCause, round_score: u32) -> Self {
        let data = serde_json::json!({
            "round": round,
            "cause": cause,
            "round_score": round_score
        });
        Self::new(GameEventType::RoundRevealed, data)
    }

    pub fn game_over(total_score: u32, rounds_played: u32) -> Self {
        let data = serde_json::json!({
            "total_score": total_score,
            "rounds_played": rounds_played
        });
        Self::new(GameEventType::GameOver, data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Bounded history of recent events. The oldest events fall off once the
/// log is full, so nothing that must survive a whole session reads from it.
pub struct EventLogger {
    events: VecDeque<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(64)),
            max_events,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        if self.events.len() == self.max_events {
            self.events.pop_front();
        }
        if self.max_events > 0 {
            self.events.push_back(event.clone());
        }
    }
}

/// Running session figures shown on the game-over screen. Sees every event
/// as it is emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds_played: usize,
    pub rounds_completed: usize,
    pub rounds_timed_out: usize,
    pub rounds_forfeited: usize,
    pub words_guessed: usize,
    pub best_round: Option<(u32, u32)>,
    pub longest_word: Option<String>,
}

impl GameEventHandler for SessionSummary {
    fn handle_event(&mut self, event: &GameEvent) {
        match event.event_type {
            GameEventType::RoundRevealed => {
                self.rounds_played += 1;
                match event.data["cause"].as_str() {
                    Some("completed") => self.rounds_completed += 1,
                    Some("timeout") => self.rounds_timed_out += 1,
                    Some("forfeit") => self.rounds_forfeited += 1,
                    _ => {}
                }

                let round = event.data["round"].as_u64().unwrap_or(0) as u32;
                let score = event.data["round_score"].as_u64().unwrap_or(0) as u32;
                let is_best = self.best_round.map_or(score > 0, |(_, best)| score > best);
                if is_best {
                    self.best_round = Some((round, score));
                }
            }
            GameEventType::GuessAccepted => {
                self.words_guessed += 1;
                if let Some(word) = event.data["word"].as_str() {
                    let longer = self
                        .longest_word
                        .as_ref()
                        .map_or(true, |current| word.chars().count() > current.chars().count());
                    if longer {
                        self.longest_word = Some(word.to_string());
                    }
                }
            }
            _ => {}
        }
    }
}
