use crate::content::RoundItemSource;
use crate::core::{
    EventLogger, GameEvent, GameEventHandler, GameState, GuessedWords, RevealCause, RoundItem,
    RoundPhase, SessionSummary, TickScheduler, TimerHandle, TimerTick, COMPLETION_BONUS,
};
use crate::settings::GameSettings;
use crate::utils::{normalize_guess, GameResult};
use tracing::{info, warn, debug};

/// Result of evaluating one submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Accepted {
        word: String,
        points: u32,
        /// Set when this guess finished the caption and earned the bonus.
        completed: bool,
    },
    AlreadyGuessed,
    NotInCaption,
    Empty,
    /// The round was not accepting guesses.
    Ignored,
}

impl GuessOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// The round/game state machine.
///
/// Owns the settings it was created with, the round items once loaded, and
/// the countdown timer of the active round. The timer handle is taken and
/// dropped on every path that ends a round, which cancels it.
pub struct RoundEngine {
    settings: GameSettings,
    items: Vec<RoundItem>,
    state: GameState,
    guessed: GuessedWords,
    phase: RoundPhase,
    scheduler: Box<dyn TickScheduler>,
    timer: Option<TimerHandle>,
    event_handler: EventLogger,
    summary: SessionSummary,
}

impl RoundEngine {
    pub fn new<S>(settings: GameSettings, scheduler: S) -> Self
    where
        S: TickScheduler + 'static,
    {
        let state = GameState::new(settings.time_limit_seconds);
        Self {
            settings,
            items: Vec::new(),
            state,
            guessed: GuessedWords::new(),
            phase: RoundPhase::Loading,
            scheduler: Box::new(scheduler),
            timer: None,
            event_handler: EventLogger::default(),
            summary: SessionSummary::default(),
        }
    }

    /// Fetches round items from `source` and loads them.
    pub async fn load_from<R>(&mut self, source: &R)
    where
        R: RoundItemSource + ?Sized,
    {
        info!("Fetching round items from {} source", source.name());
        let result = source.fetch_round_items(&self.settings).await;
        self.load(result);
    }

    /// Leaves `Loading` with the outcome of a content fetch. A failed, empty
    /// or unplayable list moves the engine into its content-error state.
    pub fn load(&mut self, result: GameResult<Vec<RoundItem>>) {
        if self.phase != RoundPhase::Loading {
            debug!("Ignoring load outside of the loading phase");
            return;
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                self.fail_content(format!("Failed to fetch images: {}", e));
                return;
            }
        };

        let received = items.len();
        let mut playable: Vec<RoundItem> = items
            .into_iter()
            .filter(|item| !item.words().is_empty())
            .collect();

        if playable.len() < received {
            warn!("Dropped {} round items with empty captions", received - playable.len());
        }

        if playable.is_empty() {
            self.fail_content("No images received".to_string());
            return;
        }

        playable.truncate(self.settings.round_count.max(1));
        self.items = playable;
        self.state.total_rounds = self.items.len() as u32;

        info!(
            "Starting game: {} rounds, {}s per round",
            self.items.len(),
            self.settings.time_limit_seconds
        );
        self.emit_event(GameEvent::game_started(self.items.len(), self.settings.time_limit_seconds));
        self.start_round(1);
    }

    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.phase != RoundPhase::Playing || !self.state.round_active {
            debug!("Guess '{}' ignored: round not active", raw);
            return GuessOutcome::Ignored;
        }

        let guess = normalize_guess(raw);
        if guess.is_empty() {
            return GuessOutcome::Empty;
        }

        let round = self.state.round_number;
        let (in_caption, distinct_words) = match self.current_item() {
            Some(item) => (item.contains_word(&guess), item.distinct_words().len()),
            None => return GuessOutcome::Ignored,
        };

        if !in_caption {
            debug!("Rejected guess '{}': not in caption", guess);
            self.emit_event(GameEvent::guess_rejected(round, &guess, "not_in_caption"));
            return GuessOutcome::NotInCaption;
        }

        if !self.guessed.insert(guess.clone()) {
            debug!("Rejected guess '{}': already guessed", guess);
            self.emit_event(GameEvent::guess_rejected(round, &guess, "already_guessed"));
            return GuessOutcome::AlreadyGuessed;
        }

        let points = self.state.points_for(&guess);
        self.state.award(points);
        self.state.multiplier += 1;

        debug!(
            "Accepted '{}' for {} points (multiplier now {})",
            guess, points, self.state.multiplier
        );
        self.emit_event(GameEvent::guess_accepted(round, &guess, points, self.state.multiplier));

        let completed = self.guessed.len() == distinct_words;
        if completed {
            self.state.award(COMPLETION_BONUS);
            self.state.title_complete = true;
            info!("Round {} caption complete", round);
            self.reveal(RevealCause::Completed);
        }

        GuessOutcome::Accepted {
            word: guess,
            points,
            completed,
        }
    }

    /// One second of the round clock. Reaching zero reveals the round.
    pub fn tick(&mut self) {
        if self.phase != RoundPhase::Playing || !self.state.round_active {
            return;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);

        if self.state.seconds_remaining == 0 {
            info!("Round {} timed out", self.state.round_number);
            self.reveal(RevealCause::Timeout);
        }
    }

    /// Applies a tick from the round timer, discarding ticks armed for a
    /// round that has already ended.
    pub fn on_timer(&mut self, tick: TimerTick) {
        if tick.round != self.state.round_number {
            debug!("Discarding stale tick for round {}", tick.round);
            return;
        }
        self.tick();
    }

    pub fn forfeit_round(&mut self) {
        if self.phase != RoundPhase::Playing {
            debug!("Forfeit ignored: round not active");
            return;
        }
        info!("Round {} forfeited", self.state.round_number);
        self.reveal(RevealCause::Forfeit);
    }

    pub fn advance_round(&mut self) {
        if self.phase != RoundPhase::Revealed {
            debug!("Advance ignored in phase {:?}", self.phase);
            return;
        }

        let next_round = self.state.round_number + 1;
        if next_round as usize > self.items.len() {
            self.release_timer();
            self.state.finish();
            self.phase = RoundPhase::GameOver;
            info!("Game over with {} points", self.state.total_score);
            self.emit_event(GameEvent::game_over(self.state.total_score, self.state.round_number));
            return;
        }

        self.start_round(next_round);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn current_item(&self) -> Option<&RoundItem> {
        if self.items.is_empty() {
            return None;
        }
        self.items.get(self.state.round_number.saturating_sub(1) as usize)
    }

    pub fn guessed_words(&self) -> &GuessedWords {
        &self.guessed
    }

    pub fn total_rounds(&self) -> usize {
        self.items.len()
    }

    pub fn content_error(&self) -> Option<&str> {
        match &self.phase {
            RoundPhase::ContentError { reason } => Some(reason),
            _ => None,
        }
    }

    /// Recent events, oldest first.
    pub fn event_history(&self) -> impl Iterator<Item = &GameEvent> {
        self.event_handler.iter()
    }

    pub fn export_events(&self) -> GameResult<String> {
        Ok(self.event_handler.export_events()?)
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    fn start_round(&mut self, round_number: u32) {
        let Some(item) = self.items.get(round_number as usize - 1).cloned() else {
            warn!("No round item for round {}", round_number);
            return;
        };

        self.guessed.clear();
        self.state.begin_round(round_number, self.settings.time_limit_seconds);
        self.phase = RoundPhase::Playing;
        self.timer = Some(self.scheduler.arm(round_number));

        info!("Round {} of {} started", round_number, self.items.len());
        self.emit_event(GameEvent::round_started(round_number, &item));
    }

    fn reveal(&mut self, cause: RevealCause) {
        if !self.state.round_active {
            return;
        }

        self.release_timer();
        self.state.end_round();
        self.phase = RoundPhase::Revealed;

        self.emit_event(GameEvent::round_revealed(
            self.state.round_number,
            cause,
            self.state.round_score,
        ));
    }

    fn fail_content(&mut self, reason: String) {
        warn!("No playable content: {}", reason);
        self.release_timer();
        self.state.end_round();
        self.emit_event(GameEvent::content_unavailable(&reason));
        self.phase = RoundPhase::ContentError { reason };
    }

    fn release_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn emit_event(&mut self, event: GameEvent) {
        self.summary.handle_event(&event);
        self.event_handler.handle_event(&event);
    }
}
