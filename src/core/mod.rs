pub mod engine;
pub mod game_state;
pub mod round;
pub mod events;
pub mod timer;

pub use engine::{GuessOutcome, RoundEngine};
pub use game_state::{GameState, RoundPhase, COMPLETION_BONUS};
pub use round::{GuessedWords, RoundItem};
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType, RevealCause, SessionSummary};
pub use timer::{IntervalScheduler, ManualScheduler, TickScheduler, TimerHandle, TimerTick};
