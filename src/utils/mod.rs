pub mod errors;
pub mod text;

pub use errors::{GameError, GameResult};
pub use text::{caption_words, distinct_caption_words, normalize_guess, truncate_title};
