pub mod source;
pub mod placeholder;
pub mod file;
pub mod http;

pub use source::{RoundItemSource, SourceKind};
pub use placeholder::PlaceholderSource;
pub use file::FileSource;
pub use http::HttpSource;

use std::time::Duration;
use crate::config::ContentConfig;
use crate::utils::{GameError, GameResult};

/// Builds the configured round item source.
pub fn source_from_config(config: &ContentConfig) -> GameResult<Box<dyn RoundItemSource>> {
    match config.source {
        SourceKind::Placeholder => Ok(Box::new(PlaceholderSource::new())),
        SourceKind::File => {
            let path = config
                .items_file
                .as_ref()
                .ok_or_else(|| GameError::configuration("File source needs content.items_file"))?;
            Ok(Box::new(FileSource::new(path)))
        }
        SourceKind::Http => {
            let source = HttpSource::new(
                config.api_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
                config.retries,
            )?;
            Ok(Box::new(source))
        }
    }
}
