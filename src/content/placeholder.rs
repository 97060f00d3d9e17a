use futures::future::{self, BoxFuture, FutureExt};
use crate::content::RoundItemSource;
use crate::core::RoundItem;
use crate::settings::GameSettings;
use crate::utils::GameResult;
use tracing::debug;

/// Generates synthetic picsum.photos entries. Stands in for a real image search.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSource;

impl PlaceholderSource {
    pub fn new() -> Self {
        Self
    }

    pub fn items(count: usize) -> Vec<RoundItem> {
        (0..count)
            .map(|i| {
                RoundItem::new(
                    format!("https://picsum.photos/800/{}", 600 + i),
                    format!(
                        "Sample Image {} with some descriptive text that might be useful for guessing",
                        i + 1
                    ),
                    format!("Sample Image {}", i + 1),
                )
            })
            .collect()
    }
}

impl RoundItemSource for PlaceholderSource {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn fetch_round_items<'a>(
        &'a self,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, GameResult<Vec<RoundItem>>> {
        debug!(
            "Generating {} placeholder images for query '{}'",
            settings.round_count,
            settings.query()
        );
        future::ready(Ok(Self::items(settings.round_count))).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_items() {
        let items = PlaceholderSource::items(3);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].image_url, "https://picsum.photos/800/600");
        assert_eq!(items[2].image_url, "https://picsum.photos/800/602");
        assert_eq!(items[1].display_title, "Sample Image 2");
        assert!(items[1].full_title.starts_with("Sample Image 2 with"));
    }

    #[test]
    fn test_fetch_uses_round_count() {
        let settings = GameSettings::default().with_round_count(15);
        let items = tokio_test::block_on(PlaceholderSource::new().fetch_round_items(&settings)).unwrap();

        assert_eq!(items.len(), 15);
    }
}
