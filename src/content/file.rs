use std::path::{Path, PathBuf};
use futures::future::{BoxFuture, FutureExt};
use tokio::fs;
use crate::content::RoundItemSource;
use crate::core::RoundItem;
use crate::settings::GameSettings;
use crate::utils::{truncate_title, GameError, GameResult};
use tracing::{info, warn};

/// Reads round items from a JSON array on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_items(&self, settings: &GameSettings) -> GameResult<Vec<RoundItem>> {
        info!("Loading round items from: {:?}", self.path);

        if !self.path.exists() {
            return Err(GameError::content(format!("Items file not found: {:?}", self.path)));
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| GameError::content(format!("Failed to read items file: {}", e)))?;

        let mut items: Vec<RoundItem> = serde_json::from_str(&content)
            .map_err(|e| GameError::content(format!("Failed to parse items JSON: {}", e)))?;

        let cap = settings.difficulty.title_length_cap();
        for item in &mut items {
            if item.display_title.is_empty() {
                item.display_title = truncate_title(&item.full_title, cap);
            }
        }

        if items.len() < settings.round_count {
            warn!(
                "Items file holds {} entries, fewer than the {} rounds requested",
                items.len(),
                settings.round_count
            );
        }

        info!("Loaded {} round items", items.len());
        Ok(items)
    }
}

impl RoundItemSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_round_items<'a>(
        &'a self,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, GameResult<Vec<RoundItem>>> {
        self.load_items(settings).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_items_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[
                {"url": "https://img/1", "title": "A red car driving fast", "truncatedTitle": "A red car"},
                {"url": "https://img/2", "title": "Two dogs playing in the snow on a bright winter morning"}
            ]"#,
        )
        .unwrap();

        let settings = GameSettings::default().with_difficulty(Difficulty::Easy);
        let items = FileSource::new(&path).fetch_round_items(&settings).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_title, "A red car");
        assert_eq!(items[1].display_title.chars().count(), 53);
        assert!(items[1].display_title.ends_with("..."));
    }

    #[tokio::test]
    async fn test_missing_file_is_content_error() {
        let temp_dir = tempdir().unwrap();
        let source = FileSource::new(temp_dir.path().join("nope.json"));

        let err = source.fetch_round_items(&GameSettings::default()).await.unwrap_err();
        assert!(err.is_content_failure());
    }

    #[tokio::test]
    async fn test_malformed_file_is_content_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSource::new(&path)
            .fetch_round_items(&GameSettings::default())
            .await
            .unwrap_err();
        assert!(err.is_content_failure());
    }
}
