use futures::future::BoxFuture;
use crate::core::RoundItem;
use crate::settings::GameSettings;
use crate::utils::GameResult;

/// Produces the round items for a game played with the given settings.
///
/// Fetching may fail or come back empty; callers hand the result straight to
/// the engine, which treats both as "no playable content".
pub trait RoundItemSource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch_round_items<'a>(
        &'a self,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, GameResult<Vec<RoundItem>>>;
}

/// Which collaborator supplies round items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Placeholder,
    File,
    Http,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "file" => Ok(Self::File),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown content source '{}'", other)),
        }
    }
}
