use std::time::Duration;
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use crate::content::RoundItemSource;
use crate::core::RoundItem;
use crate::settings::GameSettings;
use crate::utils::{GameError, GameResult};
use tracing::{debug, info, warn};

pub const IMAGES_ENDPOINT: &str = "/api/get_random_images";

/// Fetches round items from an image API over HTTP.
///
/// Issues `GET {base_url}/api/get_random_images?query=..&numImages=..&titleLength=..`
/// and expects a JSON array of `{url, title, truncatedTitle}` objects. Failed
/// requests are retried with a doubling backoff.
pub struct HttpSource {
    client: Client,
    base_url: String,
    retries: u32,
    backoff: Duration,
}

impl HttpSource {
    pub fn new<S: Into<String>>(base_url: S, timeout: Duration, retries: u32) -> GameResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retries,
            backoff: Duration::from_millis(500),
        })
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, IMAGES_ENDPOINT)
    }

    /// Query parameters sent with every request.
    pub fn query_params(settings: &GameSettings) -> Vec<(&'static str, String)> {
        vec![
            ("query", settings.query().to_string()),
            ("numImages", settings.round_count.to_string()),
            ("titleLength", settings.difficulty.title_length_cap().to_string()),
        ]
    }

    async fn request_once(&self, settings: &GameSettings) -> GameResult<Vec<RoundItem>> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&Self::query_params(settings))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GameError::content(format!("Image API returned {}", status)));
        }

        let items: Vec<RoundItem> = response.json().await?;
        if items.is_empty() {
            return Err(GameError::content("No images received from API"));
        }

        Ok(items)
    }

    async fn fetch(&self, settings: &GameSettings) -> GameResult<Vec<RoundItem>> {
        info!("Requesting {} images from {}", settings.round_count, self.endpoint());

        let mut delay = self.backoff;
        let mut attempt = 0;

        loop {
            match self.request_once(settings).await {
                Ok(items) => {
                    info!("Received {} images", items.len());
                    return Ok(items);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!("Image request failed ({}), retry {} of {} in {:?}", e, attempt, self.retries, delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    debug!("Giving up on image request after {} attempts", attempt + 1);
                    return Err(e);
                }
            }
        }
    }
}

impl RoundItemSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_round_items<'a>(
        &'a self,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, GameResult<Vec<RoundItem>>> {
        self.fetch(settings).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves each canned response to one connection, in order.
    async fn serve(responses: Vec<(u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await.unwrap();
                let reply = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_query_params() {
        let settings = GameSettings::search("mountain lake").with_difficulty(Difficulty::Hard).with_round_count(5);

        assert_eq!(
            HttpSource::query_params(&settings),
            vec![
                ("query", "mountain lake".to_string()),
                ("numImages", "5".to_string()),
                ("titleLength", "200".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let source = HttpSource::new("http://localhost:5000/", Duration::from_secs(1), 0).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:5000/api/get_random_images");
    }

    #[tokio::test]
    async fn test_fetch_items() {
        let base = serve(vec![(
            200,
            r#"[{"url": "https://img/1", "title": "red car fast", "truncatedTitle": "red car"}]"#,
        )])
        .await;

        let source = HttpSource::new(base, Duration::from_secs(5), 0).unwrap();
        let items = source.fetch_round_items(&GameSettings::default()).await.unwrap();

        assert_eq!(items, vec![RoundItem::new("https://img/1", "red car fast", "red car")]);
    }

    #[tokio::test]
    async fn test_retry_after_server_error() {
        let base = serve(vec![
            (500, r#"{"error": "Failed to fetch images"}"#),
            (200, r#"[{"url": "u", "title": "blue sky"}]"#),
        ])
        .await;

        let source = HttpSource::new(base, Duration::from_secs(5), 2)
            .unwrap()
            .with_backoff(Duration::from_millis(10));
        let items = source.fetch_round_items(&GameSettings::default()).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].full_title, "blue sky");
    }

    #[tokio::test]
    async fn test_empty_response_is_content_error() {
        let base = serve(vec![(200, "[]")]).await;

        let source = HttpSource::new(base, Duration::from_secs(5), 0).unwrap();
        let err = source.fetch_round_items(&GameSettings::default()).await.unwrap_err();

        assert!(err.is_content_failure());
    }
}
