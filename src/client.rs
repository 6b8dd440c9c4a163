use crate::config::Config;
use crate::error::{FeedError, FeedResult};
use std::time::Duration;

/// HTTP client for the single plain GET a feed cycle performs.
///
/// No auth, no retries: the feed URL is public and a failed cycle is
/// surfaced to the session instead of being papered over here.
#[derive(Clone, Debug)]
pub struct FeedClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl FeedClient {
    pub fn new(config: &Config) -> FeedResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("nextroom/{}", env!("CARGO_PKG_VERSION")));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Fetch the raw feed body as text.
    pub async fn fetch_raw(&self, url: &str) -> FeedResult<String> {
        tracing::debug!(%url, "fetching feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "feed host refused the request");
            return Err(FeedError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::Timeout(self.timeout_secs)
        } else {
            FeedError::Network(err)
        }
    }
}
