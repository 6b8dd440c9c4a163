use crate::client::FeedClient;
use crate::config::Config;
use crate::error::{FeedError, FeedResult};
use crate::model::{self, FeedComponent, UpcomingEvent};
use crate::resolve;
use crate::store::UrlStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Where the session currently stands. Derived from the fields on demand so
/// a fetch-parse cycle is one atomic state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unconfigured,
    Loading,
    Ready,
    Error,
}

/// Owns one feed subscription: the configured URL, the parsed component
/// snapshot, and the refresh lifecycle around them.
///
/// A failed cycle records the error and keeps the previous snapshot; stale
/// events beat a blanked screen, and the caller can retry or reset.
pub struct FeedSession<S: UrlStore> {
    client: FeedClient,
    store: S,
    event_limit: usize,
    url: Option<String>,
    owner_token: Option<String>,
    components: BTreeMap<String, FeedComponent>,
    refreshing: bool,
    last_error: Option<String>,
}

impl<S: UrlStore> FeedSession<S> {
    pub fn new(config: &Config, store: S) -> FeedResult<Self> {
        Ok(Self {
            client: FeedClient::new(config)?,
            store,
            event_limit: config.event_limit,
            url: None,
            owner_token: None,
            components: BTreeMap::new(),
            refreshing: false,
            last_error: None,
        })
    }

    /// Adopt a previously persisted URL without fetching. Returns whether
    /// one was found; follow up with `refresh` to populate the snapshot.
    pub fn restore(&mut self) -> bool {
        match self.store.get() {
            Some(url) => {
                self.url = Some(url);
                true
            }
            None => false,
        }
    }

    /// Submit a feed URL: persist it, make it current, run one cycle.
    /// Re-submitting the same URL re-fetches; responses are never cached.
    pub async fn configure(&mut self, url: &str) -> FeedResult<()> {
        if self.refreshing {
            return Err(FeedError::RefreshInFlight);
        }
        if let Err(e) = self.store.set(url) {
            tracing::warn!(error = %e, "could not persist feed URL");
        }
        if self.url.as_deref() != Some(url) {
            // A different feed's snapshot must not survive under the new URL
            self.components.clear();
            self.owner_token = None;
            self.last_error = None;
        }
        self.url = Some(url.to_string());
        self.run_cycle().await
    }

    /// Re-run the fetch-parse cycle for the current URL.
    ///
    /// Calling without a configured URL is a caller bug, reported as
    /// `NotConfigured`. A second refresh while one is in flight is rejected
    /// with `RefreshInFlight` rather than coalesced.
    pub async fn refresh(&mut self) -> FeedResult<()> {
        if self.url.is_none() {
            return Err(FeedError::NotConfigured);
        }
        if self.refreshing {
            return Err(FeedError::RefreshInFlight);
        }
        self.run_cycle().await
    }

    /// Forget the URL and everything derived from it.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.remove() {
            tracing::warn!(error = %e, "could not clear stored feed URL");
        }
        self.url = None;
        self.owner_token = None;
        self.components.clear();
        self.last_error = None;
        self.refreshing = false;
    }

    async fn run_cycle(&mut self) -> FeedResult<()> {
        let url = self.url.clone().ok_or(FeedError::NotConfigured)?;
        self.refreshing = true;
        let outcome = self.fetch_and_parse(&url).await;
        self.refreshing = false;

        match outcome {
            Ok((owner_token, components)) => {
                tracing::debug!(components = components.len(), "feed cycle complete");
                self.owner_token = owner_token;
                self.components = components;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "feed cycle failed, keeping previous snapshot");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_and_parse(
        &self,
        url: &str,
    ) -> FeedResult<(Option<String>, BTreeMap<String, FeedComponent>)> {
        let raw = self.client.fetch_raw(url).await?;
        let feed = model::normalize(&raw);
        let components = model::adapter::parse_components(&feed.text)?;
        Ok((feed.owner_token, components))
    }

    // --- The whole contract the presentation layer consumes ---

    /// The next events as of `now`, at most the configured limit.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<UpcomingEvent> {
        resolve::resolve_next(&self.components, now, self.event_limit)
    }

    pub fn owner_token(&self) -> Option<&str> {
        self.owner_token.as_deref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn components(&self) -> &BTreeMap<String, FeedComponent> {
        &self.components
    }

    pub fn phase(&self) -> SessionPhase {
        if self.url.is_none() {
            SessionPhase::Unconfigured
        } else if self.refreshing {
            SessionPhase::Loading
        } else if self.last_error.is_some() {
            SessionPhase::Error
        } else {
            SessionPhase::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> FeedSession<MemoryStore> {
        FeedSession::new(&Config::default(), MemoryStore::new()).unwrap()
    }

    #[test]
    fn starts_unconfigured() {
        let s = session();
        assert_eq!(s.phase(), SessionPhase::Unconfigured);
        assert!(!s.is_configured());
        assert!(!s.is_refreshing());
        assert!(s.upcoming(Utc::now()).is_empty());
    }

    #[tokio::test]
    async fn refresh_without_url_is_a_caller_bug() {
        let mut s = session();
        assert!(matches!(s.refresh().await, Err(FeedError::NotConfigured)));
        assert_eq!(s.phase(), SessionPhase::Unconfigured);
    }

    #[test]
    fn restore_adopts_stored_url_without_fetching() {
        let mut store = MemoryStore::new();
        store.set("https://example.org/feed.ics").unwrap();
        let mut s = FeedSession::new(&Config::default(), store).unwrap();

        assert!(s.restore());
        assert!(s.is_configured());
        assert_eq!(s.url(), Some("https://example.org/feed.ics"));
        // Nothing fetched yet: configured but empty is a valid Ready state
        assert!(s.upcoming(Utc::now()).is_empty());
        assert_eq!(s.phase(), SessionPhase::Ready);
    }

    #[test]
    fn restore_without_stored_url_reports_false() {
        let mut s = session();
        assert!(!s.restore());
        assert_eq!(s.phase(), SessionPhase::Unconfigured);
    }

    #[test]
    fn reset_clears_the_store_too() {
        let mut store = MemoryStore::new();
        store.set("https://example.org/feed.ics").unwrap();
        let mut s = FeedSession::new(&Config::default(), store).unwrap();
        s.restore();

        s.reset();
        assert_eq!(s.phase(), SessionPhase::Unconfigured);
        assert_eq!(s.url(), None);
        assert!(!s.restore());
    }
}
