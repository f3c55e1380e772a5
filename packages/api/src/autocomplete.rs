//! # Debounced address autocomplete
//!
//! Every keystroke calls [`AddressAutocomplete::query`], which tags the call
//! with a ticket from a shared, monotonically increasing counter:
//!
//! 1. Input shorter than the minimum (3 characters) bumps the counter and
//!    returns [`Suggestions::Cleared`] without touching the network.
//! 2. Otherwise the call waits out the debounce window. If a newer keystroke
//!    arrived meanwhile it returns [`Suggestions::Superseded`] and never
//!    reaches the provider.
//! 3. After the provider answers, a result whose ticket is no longer the
//!    latest is dropped as [`Suggestions::Stale`], even if it is an error.
//!
//! Only [`Suggestions::Results`] should replace what the dropdown shows.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use store::config::GeocodingConfig;

use crate::error::ApiError;
use crate::geo::{Place, PlaceSearch};

#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    Cleared,
    Results(Vec<Place>),
    Superseded,
    Stale,
}

pub struct AddressAutocomplete<P> {
    provider: Arc<P>,
    latest: Arc<AtomicU64>,
    debounce: Duration,
    min_chars: usize,
    max_results: usize,
}

impl<P> Clone for AddressAutocomplete<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            latest: self.latest.clone(),
            debounce: self.debounce,
            min_chars: self.min_chars,
            max_results: self.max_results,
        }
    }
}

impl<P: PlaceSearch> AddressAutocomplete<P> {
    pub fn new(provider: P, config: &GeocodingConfig) -> Self {
        Self::with_settings(
            provider,
            Duration::from_millis(config.debounce_ms),
            config.min_query_chars,
            config.max_results,
        )
    }

    pub fn with_settings(provider: P, debounce: Duration, min_chars: usize, max_results: usize) -> Self {
        Self {
            provider: Arc::new(provider),
            latest: Arc::new(AtomicU64::new(0)),
            debounce,
            min_chars,
            max_results,
        }
    }

    fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Drop whatever is in flight, e.g. once the user picks a suggestion.
    pub fn invalidate(&self) {
        self.issue();
    }

    pub async fn query(&self, text: &str) -> Result<Suggestions, ApiError> {
        let ticket = self.issue();
        let text = text.trim();
        if text.chars().count() < self.min_chars {
            return Ok(Suggestions::Cleared);
        }

        if !self.debounce.is_zero() {
            crate::time::sleep(self.debounce).await;
            if !self.is_latest(ticket) {
                return Ok(Suggestions::Superseded);
            }
        }

        let result = self.provider.search(text, self.max_results).await;
        if !self.is_latest(ticket) {
            tracing::debug!("discarding stale suggestions for {:?}", text);
            return Ok(Suggestions::Stale);
        }

        let mut places = result.inspect_err(|e| tracing::warn!("place search failed: {}", e))?;
        places.truncate(self.max_results);
        Ok(Suggestions::Results(places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LatLng;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Answers with one place per query; holds `blocked` until `gate` fires.
    #[derive(Default)]
    struct FakeSearch {
        calls: Mutex<Vec<String>>,
        gate: Arc<Notify>,
        blocked: Option<String>,
        extra: usize,
    }

    impl PlaceSearch for FakeSearch {
        async fn search(&self, query: &str, _limit: usize) -> Result<Vec<Place>, ApiError> {
            self.calls.lock().unwrap().push(query.to_string());
            if self.blocked.as_deref() == Some(query) {
                self.gate.notified().await;
            }
            Ok((0..=self.extra)
                .map(|i| Place {
                    text: format!("{query} #{i}"),
                    position: LatLng::new(29.0, -82.0),
                    ..Default::default()
                })
                .collect())
        }
    }

    fn calls(ac: &AddressAutocomplete<FakeSearch>) -> Vec<String> {
        ac.provider.calls.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_short_query_clears_without_request() {
        let ac = AddressAutocomplete::with_settings(FakeSearch::default(), Duration::ZERO, 3, 5);
        assert_eq!(ac.query("Ga").await, Ok(Suggestions::Cleared));
        assert_eq!(ac.query("  G  ").await, Ok(Suggestions::Cleared));
        assert!(calls(&ac).is_empty());
    }

    #[tokio::test]
    async fn test_results_are_capped() {
        let search = FakeSearch {
            extra: 9,
            ..Default::default()
        };
        let ac = AddressAutocomplete::with_settings(search, Duration::ZERO, 3, 5);
        match ac.query("Gainesville").await {
            Ok(Suggestions::Results(places)) => assert_eq!(places.len(), 5),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let gate = Arc::new(Notify::new());
        let search = FakeSearch {
            gate: gate.clone(),
            blocked: Some("Gain".to_string()),
            ..Default::default()
        };
        let ac = AddressAutocomplete::with_settings(search, Duration::ZERO, 3, 5);

        let (first, second) = tokio::join!(ac.query("Gain"), async {
            let newer = ac.query("Gainesville").await;
            gate.notify_one();
            newer
        });

        assert_eq!(first, Ok(Suggestions::Stale));
        match second {
            Ok(Suggestions::Results(places)) => assert_eq!(places[0].text, "Gainesville #0"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(calls(&ac), vec!["Gain", "Gainesville"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_keystroke_never_hits_network() {
        let ac = AddressAutocomplete::with_settings(
            FakeSearch::default(),
            Duration::from_millis(500),
            3,
            5,
        );

        let (first, second) = tokio::join!(ac.query("Gai"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            ac.query("Gain").await
        });

        assert_eq!(first, Ok(Suggestions::Superseded));
        assert!(matches!(second, Ok(Suggestions::Results(_))));
        assert_eq!(calls(&ac), vec!["Gain"]);
    }

    #[tokio::test]
    async fn test_invalidate_drops_in_flight() {
        let gate = Arc::new(Notify::new());
        let search = FakeSearch {
            gate: gate.clone(),
            blocked: Some("Marston".to_string()),
            ..Default::default()
        };
        let ac = AddressAutocomplete::with_settings(search, Duration::ZERO, 3, 5);

        let (pending, _) = tokio::join!(ac.query("Marston"), async {
            ac.invalidate();
            gate.notify_one();
        });
        assert_eq!(pending, Ok(Suggestions::Stale));
    }
}
