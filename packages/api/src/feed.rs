//! Rider trip search: query state and the "no trips found" alternatives.

use crate::endpoints::{RideSearch, RiderFeed};
use crate::error::ApiError;
use crate::models::Account;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedState {
    #[default]
    Idle,
    Loading,
    Results(RiderFeed),
    /// The query succeeded with zero trips.
    Empty,
    Failed(String),
}

impl FeedState {
    pub fn from_result(result: Result<RiderFeed, ApiError>) -> Self {
        match result {
            Ok(feed) if feed.trips.is_empty() => FeedState::Empty,
            Ok(feed) => FeedState::Results(feed),
            Err(e) => {
                tracing::warn!("trip query failed: {}", e);
                FeedState::Failed(e.user_message())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    /// "We found 1 trip for you" / "We found 3 trips for you".
    pub fn headline(&self) -> Option<String> {
        match self {
            FeedState::Results(feed) => {
                let n = feed.trips.len();
                Some(format!("We found {} trip{} for you", n, if n == 1 { "" } else { "s" }))
            }
            FeedState::Empty => Some("No trips found".to_string()),
            _ => None,
        }
    }
}

/// Offered when a search comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyFeedAction {
    /// Post the same search as a ride request for drivers.
    SwitchToRequestFlow,
    ChangeDates,
    /// No backend support yet; only acknowledges the click.
    NotifyWhenAvailable,
}

pub const NOTIFY_STUB_MESSAGE: &str = "We'll let you know when a matching trip is posted.";

impl EmptyFeedAction {
    pub const ALL: [EmptyFeedAction; 3] = [
        EmptyFeedAction::SwitchToRequestFlow,
        EmptyFeedAction::ChangeDates,
        EmptyFeedAction::NotifyWhenAvailable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmptyFeedAction::SwitchToRequestFlow => "Request a ride instead",
            EmptyFeedAction::ChangeDates => "Change dates",
            EmptyFeedAction::NotifyWhenAvailable => "Notify me when a trip is available",
        }
    }
}

/// Search form filters that depend on the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedFilters {
    pub flexible_dates: bool,
    pub females_only: bool,
}

impl FeedFilters {
    /// The female-drivers-only filter is offered only to accounts that
    /// report themselves female.
    pub fn show_females_only(account: &Account) -> bool {
        account.is_female
    }

    /// Drop a females-only choice the account is not allowed to make.
    pub fn effective(self, account: &Account) -> Self {
        Self {
            flexible_dates: self.flexible_dates,
            females_only: self.females_only && Self::show_females_only(account),
        }
    }

    pub fn apply(self, search: &mut RideSearch) {
        search.flexible_dates = self.flexible_dates;
        search.females_only = self.females_only;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trip;
    use serde_json::json;

    #[test]
    fn test_empty_trips_is_not_an_error() {
        let feed: RiderFeed = serde_json::from_value(json!({"success": true, "trips": []})).unwrap();
        let state = FeedState::from_result(Ok(feed));
        assert_eq!(state, FeedState::Empty);
        assert_eq!(state.headline().as_deref(), Some("No trips found"));
    }

    #[test]
    fn test_results_headline() {
        let feed = RiderFeed {
            trips: vec![Trip::default()],
            ..Default::default()
        };
        let state = FeedState::from_result(Ok(feed));
        assert_eq!(state.headline().as_deref(), Some("We found 1 trip for you"));
    }

    #[test]
    fn test_failure_hides_transport_detail() {
        let state = FeedState::from_result(Err(ApiError::Transport("connection refused".into())));
        assert_eq!(state, FeedState::Failed(crate::error::GENERIC_ERROR.into()));

        let state = FeedState::from_result(Err(ApiError::Backend("invalid datetime".into())));
        assert_eq!(state, FeedState::Failed("invalid datetime".into()));
    }

    #[test]
    fn test_female_filter_visibility() {
        let account = Account::default();
        assert!(!FeedFilters::show_females_only(&account));
        let chosen = FeedFilters {
            flexible_dates: true,
            females_only: true,
        };
        assert_eq!(
            chosen.effective(&account),
            FeedFilters {
                flexible_dates: true,
                females_only: false
            }
        );

        let account = Account {
            is_female: true,
            ..Default::default()
        };
        assert!(chosen.effective(&account).females_only);
    }
}
