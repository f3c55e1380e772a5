//! Account load-in payload: profile, dashboard prompts and driver status.
//!
//! The account is rehydrated from `POST /v1/account/loadin` on every
//! protected mount and never persisted locally.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::driver::{ApplicationStatus, DriverApplication};
use crate::geo::LatLng;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingStatus {
    pub state: Option<String>,
    pub step: Option<i64>,
}

/// Server-driven prompt under "Recommended actions".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCard {
    pub uuid: String,
    pub title: String,
    pub description: String,
    /// `danger`, `warning` or `default`.
    pub r#type: String,
    pub action: String,
    pub action_name: String,
    pub display_type: String,
}

impl StatusCard {
    pub fn kind(&self) -> CardAction {
        CardAction::from_action(&self.action)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomAction {
    pub uuid: String,
    pub title: String,
    pub description: String,
    pub action: String,
    pub action_name: String,
    pub display_type: String,
    pub color: String,
    pub display_blob: Option<String>,
    pub flow_data: Option<Map<String, Value>>,
}

impl BottomAction {
    pub fn kind(&self) -> CardAction {
        CardAction::from_action(&self.action)
    }
}

/// The actions the dashboard knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    AddHomeAddress,
    EnableTwoFactor,
    RidePreferences,
    BookTrip,
    BookTripFlow,
    Unknown,
}

impl CardAction {
    pub fn from_action(action: &str) -> Self {
        match action {
            "rider_add_address" => CardAction::AddHomeAddress,
            "account_two_fa" => CardAction::EnableTwoFactor,
            "rider_payment_preferences" => CardAction::RidePreferences,
            "book_trip" => CardAction::BookTrip,
            "book_trip_flow" => CardAction::BookTripFlow,
            _ => CardAction::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub upcoming_trips: i64,
    pub past_trips: i64,
    pub account_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub user_uuid: Option<String>,
    pub onboarding_status: Option<OnboardingStatus>,
    pub is_female: bool,
    pub profile_picture: Option<String>,
    pub profile_picture_expiry: Option<Value>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status_cards: Vec<StatusCard>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub bottom_actions: Vec<BottomAction>,
    pub dashboard_stats: Option<DashboardStats>,
    pub address: Option<String>,
    pub address_lat: Option<f64>,
    pub address_lng: Option<f64>,
    pub driver_verified: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub driver_applications: Vec<DriverApplication>,
}

impl Account {
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            _ => self.email.clone().unwrap_or_default(),
        }
    }

    pub fn home(&self) -> Option<LatLng> {
        Some(LatLng::new(self.address_lat?, self.address_lng?))
    }

    /// The newest application still awaiting a decision.
    pub fn pending_application(&self) -> Option<&DriverApplication> {
        self.driver_applications
            .iter()
            .rev()
            .find(|a| a.status() == ApplicationStatus::Open)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Announcement {
    pub version: Option<i64>,
    pub announcement: Option<String>,
    /// `general` or `warning`.
    pub r#type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loadin_payload() {
        let account: Account = serde_json::from_value(json!({
            "success": true,
            "first_name": "Albert",
            "last_name": "Gator",
            "email": "albert@ufl.edu",
            "user_uuid": "u-1",
            "onboarding_status": {"state": "complete", "step": 3},
            "is_female": false,
            "profile_picture": "https://example.com/p.png",
            "profile_picture_expiry": 1741900000000i64,
            "status_cards": [{
                "uuid": "c-1", "title": "Home Address", "description": "Add your home address",
                "type": "danger", "action": "rider_add_address", "action_name": "Add Address",
                "display_type": "drawer"
            }],
            "bottom_actions": null,
            "dashboard_stats": {"upcoming_trips": 2, "past_trips": 5, "account_type": "Rider"},
            "driver_applications": [
                {"application_uuid": "a-1", "closed": true},
                {"application_uuid": "a-2"}
            ]
        }))
        .unwrap();

        assert_eq!(account.display_name(), "Albert Gator");
        assert_eq!(account.status_cards[0].kind(), CardAction::AddHomeAddress);
        assert!(account.bottom_actions.is_empty());
        assert!(account.home().is_none());
        assert!(!account.driver_verified);
        assert_eq!(
            account.pending_application().and_then(|a| a.application_uuid.as_deref()),
            Some("a-2")
        );
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(CardAction::from_action("something_new"), CardAction::Unknown);
    }
}
