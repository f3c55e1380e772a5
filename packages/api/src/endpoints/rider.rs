//! Rider-side trip search, requests and "my trips".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::geo::{LatLng, Place};
use crate::models::{null_as_default, DriverProfile, RiderQuery, Trip};
use crate::wizard::{RideRequestDraft, RideRequestFlow, Flow};

/// A rider's search for posted trips.
#[derive(Debug, Clone, PartialEq)]
pub struct RideSearch {
    pub from: Place,
    pub to: Place,
    pub datetime: DateTime<Utc>,
    pub flexible_dates: bool,
    pub females_only: bool,
}

#[derive(Debug, Serialize)]
struct QueryBody {
    body: QueryDetails,
}

#[derive(Debug, Serialize)]
struct QueryDetails {
    from: LatLng,
    to: LatLng,
    datetime: DateTime<Utc>,
    flexible_dates: bool,
    females_only: bool,
}

/// Which list on the rider's "my trips" screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiderTripsTab {
    /// Trips the rider posted as requests.
    #[default]
    Created,
    /// Driver trips the rider asked to join.
    Requested,
}

impl RiderTripsTab {
    pub fn as_str(self) -> &'static str {
        match self {
            RiderTripsTab::Created => "created",
            RiderTripsTab::Requested => "requested",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "requested" => RiderTripsTab::Requested,
            _ => RiderTripsTab::Created,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripPage {
    #[serde(deserialize_with = "null_as_default")]
    pub trips: Vec<Trip>,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl TripPage {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiderTripView {
    pub trip: Trip,
    #[serde(rename = "userUUID")]
    pub user_uuid: String,
}

impl RiderTripView {
    /// Whether the signed-in rider has been accepted onto this trip.
    pub fn is_accepted(&self) -> bool {
        self.trip
            .riders
            .iter()
            .any(|r| r.user_uuid.as_deref() == Some(self.user_uuid.as_str()) && r.accepted == Some(true))
    }
}

/// Posted driver trips matching a search, with the drivers' public cards.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiderFeed {
    #[serde(deserialize_with = "null_as_default")]
    pub trips: Vec<Trip>,
    #[serde(rename = "driverProfiles", deserialize_with = "null_as_default")]
    pub driver_profiles: Vec<DriverProfile>,
}

impl RiderFeed {
    pub fn driver_for(&self, trip: &Trip) -> Option<&DriverProfile> {
        self.driver_profiles.iter().find(|d| d.trip_uuid == trip.uuid())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueriesBody {
    #[serde(deserialize_with = "null_as_default")]
    queries: Vec<RiderQuery>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TripUuidBody {
    trip_uuid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DriverBody {
    driver: DriverProfile,
}

impl ApiClient {
    pub async fn rider_queries(&self) -> Result<Vec<RiderQuery>, ApiError> {
        let body: QueriesBody = self.get("/v1/rider/queries").await?;
        Ok(body.queries)
    }

    /// Posted driver trips matching the search. An empty list is a normal
    /// outcome, not an error.
    pub async fn query_trips(&self, search: &RideSearch) -> Result<RiderFeed, ApiError> {
        let request = QueryBody {
            body: QueryDetails {
                from: search.from.position,
                to: search.to.position,
                datetime: search.datetime,
                flexible_dates: search.flexible_dates,
                females_only: search.females_only,
            },
        };
        let feed: RiderFeed = self.post("/v1/trip/rider/query", &request).await?;
        tracing::info!("trip query returned {} trips", feed.trips.len());
        Ok(feed)
    }

    /// Ask to join a driver's trip.
    pub async fn request_trip(&self, trip_uuid: &str) -> Result<(), ApiError> {
        let _: Value = self
            .post(
                &format!("/v1/trip/request/{}", trip_uuid),
                &json!({ "trip_uuid": trip_uuid }),
            )
            .await?;
        Ok(())
    }

    /// Post a ride request for drivers to pick up. Returns the new trip uuid.
    pub async fn create_ride_request(&self, draft: &RideRequestDraft) -> Result<String, ApiError> {
        RideRequestFlow::validate(draft)?;
        let request = draft.to_request()?;
        let body: TripUuidBody = self.post("/v1/trip/rider/request", &request).await?;
        Ok(body.trip_uuid)
    }

    pub async fn rider_trips(&self, page: i64, tab: RiderTripsTab) -> Result<TripPage, ApiError> {
        self.get(&format!(
            "/v1/rider/trips?page={}&flow_type={}",
            page.max(1),
            tab.as_str()
        ))
        .await
    }

    pub async fn rider_trip(&self, trip_uuid: &str) -> Result<RiderTripView, ApiError> {
        self.get(&format!("/v1/rider/trips/{}", trip_uuid)).await
    }

    /// Driver assigned to a trip the rider is on.
    pub async fn rider_trip_driver(&self, trip_uuid: &str) -> Result<DriverProfile, ApiError> {
        let body: DriverBody = self.get(&format!("/v1/trip/{}/rflow/driver", trip_uuid)).await?;
        Ok(body.driver)
    }

    pub async fn withdraw_request(&self, trip_uuid: &str) -> Result<(), ApiError> {
        let _: Value = self
            .post(
                &format!("/v1/trip/{}/rider/request/remove", trip_uuid),
                &json!({}),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripRider;

    #[test]
    fn test_trip_page_from_wire() {
        let page: TripPage = serde_json::from_value(json!({
            "success": true,
            "trips": null,
            "currentPage": 1,
            "totalPages": 3
        }))
        .unwrap();
        assert!(page.trips.is_empty());
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_rider_feed_links_drivers() {
        let feed: RiderFeed = serde_json::from_value(json!({
            "success": true,
            "trips": [{"trip_uuid": "t-1"}, {"trip_uuid": "t-2"}],
            "driverProfiles": [{"first_name": "Gina", "trip_uuid": "t-2"}]
        }))
        .unwrap();
        assert!(feed.driver_for(&feed.trips[0]).is_none());
        assert_eq!(feed.driver_for(&feed.trips[1]).map(|d| d.first_name.as_str()), Some("Gina"));

        let bare: RiderFeed = serde_json::from_value(json!({"success": true, "trips": []})).unwrap();
        assert!(bare.trips.is_empty() && bare.driver_profiles.is_empty());
    }

    #[test]
    fn test_query_body_uses_lat_lng() {
        let request = QueryBody {
            body: QueryDetails {
                from: LatLng::new(29.6465, -82.3479),
                to: LatLng::new(28.4312, -81.3081),
                datetime: DateTime::parse_from_rfc3339("2025-04-01T09:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
                flexible_dates: false,
                females_only: true,
            },
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["body"]["from"]["lat"], 29.6465);
        assert_eq!(body["body"]["to"]["lng"], -81.3081);
        assert_eq!(body["body"]["females_only"], true);
    }

    #[test]
    fn test_rider_acceptance() {
        let view = RiderTripView {
            trip: Trip {
                riders: vec![TripRider {
                    user_uuid: Some("u-1".into()),
                    accepted: Some(true),
                    ..Default::default()
                }],
                ..Default::default()
            },
            user_uuid: "u-1".into(),
        };
        assert!(view.is_accepted());

        let other = RiderTripView {
            user_uuid: "u-2".into(),
            ..view
        };
        assert!(!other.is_accepted());
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!(RiderTripsTab::parse("requested"), RiderTripsTab::Requested);
        assert_eq!(RiderTripsTab::parse("anything"), RiderTripsTab::Created);
        assert_eq!(RiderTripsTab::Requested.as_str(), "requested");
    }
}
