//! Driver-side: applications, posting trips, the rider-request feed and
//! managing posted trips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::geo::LatLng;
use crate::models::{null_as_default, DriverApplication, RiderProfile, Trip};
use crate::wizard::{
    CreateTripDraft, CreateTripFlow, CreateTripRequest, DriverApplicationDraft, DriverApplicationFlow,
    Flow, OfferFare,
};

pub const CANCELLED_WITH_WARNING: &str =
    "The trip has been cancelled. You will receive a warning on your account.";
pub const CANCELLED_NO_PENALTY: &str = "The trip has been cancelled with no penalty.";

/// Rider-posted requests near a route, with the riders' public profiles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriverFeed {
    #[serde(deserialize_with = "null_as_default")]
    pub trips: Vec<Trip>,
    #[serde(rename = "riderProfiles", deserialize_with = "null_as_default")]
    pub rider_profiles: Vec<RiderProfile>,
}

impl DriverFeed {
    /// Profile of whoever posted `trip`.
    pub fn poster(&self, trip: &Trip) -> Option<&RiderProfile> {
        let posted_by = trip.posted_by.as_deref()?;
        self.rider_profiles.iter().find(|p| p.user_uuid == posted_by)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CancelledTrip {
    pub trip: Trip,
    pub issue_warning: bool,
}

impl CancelledTrip {
    pub fn notice(&self) -> &'static str {
        if self.issue_warning {
            CANCELLED_WITH_WARNING
        } else {
            CANCELLED_NO_PENALTY
        }
    }
}

#[derive(Debug, Serialize)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl From<LatLng> for Coordinates {
    fn from(p: LatLng) -> Self {
        Self {
            latitude: p.lat,
            longitude: p.lng,
        }
    }
}

#[derive(Debug, Serialize)]
struct FeedBody {
    body: FeedDetails,
}

#[derive(Debug, Serialize)]
struct FeedDetails {
    from: Coordinates,
    to: Coordinates,
    datetime: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct SaveTripBody<'a> {
    trip: &'a Trip,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApplicationUuidBody {
    application_uuid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApplicationBody {
    driver_application: DriverApplication,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TripUuidBody {
    trip_uuid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TripsBody {
    #[serde(deserialize_with = "null_as_default")]
    trips: Vec<Trip>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TripBody {
    trip: Trip,
}

impl ApiClient {
    /// Submit a driver application. Returns its uuid.
    pub async fn apply_driver(&self, draft: &DriverApplicationDraft) -> Result<String, ApiError> {
        DriverApplicationFlow::validate(draft)?;
        let request = draft.to_request()?;
        let body: ApplicationUuidBody = self.post("/v1/driver/apply", &request).await?;
        tracing::info!("driver application {} submitted", body.application_uuid);
        Ok(body.application_uuid)
    }

    pub async fn driver_application(&self, application_uuid: &str) -> Result<DriverApplication, ApiError> {
        let body: ApplicationBody = self
            .get(&format!("/v1/driver/application/{}", application_uuid))
            .await?;
        Ok(body.driver_application)
    }

    /// Post a trip. Returns the new trip uuid.
    pub async fn create_trip(&self, draft: &CreateTripDraft) -> Result<String, ApiError> {
        CreateTripFlow::validate(draft)?;
        let body: TripUuidBody = self
            .post("/v1/trip/", &CreateTripRequest { trip_options: draft })
            .await?;
        tracing::info!("trip {} created", body.trip_uuid);
        Ok(body.trip_uuid)
    }

    pub async fn driver_feed(
        &self,
        from: LatLng,
        to: LatLng,
        datetime: DateTime<Utc>,
    ) -> Result<DriverFeed, ApiError> {
        let request = FeedBody {
            body: FeedDetails {
                from: from.into(),
                to: to.into(),
                datetime,
            },
        };
        self.post("/v1/trip/driver/feed", &request).await
    }

    /// Offer to drive a rider's posted request for the given fare.
    pub async fn offer_to_drive(&self, trip_uuid: &str, fare: &OfferFare) -> Result<(), ApiError> {
        let _: Value = self
            .post(&format!("/v1/trip/{}/driver/request", trip_uuid), fare)
            .await?;
        Ok(())
    }

    /// Rider requests this driver has offered to drive.
    pub async fn requested_rides(&self) -> Result<Vec<Trip>, ApiError> {
        let body: TripsBody = self.get("/v1/trip/driver/trips/requested").await?;
        Ok(body.trips)
    }

    pub async fn driver_trips(&self) -> Result<Vec<Trip>, ApiError> {
        let body: TripsBody = self.get("/v1/driver/trips").await?;
        Ok(body.trips)
    }

    pub async fn driver_trip(&self, trip_uuid: &str) -> Result<Trip, ApiError> {
        let body: TripBody = self.get(&format!("/v1/driver/trips/{}", trip_uuid)).await?;
        Ok(body.trip)
    }

    /// Save edited preferences and fare. The aggregated fare is recomputed
    /// before sending; the server's copy comes back.
    pub async fn save_trip(&self, trip: &Trip) -> Result<Trip, ApiError> {
        let mut trip = trip.clone();
        if let Some(fare) = trip.fare.as_mut() {
            fare.aggregated = None;
            fare.aggregated = Some(fare.total());
        }
        let body: TripBody = self
            .put(&format!("/v1/trip/{}", trip.uuid()), &SaveTripBody { trip: &trip })
            .await?;
        Ok(body.trip)
    }

    pub async fn cancel_trip(&self, trip_uuid: &str) -> Result<CancelledTrip, ApiError> {
        let cancelled: CancelledTrip = self.delete(&format!("/v1/trip/{}", trip_uuid)).await?;
        if cancelled.issue_warning {
            tracing::warn!("trip {} cancelled with a warning", trip_uuid);
        }
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feed_body_uses_latitude_longitude() {
        let request = FeedBody {
            body: FeedDetails {
                from: LatLng::new(29.6436, -82.3549).into(),
                to: LatLng::new(25.7617, -80.1918).into(),
                datetime: DateTime::parse_from_rfc3339("2025-03-19T18:45:22Z")
                    .unwrap()
                    .with_timezone(&Utc),
            },
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["body"]["from"]["latitude"], 29.6436);
        assert_eq!(body["body"]["to"]["longitude"], -80.1918);
        assert!(body["body"]["from"].get("lat").is_none());
    }

    #[test]
    fn test_feed_links_profiles() {
        let feed: DriverFeed = serde_json::from_value(json!({
            "success": true,
            "trips": [{"trip_uuid": "t-1", "posted_by": "u-9"}],
            "riderProfiles": [{"first_name": "Alberta", "user_uuid": "u-9", "gender": "female"}]
        }))
        .unwrap();
        let poster = feed.poster(&feed.trips[0]).unwrap();
        assert_eq!(poster.first_name, "Alberta");

        let empty: DriverFeed = serde_json::from_value(json!({
            "success": true, "trips": null, "riderProfiles": null
        }))
        .unwrap();
        assert!(empty.trips.is_empty());
    }

    #[test]
    fn test_cancel_notice() {
        let cancelled: CancelledTrip = serde_json::from_value(json!({
            "success": true,
            "trip": {"trip_uuid": "t-1", "status": "CANCELLED"},
            "issue_warning": true
        }))
        .unwrap();
        assert_eq!(cancelled.notice(), CANCELLED_WITH_WARNING);
        assert_eq!(CancelledTrip::default().notice(), CANCELLED_NO_PENALTY);
    }
}
