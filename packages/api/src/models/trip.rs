//! Trip documents as the backend returns them. Every field is optional on
//! the wire; missing values deserialize to `None` or empty collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::LatLng;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Waypoint {
    /// `pickup`, `destination` or `stopover`.
    pub r#type: Option<String>,
    /// `rider`, `driver`, `food` or `gas`.
    pub r#for: Option<String>,
    pub data: Option<Map<String, Value>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub geo_text: Option<String>,
    pub expected: Option<DateTime<Utc>>,
    pub actual: Option<DateTime<Utc>>,
}

impl Waypoint {
    pub fn position(&self) -> Option<LatLng> {
        Some(LatLng::new(self.latitude?, self.longitude?))
    }

    /// Best human-readable label for the stop.
    pub fn label(&self) -> &str {
        self.geo_text
            .as_deref()
            .or(self.name.as_deref())
            .or(self.address.as_deref())
            .unwrap_or("Unknown location")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignedDriver {
    pub user_uuid: Option<String>,
    pub address: Option<Waypoint>,
    pub assigned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverRequest {
    pub user_uuid: Option<String>,
    pub address: Option<Waypoint>,
    pub requested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderWilling {
    pub pay_food: Option<bool>,
    pub pay_gas: Option<bool>,
    pub custom: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRider {
    pub user_uuid: Option<String>,
    pub address: Option<Waypoint>,
    pub accepted: Option<bool>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub willing: Option<RiderWilling>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderRequirements {
    pub pay_food: Option<bool>,
    pub pay_gas: Option<bool>,
    pub females_only: Option<bool>,
    pub custom: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fare {
    pub aggregated: Option<f64>,
    pub gas: Option<f64>,
    pub trip: Option<f64>,
    pub food: Option<f64>,
}

impl Fare {
    /// The aggregated fare, or the sum of its parts when the backend did not
    /// aggregate.
    pub fn total(&self) -> f64 {
        self.aggregated.unwrap_or_else(|| {
            self.gas.unwrap_or(0.0) + self.trip.unwrap_or(0.0) + self.food.unwrap_or(0.0)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conflict {
    pub r#type: Option<String>,
    pub conflict_at: Option<DateTime<Utc>>,
    pub old_values: Option<Map<String, Value>>,
    pub changed_values: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceOption {
    pub can_be_controlled: Option<bool>,
    pub r#type: Option<String>,
    pub requests: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Miscellaneous {
    pub music: Option<PreferenceOption>,
    pub ac: Option<PreferenceOption>,
    pub talking: Option<PreferenceOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trip {
    pub trip_uuid: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub waypoints: Vec<Waypoint>,
    pub assigned_driver: Option<AssignedDriver>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub driver_requests: Vec<DriverRequest>,
    pub posted_by: Option<String>,
    /// `driver` or `rider`.
    pub posted_by_type: Option<String>,
    /// `driver_requests_riders` or `rider_requests_ride`.
    pub flow_type: Option<String>,
    pub carpool: Option<bool>,
    pub datetime: Option<DateTime<Utc>>,
    pub current_location: Option<Waypoint>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub riders: Vec<TripRider>,
    pub rider_requirements: Option<RiderRequirements>,
    /// `PENDING`, `ACTIVE`, `CANCELLED` or `COMPLETED`.
    pub status: Option<String>,
    pub fare: Option<Fare>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub conflicts: Vec<Conflict>,
    pub miscellaneous: Option<Miscellaneous>,
    pub max_radius_dropoff: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    pub fn uuid(&self) -> &str {
        self.trip_uuid.as_deref().unwrap_or_default()
    }

    fn waypoint(&self, kind: &str) -> Option<&Waypoint> {
        self.waypoints
            .iter()
            .find(|w| w.r#type.as_deref() == Some(kind))
    }

    pub fn pickup(&self) -> Option<&Waypoint> {
        self.waypoint("pickup").or_else(|| self.waypoints.first())
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.waypoint("destination").or_else(|| self.waypoints.last())
    }

    pub fn females_only(&self) -> bool {
        self.rider_requirements
            .as_ref()
            .and_then(|r| r.females_only)
            .unwrap_or(false)
    }

    pub fn accepted_riders(&self) -> usize {
        self.riders
            .iter()
            .filter(|r| r.accepted.unwrap_or(false))
            .count()
    }

    pub fn is_rider_request(&self) -> bool {
        self.posted_by_type.as_deref() == Some("rider")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_trip_deserializes() {
        let trip: Trip = serde_json::from_value(json!({
            "trip_uuid": "t-1",
            "waypoints": [
                {"type": "pickup", "for": "driver", "latitude": 29.64, "longitude": -82.35, "address": "Marston Library"},
                {"type": "destination", "for": "driver", "latitude": 25.80, "longitude": -80.19, "geo_text": "Wynwood, Miami, FL"}
            ],
            "riders": null,
            "fare": {"gas": 20.0, "trip": 30.0, "food": 10.0},
            "datetime": "2025-03-14T13:30:00Z",
            "rider_requirements": {"females_only": true}
        }))
        .unwrap();

        assert_eq!(trip.uuid(), "t-1");
        assert_eq!(trip.pickup().map(Waypoint::label), Some("Marston Library"));
        assert_eq!(trip.destination().map(Waypoint::label), Some("Wynwood, Miami, FL"));
        assert!(trip.riders.is_empty());
        assert!(trip.females_only());
        assert_eq!(trip.fare.as_ref().map(Fare::total), Some(60.0));
        assert_eq!(
            trip.destination().and_then(Waypoint::position),
            Some(LatLng::new(25.80, -80.19))
        );
    }

    #[test]
    fn test_accepted_riders_counts_only_accepted() {
        let trip = Trip {
            riders: vec![
                TripRider { accepted: Some(true), ..Default::default() },
                TripRider { accepted: Some(false), ..Default::default() },
                TripRider::default(),
            ],
            ..Default::default()
        };
        assert_eq!(trip.accepted_riders(), 1);
    }
}
