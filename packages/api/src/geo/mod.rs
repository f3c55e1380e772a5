//! # Geocoding, routing and map rendering
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`PlaceSearch`] | Text to candidate places. Implemented by [`MapboxClient`]; tests use in-memory fakes. |
//! | [`RouteLookup`] | Driving route between two points, used to estimate arrival times. |
//! | [`MapboxClient`] | The provider client (geocoding v5, directions v5). |
//! | [`circle_polygon`] | Destination radius ring, 64 points. |
//! | [`StaticMap`] | Builds provider static-image URLs with pins, route and radius overlays. |

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

mod mapbox;
mod shapes;
mod static_map;

pub use mapbox::MapboxClient;
pub use shapes::{circle_polygon, encode_polyline, CIRCLE_POINTS};
pub use static_map::StaticMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A resolved place: display text plus coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub text: String,
    pub position: LatLng,
    #[serde(default)]
    pub parts: AddressParts,
}

/// Structured pieces of a place, when the provider supplies them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressParts {
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteEstimate {
    pub duration_secs: f64,
    pub path: Vec<LatLng>,
}

impl RouteEstimate {
    /// Arrival time when leaving at `departure`.
    pub fn arrival(&self, departure: DateTime<Utc>) -> DateTime<Utc> {
        departure + Duration::milliseconds((self.duration_secs * 1000.0).round() as i64)
    }
}

pub trait PlaceSearch {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Place>, ApiError>>;
}

pub trait RouteLookup {
    fn driving_route(
        &self,
        from: LatLng,
        to: LatLng,
    ) -> impl Future<Output = Result<RouteEstimate, ApiError>>;
}

/// Percent-encode like JavaScript's `encodeURIComponent`.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Lib West, Gainesville"), "Lib%20West%2C%20Gainesville");
        assert_eq!(encode_component("a/b?c&d"), "a%2Fb%3Fc%26d");
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("(ok)*~"), "(ok)*~");
    }

    #[test]
    fn test_arrival_adds_duration() {
        let departure = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let route = RouteEstimate {
            duration_secs: 5400.4,
            path: Vec::new(),
        };
        assert_eq!(
            route.arrival(departure),
            Utc.with_ymd_and_hms(2025, 3, 14, 11, 0, 0).unwrap() + Duration::milliseconds(400)
        );
    }
}
