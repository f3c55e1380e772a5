use serde::Deserialize;

use super::{encode_component, AddressParts, LatLng, Place, PlaceSearch, RouteEstimate, RouteLookup};
use crate::error::ApiError;

const MAPBOX_API: &str = "https://api.mapbox.com";

/// Mapbox geocoding and directions client.
#[derive(Clone, Debug)]
pub struct MapboxClient {
    http: reqwest::Client,
    access_token: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    place_name: String,
    /// `[lng, lat]`
    center: [f64; 2],
    /// House number for address features.
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    context: Vec<GeocodeContext>,
}

#[derive(Debug, Deserialize)]
struct GeocodeContext {
    id: String,
    text: String,
}

impl GeocodeFeature {
    fn context_text(&self, kind: &str) -> Option<String> {
        self.context
            .iter()
            .find(|c| c.id.starts_with(kind))
            .map(|c| c.text.clone())
    }

    fn into_place(self) -> Place {
        let line1 = match (&self.address, &self.text) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(name)) => Some(name.clone()),
            _ => None,
        };
        let parts = AddressParts {
            line1,
            city: self.context_text("place"),
            state: self.context_text("region"),
            zip: self.context_text("postcode"),
        };
        Place {
            text: self.place_name,
            position: LatLng::new(self.center[1], self.center[0]),
            parts,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    duration: f64,
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

impl MapboxClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token: access_token.into(),
            api_base: MAPBOX_API.to_string(),
        }
    }

    /// Point at a different host (staging proxies, local fixtures).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    fn geocode_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json?access_token={}&autocomplete=true&limit={}",
            self.api_base,
            encode_component(query),
            encode_component(&self.access_token),
            limit
        )
    }

    fn directions_url(&self, from: LatLng, to: LatLng) -> String {
        format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}?geometries=geojson&access_token={}",
            self.api_base,
            from.lng,
            from.lat,
            to.lng,
            to.lat,
            encode_component(&self.access_token)
        )
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::error!("geocoding token rejected");
            return Err(ApiError::Backend("map provider rejected the access token".into()));
        }
        if !status.is_success() {
            return Err(ApiError::Backend(format!("map provider returned {status}")));
        }
        Ok(response.json().await?)
    }
}

impl PlaceSearch for MapboxClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, ApiError> {
        let response: GeocodeResponse = self.fetch(self.geocode_url(query, limit)).await?;
        Ok(response
            .features
            .into_iter()
            .take(limit)
            .map(GeocodeFeature::into_place)
            .collect())
    }
}

impl RouteLookup for MapboxClient {
    async fn driving_route(&self, from: LatLng, to: LatLng) -> Result<RouteEstimate, ApiError> {
        let response: DirectionsResponse = self.fetch(self.directions_url(from, to)).await?;
        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Backend("No driving route found".into()))?;
        Ok(RouteEstimate {
            duration_secs: route.duration,
            path: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| LatLng::new(lat, lng))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_url() {
        let client = MapboxClient::new("pk.abc");
        assert_eq!(
            client.geocode_url("Lib West", 5),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/Lib%20West.json?access_token=pk.abc&autocomplete=true&limit=5"
        );
    }

    #[test]
    fn test_directions_url_is_lng_first() {
        let client = MapboxClient::new("pk.abc").with_api_base("http://localhost:9000/");
        let url = client.directions_url(LatLng::new(29.6, -82.3), LatLng::new(25.8, -80.2));
        assert_eq!(
            url,
            "http://localhost:9000/directions/v5/mapbox/driving/-82.3,29.6;-80.2,25.8?geometries=geojson&access_token=pk.abc"
        );
    }

    #[test]
    fn test_feature_to_place() {
        let response: GeocodeResponse = serde_json::from_value(serde_json::json!({
            "features": [{
                "id": "address.1",
                "place_name": "1545 W University Ave, Gainesville, Florida 32603, United States",
                "center": [-82.3437, 29.6522],
                "address": "1545",
                "text": "W University Ave",
                "context": [
                    {"id": "postcode.9", "text": "32603"},
                    {"id": "place.7", "text": "Gainesville"},
                    {"id": "region.3", "text": "Florida"}
                ]
            }]
        }))
        .unwrap();
        let place = response.features.into_iter().next().unwrap().into_place();
        assert_eq!(place.position, LatLng::new(29.6522, -82.3437));
        assert_eq!(place.parts.line1.as_deref(), Some("1545 W University Ave"));
        assert_eq!(place.parts.city.as_deref(), Some("Gainesville"));
        assert_eq!(place.parts.state.as_deref(), Some("Florida"));
        assert_eq!(place.parts.zip.as_deref(), Some("32603"));
    }
}
