use super::{circle_polygon, encode_component, encode_polyline, LatLng};

const MAPBOX_API: &str = "https://api.mapbox.com";
const ROUTE_COLOR: &str = "3b82f6";
const RADIUS_COLOR: &str = "007aff";

/// Builder for a provider static-image URL.
///
/// With no overlays the image is centered on the fallback center and zoom;
/// once any pin, route or ring is added the viewport fits them (`auto`).
#[derive(Clone, Debug, PartialEq)]
pub struct StaticMap {
    style: String,
    access_token: String,
    center: LatLng,
    zoom: f64,
    width: u32,
    height: u32,
    overlays: Vec<String>,
}

impl StaticMap {
    pub fn new(style: impl Into<String>, access_token: impl Into<String>, center: LatLng, zoom: f64) -> Self {
        Self {
            style: style.into(),
            access_token: access_token.into(),
            center,
            zoom,
            width: 600,
            height: 400,
            overlays: Vec::new(),
        }
    }

    /// Pixel size, clamped to the provider's 1280px limit.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width.clamp(1, 1280);
        self.height = height.clamp(1, 1280);
        self
    }

    pub fn pin(mut self, label: char, color: &str, at: LatLng) -> Self {
        let label = label.to_ascii_lowercase();
        self.overlays
            .push(format!("pin-s-{label}+{color}({},{})", at.lng, at.lat));
        self
    }

    pub fn route(mut self, path: &[LatLng]) -> Self {
        if path.len() >= 2 {
            self.overlays.push(format!(
                "path-4+{ROUTE_COLOR}-0.9({})",
                encode_component(&encode_polyline(path))
            ));
        }
        self
    }

    /// Shaded destination radius.
    pub fn radius(mut self, center: LatLng, radius_miles: f64) -> Self {
        if radius_miles > 0.0 {
            let ring = circle_polygon(center, radius_miles);
            self.overlays.push(format!(
                "path-1+{RADIUS_COLOR}-0.6+{RADIUS_COLOR}-0.3({})",
                encode_component(&encode_polyline(&ring))
            ));
        }
        self
    }

    pub fn url(&self) -> String {
        let viewport = if self.overlays.is_empty() {
            format!("{},{},{}", self.center.lng, self.center.lat, self.zoom)
        } else {
            format!("{}/auto", self.overlays.join(","))
        };
        format!(
            "{MAPBOX_API}/styles/v1/{}/static/{}/{}x{}@2x?padding=40&access_token={}",
            self.style,
            viewport,
            self.width,
            self.height,
            encode_component(&self.access_token)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UF: LatLng = LatLng::new(29.6436, -82.3549);

    #[test]
    fn test_plain_map_uses_center() {
        let url = StaticMap::new("mapbox/streets-v12", "pk.t", UF, 13.0).url();
        assert_eq!(
            url,
            "https://api.mapbox.com/styles/v1/mapbox/streets-v12/static/-82.3549,29.6436,13/600x400@2x?padding=40&access_token=pk.t"
        );
    }

    #[test]
    fn test_overlays_switch_to_auto() {
        let url = StaticMap::new("mapbox/streets-v12", "pk.t", UF, 13.0)
            .size(2000, 300)
            .pin('A', "10b981", UF)
            .pin('b', "ef4444", LatLng::new(25.8, -80.2))
            .url();
        assert!(url.contains("/static/pin-s-a+10b981(-82.3549,29.6436),pin-s-b+ef4444(-80.2,25.8)/auto/1280x300@2x"));
    }

    #[test]
    fn test_degenerate_route_and_radius_are_skipped() {
        let map = StaticMap::new("s", "t", UF, 10.0)
            .route(&[UF])
            .radius(UF, 0.0);
        assert!(!map.url().contains("auto"));

        let map = map.radius(UF, 2.0);
        assert!(map.url().contains("path-1+007aff-0.6+007aff-0.3("));
    }
}
