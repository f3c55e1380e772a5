use api::geo::RouteEstimate;
use api::LatLng;
use dioxus::prelude::*;

use crate::session::use_app;

/// Provider static image with optional pins, route line and radius ring.
#[component]
pub fn StaticMapImage(
    #[props(default)] pickup: Option<LatLng>,
    #[props(default)] destination: Option<LatLng>,
    #[props(default)] route: Option<RouteEstimate>,
    #[props(default)] radius_miles: Option<f64>,
    #[props(default = 600)] width: u32,
    #[props(default = 320)] height: u32,
) -> Element {
    let app = use_app();
    if app.config.geocoding.access_token.is_empty() {
        return rsx! {};
    }

    let mut map = app.static_map().size(width, height);
    if let Some(route) = &route {
        map = map.route(&route.path);
    }
    if let (Some(center), Some(miles)) = (destination, radius_miles) {
        map = map.radius(center, miles);
    }
    if let Some(at) = pickup {
        map = map.pin('a', "22c55e", at);
    }
    if let Some(at) = destination {
        map = map.pin('b', "ef4444", at);
    }
    let src = map.url();

    rsx! {
        img {
            class: "static-map",
            src: "{src}",
            width: "{width}",
            height: "{height}",
            alt: "Route map",
        }
    }
}
