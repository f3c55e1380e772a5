use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use api::endpoints::RiderTripsTab;
use store::GatorPoolConfig;
use ui::{AccountProvider, Page, RidersTab, SessionProvider, ToastProvider};
use views::{
    CheckInbox, CreateTrip, Dashboard, DriverApplication, DriverTrip, DriverTrips, FindRide, FindRiders,
    FinishSignup, NotFound, Pages, Profile, Protected, RideRequest, RiderTrip, RiderTrips, Root, SignIn, SignUp,
    VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Pages)]
        #[route("/")]
        Root {},
        #[route("/auth/signin")]
        SignIn {},
        #[route("/auth/signup")]
        SignUp {},
        #[route("/auth/check-inbox")]
        CheckInbox {},
        #[route("/auth/verify?:id&:signature")]
        VerifyEmail { id: String, signature: String },
        #[route("/auth/finish")]
        FinishSignup {},

        #[layout(Protected)]
            #[route("/dashboard")]
            Dashboard {},
            #[route("/profile")]
            Profile {},
            #[route("/find-ride")]
            FindRide {},
            #[route("/ride-request")]
            RideRequest {},
            #[route("/rider-flow/trips?:tab")]
            RiderTrips { tab: String },
            #[route("/ridertrip/:tab/:uuid")]
            RiderTrip { tab: String, uuid: String },
            #[route("/create-trip")]
            CreateTrip {},
            #[route("/driver-application?:uuid")]
            DriverApplication { uuid: String },
            #[route("/find-riders?:tab")]
            FindRiders { tab: String },
            #[route("/my-trips")]
            DriverTrips {},
            #[route("/drivertrip/:uuid")]
            DriverTrip { uuid: String },
        #[end_layout]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::SignIn => Route::SignIn {},
            Page::SignUp => Route::SignUp {},
            Page::CheckInbox => Route::CheckInbox {},
            Page::FinishSignup => Route::FinishSignup {},
            Page::Dashboard => Route::Dashboard {},
            Page::Profile => Route::Profile {},
            Page::FindRide => Route::FindRide {},
            Page::RideRequest => Route::RideRequest {},
            Page::RiderTrips { tab } => Route::RiderTrips { tab: tab.as_str().to_string() },
            Page::RiderTrip { tab, uuid } => Route::RiderTrip { tab: tab.as_str().to_string(), uuid },
            Page::CreateTrip => Route::CreateTrip {},
            Page::DriverApplication { uuid } => Route::DriverApplication { uuid: uuid.unwrap_or_default() },
            Page::FindRiders { tab } => Route::FindRiders { tab: tab.as_str().to_string() },
            Page::DriverTrips => Route::DriverTrips {},
            Page::DriverTrip { uuid } => Route::DriverTrip { uuid },
        }
    }
}

impl Route {
    /// The page this route shows. `None` for the redirect and landing routes
    /// that have no page of their own.
    fn page(&self) -> Option<Page> {
        let page = match self {
            Route::Root {} | Route::NotFound { .. } | Route::VerifyEmail { .. } => return None,
            Route::SignIn {} => Page::SignIn,
            Route::SignUp {} => Page::SignUp,
            Route::CheckInbox {} => Page::CheckInbox,
            Route::FinishSignup {} => Page::FinishSignup,
            Route::Dashboard {} => Page::Dashboard,
            Route::Profile {} => Page::Profile,
            Route::FindRide {} => Page::FindRide,
            Route::RideRequest {} => Page::RideRequest,
            Route::RiderTrips { tab } => Page::RiderTrips { tab: RiderTripsTab::parse(tab) },
            Route::RiderTrip { tab, uuid } => Page::RiderTrip {
                tab: RiderTripsTab::parse(tab),
                uuid: uuid.clone(),
            },
            Route::CreateTrip {} => Page::CreateTrip,
            Route::DriverApplication { uuid } => Page::DriverApplication {
                uuid: Some(uuid.clone()).filter(|u| !u.is_empty()),
            },
            Route::FindRiders { tab } => Page::FindRiders { tab: RidersTab::parse(tab) },
            Route::DriverTrips {} => Page::DriverTrips,
            Route::DriverTrip { uuid } => Page::DriverTrip { uuid: uuid.clone() },
        };
        Some(page)
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    // Fails only if a subscriber is already installed.
    let _ = dioxus::logger::init(level);

    dioxus::launch(App);
}

/// The bundled `gatorpool.toml`, with build-time overrides applied.
fn app_config() -> GatorPoolConfig {
    let mut config = match GatorPoolConfig::from_toml(include_str!("../gatorpool.toml")) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}; falling back to defaults", e);
            GatorPoolConfig::default()
        }
    };
    if let Some(base_url) = option_env!("GATORPOOL_API_BASE") {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = option_env!("GATORPOOL_MAPBOX_TOKEN") {
        config = config.with_access_token(token);
    }
    tracing::info!("api at {}", config.api.base_url);
    config
}

#[component]
fn App() -> Element {
    let config = use_hook(app_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config,
            ToastProvider {
                AccountProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_page() -> Vec<Page> {
        vec![
            Page::SignIn,
            Page::SignUp,
            Page::CheckInbox,
            Page::FinishSignup,
            Page::Dashboard,
            Page::Profile,
            Page::FindRide,
            Page::RideRequest,
            Page::RiderTrips { tab: RiderTripsTab::Requested },
            Page::RiderTrip { tab: RiderTripsTab::Created, uuid: "t-1".into() },
            Page::CreateTrip,
            Page::DriverApplication { uuid: None },
            Page::DriverApplication { uuid: Some("app-3".into()) },
            Page::FindRiders { tab: RidersTab::Requested },
            Page::DriverTrips,
            Page::DriverTrip { uuid: "t-2".into() },
        ]
    }

    #[test]
    fn test_every_page_has_a_route() {
        for page in every_page() {
            let route = Route::from(page.clone());
            assert_eq!(route.page(), Some(page));
        }
    }

    #[test]
    fn test_route_paths_match_pages() {
        for page in every_page() {
            let rendered = Route::from(page.clone()).to_string();
            let route_path = rendered.split('?').next().unwrap_or_default().to_string();
            let page_path = page.path();
            assert_eq!(route_path, page_path.split('?').next().unwrap_or_default());
        }
    }

    #[test]
    fn test_landing_routes_have_no_page() {
        assert_eq!(Route::Root {}.page(), None);
        assert_eq!(Route::NotFound { segments: vec!["nope".into()] }.page(), None);
        let verify = Route::VerifyEmail { id: "1".into(), signature: "s".into() };
        assert_eq!(verify.page(), None);
    }

    #[test]
    fn test_unknown_tab_falls_back() {
        let route = Route::RiderTrips { tab: "archived".into() };
        assert_eq!(route.page(), Some(Page::RiderTrips { tab: RiderTripsTab::Created }));
        let route = Route::FindRiders { tab: String::new() };
        assert_eq!(route.page(), Some(Page::FindRiders { tab: RidersTab::Feed }));
    }

    #[test]
    fn test_parse_detail_path() {
        let route = "/ridertrip/requested/abc".parse::<Route>().ok();
        assert_eq!(
            route.and_then(|r| r.page()),
            Some(Page::RiderTrip { tab: RiderTripsTab::Requested, uuid: "abc".into() })
        );
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = GatorPoolConfig::from_toml(include_str!("../gatorpool.toml")).unwrap();
        assert_eq!(config.geocoding.debounce_ms, 500);
        assert_eq!(config.map.center_label, "University of Florida");
    }
}
