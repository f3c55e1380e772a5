//! # API crate: everything GatorPool does that is not drawing pixels
//!
//! The `ui` crate renders; this crate talks to the backend and the map
//! provider and owns the state machines behind each screen, so all of it can
//! be tested without a browser.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, identity headers, cookie session, response envelope |
//! | [`endpoints`] | One inherent method on [`ApiClient`] per backend endpoint |
//! | [`models`] | Wire types: accounts, trips, applications, profiles |
//! | [`error`] | [`ApiError`] taxonomy and [`ValidationError`] |
//! | [`geo`] | Place search, driving routes, static maps, radius polygons |
//! | [`autocomplete`] | Debounced address suggestions with stale-response suppression |
//! | [`gate`] | Session gate for protected screens |
//! | [`signin`] | Password sign-in with the emailed-code step |
//! | [`password`] | Sign-up password checklist |
//! | [`wizard`] | Generic multi-step form machine and the three flows built on it |
//! | [`feed`] | Rider search results and the empty-state alternatives |
//! | [`time`] | Platform timer |

pub mod autocomplete;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod feed;
pub mod gate;
pub mod geo;
pub mod models;
pub mod password;
pub mod signin;
pub mod time;
pub mod wizard;

pub use autocomplete::{AddressAutocomplete, Suggestions};
pub use client::ApiClient;
pub use endpoints::{
    CancelledTrip, DriverFeed, FinishSignup, HomeAddress, RideSearch, RiderFeed, RiderTripView, RiderTripsTab,
    SessionIssued, SessionStatus, TripPage,
};
pub use error::{ApiError, ValidationError, GENERIC_ERROR};
pub use feed::{EmptyFeedAction, FeedFilters, FeedState};
pub use gate::{AuthBackend, GateOutcome, SessionGate};
pub use geo::{LatLng, MapboxClient, Place, PlaceSearch, RouteEstimate, RouteLookup, StaticMap};
pub use models::{Account, DriverApplication, DriverProfile, RiderProfile, Trip};
pub use password::PasswordStrength;
pub use signin::{SignInFlow, SignInStep};
pub use wizard::{Flow, Wizard};
