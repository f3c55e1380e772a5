//! Backend endpoints, one module per service. Every function here is an
//! inherent method on [`crate::ApiClient`].
//!
//! | Module | Paths |
//! |--------|-------|
//! | [`auth`] | `/v1/auth/verify`, `/oauth2/token` |
//! | [`account`] | `/v1/account/*`, `/v1/rider/address/save`, `/v1/rider/preferences/save`, `/v1/config/banner*`, `/v1/*/gender` |
//! | [`rider`] | `/v1/trip/rider/*`, `/v1/trip/request/*`, `/v1/rider/trips*`, `/v1/rider/queries` |
//! | [`driver`] | `/v1/driver/*`, `/v1/trip/` (create, edit, cancel), `/v1/trip/driver/*` |

pub mod account;
pub mod auth;
pub mod driver;
pub mod rider;

pub use account::{FinishSignup, HomeAddress};
pub use auth::{SessionIssued, SessionStatus, ACCOUNT_NOT_COMPLETE};
pub use driver::{CancelledTrip, DriverFeed, CANCELLED_NO_PENALTY, CANCELLED_WITH_WARNING};
pub use rider::{RideSearch, RiderFeed, RiderTripView, RiderTripsTab, TripPage};
