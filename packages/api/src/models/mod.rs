//! Wire models for backend responses.

use serde::{Deserialize, Deserializer};

pub mod account;
pub mod driver;
pub mod rider;
pub mod trip;

pub use account::{Account, Announcement, BottomAction, CardAction, DashboardStats, StatusCard};
pub use driver::{ApplicationStatus, DriverApplication, DriverProfile, RiderProfile, Vehicle};
pub use rider::RiderQuery;
pub use trip::{Fare, Miscellaneous, PreferenceOption, Trip, TripRider, Waypoint};

/// The backend serialises empty lists as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
