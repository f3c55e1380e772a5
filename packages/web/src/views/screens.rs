//! Signed-in routes. Each one hands its page to the shared route table,
//! which picks the screen for the current account.

use dioxus::prelude::*;

use ui::views::ScreenView;

use crate::Route;

fn screen(route: Route) -> Element {
    match route.page() {
        Some(page) => rsx! { ScreenView { page } },
        None => rsx! {},
    }
}

#[component]
pub fn Dashboard() -> Element {
    screen(Route::Dashboard {})
}

#[component]
pub fn Profile() -> Element {
    screen(Route::Profile {})
}

#[component]
pub fn FindRide() -> Element {
    screen(Route::FindRide {})
}

#[component]
pub fn RideRequest() -> Element {
    screen(Route::RideRequest {})
}

#[component]
pub fn RiderTrips(tab: String) -> Element {
    screen(Route::RiderTrips { tab })
}

#[component]
pub fn RiderTrip(tab: String, uuid: String) -> Element {
    screen(Route::RiderTrip { tab, uuid })
}

#[component]
pub fn CreateTrip() -> Element {
    screen(Route::CreateTrip {})
}

#[component]
pub fn DriverApplication(uuid: String) -> Element {
    screen(Route::DriverApplication { uuid })
}

#[component]
pub fn FindRiders(tab: String) -> Element {
    screen(Route::FindRiders { tab })
}

#[component]
pub fn DriverTrips() -> Element {
    screen(Route::DriverTrips {})
}

#[component]
pub fn DriverTrip(uuid: String) -> Element {
    screen(Route::DriverTrip { uuid })
}
