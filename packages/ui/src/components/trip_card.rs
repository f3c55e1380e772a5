use api::models::{DriverProfile, RiderProfile, Trip, Waypoint};
use dioxus::prelude::*;

use crate::format;

/// One trip in a feed or list. Actions go in `children`.
#[component]
pub fn TripCard(
    trip: Trip,
    #[props(default)] driver: Option<DriverProfile>,
    #[props(default)] rider: Option<RiderProfile>,
    #[props(default)] on_open: Option<EventHandler<String>>,
    children: Element,
) -> Element {
    let fare = trip.fare.clone().unwrap_or_default();
    let status = trip.status.clone().unwrap_or_else(|| "open".to_string());
    let uuid = trip.uuid().to_string();

    rsx! {
        div {
            class: "trip-card",
            div {
                class: "trip-card-stops",
                Stop { heading: "PICKUP", waypoint: trip.pickup().cloned() }
                Stop { heading: "DROPOFF", waypoint: trip.destination().cloned() }
            }

            if let Some(driver) = driver {
                div {
                    class: "trip-card-section",
                    h4 { "DRIVER INFORMATION" }
                    p { "{driver.first_name} {driver.last_name}" }
                    if let Some(vehicle) = &driver.vehicle {
                        p { class: "muted", "{vehicle.describe()}" }
                    }
                    if let Some(rating) = driver.rating {
                        p { class: "muted", "Rating: {rating:.1}" }
                    }
                }
            }

            if let Some(rider) = rider {
                div {
                    class: "trip-card-section",
                    h4 { "RIDER INFORMATION" }
                    p { "{rider.first_name} {rider.last_name}" }
                }
            }

            div {
                class: "trip-card-section",
                h4 { "TRIP DETAILS" }
                p { "{format::maybe_datetime(trip.datetime)}" }
                p { "Total: {format::dollars(fare.total())}" }
                p { class: "muted", "{format::fare_breakdown(&fare)}" }
                if trip.females_only() {
                    span { class: "badge", "Female riders only" }
                }
                span { class: "badge", "{status}" }
            }

            div {
                class: "trip-card-actions",
                h4 { "ACTIONS" }
                if let Some(open) = on_open {
                    button {
                        class: "link-button",
                        onclick: move |_| open.call(uuid.clone()),
                        "View details"
                    }
                }
                {children}
            }
        }
    }
}

#[component]
fn Stop(heading: String, waypoint: Option<Waypoint>) -> Element {
    let label = waypoint
        .as_ref()
        .map(|w| w.label().to_string())
        .unwrap_or_else(|| "Unknown location".to_string());
    let expected = waypoint.and_then(|w| w.expected);

    rsx! {
        div {
            class: "trip-card-stop",
            h4 { "{heading}" }
            p { "{label}" }
            if let Some(at) = expected {
                p { class: "muted", "{format::datetime(at)}" }
            }
        }
    }
}
