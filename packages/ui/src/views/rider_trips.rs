//! The rider's "my trips": posted requests and joined driver trips, plus the
//! detail page for either.

use api::{RiderTripsTab, Trip};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, LoadingScreen, TripCard};
use crate::format;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

fn status_label(trip: &Trip) -> String {
    trip.status.clone().unwrap_or_else(|| "PENDING".to_string())
}

#[component]
pub fn RiderTripsView(tab: RiderTripsTab) -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut page = use_signal(|| 1i64);

    let listing = use_resource(move || {
        let app = app.clone();
        let page = page();
        async move { app.client().rider_trips(page, tab).await }
    });

    let body = match &*listing.read() {
        None => rsx! { LoadingScreen { message: "Loading your trips..." } },
        Some(Err(e)) => rsx! {
            p { class: "form-error", "{e.user_message()}" }
        },
        Some(Ok(listing)) if listing.trips.is_empty() => rsx! {
            div {
                class: "panel empty-feed",
                h2 { "No trips found." }
                p { "Check out what's available." }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| pages.push(Page::FindRide),
                    "Find a ride"
                }
            }
        },
        Some(Ok(listing)) => {
            let has_previous = listing.has_previous();
            let has_next = listing.has_next();
            let position = format!("Page {} of {}", listing.current_page, listing.total_pages.max(1));
            rsx! {
                table {
                    class: "trip-table",
                    thead {
                        tr {
                            th { "To" }
                            th { "Status" }
                            th {
                                match tab {
                                    RiderTripsTab::Created => "Driver found",
                                    RiderTripsTab::Requested => "Accepted",
                                }
                            }
                            th { "When" }
                            th { "" }
                        }
                    }
                    tbody {
                        for trip in listing.trips.clone() {
                            TripRow { key: "{trip.uuid()}", tab, trip }
                        }
                    }
                }
                div {
                    class: "pager",
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: !has_previous,
                        onclick: move |_| page -= 1,
                        "Previous"
                    }
                    span { class: "muted", "{position}" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: !has_next,
                        onclick: move |_| page += 1,
                        "Next"
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page rider-trips",
            h1 { "My rides" }
            div {
                class: "tabs",
                for (label, target) in [("Created", RiderTripsTab::Created), ("Requested", RiderTripsTab::Requested)] {
                    button {
                        key: "{label}",
                        class: if target == tab { "tab active" } else { "tab" },
                        onclick: move |_| pages.push(Page::RiderTrips { tab: target }),
                        "{label}"
                    }
                }
            }
            {body}
        }
    }
}

#[component]
fn TripRow(tab: RiderTripsTab, trip: Trip) -> Element {
    let pages = use_pages();
    let destination = trip.destination().map(|w| w.label().to_string()).unwrap_or_default();
    let flag = match tab {
        RiderTripsTab::Created => trip.assigned_driver.is_some(),
        RiderTripsTab::Requested => trip.accepted_riders() > 0,
    };
    let uuid = trip.uuid().to_string();

    rsx! {
        tr {
            td { "{destination}" }
            td { span { class: "badge", "{status_label(&trip)}" } }
            td { if flag { "Yes" } else { "No" } }
            td { "{format::maybe_datetime(trip.datetime)}" }
            td {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| pages.push(Page::RiderTrip { tab, uuid: uuid.clone() }),
                    "View"
                }
            }
        }
    }
}

#[component]
pub fn RiderTripView(tab: RiderTripsTab, uuid: String) -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut toasts = use_toasts();
    let mut withdrawing = use_signal(|| false);

    let trip_uuid = uuid.clone();
    let trip_app = app.clone();
    let detail = use_resource(move || {
        let app = trip_app.clone();
        let uuid = trip_uuid.clone();
        async move {
            let view = app.client().rider_trip(&uuid).await?;
            // Only joined trips have a driver to show.
            let driver = if tab == RiderTripsTab::Requested {
                match app.client().rider_trip_driver(&uuid).await {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::warn!("driver profile for {} unavailable: {}", uuid, e);
                        None
                    }
                }
            } else {
                None
            };
            Ok::<_, api::ApiError>((view, driver))
        }
    });

    let withdraw = move |_| {
        let app = app.clone();
        let uuid = uuid.clone();
        async move {
            withdrawing.set(true);
            match app.client().withdraw_request(&uuid).await {
                Ok(()) => {
                    push_toast(&mut toasts, ToastLevel::Success, "Your request was withdrawn.");
                    pages.replace(Page::RiderTrips { tab });
                }
                Err(e) => {
                    push_toast(&mut toasts, ToastLevel::Error, &e.user_message());
                    withdrawing.set(false);
                }
            }
        }
    };

    let content = match &*detail.read() {
        None => rsx! { LoadingScreen { message: "Loading trip..." } },
        Some(Err(e)) => rsx! {
            p { class: "form-error", "{e.user_message()}" }
        },
        Some(Ok((view, driver))) => {
            let accepted = view.is_accepted();
            let passengers = view.trip.accepted_riders();
            let status = if tab == RiderTripsTab::Created {
                status_label(&view.trip)
            } else if accepted {
                "Accepted".to_string()
            } else {
                "Pending acceptance".to_string()
            };
            rsx! {
                div {
                    class: "detail-header",
                    h1 { if tab == RiderTripsTab::Created { "Trip request" } else { "Trip summary" } }
                    span { class: "badge", "{status}" }
                }
                TripCard {
                    trip: view.trip.clone(),
                    driver: driver.clone(),
                    if tab == RiderTripsTab::Requested {
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: withdrawing(),
                            onclick: withdraw,
                            if withdrawing() { "Withdrawing..." } else { "Withdraw request" }
                        }
                    }
                }
                section {
                    class: "section",
                    h2 { "Passengers" }
                    p { "{passengers} accepted rider(s)" }
                    if tab == RiderTripsTab::Created {
                        p { class: "muted", "{view.trip.driver_requests.len()} driver offer(s) so far" }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page rider-trip",
            Button {
                variant: ButtonVariant::Ghost,
                onclick: move |_| pages.push(Page::RiderTrips { tab }),
                "\u{2190} Back to my rides"
            }
            {content}
        }
    }
}
