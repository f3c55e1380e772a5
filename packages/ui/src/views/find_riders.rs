//! Driver side of matching: rider-posted requests near a route, the "offer to
//! drive" dialog, and the requests already answered.

use api::wizard::{DriverOffer, CAMPUS, CAMPUS_LABEL, DRIVER_TERMS};
use api::{DriverFeed, Place, Trip};
use dioxus::prelude::*;

use super::ModalOverlay;
use crate::components::{AddressInput, Button, ButtonVariant, Checkbox, Field, LoadingScreen, TripCard};
use crate::format;
use crate::nav::use_pages;
use crate::screen::{Page, RidersTab};
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

#[component]
pub fn FindRidersView(tab: RidersTab) -> Element {
    let pages = use_pages();

    rsx! {
        div {
            class: "page find-riders",
            h1 { "Find riders" }
            div {
                class: "tabs",
                for (label, target) in [("Feed", RidersTab::Feed), ("Requested", RidersTab::Requested)] {
                    button {
                        key: "{label}",
                        class: if target == tab { "tab active" } else { "tab" },
                        onclick: move |_| pages.push(Page::FindRiders { tab: target }),
                        "{label}"
                    }
                }
            }
            match tab {
                RidersTab::Feed => rsx! { RiderFeedPanel {} },
                RidersTab::Requested => rsx! { RequestedRidesPanel {} },
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FeedLoad {
    Idle,
    Loading,
    Loaded(DriverFeed),
    Failed(String),
}

#[component]
fn RiderFeedPanel() -> Element {
    let app = use_app();
    let pages = use_pages();

    let mut from_text = use_signal(|| CAMPUS_LABEL.to_string());
    let mut from = use_signal(|| {
        Some(Place {
            text: CAMPUS_LABEL.to_string(),
            position: CAMPUS,
            parts: Default::default(),
        })
    });
    let mut to_text = use_signal(String::new);
    let mut to = use_signal(|| Option::<Place>::None);
    let mut when = use_signal(String::new);
    let mut load = use_signal(|| FeedLoad::Idle);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut offering = use_signal(|| Option::<Trip>::None);

    let search = move |evt: FormEvent| {
        evt.prevent_default();
        let app = app.clone();
        async move {
            let (Some(origin), Some(destination)) = (from(), to()) else {
                form_error.set(Some("Choose both locations from the suggestions.".into()));
                return;
            };
            let Some(datetime) = format::parse_datetime_local(&when()) else {
                form_error.set(Some("Pick a date and time for the trip.".into()));
                return;
            };
            form_error.set(None);
            load.set(FeedLoad::Loading);
            let next = match app.client().driver_feed(origin.position, destination.position, datetime).await {
                Ok(feed) => FeedLoad::Loaded(feed),
                Err(e) => {
                    tracing::warn!("driver feed failed: {}", e);
                    FeedLoad::Failed(e.user_message())
                }
            };
            load.set(next);
        }
    };

    let loading = load() == FeedLoad::Loading;

    rsx! {
        form {
            class: "panel search-form",
            onsubmit: search,
            AddressInput {
                id: "riders-from",
                label: "Leaving from",
                value: from_text(),
                on_text: move |v| {
                    from_text.set(v);
                    from.set(None);
                },
                on_select: move |place: Place| {
                    from_text.set(place.text.clone());
                    from.set(Some(place));
                },
            }
            AddressInput {
                id: "riders-to",
                label: "Heading to",
                value: to_text(),
                on_text: move |v| {
                    to_text.set(v);
                    to.set(None);
                },
                on_select: move |place: Place| {
                    to_text.set(place.text.clone());
                    to.set(Some(place));
                },
            }
            Field {
                id: "riders-when",
                label: "Date and time",
                kind: "datetime-local",
                value: when(),
                oninput: move |v| when.set(v),
            }
            if let Some(message) = form_error() {
                p { class: "form-error", "{message}" }
            }
            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: loading,
                if loading { "Searching..." } else { "Find riders" }
            }
        }

        match load() {
            FeedLoad::Idle => rsx! {},
            FeedLoad::Loading => rsx! { LoadingScreen { message: "Looking for riders..." } },
            FeedLoad::Failed(message) => rsx! {
                p { class: "form-error", "{message}" }
            },
            FeedLoad::Loaded(feed) if feed.trips.is_empty() => rsx! {
                div { class: "panel empty-feed", p { "No riders are asking for this route yet." } }
            },
            FeedLoad::Loaded(feed) => rsx! {
                div {
                    class: "card-list",
                    for trip in feed.trips.clone() {
                        TripCard {
                            key: "{trip.uuid()}",
                            rider: feed.poster(&trip).cloned(),
                            trip: trip.clone(),
                            Button {
                                variant: ButtonVariant::Primary,
                                onclick: {
                                    let chosen = trip.clone();
                                    move |_| offering.set(Some(chosen.clone()))
                                },
                                "Offer to drive"
                            }
                        }
                    }
                }
            },
        }

        if let Some(trip) = offering() {
            OfferDialog {
                trip,
                on_close: move |_| offering.set(None),
                on_sent: move |_| {
                    offering.set(None);
                    pages.push(Page::FindRiders { tab: RidersTab::Requested });
                },
            }
        }
    }
}

/// Fare inputs and the driver terms in front of the offer request.
#[component]
fn OfferDialog(trip: Trip, on_close: EventHandler<()>, on_sent: EventHandler<()>) -> Element {
    let app = use_app();
    let mut toasts = use_toasts();
    let mut offer = use_signal(DriverOffer::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut sending = use_signal(|| false);

    let uuid = trip.uuid().to_string();
    let send = move |_| {
        let app = app.clone();
        let uuid = uuid.clone();
        async move {
            if sending() {
                return;
            }
            let fare = match offer().confirm() {
                Ok(fare) => fare,
                Err(e) => {
                    error.set(Some(e.message));
                    return;
                }
            };
            sending.set(true);
            match app.client().offer_to_drive(&uuid, &fare).await {
                Ok(()) => {
                    push_toast(&mut toasts, ToastLevel::Success, "Offer sent. The rider will be notified.");
                    on_sent.call(());
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    sending.set(false);
                }
            }
        }
    };

    let current = offer();

    rsx! {
        ModalOverlay {
            title: "Offer to drive",
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                Field {
                    id: "offer-trip",
                    label: "Trip",
                    kind: "number",
                    value: current.trip.clone(),
                    oninput: move |v| offer.write().trip = v,
                }
                Field {
                    id: "offer-gas",
                    label: "Gas",
                    kind: "number",
                    value: current.gas.clone(),
                    oninput: move |v| offer.write().gas = v,
                }
                Field {
                    id: "offer-food",
                    label: "Food",
                    kind: "number",
                    value: current.food.clone(),
                    oninput: move |v| offer.write().food = v,
                }
                p { "Total: {format::dollars(current.total())}" }
                Checkbox {
                    id: "driver-terms",
                    checked: current.accepted,
                    onchange: move |v| {
                        offer.write().accepted = v;
                        error.set(None);
                    },
                    "{DRIVER_TERMS}"
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
            }
            div {
                class: "modal-footer",
                Button { variant: ButtonVariant::Ghost, onclick: move |_| on_close.call(()), "Cancel" }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: sending(),
                    onclick: send,
                    if sending() { "Sending..." } else { "Send offer" }
                }
            }
        }
    }
}

#[component]
fn RequestedRidesPanel() -> Element {
    let app = use_app();

    let requested = use_resource(move || {
        let app = app.clone();
        async move { app.client().requested_rides().await }
    });

    let state = requested.read().clone();
    match &state {
        None => rsx! { LoadingScreen { message: "Loading your offers..." } },
        Some(Err(e)) => rsx! {
            p { class: "form-error", "{e.user_message()}" }
        },
        Some(Ok(trips)) if trips.is_empty() => rsx! {
            div { class: "panel empty-feed", p { "You have not offered to drive anyone yet." } }
        },
        Some(Ok(trips)) => rsx! {
            div {
                class: "card-list",
                for trip in trips.clone() {
                    TripCard { key: "{trip.uuid()}", trip: trip.clone() }
                }
            }
        },
    }
}
