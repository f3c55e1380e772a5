//! Rider trip search: the form, the results, the empty-state alternatives and
//! the "request this trip" confirmation.

use api::feed::NOTIFY_STUB_MESSAGE;
use api::models::{RiderQuery, Waypoint};
use api::wizard::{RideRequestDraft, TermsConfirmation, CAMPUS, CAMPUS_LABEL, RIDER_TERMS};
use api::{EmptyFeedAction, FeedFilters, FeedState, Place, RideSearch, RiderTripsTab, Trip};
use dioxus::prelude::*;

use super::{ModalOverlay, REQUEST_HANDOFF};
use crate::account::use_account;
use crate::components::{AddressInput, Button, ButtonVariant, Checkbox, Field, StaticMapImage, TripCard};
use crate::format;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

fn campus() -> Place {
    Place {
        text: CAMPUS_LABEL.to_string(),
        position: CAMPUS,
        parts: Default::default(),
    }
}

/// A stop from a past query, usable again as a search endpoint.
fn place_of(waypoint: &Waypoint) -> Option<Place> {
    Some(Place {
        text: waypoint.label().to_string(),
        position: waypoint.position()?,
        parts: Default::default(),
    })
}

fn query_label(query: &RiderQuery) -> String {
    let stop = |w: &Option<Waypoint>| w.as_ref().map(|w| w.label().to_string()).unwrap_or_default();
    format!("{} \u{2192} {}", stop(&query.from), stop(&query.to))
}

#[component]
pub fn FindRideView() -> Element {
    let app = use_app();
    let account = use_account();
    let pages = use_pages();
    let mut toasts = use_toasts();

    let mut from_text = use_signal(|| CAMPUS_LABEL.to_string());
    let mut from = use_signal(|| Some(campus()));
    let mut to_text = use_signal(String::new);
    let mut to = use_signal(|| Option::<Place>::None);
    let mut when = use_signal(String::new);
    let mut filters = use_signal(FeedFilters::default);
    let mut feed = use_signal(FeedState::default);
    let mut last_search = use_signal(|| Option::<RideSearch>::None);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut requesting = use_signal(|| Option::<Trip>::None);

    let queries_app = app.clone();
    let past_queries = use_resource(move || {
        let app = queries_app.clone();
        async move {
            match app.client().rider_queries().await {
                Ok(queries) => queries,
                Err(e) => {
                    tracing::warn!("loading past queries failed: {}", e);
                    Vec::new()
                }
            }
        }
    });

    let current = account().current();
    let show_females_only = FeedFilters::show_females_only(&current);

    let search = move |evt: FormEvent| {
        evt.prevent_default();
        let app = app.clone();
        async move {
            if feed().is_loading() {
                return;
            }
            let (Some(origin), Some(destination)) = (from(), to()) else {
                form_error.set(Some("Choose both locations from the suggestions.".into()));
                return;
            };
            let Some(datetime) = format::parse_datetime_local(&when()) else {
                form_error.set(Some("Pick a date and time for the ride.".into()));
                return;
            };
            form_error.set(None);

            let mut query = RideSearch {
                from: origin,
                to: destination,
                datetime,
                flexible_dates: false,
                females_only: false,
            };
            filters().effective(&account.peek().current()).apply(&mut query);
            tracing::info!("searching trips {} -> {}", query.from.text, query.to.text);

            feed.set(FeedState::Loading);
            let result = app.client().query_trips(&query).await;
            feed.set(FeedState::from_result(result));
            last_search.set(Some(query));
        }
    };

    let mut on_empty_action = move |action: EmptyFeedAction| match action {
        EmptyFeedAction::SwitchToRequestFlow => {
            let draft = last_search().map(|s| RideRequestDraft::from_search(&s)).unwrap_or_default();
            *REQUEST_HANDOFF.write() = Some(draft);
            pages.push(Page::RideRequest);
        }
        EmptyFeedAction::ChangeDates => {
            when.set(String::new());
            feed.set(FeedState::Idle);
        }
        EmptyFeedAction::NotifyWhenAvailable => {
            push_toast(&mut toasts, ToastLevel::Info, NOTIFY_STUB_MESSAGE);
        }
    };

    let use_query = move |query: RiderQuery| {
        if let Some(place) = query.from.as_ref().and_then(place_of) {
            from_text.set(place.text.clone());
            from.set(Some(place));
        }
        if let Some(place) = query.to.as_ref().and_then(place_of) {
            to_text.set(place.text.clone());
            to.set(Some(place));
        }
        if let Some(date) = query.date {
            when.set(format::datetime_local_value(Some(date)));
        }
        feed.set(FeedState::Idle);
    };

    let state = feed();
    let pickup = from().map(|p| p.position);
    let destination = to().map(|p| p.position);

    rsx! {
        div {
            class: "page find-ride",
            div {
                class: "split",
                form {
                    class: "panel search-form",
                    onsubmit: search,
                    h1 { "Find a ride" }
                    AddressInput {
                        id: "ride-from",
                        label: "From",
                        placeholder: "From where?",
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
                        id: "ride-to",
                        label: "To",
                        placeholder: "To where?",
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
                        id: "ride-when",
                        label: "Date and time",
                        kind: "datetime-local",
                        value: when(),
                        oninput: move |v| when.set(v),
                    }
                    Checkbox {
                        id: "flexible-dates",
                        checked: filters().flexible_dates,
                        onchange: move |v| filters.write().flexible_dates = v,
                        "Flexible dates"
                    }
                    if show_females_only {
                        Checkbox {
                            id: "females-only",
                            checked: filters().females_only,
                            onchange: move |v| filters.write().females_only = v,
                            "Female drivers only"
                        }
                    }
                    if let Some(message) = form_error() {
                        p { class: "form-error", "{message}" }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: state.is_loading(),
                        if state.is_loading() { "Searching..." } else { "Find" }
                    }
                }
                div {
                    class: "panel map-panel",
                    StaticMapImage { pickup, destination }
                }
            }

            if let Some(headline) = state.headline() {
                h2 { class: "feed-headline", "{headline}" }
            }

            match state.clone() {
                FeedState::Idle | FeedState::Loading => rsx! {},
                FeedState::Failed(message) => rsx! {
                    p { class: "form-error", "{message}" }
                },
                FeedState::Empty => rsx! {
                    div {
                        class: "panel empty-feed",
                        p { "No drivers are offering this trip yet. You can still get there:" }
                        div {
                            class: "button-row",
                            for action in EmptyFeedAction::ALL {
                                Button {
                                    key: "{action.label()}",
                                    variant: ButtonVariant::Outline,
                                    onclick: move |_| on_empty_action(action),
                                    "{action.label()}"
                                }
                            }
                        }
                    }
                },
                FeedState::Results(results) => rsx! {
                    div {
                        class: "card-list",
                        for trip in results.trips.clone() {
                            TripCard {
                                key: "{trip.uuid()}",
                                driver: results.driver_for(&trip).cloned(),
                                trip: trip.clone(),
                                Button {
                                    variant: ButtonVariant::Primary,
                                    onclick: {
                                        let chosen = trip.clone();
                                        move |_| requesting.set(Some(chosen.clone()))
                                    },
                                    "Request"
                                }
                            }
                        }
                    }
                },
            }

            if let Some(queries) = past_queries.read().as_ref().filter(|q| !q.is_empty()) {
                section {
                    class: "section",
                    h2 { "Recent searches" }
                    ul {
                        class: "plain-list",
                        for query in queries.clone() {
                            li {
                                key: "{query.query_uuid.clone().unwrap_or_default()}",
                                class: "list-row",
                                span { "{query_label(&query)}" }
                                span { class: "muted", "{format::maybe_datetime(query.date)}" }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: {
                                        let mut use_query = use_query;
                                        move |_| use_query(query.clone())
                                    },
                                    "Search again"
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(trip) = requesting() {
            RequestTripDialog {
                trip,
                on_close: move |_| requesting.set(None),
                on_requested: move |_| {
                    requesting.set(None);
                    pages.push(Page::RiderTrips { tab: RiderTripsTab::Requested });
                },
            }
        }
    }
}

/// Terms checkbox in front of `POST /v1/trip/request/{uuid}`.
#[component]
fn RequestTripDialog(trip: Trip, on_close: EventHandler<()>, on_requested: EventHandler<()>) -> Element {
    let app = use_app();
    let mut toasts = use_toasts();
    let mut terms = use_signal(TermsConfirmation::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut sending = use_signal(|| false);

    let uuid = trip.uuid().to_string();
    let confirm = move |_| {
        let app = app.clone();
        let uuid = uuid.clone();
        async move {
            if sending() {
                return;
            }
            if let Err(e) = terms().confirm() {
                error.set(Some(e.message));
                return;
            }
            sending.set(true);
            match app.client().request_trip(&uuid).await {
                Ok(()) => {
                    push_toast(&mut toasts, ToastLevel::Success, "Trip requested. The driver will get back to you.");
                    on_requested.call(());
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    sending.set(false);
                }
            }
        }
    };

    let destination = trip.destination().map(|w| w.label().to_string()).unwrap_or_default();

    rsx! {
        ModalOverlay {
            title: "Request this trip",
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                p { "Trip to {destination} on {format::maybe_datetime(trip.datetime)}" }
                Checkbox {
                    id: "rider-terms",
                    checked: terms().accepted,
                    onchange: move |v| {
                        terms.write().accepted = v;
                        error.set(None);
                    },
                    "{RIDER_TERMS}"
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
                    onclick: confirm,
                    if sending() { "Requesting..." } else { "Request trip" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_past_query_stop_becomes_place() {
        let waypoint = Waypoint {
            geo_text: Some("Orlando, Florida".into()),
            latitude: Some(28.5),
            longitude: Some(-81.4),
            ..Default::default()
        };
        let place = place_of(&waypoint).unwrap();
        assert_eq!(place.text, "Orlando, Florida");
        assert_eq!(place.position.lat, 28.5);
    }

    #[test]
    fn test_stop_without_coordinates_is_skipped() {
        let waypoint = Waypoint {
            name: Some("Somewhere".into()),
            ..Default::default()
        };
        assert!(place_of(&waypoint).is_none());
    }
}
