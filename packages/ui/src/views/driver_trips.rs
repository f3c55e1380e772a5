//! The driver's posted trips: the list, and a detail page where preferences
//! and fare can be edited or the trip cancelled.

use api::models::{Fare, Miscellaneous, PreferenceOption};
use api::wizard::TalkingLevel;
use api::Trip;
use dioxus::prelude::*;

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant, Checkbox, Field, LoadingScreen, TripCard};
use crate::format;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

#[component]
pub fn DriverTripsView() -> Element {
    let app = use_app();
    let pages = use_pages();

    let trips = use_resource(move || {
        let app = app.clone();
        async move { app.client().driver_trips().await }
    });

    let body = match &*trips.read() {
        None => rsx! { LoadingScreen { message: "Loading your trips..." } },
        Some(Err(e)) => rsx! {
            p { class: "form-error", "{e.user_message()}" }
        },
        Some(Ok(trips)) if trips.is_empty() => rsx! {
            div {
                class: "panel empty-feed",
                h2 { "No trips found." }
                p { "Create a trip to get started." }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| pages.push(Page::CreateTrip),
                    "Create a trip"
                }
            }
        },
        Some(Ok(trips)) => rsx! {
            table {
                class: "trip-table",
                thead {
                    tr {
                        th { "To" }
                        th { "Status" }
                        th { "Fare" }
                        th { "When" }
                        th { "Riders" }
                        th { "" }
                    }
                }
                tbody {
                    for trip in trips.clone() {
                        DriverTripRow { key: "{trip.uuid()}", trip }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page driver-trips",
            h1 { "My trips" }
            {body}
        }
    }
}

#[component]
fn DriverTripRow(trip: Trip) -> Element {
    let pages = use_pages();
    let destination = trip.destination().map(|w| w.label().to_string()).unwrap_or_default();
    let fare = trip.fare.as_ref().map(|f| format::dollars(f.total())).unwrap_or_default();
    let status = trip.status.clone().unwrap_or_default();
    let uuid = trip.uuid().to_string();

    rsx! {
        tr {
            td { "{destination}" }
            td { span { class: "badge", "{status}" } }
            td { "{fare}" }
            td { "{format::maybe_datetime(trip.datetime)}" }
            td { "{trip.accepted_riders()} / {trip.riders.len()}" }
            td {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| pages.push(Page::DriverTrip { uuid: uuid.clone() }),
                    "View"
                }
            }
        }
    }
}

fn preferences(trip: &mut Trip) -> &mut Miscellaneous {
    trip.miscellaneous.get_or_insert_with(Miscellaneous::default)
}

fn fare(trip: &mut Trip) -> &mut Fare {
    let fare = trip.fare.get_or_insert_with(Fare::default);
    // Parts changed; the stored aggregate no longer applies.
    fare.aggregated = None;
    fare
}

fn can_control(option: &Option<PreferenceOption>) -> bool {
    option.as_ref().and_then(|o| o.can_be_controlled).unwrap_or(false)
}

fn talking_of(trip: &Trip) -> TalkingLevel {
    let kind = trip
        .miscellaneous
        .as_ref()
        .and_then(|m| m.talking.as_ref())
        .and_then(|t| t.r#type.as_deref())
        .unwrap_or("open");
    TalkingLevel::ALL
        .into_iter()
        .find(|level| level.label().eq_ignore_ascii_case(kind))
        .unwrap_or(TalkingLevel::Open)
}

/// Turning carpool off is refused once more than one rider is on board.
fn carpool_change_allowed(trip: &Trip, carpool: bool) -> bool {
    carpool || trip.accepted_riders() <= 1
}

#[component]
pub fn DriverTripView(uuid: String) -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut toasts = use_toasts();
    let mut saved = use_signal(|| Option::<Trip>::None);
    let mut edited = use_signal(|| Option::<Trip>::None);
    let mut saving = use_signal(|| false);
    let mut confirm_cancel = use_signal(|| false);
    let mut load_error = use_signal(|| Option::<String>::None);

    let load_app = app.clone();
    let load_uuid = uuid.clone();
    use_hook(move || {
        spawn(async move {
            match load_app.client().driver_trip(&load_uuid).await {
                Ok(trip) => {
                    saved.set(Some(trip.clone()));
                    edited.set(Some(trip));
                }
                Err(e) => load_error.set(Some(e.user_message())),
            }
        })
    });

    let save_app = app.clone();
    let save = move |_| {
        let app = save_app.clone();
        async move {
            let Some(trip) = edited() else {
                return;
            };
            saving.set(true);
            match app.client().save_trip(&trip).await {
                Ok(stored) => {
                    push_toast(&mut toasts, ToastLevel::Success, "Trip updated.");
                    saved.set(Some(stored.clone()));
                    edited.set(Some(stored));
                }
                Err(e) => push_toast(&mut toasts, ToastLevel::Error, &e.user_message()),
            }
            saving.set(false);
        }
    };

    let cancel = move |_| {
        let app = app.clone();
        let uuid = uuid.clone();
        async move {
            confirm_cancel.set(false);
            match app.client().cancel_trip(&uuid).await {
                Ok(cancelled) => {
                    let level = if cancelled.issue_warning { ToastLevel::Warning } else { ToastLevel::Success };
                    push_toast(&mut toasts, level, cancelled.notice());
                    pages.replace(Page::DriverTrips);
                }
                Err(e) => push_toast(&mut toasts, ToastLevel::Error, &e.user_message()),
            }
        }
    };

    let mut edit = move |change: Box<dyn FnOnce(&mut Trip)>| {
        if let Some(trip) = edited.write().as_mut() {
            change(trip);
        }
    };

    let (Some(original), Some(trip)) = (saved(), edited()) else {
        return match load_error() {
            Some(message) => rsx! {
                div { class: "page", p { class: "form-error", "{message}" } }
            },
            None => rsx! { LoadingScreen { message: "Loading trip..." } },
        };
    };

    let dirty = original != trip;
    let cancelled = trip.status.as_deref() == Some("CANCELLED");
    let current_fare = trip.fare.clone().unwrap_or_default();
    let misc = trip.miscellaneous.clone().unwrap_or_default();
    let talking = talking_of(&trip);

    rsx! {
        div {
            class: "page driver-trip",
            Button {
                variant: ButtonVariant::Ghost,
                onclick: move |_| pages.push(Page::DriverTrips),
                "\u{2190} Back to my trips"
            }
            div {
                class: "detail-header",
                h1 { "Trip summary" }
                span { class: "badge", if cancelled { "Cancelled" } else { "Upcoming" } }
            }

            TripCard { trip: original.clone() }

            section {
                class: "section",
                h2 { "Fare details" }
                div {
                    class: "field-grid",
                    Field {
                        id: "edit-fare-trip",
                        label: "Trip",
                        kind: "number",
                        value: current_fare.trip.map(|v| v.to_string()).unwrap_or_default(),
                        oninput: move |v: String| edit(Box::new(move |t: &mut Trip| fare(t).trip = format::parse_amount(&v))),
                    }
                    Field {
                        id: "edit-fare-gas",
                        label: "Gas",
                        kind: "number",
                        value: current_fare.gas.map(|v| v.to_string()).unwrap_or_default(),
                        oninput: move |v: String| edit(Box::new(move |t: &mut Trip| fare(t).gas = format::parse_amount(&v))),
                    }
                    Field {
                        id: "edit-fare-food",
                        label: "Food",
                        kind: "number",
                        value: current_fare.food.map(|v| v.to_string()).unwrap_or_default(),
                        oninput: move |v: String| edit(Box::new(move |t: &mut Trip| fare(t).food = format::parse_amount(&v))),
                    }
                }
                p { "Total: {format::dollars(current_fare.total())}" }
            }

            section {
                class: "section",
                h2 { "Preferences" }
                Checkbox {
                    id: "edit-music",
                    checked: can_control(&misc.music),
                    disabled: cancelled,
                    onchange: move |v| edit(Box::new(move |t: &mut Trip| {
                        preferences(t).music.get_or_insert_with(Default::default).can_be_controlled = Some(v);
                    })),
                    "Rider can change or request music"
                }
                Checkbox {
                    id: "edit-ac",
                    checked: can_control(&misc.ac),
                    disabled: cancelled,
                    onchange: move |v| edit(Box::new(move |t: &mut Trip| {
                        preferences(t).ac.get_or_insert_with(Default::default).can_be_controlled = Some(v);
                    })),
                    "Rider can change the AC"
                }
                div {
                    class: "field",
                    label { r#for: "edit-talking", "Talking" }
                    select {
                        id: "edit-talking",
                        disabled: cancelled,
                        onchange: move |evt: FormEvent| {
                            let kind = evt.value().to_lowercase();
                            edit(Box::new(move |t: &mut Trip| {
                                preferences(t).talking.get_or_insert_with(Default::default).r#type = Some(kind);
                            }));
                        },
                        for level in TalkingLevel::ALL {
                            option {
                                key: "{level.label()}",
                                value: level.label(),
                                selected: level == talking,
                                "{level.label()}"
                            }
                        }
                    }
                }
            }

            section {
                class: "section",
                h2 { "Carpooling" }
                Checkbox {
                    id: "edit-carpool",
                    checked: trip.carpool.unwrap_or(false),
                    disabled: cancelled,
                    onchange: move |v: bool| {
                        let allowed = edited.peek().as_ref().is_some_and(|t| carpool_change_allowed(t, v));
                        if allowed {
                            edit(Box::new(move |t: &mut Trip| t.carpool = Some(v)));
                        } else {
                            push_toast(
                                &mut toasts,
                                ToastLevel::Error,
                                "More than 1 passenger is already attending. You may remove them or cancel the trip.",
                            );
                        }
                    },
                    "Carpool"
                }
            }

            div {
                class: "button-row",
                Button {
                    variant: ButtonVariant::Ghost,
                    disabled: !dirty || saving(),
                    onclick: move |_| edited.set(saved()),
                    "Discard changes"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: !dirty || saving() || cancelled,
                    onclick: save,
                    if saving() { "Saving..." } else { "Save changes" }
                }
            }

            if !cancelled {
                section {
                    class: "section danger-zone",
                    h2 { "Danger zone" }
                    p {
                        class: "muted",
                        "Actions here are irreversible and may affect your account. You may cancel trips up to 3 days before the trip."
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| confirm_cancel.set(true),
                        "Cancel trip"
                    }
                }
            }
        }

        if confirm_cancel() {
            ModalOverlay {
                title: "Cancel this trip?",
                on_close: move |_| confirm_cancel.set(false),
                div {
                    class: "modal-body",
                    p { "Riders on this trip will be notified. Late cancellations add a warning to your account." }
                }
                div {
                    class: "modal-footer",
                    Button { variant: ButtonVariant::Ghost, onclick: move |_| confirm_cancel.set(false), "Keep trip" }
                    Button { variant: ButtonVariant::Destructive, onclick: cancel, "Cancel trip" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::TripRider;

    fn rider(accepted: bool) -> TripRider {
        TripRider {
            accepted: Some(accepted),
            ..Default::default()
        }
    }

    #[test]
    fn test_carpool_off_refused_with_several_riders() {
        let trip = Trip {
            carpool: Some(true),
            riders: vec![rider(true), rider(true)],
            ..Default::default()
        };
        assert!(!carpool_change_allowed(&trip, false));
        assert!(carpool_change_allowed(&trip, true));
    }

    #[test]
    fn test_carpool_off_allowed_with_one_rider() {
        let trip = Trip {
            riders: vec![rider(true), rider(false)],
            ..Default::default()
        };
        assert!(carpool_change_allowed(&trip, false));
    }

    #[test]
    fn test_talking_level_reads_wire_type() {
        let mut trip = Trip::default();
        assert_eq!(talking_of(&trip), TalkingLevel::Open);
        preferences(&mut trip).talking = Some(PreferenceOption {
            r#type: Some("silent".into()),
            ..Default::default()
        });
        assert_eq!(talking_of(&trip), TalkingLevel::Silent);
    }

    #[test]
    fn test_fare_edit_drops_stale_aggregate() {
        let mut trip = Trip {
            fare: Some(Fare {
                aggregated: Some(30.0),
                trip: Some(30.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        fare(&mut trip).trip = Some(10.0);
        assert_eq!(trip.fare.unwrap().total(), 10.0);
    }
}
