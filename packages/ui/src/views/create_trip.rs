//! Driver trip creation: five wizard pages over one [`CreateTripDraft`].

use api::wizard::{CreateTripDraft, CreateTripFlow, CreateTripStep, Flow, TalkingLevel, TripEndpoint};
use api::{Place, RouteEstimate, RouteLookup, Wizard};
use dioxus::prelude::*;

use crate::components::{AddressInput, Button, ButtonVariant, Checkbox, Field, StaticMapImage, WizardProgress};
use crate::format;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

fn amount_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn talking_level(value: &str) -> TalkingLevel {
    TalkingLevel::ALL
        .into_iter()
        .find(|level| level.label() == value)
        .unwrap_or(TalkingLevel::Open)
}

#[component]
pub fn CreateTripView() -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut toasts = use_toasts();
    let mut wizard = use_signal(Wizard::<CreateTripFlow>::new);
    let mut route = use_signal(|| Option::<RouteEstimate>::None);

    let gender_app = app.clone();
    let may_restrict = use_resource(move || {
        let app = gender_app.clone();
        async move {
            match app.client().driver_gender().await {
                Ok(gender) => CreateTripDraft::offers_females_only(&gender),
                Err(e) => {
                    tracing::warn!("driver gender unavailable: {}", e);
                    false
                }
            }
        }
    });

    let route_app = app.clone();
    let pick_destination = move |place: Place| {
        let maps = route_app.maps();
        let origin = wizard.peek().draft().from.position();
        route.set(None);
        wizard.write().update(|d| d.set_destination(&place, None));
        spawn(async move {
            let estimate = match maps.driving_route(origin, place.position).await {
                Ok(estimate) => {
                    tracing::debug!("route takes {:.0}s", estimate.duration_secs);
                    Some(estimate)
                }
                Err(e) => {
                    tracing::warn!("route lookup failed: {}", e);
                    None
                }
            };
            let applied = wizard.write().draft_mut().apply_route(origin, &place, estimate.as_ref());
            if applied {
                route.set(estimate);
            }
        });
    };

    let submit = move |_| {
        let app = app.clone();
        async move {
            let Ok(draft) = wizard.write().begin_submit() else {
                return;
            };
            match app.client().create_trip(&draft).await {
                Ok(uuid) => {
                    push_toast(&mut toasts, ToastLevel::Success, "Your trip is posted.");
                    if uuid.is_empty() {
                        pages.push(Page::DriverTrips);
                    } else {
                        pages.push(Page::DriverTrip { uuid });
                    }
                }
                Err(e) => {
                    push_toast(&mut toasts, ToastLevel::Error, &e.user_message());
                    wizard.write().submission_failed(&e);
                }
            }
        }
    };

    let state = wizard();
    let draft = state.draft().clone();
    let can_restrict = (*may_restrict.read()).unwrap_or(false);
    let radius_text = draft.radius.map(|r| r.to_string()).unwrap_or_default();
    let arrival = draft
        .to
        .expected
        .and_then(chrono::DateTime::from_timestamp_millis);

    rsx! {
        div {
            class: "page wizard",
            WizardProgress {
                page: state.page(),
                steps: CreateTripFlow::STEPS.len(),
                percent: state.progress_percent(),
                title: state.title().to_string(),
            }

            div {
                class: "split",
                div {
                    class: "panel wizard-body",
                    match state.step() {
                        CreateTripStep::Route => rsx! {
                            AddressInput {
                                id: "trip-from",
                                label: "From",
                                placeholder: "From where?",
                                value: draft.from.text.clone(),
                                on_text: move |v| wizard.write().update(|d| d.from = TripEndpoint::typed(v)),
                                on_select: move |place: Place| {
                                    route.set(None);
                                    wizard.write().update(|d| d.set_origin(&place));
                                },
                            }
                            AddressInput {
                                id: "trip-to",
                                label: "To",
                                placeholder: "To where?",
                                value: draft.to.text.clone(),
                                on_text: move |v| {
                                    route.set(None);
                                    wizard.write().update(|d| d.to = TripEndpoint::typed(v));
                                },
                                on_select: pick_destination,
                            }
                            Field {
                                id: "trip-when",
                                label: "Date and time",
                                kind: "datetime-local",
                                value: format::datetime_local_value(draft.datetime),
                                oninput: move |v: String| {
                                    if let Some(when) = format::parse_datetime_local(&v) {
                                        wizard.write().update(|d| d.set_datetime(when));
                                    }
                                },
                            }
                            Field {
                                id: "trip-radius",
                                label: "Radius (miles)",
                                kind: "number",
                                placeholder: "Enter the radius number",
                                value: radius_text,
                                oninput: move |v: String| wizard.write().update(|d| d.set_radius_text(&v)),
                            }
                            if let Some(at) = arrival {
                                p { class: "muted", "Expected arrival: {format::datetime(at)}" }
                            }
                        },
                        CreateTripStep::Fare => rsx! {
                            p {
                                class: "muted",
                                "Set what riders pay for the trip, gas and food. Riders see these amounts in their feed. GatorPool does not handle payments."
                            }
                            Field {
                                id: "fare-trip",
                                label: "Trip",
                                kind: "number",
                                placeholder: "Trip price",
                                value: amount_text(draft.fare.trip),
                                oninput: move |v: String| wizard.write().update(|d| d.fare.trip = format::parse_amount(&v)),
                            }
                            Field {
                                id: "fare-gas",
                                label: "Gas",
                                kind: "number",
                                placeholder: "Gas price",
                                value: amount_text(draft.fare.gas),
                                oninput: move |v: String| wizard.write().update(|d| d.fare.gas = format::parse_amount(&v)),
                            }
                            Field {
                                id: "fare-food",
                                label: "Food",
                                kind: "number",
                                placeholder: "Food price",
                                value: amount_text(draft.fare.food),
                                oninput: move |v: String| wizard.write().update(|d| d.fare.food = format::parse_amount(&v)),
                            }
                            p { "Total per rider: {format::dollars(draft.fare.total())}" }
                            Checkbox {
                                id: "fare-terms",
                                checked: draft.fare.accepted_terms,
                                onchange: move |v| wizard.write().update(|d| d.fare.accepted_terms = v),
                                "I agree that payment handling is between me and the rider."
                            }
                        },
                        CreateTripStep::Preferences => rsx! {
                            Checkbox {
                                id: "pref-music",
                                checked: draft.music_preferences.can_be_controlled,
                                onchange: move |v| wizard.write().update(|d| d.music_preferences.can_be_controlled = v),
                                "Rider can change or request music on the trip."
                            }
                            Checkbox {
                                id: "pref-ac",
                                checked: draft.ac_preferences.can_be_controlled,
                                onchange: move |v| wizard.write().update(|d| d.ac_preferences.can_be_controlled = v),
                                "Rider can change or request to change the car AC."
                            }
                            div {
                                class: "field",
                                label { r#for: "pref-talking", "Talking" }
                                select {
                                    id: "pref-talking",
                                    value: draft.talking_preferences.level().label(),
                                    onchange: move |evt: FormEvent| {
                                        let level = talking_level(&evt.value());
                                        wizard.write().update(|d| d.talking_preferences.set_level(level));
                                    },
                                    for level in TalkingLevel::ALL {
                                        option {
                                            key: "{level.label()}",
                                            value: level.label(),
                                            selected: draft.talking_preferences.level() == level,
                                            "{level.label()}"
                                        }
                                    }
                                }
                            }
                            if can_restrict {
                                Checkbox {
                                    id: "pref-females-only",
                                    checked: draft.rider_requirements.females_only,
                                    onchange: move |v| wizard.write().update(|d| d.rider_requirements.females_only = v),
                                    "Restrict your requests to only females."
                                }
                            }
                        },
                        CreateTripStep::Carpool => rsx! {
                            p {
                                class: "muted",
                                "Check the box below to take more than one passenger on this trip. Carpooling saves everyone money."
                            }
                            Checkbox {
                                id: "trip-carpool",
                                checked: draft.carpool,
                                onchange: move |v| wizard.write().update(|d| d.carpool = v),
                                "Carpool"
                            }
                        },
                        CreateTripStep::Summary => rsx! {
                            p { class: "muted", "Make sure everything is correct before you post the trip." }
                            dl {
                                class: "summary",
                                dt { "From" }
                                dd { "{draft.from.text}" }
                                dt { "To" }
                                dd { "{draft.to.text}" }
                                dt { "When" }
                                dd { "{format::maybe_datetime(draft.datetime)}" }
                                dt { "Drop-off radius" }
                                dd { "{radius_text} mi" }
                                dt { "Fare" }
                                dd {
                                    "{format::dollars(draft.fare.total())} (trip {amount_text(draft.fare.trip)}, gas {amount_text(draft.fare.gas)}, food {amount_text(draft.fare.food)})"
                                }
                                dt { "Talking" }
                                dd { "{draft.talking_preferences.level().label()}" }
                                dt { "Carpool" }
                                dd { if draft.carpool { "Yes" } else { "No" } }
                                if draft.rider_requirements.females_only {
                                    dt { "Riders" }
                                    dd { "Females only" }
                                }
                            }
                        },
                    }

                    if let Some(message) = state.error() {
                        p { class: "form-error", "{message}" }
                    }

                    div {
                        class: "wizard-footer",
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: state.is_first() || state.is_submitting(),
                            onclick: move |_| {
                                wizard.write().previous();
                            },
                            "Back"
                        }
                        if state.is_last() {
                            Button {
                                variant: ButtonVariant::Primary,
                                disabled: state.is_submitting(),
                                onclick: submit,
                                if state.is_submitting() { "Posting..." } else { "Post trip" }
                            }
                        } else {
                            Button {
                                variant: ButtonVariant::Primary,
                                onclick: move |_| {
                                    wizard.write().next();
                                },
                                "Next"
                            }
                        }
                    }
                }

                div {
                    class: "panel map-panel",
                    StaticMapImage {
                        pickup: draft.from.is_resolved().then(|| draft.from.position()),
                        destination: draft.to.is_resolved().then(|| draft.to.position()),
                        route: route(),
                        radius_miles: draft.radius.filter(|r| *r > 0).map(|r| r as f64),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talking_level_from_select() {
        assert_eq!(talking_level("Minimal"), TalkingLevel::Minimal);
        assert_eq!(talking_level("Silent"), TalkingLevel::Silent);
        assert_eq!(talking_level("bogus"), TalkingLevel::Open);
    }

    #[test]
    fn test_amount_text_blank_when_unset() {
        assert_eq!(amount_text(None), "");
        assert_eq!(amount_text(Some(12.5)), "12.5");
    }
}
