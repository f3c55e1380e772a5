use api::wizard::{Flow, RideRequestDraft, RideRequestFlow, RideRequestStep, TripEndpoint, RIDER_TERMS};
use api::{FeedFilters, Place, RiderTripsTab, Wizard};
use dioxus::prelude::*;

use crate::account::use_account;
use crate::components::{AddressInput, Button, ButtonVariant, Checkbox, Field, WizardProgress};
use crate::format;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

/// A search that came back empty, waiting to seed the next ride request.
pub static REQUEST_HANDOFF: GlobalSignal<Option<RideRequestDraft>> = Signal::global(|| None);

#[component]
pub fn RideRequestView() -> Element {
    let app = use_app();
    let account = use_account();
    let pages = use_pages();
    let mut toasts = use_toasts();
    let mut wizard = use_signal(|| match REQUEST_HANDOFF.write().take() {
        Some(draft) => Wizard::<RideRequestFlow>::with_draft(draft),
        None => Wizard::new(),
    });

    let submit = move |_| {
        let app = app.clone();
        async move {
            let Ok(draft) = wizard.write().begin_submit() else {
                return;
            };
            match app.client().create_ride_request(&draft).await {
                Ok(uuid) => {
                    tracing::info!("ride request {} posted", uuid);
                    push_toast(&mut toasts, ToastLevel::Success, "Ride request posted. Drivers can now offer to take you.");
                    pages.push(Page::RiderTrips { tab: RiderTripsTab::Created });
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
    let can_filter_gender = FeedFilters::show_females_only(&account().current());

    rsx! {
        div {
            class: "page wizard",
            WizardProgress {
                page: state.page(),
                steps: RideRequestFlow::STEPS.len(),
                percent: state.progress_percent(),
                title: state.title().to_string(),
            }

            div {
                class: "panel wizard-body",
                match state.step() {
                    RideRequestStep::Route => rsx! {
                        AddressInput {
                            id: "request-from",
                            label: "Pickup",
                            value: draft.from.text.clone(),
                            on_text: move |v| wizard.write().update(|d| d.from = TripEndpoint::typed(v)),
                            on_select: move |place: Place| wizard.write().update(|d| d.from = TripEndpoint::from_place(&place)),
                        }
                        AddressInput {
                            id: "request-to",
                            label: "Destination",
                            value: draft.to.text.clone(),
                            on_text: move |v| wizard.write().update(|d| d.to = TripEndpoint::typed(v)),
                            on_select: move |place: Place| wizard.write().update(|d| d.to = TripEndpoint::from_place(&place)),
                        }
                        Field {
                            id: "request-when",
                            label: "Date and time",
                            kind: "datetime-local",
                            value: format::datetime_local_value(draft.datetime),
                            oninput: move |v: String| {
                                let parsed = format::parse_datetime_local(&v);
                                wizard.write().update(|d| d.datetime = parsed);
                            },
                        }
                        Checkbox {
                            id: "request-flexible",
                            checked: draft.flexible_dates,
                            onchange: move |v| wizard.write().update(|d| d.flexible_dates = v),
                            "My dates are flexible"
                        }
                        if can_filter_gender {
                            Checkbox {
                                id: "request-females-only",
                                checked: draft.females_only,
                                onchange: move |v| wizard.write().update(|d| d.females_only = v),
                                "Female drivers only"
                            }
                        }
                    },
                    RideRequestStep::Preferences => rsx! {
                        p { class: "muted", "Drivers see what you are willing to chip in for." }
                        Checkbox {
                            id: "request-pay-gas",
                            checked: draft.pay_for_gas,
                            onchange: move |v| wizard.write().update(|d| d.pay_for_gas = v),
                            "I'll pay for gas"
                        }
                        Checkbox {
                            id: "request-pay-food",
                            checked: draft.pay_for_food,
                            onchange: move |v| wizard.write().update(|d| d.pay_for_food = v),
                            "I'll pay for food"
                        }
                    },
                    RideRequestStep::Review => rsx! {
                        dl {
                            class: "summary",
                            dt { "Pickup" }
                            dd { "{draft.from.text}" }
                            dt { "Destination" }
                            dd { "{draft.to.text}" }
                            dt { "When" }
                            dd { "{format::maybe_datetime(draft.datetime)}" }
                            dt { "Flexible dates" }
                            dd { if draft.flexible_dates { "Yes" } else { "No" } }
                            dt { "Pays for gas / food" }
                            dd {
                                if draft.pay_for_gas { "Gas " } else { "" }
                                if draft.pay_for_food { "Food" } else { "" }
                            }
                        }
                        Checkbox {
                            id: "request-terms",
                            checked: draft.accepted_terms,
                            onchange: move |v| wizard.write().update(|d| d.accepted_terms = v),
                            "{RIDER_TERMS}"
                        }
                    },
                }

                if let Some(message) = state.error() {
                    p { class: "form-error", "{message}" }
                }
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
                        if state.is_submitting() { "Posting..." } else { "Post request" }
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
    }
}
