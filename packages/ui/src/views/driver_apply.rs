//! Applying to drive, and following the application afterwards.

use api::models::ApplicationStatus;
use api::wizard::{DriverApplicationDraft, DriverApplicationFlow, DriverApplicationStep, Flow, CERTIFICATION};
use api::{DriverApplication, Wizard};
use dioxus::prelude::*;

use crate::account::use_account;
use crate::components::{Button, ButtonVariant, Checkbox, Field, LoadingScreen, WizardProgress};
use crate::format;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

#[component]
pub fn DriverApplyView() -> Element {
    let app = use_app();
    let account = use_account();
    let pages = use_pages();
    let mut toasts = use_toasts();
    let mut wizard = use_signal(|| {
        Wizard::<DriverApplicationFlow>::with_draft(DriverApplicationDraft::for_account(&account.peek().current()))
    });

    let submit = move |_| {
        let app = app.clone();
        async move {
            let Ok(draft) = wizard.write().begin_submit() else {
                return;
            };
            match app.client().apply_driver(&draft).await {
                Ok(uuid) => {
                    push_toast(&mut toasts, ToastLevel::Success, "Application submitted. We'll review it shortly.");
                    pages.replace(Page::DriverApplication { uuid: Some(uuid) });
                }
                Err(e) => {
                    push_toast(&mut toasts, ToastLevel::Error, &e.user_message());
                    wizard.write().submission_failed(&e);
                }
            }
        }
    };

    let state = wizard();
    let d = state.draft().clone();

    rsx! {
        div {
            class: "page wizard",
            WizardProgress {
                page: state.page(),
                steps: DriverApplicationFlow::STEPS.len(),
                percent: state.progress_percent(),
                title: state.title().to_string(),
            }

            div {
                class: "panel wizard-body",
                match state.step() {
                    DriverApplicationStep::BasicInfo => rsx! {
                        div {
                            class: "field-grid",
                            Field { id: "first-name", label: "First name", value: d.first_name.clone(), oninput: move |v| wizard.write().update(|draft| draft.first_name = v) }
                            Field { id: "last-name", label: "Last name", value: d.last_name.clone(), oninput: move |v| wizard.write().update(|draft| draft.last_name = v) }
                            Field { id: "email", label: "Email", kind: "email", value: d.email.clone(), oninput: move |v| wizard.write().update(|draft| draft.email = v) }
                            Field { id: "phone", label: "Phone number", kind: "tel", value: d.phone.clone(), oninput: move |v| wizard.write().update(|draft| draft.phone = v) }
                            Field { id: "dob", label: "Date of birth", kind: "date", value: d.dob.clone(), oninput: move |v| wizard.write().update(|draft| draft.dob = v) }
                            Field { id: "address", label: "Address", value: d.address.clone(), oninput: move |v| wizard.write().update(|draft| draft.address = v) }
                            Field { id: "address-line2", label: "Address line 2", value: d.address_line2.clone(), oninput: move |v| wizard.write().update(|draft| draft.address_line2 = v) }
                            Field { id: "city", label: "City", value: d.city.clone(), oninput: move |v| wizard.write().update(|draft| draft.city = v) }
                            Field { id: "state", label: "State", value: d.state.clone(), oninput: move |v| wizard.write().update(|draft| draft.state = v) }
                            Field { id: "zip", label: "Zip", value: d.zip.clone(), oninput: move |v| wizard.write().update(|draft| draft.zip = v) }
                        }
                    },
                    DriverApplicationStep::Vehicle => rsx! {
                        div {
                            class: "field-grid",
                            Field { id: "make", label: "Make", value: d.make.clone(), oninput: move |v| wizard.write().update(|draft| draft.make = v) }
                            Field { id: "model", label: "Model", value: d.model.clone(), oninput: move |v| wizard.write().update(|draft| draft.model = v) }
                            Field { id: "year", label: "Year", kind: "number", value: d.year.clone(), oninput: move |v| wizard.write().update(|draft| draft.year = v) }
                            Field { id: "color", label: "Color", value: d.color.clone(), oninput: move |v| wizard.write().update(|draft| draft.color = v) }
                            Field { id: "license-plate", label: "License plate", value: d.license_plate.clone(), oninput: move |v| wizard.write().update(|draft| draft.license_plate = v) }
                            Field { id: "license-state", label: "License state", value: d.license_state.clone(), oninput: move |v| wizard.write().update(|draft| draft.license_state = v) }
                            Field { id: "seats", label: "Seats", kind: "number", value: d.seats.clone(), oninput: move |v| wizard.write().update(|draft| draft.seats = v) }
                            Field { id: "lugroom", label: "Luggage room", kind: "number", value: d.lugroom.clone(), oninput: move |v| wizard.write().update(|draft| draft.lugroom = v) }
                        }
                    },
                    DriverApplicationStep::Review => rsx! {
                        dl {
                            class: "summary",
                            dt { "Name" }
                            dd { "{d.first_name} {d.last_name}" }
                            dt { "Contact" }
                            dd { "{d.email} / {d.phone}" }
                            dt { "Address" }
                            dd { "{d.address} {d.address_line2}, {d.city}, {d.state} {d.zip}" }
                            dt { "Vehicle" }
                            dd { "{d.year} {d.make} {d.model} ({d.color})" }
                            dt { "Plate" }
                            dd { "{d.license_plate} ({d.license_state})" }
                            dt { "Seats / luggage" }
                            dd { "{d.seats} / {d.lugroom}" }
                        }
                        Checkbox {
                            id: "certified",
                            checked: d.certified,
                            onchange: move |v| wizard.write().update(|draft| draft.certified = v),
                            "{CERTIFICATION}"
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
                        if state.is_submitting() { "Submitting..." } else { "Submit application" }
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

fn status_text(application: &DriverApplication) -> (&'static str, &'static str) {
    match application.status() {
        ApplicationStatus::Open => ("Under review", "badge warning"),
        ApplicationStatus::Accepted => ("Accepted", "badge success"),
        ApplicationStatus::Closed => ("Closed", "badge danger"),
    }
}

#[component]
pub fn ApplicationStatusView(uuid: String) -> Element {
    let app = use_app();
    let pages = use_pages();

    let application = use_resource(move || {
        let app = app.clone();
        let uuid = uuid.clone();
        async move { app.client().driver_application(&uuid).await }
    });

    let content = match &*application.read() {
        None => rsx! { LoadingScreen { message: "Loading application..." } },
        Some(Err(e)) => rsx! {
            p { class: "form-error", "{e.user_message()}" }
        },
        Some(Ok(found)) => {
            let (label, class) = status_text(found);
            let vehicle = found.vehicle.clone().unwrap_or_default();
            let accepted = found.status() == ApplicationStatus::Accepted;
            rsx! {
                section {
                    class: "section",
                    h2 { "Status" }
                    span { class, "{label}" }
                    if let Some(message) = found.message.clone() {
                        p { "{message}" }
                    }
                    if accepted {
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| pages.push(Page::CreateTrip),
                            "Create your first trip"
                        }
                    }
                }
                section {
                    class: "section",
                    h2 { "Application details" }
                    dl {
                        class: "summary",
                        dt { "Name" }
                        dd { "{found.full_name.clone().unwrap_or_default()}" }
                        dt { "Email" }
                        dd { "{found.email.clone().unwrap_or_default()}" }
                        dt { "Phone" }
                        dd { "{found.phone_number.clone().unwrap_or_default()}" }
                        dt { "Address" }
                        dd { "{found.address.clone().unwrap_or_default()}" }
                        dt { "Submitted" }
                        dd { "{format::maybe_datetime(found.created_at)}" }
                    }
                }
                section {
                    class: "section",
                    h2 { "Vehicle details" }
                    dl {
                        class: "summary",
                        dt { "Vehicle" }
                        dd { "{vehicle.describe()}" }
                        dt { "Plate" }
                        dd { "{vehicle.license_plate.clone().unwrap_or_default()}" }
                        dt { "Seats" }
                        dd { "{vehicle.seats.unwrap_or_default()}" }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page application",
            h1 { "Driver application" }
            {content}
        }
    }
}
