//! Dashboard: trip stats, server-driven prompts and the drawers they open.

use api::endpoints::{HomeAddress, RiderTripsTab};
use api::models::{BottomAction, CardAction, StatusCard};
use api::Place;
use dioxus::prelude::*;

use super::Drawer;
use crate::account::{use_account, AccountState};
use crate::components::{AddressInput, Button, ButtonVariant, Checkbox, Field};
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};

#[component]
pub fn DashboardView() -> Element {
    let account = use_account();
    let pages = use_pages();
    let mut open_card = use_signal(|| Option::<StatusCard>::None);

    let current = account().current();
    let stats = current.dashboard_stats.clone().unwrap_or_default();
    let today = chrono::Local::now().format("%A, %B %-d").to_string();
    let name = current.display_name();
    let account_type = if stats.account_type.is_empty() {
        "Rider".to_string()
    } else {
        stats.account_type.clone()
    };

    rsx! {
        div {
            class: "page dashboard",
            div {
                class: "page-header",
                div {
                    h1 { "Welcome, {name}" }
                    p { class: "muted", "{today}" }
                }
            }

            div {
                class: "stat-grid",
                StatCard { label: "Upcoming trips", value: "{stats.upcoming_trips}" }
                StatCard { label: "Past trips", value: "{stats.past_trips}" }
                StatCard { label: "Account type", value: account_type }
            }

            if !current.status_cards.is_empty() {
                section {
                    class: "section",
                    h2 { "Recommended actions" }
                    div {
                        class: "card-list",
                        for card in current.status_cards.clone() {
                            div {
                                key: "{card.uuid}",
                                class: "status-card {card.r#type}",
                                h3 { "{card.title}" }
                                p { "{card.description}" }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    onclick: {
                                        let card = card.clone();
                                        move |_| open_card.set(Some(card.clone()))
                                    },
                                    "{card.action_name}"
                                }
                            }
                        }
                    }
                }
            }

            if !current.bottom_actions.is_empty() {
                section {
                    class: "section",
                    h2 { "Get going" }
                    div {
                        class: "card-list",
                        for action in current.bottom_actions.clone() {
                            BottomActionCard { key: "{action.uuid}", action }
                        }
                    }
                }
            }

            div {
                class: "quick-links",
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| pages.push(Page::FindRide),
                    "Find a ride"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| pages.push(Page::RiderTrips { tab: RiderTripsTab::Created }),
                    "My rides"
                }
            }
        }

        if let Some(card) = open_card() {
            Drawer {
                title: card.title.clone(),
                on_close: move |_| open_card.set(None),
                match card.kind() {
                    CardAction::AddHomeAddress => rsx! {
                        HomeAddressForm { card: card.clone(), on_done: move |_| open_card.set(None) }
                    },
                    CardAction::EnableTwoFactor => rsx! {
                        TwoFactorForm { card: card.clone(), on_done: move |_| open_card.set(None) }
                    },
                    CardAction::RidePreferences => rsx! {
                        RidePreferencesForm { card: card.clone(), on_done: move |_| open_card.set(None) }
                    },
                    _ => rsx! {
                        p { class: "muted", "No action found." }
                    },
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
        }
    }
}

#[component]
fn BottomActionCard(action: BottomAction) -> Element {
    let pages = use_pages();
    let style = if action.color.is_empty() {
        String::new()
    } else {
        format!("border-color: {}", action.color)
    };
    let target = match action.kind() {
        CardAction::BookTrip | CardAction::BookTripFlow => Some(Page::FindRide),
        _ => None,
    };

    rsx! {
        div {
            class: "action-card",
            style,
            h3 { "{action.title}" }
            p { "{action.description}" }
            if let Some(page) = target {
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| pages.push(page.clone()),
                    "{action.action_name}"
                }
            }
        }
    }
}

/// Drop a prompt once its action succeeded.
fn dismiss_card(mut account: Signal<AccountState>, uuid: &str) {
    if let Some(current) = account.write().account.as_mut() {
        current.status_cards.retain(|c| c.uuid != uuid);
    }
}

#[component]
fn HomeAddressForm(card: StatusCard, on_done: EventHandler<()>) -> Element {
    let app = use_app();
    let account = use_account();
    let mut toasts = use_toasts();
    let mut text = use_signal(String::new);
    let mut picked = use_signal(|| Option::<Place>::None);
    let mut line2 = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let card_uuid = card.uuid.clone();
    let save = move |_| {
        let app = app.clone();
        let uuid = card_uuid.clone();
        async move {
            let Some(place) = picked() else {
                push_toast(&mut toasts, ToastLevel::Error, "Pick your address from the suggestions.");
                return;
            };
            saving.set(true);
            let address = HomeAddress::from_place(&place, &line2());
            match app.client().save_home_address(&address).await {
                Ok(()) => {
                    dismiss_card(account, &uuid);
                    push_toast(&mut toasts, ToastLevel::Success, "Home address saved.");
                    on_done.call(());
                }
                Err(e) => push_toast(&mut toasts, ToastLevel::Error, &e.user_message()),
            }
            saving.set(false);
        }
    };

    rsx! {
        div {
            class: "drawer-body",
            p { class: "muted", "{card.description}" }
            AddressInput {
                id: "home-address",
                label: "Home address",
                value: text(),
                on_text: move |v| {
                    text.set(v);
                    picked.set(None);
                },
                on_select: move |place: Place| {
                    text.set(place.text.clone());
                    picked.set(Some(place));
                },
            }
            Field {
                id: "home-address-line2",
                label: "Apartment, suite, etc.",
                value: line2(),
                oninput: move |v| line2.set(v),
            }
            if let Some(place) = picked() {
                p {
                    class: "muted",
                    "{place.parts.city.clone().unwrap_or_default()} {place.parts.state.clone().unwrap_or_default()} {place.parts.zip.clone().unwrap_or_default()}"
                }
            }
        }
        div {
            class: "drawer-footer",
            Button { variant: ButtonVariant::Ghost, onclick: move |_| on_done.call(()), "Close" }
            Button {
                variant: ButtonVariant::Primary,
                disabled: saving(),
                onclick: save,
                if saving() { "Saving..." } else { "Save address" }
            }
        }
    }
}

#[component]
fn TwoFactorForm(card: StatusCard, on_done: EventHandler<()>) -> Element {
    let app = use_app();
    let account = use_account();
    let mut toasts = use_toasts();
    let mut saving = use_signal(|| false);

    let enable = move |_| {
        let app = app.clone();
        let uuid = card.uuid.clone();
        async move {
            saving.set(true);
            match app.client().enable_two_factor().await {
                Ok(()) => {
                    dismiss_card(account, &uuid);
                    push_toast(&mut toasts, ToastLevel::Success, "Two-factor authentication enabled.");
                    on_done.call(());
                }
                Err(e) => push_toast(&mut toasts, ToastLevel::Error, &e.user_message()),
            }
            saving.set(false);
        }
    };

    rsx! {
        div {
            class: "drawer-body",
            p {
                "Enable two-factor authentication to secure your account. Each sign-in will ask for a code we email you."
            }
        }
        div {
            class: "drawer-footer",
            Button { variant: ButtonVariant::Ghost, onclick: move |_| on_done.call(()), "Close" }
            Button {
                variant: ButtonVariant::Primary,
                disabled: saving(),
                onclick: enable,
                if saving() { "Enabling..." } else { "Enable" }
            }
        }
    }
}

#[component]
fn RidePreferencesForm(card: StatusCard, on_done: EventHandler<()>) -> Element {
    let app = use_app();
    let account = use_account();
    let mut toasts = use_toasts();
    let mut pay_food = use_signal(|| true);
    let mut pay_gas = use_signal(|| true);
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let app = app.clone();
        let uuid = card.uuid.clone();
        async move {
            saving.set(true);
            match app.client().save_ride_preferences(pay_food(), pay_gas()).await {
                Ok(()) => {
                    dismiss_card(account, &uuid);
                    push_toast(&mut toasts, ToastLevel::Success, "Ride preferences saved.");
                    on_done.call(());
                }
                Err(e) => push_toast(&mut toasts, ToastLevel::Error, &e.user_message()),
            }
            saving.set(false);
        }
    };

    rsx! {
        div {
            class: "drawer-body",
            p { class: "muted", "Let drivers know what you are willing to chip in for." }
            Checkbox {
                id: "pay-food",
                checked: pay_food(),
                onchange: move |v| pay_food.set(v),
                "I'm willing to pay for food"
            }
            Checkbox {
                id: "pay-gas",
                checked: pay_gas(),
                onchange: move |v| pay_gas.set(v),
                "I'm willing to pay for gas"
            }
        }
        div {
            class: "drawer-footer",
            Button { variant: ButtonVariant::Ghost, onclick: move |_| on_done.call(()), "Close" }
            Button {
                variant: ButtonVariant::Primary,
                disabled: saving(),
                onclick: save,
                if saving() { "Saving..." } else { "Save preferences" }
            }
        }
    }
}
