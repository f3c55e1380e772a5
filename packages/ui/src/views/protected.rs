//! Layout for every signed-in page: session gate, account load, navigation
//! and the announcement banner.

use api::gate::SessionGate;
use api::models::Announcement;
use api::GateOutcome;
use dioxus::prelude::*;

use crate::account::{reload_account, use_account};
use crate::components::LoadingScreen;
use crate::nav::use_pages;
use crate::navbar::Navbar;
use crate::screen::{resolve, AccountFacts, Page, Screen};
use crate::session::use_app;

use super::{
    ApplicationStatusView, CreateTripView, DashboardView, DriverApplyView, DriverTripView, DriverTripsView,
    FindRideView, FindRidersView, ProfileView, RideRequestView, RiderTripView, RiderTripsView,
};

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Checks the session on mount and only renders `children` once it is
/// verified (or refreshed). The platform keys this component by path so the
/// check runs again on every navigation.
#[component]
pub fn ProtectedLayout(page: Page, children: Element) -> Element {
    let app = use_app();
    let pages = use_pages();
    let account = use_account();

    let gate = use_resource(move || {
        let app = app.clone();
        async move {
            let outcome = SessionGate::new(app.client()).check().await;
            if outcome == GateOutcome::Authenticated {
                reload_account(&app, account).await;
            }
            outcome
        }
    });

    let outcome = *gate.read();
    match outcome {
        None => rsx! {
            document::Stylesheet { href: VIEWS_CSS }
            LoadingScreen {}
        },
        Some(GateOutcome::RedirectToSignIn) => {
            pages.replace(Page::SignIn);
            rsx! {}
        }
        Some(GateOutcome::Authenticated) => rsx! {
            document::Stylesheet { href: VIEWS_CSS }
            div {
                class: "app-shell",
                Navbar { active: page }
                main {
                    class: "app-main",
                    Banner {}
                    {children}
                }
            }
        },
    }
}

/// Renders the screen the route table picks for `page`.
#[component]
pub fn ScreenView(page: Page) -> Element {
    let account = use_account();
    let state = account();

    if state.account.is_none() {
        if let Some(error) = state.error {
            return rsx! {
                div { class: "page", p { class: "form-error", "{error}" } }
            };
        }
        return rsx! { LoadingScreen {} };
    }

    let screen = resolve(&page, &AccountFacts::of(&state.current()));
    tracing::debug!("{} -> {:?}", page.path(), screen);

    match screen {
        Screen::Dashboard => rsx! { DashboardView {} },
        Screen::Profile => rsx! { ProfileView {} },
        Screen::FindRide => rsx! { FindRideView {} },
        Screen::RideRequest => rsx! { RideRequestView {} },
        Screen::RiderTrips { tab } => rsx! { RiderTripsView { tab } },
        Screen::RiderTrip { tab, uuid } => rsx! { RiderTripView { tab, uuid } },
        Screen::CreateTrip => rsx! { CreateTripView {} },
        Screen::DriverApply => rsx! { DriverApplyView {} },
        Screen::ApplicationStatus { uuid } => rsx! { ApplicationStatusView { uuid } },
        Screen::FindRiders { tab } => rsx! { FindRidersView { tab } },
        Screen::DriverTrips => rsx! { DriverTripsView {} },
        Screen::DriverTrip { uuid } => rsx! { DriverTripView { uuid } },
        Screen::NotFound => rsx! {
            div { class: "page", h2 { "Page not found" } }
        },
    }
}

/// Site-wide announcement. Closing it is remembered by the backend.
#[component]
fn Banner() -> Element {
    let app = use_app();
    let mut banner = use_signal(|| Option::<Announcement>::None);

    let loader_app = app.clone();
    let _loader = use_resource(move || {
        let app = loader_app.clone();
        async move {
            match app.client().banner().await {
                Ok(found) => banner.set(found),
                Err(e) => tracing::debug!("no banner: {}", e),
            }
        }
    });

    let Some(current) = banner() else {
        return rsx! {};
    };
    let text = current.announcement.clone().unwrap_or_default();
    let class = match current.r#type.as_deref() {
        Some("general") | None => "banner general",
        _ => "banner warning",
    };

    let close = move |_| {
        let app = app.clone();
        async move {
            banner.set(None);
            if let Err(e) = app.client().close_banner().await {
                tracing::warn!("closing banner failed: {}", e);
            }
        }
    };

    rsx! {
        div {
            class,
            span { "{text}" }
            button { class: "banner-close", onclick: close, "\u{00D7}" }
        }
    }
}
