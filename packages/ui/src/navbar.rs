use dioxus::prelude::*;

use crate::account::use_account;
use crate::icons::{FaCarSide, FaGauge, FaMagnifyingGlass, FaRightFromBracket, FaRoute, FaUser};
use crate::nav::use_pages;
use crate::screen::{Page, RidersTab};
use crate::session::use_app;
use crate::toast::{push_toast, use_toasts, ToastLevel};
use crate::Icon;
use api::endpoints::RiderTripsTab;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Side navigation for signed-in screens. Driver links appear once the
/// account is a verified driver.
#[component]
pub fn Navbar(active: Page) -> Element {
    let account = use_account();
    let state = account();
    let is_driver = state.account.as_ref().is_some_and(|a| a.driver_verified);
    let name = state.account.as_ref().map(|a| a.display_name()).unwrap_or_default();

    rsx! {
        document::Stylesheet { href: NAVBAR_CSS }

        nav {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaCarSide, width: 20, height: 20 }
                span { "GatorPool" }
            }
            if !name.is_empty() {
                div { class: "navbar-user", "{name}" }
            }

            div {
                class: "navbar-links",
                NavItem { page: Page::Dashboard, active: active.clone(), label: "Dashboard",
                    Icon { icon: FaGauge, width: 14, height: 14 }
                }
                NavItem { page: Page::FindRide, active: active.clone(), label: "Find a ride",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                }
                NavItem {
                    page: Page::RiderTrips { tab: RiderTripsTab::Created },
                    active: active.clone(),
                    label: "My rides",
                    Icon { icon: FaRoute, width: 14, height: 14 }
                }
                if is_driver {
                    div { class: "navbar-section", "Driver" }
                    NavItem { page: Page::CreateTrip, active: active.clone(), label: "Create a trip",
                        Icon { icon: FaCarSide, width: 14, height: 14 }
                    }
                    NavItem {
                        page: Page::FindRiders { tab: RidersTab::Feed },
                        active: active.clone(),
                        label: "Find riders",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    }
                    NavItem { page: Page::DriverTrips, active: active.clone(), label: "My trips",
                        Icon { icon: FaRoute, width: 14, height: 14 }
                    }
                } else {
                    NavItem {
                        page: Page::DriverApplication { uuid: None },
                        active: active.clone(),
                        label: "Become a driver",
                        Icon { icon: FaCarSide, width: 14, height: 14 }
                    }
                }
            }

            div {
                class: "navbar-bottom",
                NavItem { page: Page::Profile, active: active.clone(), label: "Profile",
                    Icon { icon: FaUser, width: 14, height: 14 }
                }
                SignOutItem {}
            }
        }
    }
}

#[component]
fn NavItem(page: Page, active: Page, label: String, children: Element) -> Element {
    let pages = use_pages();
    let class = if page.path() == active.path() { "navbar-item active" } else { "navbar-item" };

    rsx! {
        button {
            class,
            onclick: move |_| pages.push(page.clone()),
            {children}
            span { "{label}" }
        }
    }
}

#[component]
fn SignOutItem() -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut toasts = use_toasts();

    let onclick = move |_| {
        let mut app = app.clone();
        async move {
            if let Err(e) = app.client().revoke_session().await {
                // Still forget the session locally; the cookie expires on its own.
                tracing::warn!("revoke failed: {}", e);
                push_toast(&mut toasts, ToastLevel::Warning, &e.user_message());
            }
            app.signed_out();
            pages.replace(Page::SignIn);
        }
    };

    rsx! {
        button {
            class: "navbar-item",
            onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "Sign out" }
        }
    }
}
