//! This crate contains all shared UI for the workspace: contexts, the typed
//! page table, reusable components and every screen. Platform crates only
//! supply routing and the launch.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod session;
pub use session::{make_session, use_app, AppContext, PlatformStore, SessionProvider};

mod account;
pub use account::{reload_account, use_account, AccountProvider, AccountState};

pub mod screen;
pub use screen::{resolve, AccountFacts, Page, RidersTab, Screen};

mod nav;
pub use nav::{provide_pages, use_pages, PageNavigator};

pub mod toast;
pub use toast::{push_toast, use_toasts, ToastLevel, ToastProvider};

pub mod format;

pub mod views;

mod navbar;
pub use navbar::Navbar;
