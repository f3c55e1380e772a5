use dioxus::prelude::*;

use ui::provide_pages;
use ui::views::ProtectedLayout;

use crate::Route;

/// Outermost layout. Installs the page navigator so shared views can move
/// between pages without knowing this crate's routes.
#[component]
pub fn Pages() -> Element {
    let nav = use_navigator();
    provide_pages(
        move |page| {
            nav.push(Route::from(page));
        },
        move |page| {
            nav.replace(Route::from(page));
        },
    );

    rsx! { Outlet::<Route> {} }
}

/// Session gate around every signed-in route. Keyed by path so the gate
/// checks again on each navigation.
#[component]
pub fn Protected() -> Element {
    let route = use_route::<Route>();
    let Some(page) = route.page() else {
        return rsx! { Outlet::<Route> {} };
    };
    let key = page.path();

    rsx! {
        ProtectedLayout {
            key: "{key}",
            page,
            Outlet::<Route> {}
        }
    }
}

/// Redirect `/` to the dashboard; the gate sends visitors without a session
/// on to sign in.
#[component]
pub fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("no route for /{}", segments.join("/"));
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}
