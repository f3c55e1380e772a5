use dioxus::prelude::*;

use crate::Icon;
use crate::icons::FaCarSide;

/// Full-page placeholder while the session is being checked.
#[component]
pub fn LoadingScreen(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "loading-screen",
            div {
                class: "loading-logo",
                Icon { icon: FaCarSide, width: 48, height: 48 }
                span { "GatorPool" }
            }
            p { class: "muted", "{message}" }
        }
    }
}
