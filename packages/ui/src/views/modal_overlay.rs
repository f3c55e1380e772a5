use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, #[props(default)] title: String, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                if !title.is_empty() {
                    div {
                        class: "modal-header",
                        h3 { "{title}" }
                        button {
                            class: "modal-close",
                            onclick: move |_| on_close.call(()),
                            "\u{00D7}"
                        }
                    }
                }
                {children}
            }
        }
    }
}

/// Slide-in panel used by the dashboard prompts.
#[component]
pub fn Drawer(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "drawer-backdrop",
            onclick: move |_| on_close.call(()),
            aside {
                class: "drawer",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h3 { "{title}" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "\u{00D7}"
                    }
                }
                {children}
            }
        }
    }
}
