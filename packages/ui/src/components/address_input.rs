//! Text input with debounced place suggestions underneath.

use api::{Place, Suggestions};
use dioxus::prelude::*;

use super::{Input, Label};
use crate::session::use_app;

/// Controlled by the parent: `value` is the text to show, `on_text` reports
/// every keystroke and `on_select` the picked place.
#[component]
pub fn AddressInput(
    id: String,
    label: String,
    value: String,
    on_text: EventHandler<String>,
    on_select: EventHandler<Place>,
    #[props(default = "Search for an address".to_string())] placeholder: String,
    #[props(default)] disabled: bool,
) -> Element {
    let app = use_app();
    let autocomplete = use_hook(|| app.autocomplete());
    let mut suggestions = use_signal(Vec::<Place>::new);
    let mut lookup_error = use_signal(|| Option::<String>::None);

    let typing = autocomplete.clone();
    let oninput = move |evt: FormEvent| {
        let typed = evt.value();
        on_text.call(typed.clone());
        let autocomplete = typing.clone();
        spawn(async move {
            match autocomplete.query(&typed).await {
                Ok(Suggestions::Results(places)) => {
                    lookup_error.set(None);
                    suggestions.set(places);
                }
                Ok(Suggestions::Cleared) => suggestions.set(Vec::new()),
                // A newer keystroke owns the dropdown now.
                Ok(Suggestions::Superseded | Suggestions::Stale) => {}
                Err(e) => {
                    lookup_error.set(Some(e.user_message()));
                    suggestions.set(Vec::new());
                }
            }
        });
    };

    rsx! {
        div {
            class: "field address-input",
            Label { html_for: id.clone(), "{label}" }
            Input {
                id: id.clone(),
                r#type: "text",
                autocomplete: "off",
                placeholder,
                disabled,
                value,
                oninput,
            }
            if !suggestions().is_empty() {
                ul {
                    class: "suggestions",
                    for (i, place) in suggestions().into_iter().enumerate() {
                        li {
                            key: "{i}",
                            class: "suggestion",
                            onclick: {
                                let autocomplete = autocomplete.clone();
                                let place = place.clone();
                                move |_| {
                                    autocomplete.invalidate();
                                    suggestions.set(Vec::new());
                                    on_select.call(place.clone());
                                }
                            },
                            "{place.text}"
                        }
                    }
                }
            }
            if let Some(error) = lookup_error() {
                p { class: "field-error", "{error}" }
            }
        }
    }
}
