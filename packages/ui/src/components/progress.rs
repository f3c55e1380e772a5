use dioxus::prelude::*;

/// "Step 2 of 5" with a filled bar.
#[component]
pub fn WizardProgress(page: usize, steps: usize, percent: u8, title: String) -> Element {
    rsx! {
        div {
            class: "wizard-progress",
            div {
                class: "wizard-progress-header",
                h2 { "{title}" }
                span { class: "muted", "Step {page + 1} of {steps}" }
            }
            div {
                class: "wizard-progress-track",
                div { class: "wizard-progress-bar", style: "width: {percent}%" }
            }
        }
    }
}
