use api::endpoints::FinishSignup;
use api::gate::SessionGate;
use api::GateOutcome;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Field, Label};
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

const GENDERS: [(&str, &str); 3] = [("male", "Male"), ("female", "Female"), ("other", "Other")];

/// Name, UFID and gender for an account that signed in before finishing
/// its profile.
#[component]
pub fn FinishSignupView() -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut details = use_signal(FinishSignup::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let gate_app = app.clone();
    let _gate = use_resource(move || {
        let app = gate_app.clone();
        async move {
            if SessionGate::new(app.client()).check_signed_in().await == GateOutcome::RedirectToSignIn {
                pages.replace(Page::SignIn);
            }
        }
    });

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let app = app.clone();
        async move {
            let form = details();
            let missing = [
                (form.first_name.trim(), "First name"),
                (form.last_name.trim(), "Last name"),
                (form.ufid.trim(), "UFID"),
                (form.gender.trim(), "Gender"),
            ]
            .into_iter()
            .find(|(value, _)| value.is_empty());
            if let Some((_, label)) = missing {
                error.set(Some(format!("{label} is required.")));
                return;
            }
            saving.set(true);
            match app.client().finish_signup(&form).await {
                Ok(()) => pages.push(Page::Dashboard),
                Err(e) => {
                    error.set(Some(e.user_message()));
                    saving.set(false);
                }
            }
        }
    };

    let form = details();
    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: save,
                h1 { "Finish setting up your account" }
                p { class: "muted", "We'll need your full name as it appears on your government ID, your UFID, and gender." }
                Field {
                    id: "first-name",
                    label: "First name",
                    value: form.first_name.clone(),
                    oninput: move |v| details.write().first_name = v,
                }
                Field {
                    id: "last-name",
                    label: "Last name",
                    value: form.last_name.clone(),
                    oninput: move |v| details.write().last_name = v,
                }
                Field {
                    id: "ufid",
                    label: "UFID",
                    value: form.ufid.clone(),
                    oninput: move |v| details.write().ufid = v,
                }
                div {
                    class: "field",
                    Label { html_for: "gender", "Gender" }
                    select {
                        id: "gender",
                        class: "input",
                        value: "{form.gender}",
                        onchange: move |evt: FormEvent| details.write().gender = evt.value(),
                        option { value: "", disabled: true, "Select gender" }
                        for (value, label) in GENDERS {
                            option { key: "{value}", value, "{label}" }
                        }
                    }
                }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save and continue" }
                }
            }
        }
    }
}
