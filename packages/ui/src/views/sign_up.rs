use api::PasswordStrength;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Field, PasswordChecklist};
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

#[component]
pub fn SignUpView() -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let strength = PasswordStrength::evaluate(&password());

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut app = app.clone();
        async move {
            if submitting() {
                return;
            }
            let address = email().trim().to_string();
            if address.is_empty() {
                error.set(Some("Enter your email address.".into()));
                return;
            }
            if !PasswordStrength::evaluate(&password()).is_strong() {
                error.set(Some("Your password does not meet every requirement yet.".into()));
                return;
            }
            submitting.set(true);
            error.set(None);
            match app.client().sign_up(&address, &password()).await {
                Ok(()) => {
                    tracing::info!("account created for {}", address);
                    app.signed_in_as(&address);
                    pages.push(Page::CheckInbox);
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    submitting.set(false);
                }
            }
        }
    };

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: submit,
                h1 { "Create your GatorPool account" }
                Field {
                    id: "email",
                    label: "UF email",
                    kind: "email",
                    placeholder: "albert@ufl.edu",
                    value: email(),
                    oninput: move |v| email.set(v),
                }
                Field {
                    id: "password",
                    label: "Password",
                    kind: "password",
                    value: password(),
                    oninput: move |v| password.set(v),
                }
                PasswordChecklist { strength }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: submitting() || !strength.is_strong(),
                    if submitting() { "Creating account..." } else { "Sign up" }
                }
                p {
                    class: "auth-switch",
                    "Already have an account? "
                    button {
                        class: "link-button",
                        r#type: "button",
                        onclick: move |_| pages.push(Page::SignIn),
                        "Sign in"
                    }
                }
            }
        }
    }
}

#[component]
pub fn CheckInboxView() -> Element {
    let pages = use_pages();

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Check your inbox" }
                p { "We sent you a link to verify your email address. Open it on this device to finish setting up your account." }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| pages.push(Page::SignIn),
                    "Back to sign in"
                }
            }
        }
    }
}
