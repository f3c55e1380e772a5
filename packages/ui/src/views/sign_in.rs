use api::{SignInFlow, SignInStep};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Field};
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Email and password, then the emailed code when the backend asks for it.
#[component]
pub fn SignInView() -> Element {
    let app = use_app();
    let pages = use_pages();
    let mut flow = use_signal(SignInFlow::new);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut app = app.clone();
        async move {
            let attempt = match flow.write().begin() {
                Ok(attempt) => attempt,
                Err(_) => return,
            };
            let result = app
                .client()
                .sign_in(&attempt.username, &attempt.password, attempt.mfa_code.as_deref())
                .await;
            let step = flow.write().finish(result);
            tracing::debug!("sign-in step {:?}", step);
            if let SignInStep::SignedIn { onboarding_redirect } = step {
                app.signed_in_as(&attempt.username);
                pages.push(if onboarding_redirect { Page::FinishSignup } else { Page::Dashboard });
            }
        }
    };

    let state = flow();
    let on_code_step = state.step() == SignInStep::Otp;

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: submit,
                h1 { "Sign in to GatorPool" }

                if on_code_step {
                    p { class: "muted", "We sent a sign-in code to {state.email}." }
                    Field {
                        id: "code",
                        label: "Sign-in code",
                        value: state.code.clone(),
                        oninput: move |v| flow.write().code = v,
                    }
                } else {
                    Field {
                        id: "email",
                        label: "Email",
                        kind: "email",
                        placeholder: "albert@ufl.edu",
                        value: state.email.clone(),
                        oninput: move |v| flow.write().email = v,
                    }
                    Field {
                        id: "password",
                        label: "Password",
                        kind: "password",
                        value: state.password.clone(),
                        oninput: move |v| flow.write().password = v,
                    }
                }

                if let Some(error) = state.error() {
                    p { class: "form-error", "{error}" }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: state.is_pending(),
                    if state.is_pending() { "Signing in..." } else if on_code_step { "Verify code" } else { "Sign in" }
                }

                if on_code_step {
                    Button {
                        variant: ButtonVariant::Ghost,
                        r#type: "button",
                        onclick: move |_| flow.write().restart(),
                        "Use a different account"
                    }
                } else {
                    p {
                        class: "auth-switch",
                        "New to GatorPool? "
                        button {
                            class: "link-button",
                            r#type: "button",
                            onclick: move |_| pages.push(Page::SignUp),
                            "Create an account"
                        }
                    }
                }
            }
        }
    }
}
