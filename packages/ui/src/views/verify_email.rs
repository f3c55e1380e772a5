use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, LoadingScreen};
use crate::nav::use_pages;
use crate::screen::Page;
use crate::session::use_app;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Landing page for the emailed verification link.
#[component]
pub fn VerifyEmailView(id: String, signature: String) -> Element {
    let app = use_app();
    let pages = use_pages();

    let verified = use_resource(move || {
        let app = app.clone();
        let (id, signature) = (id.clone(), signature.clone());
        async move {
            match app.client().verify_email(&id, &signature).await {
                Ok(ok) => ok,
                Err(e) => {
                    tracing::warn!("email verification failed: {}", e);
                    false
                }
            }
        }
    });

    let outcome = *verified.read();
    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        match outcome {
            None => rsx! { LoadingScreen { message: "Verifying your account..." } },
            Some(ok) => rsx! {
                div {
                    class: "auth-page",
                    div {
                        class: "auth-card",
                        if ok {
                            h1 { "Verification successful" }
                            p { "Your account has been verified. You can now sign in." }
                        } else {
                            h1 { "Verification failed" }
                            p { class: "muted", "The link may have expired or already been used." }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| pages.push(Page::SignIn),
                            if ok { "Sign in" } else { "Back to sign in" }
                        }
                    }
                }
            },
        }
    }
}
