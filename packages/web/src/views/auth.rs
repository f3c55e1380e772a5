use dioxus::prelude::*;

use ui::views::{CheckInboxView, FinishSignupView, SignInView, SignUpView, VerifyEmailView};

#[component]
pub fn SignIn() -> Element {
    rsx! { SignInView {} }
}

#[component]
pub fn SignUp() -> Element {
    rsx! { SignUpView {} }
}

#[component]
pub fn CheckInbox() -> Element {
    rsx! { CheckInboxView {} }
}

/// Landing page for the link in the verification email.
#[component]
pub fn VerifyEmail(id: String, signature: String) -> Element {
    rsx! { VerifyEmailView { id, signature } }
}

#[component]
pub fn FinishSignup() -> Element {
    rsx! { FinishSignupView {} }
}
