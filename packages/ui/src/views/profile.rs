use api::models::ApplicationStatus;
use dioxus::prelude::*;

use crate::account::use_account;
use crate::components::{Button, ButtonVariant};
use crate::format;
use crate::icons::FaUser;
use crate::nav::use_pages;
use crate::screen::Page;
use crate::Icon;

#[component]
pub fn ProfileView() -> Element {
    let account = use_account();
    let pages = use_pages();
    let current = account().current();

    let name = current.display_name();
    let email = current.email.clone().unwrap_or_default();
    let address = current.address.clone().unwrap_or_else(|| "No home address saved".to_string());
    let driver_label = if current.driver_verified { "Verified driver" } else { "Rider" };

    rsx! {
        div {
            class: "page profile",
            div {
                class: "profile-header",
                if let Some(picture) = current.profile_picture.clone().filter(|p| !p.is_empty()) {
                    img { class: "avatar", src: "{picture}", alt: "Profile picture" }
                } else {
                    div {
                        class: "avatar placeholder",
                        Icon { width: 36, height: 36, icon: FaUser }
                    }
                }
                h1 { "{name}" }
                p { class: "muted", "{email}" }
                span { class: "badge", "{driver_label}" }
            }

            section {
                class: "section",
                h2 { "Home address" }
                p { "{address}" }
            }

            section {
                class: "section",
                h2 { "Driver applications" }
                if current.driver_applications.is_empty() {
                    p { class: "muted", "You have not applied to drive yet." }
                    if !current.driver_verified {
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| pages.push(Page::DriverApplication { uuid: None }),
                            "Become a driver"
                        }
                    }
                }
                ul {
                    class: "plain-list",
                    for application in current.driver_applications.iter().rev().cloned() {
                        {
                            let uuid = application.application_uuid.clone().unwrap_or_default();
                            let status = match application.status() {
                                ApplicationStatus::Open => "Under review",
                                ApplicationStatus::Accepted => "Accepted",
                                ApplicationStatus::Closed => "Closed",
                            };
                            let submitted = format::maybe_datetime(application.created_at);
                            let target = uuid.clone();
                            rsx! {
                                li {
                                    key: "{uuid}",
                                    class: "list-row",
                                    span { "Submitted {submitted}" }
                                    span { class: "badge", "{status}" }
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        onclick: move |_| pages.push(Page::DriverApplication { uuid: Some(target.clone()) }),
                                        "View"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
