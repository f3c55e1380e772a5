use api::PasswordStrength;
use dioxus::prelude::*;

use crate::Icon;
use crate::icons::{FaCircleCheck, FaCircleXmark};

#[component]
pub fn PasswordChecklist(strength: PasswordStrength) -> Element {
    rsx! {
        ul {
            class: "password-checklist",
            for (label, met) in strength.rules() {
                li {
                    key: "{label}",
                    class: if met { "rule met" } else { "rule" },
                    if met {
                        Icon { icon: FaCircleCheck, width: 12, height: 12 }
                    } else {
                        Icon { icon: FaCircleXmark, width: 12, height: 12 }
                    }
                    span { "{label}" }
                }
            }
        }
    }
}
