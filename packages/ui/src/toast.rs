use std::time::Duration;

use dioxus::prelude::*;

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// How long a toast stays up before it fades out.
const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub timestamp: String,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    fn push(&mut self, level: ToastLevel, message: &str) -> u64 {
        self.next_id += 1;
        self.entries.push(Toast {
            id: self.next_id,
            timestamp: current_time(),
            level,
            message: message.to_string(),
        });
        self.next_id
    }

    fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a message and schedule its removal.
pub fn push_toast(toasts: &mut Signal<Toasts>, level: ToastLevel, message: &str) {
    match level {
        ToastLevel::Error | ToastLevel::Warning => tracing::warn!("{}", message),
        _ => tracing::info!("{}", message),
    }
    let id = toasts.write().push(level, message);
    let mut toasts = *toasts;
    spawn(async move {
        api::time::sleep(TOAST_LIFETIME).await;
        toasts.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    format!("{h:02}:{m:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

/// Provides the toast list and renders it above the page.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);

    rsx! {
        {children}
        ToastStack {}
    }
}

#[component]
fn ToastStack() -> Element {
    let mut toasts = use_toasts();
    let entries = toasts().entries.clone();

    rsx! {
        document::Stylesheet { href: TOAST_CSS }

        div {
            class: "toast-stack",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: match toast.level {
                        ToastLevel::Error => "toast error",
                        ToastLevel::Warning => "toast warning",
                        ToastLevel::Success => "toast success",
                        ToastLevel::Info => "toast info",
                    },
                    span { class: "toast-time", "{toast.timestamp}" }
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| toasts.write().dismiss(toast.id),
                        "\u{00D7}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_fresh_ids() {
        let mut toasts = Toasts::default();
        let first = toasts.push(ToastLevel::Info, "Offer sent.");
        let second = toasts.push(ToastLevel::Error, "Trip not found");
        assert_ne!(first, second);
        assert_eq!(toasts.entries.len(), 2);
        assert_eq!(toasts.entries[1].level, ToastLevel::Error);
        assert_eq!(toasts.entries[0].timestamp.len(), 5);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::default();
        let first = toasts.push(ToastLevel::Info, "one");
        toasts.push(ToastLevel::Success, "two");
        toasts.dismiss(first);
        assert_eq!(toasts.entries.len(), 1);
        assert_eq!(toasts.entries[0].message, "two");

        toasts.dismiss(first);
        assert_eq!(toasts.entries.len(), 1);
    }
}
