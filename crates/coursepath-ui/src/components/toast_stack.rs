//! Notification Toasts
//!
//! Renders the queue kept by `coursepath_core::ToastQueue`. Each toast opens
//! with a bounce, shows a draining timer bar, and plays the close animation
//! once the queue marks it closing.

use coursepath_core::{NotificationKind, Toast};
use dioxus::prelude::*;

/// Icon shown next to the message.
pub fn toast_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Error => "\u{26A0}",
        NotificationKind::Info => "\u{2139}",
        NotificationKind::Success => "\u{2714}",
    }
}

/// Inline animation for a toast.
pub fn toast_animation(toast: &Toast) -> &'static str {
    if toast.closing {
        "animation: close 0.3s cubic-bezier(.47,.02,.44,2) forwards;"
    } else {
        "animation: open 0.3s cubic-bezier(.47,.02,.44,2) forwards;"
    }
}

/// Properties for the ToastStack component
#[derive(Clone, PartialEq, Props)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    /// Click-to-dismiss
    #[props(default)]
    pub ondismiss: Option<EventHandler<u64>>,
}

#[component]
pub fn ToastStack(props: ToastStackProps) -> Element {
    rsx! {
        div { id: "notificationArea", class: "notification-area",
            for toast in props.toasts.iter().cloned() {
                {
                    let class = format!("notification-box {}", toast.kind.class());
                    let icon = toast_icon(toast.kind);
                    let id = toast.id;
                    rsx! {
                        div {
                            key: "{id}",
                            class: "{class}",
                            style: toast_animation(&toast),
                            onclick: move |_| {
                                if let Some(handler) = &props.ondismiss {
                                    handler.call(id);
                                }
                            },
                            div { class: "notification-content",
                                span { class: "notification-icon", "{icon}" }
                                div { class: "message",
                                    p { "{toast.message}" }
                                }
                            }
                            div { class: "timer timer-animation" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(closing: bool) -> Toast {
        Toast {
            id: 1,
            kind: NotificationKind::Error,
            message: "Invalid email format".to_string(),
            closing,
        }
    }

    #[test]
    fn animation_follows_closing_flag() {
        assert!(toast_animation(&toast(false)).contains("open"));
        assert!(toast_animation(&toast(true)).contains("close"));
    }

    #[test]
    fn icons_differ_per_kind() {
        assert_ne!(
            toast_icon(NotificationKind::Error),
            toast_icon(NotificationKind::Info)
        );
        assert_ne!(
            toast_icon(NotificationKind::Info),
            toast_icon(NotificationKind::Success)
        );
    }
}
