//! Mirrors the shared toast queue into the toast stack.

use coursepath_core::Toast;
use coursepath_ui::ToastStack;
use dioxus::prelude::*;

use crate::context::use_services;

#[component]
pub fn NotificationArea() -> Element {
    let services = use_services();
    let mut toasts: Signal<Vec<Toast>> = use_signal(|| services.toasts.snapshot());

    let queue = services.toasts.clone();
    use_hook(move || {
        spawn(async move {
            let mut rx = queue.subscribe();
            while rx.changed().await.is_ok() {
                let current = rx.borrow_and_update().clone();
                toasts.set(current);
            }
        });
    });

    let queue = services.toasts.clone();
    rsx! {
        ToastStack {
            toasts: toasts(),
            ondismiss: move |id| queue.dismiss(id),
        }
    }
}
