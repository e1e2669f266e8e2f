//! Background session expiry watch for signed-in pages.
//!
//! Polls the session store on the configured interval. When the stored
//! expiry has passed, the user is told once and sent back to sign-in.

use coursepath_core::{NotificationKind, Notifier, SessionEvent, SessionWatch};
use dioxus::prelude::*;

use crate::app::Route;
use crate::context::{use_account, use_services};

#[component]
pub fn SessionGuard() -> Element {
    let services = use_services();
    let mut account = use_account();
    let navigator = use_navigator();

    use_hook(move || {
        spawn(async move {
            let (_watch, mut events) =
                SessionWatch::spawn(services.session.clone(), services.config.session.clone());

            while let Some(event) = events.recv().await {
                match event {
                    SessionEvent::Expired {
                        message,
                        landing_url,
                    } => {
                        tracing::info!(%landing_url, "Session expired, returning to sign-in");
                        services.toasts.notify(NotificationKind::Error, &message);
                        account.set(None);
                        navigator.replace(Route::GettingStarted {});
                        break;
                    }
                }
            }
        });
    });

    rsx! {}
}
