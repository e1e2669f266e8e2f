use dioxus::prelude::*;

use crate::components::{NotificationArea, SessionGuard};
use crate::context::{get_data_dir, Account, AppServices};
use crate::pages::{CompleteProfile, Courses, GettingStarted, Profile};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Sign in / sign up
/// - `/complete-profile` - Wizard shown right after sign-up
/// - `/courses` - Course catalogue with search
/// - `/profile` - Profile page with inline editing
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    GettingStarted {},
    #[route("/complete-profile")]
    CompleteProfile {},
    #[route("/courses")]
    Courses {},
    #[route("/profile")]
    Profile {},
}

/// Root application component.
///
/// Provides global styles, shared services, the account signal and routing.
#[component]
pub fn App() -> Element {
    let services = use_hook(|| AppServices::new(crate::get_config(), get_data_dir()));
    let account: Signal<Option<Account>> = use_signal(|| None);

    use_context_provider(|| services.clone());
    use_context_provider(|| account);

    rsx! {
        style { {GLOBAL_STYLES} }
        NotificationArea {}
        Router::<Route> {}
    }
}

/// Layout wrapper for signed-in pages: session expiry watch plus content.
#[component]
pub fn SignedIn(children: Element) -> Element {
    rsx! {
        SessionGuard {}
        {children}
    }
}
