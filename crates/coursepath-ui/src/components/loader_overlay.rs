//! Full-screen loader with a rotating status line

use coursepath_core::LoaderState;
use dioxus::prelude::*;

#[component]
pub fn LoaderOverlay(state: LoaderState) -> Element {
    if !state.visible {
        return rsx! {};
    }
    let message = state.message.unwrap_or_default();

    rsx! {
        div { class: "loader-overlay",
            div { class: "loader-spinner" }
            p { class: "loader-message", "{message}" }
        }
    }
}
