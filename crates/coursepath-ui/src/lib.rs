//! Coursepath UI Components
//!
//! Dioxus components for the enrollment app. Each component renders from a
//! value published by `coursepath-core` (an animation frame, the wizard view,
//! the toast list) and reports user input back through event handlers. None
//! of them own application state.
//!
//! ## Palette
//!
//! - **Ink (#1f2a44)**: headings and body text
//! - **Teal (#1abc9c)**: progress, links and primary actions
//! - **Amber (#f39c12)**: warnings
//! - **Paper (#fafafa)**: background

pub mod components;

pub use components::*;
