//! Reusable UI components
//!
//! Class names match `theme/styles.rs` in the desktop app.

mod button;
mod input;
mod loader_overlay;
mod progress_ring;
mod progress_wave;
mod step_progress;
mod strength_meter;
mod toast_stack;

pub use button::*;
pub use input::*;
pub use loader_overlay::*;
pub use progress_ring::*;
pub use progress_wave::*;
pub use step_progress::*;
pub use strength_meter::*;
pub use toast_stack::*;
