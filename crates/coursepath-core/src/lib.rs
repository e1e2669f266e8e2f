//! Coursepath Core Library
//!
//! Client-side state machines for the Coursepath enrollment app.
//!
//! ## Overview
//!
//! Coursepath is an online course catalogue. New members finish their profile
//! in a multi-step wizard, returning members see their completion percentage
//! rise on hover, and the whole session is bounded by a server-issued expiry.
//! Everything here is UI-independent; the desktop app renders from the watch
//! channels these types expose.
//!
//! ## Components
//!
//! - **animator**: hover-driven progress wave with debounced retraction
//! - **wizard**: validated step navigation and one-shot submission
//! - **profile**: inline profile editing and display formatting
//! - **auth / course**: sign-in helpers, search and post-login popups
//! - **session**: periodic expiry check over a key-value store
//!
//! ## Quick Start
//!
//! ```ignore
//! use coursepath_core::{AppConfig, StepWizard, Navigation};
//!
//! let config = AppConfig::default();
//! let mut wizard = StepWizard::complete_profile("ada", config.wizard.clone())?;
//!
//! wizard.set_input("fullname", "Ada Lovelace")?;
//! assert!(matches!(wizard.advance(), Navigation::Moved { from: 0, to: 1 }));
//! ```

pub mod animator;
pub mod auth;
pub mod config;
pub mod course;
pub mod error;
pub mod logging;
pub mod notify;
pub mod profile;
pub mod session;
pub mod submit;
pub mod validate;
pub mod wizard;

// Re-exports
pub use animator::{Frame, HoverProgressAnimator, Phase};
pub use auth::{password_strength, LoginOutcome, LoginSurface, PasswordStrength, StrengthTier};
pub use config::{AnimationConfig, AppConfig, NotificationConfig, SessionConfig, WizardConfig};
pub use course::{filter_courses, CourseItem};
pub use error::{EnrollError, EnrollResult};
pub use notify::{NotificationKind, Notifier, Toast, ToastQueue, TracingNotifier};
pub use profile::{BlurOutcome, ProfileDraft, ProfileField, ProfileSaveOutcome, ProfileSnapshot};
pub use session::{
    FileSessionStore, MemorySessionStore, SessionEvent, SessionStatus, SessionStore, SessionWatch,
};
pub use submit::{
    HttpSubmitter, Loader, LoaderPolicy, LoaderState, SubmissionResponse, SubmitOutcome, Submitter,
};
pub use wizard::{
    AutoAdvance, FormPayload, Greeting, InputKind, Navigation, StepDefinition, StepWizard,
    WizardView,
};
