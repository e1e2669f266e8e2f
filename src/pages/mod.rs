//! Page components for Coursepath.

mod complete_profile;
mod courses;
mod getting_started;
mod profile;

pub use complete_profile::CompleteProfile;
pub use courses::Courses;
pub use getting_started::GettingStarted;
pub use profile::Profile;
