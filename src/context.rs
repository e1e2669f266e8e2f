//! Shared services for Coursepath pages.
//!
//! `App` provides one [`AppServices`] plus the signed-in [`Account`] via
//! `use_context_provider`; pages pull them with the hooks below.
//!
//! ## Usage
//!
//! ```ignore
//! let services = use_services();
//! services.toasts.notify(NotificationKind::Info, "Saved");
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use coursepath_core::{
    AppConfig, FileSessionStore, HttpSubmitter, ProfileSnapshot, ToastQueue,
};
use dioxus::prelude::*;

/// Profile cache written after every successful save.
pub const PROFILE_CACHE_FILE: &str = "profile.json";

/// Session key-value file.
pub const SESSION_FILE: &str = "session.json";

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Long-lived handles shared by every page.
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub toasts: ToastQueue,
    pub session: Arc<FileSessionStore>,
}

impl AppServices {
    pub fn new(config: AppConfig, data_dir: PathBuf) -> Self {
        let toasts = ToastQueue::new(config.notifications.clone());
        Self {
            config,
            toasts,
            session: Arc::new(FileSessionStore::new(data_dir.join(SESSION_FILE))),
        }
    }

    /// Submitter for a backend path, carrying the CSRF token if configured.
    pub fn submitter(&self, path: &str) -> HttpSubmitter {
        let submitter = HttpSubmitter::new(self.config.endpoint(path));
        match &self.config.csrf_token {
            Some(token) => submitter.with_csrf_token(token.clone()),
            None => submitter,
        }
    }
}

/// The signed-in learner.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub profile: ProfileSnapshot,
    /// Birth date as the server renders it, e.g. `"Jan. 5, 2000"`
    pub birth_date: Option<String>,
    /// Interest acronym picked in the wizard
    pub interest: Option<String>,
    pub joined: String,
}

impl Account {
    /// Account for a fresh login; the username is the email's local part.
    pub fn from_email(email: &str) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_string();
        let mut profile = load_profile_cache().unwrap_or_default();
        profile
            .values
            .entry(coursepath_core::ProfileField::Email)
            .or_insert_with(|| email.to_string());
        Self {
            username,
            email: email.to_string(),
            profile,
            birth_date: None,
            interest: None,
            joined: Local::now().format("%b. %-d, %Y").to_string(),
        }
    }

    /// Store a wizard birth date (`YYYY-MM-DD`) in display form.
    pub fn set_birth_date(&mut self, iso: &str) {
        match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            Ok(date) => self.birth_date = Some(date.format("%b. %-d, %Y").to_string()),
            Err(e) => tracing::warn!(%iso, "Ignoring unparseable birth date: {}", e),
        }
    }
}

/// Read the cached profile, if any.
pub fn load_profile_cache() -> Option<ProfileSnapshot> {
    let path = get_data_dir().join(PROFILE_CACHE_FILE);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!(?path, "Ignoring unreadable profile cache: {}", e);
            None
        }
    }
}

/// Persist the profile so the next launch starts from it.
pub fn store_profile_cache(profile: &ProfileSnapshot) {
    let path = get_data_dir().join(PROFILE_CACHE_FILE);
    let result = serde_json::to_string_pretty(profile)
        .map_err(anyhow::Error::from)
        .and_then(|raw| std::fs::write(&path, raw).map_err(anyhow::Error::from));
    if let Err(e) = result {
        tracing::warn!(?path, "Failed to write profile cache: {}", e);
    }
}

/// Hook to access the shared services.
pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

/// Hook to access the signed-in account, `None` when signed out.
pub fn use_account() -> Signal<Option<Account>> {
    use_context::<Signal<Option<Account>>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_birth_date_is_stored_in_display_form() {
        let mut account = Account::default();
        account.set_birth_date("2000-01-05");
        assert_eq!(account.birth_date.as_deref(), Some("Jan. 5, 2000"));
        assert_eq!(
            coursepath_core::profile::format_birth_date("Jan. 5, 2000").as_deref(),
            Some("January 5th, 2000")
        );
    }

    #[test]
    fn unparseable_birth_date_is_ignored() {
        let mut account = Account::default();
        account.set_birth_date("05/01/2000");
        assert_eq!(account.birth_date, None);
    }
}
