//! Timing and endpoint configuration.
//!
//! Every interval the state machines depend on lives here so tests can
//! shrink them and the desktop app can load overrides from `config.json`
//! in its data directory. Missing keys fall back to the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EnrollResult;
use crate::submit::LoaderPolicy;

/// Name of the optional config file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Hover progress animation timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Full sweep duration, 0 → target or target → 0
    pub duration_ms: u64,
    /// Debounce before a down animation starts after the pointer leaves
    pub settle_delay_ms: u64,
    /// Delay before the intro animation plays on page load
    pub intro_delay_ms: u64,
    /// How long the intro holds at the target before going back down
    pub intro_hold_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            settle_delay_ms: 50,
            intro_delay_ms: 1000,
            intro_hold_ms: 2000,
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn intro_delay(&self) -> Duration {
        Duration::from_millis(self.intro_delay_ms)
    }

    pub fn intro_hold(&self) -> Duration {
        Duration::from_millis(self.intro_hold_ms)
    }
}

/// Wizard and loader behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Visual feedback delay before a radio selection moves to the next step
    pub auto_advance_delay_ms: u64,
    /// Pixel inset subtracted from the progress bar on every step but the last
    pub progress_inset_px: f64,
    /// Interval between loader messages
    pub loader_interval_ms: u64,
    /// Whether the loader runs its fixed rotation or follows the request
    pub loader_policy: LoaderPolicy,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            auto_advance_delay_ms: 2000,
            progress_inset_px: 8.0,
            loader_interval_ms: 1500,
            loader_policy: LoaderPolicy::default(),
        }
    }
}

impl WizardConfig {
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    pub fn loader_interval(&self) -> Duration {
        Duration::from_millis(self.loader_interval_ms)
    }
}

/// Client-side session expiry polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub check_interval_secs: u64,
    /// Where the user is sent once the session has expired
    pub landing_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 5 * 60,
            landing_url: "/home/".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

/// Toast lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub visible_secs: u64,
    pub close_animation_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_secs: 5,
            close_animation_ms: 300,
        }
    }
}

impl NotificationConfig {
    /// Total time a toast stays in the queue, close animation included.
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.visible_secs) + Duration::from_millis(self.close_animation_ms)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the enrollment backend
    pub base_url: String,
    /// Path the completed wizard posts to
    pub complete_profile_path: String,
    /// Path the profile editor posts to
    pub update_profile_path: String,
    /// Path the sign-in form posts to
    pub login_path: String,
    /// Path the sign-up form posts to
    pub register_path: String,
    /// Where a refused navbar login lands
    pub getting_started_path: String,
    /// Sent as `X-CSRFToken` with every post
    pub csrf_token: Option<String>,
    pub animation: AnimationConfig,
    pub wizard: WizardConfig,
    pub session: SessionConfig,
    pub notifications: NotificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            complete_profile_path: "/home/account/complete-profile/".to_string(),
            update_profile_path: "/home/account/profile/update/".to_string(),
            login_path: "/home/account/login/".to_string(),
            register_path: "/home/account/register/".to_string(),
            getting_started_path: "/home/account/getting-started/".to_string(),
            csrf_token: None,
            animation: AnimationConfig::default(),
            wizard: WizardConfig::default(),
            session: SessionConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> EnrollResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(?path, "No config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::info!(?path, "Loaded config");
        Ok(config)
    }

    /// Load `config.json` from a data directory.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> EnrollResult<Self> {
        Self::load(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = AppConfig::default();
        assert_eq!(config.animation.duration(), Duration::from_millis(2000));
        assert_eq!(config.animation.settle_delay(), Duration::from_millis(50));
        assert_eq!(config.session.check_interval(), Duration::from_secs(300));
        assert_eq!(config.notifications.lifetime(), Duration::from_millis(5300));
        assert_eq!(config.wizard.loader_interval(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "animation": { "settle_delay_ms": 10 } }"#).unwrap();
        assert_eq!(config.animation.settle_delay_ms, 10);
        assert_eq!(config.animation.duration_ms, 2000);
        assert_eq!(config.session.landing_url, "/home/");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AppConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.endpoint("/home/account/login/"),
            "http://localhost:8000/home/account/login/"
        );
    }
}
