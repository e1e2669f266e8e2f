//! Sign-in and sign-up helpers.
//!
//! Login and registration post through a [`Submitter`]. One-shot flags that
//! survive a page change (post-login popup, invalid-login notice) live in the
//! same [`SessionStore`] as the session expiry.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::{EnrollError, EnrollResult};
use crate::notify::{NotificationKind, Notifier};
use crate::session::{start_session, SessionStore};
use crate::submit::{failure_message, ResponseMessage, Submitter};
use crate::wizard::FormPayload;

pub const SHOW_MODAL_AFTER_LOGIN: &str = "showModalAfterLogin";
pub const SHOW_MODAL_AFTER_SIGNUP: &str = "showModalAfterSignup";
pub const INVALID_LOGIN: &str = "invalidLogin";
pub const NOT_AUTHENTICATED: &str = "notAuthenticated";

/// Gap between the two messages of a rejected registration.
pub const SECOND_MESSAGE_DELAY: Duration = Duration::from_secs(1);

static LENGTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.{8,32}$").expect("valid length regex"));

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Individual password requirements, each shown as a check mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordChecks {
    pub length: bool,
    pub lower: bool,
    pub upper: bool,
    pub number: bool,
    pub special: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthTier {
    None,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthTier {
    /// Color of the strength bar and percentage text.
    pub fn color(self) -> &'static str {
        match self {
            StrengthTier::None => "#fefefe",
            StrengthTier::Weak => "#f39c12",
            StrengthTier::Fair => "#f1c40f",
            StrengthTier::Good => "#27ae60",
            StrengthTier::Strong => "#008000",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub checks: PasswordChecks,
    /// 0, 25, 50, 75 or 100
    pub percent: u8,
}

impl PasswordStrength {
    pub fn tier(&self) -> StrengthTier {
        match self.percent {
            25 => StrengthTier::Weak,
            50 => StrengthTier::Fair,
            75 => StrengthTier::Good,
            100 => StrengthTier::Strong,
            _ => StrengthTier::None,
        }
    }
}

/// Score a password in 25-point steps. Mixed case only scores when both
/// cases are present.
pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = PasswordChecks {
        length: LENGTH_PATTERN.is_match(password),
        lower: password.chars().any(|c| c.is_ascii_lowercase()),
        upper: password.chars().any(|c| c.is_ascii_uppercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    };

    let percent = [
        checks.length,
        checks.number,
        checks.lower && checks.upper,
        checks.special,
    ]
    .iter()
    .filter(|passed| **passed)
    .count() as u8
        * 25;

    PasswordStrength { checks, percent }
}

/// Confirmation field indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMatch {
    /// One of the fields is empty; the indicator is hidden
    Hidden,
    Matched,
    Mismatched,
}

impl PasswordMatch {
    pub fn message(self) -> Option<&'static str> {
        match self {
            PasswordMatch::Hidden => None,
            PasswordMatch::Matched => Some("Password matched!"),
            PasswordMatch::Mismatched => Some("Password does not match!"),
        }
    }
}

pub fn password_match(password: &str, confirmation: &str) -> PasswordMatch {
    if password.is_empty() || confirmation.is_empty() {
        PasswordMatch::Hidden
    } else if password == confirmation {
        PasswordMatch::Matched
    } else {
        PasswordMatch::Mismatched
    }
}

/// Where the login form was submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginSurface {
    /// The getting-started page; failures show a toast in place
    GettingStarted,
    /// The navbar dropdown; failures bounce to the getting-started page
    Navbar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect { url: String },
    /// Credentials refused on the getting-started page
    Rejected { message: String },
    /// Credentials refused from the navbar; go to the getting-started page
    InvalidLogin { getting_started_url: String },
    Failed { message: String },
}

fn set_flag<S: SessionStore + ?Sized>(store: &S, key: &str) {
    if let Err(e) = store.set(key, "true") {
        tracing::warn!(key, "Failed to set flag: {}", e);
    }
}

/// Read a one-shot flag and clear it.
pub fn take_flag<S: SessionStore + ?Sized>(store: &S, key: &str) -> EnrollResult<bool> {
    let set = store.get(key)?.as_deref() == Some("true");
    if set {
        store.remove(key)?;
    }
    Ok(set)
}

fn record_expiry<S: SessionStore + ?Sized>(store: &S, raw: Option<&str>) {
    let Some(raw) = raw else {
        tracing::warn!("Login response carried no session expiry");
        return;
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(expiry) => {
            if let Err(e) = start_session(store, expiry.with_timezone(&Utc)) {
                tracing::warn!("Failed to store session expiry: {}", e);
            }
        }
        Err(e) => tracing::warn!(value = %raw, "Unparseable session expiry: {}", e),
    }
}

/// Post login credentials and decide where to go next.
pub async fn login<S, St, N>(
    email: &str,
    password: &str,
    surface: LoginSurface,
    getting_started_url: &str,
    submitter: &S,
    store: &St,
    notifier: &N,
) -> LoginOutcome
where
    S: Submitter,
    St: SessionStore + ?Sized,
    N: Notifier + ?Sized,
{
    let mut payload = FormPayload::new();
    payload.insert("loginEmail".to_string(), email.to_string());
    payload.insert("loginPassword".to_string(), password.to_string());

    let response = match submitter.submit(&payload).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            return LoginOutcome::Failed {
                message: failure_message(&e),
            };
        }
    };

    if !response.success {
        return match surface {
            LoginSurface::GettingStarted => {
                let message = response
                    .message
                    .as_ref()
                    .map(ResponseMessage::text)
                    .unwrap_or_else(|| "Invalid login credentials".to_string());
                notifier.notify(NotificationKind::Error, &message);
                LoginOutcome::Rejected { message }
            }
            LoginSurface::Navbar => {
                set_flag(store, INVALID_LOGIN);
                LoginOutcome::InvalidLogin {
                    getting_started_url: getting_started_url.to_string(),
                }
            }
        };
    }

    let Some(url) = response.redirect_url else {
        let e = EnrollError::Rejected("Login response had no redirect".to_string());
        tracing::error!("{}", e);
        return LoginOutcome::Failed {
            message: failure_message(&e),
        };
    };

    set_flag(store, SHOW_MODAL_AFTER_LOGIN);
    if surface == LoginSurface::GettingStarted {
        record_expiry(store, response.session_expiry.as_deref());
    }
    tracing::info!(%url, "Logged in");
    LoginOutcome::Redirect { url }
}

/// Sign-up form contents.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirmation: String,
}

impl Registration {
    fn payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        payload.insert("signUpEmail".to_string(), self.email.clone());
        payload.insert("signUpUsername".to_string(), self.username.clone());
        payload.insert("signUpPassword".to_string(), self.password.clone());
        payload.insert("confirmationPassword".to_string(), self.confirmation.clone());
        payload
    }
}

/// Post a registration. A refusal carries up to two messages; the second
/// one is shown a second after the first. Returns the redirect on success.
pub async fn register<S, N>(
    registration: &Registration,
    submitter: &S,
    notifier: &N,
) -> EnrollResult<String>
where
    S: Submitter,
    N: Notifier + ?Sized,
{
    let response = submitter.submit(&registration.payload()).await?;

    if !response.success {
        let messages = match response.message {
            Some(ResponseMessage::Many(messages)) => messages,
            Some(ResponseMessage::One(message)) => vec![message],
            None => vec!["Registration failed".to_string()],
        };
        for (index, message) in messages.iter().take(2).enumerate() {
            if index > 0 {
                tokio::time::sleep(SECOND_MESSAGE_DELAY).await;
            }
            notifier.notify(NotificationKind::Error, message);
        }
        return Err(EnrollError::Rejected(messages.join("\n")));
    }

    response
        .redirect_url
        .ok_or_else(|| EnrollError::Rejected("Registration response had no redirect".to_string()))
}

/// Notices queued for the getting-started page by a previous page.
pub fn pending_auth_notices<S: SessionStore + ?Sized>(store: &S) -> EnrollResult<Vec<String>> {
    let not_authenticated = take_flag(store, NOT_AUTHENTICATED)?;
    let invalid_login = store.get(INVALID_LOGIN)?.as_deref() == Some("true");

    let first = if invalid_login {
        "Invalid login credentials"
    } else {
        "Oops! You're not logged in"
    };

    if not_authenticated {
        Ok(vec![first.to_string(), "Please log in to continue".to_string()])
    } else if invalid_login {
        store.remove(INVALID_LOGIN)?;
        Ok(vec![first.to_string()])
    } else {
        Ok(Vec::new())
    }
}

/// Mark that an anonymous user tried to enroll.
pub fn mark_not_authenticated<S: SessionStore + ?Sized>(store: &S) -> EnrollResult<()> {
    store.set(NOT_AUTHENTICATED, "true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SESSION_EXPIRY_KEY};
    use crate::submit::SubmissionResponse;
    use parking_lot::Mutex;

    struct Canned(SubmissionResponse);

    impl Submitter for Canned {
        async fn submit(&self, _payload: &FormPayload) -> EnrollResult<SubmissionResponse> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Notifier for Recorder {
        fn notify(&self, _kind: NotificationKind, message: &str) {
            self.0.lock().push(message.to_string());
        }
    }

    #[test]
    fn strength_tiers() {
        assert_eq!(password_strength("").percent, 0);
        assert_eq!(password_strength("").tier(), StrengthTier::None);
        assert_eq!(password_strength("abcdefgh").percent, 25);
        assert_eq!(password_strength("abcdefg1").percent, 50);
        assert_eq!(password_strength("Abcdefg1").percent, 75);
        let strong = password_strength("Abcdefg1!");
        assert_eq!(strong.percent, 100);
        assert_eq!(strong.tier().color(), "#008000");
    }

    #[test]
    fn lowercase_alone_does_not_score() {
        let s = password_strength("abc");
        assert!(s.checks.lower);
        assert!(!s.checks.upper);
        assert_eq!(s.percent, 0);
    }

    #[test]
    fn overlong_password_loses_length_point() {
        let long = "a".repeat(33);
        assert!(!password_strength(&long).checks.length);
    }

    #[test]
    fn confirmation_indicator() {
        assert_eq!(password_match("", "x"), PasswordMatch::Hidden);
        assert_eq!(password_match("abc", "abc"), PasswordMatch::Matched);
        assert_eq!(
            password_match("abc", "abd").message(),
            Some("Password does not match!")
        );
    }

    #[tokio::test]
    async fn login_success_sets_popup_and_session() {
        let store = MemorySessionStore::new();
        let submitter = Canned(SubmissionResponse {
            success: true,
            redirect_url: Some("/home/".to_string()),
            session_expiry: Some("2030-01-01T00:00:00+00:00".to_string()),
            ..Default::default()
        });
        let outcome = login(
            "a@b.co",
            "pw",
            LoginSurface::GettingStarted,
            "/home/account/getting-started/",
            &submitter,
            &store,
            &Recorder::default(),
        )
        .await;
        assert_eq!(
            outcome,
            LoginOutcome::Redirect {
                url: "/home/".to_string()
            }
        );
        assert!(take_flag(&store, SHOW_MODAL_AFTER_LOGIN).unwrap());
        assert!(store.get(SESSION_EXPIRY_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn navbar_refusal_queues_invalid_login() {
        let store = MemorySessionStore::new();
        let submitter = Canned(SubmissionResponse::default());
        let outcome = login(
            "a@b.co",
            "pw",
            LoginSurface::Navbar,
            "/start/",
            &submitter,
            &store,
            &Recorder::default(),
        )
        .await;
        assert_eq!(
            outcome,
            LoginOutcome::InvalidLogin {
                getting_started_url: "/start/".to_string()
            }
        );
        assert_eq!(
            pending_auth_notices(&store).unwrap(),
            vec!["Invalid login credentials".to_string()]
        );
        assert!(pending_auth_notices(&store).unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn registration_refusal_shows_two_messages() {
        let submitter = Canned(SubmissionResponse {
            message: Some(ResponseMessage::Many(vec![
                "Email taken".to_string(),
                "Username taken".to_string(),
            ])),
            ..Default::default()
        });
        let recorder = Recorder::default();
        let started = tokio::time::Instant::now();
        let result = register(&Registration::default(), &submitter, &recorder).await;
        assert!(matches!(result, Err(EnrollError::Rejected(_))));
        assert_eq!(started.elapsed(), SECOND_MESSAGE_DELAY);
        assert_eq!(*recorder.0.lock(), vec!["Email taken", "Username taken"]);
    }

    #[test]
    fn not_authenticated_notice_pair() {
        let store = MemorySessionStore::new();
        mark_not_authenticated(&store).unwrap();
        assert_eq!(
            pending_auth_notices(&store).unwrap(),
            vec![
                "Oops! You're not logged in".to_string(),
                "Please log in to continue".to_string()
            ]
        );
    }
}
