//! Form submission and the loading overlay shown while it runs.
//!
//! The endpoint is an external collaborator behind [`Submitter`]. A single
//! attempt is made per user action; failures are reported once through a
//! [`Notifier`] and the user may submit again.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{EnrollError, EnrollResult};
use crate::notify::{NotificationKind, Notifier};
use crate::wizard::FormPayload;

/// Messages rotated by the loader while the completed profile is saved.
pub const SAVING_MESSAGES: &[&str] = &[
    "Hang tight! We're connecting you to the database",
    "Data in transit! Please wait",
    "Ready in a few seconds! Saving your information.",
    "Your data is now in safe hands! Redirecting you to the homepage",
];

/// `message` in a response may be one string or a list of form errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseMessage {
    One(String),
    Many(Vec<String>),
}

impl ResponseMessage {
    pub fn text(&self) -> String {
        match self {
            ResponseMessage::One(message) => message.clone(),
            ResponseMessage::Many(messages) => messages.join("\n"),
        }
    }
}

/// Body returned by the enrollment backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, alias = "homepage_url")]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    /// Set by the login endpoint
    #[serde(default)]
    pub session_expiry: Option<String>,
}

/// The submission endpoint.
pub trait Submitter: Send + Sync {
    fn submit(
        &self,
        payload: &FormPayload,
    ) -> impl Future<Output = EnrollResult<SubmissionResponse>> + Send;
}

/// Posts the payload as JSON with the page's CSRF token.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    url: String,
    csrf_token: Option<String>,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            csrf_token: None,
        }
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &FormPayload) -> EnrollResult<SubmissionResponse> {
        let mut request = self.client.post(&self.url).json(payload);
        if let Some(token) = &self.csrf_token {
            request = request.header("X-CSRFToken", token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), url = %self.url, "Submission endpoint error");
            return Err(EnrollError::Network(
                "Failed to submit data into database.".to_string(),
            ));
        }
        Ok(response.json::<SubmissionResponse>().await?)
    }
}

/// How long the loader stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderPolicy {
    /// Play the full message rotation, then send the request. The loader's
    /// lifetime has nothing to do with how long the request takes.
    #[default]
    FixedSequence,
    /// Rotate messages for exactly as long as the request is pending.
    TiedToRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoaderState {
    pub visible: bool,
    pub message: Option<String>,
}

/// Overlay with rotating status messages.
#[derive(Debug)]
pub struct Loader {
    messages: Vec<String>,
    interval: Duration,
    policy: LoaderPolicy,
    state: watch::Sender<LoaderState>,
}

impl Loader {
    pub fn new(messages: Vec<String>, interval: Duration, policy: LoaderPolicy) -> Self {
        let (state, _) = watch::channel(LoaderState::default());
        Self {
            messages,
            interval,
            policy,
            state,
        }
    }

    /// Loader used by the profile wizard.
    pub fn saving(interval: Duration, policy: LoaderPolicy) -> Self {
        Self::new(
            SAVING_MESSAGES.iter().map(|m| m.to_string()).collect(),
            interval,
            policy,
        )
    }

    pub fn policy(&self) -> LoaderPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoaderState {
        self.state.borrow().clone()
    }

    pub fn hide(&self) {
        self.state.send_replace(LoaderState::default());
    }

    fn show(&self, index: usize) {
        let message = self.messages.get(index).cloned();
        self.state.send_replace(LoaderState {
            visible: true,
            message,
        });
    }

    /// Show every message for one interval each, then hide.
    pub async fn run_fixed(&self) {
        let count = self.messages.len().max(1);
        for index in 0..count {
            self.show(index);
            tokio::time::sleep(self.interval).await;
        }
        self.hide();
    }

    /// Cycle messages until `work` finishes, then hide and return its output.
    pub async fn while_pending<F: Future>(&self, work: F) -> F::Output {
        tokio::pin!(work);
        let count = self.messages.len().max(1);
        let mut index = 0;
        self.show(index);

        let output = loop {
            tokio::select! {
                output = &mut work => break output,
                _ = tokio::time::sleep(self.interval) => {
                    index = (index + 1) % count;
                    self.show(index);
                }
            }
        };
        self.hide();
        output
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; the page should navigate to `redirect_url` when present
    Completed { redirect_url: Option<String> },
    /// Rejected or unreachable; already reported to the user
    Failed { message: String },
}

/// Text shown to the user for a failed submission.
pub fn failure_message(err: &EnrollError) -> String {
    match err {
        EnrollError::Network(message) | EnrollError::Rejected(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Post `payload` once under the loader and report failure via `notifier`.
pub async fn run_submission<S, N>(
    payload: FormPayload,
    submitter: &S,
    notifier: &N,
    loader: &Loader,
) -> SubmitOutcome
where
    S: Submitter,
    N: Notifier + ?Sized,
{
    let result = match loader.policy() {
        LoaderPolicy::FixedSequence => {
            loader.run_fixed().await;
            submitter.submit(&payload).await
        }
        LoaderPolicy::TiedToRequest => loader.while_pending(submitter.submit(&payload)).await,
    };
    loader.hide();

    let accepted = result.and_then(|response| {
        if response.success {
            Ok(response)
        } else {
            let message = response
                .message
                .as_ref()
                .map(ResponseMessage::text)
                .unwrap_or_else(|| "Error submitting user data.".to_string());
            Err(EnrollError::Rejected(message))
        }
    });

    match accepted {
        Ok(response) => {
            tracing::info!(redirect = ?response.redirect_url, "Submission accepted");
            SubmitOutcome::Completed {
                redirect_url: response.redirect_url,
            }
        }
        Err(e) => {
            tracing::error!("Submission failed: {}", e);
            let message = failure_message(&e);
            notifier.notify(NotificationKind::Error, &message);
            SubmitOutcome::Failed { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_message_variants() {
        let single: SubmissionResponse =
            serde_json::from_str(r#"{"success": false, "message": "Email taken"}"#).unwrap();
        assert_eq!(single.message.unwrap().text(), "Email taken");

        let many: SubmissionResponse =
            serde_json::from_str(r#"{"success": false, "message": ["a", "b"]}"#).unwrap();
        assert_eq!(many.message.unwrap().text(), "a\nb");
    }

    #[test]
    fn homepage_url_is_accepted_as_redirect() {
        let response: SubmissionResponse =
            serde_json::from_str(r#"{"success": true, "homepage_url": "/home/"}"#).unwrap();
        assert_eq!(response.redirect_url.as_deref(), Some("/home/"));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_loader_rotates_then_hides() {
        let loader = Loader::saving(Duration::from_millis(1500), LoaderPolicy::FixedSequence);
        let mut rx = loader.subscribe();
        let observed = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                seen.push(state.message);
                if !state.visible {
                    break;
                }
            }
            seen
        });

        let started = tokio::time::Instant::now();
        loader.run_fixed().await;
        assert_eq!(started.elapsed(), Duration::from_millis(6000));
        assert!(!loader.state().visible);

        let seen = observed.await.unwrap();
        assert_eq!(seen.first().cloned().flatten().as_deref(), Some(SAVING_MESSAGES[0]));
        assert_eq!(seen.last().cloned().flatten(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn tied_loader_follows_work() {
        let loader = Loader::saving(Duration::from_millis(1500), LoaderPolicy::TiedToRequest);
        let started = tokio::time::Instant::now();
        let value = loader
            .while_pending(async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                7
            })
            .await;
        assert_eq!(value, 7);
        assert_eq!(started.elapsed(), Duration::from_millis(200));
        assert!(!loader.state().visible);
    }
}
