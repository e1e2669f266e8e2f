//! Notification toasts.
//!
//! Fire-and-forget: callers hand a kind and a message to a [`Notifier`] and
//! move on. [`ToastQueue`] keeps the visible toasts in a watch channel the UI
//! renders from, and removes each one after its lifetime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Info,
    Success,
}

impl NotificationKind {
    /// CSS class of the toast box.
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
        }
    }
}

/// Anything that can show a message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, kind: NotificationKind, message: &str) {
        (**self).notify(kind, message)
    }
}

/// Logs notifications instead of showing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => tracing::error!(%message, "notification"),
            NotificationKind::Info => tracing::info!(%message, "notification"),
            NotificationKind::Success => tracing::info!(%message, success = true, "notification"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// Playing the close animation; removed shortly after
    pub closing: bool,
}

struct ToastInner {
    next_id: AtomicU64,
    config: NotificationConfig,
    toasts: watch::Sender<Vec<Toast>>,
}

/// Visible toast stack with timed auto-dismiss.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<ToastInner>,
}

impl ToastQueue {
    pub fn new(config: NotificationConfig) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(ToastInner {
                next_id: AtomicU64::new(1),
                config,
                toasts,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.toasts.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    /// Push a toast and return its id. Outside a tokio runtime the toast
    /// stays until [`Self::dismiss`] is called.
    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
            closing: false,
        };
        self.inner.toasts.send_modify(|toasts| toasts.push(toast));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let queue = self.clone();
                let visible = Duration::from_secs(self.inner.config.visible_secs);
                let closing = Duration::from_millis(self.inner.config.close_animation_ms);
                handle.spawn(async move {
                    tokio::time::sleep(visible).await;
                    queue.mark_closing(id);
                    tokio::time::sleep(closing).await;
                    queue.dismiss(id);
                });
            }
            Err(_) => tracing::debug!(id, "No runtime, toast will not auto-dismiss"),
        }
        id
    }

    /// Remove a toast immediately.
    pub fn dismiss(&self, id: u64) {
        self.inner.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        });
    }

    fn mark_closing(&self, id: u64) {
        self.inner.toasts.send_if_modified(|toasts| {
            match toasts.iter_mut().find(|t| t.id == id) {
                Some(toast) => {
                    toast.closing = true;
                    true
                }
                None => false,
            }
        });
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.push(kind, message);
    }
}
