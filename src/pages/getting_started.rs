//! Sign in / sign up page.
//!
//! A sliding pair of forms. Notices left by other pages (refused navbar
//! login, enroll attempt while signed out) are shown on mount.

use std::time::Duration;

use coursepath_core::auth::{
    self, password_match, pending_auth_notices, LoginSurface, Registration,
};
use coursepath_core::submit::failure_message;
use coursepath_core::{
    password_strength, EnrollError, LoginOutcome, NotificationKind, Notifier,
};
use coursepath_ui::{Button, StrengthMeter};
use dioxus::prelude::*;

use crate::app::Route;
use crate::context::{use_account, use_services, Account};

/// Gap between two queued notices.
const NOTICE_GAP: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, PartialEq, Debug)]
enum Panel {
    SignIn,
    SignUp,
}

#[component]
pub fn GettingStarted() -> Element {
    let services = use_services();
    let mut account = use_account();
    let navigator = use_navigator();

    let mut panel = use_signal(|| Panel::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut signup_email = use_signal(String::new);
    let mut signup_username = use_signal(String::new);
    let mut signup_password = use_signal(String::new);
    let mut signup_confirm = use_signal(String::new);
    let mut show_strength = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let notice_services = services.clone();
    use_hook(move || {
        spawn(async move {
            let notices = match pending_auth_notices(notice_services.session.as_ref()) {
                Ok(notices) => notices,
                Err(e) => {
                    tracing::warn!("Could not read pending notices: {}", e);
                    return;
                }
            };
            for (index, notice) in notices.iter().enumerate() {
                if index > 0 {
                    tokio::time::sleep(NOTICE_GAP).await;
                }
                notice_services.toasts.notify(NotificationKind::Error, notice);
            }
        });
    });

    let login_services = services.clone();
    let login = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let services = login_services.clone();
        spawn(async move {
            let submitter = services.submitter(&services.config.login_path);
            let outcome = auth::login(
                &email(),
                &password(),
                LoginSurface::GettingStarted,
                &services.config.getting_started_path,
                &submitter,
                services.session.as_ref(),
                &services.toasts,
            )
            .await;
            busy.set(false);

            match outcome {
                LoginOutcome::Redirect { url } => {
                    tracing::debug!(%url, "Login redirect");
                    account.set(Some(Account::from_email(&email())));
                    navigator.replace(Route::Courses {});
                }
                LoginOutcome::Failed { message } => {
                    services.toasts.notify(NotificationKind::Error, &message);
                }
                LoginOutcome::Rejected { .. } | LoginOutcome::InvalidLogin { .. } => {}
            }
        });
    };

    let register_services = services.clone();
    let register = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let services = register_services.clone();
        let registration = Registration {
            email: signup_email(),
            username: signup_username(),
            password: signup_password(),
            confirmation: signup_confirm(),
        };
        spawn(async move {
            let submitter = services.submitter(&services.config.register_path);
            let result = auth::register(&registration, &submitter, &services.toasts).await;
            busy.set(false);

            match result {
                Ok(url) => {
                    tracing::debug!(%url, "Registration redirect");
                    let mut new_account = Account::from_email(&registration.email);
                    new_account.username = registration.username.clone();
                    account.set(Some(new_account));
                    navigator.replace(Route::CompleteProfile {});
                }
                Err(EnrollError::Rejected(_)) => {}
                Err(e) => {
                    services
                        .toasts
                        .notify(NotificationKind::Error, &failure_message(&e));
                }
            }
        });
    };

    let strength = password_strength(&signup_password());
    let matched = password_match(&signup_password(), &signup_confirm());
    let (signin_left, signup_left, slider_left) = match panel() {
        Panel::SignIn => ("50px", "450px", "0"),
        Panel::SignUp => ("-350px", "50px", "110px"),
    };

    rsx! {
        main { class: "getting-started",
            div { class: "form-box",
                div { class: "button-group",
                    div { id: "btn", style: "left: {slider_left};" }
                    button { class: "toggle-btn", onclick: move |_| panel.set(Panel::SignIn), "Sign in" }
                    button { class: "toggle-btn", onclick: move |_| panel.set(Panel::SignUp), "Sign up" }
                }

                form { id: "signin", class: "input-group", style: "left: {signin_left};",
                    onsubmit: move |e| e.prevent_default(),
                    input {
                        class: "input-field email-input",
                        r#type: "email",
                        placeholder: "Email",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                    input {
                        class: "input-field password-input",
                        r#type: "password",
                        placeholder: "Password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    Button { disabled: busy(), onclick: login, "Sign in" }
                }

                form { id: "signup", class: "input-group", style: "left: {signup_left};",
                    onsubmit: move |e| e.prevent_default(),
                    input {
                        class: "input-field email-input",
                        r#type: "email",
                        placeholder: "Email",
                        value: "{signup_email}",
                        oninput: move |e| signup_email.set(e.value()),
                    }
                    input {
                        class: "input-field username-input",
                        placeholder: "Username",
                        value: "{signup_username}",
                        oninput: move |e| signup_username.set(e.value()),
                    }
                    input {
                        id: "password",
                        class: "input-field password-input",
                        r#type: "password",
                        placeholder: "Password",
                        value: "{signup_password}",
                        onfocus: move |_| show_strength.set(true),
                        onblur: move |_| show_strength.set(false),
                        oninput: move |e| signup_password.set(e.value()),
                    }
                    if show_strength() {
                        StrengthMeter { strength }
                    }
                    input {
                        class: "input-field password-input",
                        r#type: "password",
                        placeholder: "Confirm password",
                        value: "{signup_confirm}",
                        oninput: move |e| signup_confirm.set(e.value()),
                    }
                    if let Some(message) = matched.message() {
                        p { class: "password-checker", "{message}" }
                    }
                    Button { disabled: busy(), onclick: register, "Sign up" }
                }
            }
        }
    }
}
