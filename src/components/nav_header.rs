//! Navigation Header Component
//!
//! App title, page links, the completion ring around the avatar and a
//! dropdown with sign-out. Signed-out visitors get a compact login form;
//! a refused login there sends them to the full sign-in page.

use coursepath_core::auth::{self, LoginSurface};
use coursepath_core::session::SESSION_EXPIRY_KEY;
use coursepath_core::{LoginOutcome, NotificationKind, Notifier, SessionStore};
use coursepath_ui::{Button, ProgressRing};
use dioxus::prelude::*;

use crate::app::Route;
use crate::context::{use_account, use_services, Account};

/// Navigation location within the application
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NavLocation {
    Courses,
    Profile,
}

impl NavLocation {
    pub fn display_name(&self) -> &'static str {
        match self {
            NavLocation::Courses => "Courses",
            NavLocation::Profile => "Profile",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            NavLocation::Courses => Route::Courses {},
            NavLocation::Profile => Route::Profile {},
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct NavHeaderProps {
    pub current: NavLocation,
}

#[component]
pub fn NavHeader(props: NavHeaderProps) -> Element {
    let services = use_services();
    let mut account = use_account();
    let navigator = use_navigator();
    let mut menu_open = use_signal(|| false);
    let mut login_email = use_signal(String::new);
    let mut login_password = use_signal(String::new);
    let mut show_password = use_signal(|| false);

    let locations = [NavLocation::Courses, NavLocation::Profile];
    let signed_in = account.read().is_some();
    let (username, completion) = account
        .read()
        .as_ref()
        .map(|a| (a.username.clone(), a.profile.completion_percent()))
        .unwrap_or_default();

    let login_services = services.clone();
    let login = move |_| {
        let services = login_services.clone();
        spawn(async move {
            let submitter = services.submitter(&services.config.login_path);
            let outcome = auth::login(
                &login_email(),
                &login_password(),
                LoginSurface::Navbar,
                &services.config.getting_started_path,
                &submitter,
                services.session.as_ref(),
                &services.toasts,
            )
            .await;

            match outcome {
                LoginOutcome::Redirect { url } => {
                    tracing::debug!(%url, "Navbar login redirect");
                    account.set(Some(Account::from_email(&login_email())));
                    menu_open.set(false);
                    navigator.replace(Route::Courses {});
                }
                LoginOutcome::InvalidLogin { getting_started_url } => {
                    tracing::debug!(%getting_started_url, "Navbar login refused");
                    navigator.replace(Route::GettingStarted {});
                }
                LoginOutcome::Failed { message } => {
                    services.toasts.notify(NotificationKind::Error, &message);
                }
                LoginOutcome::Rejected { .. } => {}
            }
        });
    };

    let sign_out = move |_| {
        if let Err(e) = services.session.remove(SESSION_EXPIRY_KEY) {
            tracing::warn!("Failed to clear session: {}", e);
        }
        account.set(None);
        menu_open.set(false);
        navigator.replace(Route::GettingStarted {});
    };

    rsx! {
        header { class: "navbar",
            div { class: "nav-title",
                h1 { class: "app-title", "Coursepath" }
            }

            nav { class: "nav-links",
                for location in locations {
                    Link {
                        to: location.route(),
                        class: if location == props.current { "nav-link active" } else { "nav-link" },
                        "{location.display_name()}"
                    }
                }
            }

            if signed_in {
                div { class: "nav-profile",
                    button {
                        r#type: "button",
                        class: "profile-image",
                        "aria-expanded": "{menu_open()}",
                        onclick: move |_| menu_open.toggle(),
                        ProgressRing { percent: f64::from(completion) }
                        span { class: "nav-username", "{username}" }
                    }
                    if menu_open() {
                        div { id: "sub-menu", class: "sub-menu active",
                            Link { to: Route::Profile {}, class: "sub-menu-link", "My profile" }
                            button { r#type: "button", class: "sub-menu-link", onclick: sign_out, "Sign out" }
                        }
                    }
                }
            } else {
                div { class: "nav-login",
                    button {
                        r#type: "button",
                        class: "btn btn-link",
                        onclick: move |_| menu_open.toggle(),
                        "Sign in"
                    }
                    if menu_open() {
                        form { class: "login input-group",
                            onsubmit: move |e| e.prevent_default(),
                            input {
                                class: "input-field email-input",
                                r#type: "email",
                                placeholder: "Email",
                                value: "{login_email}",
                                oninput: move |e| login_email.set(e.value()),
                            }
                            input {
                                class: "input-field password-input",
                                r#type: if show_password() { "text" } else { "password" },
                                placeholder: "Password",
                                value: "{login_password}",
                                oninput: move |e| login_password.set(e.value()),
                            }
                            label { class: "password-toggle",
                                input {
                                    r#type: "checkbox",
                                    checked: show_password(),
                                    onchange: move |_| show_password.toggle(),
                                }
                                "Show password"
                            }
                            Button { onclick: login, "Sign in" }
                            Link { to: Route::GettingStarted {}, class: "register", "Create an account" }
                        }
                    }
                }
            }
        }
    }
}
