//! Course catalogue with search, the post-auth welcome popup and enroll.

use std::path::Path;
use std::time::Duration;

use coursepath_core::auth::mark_not_authenticated;
use coursepath_core::course::take_post_auth_popup;
use coursepath_core::{filter_courses, CourseItem, NotificationKind, Notifier};
use coursepath_ui::{Button, ButtonVariant, CloseButton, SearchInput};
use dioxus::prelude::*;

use crate::app::Route;
use crate::components::{NavHeader, NavLocation, SessionGuard};
use crate::context::{get_data_dir, use_account, use_services};

/// Optional catalogue override in the data directory.
pub const COURSES_FILE: &str = "courses.json";

/// Delay before the popup slides in.
const POPUP_SLIDE_DELAY: Duration = Duration::from_millis(300);

/// Fade-out time of the popup overlay.
const POPUP_FADE: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, PartialEq, Debug)]
enum Popup {
    Hidden,
    Entering,
    Shown,
    Closing,
}

/// Catalogue from `courses.json`, falling back to the built-in list.
pub fn load_courses(dir: &Path) -> Vec<CourseItem> {
    let path = dir.join(COURSES_FILE);
    let Ok(raw) = std::fs::read_to_string(&path) else {
        return builtin_courses();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(?path, "Ignoring unreadable course list: {}", e);
            builtin_courses()
        }
    }
}

fn builtin_courses() -> Vec<CourseItem> {
    [
        ("Introduction to Python", "Variables, control flow and functions."),
        ("Web Development with Django", "Models, views and templates."),
        ("Data Structures", "Lists, trees, graphs and their costs."),
        ("Machine Learning Basics", "Regression, classification and evaluation."),
        ("Cloud Application Development", "Containers, serverless and CI."),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, description))| CourseItem {
        id: index as u64 + 1,
        name: name.to_string(),
        description: description.to_string(),
        image_url: None,
    })
    .collect()
}

#[component]
pub fn Courses() -> Element {
    let services = use_services();
    let account = use_account();
    let navigator = use_navigator();

    let courses = use_hook(|| load_courses(&get_data_dir()));
    let mut term = use_signal(String::new);
    let popup_services = services.clone();
    let mut popup = use_signal(move || {
        match take_post_auth_popup(popup_services.session.as_ref()) {
            Ok(true) => Popup::Entering,
            Ok(false) => Popup::Hidden,
            Err(e) => {
                tracing::warn!("Could not read popup flags: {}", e);
                Popup::Hidden
            }
        }
    });

    use_hook(move || {
        if popup() == Popup::Entering {
            spawn(async move {
                tokio::time::sleep(POPUP_SLIDE_DELAY).await;
                popup.set(Popup::Shown);
            });
        }
    });

    let close_popup = move |_| {
        popup.set(Popup::Closing);
        spawn(async move {
            tokio::time::sleep(POPUP_FADE).await;
            popup.set(Popup::Hidden);
        });
    };

    let signed_in = account.read().is_some();
    let enroll_services = services.clone();
    let enroll = use_callback(move |course: CourseItem| {
        if account.read().is_none() {
            if let Err(e) = mark_not_authenticated(enroll_services.session.as_ref()) {
                tracing::warn!("Failed to set not-authenticated flag: {}", e);
            }
            navigator.replace(Route::GettingStarted {});
            return;
        }
        tracing::info!(course_id = course.id, "Enrolled");
        enroll_services
            .toasts
            .notify(NotificationKind::Success, &format!("Enrolled in {}", course.name));
    });

    let shown = filter_courses(&courses, &term())
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let (overlay_class, popup_class) = match popup() {
        Popup::Hidden => ("overlay-popup", "popup-after-auth"),
        Popup::Entering => ("overlay-popup open", "popup-after-auth"),
        Popup::Shown => ("overlay-popup open", "popup-after-auth shown"),
        Popup::Closing => ("overlay-popup closing", "popup-after-auth"),
    };

    rsx! {
        if signed_in {
            SessionGuard {}
        }
        NavHeader { current: NavLocation::Courses }

        main { class: "courses",
            SearchInput {
                value: term(),
                oninput: move |value: String| term.set(value),
            }

            if shown.is_empty() {
                p { class: "empty-state", "No courses match your search." }
            }

            div { class: "course-list",
                for course in shown {
                    {
                        let picked = course.clone();
                        rsx! {
                            article { key: "{course.id}", class: "course-item",
                                h3 { class: "course-name", "{course.name}" }
                                p { class: "course-description", "{course.description}" }
                                Button {
                                    variant: ButtonVariant::Primary,
                                    onclick: move |_| enroll.call(picked.clone()),
                                    "Enroll"
                                }
                            }
                        }
                    }
                }
            }
        }

        if popup() != Popup::Hidden {
            div { class: "{overlay_class}",
                div { class: "{popup_class}",
                    CloseButton { onclick: close_popup }
                    h2 { "Welcome aboard!" }
                    p { "Pick a course below to start learning." }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_builtin_list() {
        let dir = tempfile::tempdir().unwrap();
        let courses = load_courses(dir.path());
        assert_eq!(courses.len(), 5);
        assert_eq!(courses[0].id, 1);
    }

    #[test]
    fn catalogue_file_overrides_builtin_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(COURSES_FILE),
            r#"[{"id": 7, "name": "Rust for Beginners"}]"#,
        )
        .unwrap();
        let courses = load_courses(dir.path());
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Rust for Beginners");
        assert!(courses[0].description.is_empty());
    }

    #[test]
    fn broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(COURSES_FILE), "not json").unwrap();
        assert_eq!(load_courses(dir.path()).len(), 5);
    }
}
