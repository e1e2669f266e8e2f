//! Profile page: completion wave, inline field editing and photo changes.

use std::rc::Rc;

use coursepath_core::profile::{
    default_photo, format_birth_date, format_joined_date, interest_label, save_profile,
    social_href, update_loader, ImageUpdate,
};
use coursepath_core::{
    BlurOutcome, HoverProgressAnimator, LoaderState, ProfileDraft, ProfileField,
    ProfileSaveOutcome,
};
use coursepath_ui::{use_wave_frames, Button, ButtonVariant, LoaderOverlay, ProgressWave};
use dioxus::prelude::*;

use crate::app::SignedIn;
use crate::components::{NavHeader, NavLocation};
use crate::context::{store_profile_cache, use_account, use_services, Account};

fn field_label(field: ProfileField) -> &'static str {
    match field {
        ProfileField::Nickname => "Nickname",
        ProfileField::Email => "Email",
        ProfileField::Phone => "Phone",
        ProfileField::Address => "Address",
        ProfileField::Profession => "Profession",
        ProfileField::Institution => "Institution",
        ProfileField::Social => "Social link",
    }
}

#[component]
pub fn Profile() -> Element {
    let account = use_account();

    let current_account = account.read().clone();
    match current_account {
        Some(current) => rsx! {
            SignedIn {
                ProfileEditor { current }
            }
        },
        None => rsx! {
            NavHeader { current: NavLocation::Profile }
            main { class: "profile",
                p { class: "empty-state", "Sign in to see your profile." }
            }
        },
    }
}

#[component]
fn ProfileEditor(current: Account) -> Element {
    let services = use_services();
    let mut account = use_account();

    let initial = current.profile.clone();
    let mut draft = use_signal(move || ProfileDraft::new(initial));
    let mut edit_value = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let loader = use_hook(|| Rc::new(update_loader()));
    let mut loader_state: Signal<LoaderState> = use_signal(LoaderState::default);
    let watched = loader.clone();
    use_hook(move || {
        spawn(async move {
            let mut rx = watched.subscribe();
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                loader_state.set(state);
            }
        });
    });

    let blur_services = services.clone();
    let blur = use_callback(move |field: ProfileField| {
        let outcome = draft.write().blur(field, &edit_value(), &blur_services.toasts);
        if let BlurOutcome::Rejected { message } = outcome {
            tracing::debug!(?field, %message, "Edit rejected");
        }
    });

    let save_services = services.clone();
    let save = move |_| {
        if saving() {
            return;
        }
        saving.set(true);
        let services = save_services.clone();
        let loader = loader.clone();
        let pending = draft.read().clone();
        spawn(async move {
            let submitter = services.submitter(&services.config.update_profile_path);
            let outcome = save_profile(&pending, &submitter, &services.toasts, &loader).await;
            match outcome {
                ProfileSaveOutcome::Saved { reload_after } => {
                    tokio::time::sleep(reload_after).await;
                    draft.write().apply_saved();
                    let saved = draft.read().snapshot().clone();
                    store_profile_cache(&saved);
                    if let Some(active) = account.write().as_mut() {
                        active.profile = saved;
                    }
                }
                ProfileSaveOutcome::Blocked => tracing::debug!("Save blocked by invalid field"),
                ProfileSaveOutcome::Failed { message } => {
                    tracing::warn!(%message, "Profile save failed")
                }
            }
            saving.set(false);
        });
    };

    let state = draft.read().clone();
    let snapshot = state.snapshot().clone();
    let completion = snapshot.completion_percent();
    let photo = match state.image_update() {
        ImageUpdate::File(name) => name.clone(),
        ImageUpdate::Default(path) => path.clone(),
        ImageUpdate::None => snapshot
            .image_url
            .clone()
            .unwrap_or_else(|| default_photo(&snapshot.gender)),
    };
    let birth_date = current
        .birth_date
        .as_deref()
        .and_then(format_birth_date)
        .unwrap_or_else(|| "None".to_string());
    let joined = format_joined_date(&current.joined).unwrap_or_else(|| current.joined.clone());
    let interest = current
        .interest
        .as_deref()
        .and_then(interest_label)
        .unwrap_or("None");
    let social = snapshot
        .values
        .get(&ProfileField::Social)
        .filter(|link| !link.is_empty())
        .map(|link| social_href(link));

    rsx! {
        NavHeader { current: NavLocation::Profile }

        main { class: "profile",
            section { class: "profile-card",
                CompletionWave { key: "{completion}", percent: completion,
                    img { class: "profile-photo", src: "{photo}", alt: "Profile photo" }
                }
                h2 { class: "profile-name", "{current.username}" }
                p { class: "profile-joined", "Joined {joined}" }

                div { class: "image-actions",
                    input {
                        r#type: "file",
                        accept: "image/*",
                        onchange: move |e| {
                            if let Some(engine) = e.files() {
                                if let Some(name) = engine.files().first() {
                                    draft.write().choose_image(name.clone());
                                }
                            }
                        },
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| {
                            if !draft.write().commit_image() {
                                tracing::debug!("No image chosen");
                            }
                        },
                        "Update"
                    }
                    Button {
                        variant: ButtonVariant::Link,
                        onclick: move |_| draft.write().remove_image(),
                        "Remove"
                    }
                }
            }

            section { class: "profile-details",
                dl {
                    dt { "Birth date" }
                    dd { "{birth_date}" }
                    dt { "Gender" }
                    dd { "{snapshot.gender}" }
                    dt { "Interest" }
                    dd { id: "interest", "{interest}" }
                }

                for field in ProfileField::ALL {
                    {
                        let editing = state.editing() == Some(field);
                        let invalid = state.is_invalid(field);
                        let shown = snapshot.display(field);
                        rsx! {
                            div {
                                key: "{field.key()}",
                                class: if invalid { "profile-field invalid" } else { "profile-field" },
                                label { "{field_label(field)}" }
                                if editing {
                                    input {
                                        class: "input-field",
                                        autofocus: true,
                                        value: "{edit_value}",
                                        oninput: move |e| edit_value.set(e.value()),
                                        onblur: move |_| blur.call(field),
                                    }
                                } else {
                                    span {
                                        class: "field-display",
                                        onclick: move |_| {
                                            let prefill = draft.write().begin_edit(field);
                                            edit_value.set(prefill);
                                        },
                                        "{shown}"
                                    }
                                }
                            }
                        }
                    }
                }

                if let Some(href) = social {
                    a { class: "social-link", href: "{href}", target: "_blank", "Open social profile" }
                }

                Button {
                    disabled: !state.save_enabled() || saving(),
                    onclick: save,
                    "Save"
                }
            }
        }

        LoaderOverlay { state: loader_state() }
    }
}

/// Avatar wrapper that raises a wave to the completion percentage on hover.
/// Keyed by the percentage so a saved profile starts a fresh animator.
#[component]
fn CompletionWave(percent: u8, children: Element) -> Element {
    let services = use_services();
    let animator =
        use_hook(|| HoverProgressAnimator::new(percent, services.config.animation.clone()));
    let frame = use_wave_frames(animator.clone());

    let entering = animator.clone();
    rsx! {
        ProgressWave {
            frame: frame(),
            onenter: move |_| entering.pointer_enter(),
            onleave: move |_| animator.pointer_leave(),
            {children}
        }
    }
}
