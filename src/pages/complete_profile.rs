//! Profile completion wizard shown after sign-up.

use std::rc::Rc;

use coursepath_core::auth;
use coursepath_core::wizard::{GENDER_OPTIONS, INTEREST_OPTIONS};
use coursepath_core::{
    FormPayload, InputKind, Loader, LoaderState, Navigation, ProfileField, SessionStore,
    StepWizard, SubmitOutcome, WizardView,
};
use coursepath_ui::{
    Button, ButtonVariant, Dropdown, LoaderOverlay, RadioCards, StepInput, StepProgress,
};
use dioxus::prelude::*;

use crate::app::Route;
use crate::context::{use_account, use_services, Account};

/// Rendered width of the progress bar.
const PROGRESS_BAR_PX: f64 = 400.0;

/// Wizard fields that carry over to the profile page.
const CARRIED_FIELDS: [(&str, ProfileField); 2] = [
    ("nickname", ProfileField::Nickname),
    ("phone", ProfileField::Phone),
];

/// What the Enter key does on the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnterKey {
    Advance,
    Submit,
}

fn enter_key(view: &WizardView) -> EnterKey {
    if view.submit_visible {
        EnterKey::Submit
    } else {
        EnterKey::Advance
    }
}

/// Copy the wizard answers the profile page shows onto the account.
fn carry_answers(account: &mut Account, answers: &FormPayload) {
    for (key, field) in CARRIED_FIELDS {
        if let Some(value) = answers.get(key) {
            account.profile.values.insert(field, value.clone());
        }
    }
    if let Some(gender) = answers.get("gender") {
        account.profile.gender = gender.clone();
    }
    if let Some(birth_date) = answers.get("birth_date") {
        account.set_birth_date(birth_date);
    }
    account.interest = answers.get("interest").cloned();
}

#[component]
pub fn CompleteProfile() -> Element {
    let services = use_services();
    let mut account = use_account();
    let navigator = use_navigator();

    let username = account
        .read()
        .as_ref()
        .map(|a| a.username.clone())
        .unwrap_or_default();

    let wizard_config = services.config.wizard.clone();
    let mut wizard = use_signal(move || StepWizard::complete_profile(&username, wizard_config));

    let loader_config = services.config.wizard.clone();
    let loader = use_hook(move || {
        Rc::new(Loader::saving(
            loader_config.loader_interval(),
            loader_config.loader_policy,
        ))
    });
    let mut loader_state: Signal<LoaderState> = use_signal(LoaderState::default);
    let mut submitting = use_signal(|| false);

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

    let submit_services = services.clone();
    let submit = use_callback(move |()| {
        if submitting() {
            return;
        }
        // Surface the last step's warning on the live wizard, then post from
        // a snapshot so no signal borrow is held across the request.
        let mut pending = match &mut *wizard.write() {
            Ok(w) => {
                if !w.is_last() || !w.validate_current() {
                    tracing::debug!("Submission blocked by the last step");
                    return;
                }
                w.clone()
            }
            Err(_) => return,
        };

        submitting.set(true);
        let services = submit_services.clone();
        let loader = loader.clone();
        spawn(async move {
            let submitter = services.submitter(&services.config.complete_profile_path);
            let result = pending.submit(&submitter, &services.toasts, &loader).await;
            submitting.set(false);
            if let Err(e) = services.session.set(auth::SHOW_MODAL_AFTER_SIGNUP, "true") {
                tracing::warn!("Failed to set sign-up flag: {}", e);
            }

            match result {
                Ok(SubmitOutcome::Completed { redirect_url }) => {
                    tracing::info!(redirect = ?redirect_url, "Profile completed");
                    if let Some(active) = account.write().as_mut() {
                        carry_answers(active, pending.collected());
                    }
                    navigator.replace(Route::Courses {});
                }
                Ok(SubmitOutcome::Failed { message }) => {
                    tracing::debug!(%message, "Profile submission failed");
                }
                Err(e) => tracing::debug!("Submission blocked: {}", e),
            }
        });
    });

    // A structurally broken flow is a programming error; show it plainly.
    let built = wizard.read().as_ref().err().map(ToString::to_string);
    if let Some(error) = built {
        tracing::error!("Profile wizard unavailable: {}", error);
        return rsx! {
            main { class: "complete-profile",
                p { class: "input-warning", "{error}" }
            }
        };
    }

    let mut advance = move || {
        if let Ok(w) = &mut *wizard.write() {
            if let Navigation::Blocked = w.advance() {
                tracing::debug!("Next blocked");
            }
        }
    };

    let mut retreat = move || {
        if let Ok(w) = &mut *wizard.write() {
            w.retreat();
        }
    };

    let select_radio = move |value: String| {
        let selected = match &mut *wizard.write() {
            Ok(w) => w.select_radio(&value),
            Err(_) => return,
        };
        let ticket = selected.unwrap_or_else(|e| {
            tracing::warn!("Radio selection rejected: {}", e);
            None
        });
        if let Some(ticket) = ticket {
            spawn(async move {
                tokio::time::sleep(ticket.delay).await;
                if let Ok(w) = &mut *wizard.write() {
                    w.complete_auto_advance(ticket);
                }
            });
        }
    };

    let select_option = move |(value, label): (String, String)| {
        if let Ok(w) = &mut *wizard.write() {
            if let Err(e) = w.select_option(&value, &label) {
                tracing::warn!("Dropdown selection rejected: {}", e);
            }
        }
    };

    let guard = wizard.read();
    let Ok(w) = &*guard else {
        return rsx! {};
    };
    let view = w.view();
    let width = w.progress_width_percent(PROGRESS_BAR_PX);
    let step = w.current_step().clone();
    let value = w.input(&step.field).to_string();
    let selected_interest = w.selected_interest().map(str::to_string);
    drop(guard);

    let field = step.field.clone();
    let on_enter = enter_key(&view);
    let mut advance_on_enter = advance;

    rsx! {
        main {
            class: "complete-profile",
            onkeydown: move |e: KeyboardEvent| {
                if e.key() == Key::Enter {
                    match on_enter {
                        EnterKey::Submit => submit.call(()),
                        EnterKey::Advance => advance_on_enter(),
                    }
                }
            },

            StepProgress {
                step_number: view.step_number,
                total: view.total,
                width_percent: width,
            }

            section { class: "greeting",
                h2 { class: "greeting-title", "{view.greeting}" }
                p { class: "sub-greeting", "{view.sub_greeting}" }
            }

            match step.kind {
                InputKind::Text | InputKind::Tel | InputKind::Date => rsx! {
                    StepInput {
                        key: "{step.field}",
                        kind: step.kind,
                        value: value.clone(),
                        warning: view.warning.clone(),
                        oninput: move |v: String| {
                            if let Ok(w) = &mut *wizard.write() {
                                if let Err(e) = w.set_input(&field, &v) {
                                    tracing::warn!("Input rejected: {}", e);
                                }
                            }
                        },
                    }
                },
                InputKind::Radio => rsx! {
                    RadioCards {
                        options: GENDER_OPTIONS.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
                        selected: (!value.is_empty()).then(|| value.clone()),
                        onselect: select_radio,
                    }
                    if let Some(warning) = &view.warning {
                        p { class: "input-warning", "{warning}" }
                    }
                },
                InputKind::Dropdown => rsx! {
                    Dropdown {
                        options: INTEREST_OPTIONS
                            .iter()
                            .map(|(v, l)| (v.to_string(), l.to_string()))
                            .collect::<Vec<_>>(),
                        selected_label: selected_interest.clone(),
                        onselect: select_option,
                    }
                    if let Some(warning) = &view.warning {
                        p { class: "input-warning", "{warning}" }
                    }
                },
                InputKind::Hidden => rsx! {},
            }

            div { class: "wizard-nav",
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: !view.prev_enabled,
                    onclick: move |_| retreat(),
                    "Previous"
                }
                Button {
                    hidden: !view.next_visible,
                    disabled: !view.progression_enabled,
                    onclick: move |_| advance(),
                    "Next"
                }
                if view.submit_visible {
                    Button {
                        disabled: !view.progression_enabled || submitting(),
                        onclick: move |_| submit.call(()),
                        "Submit"
                    }
                }
            }

            LoaderOverlay { state: loader_state() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursepath_core::WizardConfig;

    fn wizard() -> StepWizard {
        StepWizard::complete_profile("alice", WizardConfig::default()).unwrap()
    }

    #[test]
    fn enter_advances_before_the_last_step() {
        let w = wizard();
        assert_eq!(enter_key(&w.view()), EnterKey::Advance);
    }

    #[test]
    fn enter_submits_on_the_last_step() {
        let mut w = wizard();
        for (field, value) in [("fullname", "Alice Doe"), ("nickname", "Ali")] {
            w.set_input(field, value).unwrap();
            assert!(matches!(w.advance(), Navigation::Moved { .. }));
        }
        let ticket = w.select_radio("Female").unwrap().unwrap();
        assert!(matches!(w.complete_auto_advance(ticket), Navigation::Moved { .. }));
        w.set_input("phone", "812345678901").unwrap();
        assert!(matches!(w.advance(), Navigation::Moved { .. }));
        w.select_option("IT", "Information Technology").unwrap();
        assert!(matches!(w.advance(), Navigation::Moved { .. }));

        assert!(w.is_last());
        assert_eq!(enter_key(&w.view()), EnterKey::Submit);
        assert_eq!(w.advance(), Navigation::AtBoundary);
    }
}
