//! Multi-step "complete your profile" wizard.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  StepWizard                                                      │
//! │  ├── steps: Vec<StepDefinition>    fixed at load                 │
//! │  ├── current: usize                moves one step at a time      │
//! │  ├── inputs: live values           written while the user types  │
//! │  ├── collected: confirmed values   written by forward moves      │
//! │  ├── personalized greeting slot    filled from its source field  │
//! │  └── warnings / progression flag   written by validation only    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Forward moves are gated by the active step's validator. Backward moves
//! always succeed. The personalized greeting is computed once per forward
//! pass over its source step and cleared when the user backs out of the
//! step that shows it.

mod step;

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

pub use step::{
    complete_profile_steps, Greeting, InputKind, StepDefinition, GENDER_OPTIONS, INTEREST_OPTIONS,
};

use crate::config::WizardConfig;
use crate::error::{EnrollError, EnrollResult};
use crate::notify::Notifier;
use crate::submit::{self, Loader, SubmitOutcome, Submitter};
use crate::validate;

pub const WARN_FILL_OUT: &str = "⚠ Please fill out this field correctly.";
pub const WARN_NAME: &str = "⚠ Please enter a valid name.";
pub const WARN_PHONE: &str = "⚠ Please enter a number in the correct format.";
pub const WARN_DATE: &str = "⚠ Please enter a valid date.";
pub const WARN_GENDER: &str = "⚠ Please select your gender";
pub const WARN_INTEREST: &str = "⚠ Please select your interest.";

/// Field values sent to the submission endpoint.
pub type FormPayload = BTreeMap<String, String>;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: usize, to: usize },
    /// The active step did not validate, or a delayed move went stale
    Blocked,
    /// Already on the first (retreat) or last (advance) step
    AtBoundary,
}

/// A radio selection that should move the wizard forward after the
/// feedback delay, provided the user is still on `step` by then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvance {
    pub step: usize,
    pub delay: Duration,
}

/// Everything the page needs to render the wizard chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    /// 1-based step number shown in the header
    pub step_number: usize,
    pub total: usize,
    pub greeting: String,
    pub sub_greeting: String,
    pub warning: Option<String>,
    pub prev_enabled: bool,
    pub next_visible: bool,
    pub submit_visible: bool,
    /// Whether "next" (or "submit" on the last step) accepts clicks
    pub progression_enabled: bool,
}

/// Linear form wizard with per-step validation.
#[derive(Debug, Clone)]
pub struct StepWizard {
    steps: Vec<StepDefinition>,
    current: usize,
    inputs: HashMap<String, String>,
    hidden: BTreeMap<String, String>,
    collected: FormPayload,
    personalized: Option<String>,
    greeting_inserted: bool,
    selected_interest: Option<String>,
    warnings: Vec<Option<String>>,
    progression_enabled: bool,
    config: WizardConfig,
}

impl StepWizard {
    /// Build a wizard, rejecting step lists that cannot work: no steps,
    /// duplicate fields, or a personalized greeting whose source step does
    /// not come before it.
    pub fn new(
        steps: Vec<StepDefinition>,
        hidden: impl IntoIterator<Item = (String, String)>,
        config: WizardConfig,
    ) -> EnrollResult<Self> {
        if steps.is_empty() {
            return Err(EnrollError::Structure("wizard has no steps".to_string()));
        }

        for (index, step) in steps.iter().enumerate() {
            if steps[..index].iter().any(|s| s.field == step.field) {
                return Err(EnrollError::Structure(format!(
                    "duplicate step field '{}'",
                    step.field
                )));
            }
            if let Some(source) = step.greeting.source_field() {
                if !steps[..index].iter().any(|s| s.field == source) {
                    return Err(EnrollError::Structure(format!(
                        "greeting of step '{}' depends on '{}', which is not an earlier step",
                        step.field, source
                    )));
                }
            }
        }

        let warnings = vec![None; steps.len()];
        Ok(Self {
            steps,
            current: 0,
            inputs: HashMap::new(),
            hidden: hidden.into_iter().collect(),
            collected: FormPayload::new(),
            personalized: None,
            greeting_inserted: false,
            selected_interest: None,
            warnings,
            progression_enabled: true,
            config,
        })
    }

    /// The sign-up profile completion flow for `username`.
    pub fn complete_profile(username: &str, config: WizardConfig) -> EnrollResult<Self> {
        Self::new(
            complete_profile_steps(username),
            [("username".to_string(), username.to_string())],
            config,
        )
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.steps.len() - 1
    }

    pub fn greeting_inserted(&self) -> bool {
        self.greeting_inserted
    }

    pub fn selected_interest(&self) -> Option<&str> {
        self.selected_interest.as_deref()
    }

    pub fn progression_enabled(&self) -> bool {
        self.progression_enabled
    }

    pub fn warning(&self) -> Option<&str> {
        self.warnings[self.current].as_deref()
    }

    pub fn input(&self, field: &str) -> &str {
        self.inputs.get(field).map(String::as_str).unwrap_or("")
    }

    /// Values confirmed by forward moves so far.
    pub fn collected(&self) -> &FormPayload {
        &self.collected
    }

    /// Store what the user typed into `field`, applying the phone mask and
    /// the date sanitizer. Typing into the active step re-validates it.
    /// Returns the stored value so the page can echo the mask.
    pub fn set_input(&mut self, field: &str, value: &str) -> EnrollResult<&str> {
        let index = self.index_of(field)?;
        let kind = self.steps[index].kind;
        let stored = match kind {
            InputKind::Tel => validate::format_phone_input(value),
            InputKind::Date => validate::sanitize_date_input(value),
            _ => value.to_string(),
        };
        self.inputs.insert(field.to_string(), stored);

        if index == self.current && kind.has_direct_input() {
            self.validate_current();
        }
        Ok(self.input(field))
    }

    /// Run the active step's validator, update its warning and the
    /// progression flag, and report the verdict.
    pub fn validate_current(&mut self) -> bool {
        let step = &self.steps[self.current];
        let value = self.inputs.get(&step.field).map(String::as_str).unwrap_or("");

        let check = |ok: bool, message: &str| (ok, (!ok).then(|| message.to_string()));
        let (valid, warning) = match step.kind {
            kind if kind.has_direct_input() && value.is_empty() => check(false, WARN_FILL_OUT),
            InputKind::Text => check(validate::is_valid_name(value), WARN_NAME),
            InputKind::Tel => check(validate::is_valid_phone(value), WARN_PHONE),
            InputKind::Date => check(validate::is_valid_birth_date(value), WARN_DATE),
            InputKind::Radio => check(!value.is_empty(), WARN_GENDER),
            InputKind::Dropdown => check(
                self.selected_interest.as_deref().is_some_and(|s| !s.is_empty()),
                WARN_INTEREST,
            ),
            InputKind::Hidden => (true, None),
        };

        self.warnings[self.current] = warning;
        self.progression_enabled = valid;
        valid
    }

    /// Move forward one step if the active step validates.
    pub fn advance(&mut self) -> Navigation {
        if self.is_last() {
            return Navigation::AtBoundary;
        }
        if !self.validate_current() {
            tracing::debug!(step = self.current, "Advance blocked by validation");
            return Navigation::Blocked;
        }

        let from = self.current;
        let field = self.steps[from].field.clone();
        let value = self.input(&field).to_string();
        self.collected.insert(field.clone(), value.clone());

        self.current += 1;

        if !self.greeting_inserted {
            if let Some(step) = self
                .steps
                .iter()
                .find(|s| s.greeting.source_field() == Some(field.as_str()))
            {
                self.personalized = Some(step.greeting.render(&value));
                self.greeting_inserted = true;
            }
        }

        tracing::debug!(from, to = self.current, "Wizard advanced");
        Navigation::Moved {
            from,
            to: self.current,
        }
    }

    /// Move back one step. Never validates.
    pub fn retreat(&mut self) -> Navigation {
        if self.is_first() {
            return Navigation::AtBoundary;
        }

        let from = self.current;
        self.progression_enabled = true;

        let leaving = &self.steps[from];
        if self.input(&leaving.field).is_empty() {
            self.warnings[from] = None;
        }
        if leaving.greeting.source_field().is_some() {
            self.personalized = None;
            self.greeting_inserted = false;
        }

        self.current -= 1;
        tracing::debug!(from, to = self.current, "Wizard retreated");
        Navigation::Moved {
            from,
            to: self.current,
        }
    }

    /// Record a radio choice on the active step. When it validates, the
    /// returned ticket should be passed to [`Self::complete_auto_advance`]
    /// after its delay.
    pub fn select_radio(&mut self, value: &str) -> EnrollResult<Option<AutoAdvance>> {
        let step = &self.steps[self.current];
        if step.kind != InputKind::Radio {
            return Err(EnrollError::Structure(format!(
                "step '{}' has no radio options",
                step.field
            )));
        }
        let field = step.field.clone();
        self.inputs.insert(field, value.to_string());

        Ok(self.validate_current().then(|| AutoAdvance {
            step: self.current,
            delay: self.config.auto_advance_delay(),
        }))
    }

    /// Perform a delayed radio advance, unless the user navigated away in
    /// the meantime.
    pub fn complete_auto_advance(&mut self, ticket: AutoAdvance) -> Navigation {
        if ticket.step != self.current {
            tracing::debug!(
                ticket = ticket.step,
                current = self.current,
                "Dropping stale auto-advance"
            );
            return Navigation::Blocked;
        }
        self.advance()
    }

    /// Record a dropdown choice. The option value becomes the field input and
    /// the label is kept as the selected interest.
    pub fn select_option(&mut self, value: &str, label: &str) -> EnrollResult<()> {
        let index = self
            .steps
            .iter()
            .position(|s| s.kind == InputKind::Dropdown)
            .ok_or_else(|| EnrollError::Structure("wizard has no dropdown step".to_string()))?;

        self.inputs
            .insert(self.steps[index].field.clone(), value.to_string());
        self.selected_interest = Some(label.to_string());
        self.warnings[index] = None;
        if index == self.current {
            self.progression_enabled = true;
        }
        Ok(())
    }

    /// Greeting for a step, if it can be shown yet.
    pub fn greeting_for(&self, index: usize) -> Option<String> {
        match &self.steps.get(index)?.greeting {
            Greeting::Static(text) => Some(text.clone()),
            Greeting::Personalized { .. } => self.personalized.clone(),
        }
    }

    /// Greeting lines available right now, in step order.
    pub fn greeting_lines(&self) -> Vec<String> {
        (0..self.steps.len())
            .filter_map(|index| self.greeting_for(index))
            .collect()
    }

    /// Progress bar width in percent for a bar `container_px` wide.
    pub fn progress_width_percent(&self, container_px: f64) -> f64 {
        let last = self.steps.len() - 1;
        if last == 0 {
            return 100.0;
        }
        let percent = self.current as f64 / last as f64 * 100.0;
        if self.current == last {
            return percent;
        }
        if container_px <= 0.0 {
            return 0.0;
        }

        let adjusted = percent / 100.0 * container_px - self.config.progress_inset_px;
        if adjusted < 0.0 {
            0.0
        } else {
            adjusted / container_px * 100.0
        }
    }

    pub fn view(&self) -> WizardView {
        let step = &self.steps[self.current];
        WizardView {
            step_number: self.current + 1,
            total: self.steps.len(),
            greeting: self.greeting_for(self.current).unwrap_or_default(),
            sub_greeting: step.sub_greeting.clone(),
            warning: self.warnings[self.current].clone(),
            prev_enabled: !self.is_first(),
            next_visible: !self.is_last(),
            submit_visible: self.is_last(),
            progression_enabled: self.progression_enabled,
        }
    }

    /// Validate the final step and gather every value for submission.
    pub fn prepare_submission(&mut self) -> EnrollResult<FormPayload> {
        if !self.is_last() {
            return Err(EnrollError::InvalidOperation(
                "submission is only available on the last step".to_string(),
            ));
        }
        if !self.validate_current() {
            return Err(EnrollError::Validation(
                self.warning().unwrap_or(WARN_FILL_OUT).to_string(),
            ));
        }

        let field = self.steps[self.current].field.clone();
        let value = self.input(&field).to_string();
        self.collected.insert(field, value);

        let mut payload = self.hidden.clone();
        for step in &self.steps {
            payload.insert(step.field.clone(), self.input(&step.field).to_string());
        }
        Ok(payload)
    }

    /// Validate, show the loader, post the collected data once, and report
    /// failure through `notifier`.
    pub async fn submit<S, N>(
        &mut self,
        submitter: &S,
        notifier: &N,
        loader: &Loader,
    ) -> EnrollResult<SubmitOutcome>
    where
        S: Submitter,
        N: Notifier + ?Sized,
    {
        let payload = self.prepare_submission()?;
        Ok(submit::run_submission(payload, submitter, notifier, loader).await)
    }

    fn index_of(&self, field: &str) -> EnrollResult<usize> {
        self.steps
            .iter()
            .position(|s| s.field == field)
            .ok_or_else(|| EnrollError::Structure(format!("unknown wizard field '{field}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> StepWizard {
        StepWizard::complete_profile("ada99", WizardConfig::default()).unwrap()
    }

    #[test]
    fn empty_wizard_is_structural_error() {
        let err = StepWizard::new(vec![], [], WizardConfig::default()).unwrap_err();
        assert!(matches!(err, EnrollError::Structure(_)));
    }

    #[test]
    fn greeting_source_must_precede() {
        let steps = vec![
            StepDefinition::new("gender", InputKind::Radio, "", "")
                .personalized("nickname", "Hi {}"),
            StepDefinition::new("nickname", InputKind::Text, "", ""),
        ];
        assert!(StepWizard::new(steps, [], WizardConfig::default()).is_err());
    }

    #[test]
    fn unknown_field_is_structural_error() {
        let mut w = wizard();
        assert!(matches!(
            w.set_input("favourite_colour", "blue"),
            Err(EnrollError::Structure(_))
        ));
    }

    #[test]
    fn empty_text_warns_fill_out() {
        let mut w = wizard();
        assert!(!w.validate_current());
        assert_eq!(w.warning(), Some(WARN_FILL_OUT));
        assert!(!w.progression_enabled());
    }

    #[test]
    fn typing_revalidates_live() {
        let mut w = wizard();
        w.set_input("fullname", "Ada3").unwrap();
        assert_eq!(w.warning(), Some(WARN_NAME));
        assert!(!w.progression_enabled());

        w.set_input("fullname", "Ada Lovelace").unwrap();
        assert_eq!(w.warning(), None);
        assert!(w.progression_enabled());
    }

    #[test]
    fn phone_input_is_masked() {
        let mut w = wizard();
        let stored = w.set_input("phone", "812345678901").unwrap().to_string();
        assert_eq!(stored, "812-345-678-901");
    }

    #[test]
    fn advance_blocked_then_moves() {
        let mut w = wizard();
        assert_eq!(w.advance(), Navigation::Blocked);
        assert_eq!(w.current_index(), 0);

        w.set_input("fullname", "Ada Lovelace").unwrap();
        assert_eq!(w.advance(), Navigation::Moved { from: 0, to: 1 });
        assert_eq!(w.collected().get("fullname").map(String::as_str), Some("Ada Lovelace"));
    }

    #[test]
    fn retreat_at_first_step_is_boundary() {
        let mut w = wizard();
        assert_eq!(w.retreat(), Navigation::AtBoundary);
    }

    #[test]
    fn retreat_clears_empty_warning_and_enables_progression() {
        let mut w = wizard();
        w.set_input("fullname", "Ada").unwrap();
        w.advance();
        assert!(!w.validate_current());
        assert_eq!(w.retreat(), Navigation::Moved { from: 1, to: 0 });
        assert!(w.progression_enabled());
        w.set_input("fullname", "Ada").unwrap();
        w.advance();
        assert_eq!(w.warning(), None);
    }

    #[test]
    fn navigation_chrome() {
        let mut w = wizard();
        let view = w.view();
        assert_eq!(view.step_number, 1);
        assert!(!view.prev_enabled);
        assert!(view.next_visible);
        assert!(!view.submit_visible);
        assert_eq!(view.greeting, "Hey, ada99! Great to have you here.");

        w.set_input("fullname", "Ada").unwrap();
        w.advance();
        assert!(w.view().prev_enabled);
    }

    #[test]
    fn progress_width_subtracts_inset() {
        let mut w = wizard();
        assert_eq!(w.progress_width_percent(400.0), 0.0);

        w.set_input("fullname", "Ada").unwrap();
        w.advance();
        // 1/5 of 400px = 80px, minus 8px inset = 72px = 18%
        assert!((w.progress_width_percent(400.0) - 18.0).abs() < 1e-9);
    }

    #[test]
    fn radio_requires_radio_step() {
        let mut w = wizard();
        assert!(w.select_radio("Male").is_err());
    }

    #[test]
    fn dropdown_clears_warning() {
        let mut w = wizard();
        w.select_option("IT", "Information Technology").unwrap();
        assert_eq!(w.warnings[4], None);
        assert_eq!(w.selected_interest(), Some("Information Technology"));
        assert_eq!(w.input("interest"), "IT");
    }

    #[test]
    fn blank_dropdown_choice_does_not_validate() {
        let mut w = wizard();
        w.current = 4;
        w.select_option("", "").unwrap();
        assert!(!w.validate_current());
        assert_eq!(w.warning(), Some(WARN_INTEREST));
        assert!(!w.progression_enabled());
    }

    #[test]
    fn submission_only_from_last_step() {
        let mut w = wizard();
        assert!(matches!(
            w.prepare_submission(),
            Err(EnrollError::InvalidOperation(_))
        ));
    }
}
