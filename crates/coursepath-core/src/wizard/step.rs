//! Step definitions for the profile wizard.

use serde::{Deserialize, Serialize};

/// How a step collects its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text checked against the name pattern
    Text,
    /// `YYYY-MM-DD` birth date
    Date,
    /// Phone number, masked while typing
    Tel,
    /// One of several cards; selecting one auto-advances
    Radio,
    /// Custom dropdown; the label is tracked out of band
    Dropdown,
    /// Carried along with the submission, never shown
    Hidden,
}

impl InputKind {
    /// Kinds whose empty value triggers the generic "fill out" warning.
    pub fn has_direct_input(self) -> bool {
        matches!(self, InputKind::Text | InputKind::Date | InputKind::Tel)
    }
}

/// Heading shown above a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Greeting {
    Static(String),
    /// Computed from another step's confirmed value. `template` contains a
    /// single `{}` placeholder.
    Personalized {
        source_field: String,
        template: String,
    },
}

impl Greeting {
    pub fn render(&self, value: &str) -> String {
        match self {
            Greeting::Static(text) => text.clone(),
            Greeting::Personalized { template, .. } => template.replacen("{}", value, 1),
        }
    }

    pub fn source_field(&self) -> Option<&str> {
        match self {
            Greeting::Static(_) => None,
            Greeting::Personalized { source_field, .. } => Some(source_field),
        }
    }
}

/// One screen of the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    /// Form field name the step's value is submitted under
    pub field: String,
    pub kind: InputKind,
    pub greeting: Greeting,
    pub sub_greeting: String,
}

impl StepDefinition {
    pub fn new(
        field: impl Into<String>,
        kind: InputKind,
        greeting: impl Into<String>,
        sub_greeting: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            greeting: Greeting::Static(greeting.into()),
            sub_greeting: sub_greeting.into(),
        }
    }

    /// Replace the static greeting with one computed from `source_field`.
    pub fn personalized(mut self, source_field: impl Into<String>, template: impl Into<String>) -> Self {
        self.greeting = Greeting::Personalized {
            source_field: source_field.into(),
            template: template.into(),
        };
        self
    }
}

/// Interest options offered by the dropdown step: `(value, label)`.
pub const INTEREST_OPTIONS: &[(&str, &str)] = &[
    ("IT", "Information Technology"),
    ("EMP", "Engineering, Math, and Physics"),
    ("LNJ", "Law and Justice"),
    ("HCS", "History and Cultural Studies"),
    ("SPE", "Sport and Physical Education"),
    ("SIS", "Social and International Studies"),
    ("HMB", "Health, Medicine, and Biological Sciences"),
    ("ENS", "Environmental Studies and Sustainability"),
];

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];

/// The "complete your profile" flow shown after sign-up.
pub fn complete_profile_steps(username: &str) -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "fullname",
            InputKind::Text,
            format!("Hey, {username}! Great to have you here."),
            "Let's get to know you a bit better, shall we? You can start by sharing your full name with us.",
        ),
        StepDefinition::new(
            "nickname",
            InputKind::Text,
            "Thanks! Now, what should we call you?",
            "This will help to greet you in the future.",
        ),
        StepDefinition::new(
            "gender",
            InputKind::Radio,
            "",
            "Could you let us know your gender? This will help us personalize your experience even more!",
        )
        .personalized("nickname", "Nice to meet you, {}!"),
        StepDefinition::new(
            "phone",
            InputKind::Tel,
            "That's great! Next, what number can we contact you at?",
            "No worries! It's just between you and us.",
        ),
        StepDefinition::new(
            "interest",
            InputKind::Dropdown,
            "Awesome! What is interest you the most?",
            "This will help us provide resources tailored to your needs.",
        ),
        StepDefinition::new(
            "birth_date",
            InputKind::Date,
            "Almost done! Finally, could you share your birth date with us?",
            "We might have something special for you on your special day!",
        ),
    ]
}
