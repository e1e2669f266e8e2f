//! Input Field Components
//!
//! Wizard inputs show their warning underneath; the phone and date masks are
//! applied by the wizard, so the value passed back in is already masked.

use coursepath_core::InputKind;
use dioxus::prelude::*;

/// HTML `type` attribute for a wizard input kind.
pub fn html_input_type(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Date => "date",
        InputKind::Tel => "tel",
        InputKind::Hidden => "hidden",
        InputKind::Text | InputKind::Radio | InputKind::Dropdown => "text",
    }
}

/// Properties for the StepInput component
#[derive(Clone, PartialEq, Props)]
pub struct StepInputProps {
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default = InputKind::Text)]
    pub kind: InputKind,
    #[props(default)]
    pub placeholder: Option<String>,
    /// Warning text; marks the field invalid when present
    #[props(default)]
    pub warning: Option<String>,
    #[props(default)]
    pub id: Option<String>,
}

/// Single wizard text, phone or date field
#[component]
pub fn StepInput(props: StepInputProps) -> Element {
    let input_class = if props.warning.is_some() {
        "input-field invalid"
    } else {
        "input-field"
    };
    let id = props.id.clone().unwrap_or_default();

    rsx! {
        div { class: "form-field",
            input {
                id: "{id}",
                class: "{input_class}",
                r#type: html_input_type(props.kind),
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                oninput: move |e| props.oninput.call(e.value()),
            }
            if let Some(warning) = &props.warning {
                p { class: "input-warning", "{warning}" }
            }
        }
    }
}

/// Properties for the RadioCards component
#[derive(Clone, PartialEq, Props)]
pub struct RadioCardsProps {
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub onselect: EventHandler<String>,
}

/// Card-style radio group; the wizard auto-advances after a choice
#[component]
pub fn RadioCards(props: RadioCardsProps) -> Element {
    rsx! {
        div { class: "radio-cards",
            for option in props.options.iter().cloned() {
                {
                    let checked = props.selected.as_deref() == Some(option.as_str());
                    let value = option.clone();
                    rsx! {
                        label {
                            key: "{option}",
                            class: if checked { "radio-card checked" } else { "radio-card" },
                            input {
                                r#type: "radio",
                                name: "radio-cards",
                                checked,
                                onchange: move |_| props.onselect.call(value.clone()),
                            }
                            span { "{option}" }
                        }
                    }
                }
            }
        }
    }
}

/// Properties for the Dropdown component
#[derive(Clone, PartialEq, Props)]
pub struct DropdownProps {
    /// `(value, label)` pairs
    pub options: Vec<(String, String)>,
    /// Label of the chosen option
    pub selected_label: Option<String>,
    #[props(default = "Select your interest".to_string())]
    pub placeholder: String,
    /// Called with `(value, label)`
    pub onselect: EventHandler<(String, String)>,
}

/// Click-to-open option list
#[component]
pub fn Dropdown(props: DropdownProps) -> Element {
    let mut open = use_signal(|| false);
    let shown = props
        .selected_label
        .clone()
        .unwrap_or_else(|| props.placeholder.clone());

    rsx! {
        div { class: if open() { "dropdown open" } else { "dropdown" },
            div {
                class: "dropdown-selected",
                onclick: move |_| open.toggle(),
                "{shown}"
            }
            if open() {
                ul { class: "dropdown-options",
                    for (value, label) in props.options.iter().cloned() {
                        li {
                            key: "{value}",
                            onclick: move |_| {
                                open.set(false);
                                props.onselect.call((value.clone(), label.clone()));
                            },
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

/// Search input with icon
#[derive(Clone, PartialEq, Props)]
pub struct SearchInputProps {
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default = "Search courses".to_string())]
    pub placeholder: String,
}

#[component]
pub fn SearchInput(props: SearchInputProps) -> Element {
    rsx! {
        div { class: "search-input-wrapper",
            span { class: "search-icon", "\u{1F50D}" }
            input {
                class: "input-field search-input",
                r#type: "search",
                placeholder: "{props.placeholder}",
                value: "{props.value}",
                oninput: move |e| props.oninput.call(e.value()),
            }
        }
    }
}
