//! Sign-up password strength meter

use coursepath_core::auth::PasswordChecks;
use coursepath_core::PasswordStrength;
use dioxus::prelude::*;

/// `(label, passed)` rows of the requirement checklist.
pub fn checklist(checks: &PasswordChecks) -> [(&'static str, bool); 5] {
    [
        ("8 to 32 characters", checks.length),
        ("A lowercase letter", checks.lower),
        ("An uppercase letter", checks.upper),
        ("A number", checks.number),
        ("A special character", checks.special),
    ]
}

#[component]
pub fn StrengthMeter(strength: PasswordStrength) -> Element {
    let color = strength.tier().color();
    let percent = strength.percent;

    rsx! {
        div { class: "strength-container",
            div { class: "strength-bar",
                div {
                    class: "strength-bar-inner",
                    style: "width: {percent}%; background-color: {color};",
                }
            }
            span { class: "strength-percent", style: "color: {color};", "{percent}%" }
            ul { class: "password-indicator",
                for (label, passed) in checklist(&strength.checks) {
                    li {
                        key: "{label}",
                        class: if passed { "check passed" } else { "check" },
                        "{label}"
                    }
                }
            }
        }
    }
}
