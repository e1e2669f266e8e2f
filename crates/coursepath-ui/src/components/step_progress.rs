//! Wizard step progress bar

use dioxus::prelude::*;

/// Inline style for the filled part of the bar.
pub fn bar_fill_style(width_percent: f64) -> String {
    format!("width: {:.2}%;", width_percent.clamp(0.0, 100.0))
}

/// Properties for the StepProgress component
#[derive(Clone, PartialEq, Props)]
pub struct StepProgressProps {
    /// 1-based
    pub step_number: usize,
    pub total: usize,
    /// From `StepWizard::progress_width_percent`
    pub width_percent: f64,
}

/// "Step n of m" header with a filling bar and one dot per step
#[component]
pub fn StepProgress(props: StepProgressProps) -> Element {
    let style = bar_fill_style(props.width_percent);

    rsx! {
        div { class: "step-progress",
            span { class: "step-count", "Step {props.step_number} of {props.total}" }
            div { class: "progress-bar",
                div { class: "progress-bar-fill", style: "{style}" }
                for index in 1..=props.total {
                    span {
                        key: "{index}",
                        class: if index <= props.step_number { "progress-dot reached" } else { "progress-dot" },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_style_is_clamped() {
        assert_eq!(bar_fill_style(18.0), "width: 18.00%;");
        assert_eq!(bar_fill_style(-3.0), "width: 0.00%;");
        assert_eq!(bar_fill_style(140.0), "width: 100.00%;");
    }
}
