//! Profile completion ring
//!
//! An SVG circle whose stroke offset animates from empty to the completion
//! percentage shortly after mount.

use std::time::Duration;

use coursepath_core::profile::{completion_ring, RingGeometry};
use dioxus::prelude::*;

/// Delay before the fill transition starts.
pub const RING_FILL_DELAY: Duration = Duration::from_millis(50);

/// Stroke style for the ring, empty or filled.
pub fn ring_stroke_style(geometry: &RingGeometry, filled: bool) -> String {
    let offset = if filled {
        geometry.offset
    } else {
        geometry.circumference
    };
    format!(
        "stroke-dasharray: {c:.3} {c:.3}; stroke-dashoffset: {offset:.3}; transition: stroke-dashoffset 1s ease;",
        c = geometry.circumference,
    )
}

/// Properties for the ProgressRing component
#[derive(Clone, PartialEq, Props)]
pub struct ProgressRingProps {
    pub percent: f64,
    #[props(default = 20.0)]
    pub radius: f64,
    #[props(default = 4.0)]
    pub stroke: f64,
}

#[component]
pub fn ProgressRing(props: ProgressRingProps) -> Element {
    let geometry = completion_ring(props.radius, props.percent);
    let mut filled = use_signal(|| false);

    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(RING_FILL_DELAY).await;
            filled.set(true);
        });
    });

    let size = (props.radius + props.stroke) * 2.0;
    let center = size / 2.0;
    let style = ring_stroke_style(&geometry, filled());

    rsx! {
        svg {
            class: "progress-ring",
            width: "{size}",
            height: "{size}",
            circle {
                class: "progress-ring-track",
                r: "{props.radius}",
                cx: "{center}",
                cy: "{center}",
                stroke_width: "{props.stroke}",
                fill: "transparent",
            }
            circle {
                class: "progress-ring-fill",
                r: "{props.radius}",
                cx: "{center}",
                cy: "{center}",
                stroke_width: "{props.stroke}",
                fill: "transparent",
                style: "{style}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ring_hides_stroke() {
        let geometry = completion_ring(10.0, 75.0);
        let style = ring_stroke_style(&geometry, false);
        let c = format!("{:.3}", geometry.circumference);
        assert!(style.contains(&format!("stroke-dashoffset: {c}")));
    }

    #[test]
    fn filled_ring_uses_offset() {
        let geometry = completion_ring(10.0, 100.0);
        let style = ring_stroke_style(&geometry, true);
        assert!(style.contains("stroke-dashoffset: 0.000"));
    }
}
