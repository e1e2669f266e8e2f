//! Profile Completion Wave
//!
//! Overlay on the profile header. The wave height and the percentage label
//! follow the animator's frames; pointer events are forwarded to the
//! animator, which decides what to run.

use coursepath_core::{Frame, HoverProgressAnimator, Phase};
use dioxus::prelude::*;

/// Inline style for the wave fill.
pub fn wave_style(frame: &Frame) -> String {
    let opacity = if frame.visible { 1 } else { 0 };
    format!("height: {}%; opacity: {};", frame.percent, opacity)
}

/// Class of the overlay root for a frame.
pub fn wave_class(frame: &Frame) -> &'static str {
    match frame.phase {
        Phase::AnimatingUp => "progress-wave rising",
        Phase::AnimatingDown => "progress-wave falling",
        Phase::Idle if frame.visible => "progress-wave raised",
        Phase::Idle => "progress-wave",
    }
}

/// Properties for the ProgressWave component
#[derive(Clone, PartialEq, Props)]
pub struct ProgressWaveProps {
    /// Latest frame from the animator
    pub frame: Frame,
    pub onenter: EventHandler<()>,
    pub onleave: EventHandler<()>,
    pub children: Element,
}

/// Hover region with the completion wave behind its children
#[component]
pub fn ProgressWave(props: ProgressWaveProps) -> Element {
    let style = wave_style(&props.frame);
    let percent = props.frame.percent;

    rsx! {
        div {
            class: wave_class(&props.frame),
            onmouseenter: move |_| props.onenter.call(()),
            onmouseleave: move |_| props.onleave.call(()),
            {props.children}
            div { class: "wave-fill", style: "{style}" }
            span {
                class: "wave-percent",
                style: if props.frame.visible { "opacity: 1;" } else { "opacity: 0;" },
                "{percent}%"
            }
        }
    }
}

/// Mirror an animator's frames into a signal and play the intro once.
///
/// The animator is shut down when the owning component unmounts.
pub fn use_wave_frames(animator: HoverProgressAnimator) -> Signal<Frame> {
    let mut frame = use_signal(|| animator.frame());

    let for_task = animator.clone();
    use_hook(move || {
        spawn(async move {
            let mut rx = for_task.subscribe();
            for_task.play_intro();
            while rx.changed().await.is_ok() {
                let next = *rx.borrow_and_update();
                frame.set(next);
            }
        });
    });

    use_drop(move || {
        tracing::debug!(progress = animator.progress(), "Stopping wave animator");
        animator.shutdown();
    });
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_frame_style() {
        let frame = Frame::default();
        assert_eq!(wave_style(&frame), "height: 0%; opacity: 0;");
        assert_eq!(wave_class(&frame), "progress-wave");
    }

    #[test]
    fn raised_frame_style() {
        let frame = Frame {
            phase: Phase::Idle,
            percent: 70,
            visible: true,
        };
        assert_eq!(wave_style(&frame), "height: 70%; opacity: 1;");
        assert_eq!(wave_class(&frame), "progress-wave raised");
    }

    #[test]
    fn running_frame_classes() {
        let up = Frame {
            phase: Phase::AnimatingUp,
            percent: 10,
            visible: true,
        };
        let down = Frame {
            phase: Phase::AnimatingDown,
            ..up
        };
        assert_eq!(wave_class(&up), "progress-wave rising");
        assert_eq!(wave_class(&down), "progress-wave falling");
    }
}
