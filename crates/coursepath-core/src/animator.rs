//! Hover-driven profile completion animation.
//!
//! The profile header carries an overlay that fills a "wave" up to the
//! user's completion percentage while the pointer hovers it and drains it
//! again when the pointer leaves.
//!
//! ## State machine
//!
//! ```text
//!            pointer enters
//!   Idle ───────────────────────▶ AnimatingUp
//!    ▲  ▲                            │
//!    │  │ completes, pointer inside  │ completes, pointer outside
//!    │  └────────────────────────────┤ (after settle delay)
//!    │                               ▼
//!    │ completes, pointer outside  AnimatingDown
//!    └───────────────────────────────┤
//!                                    │ completes, pointer entered during run
//!                                    └──────────▶ AnimatingUp
//! ```
//!
//! - A run is never interrupted. Reversal requests are recorded and honored
//!   strictly after the in-flight run completes.
//! - At most one debounced down timer exists; pointer re-entry cancels it.
//! - Every handler body runs under one short lock, so check-then-set is
//!   atomic and no lock is held across an `.await`.
//!
//! Rendering is decoupled: the animator publishes [`Frame`]s on a
//! `tokio::sync::watch` channel. The same channel is the completion signal;
//! [`HoverProgressAnimator::wait_idle`] resolves when the phase returns to
//! [`Phase::Idle`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::AnimationConfig;

/// Pause between the last down tick and hiding the wave.
const FADE_OUT_DELAY: Duration = Duration::from_millis(50);

/// Current animation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AnimatingUp,
    AnimatingDown,
}

impl Phase {
    pub fn is_animating(self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// What the overlay should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub phase: Phase,
    /// Percentage shown in the overlay text
    pub percent: u8,
    /// Whether the wave background and percentage are faded in
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

#[derive(Default)]
struct State {
    phase: Phase,
    pointer_inside: bool,
    /// Wave is filled to the target (an up run finished and no down run has since)
    raised: bool,
    /// Pointer entered while a down run was in flight
    queued_up: bool,
    pending_down: Option<JoinHandle<()>>,
    /// Bumped on every schedule so a stale timer can tell it was replaced
    timer_seq: u64,
    running: Option<JoinHandle<()>>,
    intro: Option<JoinHandle<()>>,
    intro_seq: u64,
}

struct Inner {
    target: u8,
    config: AnimationConfig,
    state: Mutex<State>,
    frames: watch::Sender<Frame>,
}

/// Interruptible up/down progress animation bound to one hover region.
///
/// Cheap to clone; clones drive the same animation. Must be used from
/// within a tokio runtime.
#[derive(Clone)]
pub struct HoverProgressAnimator {
    inner: Arc<Inner>,
}

impl HoverProgressAnimator {
    /// Create an animator for a completion percentage. Values above 100 are clamped.
    pub fn new(progress: u8, config: AnimationConfig) -> Self {
        let (frames, _) = watch::channel(Frame::default());
        Self {
            inner: Arc::new(Inner {
                target: progress.min(100),
                config,
                state: Mutex::new(State::default()),
                frames,
            }),
        }
    }

    pub fn progress(&self) -> u8 {
        self.inner.target
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.lock().phase
    }

    pub fn is_pointer_inside(&self) -> bool {
        self.inner.state.lock().pointer_inside
    }

    /// Whether a debounced down transition is scheduled but not yet started.
    pub fn has_pending_down(&self) -> bool {
        self.inner.state.lock().pending_down.is_some()
    }

    pub fn frame(&self) -> Frame {
        *self.inner.frames.borrow()
    }

    /// Subscribe to rendered frames.
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.inner.frames.subscribe()
    }

    /// Pointer entered the overlay.
    pub fn pointer_enter(&self) {
        let mut state = self.inner.state.lock();
        state.pointer_inside = true;
        if let Some(timer) = state.pending_down.take() {
            timer.abort();
            tracing::trace!("Cancelled pending down animation");
        }

        match state.phase {
            Phase::Idle => {
                let settle = self.inner.config.settle_delay();
                Inner::start(&self.inner, &mut state, Direction::Up, settle);
            }
            Phase::AnimatingUp => {}
            Phase::AnimatingDown => {
                state.queued_up = true;
                tracing::trace!("Up animation queued behind running down animation");
            }
        }
    }

    /// Pointer left the overlay.
    pub fn pointer_leave(&self) {
        let mut state = self.inner.state.lock();
        state.pointer_inside = false;

        // Running animations decide on completion.
        if state.phase == Phase::Idle && state.raised {
            let settle = self.inner.config.settle_delay();
            Inner::schedule_down(&self.inner, &mut state, settle);
        }
    }

    /// Page-load sequence: after the intro delay, fill the wave once and
    /// drain it after the intro hold unless the pointer is inside by then.
    pub fn play_intro(&self) {
        let mut state = self.inner.state.lock();
        state.intro_seq += 1;
        let seq = state.intro_seq;
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.config.intro_delay()).await;
            let mut state = inner.state.lock();
            if state.intro_seq != seq {
                return;
            }
            state.intro = None;
            if state.phase == Phase::Idle && !state.raised {
                let hold = inner.config.intro_hold();
                Inner::start(&inner, &mut state, Direction::Up, hold);
            } else {
                inner.frames.send_modify(|_| {});
            }
        });

        if let Some(previous) = state.intro.replace(handle) {
            previous.abort();
        }
    }

    /// Resolve at the next published Idle frame, or at once if the latest
    /// frame is already Idle. A down run with a queued reversal publishes no
    /// Idle frame before the up run starts, so this also waits out that up run.
    pub async fn wait_idle(&self) {
        let mut rx = self.inner.frames.subscribe();
        let _ = rx.wait_for(|frame| frame.phase == Phase::Idle).await;
    }

    /// Resolve once the animator is Idle with no timer pending.
    pub async fn settled(&self) {
        let mut rx = self.inner.frames.subscribe();
        loop {
            {
                let state = self.inner.state.lock();
                if state.phase == Phase::Idle
                    && state.pending_down.is_none()
                    && state.intro.is_none()
                {
                    return;
                }
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Abort every run and timer; the page is going away.
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        for handle in [
            state.running.take(),
            state.pending_down.take(),
            state.intro.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
        state.queued_up = false;
        self.inner.set_phase(&mut state, Phase::Idle);
        tracing::debug!("Hover animator shut down");
    }
}

impl Inner {
    fn set_phase(&self, state: &mut State, phase: Phase) {
        state.phase = phase;
        self.frames.send_modify(|frame| frame.phase = phase);
    }

    /// Begin a run. `hold` is how long to wait before draining once an up run
    /// finishes with the pointer outside.
    fn start(inner: &Arc<Self>, state: &mut State, direction: Direction, hold: Duration) {
        let phase = match direction {
            Direction::Up => Phase::AnimatingUp,
            Direction::Down => Phase::AnimatingDown,
        };
        if state.phase == phase {
            return;
        }
        inner.set_phase(state, phase);
        tracing::debug!(?direction, target = inner.target, "Animation started");

        let task_inner = Arc::clone(inner);
        state.running = Some(tokio::spawn(async move {
            task_inner.sweep(direction).await;
            Inner::complete(&task_inner, direction, hold);
        }));
    }

    fn schedule_down(inner: &Arc<Self>, state: &mut State, delay: Duration) {
        if let Some(previous) = state.pending_down.take() {
            previous.abort();
        }
        state.timer_seq += 1;
        let seq = state.timer_seq;

        let task_inner = Arc::clone(inner);
        state.pending_down = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = task_inner.state.lock();
            if state.timer_seq != seq {
                return;
            }
            state.pending_down = None;
            if !state.pointer_inside && state.phase == Phase::Idle {
                let settle = task_inner.config.settle_delay();
                Inner::start(&task_inner, &mut state, Direction::Down, settle);
            } else {
                // Wake `settled()` waiters; nothing else changed.
                task_inner.frames.send_modify(|_| {});
            }
        }));
    }

    fn complete(inner: &Arc<Self>, direction: Direction, hold: Duration) {
        let mut state = inner.state.lock();
        state.running = None;

        match direction {
            Direction::Up => {
                state.raised = true;
                inner.set_phase(&mut state, Phase::Idle);
                if !state.pointer_inside {
                    Inner::schedule_down(inner, &mut state, hold);
                }
            }
            Direction::Down => {
                state.raised = false;
                if std::mem::take(&mut state.queued_up) {
                    // Flip straight to the up run; no Idle frame in between.
                    state.phase = Phase::Idle;
                    let settle = inner.config.settle_delay();
                    Inner::start(inner, &mut state, Direction::Up, settle);
                } else {
                    inner.set_phase(&mut state, Phase::Idle);
                }
            }
        }
        tracing::debug!(?direction, phase = ?state.phase, "Animation completed");
    }

    /// Step the percentage one unit per tick. A zero target has nothing to
    /// sweep and completes at once.
    async fn sweep(&self, direction: Direction) {
        if direction == Direction::Up {
            self.frames.send_modify(|frame| {
                frame.percent = 0;
                frame.visible = true;
            });
        }

        if self.target > 0 {
            let tick = self.config.duration() / u32::from(self.target);
            match direction {
                Direction::Up => {
                    for percent in 1..=self.target {
                        tokio::time::sleep(tick).await;
                        self.frames.send_modify(|frame| frame.percent = percent);
                    }
                }
                Direction::Down => {
                    for percent in (0..self.target).rev() {
                        tokio::time::sleep(tick).await;
                        self.frames.send_modify(|frame| frame.percent = percent);
                    }
                }
            }
        }

        if direction == Direction::Down {
            tokio::time::sleep(FADE_OUT_DELAY).await;
            self.frames.send_modify(|frame| {
                frame.percent = 0;
                frame.visible = false;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator(progress: u8) -> HoverProgressAnimator {
        HoverProgressAnimator::new(progress, AnimationConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn enter_from_idle_starts_up() {
        let anim = animator(40);
        anim.pointer_enter();
        assert_eq!(anim.phase(), Phase::AnimatingUp);

        anim.wait_idle().await;
        assert_eq!(anim.frame().percent, 40);
        assert!(anim.frame().visible);
        assert!(!anim.has_pending_down());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_target_completes_without_ticks() {
        let anim = animator(0);
        anim.pointer_enter();
        anim.wait_idle().await;
        assert_eq!(anim.frame().percent, 0);
        assert_eq!(anim.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_is_clamped() {
        assert_eq!(animator(150).progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn leave_without_raise_does_nothing() {
        let anim = animator(60);
        anim.pointer_leave();
        assert!(!anim.has_pending_down());
        assert_eq!(anim.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reenter_within_settle_cancels_down() {
        let anim = animator(50);
        anim.pointer_enter();
        anim.wait_idle().await;

        anim.pointer_leave();
        assert!(anim.has_pending_down());
        tokio::time::sleep(Duration::from_millis(10)).await;
        anim.pointer_enter();
        assert!(!anim.has_pending_down());
        assert_eq!(anim.phase(), Phase::AnimatingUp);

        anim.settled().await;
        assert_eq!(anim.frame().percent, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_aborts_run() {
        let anim = animator(80);
        anim.pointer_enter();
        tokio::time::sleep(Duration::from_millis(100)).await;
        anim.shutdown();
        assert_eq!(anim.phase(), Phase::Idle);
        let shown = anim.frame().percent;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(anim.frame().percent, shown);
    }
}
