//! Sequencing tests for the hover progress animator
//!
//! All tests run on a paused clock so every sleep resolves deterministically.

use std::sync::Arc;
use std::time::Duration;

use coursepath_core::{AnimationConfig, Frame, HoverProgressAnimator, Phase};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

// ============================================================================
// Helpers
// ============================================================================

fn animator(progress: u8) -> HoverProgressAnimator {
    HoverProgressAnimator::new(progress, AnimationConfig::default())
}

/// Record every distinct phase the animator publishes until the channel closes
/// or the task is aborted.
fn record_phases(mut rx: watch::Receiver<Frame>) -> (JoinHandle<()>, Arc<Mutex<Vec<Phase>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let handle = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let phase = rx.borrow_and_update().phase;
            let mut seen = sink.lock();
            if seen.last() != Some(&phase) {
                seen.push(phase);
            }
        }
    });
    (handle, seen)
}

fn count(phases: &[Phase], wanted: Phase) -> usize {
    phases.iter().filter(|p| **p == wanted).count()
}

// ============================================================================
// Runs never overlap
// ============================================================================

#[tokio::test(start_paused = true)]
async fn rapid_toggles_produce_one_down_run() {
    let anim = animator(40);
    let (recorder, phases) = record_phases(anim.subscribe());

    anim.pointer_enter();
    anim.wait_idle().await;

    for _ in 0..5 {
        anim.pointer_leave();
        tokio::time::sleep(Duration::from_millis(10)).await;
        anim.pointer_enter();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    anim.pointer_leave();
    anim.settled().await;
    tokio::task::yield_now().await;
    recorder.abort();

    let phases = phases.lock().clone();
    assert_eq!(count(&phases, Phase::AnimatingDown), 1, "phases: {phases:?}");
    for pair in phases.windows(2) {
        assert_ne!(
            (pair[0], pair[1]),
            (Phase::AnimatingUp, Phase::AnimatingDown),
            "an up run was cut short: {phases:?}"
        );
    }

    let frame = anim.frame();
    assert_eq!(frame.phase, Phase::Idle);
    assert_eq!(frame.percent, 0);
    assert!(!frame.visible);
}

#[tokio::test(start_paused = true)]
async fn leave_during_up_drains_after_completion() {
    let anim = animator(20);
    anim.pointer_enter();
    tokio::time::sleep(Duration::from_millis(500)).await;
    anim.pointer_leave();
    assert_eq!(anim.phase(), Phase::AnimatingUp);
    assert!(!anim.has_pending_down());

    anim.wait_idle().await;
    assert_eq!(anim.frame().percent, 20);
    assert!(anim.has_pending_down());

    anim.settled().await;
    assert!(!anim.frame().visible);
}

// ============================================================================
// Reversal is queued, not applied mid-run
// ============================================================================

#[tokio::test(start_paused = true)]
async fn enter_during_down_queues_up() {
    let anim = animator(40);
    let (recorder, phases) = record_phases(anim.subscribe());

    anim.pointer_enter();
    anim.wait_idle().await;
    anim.pointer_leave();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(anim.phase(), Phase::AnimatingDown);

    anim.pointer_enter();
    assert_eq!(anim.phase(), Phase::AnimatingDown);

    let mut rx = anim.subscribe();
    rx.wait_for(|frame| frame.phase == Phase::AnimatingUp)
        .await
        .unwrap();
    anim.wait_idle().await;
    tokio::task::yield_now().await;
    recorder.abort();

    assert_eq!(
        *phases.lock(),
        vec![
            Phase::AnimatingUp,
            Phase::Idle,
            Phase::AnimatingDown,
            Phase::AnimatingUp,
            Phase::Idle,
        ]
    );
    assert_eq!(anim.frame().percent, 40);
    assert!(anim.frame().visible);
}

#[tokio::test(start_paused = true)]
async fn wait_idle_spans_a_queued_reversal() {
    let anim = animator(40);
    anim.pointer_enter();
    anim.wait_idle().await;
    anim.pointer_leave();
    tokio::time::sleep(Duration::from_millis(60)).await;
    anim.pointer_enter();
    assert_eq!(anim.phase(), Phase::AnimatingDown);

    // The down run hands straight over to the queued up run.
    anim.wait_idle().await;
    assert_eq!(anim.phase(), Phase::Idle);
    assert_eq!(anim.frame().percent, 40);
    assert!(anim.frame().visible);
}

#[tokio::test(start_paused = true)]
async fn repeated_enters_during_up_are_ignored() {
    let anim = animator(10);
    anim.pointer_enter();
    let started = tokio::time::Instant::now();
    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        anim.pointer_enter();
    }
    anim.wait_idle().await;
    assert_eq!(started.elapsed(), AnimationConfig::default().duration());
}

// ============================================================================
// Page-load intro
// ============================================================================

#[tokio::test(start_paused = true)]
async fn intro_fills_holds_and_drains() {
    let anim = animator(40);
    let started = tokio::time::Instant::now();
    anim.play_intro();
    anim.settled().await;

    // 1s delay + 2s up + 2s hold + 2s down + 50ms fade
    assert_eq!(started.elapsed(), Duration::from_millis(7050));
    assert!(!anim.frame().visible);
}

#[tokio::test(start_paused = true)]
async fn intro_keeps_wave_when_pointer_arrives() {
    let anim = animator(40);
    anim.play_intro();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(anim.phase(), Phase::AnimatingUp);

    anim.pointer_enter();
    anim.wait_idle().await;
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(anim.phase(), Phase::Idle);
    assert!(!anim.has_pending_down());
    assert_eq!(anim.frame().percent, 40);
    assert!(anim.frame().visible);
}

#[tokio::test(start_paused = true)]
async fn intro_skipped_when_already_raised() {
    let anim = animator(30);
    anim.play_intro();
    anim.pointer_enter();
    anim.wait_idle().await;

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(anim.phase(), Phase::Idle);
    assert_eq!(anim.frame().percent, 30);
}
