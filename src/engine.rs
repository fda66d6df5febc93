use std::time::Duration;

use crate::demo::DemoState;
use configurator::FrameEvents;

/// Simulated frame period.
pub const FRAME_STEP: Duration = Duration::from_millis(16);

/// Upper bound on the simulated session, in case a config never settles.
const MAX_SESSION: Duration = Duration::from_secs(60);

pub fn update(state: &mut DemoState, now: Duration) -> FrameEvents {
    state.scene.early_update();
    state.run_due_actions(now);
    let events = state.update(now);

    if events.slide_stopped() {
        log::info!("Slide reached its time limit at {:.2}s", now.as_secs_f32());
    }

    log::trace!(
        "t={:.3}s: {} transforms written",
        now.as_secs_f32(),
        state.scene.changed_objects().count()
    );

    events
}

/// Drives the demo with a fixed-step clock until every animation has settled.
pub fn run(mut state: DemoState) {
    let mut now = Duration::ZERO;
    let mut frames = 0u32;

    while now <= MAX_SESSION {
        let events = update(&mut state, now);

        if frames % 60 == 0 {
            log::debug!(
                "t={:.2}s slide={:?} rotation={:?} angle={:?}",
                now.as_secs_f32(),
                state.viewer.slide().direction(),
                events.rotation_phase,
                events.rotation_angle,
            );
        }

        if state.is_finished() {
            break;
        }

        now += FRAME_STEP;
        frames += 1;
    }

    log::info!(
        "Session finished after {frames} frames ({:.2}s simulated)",
        now.as_secs_f32()
    );

    for indicator in state.viewer.index().indicators().iter() {
        log::info!(
            "LED for {}: {}",
            state.viewer.part_label(&state.scene, indicator.host),
            if indicator.is_enabled() { "on" } else { "off" }
        );
    }
}
