use std::time::Duration;

use crate::config::{Axis, SlideConfig, SlideMode};
use crate::scene_graph::{ObjectId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    Backward,
    #[default]
    Stopped,
    Forward,
}

impl SlideDirection {
    pub fn sign(self) -> f32 {
        match self {
            SlideDirection::Backward => -1.0,
            SlideDirection::Stopped => 0.0,
            SlideDirection::Forward => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SlideDirection::Backward => SlideDirection::Forward,
            SlideDirection::Stopped => SlideDirection::Stopped,
            SlideDirection::Forward => SlideDirection::Backward,
        }
    }
}

/// `start_time` is only set while the direction is not `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideState {
    pub direction: SlideDirection,
    pub start_time: Option<Duration>,
}

/// What a single `advance` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideStep {
    /// Not sliding; nothing moved.
    Idle,
    /// Parts moved. `reversed` is set when one of them left the bounds, so the
    /// next frame moves the other way.
    Moved { reversed: bool },
    /// Parts moved one last time, then the slide stopped because it ran past
    /// its cutoff.
    Stopped,
}

/// Slides sets of parts ("lanes", one per side-model instance) back and forth
/// between configured bounds.
pub struct SlideAnimator {
    state: SlideState,
    config: SlideConfig,
    lanes: Vec<Vec<ObjectId>>,
}

impl SlideAnimator {
    pub fn new(config: SlideConfig) -> Self {
        Self {
            state: SlideState::default(),
            config,
            lanes: Vec::new(),
        }
    }

    pub fn add_lane(&mut self, parts: Vec<ObjectId>) {
        self.lanes.push(parts);
    }

    pub fn lanes(&self) -> &[Vec<ObjectId>] {
        &self.lanes
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn direction(&self) -> SlideDirection {
        self.state.direction
    }

    pub fn is_sliding(&self) -> bool {
        self.state.direction != SlideDirection::Stopped
    }

    pub fn start(&mut self, now: Duration) {
        self.state = SlideState {
            direction: SlideDirection::Forward,
            start_time: Some(now),
        };
        log::info!("Slide started");
    }

    pub fn stop(&mut self) {
        self.state = SlideState::default();
        log::info!("Slide stopped");
    }

    /// Starts a stopped slide or stops a running one. Returns whether the
    /// slide is running afterwards.
    pub fn toggle(&mut self, now: Duration) -> bool {
        if self.is_sliding() {
            self.stop();
        } else {
            self.start(now);
        }

        self.is_sliding()
    }

    pub fn advance(&mut self, scene: &mut Scene, now: Duration) -> SlideStep {
        if !self.is_sliding() {
            return SlideStep::Idle;
        }

        let delta = self.config.speed * self.state.direction.sign();

        let mut out_of_bounds = false;
        for lane in &self.lanes {
            // No short-circuit: every lane moves even after one overflows.
            out_of_bounds |= match &self.config.mode {
                SlideMode::Translate { axis, min, max } => {
                    translate_lane(scene, lane, *axis, delta, (*min, *max))
                }
                SlideMode::Converge {
                    axis,
                    min,
                    max,
                    order,
                    target,
                    settle_epsilon,
                    easing,
                } => converge_lane(
                    scene,
                    lane,
                    &Converge {
                        axis: *axis,
                        bounds: (*min, *max),
                        order,
                        target,
                        settle_epsilon: *settle_epsilon,
                        easing: *easing,
                    },
                    delta,
                ),
            };
        }

        if out_of_bounds {
            self.state.direction = self.state.direction.reversed();
            log::debug!("Slide reversed to {:?}", self.state.direction);
        }

        // The cutoff frame still moves; the slide halts afterwards.
        let expired = self
            .state
            .start_time
            .is_some_and(|start_time| now.saturating_sub(start_time) > self.config.cutoff());
        if expired {
            self.stop();
            return SlideStep::Stopped;
        }

        SlideStep::Moved {
            reversed: out_of_bounds,
        }
    }
}

fn outside(value: f32, (min, max): (f32, f32)) -> bool {
    value > max || value < min
}

fn translate_lane(
    scene: &mut Scene,
    lane: &[ObjectId],
    axis: Axis,
    delta: f32,
    bounds: (f32, f32),
) -> bool {
    let mut out_of_bounds = false;

    for &id in lane {
        let Some(object) = scene.get_object_mut(id) else {
            continue;
        };

        object.transform.translate(axis.unit() * delta);
        out_of_bounds |= outside(axis.component(object.transform.translation()), bounds);
    }

    out_of_bounds
}

struct Converge<'a> {
    axis: Axis,
    bounds: (f32, f32),
    order: &'a [String],
    target: &'a str,
    settle_epsilon: f32,
    easing: f32,
}

/// Eases every ordered part toward `target + (rank - target_rank) * delta`
/// along the axis, covering `easing` of the remaining distance per frame.
fn converge_lane(scene: &mut Scene, lane: &[ObjectId], params: &Converge, delta: f32) -> bool {
    let Some(target_rank) = params.order.iter().position(|name| name == params.target) else {
        return false;
    };

    let target_position = lane
        .iter()
        .filter_map(|id| scene.get_object(*id))
        .filter(|object| object.name == params.target)
        .last()
        .map(|object| params.axis.component(object.transform.translation()))
        .unwrap_or(0.0);

    let mut out_of_bounds = false;

    for &id in lane {
        let Some(object) = scene.get_object_mut(id) else {
            continue;
        };

        if object.name == params.target {
            continue;
        }

        let Some(rank) = params.order.iter().position(|name| *name == object.name) else {
            continue;
        };

        let desired = target_position + (rank as f32 - target_rank as f32) * delta;
        let translation = object.transform.translation();
        let current = params.axis.component(translation);

        if (current - desired).abs() > params.settle_epsilon {
            let eased = current + (desired - current) * params.easing;
            object
                .transform
                .set_translation(params.axis.with_component(translation, eased));
        }

        out_of_bounds |= outside(
            params.axis.component(object.transform.translation()),
            params.bounds,
        );
    }

    out_of_bounds
}
