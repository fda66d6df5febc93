//! Selection, resizing, indicator and animation state for the configurator.
//!
//! [`Viewer`] owns every piece of mutable viewer state and exposes one method
//! per user-facing control. The scene graph itself stays with the caller and
//! is passed in by reference.

mod groups;
mod highlight;
mod index;
mod indicators;
mod rotation;
mod slide;
mod snapshots;

use std::time::Duration;

use glam::Vec2;

pub use groups::GroupIndex;
pub use highlight::{HighlightManager, PickProvider};
pub use index::{IndexReport, SceneIndex};
pub use indicators::{Indicator, IndicatorRegistry};
pub use rotation::{RotationAnimator, RotationPhase};
pub use slide::{SlideAnimator, SlideDirection, SlideState, SlideStep};
pub use snapshots::MaterialSnapshots;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::scene_graph::{ObjectId, Scene};

/// One user action, as emitted by the on-screen controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Pick(Option<ObjectId>),
    SelectPart(ObjectId),
    ResizeGroup {
        group: String,
        width: f32,
        height: f32,
        depth: f32,
    },
    SetIndicator {
        id: ObjectId,
        enabled: bool,
    },
    ToggleSlide {
        now: Duration,
    },
    StartRotation {
        now: Duration,
    },
    StopRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Highlighted(Option<ObjectId>),
    Applied,
    Sliding(bool),
    RotationStarted(bool),
}

/// Results of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEvents {
    pub slide: SlideStep,
    pub rotation_phase: RotationPhase,
    pub rotation_angle: Option<f32>,
}

impl FrameEvents {
    /// The slide stopped itself this frame; the start/stop control should
    /// switch back to its "start" label.
    pub fn slide_stopped(&self) -> bool {
        self.slide == SlideStep::Stopped
    }
}

pub struct Viewer {
    config: ViewerConfig,
    index: SceneIndex,
    highlight: HighlightManager,
    slide: SlideAnimator,
    rotation: RotationAnimator,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            index: SceneIndex::new(),
            highlight: HighlightManager::new(&config.highlight),
            slide: SlideAnimator::new(config.slide.clone()),
            rotation: RotationAnimator::new(&config.rotation),
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Indexes the primary model and hands its rotation-tagged parts to the
    /// rotation animation.
    pub fn load_primary_model(&mut self, scene: &mut Scene, root: ObjectId) -> IndexReport {
        let report = self.index_sub_model(scene, root);
        self.rotation.track(scene, &report.rotation_tagged);
        report
    }

    /// Indexes one side-model instance and slides all of its parts as one lane.
    pub fn load_side_model(&mut self, scene: &mut Scene, root: ObjectId) -> IndexReport {
        let report = self.index_sub_model(scene, root);
        self.rotation.track(scene, &report.rotation_tagged);

        let lane: Vec<ObjectId> = scene
            .descendants(root)
            .into_iter()
            .filter(|id| self.index.contains(*id))
            .collect();
        let already_sliding = self.slide.lanes().iter().any(|existing| *existing == lane);
        if !lane.is_empty() && !already_sliding {
            self.slide.add_lane(lane);
        }

        report
    }

    fn index_sub_model(&mut self, scene: &mut Scene, root: ObjectId) -> IndexReport {
        self.index
            .index_sub_model(scene, root, &self.config.indexing, &self.config.indicator)
    }

    pub fn index(&self) -> &SceneIndex {
        &self.index
    }

    pub fn slide(&self) -> &SlideAnimator {
        &self.slide
    }

    pub fn rotation(&self) -> &RotationAnimator {
        &self.rotation
    }

    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlight.current()
    }

    pub fn on_pick(&mut self, scene: &mut Scene, picked: Option<ObjectId>) -> Option<ObjectId> {
        self.highlight.on_pick(scene, &self.index, picked)
    }

    pub fn on_pointer(
        &mut self,
        scene: &mut Scene,
        provider: &dyn PickProvider,
        pointer: Vec2,
    ) -> Option<ObjectId> {
        self.highlight
            .on_pointer(scene, &self.index, provider, pointer)
    }

    pub fn select_part(&mut self, scene: &mut Scene, id: ObjectId) -> Result<()> {
        self.highlight.select(scene, &self.index, id)
    }

    pub fn resize_group(
        &mut self,
        scene: &mut Scene,
        group: &str,
        width: f32,
        height: f32,
        depth: f32,
    ) -> Result<()> {
        self.index
            .groups()
            .resize(scene, group, width, height, depth)
    }

    pub fn set_indicator_enabled(&mut self, id: ObjectId, enabled: bool) -> Result<()> {
        self.index.indicators_mut().set_enabled(id, enabled)
    }

    pub fn start_slide(&mut self, now: Duration) {
        self.slide.start(now);
    }

    pub fn stop_slide(&mut self) {
        self.slide.stop();
    }

    pub fn toggle_slide(&mut self, now: Duration) -> bool {
        self.slide.toggle(now)
    }

    pub fn start_rotation(&mut self, now: Duration) -> bool {
        self.rotation.start(now)
    }

    pub fn stop_rotation(&mut self) {
        self.rotation.stop();
    }

    /// Group names in the order they were first indexed.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.index.groups().names()
    }

    /// Display label for a part: its name, or a placeholder when unnamed.
    pub fn part_label(&self, scene: &Scene, id: ObjectId) -> String {
        match scene.get_object(id) {
            Some(object) if !object.name.is_empty() => object.name.clone(),
            _ => "Unnamed Part".to_string(),
        }
    }

    /// Advances both animations to `now`.
    pub fn update(&mut self, scene: &mut Scene, now: Duration) -> FrameEvents {
        let slide = self.slide.advance(scene, now);
        let rotation_angle = self.rotation.advance(scene, now);

        FrameEvents {
            slide,
            rotation_phase: self.rotation.phase(),
            rotation_angle,
        }
    }

    pub fn dispatch(&mut self, scene: &mut Scene, command: ViewerCommand) -> Result<CommandOutcome> {
        let outcome = match command {
            ViewerCommand::Pick(picked) => CommandOutcome::Highlighted(self.on_pick(scene, picked)),
            ViewerCommand::SelectPart(id) => {
                self.select_part(scene, id)?;
                CommandOutcome::Highlighted(Some(id))
            }
            ViewerCommand::ResizeGroup {
                group,
                width,
                height,
                depth,
            } => {
                self.resize_group(scene, &group, width, height, depth)?;
                CommandOutcome::Applied
            }
            ViewerCommand::SetIndicator { id, enabled } => {
                self.set_indicator_enabled(id, enabled)?;
                CommandOutcome::Applied
            }
            ViewerCommand::ToggleSlide { now } => CommandOutcome::Sliding(self.toggle_slide(now)),
            ViewerCommand::StartRotation { now } => {
                CommandOutcome::RotationStarted(self.start_rotation(now))
            }
            ViewerCommand::StopRotation => {
                self.stop_rotation();
                CommandOutcome::Applied
            }
        };

        Ok(outcome)
    }
}
