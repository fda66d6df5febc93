use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use configurator::scene_graph::SceneModel;
use configurator::viewer::{CommandOutcome, RotationPhase};
use configurator::{
    FrameEvents, Material, Object3D, ObjectId, PickProvider, Scene, Viewer, ViewerCommand,
    ViewerConfig,
};
use glam::{Vec2, Vec3};
use itertools::Itertools;

/// Pointer positions wired to fixed parts, standing in for a ray caster.
pub struct ScriptedPicks {
    targets: Vec<(Vec2, ObjectId)>,
}

impl PickProvider for ScriptedPicks {
    fn pick(&self, _scene: &Scene, pointer: Vec2) -> Option<ObjectId> {
        self.targets
            .iter()
            .find(|(position, _)| position.distance(pointer) < 1.0)
            .map(|(_, id)| *id)
    }
}

enum Action {
    Pointer(Vec2),
    Command(ViewerCommand),
}

pub struct DemoState {
    pub scene: Scene,
    pub viewer: Viewer,
    picks: ScriptedPicks,
    script: VecDeque<(Duration, Action)>,
}

impl DemoState {
    pub fn new(config: ViewerConfig, models: Option<(PathBuf, PathBuf)>) -> anyhow::Result<Self> {
        let mut scene = Scene::new();

        let (primary, side) = match models {
            Some((primary_path, side_path)) => (
                load_gltf(&mut scene, &primary_path)?,
                load_gltf(&mut scene, &side_path)?,
            ),
            None => (build_cabinet(&mut scene), build_glasses(&mut scene)),
        };

        scene.set_object_scale(primary, Vec3::splat(2.0));

        let left = side;
        let right = scene
            .clone_subtree(side)
            .context("Side model root vanished")?;
        scene.set_object_translation(right, Vec3::new(0.0, 0.0, -7.4));
        for root in [left, right] {
            scene.set_object_scale(root, Vec3::splat(2.0));
        }

        let mut viewer = Viewer::new(config);
        let report = viewer.load_primary_model(&mut scene, primary);
        log::info!(
            "Primary model: {} parts, {} groups, {} indicators",
            report.parts.len(),
            viewer.index().groups().len(),
            viewer.index().indicators().len()
        );
        viewer.load_side_model(&mut scene, left);
        viewer.load_side_model(&mut scene, right);
        log::info!("Groups: {}", viewer.group_names().join(", "));

        let first_part = viewer.index().parts().first().copied();
        let door = viewer.index().rotation_tagged().first().copied();
        let led = viewer.index().indicators().iter().next().map(|indicator| indicator.host);

        let picks = ScriptedPicks {
            targets: first_part
                .map(|id| vec![(Vec2::new(320.0, 240.0), id)])
                .unwrap_or_default(),
        };

        let mut script = VecDeque::new();
        script.push_back((Duration::ZERO, Action::Pointer(Vec2::new(320.0, 240.0))));
        if let Some(door) = door {
            script.push_back((ms(100), Action::Command(ViewerCommand::SelectPart(door))));
        }
        script.push_back((
            ms(200),
            Action::Command(ViewerCommand::ResizeGroup {
                group: "shelf".to_string(),
                width: 1.5,
                height: 1.0,
                depth: 1.0,
            }),
        ));
        if let Some(led) = led {
            script.push_back((
                ms(300),
                Action::Command(ViewerCommand::SetIndicator {
                    id: led,
                    enabled: false,
                }),
            ));
        }
        script.push_back((ms(400), Action::Command(ViewerCommand::ToggleSlide { now: ms(400) })));
        script.push_back((ms(500), Action::Command(ViewerCommand::StartRotation { now: ms(500) })));
        script.push_back((ms(900), Action::Pointer(Vec2::new(10.0, 10.0))));

        Ok(Self {
            scene,
            viewer,
            picks,
            script,
        })
    }

    /// Runs every scripted action due at or before `now`.
    pub fn run_due_actions(&mut self, now: Duration) {
        while self.script.front().is_some_and(|(at, _)| *at <= now) {
            let Some((_, action)) = self.script.pop_front() else {
                break;
            };

            match action {
                Action::Pointer(pointer) => {
                    let picked = self.viewer.on_pointer(&mut self.scene, &self.picks, pointer);
                    match picked {
                        Some(id) => log::info!(
                            "Highlighted: {}",
                            self.viewer.part_label(&self.scene, id)
                        ),
                        None => log::info!("Highlight cleared"),
                    }
                }
                Action::Command(command) => {
                    let description = format!("{command:?}");
                    match self.viewer.dispatch(&mut self.scene, command) {
                        Ok(CommandOutcome::Highlighted(Some(id))) => log::info!(
                            "Selected: {}",
                            self.viewer.part_label(&self.scene, id)
                        ),
                        Ok(outcome) => log::info!("{description} -> {outcome:?}"),
                        Err(err) => log::warn!("{description} rejected: {err}"),
                    }
                }
            }
        }
    }

    pub fn update(&mut self, now: Duration) -> FrameEvents {
        self.viewer.update(&mut self.scene, now)
    }

    pub fn is_finished(&self) -> bool {
        self.script.is_empty()
            && !self.viewer.slide().is_sliding()
            && self.viewer.rotation().phase() == RotationPhase::Idle
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn load_gltf(scene: &mut Scene, path: &Path) -> anyhow::Result<ObjectId> {
    let (document, _buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    scene
        .spawn_gltf_scene(&file_name, &document)
        .with_context(|| format!("No scenes in {}", path.display()))
}

/// A cabinet with four LED strips, two doors and three shelves.
fn build_cabinet(scene: &mut Scene) -> ObjectId {
    let panel = scene.add_model(SceneModel::new("panel", 1));
    let root = scene.add_object(Object3D::new("cabinet"));
    let wood = Material::new("wood", Vec3::new(0.55, 0.4, 0.25));
    let plastic = Material::new("led plastic", Vec3::splat(0.9));

    scene.add_child(root, Object3D::mesh("frame", panel, wood.clone()));

    for (i, name) in ["3DGeom-4", "3DGeom-4_1", "3DGeom-4_2", "3DGeom-4_3"]
        .into_iter()
        .enumerate()
    {
        let mut led = Object3D::mesh(name, panel, plastic.clone());
        led.transform
            .set_translation(Vec3::new(-1.5 + i as f32, 2.9, 0.0));
        scene.add_child(root, led);
    }

    for (x, name) in [(-0.75, "3DGeom-26"), (0.75, "3DGeom-26_1")] {
        let mut door = Object3D::mesh(name, panel, wood.clone());
        door.transform.set_translation(Vec3::new(x, 1.5, 0.5));
        scene.add_child(root, door);
    }

    for y in [0.5, 1.5, 2.5] {
        let mut shelf = Object3D::mesh("shelf", panel, wood.clone());
        shelf.transform.set_translation(Vec3::new(0.0, y, 0.0));
        scene.add_child(root, shelf);
    }

    root
}

/// A stack of four glass panes.
fn build_glasses(scene: &mut Scene) -> ObjectId {
    let pane = scene.add_model(SceneModel::new("pane", 1));
    let root = scene.add_object(Object3D::new("glasses"));
    let glass = Material {
        metalness: 0.1,
        roughness: 0.05,
        ..Material::new("glass", Vec3::new(0.8, 0.9, 1.0))
    };

    for (i, name) in ["3DGeom-20_2", "3DGeom-20_1", "3DGeom-20", "3DGeom-20_3"]
        .into_iter()
        .enumerate()
    {
        let mut object = Object3D::mesh(name, pane, glass.clone());
        object
            .transform
            .set_translation(Vec3::new(0.0, 0.5 + i as f32 * 0.4, 0.0));
        scene.add_child(root, object);
    }

    root
}
