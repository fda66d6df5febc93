use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use glam::{EulerRot, Quat};

use crate::config::{Axis, RotationConfig};
use crate::scene_graph::{ObjectId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPhase {
    #[default]
    Idle,
    Forward,
    Backward,
}

struct TrackedPart {
    id: ObjectId,
    /// XYZ Euler angles of the part when it was tracked. The animated axis is
    /// overwritten every frame; the other two are kept.
    base: [f32; 3],
}

/// Opens tagged parts by a quarter turn and closes them again, each half
/// taking `duration`.
pub struct RotationAnimator {
    phase: RotationPhase,
    start_time: Option<Duration>,
    duration: Duration,
    axis: Axis,
    parts: Vec<TrackedPart>,
    angle: f32,
}

impl RotationAnimator {
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            phase: RotationPhase::Idle,
            start_time: None,
            duration: config.duration(),
            axis: config.axis,
            parts: Vec::new(),
            angle: 0.0,
        }
    }

    pub fn track(&mut self, scene: &Scene, ids: &[ObjectId]) {
        for &id in ids {
            if self.parts.iter().any(|part| part.id == id) {
                continue;
            }

            let Some(transform) = scene.get_object_transform(id) else {
                continue;
            };

            let (x, y, z) = transform.rotation().to_euler(EulerRot::XYZ);
            self.parts.push(TrackedPart {
                id,
                base: [x, y, z],
            });
        }
    }

    pub fn tracked(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.parts.iter().map(|part| part.id)
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    /// Angle applied by the most recent frame.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Begins the open/close cycle. Has no effect unless idle.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.phase != RotationPhase::Idle {
            log::debug!("Rotation already running ({:?}), ignoring start", self.phase);
            return false;
        }

        self.phase = RotationPhase::Forward;
        self.start_time = Some(now);
        log::info!("Rotation started for {} parts", self.parts.len());
        true
    }

    /// Halts the cycle where it is. Parts keep their current angle.
    pub fn stop(&mut self) {
        if self.phase != RotationPhase::Idle {
            log::info!("Rotation stopped at {:.3} rad", self.angle);
        }

        self.phase = RotationPhase::Idle;
        self.start_time = None;
    }

    /// Applies the angle for `now` to every tracked part. Returns the angle,
    /// or `None` when idle.
    pub fn advance(&mut self, scene: &mut Scene, now: Duration) -> Option<f32> {
        let start_time = self.start_time?;

        let elapsed = now.saturating_sub(start_time).as_secs_f64();
        let progress = (elapsed / self.duration.as_secs_f64()).min(1.0) as f32;

        let angle = match self.phase {
            RotationPhase::Idle => return None,
            RotationPhase::Forward => {
                if progress >= 1.0 {
                    self.phase = RotationPhase::Backward;
                    self.start_time = Some(now);
                    log::debug!("Rotation reached full open, closing");
                }
                progress * FRAC_PI_2
            }
            RotationPhase::Backward => {
                if progress >= 1.0 {
                    self.phase = RotationPhase::Idle;
                    self.start_time = None;
                    log::info!("Rotation finished");
                }
                FRAC_PI_2 * (1.0 - progress)
            }
        };

        self.apply(scene, angle);
        Some(angle)
    }

    fn apply(&mut self, scene: &mut Scene, angle: f32) {
        let slot = match self.axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };

        for part in &self.parts {
            let mut angles = part.base;
            angles[slot] = angle;
            let rotation = Quat::from_euler(EulerRot::XYZ, angles[0], angles[1], angles[2]);
            scene.set_object_rotation(part.id, rotation);
        }

        self.angle = angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::{Material, Object3D, SceneModel};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn door(scene: &mut Scene, name: &str) -> ObjectId {
        let model = scene.add_model(SceneModel::new(name, 1));
        scene.add_object(Object3D::mesh(name, model, Material::default()))
    }

    fn rotation_of(scene: &Scene, id: ObjectId) -> Quat {
        scene.get_object_transform(id).unwrap().rotation()
    }

    #[test]
    fn forward_phase_interpolates_linearly() {
        let mut scene = Scene::new();
        let id = door(&mut scene, "3DGeom-26");
        let mut rotation = RotationAnimator::new(&RotationConfig::default());
        rotation.track(&scene, &[id]);

        assert!(rotation.start(ms(1000)));
        let angle = rotation.advance(&mut scene, ms(4000)).unwrap();

        assert!((angle - FRAC_PI_2 * 0.5).abs() < 1e-6);
        assert_eq!(rotation.phase(), RotationPhase::Forward);
        assert!(rotation_of(&scene, id).abs_diff_eq(Quat::from_rotation_y(angle), 1e-6));
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut rotation = RotationAnimator::new(&RotationConfig::default());

        assert!(rotation.start(ms(0)));
        assert!(!rotation.start(ms(500)));
        assert_eq!(rotation.start_time(), Some(ms(0)));
        assert_eq!(rotation.phase(), RotationPhase::Forward);
    }

    #[test]
    fn idle_advance_leaves_parts_alone() {
        let mut scene = Scene::new();
        let id = door(&mut scene, "3DGeom-26");
        let mut rotation = RotationAnimator::new(&RotationConfig::default());
        rotation.track(&scene, &[id]);

        assert_eq!(rotation.advance(&mut scene, ms(100)), None);
        assert_eq!(rotation_of(&scene, id), Quat::IDENTITY);
    }

    #[test]
    fn other_axes_are_preserved() {
        let mut scene = Scene::new();
        let id = door(&mut scene, "3DGeom-26");
        let tilt = Quat::from_rotation_x(0.3);
        scene.set_object_rotation(id, tilt);

        let mut rotation = RotationAnimator::new(&RotationConfig::default());
        rotation.track(&scene, &[id]);
        rotation.start(ms(0));
        rotation.advance(&mut scene, ms(3000));

        let expected = Quat::from_euler(EulerRot::XYZ, 0.3, FRAC_PI_2 * 0.5, 0.0);
        assert!(rotation_of(&scene, id).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn stop_returns_to_idle_immediately() {
        let mut scene = Scene::new();
        let id = door(&mut scene, "3DGeom-26");
        let mut rotation = RotationAnimator::new(&RotationConfig::default());
        rotation.track(&scene, &[id]);

        rotation.start(ms(0));
        rotation.advance(&mut scene, ms(1500));
        rotation.stop();

        assert_eq!(rotation.phase(), RotationPhase::Idle);
        assert_eq!(rotation.start_time(), None);
        let before = rotation_of(&scene, id);
        assert_eq!(rotation.advance(&mut scene, ms(3000)), None);
        assert_eq!(rotation_of(&scene, id), before);
    }

    #[test]
    fn tracking_twice_does_not_duplicate() {
        let mut scene = Scene::new();
        let id = door(&mut scene, "3DGeom-26");
        let mut rotation = RotationAnimator::new(&RotationConfig::default());

        rotation.track(&scene, &[id]);
        rotation.track(&scene, &[id]);

        assert_eq!(rotation.tracked().count(), 1);
    }
}
