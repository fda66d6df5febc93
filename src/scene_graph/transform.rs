use glam::{Quat, Vec3};
use std::cell::Cell;

#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,

    has_changed_since_last_update: Cell<bool>,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            has_changed_since_last_update: Cell::new(true),
        }
    }

    fn invalidate(&self) {
        self.has_changed_since_last_update.set(true);
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.invalidate();
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.invalidate();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
        self.invalidate();
    }

    pub fn set_transform(&mut self, translation: Vec3, rotation: Quat, scale: Vec3) {
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
        self.invalidate();
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn reset_flags(&self) {
        self.has_changed_since_last_update.set(false);
    }

    pub fn has_changed(&self) -> bool {
        self.has_changed_since_last_update.get()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_transform_replaces_all_components() {
        let mut transform = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let rotation = Quat::from_rotation_y(0.5);
        transform.set_transform(Vec3::Y, rotation, Vec3::new(2.0, 3.0, 4.0));

        assert_eq!(transform.translation(), Vec3::Y);
        assert_eq!(transform.rotation(), rotation);
        assert_eq!(transform.scale(), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn change_flag_resets_and_retriggers() {
        let mut transform = Transform::default();
        assert!(transform.has_changed());
        transform.reset_flags();
        assert!(!transform.has_changed());
        transform.translate(Vec3::X);
        assert!(transform.has_changed());
        assert_eq!(transform.translation(), Vec3::X);
    }
}
