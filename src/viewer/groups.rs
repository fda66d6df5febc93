use std::collections::HashMap;

use glam::Vec3;

use crate::error::{Result, ViewerError};
use crate::scene_graph::{ObjectId, Scene};

/// Parts grouped by display name. Members keep traversal order, and group
/// names keep the order in which they were first seen.
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: HashMap<String, Vec<ObjectId>>,
    names: Vec<String>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, id: ObjectId) {
        if name.is_empty() {
            return;
        }

        match self.groups.get_mut(name) {
            Some(members) => members.push(id),
            None => {
                self.names.push(name.to_string());
                self.groups.insert(name.to_string(), vec![id]);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[ObjectId]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Total number of memberships across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Sets the scale of every member of `name` to `(width, height, depth)`.
    pub fn resize(
        &self,
        scene: &mut Scene,
        name: &str,
        width: f32,
        height: f32,
        depth: f32,
    ) -> Result<()> {
        let members = self
            .groups
            .get(name)
            .ok_or_else(|| ViewerError::UnknownGroup(name.to_string()))?;

        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !(valid(width) && valid(height) && valid(depth)) {
            return Err(ViewerError::InvalidDimensions {
                width,
                height,
                depth,
            });
        }

        let scale = Vec3::new(width, height, depth);
        for &id in members {
            scene.set_object_scale(id, scale);
        }

        log::debug!("Resized group {name:?} ({} parts) to {scale}", members.len());

        Ok(())
    }
}
