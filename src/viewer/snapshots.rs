use std::collections::HashMap;

use crate::scene_graph::{Material, ObjectId, Scene};

/// Original appearance of every indexed part. Entries are written once and
/// never changed afterwards; live materials are restored from copies of them.
#[derive(Debug, Default)]
pub struct MaterialSnapshots {
    snapshots: HashMap<ObjectId, Material>,
}

impl MaterialSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a copy of `material` for `id`. Returns `false` without touching
    /// the existing entry if one was already recorded.
    pub fn record(&mut self, id: ObjectId, material: &Material) -> bool {
        if self.snapshots.contains_key(&id) {
            return false;
        }

        self.snapshots.insert(id, material.clone());
        true
    }

    pub fn get(&self, id: ObjectId) -> Option<&Material> {
        self.snapshots.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.snapshots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Puts a fresh copy of the snapshot back on the live object.
    pub fn restore(&self, scene: &mut Scene, id: ObjectId) -> bool {
        let (Some(snapshot), Some(object)) = (self.snapshots.get(&id), scene.get_object_mut(id))
        else {
            return false;
        };

        object.material = Some(snapshot.clone());
        true
    }

    /// Whether the live material of `id` is structurally equal to its snapshot.
    pub fn matches(&self, scene: &Scene, id: ObjectId) -> bool {
        match (self.snapshots.get(&id), scene.get_object(id)) {
            (Some(snapshot), Some(object)) => object.material.as_ref() == Some(snapshot),
            _ => false,
        }
    }
}
