use glam::Vec2;

use crate::config::HighlightConfig;
use crate::error::{Result, ViewerError};
use crate::scene_graph::{Material, ObjectId, Scene};
use crate::viewer::index::SceneIndex;

/// Resolves a pointer position to the nearest indexed object under it.
/// Implemented by whatever owns the camera and geometry.
pub trait PickProvider {
    fn pick(&self, scene: &Scene, pointer: Vec2) -> Option<ObjectId>;
}

/// Keeps at most one part drawn with a highlight material. Every other
/// indexed part shows its snapshot material.
pub struct HighlightManager {
    current: Option<ObjectId>,
    pointer_material: Material,
    selection_material: Material,
}

impl HighlightManager {
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            current: None,
            pointer_material: config.pointer.to_material("Pointer highlight"),
            selection_material: config.selection.to_material("Selection highlight"),
        }
    }

    pub fn current(&self) -> Option<ObjectId> {
        self.current
    }

    /// Handles a resolved pointer pick. Ids that are not indexed count as
    /// "nothing picked".
    pub fn on_pick(
        &mut self,
        scene: &mut Scene,
        index: &SceneIndex,
        picked: Option<ObjectId>,
    ) -> Option<ObjectId> {
        restore_all(scene, index);

        self.current = picked.filter(|id| index.contains(*id));
        if let Some(id) = self.current {
            apply(scene, id, &self.pointer_material);
        }

        self.current
    }

    pub fn on_pointer(
        &mut self,
        scene: &mut Scene,
        index: &SceneIndex,
        provider: &dyn PickProvider,
        pointer: Vec2,
    ) -> Option<ObjectId> {
        let picked = provider.pick(scene, pointer);
        self.on_pick(scene, index, picked)
    }

    /// Highlights a part chosen from the part list. Selecting the part that
    /// is already selected changes nothing.
    pub fn select(&mut self, scene: &mut Scene, index: &SceneIndex, id: ObjectId) -> Result<()> {
        if !index.contains(id) {
            return Err(ViewerError::UnknownNode(id));
        }

        let already_selected = self.current == Some(id)
            && scene
                .get_object(id)
                .and_then(|object| object.material.as_ref())
                == Some(&self.selection_material);
        if already_selected {
            return Ok(());
        }

        restore_all(scene, index);
        apply(scene, id, &self.selection_material);
        self.current = Some(id);

        Ok(())
    }
}

fn restore_all(scene: &mut Scene, index: &SceneIndex) {
    let snapshots = index.snapshots();
    for &id in index.parts() {
        snapshots.restore(scene, id);
    }
}

fn apply(scene: &mut Scene, id: ObjectId, material: &Material) {
    if let Some(object) = scene.get_object_mut(id) {
        object.material = Some(material.clone());
    }
}
