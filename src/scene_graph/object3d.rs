use id_arena::Id;

use crate::scene_graph::material::Material;
use crate::scene_graph::scene::Scene;
use crate::scene_graph::scene_model::SceneModelId;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Clone, Default)]
pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub model_id: Option<SceneModelId>,
    pub material: Option<Material>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a mesh-bearing object drawn with `material`.
    pub fn mesh(name: impl Into<String>, model_id: SceneModelId, material: Material) -> Self {
        Self {
            name: name.into(),
            model_id: Some(model_id),
            material: Some(material),
            ..Default::default()
        }
    }

    pub fn is_mesh(&self) -> bool {
        self.model_id.is_some()
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }
}
