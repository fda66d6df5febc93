use id_arena::Id;

pub type SceneModelId = Id<SceneModel>;

/// Mesh descriptor shared by every object instancing the same geometry.
#[derive(Debug, Clone)]
pub struct SceneModel {
    pub name: String,
    pub primitive_count: usize,
}

impl SceneModel {
    pub fn new(name: impl Into<String>, primitive_count: usize) -> Self {
        Self {
            name: name.into(),
            primitive_count,
        }
    }
}
