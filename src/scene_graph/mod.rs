pub mod material;
pub mod object3d;
pub mod scene;
pub mod scene_model;
pub mod transform;

// Re-export main types for convenience
pub use material::{color_from_hex, Material};
pub use object3d::{Object3D, ObjectId};
pub use scene::Scene;
pub use scene_model::{SceneModel, SceneModelId};
pub use transform::Transform;
