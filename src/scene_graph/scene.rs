use glam::{Quat, Vec3};
use id_arena::Arena;
use std::collections::HashMap;

use crate::scene_graph::material::Material;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::scene_model::{SceneModel, SceneModelId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub models: Arena<SceneModel>,
    gltf_mesh_to_model: HashMap<(String, usize), SceneModelId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            models: Arena::new(),
            gltf_mesh_to_model: HashMap::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Allocates `object` and attaches it under `parent`.
    pub fn add_child(&mut self, parent: ObjectId, object: Object3D) -> ObjectId {
        let id = self.add_object(object);
        self.set_object_parent(id, Some(parent));
        id
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn add_model(&mut self, model: SceneModel) -> SceneModelId {
        self.models.alloc(model)
    }

    /// Builds the default scene of a glTF document under a new root object
    /// named after the file.
    pub fn spawn_gltf_scene(&mut self, file_name: &str, document: &gltf::Document) -> Option<ObjectId> {
        let gltf_scene = document
            .default_scene()
            .or_else(|| document.scenes().next())?;

        let root = self.add_object(Object3D::new(file_name));

        for node in gltf_scene.nodes() {
            self.spawn_gltf_node(file_name, &node, root);
        }

        Some(root)
    }

    fn spawn_gltf_node(&mut self, file_name: &str, node: &gltf::Node, parent: ObjectId) -> ObjectId {
        let mut object = Object3D::default();
        let node_name = node.name().unwrap_or_default().to_string();
        object.name = node_name.clone();
        let (translation, rotation, scale) = node.transform().decomposed();

        object.transform.set_transform(
            translation.into(),
            Quat::from_array(rotation),
            scale.into(),
        );

        if let Some(mesh) = node.mesh() {
            let key = (file_name.to_string(), mesh.index());

            let model_id = match self.gltf_mesh_to_model.get(&key).copied() {
                Some(model_id) => model_id,
                None => {
                    let mesh_name = mesh
                        .name()
                        .map(String::from)
                        .unwrap_or_else(|| format!("{} (Mesh)", node_name));

                    let model_id =
                        self.add_model(SceneModel::new(mesh_name, mesh.primitives().count()));
                    self.gltf_mesh_to_model.insert(key, model_id);

                    model_id
                }
            };

            // Multi-primitive meshes are drawn with the material of their first primitive.
            let material = mesh
                .primitives()
                .next()
                .map(|primitive| Material::from_gltf(&primitive.material()))
                .unwrap_or_default();

            object.model_id = Some(model_id);
            object.material = Some(material);
        }

        let object_id = self.add_child(parent, object);

        for child in node.children() {
            self.spawn_gltf_node(file_name, &child, object_id);
        }

        object_id
    }

    /// Returns `root` followed by all of its descendants, depth-first, parents
    /// before children and siblings in insertion order.
    pub fn descendants(&self, root: ObjectId) -> Vec<ObjectId> {
        let mut visited = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some(object) = self.objects.get(id) else {
                continue;
            };

            visited.push(id);
            stack.extend(object.child_ids.iter().rev().copied());
        }

        visited
    }

    /// Deep-copies the hierarchy under `root`. The copies get fresh ids and no
    /// parent, and share mesh descriptors with the originals.
    pub fn clone_subtree(&mut self, root: ObjectId) -> Option<ObjectId> {
        let source = self.objects.get(root)?.clone();
        let child_ids = source.child_ids.clone();

        let copy = self.add_object(Object3D {
            parent_id: None,
            child_ids: Vec::new(),
            ..source
        });

        for child_id in child_ids {
            if let Some(child_copy) = self.clone_subtree(child_id) {
                self.set_object_parent(child_copy, Some(copy));
            }
        }

        Some(copy)
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        // Remove from old parent's children list
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        // Set new parent and add to new parent's children list
        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_translation(translation);
        }
    }

    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Quat) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
    }

    pub fn set_object_scale(&mut self, object_id: ObjectId, scale: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_scale(scale);
        }
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// Objects whose transform was written since the last `early_update`.
    pub fn changed_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, object)| object.transform.has_changed())
            .map(|(id, _)| id)
    }

    pub fn early_update(&mut self) {
        for (_, object) in self.objects.iter() {
            object.transform.reset_flags();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
