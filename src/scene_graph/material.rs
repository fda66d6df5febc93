use glam::Vec3;

/// Surface parameters of a mesh. Cloning produces an independent copy, so a
/// snapshot taken from a live material is unaffected by later edits to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    pub fn new(name: impl Into<String>, color: Vec3) -> Self {
        Self {
            name: name.into(),
            color,
            ..Default::default()
        }
    }

    pub fn from_gltf(material: &gltf::Material) -> Self {
        let pbr = material.pbr_metallic_roughness();
        let [r, g, b, _] = pbr.base_color_factor();

        Self {
            name: material.name().unwrap_or("Unnamed material").to_string(),
            color: Vec3::new(r, g, b),
            emissive: Vec3::from(material.emissive_factor()),
            emissive_intensity: 1.0,
            metalness: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

/// Converts a packed `0xRRGGBB` colour into linear `[0, 1]` components.
pub fn color_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}
