//! Viewer configuration.
//!
//! Every section has defaults matching the shipped model, so a config file
//! only needs to mention the values it overrides.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::scene_graph::{color_from_hex, Material};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub indexing: IndexingConfig,
    pub indicator: IndicatorConfig,
    pub highlight: HighlightConfig,
    pub slide: SlideConfig,
    pub rotation: RotationConfig,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: ViewerConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.slide.speed.is_finite() && self.slide.speed > 0.0) {
            return Err(invalid(format!(
                "slide speed must be positive, got {}",
                self.slide.speed
            )));
        }

        if self.slide.cutoff_ms == 0 {
            return Err(invalid("slide cutoff must be non-zero"));
        }

        if self.rotation.duration_ms == 0 {
            return Err(invalid("rotation duration must be non-zero"));
        }

        let (min, max) = self.slide.mode.bounds();
        if !(min < max) {
            return Err(invalid(format!("slide bounds [{min}, {max}] are empty")));
        }

        if let SlideMode::Converge {
            order,
            target,
            easing,
            ..
        } = &self.slide.mode
        {
            if !order.contains(target) {
                return Err(invalid(format!(
                    "converge target {target:?} is not part of the slide order"
                )));
            }

            if !(*easing > 0.0 && *easing <= 1.0) {
                return Err(invalid(format!("converge easing {easing} is outside (0, 1]")));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ViewerError {
    ViewerError::InvalidConfig(message.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn with_component(self, v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(value, v.y, v.z),
            Axis::Y => Vec3::new(v.x, value, v.z),
            Axis::Z => Vec3::new(v.x, v.y, value),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Exact part names that host an indicator light.
    pub indicator_parts: Vec<String>,
    /// Parts whose name starts with this prefix join the rotation animation.
    pub rotation_tag_prefix: String,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            indicator_parts: ["3DGeom-4_3", "3DGeom-4_2", "3DGeom-4_1", "3DGeom-4"]
                .into_iter()
                .map(String::from)
                .collect(),
            rotation_tag_prefix: "3DGeom-26".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub color: u32,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub cast_shadow: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            color: 0xf7f0dc,
            intensity: 7.0,
            distance: 20.0,
            decay: 0.1,
            cast_shadow: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
}

impl MaterialConfig {
    pub fn to_material(&self, name: &str) -> Material {
        Material {
            name: name.to_string(),
            color: color_from_hex(self.color),
            emissive: color_from_hex(self.emissive),
            emissive_intensity: self.emissive_intensity,
            metalness: self.metalness,
            roughness: self.roughness,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Applied to parts picked with the pointer.
    pub pointer: MaterialConfig,
    /// Applied to parts chosen from the part list.
    pub selection: MaterialConfig,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            pointer: MaterialConfig {
                color: 0xffff00,
                emissive: 0xffff00,
                emissive_intensity: 1.0,
                metalness: 0.6,
                roughness: 0.4,
            },
            selection: MaterialConfig {
                color: 0x4af0d6,
                emissive: 0x00ffff,
                emissive_intensity: 2.0,
                metalness: 0.8,
                roughness: 0.5,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideMode {
    /// Every tracked part moves by `speed * direction` along `axis` each frame.
    Translate { axis: Axis, min: f32, max: f32 },
    /// Parts named in `order` ease toward an offset from the `target` part,
    /// spaced by `speed * direction` per step of order.
    Converge {
        axis: Axis,
        min: f32,
        max: f32,
        order: Vec<String>,
        target: String,
        settle_epsilon: f32,
        easing: f32,
    },
}

impl SlideMode {
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            SlideMode::Translate { min, max, .. } | SlideMode::Converge { min, max, .. } => {
                (*min, *max)
            }
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            SlideMode::Translate { axis, .. } | SlideMode::Converge { axis, .. } => *axis,
        }
    }

    pub fn converge_default() -> Self {
        SlideMode::Converge {
            axis: Axis::Y,
            min: -10.0,
            max: 10.0,
            order: ["3DGeom-20_2", "3DGeom-20_1", "3DGeom-20", "3DGeom-20_3"]
                .into_iter()
                .map(String::from)
                .collect(),
            target: "3DGeom-20_2".to_string(),
            settle_epsilon: 0.01,
            easing: 0.1,
        }
    }
}

impl Default for SlideMode {
    fn default() -> Self {
        SlideMode::Translate {
            axis: Axis::X,
            min: -5.0,
            max: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Displacement per frame, in scene units.
    pub speed: f32,
    pub cutoff_ms: u64,
    pub mode: SlideMode,
}

impl SlideConfig {
    pub fn cutoff(&self) -> Duration {
        Duration::from_millis(self.cutoff_ms)
    }
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            cutoff_ms: 5000,
            mode: SlideMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub duration_ms: u64,
    pub axis: Axis,
}

impl RotationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 6000,
            axis: Axis::Y,
        }
    }
}
