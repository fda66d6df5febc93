use std::collections::HashMap;

use glam::Vec3;

use crate::config::IndicatorConfig;
use crate::error::{Result, ViewerError};
use crate::scene_graph::{color_from_hex, ObjectId};

/// A point light standing in for an LED on a specific part.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub host: ObjectId,
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub cast_shadow: bool,
    enabled: bool,
}

impl Indicator {
    pub fn new(host: ObjectId, position: Vec3, config: &IndicatorConfig) -> Self {
        Self {
            host,
            position,
            color: color_from_hex(config.color),
            intensity: config.intensity,
            distance: config.distance,
            decay: config.decay,
            cast_shadow: config.cast_shadow,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Indicators keyed by the id of the part hosting them.
#[derive(Debug, Default)]
pub struct IndicatorRegistry {
    indicators: HashMap<ObjectId, Indicator>,
    order: Vec<ObjectId>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `indicator` unless its host already has one.
    pub fn insert(&mut self, indicator: Indicator) -> bool {
        let host = indicator.host;
        if self.indicators.contains_key(&host) {
            return false;
        }

        self.indicators.insert(host, indicator);
        self.order.push(host);
        true
    }

    pub fn set_enabled(&mut self, id: ObjectId, enabled: bool) -> Result<()> {
        let indicator = self
            .indicators
            .get_mut(&id)
            .ok_or(ViewerError::UnknownIndicator(id))?;

        indicator.enabled = enabled;
        Ok(())
    }

    pub fn get(&self, id: ObjectId) -> Option<&Indicator> {
        self.indicators.get(&id)
    }

    /// Indicators in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.order.iter().filter_map(|id| self.indicators.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
