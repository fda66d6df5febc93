use std::collections::HashSet;

use itertools::Itertools;

use crate::config::{IndexingConfig, IndicatorConfig};
use crate::scene_graph::{Material, ObjectId, Scene};
use crate::viewer::groups::GroupIndex;
use crate::viewer::indicators::{Indicator, IndicatorRegistry};
use crate::viewer::snapshots::MaterialSnapshots;

/// Ids added to the index by one `index_sub_model` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexReport {
    pub parts: Vec<ObjectId>,
    pub rotation_tagged: Vec<ObjectId>,
    pub indicators: Vec<ObjectId>,
}

/// Derived lookups over every mesh of every loaded sub-model.
#[derive(Debug, Default)]
pub struct SceneIndex {
    parts: Vec<ObjectId>,
    part_set: HashSet<ObjectId>,
    snapshots: MaterialSnapshots,
    groups: GroupIndex,
    indicators: IndicatorRegistry,
    rotation_tagged: Vec<ObjectId>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `root` and everything below it, indexing each mesh-bearing
    /// object. Objects that are already indexed are skipped, so indexing the
    /// same sub-model twice is harmless.
    pub fn index_sub_model(
        &mut self,
        scene: &mut Scene,
        root: ObjectId,
        indexing: &IndexingConfig,
        indicator_config: &IndicatorConfig,
    ) -> IndexReport {
        let mut report = IndexReport::default();

        for id in scene.descendants(root) {
            if self.part_set.contains(&id) {
                continue;
            }

            let Some(object) = scene.get_object_mut(id) else {
                continue;
            };

            if !object.is_mesh() {
                continue;
            }

            object.cast_shadow = true;
            object.receive_shadow = true;

            let material = object.material.get_or_insert_with(Material::default);
            self.snapshots.record(id, material);

            self.parts.push(id);
            self.part_set.insert(id);
            report.parts.push(id);

            self.groups.insert(&object.name, id);

            if indexing.indicator_parts.iter().any(|part| *part == object.name) {
                let position = object.transform.translation();
                self.indicators
                    .insert(Indicator::new(id, position, indicator_config));
                report.indicators.push(id);
            }

            if !indexing.rotation_tag_prefix.is_empty()
                && object.name.starts_with(&indexing.rotation_tag_prefix)
            {
                self.rotation_tagged.push(id);
                report.rotation_tagged.push(id);
            }
        }

        log::debug!(
            "Indexed {} new parts under {:?}: {} indicators, {} rotation-tagged",
            report.parts.len(),
            root,
            report.indicators.len(),
            report.rotation_tagged.len(),
        );

        if !report.indicators.is_empty() {
            log::debug!(
                "Indicator hosts: {}",
                report
                    .indicators
                    .iter()
                    .filter_map(|id| scene.get_object(*id))
                    .map(|object| object.name.as_str())
                    .join(", ")
            );
        }

        report
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.part_set.contains(&id)
    }

    /// Indexed parts in indexing order.
    pub fn parts(&self) -> &[ObjectId] {
        &self.parts
    }

    pub fn snapshots(&self) -> &MaterialSnapshots {
        &self.snapshots
    }

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    pub fn indicators(&self) -> &IndicatorRegistry {
        &self.indicators
    }

    pub fn indicators_mut(&mut self) -> &mut IndicatorRegistry {
        &mut self.indicators
    }

    pub fn rotation_tagged(&self) -> &[ObjectId] {
        &self.rotation_tagged
    }
}
