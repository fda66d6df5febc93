//! Interactive configurator core for a composite 3D model.
//!
//! The [`scene_graph`] module holds the node hierarchy (loaded from glTF or
//! built in code). The [`viewer`] module indexes loaded sub-models and drives
//! highlighting, group resizing, indicator lights and the slide and rotation
//! animations on top of it.

pub mod config;
pub mod error;
pub mod scene_graph;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use scene_graph::{Material, Object3D, ObjectId, Scene};
pub use viewer::{FrameEvents, PickProvider, Viewer, ViewerCommand};
