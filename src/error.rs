use crate::scene_graph::ObjectId;

/// Recoverable failures reported back to the control that issued a command.
/// None of these stop the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("no group named {0:?}")]
    UnknownGroup(String),
    #[error("object {0:?} has no indicator light")]
    UnknownIndicator(ObjectId),
    #[error("invalid dimensions {width} x {height} x {depth}: expected finite, non-negative values")]
    InvalidDimensions { width: f32, height: f32, depth: f32 },
    #[error("object {0:?} is not a selectable part")]
    UnknownNode(ObjectId),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
