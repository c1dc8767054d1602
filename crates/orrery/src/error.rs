//! Error types for the engine.

use thiserror::Error;

use crate::api::types::BodyKind;

/// Result type for engine operations.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid {} multiplier: {value}", .kind.label())]
    InvalidMultiplier { kind: BodyKind, value: f32 },
}

/// Static catalog failed validation at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    #[error("{child}: parent {parent} not found")]
    MissingParent { child: String, parent: String },

    #[error("{child}: parent {parent} is declared after it")]
    ParentOrder { child: String, parent: String },

    #[error("{child}: parent {parent} is not a planet")]
    ParentNotPlanet { child: String, parent: String },

    #[error("{0}: moons need a parent")]
    OrphanMoon(String),

    #[error("{0}: radius must be positive and finite")]
    InvalidRadius(String),

    #[error("catalog has no star")]
    NoStar,
}

/// Failure reported by a render backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("viewport {width}x{height} is degenerate")]
    DegenerateViewport { width: f32, height: f32 },

    #[error("backend error: {0}")]
    Backend(String),
}
