//! # Cartographer
//!
//! Overlay registry and viewport controller for slippy-map sessions.
//!
//! A [`Cartographer`] configures a [`MapSession`] (tile layer, attribution,
//! initial view) and keeps markers, circles and polygons addressable by
//! caller-chosen identifiers so they can be removed, tested for containment
//! or panned to later.

pub mod attribution;
pub mod cartographer;
pub mod core;
pub mod layers;
pub mod prelude;
pub mod registry;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{CartographerConfig, MapboxConfig, TileProvider},
    events::MapEvent,
    geo::{LatLng, LatLngBounds, TileCoord},
    map::{MapOptions, MapSession, ViewOptions},
    viewport::Viewport,
};

pub use layers::{
    base::{Layer, LayerId, LayerType},
    marker::{Icon, Marker},
    popup::{Popup, PopupOptions},
    tile::{TileLayer, TileLayerOptions, TileSource},
    vector::{Circle, PathOptions, Polygon},
};

pub use attribution::AttributionRenderer;
pub use cartographer::{Cartographer, CircleParams, MarkerParams, PolygonParams};
pub use registry::{Insertion, OverlayKind, Removal};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("No {kind} registered under '{id}'")]
    NotFound { kind: &'static str, id: String },
}

/// Error type alias for convenience
pub type Error = MapError;
