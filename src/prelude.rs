//! Prelude module for common cartographer types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use cartographer::prelude::*;`

pub use crate::core::{
    config::{CartographerConfig, MapboxConfig, TileProvider},
    events::{EventManager, MapEvent},
    geo::{LatLng, LatLngBounds, TileCoord},
    map::{AttributionControl, MapOptions, MapSession, ViewOptions, ViewTransition},
    viewport::Viewport,
};

pub use crate::layers::{
    base::{Layer, LayerId, LayerType},
    manager::LayerManager,
    marker::{Icon, Marker},
    popup::{Popup, PopupOptions},
    tile::{TileLayer, TileLayerOptions, TileSource, UrlTemplate},
    vector::{Circle, PathOptions, Polygon},
};

pub use crate::attribution::AttributionRenderer;
pub use crate::cartographer::{Cartographer, CircleParams, MarkerParams, PolygonParams};
pub use crate::registry::{Insertion, OverlayKey, OverlayKind, OverlayRegistry, Removal};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
