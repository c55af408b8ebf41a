use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// Layer is unified with LayerOperations in shared traits
pub use crate::traits::LayerOperations as Layer;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique handle stamped on every layer when it is built.
///
/// The session keys attached layers by this handle; the overlay registry maps
/// caller-chosen identifiers onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(u64);

impl LayerId {
    /// Stamps a fresh handle
    pub fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Tile,
    Marker,
    Circle,
    Polygon,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Marker => write!(f, "marker"),
            LayerType::Circle => write!(f, "circle"),
            LayerType::Polygon => write!(f, "polygon"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: LayerId,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
    pub interactive: bool,
}

impl LayerProperties {
    /// Properties with a freshly stamped handle
    pub fn new(layer_type: LayerType) -> Self {
        Self {
            id: LayerId::next(),
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
            interactive: true,
        }
    }
}
