//! Caller-chosen identifiers mapped onto session layer handles.

use crate::{layers::base::LayerId, prelude::HashMap};
use serde::{Deserialize, Serialize};

/// The overlay kinds the registry tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Marker,
    Circle,
    Polygon,
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayKind::Marker => write!(f, "marker"),
            OverlayKind::Circle => write!(f, "circle"),
            OverlayKind::Polygon => write!(f, "polygon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayKey {
    pub kind: OverlayKind,
    pub id: String,
}

impl OverlayKey {
    pub fn new(kind: OverlayKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Result of registering an overlay under an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The identifier was free
    Inserted(LayerId),
    /// The identifier already held `previous`, which has been detached
    Replaced { handle: LayerId, previous: LayerId },
}

impl Insertion {
    /// Handle now stored under the identifier
    pub fn handle(&self) -> LayerId {
        match self {
            Insertion::Inserted(handle) | Insertion::Replaced { handle, .. } => *handle,
        }
    }

    pub fn is_replacement(&self) -> bool {
        matches!(self, Insertion::Replaced { .. })
    }
}

/// Result of removing an overlay by identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed(LayerId),
    /// Nothing was registered under the identifier
    Absent,
}

impl Removal {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }
}

/// One map for every kind, keyed by kind and identifier. Removing deletes the key.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    entries: HashMap<OverlayKey, LayerId>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle`, returning whatever the key held before
    pub fn insert(&mut self, key: OverlayKey, handle: LayerId) -> Option<LayerId> {
        self.entries.insert(key, handle)
    }

    pub fn remove(&mut self, kind: OverlayKind, id: &str) -> Option<LayerId> {
        self.entries.remove(&OverlayKey::new(kind, id))
    }

    pub fn get(&self, kind: OverlayKind, id: &str) -> Option<LayerId> {
        self.entries.get(&OverlayKey::new(kind, id)).copied()
    }

    /// Identifiers registered for `kind`, sorted
    pub fn ids(&self, kind: OverlayKind) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .entries
            .keys()
            .filter(|key| key.kind == kind)
            .map(|key| key.id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
