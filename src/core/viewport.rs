use crate::core::{
    constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM},
    geo::LatLng,
};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center and zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }

    /// Sets the center of the viewport. Coordinates are taken as given.
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the zoom limits. A NaN limit falls back to its default and
    /// reversed limits are swapped.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let min_zoom = if min_zoom.is_nan() { DEFAULT_MIN_ZOOM } else { min_zoom };
        let max_zoom = if max_zoom.is_nan() { DEFAULT_MAX_ZOOM } else { max_zoom };
        if min_zoom > max_zoom {
            log::warn!("zoom limits reversed ({min_zoom} > {max_zoom}), swapping");
        }

        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 1.0)
    }
}
