//! Shared trait abstractions for common patterns
//!
//! Every drawable the session can hold implements [`LayerOperations`], so the
//! three overlay kinds share one attach/detach path instead of three parallel
//! ones.

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerId, LayerType},
    Result,
};

/// Trait for layer-like objects attached to a [`MapSession`](crate::core::map::MapSession)
pub trait LayerOperations: Send + Sync {
    /// Handle stamped at construction
    fn id(&self) -> LayerId;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Anchor position for point-like layers (marker position, circle center)
    fn lat_lng(&self) -> Option<LatLng> {
        None
    }

    /// Attribution text the session's attribution control should show
    fn attribution(&self) -> Option<&str> {
        None
    }

    /// Get layer options
    fn options(&self) -> serde_json::Value;

    /// Set layer options
    fn set_options(&mut self, options: serde_json::Value) -> Result<()>;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Unified interpolation trait used by view transitions
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng::new(self.lat.lerp(&other.lat, t), self.lng.lerp(&other.lng, t))
    }
}
