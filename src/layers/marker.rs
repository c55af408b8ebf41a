use crate::{
    core::{
        constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR},
        geo::{LatLng, LatLngBounds},
    },
    layers::{
        base::{Layer, LayerProperties, LayerType},
        popup::Popup,
    },
    Result,
};
use serde::{Deserialize, Serialize};

/// Image set used to draw a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
    pub icon_size: (u32, u32),
    pub icon_anchor: (u32, u32),
    pub popup_anchor: (i32, i32),
}

impl Icon {
    /// The stock marker images found under `image_path`
    pub fn default_in(image_path: &str) -> Self {
        let base = if image_path.is_empty() || image_path.ends_with('/') {
            image_path.to_string()
        } else {
            format!("{image_path}/")
        };

        Self {
            icon_url: format!("{base}marker-icon.png"),
            icon_retina_url: format!("{base}marker-icon-2x.png"),
            shadow_url: format!("{base}marker-shadow.png"),
            icon_size: MARKER_ICON_SIZE,
            icon_anchor: MARKER_ICON_ANCHOR,
            popup_anchor: MARKER_POPUP_ANCHOR,
        }
    }
}

pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    /// Styling passed through untouched
    options: serde_json::Value,
    icon: Option<Icon>,
    popup: Option<Popup>,
}

impl Marker {
    pub fn new(position: LatLng) -> Self {
        Self {
            properties: LayerProperties::new(LayerType::Marker),
            position,
            options: serde_json::Value::Null,
            icon: None,
            popup: None,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Binds a popup; a later call replaces the previous one
    pub fn bind_popup(&mut self, popup: Popup) {
        self.popup = Some(popup);
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

}

impl Layer for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "options": self.options,
            "icon": self.icon,
            "popup": self.popup
        })
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        self.options = options;
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }

    fn lat_lng(&self) -> Option<LatLng> {
        Some(self.position)
    }
}
