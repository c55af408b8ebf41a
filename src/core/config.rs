//! Configuration accepted by [`Cartographer::init`](crate::Cartographer::init)
//!
//! Field names follow the camelCase keys hosts already send, so a config can
//! be loaded straight from JSON. Every field has a default.

use crate::{
    core::{
        constants::{
            DEFAULT_ANCHOR, DEFAULT_ICON_IMAGE_PATH, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
            DEFAULT_START_POINT, DEFAULT_START_ZOOM, MAPBOX_TILE_URL_TEMPLATE,
            PUBLIC_TILE_URL_TEMPLATE,
        },
        geo::LatLng,
        map::MapOptions,
    },
    MapError, Result,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Credentials for the commercial tile provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapboxConfig {
    pub project_id: String,
    pub access_token: String,
}

/// Where base tiles come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileProvider {
    /// Public OpenStreetMap-based tiles
    Public,
    /// Mapbox tiles keyed by project id and token
    Mapbox,
}

impl TileProvider {
    pub fn url_template(&self) -> &'static str {
        match self {
            TileProvider::Public => PUBLIC_TILE_URL_TEMPLATE,
            TileProvider::Mapbox => MAPBOX_TILE_URL_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartographerConfig {
    pub start_point: LatLng,
    pub start_zoom: f64,
    /// Page anchor identifier
    #[serde(rename = "ref")]
    pub anchor: String,
    /// `false`/`null` for public tiles, an object for Mapbox
    #[serde(deserialize_with = "deserialize_mapbox")]
    pub mapbox: Option<MapboxConfig>,
    /// Pre-rendered attribution; rendered from the built-in template when `None`
    pub attribution: Option<String>,
    pub icon_image_path: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CartographerConfig {
    fn default() -> Self {
        Self {
            start_point: DEFAULT_START_POINT.into(),
            start_zoom: DEFAULT_START_ZOOM,
            anchor: DEFAULT_ANCHOR.to_string(),
            mapbox: None,
            attribution: None,
            icon_image_path: DEFAULT_ICON_IMAGE_PATH.to_string(),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl CartographerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config object and validates it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_start_point(mut self, start_point: impl Into<LatLng>) -> Self {
        self.start_point = start_point.into();
        self
    }

    pub fn with_start_zoom(mut self, zoom: f64) -> Self {
        self.start_zoom = zoom;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    pub fn with_mapbox(mut self, project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        self.mapbox = Some(MapboxConfig {
            project_id: project_id.into(),
            access_token: access_token.into(),
        });
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn with_icon_image_path(mut self, path: impl Into<String>) -> Self {
        self.icon_image_path = path.into();
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn tile_provider(&self) -> TileProvider {
        match self.mapbox {
            Some(_) => TileProvider::Mapbox,
            None => TileProvider::Public,
        }
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            anchor: self.anchor.clone(),
            icon_image_path: self.icon_image_path.clone(),
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchor.trim().is_empty() {
            return Err(MapError::Config("ref must name a page anchor".to_string()));
        }
        if !self.start_zoom.is_finite() {
            return Err(MapError::Config(format!(
                "startZoom must be a number, got {}",
                self.start_zoom
            )));
        }
        if self.min_zoom.is_nan() || self.max_zoom.is_nan() || self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "minZoom {} is above maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if let Some(mapbox) = &self.mapbox {
            if mapbox.project_id.is_empty() || mapbox.access_token.is_empty() {
                return Err(MapError::Config(
                    "mapbox needs both projectId and accessToken".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Accepts `false`, `null` or a `{projectId, accessToken}` object
fn deserialize_mapbox<'de, D>(deserializer: D) -> std::result::Result<Option<MapboxConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapboxSetting {
        Flag(bool),
        Config(MapboxConfig),
    }

    match Option::<MapboxSetting>::deserialize(deserializer)? {
        None | Some(MapboxSetting::Flag(false)) => Ok(None),
        Some(MapboxSetting::Flag(true)) => Err(serde::de::Error::custom(
            "mapbox: true needs {projectId, accessToken} instead",
        )),
        Some(MapboxSetting::Config(config)) => Ok(Some(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartographerConfig::from_json("{}").unwrap();

        assert_eq!(config.start_point, LatLng::new(36.16, -86.78));
        assert_eq!(config.start_zoom, 13.0);
        assert_eq!(config.anchor, "map");
        assert_eq!(config.mapbox, None);
        assert_eq!(config.attribution, None);
        assert_eq!(config.tile_provider(), TileProvider::Public);
    }

    #[test]
    fn test_mapbox_false_selects_public_tiles() {
        let config = CartographerConfig::from_json(r#"{"mapbox": false}"#).unwrap();

        assert_eq!(config.tile_provider(), TileProvider::Public);
        assert_eq!(config.tile_provider().url_template(), PUBLIC_TILE_URL_TEMPLATE);
    }

    #[test]
    fn test_mapbox_object_selects_commercial_tiles() {
        let config = CartographerConfig::from_json(
            r#"{"mapbox": {"projectId": "p", "accessToken": "t"}, "startPoint": [1, 2], "ref": "main-map"}"#,
        )
        .unwrap();

        assert_eq!(config.tile_provider(), TileProvider::Mapbox);
        assert_eq!(
            config.mapbox,
            Some(MapboxConfig {
                project_id: "p".to_string(),
                access_token: "t".to_string()
            })
        );
        assert_eq!(config.start_point, LatLng::new(1.0, 2.0));
        assert_eq!(config.anchor, "main-map");
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        assert!(matches!(
            CartographerConfig::from_json(r#"{"mapbox": true}"#),
            Err(MapError::Serialization(_))
        ));
        assert!(matches!(
            CartographerConfig::from_json(r#"{"ref": " "}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            CartographerConfig::from_json(r#"{"minZoom": 10, "maxZoom": 2}"#),
            Err(MapError::Config(_))
        ));
        assert!(CartographerConfig::new()
            .with_mapbox("", "token")
            .validate()
            .is_err());
    }

    #[test]
    fn test_builder_feeds_map_options() {
        let config = CartographerConfig::new()
            .with_anchor("other")
            .with_icon_image_path("/img/")
            .with_zoom_limits(2.0, 16.0);
        let options = config.map_options();

        assert_eq!(options.anchor, "other");
        assert_eq!(options.icon_image_path, "/img/");
        assert_eq!((options.min_zoom, options.max_zoom), (2.0, 16.0));
    }
}
