//! The overlay registry and viewport controller hosts talk to.
//!
//! A [`Cartographer`] owns one [`MapSession`] plus the registry mapping
//! caller-chosen identifiers to the overlays attached to it. Spatial and
//! drawing work stays with the session and its layers; this type keeps the
//! identifier bookkeeping and forwards calls.

use crate::{
    attribution::AttributionRenderer,
    core::{
        config::CartographerConfig,
        geo::LatLng,
        map::{MapSession, ViewOptions},
    },
    layers::{
        base::{Layer, LayerId},
        marker::{Icon, Marker},
        popup::Popup,
        tile::{TileLayer, TileLayerOptions},
        vector::{Circle, PathOptions, Polygon},
    },
    registry::{Insertion, OverlayKey, OverlayKind, OverlayRegistry, Removal},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Arguments for [`Cartographer::add_marker`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerParams {
    pub id: String,
    pub lat: f64,
    pub long: f64,
    /// Marker styling, passed through untouched
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default)]
    pub popup: Option<Popup>,
}

impl MarkerParams {
    pub fn new(id: impl Into<String>, lat: f64, long: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            long,
            options: serde_json::Value::Null,
            popup: None,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }
}

/// Arguments for [`Cartographer::add_circle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleParams {
    pub id: String,
    pub center_point: LatLng,
    /// Meters
    pub radius: f64,
    #[serde(default)]
    pub options: Option<PathOptions>,
}

impl CircleParams {
    pub fn new(id: impl Into<String>, center_point: impl Into<LatLng>, radius: f64) -> Self {
        Self {
            id: id.into(),
            center_point: center_point.into(),
            radius,
            options: None,
        }
    }

    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Arguments for [`Cartographer::add_polygon`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonParams {
    pub id: String,
    pub points: Vec<LatLng>,
    #[serde(default)]
    pub options: Option<PathOptions>,
}

impl PolygonParams {
    pub fn new<P: Into<LatLng>>(id: impl Into<String>, points: impl IntoIterator<Item = P>) -> Self {
        Self {
            id: id.into(),
            points: points.into_iter().map(Into::into).collect(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = Some(options);
        self
    }
}

pub struct Cartographer {
    config: CartographerConfig,
    session: MapSession,
    tile_layer: LayerId,
    overlays: OverlayRegistry,
}

impl Cartographer {
    /// Builds the session: tile layer, attribution and initial view
    pub fn init(config: CartographerConfig) -> Result<Self> {
        let renderer = AttributionRenderer::new()?;
        Self::init_with_renderer(config, &renderer)
    }

    /// Like [`init`](Self::init), rendering the default attribution with
    /// `renderer` so hosts can swap the template
    pub fn init_with_renderer(
        config: CartographerConfig,
        renderer: &AttributionRenderer,
    ) -> Result<Self> {
        config.validate()?;

        let attribution = match &config.attribution {
            Some(text) => text.clone(),
            None => renderer.render_default(&config)?,
        };

        let provider = config.tile_provider();
        let tile_options = TileLayerOptions {
            attribution: Some(attribution),
            id: config.mapbox.as_ref().map(|m| m.project_id.clone()),
            access_token: config.mapbox.as_ref().map(|m| m.access_token.clone()),
            ..Default::default()
        };
        let tile = TileLayer::new(provider.url_template(), tile_options)?;

        let mut session = MapSession::new(config.map_options(), config.start_point, config.start_zoom);
        session.attribution_control_mut().set_prefix(None);
        let tile_layer = session.add_layer(Box::new(tile));

        log::info!(
            "cartographer ready on '{}' with {:?} tiles",
            config.anchor,
            provider
        );

        Ok(Self {
            config,
            session,
            tile_layer,
            overlays: OverlayRegistry::new(),
        })
    }

    /// Attaches a marker and stores it under `params.id`
    pub fn add_marker(&mut self, params: MarkerParams) -> Result<Insertion> {
        let icon = Icon::default_in(&self.session.options().icon_image_path);
        let mut marker = Marker::new(LatLng::new(params.lat, params.long))
            .with_options(params.options)
            .with_icon(icon);
        if let Some(popup) = params.popup {
            marker.bind_popup(popup);
        }

        self.attach(OverlayKind::Marker, &params.id, Box::new(marker))
    }

    pub fn remove_marker(&mut self, id: &str) -> Removal {
        self.remove(OverlayKind::Marker, id)
    }

    pub fn add_circle(&mut self, params: CircleParams) -> Result<Insertion> {
        let mut circle = Circle::new(params.center_point, params.radius)?;
        if let Some(options) = params.options {
            circle = circle.with_options(options);
        }

        self.attach(OverlayKind::Circle, &params.id, Box::new(circle))
    }

    pub fn remove_circle(&mut self, id: &str) -> Removal {
        self.remove(OverlayKind::Circle, id)
    }

    pub fn add_polygon(&mut self, params: PolygonParams) -> Result<Insertion> {
        let mut polygon = Polygon::new(params.points);
        if let Some(options) = params.options {
            polygon = polygon.with_options(options);
        }

        self.attach(OverlayKind::Polygon, &params.id, Box::new(polygon))
    }

    pub fn remove_polygon(&mut self, id: &str) -> Removal {
        self.remove(OverlayKind::Polygon, id)
    }

    /// Detaches whatever `kind` overlay is registered under `id` and forgets the id
    pub fn remove(&mut self, kind: OverlayKind, id: &str) -> Removal {
        match self.overlays.remove(kind, id) {
            Some(handle) => {
                if self.session.remove_layer(handle).is_none() {
                    log::warn!("{kind} '{id}' was registered but no longer attached");
                }
                Removal::Removed(handle)
            }
            None => {
                log::debug!("no {kind} registered under '{id}', nothing to remove");
                Removal::Absent
            }
        }
    }

    /// Whether the marker `marker_id` lies within the bounds of the circle, or
    /// failing that the polygon, registered under `container_id`
    pub fn contains(&self, container_id: &str, marker_id: &str) -> Result<bool> {
        let container = self
            .overlays
            .get(OverlayKind::Circle, container_id)
            .or_else(|| self.overlays.get(OverlayKind::Polygon, container_id))
            .and_then(|handle| self.session.layer(handle))
            .ok_or_else(|| MapError::NotFound {
                kind: "circle or polygon",
                id: container_id.to_string(),
            })?;
        let position = self.marker_position(marker_id)?;

        Ok(container
            .bounds()
            .map_or(false, |bounds| bounds.contains(&position)))
    }

    /// Animated move to `coords`; `None` zoom falls back to the configured start zoom
    pub fn pan_to(&mut self, coords: impl Into<LatLng>, zoom: Option<f64>) {
        self.pan_to_with(coords, zoom, ViewOptions::animated());
    }

    pub fn pan_to_with(&mut self, coords: impl Into<LatLng>, zoom: Option<f64>, view: ViewOptions) {
        let center = coords.into();
        let zoom = zoom.unwrap_or(self.config.start_zoom);
        log::debug!(
            "panning to ({:.5}, {:.5}) zoom {zoom}",
            center.lat,
            center.lng
        );
        self.session.set_view(center, zoom, view);
    }

    /// Pans to the marker registered under `id`
    pub fn scroll_to_marker(&mut self, id: &str, zoom: Option<f64>) -> Result<()> {
        let position = self.marker_position(id)?;
        self.pan_to(position, zoom);
        Ok(())
    }

    fn attach(&mut self, kind: OverlayKind, id: &str, layer: Box<dyn Layer>) -> Result<Insertion> {
        if id.trim().is_empty() {
            return Err(MapError::InvalidIdentifier(format!(
                "{kind} identifier must not be empty"
            )));
        }

        let handle = self.session.add_layer(layer);
        match self.overlays.insert(OverlayKey::new(kind, id), handle) {
            None => {
                log::debug!(
                    "registered {kind} '{id}' as {handle} ({} overlays)",
                    self.overlays.len()
                );
                Ok(Insertion::Inserted(handle))
            }
            Some(previous) => {
                log::warn!("{kind} '{id}' replaced; detaching previous {previous}");
                self.session.remove_layer(previous);
                Ok(Insertion::Replaced { handle, previous })
            }
        }
    }

    fn marker_position(&self, id: &str) -> Result<LatLng> {
        self.overlays
            .get(OverlayKind::Marker, id)
            .and_then(|handle| self.session.layer(handle))
            .and_then(|layer| layer.lat_lng())
            .ok_or_else(|| MapError::NotFound {
                kind: "marker",
                id: id.to_string(),
            })
    }

    /// Overlay registered under `id`, if it is still attached
    pub fn overlay(&self, kind: OverlayKind, id: &str) -> Option<&dyn Layer> {
        self.overlays
            .get(kind, id)
            .and_then(|handle| self.session.layer(handle))
    }

    pub fn handle(&self, kind: OverlayKind, id: &str) -> Option<LayerId> {
        self.overlays.get(kind, id)
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.overlay(OverlayKind::Marker, id)
            .and_then(|layer| layer.as_any().downcast_ref::<Marker>())
    }

    pub fn circle(&self, id: &str) -> Option<&Circle> {
        self.overlay(OverlayKind::Circle, id)
            .and_then(|layer| layer.as_any().downcast_ref::<Circle>())
    }

    pub fn polygon(&self, id: &str) -> Option<&Polygon> {
        self.overlay(OverlayKind::Polygon, id)
            .and_then(|layer| layer.as_any().downcast_ref::<Polygon>())
    }

    /// Registered identifiers of one kind, sorted
    pub fn ids(&self, kind: OverlayKind) -> Vec<&str> {
        self.overlays.ids(kind)
    }

    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.session
            .layer(self.tile_layer)
            .and_then(|layer| layer.as_any().downcast_ref::<TileLayer>())
    }

    pub fn config(&self) -> &CartographerConfig {
        &self.config
    }

    pub fn session(&self) -> &MapSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut MapSession {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::MapEvent;

    fn cartographer() -> Cartographer {
        Cartographer::init(CartographerConfig::default()).unwrap()
    }

    #[test]
    fn test_init_attaches_tile_layer_without_prefix() {
        let carto = cartographer();
        let session = carto.session();

        assert_eq!(session.viewport().center, LatLng::new(36.16, -86.78));
        assert_eq!(session.viewport().zoom, 13.0);
        assert_eq!(session.attribution_control().prefix(), None);
        assert!(session.attribution_control().text().contains("OpenStreetMap"));
        assert_eq!(session.layers().len(), 1);
        assert!(carto.tile_layer().is_some());
    }

    #[test]
    fn test_explicit_attribution_wins() {
        let carto = Cartographer::init(CartographerConfig::default().with_attribution("Tiles by us"))
            .unwrap();
        assert_eq!(carto.session().attribution_control().text(), "Tiles by us");
    }

    #[test]
    fn test_marker_gets_icon_and_popup() {
        let mut carto = Cartographer::init(
            CartographerConfig::default().with_icon_image_path("/static/img/"),
        )
        .unwrap();
        let inserted = carto
            .add_marker(MarkerParams::new("hq", 1.0, 2.0).with_popup(Popup::new("Head office")))
            .unwrap();

        let marker = carto.marker("hq").unwrap();
        assert_eq!(marker.id(), inserted.handle());
        assert_eq!(marker.position(), LatLng::new(1.0, 2.0));
        assert_eq!(marker.popup().map(|p| p.content.as_str()), Some("Head office"));
        assert_eq!(
            marker.icon().map(|i| i.icon_url.as_str()),
            Some("/static/img/marker-icon.png")
        );
    }

    #[test]
    fn test_empty_identifier_is_rejected_before_attaching() {
        let mut carto = cartographer();
        carto.session_mut().process_events();

        let err = carto.add_marker(MarkerParams::new("", 0.0, 0.0));
        assert!(matches!(err, Err(MapError::InvalidIdentifier(_))));
        assert!(carto.session_mut().process_events().is_empty());
        assert_eq!(carto.session().layers().len(), 1);
    }

    #[test]
    fn test_remove_dispatches_on_kind() {
        let mut carto = cartographer();
        carto.add_circle(CircleParams::new("zone", [0.0, 0.0], 50.0)).unwrap();

        assert_eq!(carto.remove(OverlayKind::Marker, "zone"), Removal::Absent);
        assert!(carto.remove(OverlayKind::Circle, "zone").is_removed());
        assert!(carto.circle("zone").is_none());
    }

    #[test]
    fn test_contains_falls_back_to_polygon() {
        let mut carto = cartographer();
        carto
            .add_polygon(PolygonParams::new(
                "block",
                [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
            ))
            .unwrap();
        carto.add_marker(MarkerParams::new("in", 0.5, 0.5)).unwrap();
        carto.add_marker(MarkerParams::new("out", 2.0, 0.5)).unwrap();

        assert!(carto.contains("block", "in").unwrap());
        assert!(!carto.contains("block", "out").unwrap());
    }

    #[test]
    fn test_contains_with_empty_polygon_is_false() {
        let mut carto = cartographer();
        carto
            .add_polygon(PolygonParams::new("nothing", Vec::<LatLng>::new()))
            .unwrap();
        carto.add_marker(MarkerParams::new("m", 0.0, 0.0)).unwrap();

        assert!(!carto.contains("nothing", "m").unwrap());
    }

    #[test]
    fn test_scroll_to_marker() {
        let mut carto = cartographer();
        carto.add_marker(MarkerParams::new("hq", 10.0, 20.0)).unwrap();

        carto.scroll_to_marker("hq", Some(15.0)).unwrap();
        assert_eq!(carto.session().viewport().center, LatLng::new(10.0, 20.0));
        assert_eq!(carto.session().viewport().zoom, 15.0);

        assert!(matches!(
            carto.scroll_to_marker("missing", None),
            Err(MapError::NotFound { kind: "marker", .. })
        ));
    }

    #[test]
    fn test_pan_to_with_immediate_skips_transition() {
        let mut carto = cartographer();
        carto.session_mut().process_events();
        carto.pan_to_with([5.0, 6.0], Some(4.0), ViewOptions::immediate());

        assert!(carto.session().transition().is_none());
        assert_eq!(
            carto.session_mut().process_events(),
            vec![MapEvent::ViewChanged {
                center: LatLng::new(5.0, 6.0),
                zoom: 4.0
            }]
        );
    }
}
