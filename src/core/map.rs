use crate::{
    core::{
        constants::{
            DEFAULT_ANCHOR, DEFAULT_ATTRIBUTION_PREFIX, DEFAULT_ICON_IMAGE_PATH,
            DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_PAN_DURATION_MS,
        },
        events::{EventManager, MapEvent},
        geo::LatLng,
        viewport::Viewport,
    },
    layers::{
        base::{Layer, LayerId},
        manager::LayerManager,
    },
    traits::Lerp,
};
use instant::Instant;
use std::time::Duration;

/// Session-wide settings fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Page anchor the session is bound to
    pub anchor: String,
    /// Directory holding the default marker images
    pub icon_image_path: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_string(),
            icon_image_path: DEFAULT_ICON_IMAGE_PATH.to_string(),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// How `set_view` moves the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    pub duration: Duration,
}

impl ViewOptions {
    pub fn animated() -> Self {
        Self::default()
    }

    pub fn immediate() -> Self {
        Self {
            animate: false,
            ..Self::default()
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration: Duration::from_millis(DEFAULT_PAN_DURATION_MS),
        }
    }
}

/// An animated move the host is expected to draw between two views
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransition {
    pub from_center: LatLng,
    pub from_zoom: f64,
    pub to_center: LatLng,
    pub to_zoom: f64,
    pub started_at: Instant,
    pub duration: Duration,
}

impl ViewTransition {
    /// Linear progress in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Interpolated center and zoom at `now`
    pub fn view_at(&self, now: Instant) -> (LatLng, f64) {
        let t = self.progress(now);
        (
            self.from_center.lerp(&self.to_center, t),
            self.from_zoom.lerp(&self.to_zoom, t),
        )
    }
}

/// Lists attribution strings of attached layers behind an optional prefix
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionControl {
    prefix: Option<String>,
    /// Attribution text with the number of attached layers contributing it
    attributions: Vec<(String, usize)>,
}

impl AttributionControl {
    pub fn new() -> Self {
        Self {
            prefix: Some(DEFAULT_ATTRIBUTION_PREFIX.to_string()),
            attributions: Vec::new(),
        }
    }

    /// `None` hides the prefix entirely
    pub fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn add_attribution(&mut self, text: &str) {
        match self.attributions.iter_mut().find(|(t, _)| t == text) {
            Some((_, count)) => *count += 1,
            None => self.attributions.push((text.to_string(), 1)),
        }
    }

    pub fn remove_attribution(&mut self, text: &str) {
        if let Some(pos) = self.attributions.iter().position(|(t, _)| t == text) {
            self.attributions[pos].1 -= 1;
            if self.attributions[pos].1 == 0 {
                self.attributions.remove(pos);
            }
        }
    }

    pub fn attributions(&self) -> Vec<&str> {
        self.attributions.iter().map(|(t, _)| t.as_str()).collect()
    }

    /// Text as the control would display it: `prefix | a, b`
    pub fn text(&self) -> String {
        let joined = self.attributions().join(", ");
        match self.prefix.as_deref() {
            Some(prefix) if !joined.is_empty() => format!("{prefix} | {joined}"),
            Some(prefix) => prefix.to_string(),
            None => joined,
        }
    }
}

impl Default for AttributionControl {
    fn default() -> Self {
        Self::new()
    }
}

/// The live map surface overlays are attached to
pub struct MapSession {
    viewport: Viewport,
    options: MapOptions,
    layer_manager: LayerManager,
    attribution_control: AttributionControl,
    event_manager: EventManager,
    transition: Option<ViewTransition>,
}

impl MapSession {
    pub fn new(options: MapOptions, center: LatLng, zoom: f64) -> Self {
        let mut viewport = Viewport::new(center, zoom);
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);
        viewport.set_zoom(zoom);

        log::debug!(
            "map session bound to '{}' at ({:.4}, {:.4}) zoom {}",
            options.anchor,
            center.lat,
            center.lng,
            viewport.zoom
        );

        Self {
            viewport,
            options,
            layer_manager: LayerManager::new(),
            attribution_control: AttributionControl::new(),
            event_manager: EventManager::new(),
            transition: None,
        }
    }

    /// Moves the viewport. The logical view changes immediately; an animated
    /// move also records a transition for the host to draw, superseding any
    /// transition still in flight.
    pub fn set_view(&mut self, center: LatLng, zoom: f64, view: ViewOptions) {
        let from_center = self.viewport.center;
        let from_zoom = self.viewport.zoom;

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        if view.animate {
            if self.transition.take().is_some() {
                log::debug!("retargeting in-flight view transition");
            }
            self.transition = Some(ViewTransition {
                from_center,
                from_zoom,
                to_center: self.viewport.center,
                to_zoom: self.viewport.zoom,
                started_at: Instant::now(),
                duration: view.duration,
            });
            self.event_manager.emit(MapEvent::MoveStart {
                center: from_center,
            });
        } else {
            self.transition = None;
        }

        if self.viewport.center != from_center || self.viewport.zoom != from_zoom {
            self.event_manager.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
    }

    /// Clears a finished transition; returns whether one is still running
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.transition {
            Some(transition) if transition.is_finished(now) => {
                self.event_manager.emit(MapEvent::MoveEnd {
                    center: transition.to_center,
                });
                self.transition = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn transition(&self) -> Option<&ViewTransition> {
        self.transition.as_ref()
    }

    /// Attaches a layer and returns its handle. Attaching the same layer twice
    /// is a no-op.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let layer_id = layer.id();
        let layer_type = layer.layer_type();
        let attribution = layer.attribution().map(str::to_string);

        if self.layer_manager.add_layer(layer) {
            if let Some(text) = attribution {
                self.attribution_control.add_attribution(&text);
            }
            log::debug!(
                "attached {layer_type} {layer_id} ({} layers)",
                self.layer_manager.len()
            );
            self.event_manager.emit(MapEvent::LayerAdd { layer_id });
        }

        layer_id
    }

    /// Detaches a layer, handing it back; `None` if it was not attached
    pub fn remove_layer(&mut self, layer_id: LayerId) -> Option<Box<dyn Layer>> {
        let layer = self.layer_manager.remove_layer(layer_id)?;

        if let Some(text) = layer.attribution() {
            self.attribution_control.remove_attribution(text);
        }
        log::debug!("detached {} {layer_id}", layer.layer_type());
        self.event_manager.emit(MapEvent::LayerRemove { layer_id });

        Some(layer)
    }

    pub fn has_layer(&self, layer_id: LayerId) -> bool {
        self.layer_manager.contains(layer_id)
    }

    pub fn layer(&self, layer_id: LayerId) -> Option<&dyn Layer> {
        self.layer_manager.get_layer(layer_id)
    }

    /// Attached layers in drawing order
    pub fn layers(&self) -> Vec<&dyn Layer> {
        self.layer_manager.layers()
    }

    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn attribution_control(&self) -> &AttributionControl {
        &self.attribution_control
    }

    pub fn attribution_control_mut(&mut self) -> &mut AttributionControl {
        &mut self.attribution_control
    }
}
