use crate::{
    core::{
        constants::EARTH_RADIUS_METERS,
        geo::{LatLng, LatLngBounds},
    },
    layers::base::{Layer, LayerProperties, LayerType},
    MapError, Result,
};
use geo::{BoundingRect, HaversineDestination};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Stroke and fill settings shared by circles and polygons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathOptions {
    pub stroke: bool,
    pub color: String,
    pub weight: f32,
    pub opacity: f32,
    pub fill: bool,
    pub fill_color: Option<String>,
    pub fill_opacity: f32,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            stroke: true,
            color: "#3388ff".to_string(),
            weight: 3.0,
            opacity: 1.0,
            fill: true,
            fill_color: None,
            fill_opacity: 0.2,
        }
    }
}

/// A circle with a radius in meters
pub struct Circle {
    properties: LayerProperties,
    center: LatLng,
    radius: f64,
    options: PathOptions,
}

impl Circle {
    pub fn new(center: LatLng, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(MapError::InvalidGeometry(format!(
                "circle radius must be a non-negative number of meters, got {radius}"
            )));
        }

        Ok(Self {
            properties: LayerProperties::new(LayerType::Circle),
            center,
            radius,
            options: PathOptions::default(),
        })
    }

    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = options;
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Layer for Circle {
    crate::impl_layer_trait!(Circle, properties);
    crate::impl_serde_options!(options);

    /// Box around the spherical cap the circle covers. A cap reaching over a
    /// pole spans every longitude.
    fn bounds(&self) -> Option<LatLngBounds> {
        let angular = self.radius / EARTH_RADIUS_METERS;
        let lat = self.center.lat.to_radians();

        if lat + angular >= FRAC_PI_2 || lat - angular <= -FRAC_PI_2 {
            let lat_delta = angular.to_degrees();
            return Some(LatLngBounds::from_coords(
                (self.center.lat - lat_delta).max(-90.0),
                -180.0,
                (self.center.lat + lat_delta).min(90.0),
                180.0,
            ));
        }

        let center: geo_types::Point<f64> = self.center.into();
        let north = center.haversine_destination(0.0, self.radius);
        let south = center.haversine_destination(180.0, self.radius);
        // widest longitude of the cap, which sits poleward of due east/west
        let lng_delta = (angular.sin() / lat.cos()).asin().to_degrees();

        Some(LatLngBounds::from_coords(
            south.y(),
            self.center.lng - lng_delta,
            north.y(),
            self.center.lng + lng_delta,
        ))
    }

    fn lat_lng(&self) -> Option<LatLng> {
        Some(self.center)
    }
}

/// A closed shape through an ordered list of vertices
pub struct Polygon {
    properties: LayerProperties,
    points: Vec<LatLng>,
    options: PathOptions,
}

impl Polygon {
    pub fn new(points: Vec<LatLng>) -> Self {
        if points.len() < 3 {
            log::warn!(
                "polygon built from {} point(s); it will not enclose an area",
                points.len()
            );
        }

        Self {
            properties: LayerProperties::new(LayerType::Polygon),
            points,
            options: PathOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = options;
        self
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    fn to_geo(&self) -> geo_types::Polygon<f64> {
        let exterior: Vec<geo_types::Coord<f64>> =
            self.points.iter().map(|&point| point.into()).collect();
        geo_types::Polygon::new(geo_types::LineString::from(exterior), vec![])
    }
}

impl Layer for Polygon {
    crate::impl_layer_trait!(Polygon, properties);
    crate::impl_serde_options!(options);

    fn bounds(&self) -> Option<LatLngBounds> {
        self.to_geo().bounding_rect().map(LatLngBounds::from)
    }
}
