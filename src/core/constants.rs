//! Defaults shared by the config layer and the session.

/// Initial map center (Nashville) as `[lat, lng]`.
pub const DEFAULT_START_POINT: [f64; 2] = [36.16, -86.78];

/// Initial zoom level.
pub const DEFAULT_START_ZOOM: f64 = 13.0;

/// Identifier of the page anchor the session binds to.
pub const DEFAULT_ANCHOR: &str = "map";

/// Where the default marker icon images live.
pub const DEFAULT_ICON_IMAGE_PATH: &str = "/assets/modules/cartographer/img/";

/// Public tile provider (OpenStreetMap France, humanitarian style).
pub const PUBLIC_TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";

/// Commercial tile provider, parameterized by project id and access token.
pub const MAPBOX_TILE_URL_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";

/// Name of the built-in attribution template.
pub const ATTRIBUTION_TEMPLATE: &str = "cartographer.attribution";

/// Prefix shown in front of attributions until it is disabled.
pub const DEFAULT_ATTRIBUTION_PREFIX: &str = "Cartographer";

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom range of the public tile provider.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Duration of an animated `set_view`.
pub const DEFAULT_PAN_DURATION_MS: u64 = 250;

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Where a bound popup opens relative to the icon anchor.
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (1, -34);

/// Mean earth radius in meters, matching `geo`'s haversine algorithms.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;
