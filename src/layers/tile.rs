//! Tile layer configuration and URL templating.
//!
//! Fetching and drawing tiles belongs to the host; this layer only knows which
//! URL each tile lives at and which attribution to show.

use crate::{
    core::{
        constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, TILE_SIZE},
        geo::TileCoord,
    },
    layers::base::{Layer, LayerProperties, LayerType},
    MapError, Result,
};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    /// Available subdomains for `{s}`
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: Option<String>,
    /// Provider project/style id for `{id}`
    pub id: Option<String>,
    /// Provider access token for `{accessToken}`
    pub access_token: Option<String>,
    /// Tile size in pixels
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Request `@2x` tiles through `{r}`
    pub detect_retina: bool,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: None,
            id: None,
            access_token: None,
            tile_size: TILE_SIZE,
            min_zoom: DEFAULT_MIN_ZOOM as u8,
            max_zoom: DEFAULT_MAX_ZOOM as u8,
            detect_retina: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Subdomain,
    Zoom,
    X,
    Y,
    Retina,
    Id,
    AccessToken,
}

/// A parsed `{z}/{x}/{y}`-style URL template with its substitutions resolved
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    template: String,
    segments: Vec<Segment>,
    options: TileLayerOptions,
}

impl UrlTemplate {
    /// Parses `template`, failing on unbalanced braces, unknown placeholders or
    /// placeholders the options cannot fill
    pub fn parse(template: &str, options: TileLayerOptions) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                MapError::InvalidTemplate(format!("unclosed placeholder in {template}"))
            })?;
            let key = &after[..close];
            segments.push(Self::placeholder(key, &options, template)?);
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
            options,
        })
    }

    fn placeholder(key: &str, options: &TileLayerOptions, template: &str) -> Result<Segment> {
        let missing = |what: &str| {
            MapError::InvalidTemplate(format!("no value provided for {{{what}}} in {template}"))
        };

        match key {
            "s" if options.subdomains.is_empty() => Err(missing("s")),
            "s" => Ok(Segment::Subdomain),
            "z" => Ok(Segment::Zoom),
            "x" => Ok(Segment::X),
            "y" => Ok(Segment::Y),
            "r" => Ok(Segment::Retina),
            "id" if options.id.is_none() => Err(missing("id")),
            "id" => Ok(Segment::Id),
            "accessToken" if options.access_token.is_none() => Err(missing("accessToken")),
            "accessToken" => Ok(Segment::AccessToken),
            other => Err(MapError::InvalidTemplate(format!(
                "unknown placeholder {{{other}}} in {template}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl TileSource for UrlTemplate {
    fn url(&self, coord: TileCoord) -> String {
        let mut url = String::with_capacity(self.template.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Subdomain => {
                    let idx = (u64::from(coord.x) + u64::from(coord.y))
                        % self.options.subdomains.len() as u64;
                    url.push_str(&self.options.subdomains[idx as usize]);
                }
                Segment::Zoom => url.push_str(&coord.z.to_string()),
                Segment::X => url.push_str(&coord.x.to_string()),
                Segment::Y => url.push_str(&coord.y.to_string()),
                Segment::Retina => {
                    if self.options.detect_retina {
                        url.push_str("@2x");
                    }
                }
                Segment::Id => url.push_str(self.options.id.as_deref().unwrap_or_default()),
                Segment::AccessToken => {
                    url.push_str(self.options.access_token.as_deref().unwrap_or_default())
                }
            }
        }
        url
    }
}

/// Base layer drawing raster tiles from a URL template
pub struct TileLayer {
    properties: LayerProperties,
    source: UrlTemplate,
}

impl TileLayer {
    pub fn new(url_template: &str, options: TileLayerOptions) -> Result<Self> {
        let source = UrlTemplate::parse(url_template, options)?;
        Ok(Self {
            properties: LayerProperties::new(LayerType::Tile),
            source,
        })
    }

    pub fn url_template(&self) -> &str {
        self.source.as_str()
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.source.options
    }

    /// Concrete URL for one tile
    pub fn url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }
}

impl Layer for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn attribution(&self) -> Option<&str> {
        self.source.options.attribution.as_deref()
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url_template": self.source.template,
            "options": self.source.options,
        })
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        let options: TileLayerOptions = serde_json::from_value(options)?;
        self.source = UrlTemplate::parse(&self.source.template, options)?;
        Ok(())
    }
}
