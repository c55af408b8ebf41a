//! Attribution text rendered from named tera templates.

use crate::{
    core::{config::CartographerConfig, constants::ATTRIBUTION_TEMPLATE},
    MapError, Result,
};
use once_cell::sync::Lazy;
use tera::{Context, Tera};

const DEFAULT_ATTRIBUTION: &str = concat!(
    "{% if mapbox %}",
    "Map data &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, ",
    "Imagery &copy; <a href=\"https://www.mapbox.com/\">Mapbox</a>",
    "{% else %}",
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, ",
    "Tiles style by <a href=\"https://www.hotosm.org/\">Humanitarian OpenStreetMap Team</a> ",
    "hosted by <a href=\"https://openstreetmap.fr/\">OpenStreetMap France</a>",
    "{% endif %}"
);

// Compiled once; every renderer starts from a clone
static BUILTIN_TEMPLATES: Lazy<std::result::Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(ATTRIBUTION_TEMPLATE, DEFAULT_ATTRIBUTION)
        .map_err(|e| e.to_string())?;
    Ok(tera)
});

pub struct AttributionRenderer {
    tera: Tera,
}

impl AttributionRenderer {
    pub fn new() -> Result<Self> {
        let tera = BUILTIN_TEMPLATES
            .as_ref()
            .map_err(|e| MapError::InvalidTemplate(e.clone()))?
            .clone();
        Ok(Self { tera })
    }

    /// Adds or replaces a named template
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera.add_raw_template(name, source)?;
        Ok(())
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        let rendered = self.tera.render(name, context)?;
        Ok(rendered.trim().to_string())
    }

    /// Attribution for the tile provider `config` selects
    pub fn render_default(&self, config: &CartographerConfig) -> Result<String> {
        let mut context = Context::new();
        context.insert("mapbox", &config.mapbox.is_some());
        context.insert(
            "project_id",
            &config.mapbox.as_ref().map(|m| m.project_id.as_str()),
        );
        self.render(ATTRIBUTION_TEMPLATE, &context)
    }
}
