//! Drives a cartographer session without a renderer and prints what a host
//! would draw.
//!
//! ```text
//! RUST_LOG=debug cargo run --example headless
//! ```

use cartographer::prelude::*;
use instant::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = CartographerConfig::from_json(
        r#"{
            "startPoint": [36.16, -86.78],
            "startZoom": 12,
            "ref": "venue-map",
            "mapbox": false
        }"#,
    )?;
    let mut carto = Cartographer::init(config)?;

    carto.session_mut().on("layeradd", |event| {
        if let MapEvent::LayerAdd { layer_id } = event {
            log::info!("attached {layer_id}");
        }
    });
    carto.session_mut().on("layerremove", |event| {
        if let MapEvent::LayerRemove { layer_id } = event {
            log::info!("detached {layer_id}");
        }
    });

    carto.add_marker(
        MarkerParams::new("stage", 36.1627, -86.7816)
            .with_popup(Popup::new("Main stage"))
            .with_options(serde_json::json!({ "title": "Stage" })),
    )?;
    carto.add_marker(MarkerParams::new("gate", 36.20, -86.70))?;
    if carto
        .add_marker(MarkerParams::new("gate", 36.21, -86.71))?
        .is_replacement()
    {
        println!("gate moved");
    }
    carto.add_circle(
        CircleParams::new("festival", [36.1627, -86.7816], 400.0).with_options(PathOptions {
            color: "#e4572e".to_string(),
            ..Default::default()
        }),
    )?;
    carto.add_polygon(PolygonParams::new(
        "parking",
        [[36.158, -86.785], [36.158, -86.778], [36.154, -86.778], [36.154, -86.785]],
    ))?;

    for marker in ["stage", "gate"] {
        println!(
            "{marker} inside festival: {}",
            carto.contains("festival", marker)?
        );
    }

    carto.scroll_to_marker("stage", Some(16.0))?;
    let mut now = Instant::now();
    while let Some(transition) = carto.session().transition() {
        let (center, zoom) = transition.view_at(now);
        println!("  view ({:.4}, {:.4}) z{zoom:.2}", center.lat, center.lng);
        now += std::time::Duration::from_millis(50);
        carto.session_mut().tick(now);
    }

    if let Some(tiles) = carto.tile_layer() {
        let coord = TileCoord::from_lat_lng(&carto.session().viewport().center, 16);
        println!("center tile: {}", tiles.url(coord));
    }
    println!(
        "attribution: {}",
        carto.session().attribution_control().text()
    );

    if carto.remove_marker("gate").is_removed() {
        println!("gate removed");
    }
    carto.session_mut().process_events();

    Ok(())
}
