use cartographer::{
    constants::{MAPBOX_TILE_URL_TEMPLATE, PUBLIC_TILE_URL_TEMPLATE},
    Cartographer, CartographerConfig, CircleParams, Insertion, LatLng, Layer, MapError, MapEvent,
    MarkerParams, OverlayKind, PolygonParams, Removal, TileCoord,
};

fn init() -> Cartographer {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut carto = Cartographer::init(CartographerConfig::default()).unwrap();
    // drop the tile layer's attach event
    carto.session_mut().process_events();
    carto
}

fn removals(events: &[MapEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, MapEvent::LayerRemove { .. }))
        .count()
}

#[test]
fn add_then_remove_marker_detaches_exactly_once() {
    let mut carto = init();
    let handle = carto
        .add_marker(MarkerParams::new("hq", 36.16, -86.78))
        .unwrap()
        .handle();

    assert_eq!(carto.remove_marker("hq"), Removal::Removed(handle));
    assert_eq!(carto.handle(OverlayKind::Marker, "hq"), None);
    assert!(carto.ids(OverlayKind::Marker).is_empty());
    assert!(!carto.session().has_layer(handle));

    let events = carto.session_mut().process_events();
    assert_eq!(removals(&events), 1);
    assert!(events.contains(&MapEvent::LayerRemove { layer_id: handle }));

    // a second removal is reported, not repeated
    assert_eq!(carto.remove_marker("hq"), Removal::Absent);
    assert_eq!(removals(&carto.session_mut().process_events()), 0);
}

#[test]
fn removing_unknown_ids_reports_absent() {
    let mut carto = init();

    assert_eq!(carto.remove_marker("nope"), Removal::Absent);
    assert_eq!(carto.remove_circle("nope"), Removal::Absent);
    assert_eq!(carto.remove_polygon("nope"), Removal::Absent);
    assert!(carto.session_mut().process_events().is_empty());
}

#[test]
fn circle_contains_nearby_marker_only() {
    let mut carto = init();
    carto
        .add_circle(CircleParams::new("zone", [0.0, 0.0], 100.0))
        .unwrap();
    carto
        .add_marker(MarkerParams::new("near", 0.0001, 0.0001))
        .unwrap();
    carto.add_marker(MarkerParams::new("far", 10.0, 10.0)).unwrap();

    assert!(carto.contains("zone", "near").unwrap());
    assert!(!carto.contains("zone", "far").unwrap());
}

#[test]
fn contains_reports_missing_overlays() {
    let mut carto = init();
    carto
        .add_circle(CircleParams::new("zone", [0.0, 0.0], 100.0))
        .unwrap();
    carto.add_marker(MarkerParams::new("m", 0.0, 0.0)).unwrap();

    match carto.contains("missing", "m") {
        Err(MapError::NotFound { id, .. }) => assert_eq!(id, "missing"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(matches!(
        carto.contains("zone", "ghost"),
        Err(MapError::NotFound { kind: "marker", .. })
    ));
}

#[test]
fn polygon_container_uses_its_bounds() {
    let mut carto = init();
    carto
        .add_polygon(PolygonParams::new(
            "triangle",
            [[0.0, 0.0], [0.0, 2.0], [2.0, 0.0]],
        ))
        .unwrap();
    // inside the bounding box but outside the triangle itself
    carto.add_marker(MarkerParams::new("corner", 1.9, 1.9)).unwrap();
    carto.add_marker(MarkerParams::new("outside", 3.0, 1.0)).unwrap();

    assert!(carto.contains("triangle", "corner").unwrap());
    assert!(!carto.contains("triangle", "outside").unwrap());
}

#[test]
fn reusing_an_id_replaces_and_detaches_the_first_marker() {
    let mut carto = init();
    let first = carto
        .add_marker(MarkerParams::new("dup", 1.0, 1.0))
        .unwrap()
        .handle();
    let second = carto.add_marker(MarkerParams::new("dup", 2.0, 2.0)).unwrap();

    assert_eq!(
        second,
        Insertion::Replaced {
            handle: second.handle(),
            previous: first
        }
    );
    assert_eq!(carto.ids(OverlayKind::Marker), vec!["dup"]);
    assert_eq!(
        carto.marker("dup").map(|m| m.position()),
        Some(LatLng::new(2.0, 2.0))
    );
    assert!(!carto.session().has_layer(first));
    // tile layer plus the surviving marker
    assert_eq!(carto.session().layers().len(), 2);
}

#[test]
fn kinds_have_separate_namespaces() {
    let mut carto = init();
    carto.add_marker(MarkerParams::new("a", 0.0, 0.0)).unwrap();
    let circle = carto
        .add_circle(CircleParams::new("a", [0.0, 0.0], 10.0))
        .unwrap();
    let polygon = carto
        .add_polygon(PolygonParams::new("a", [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]))
        .unwrap();

    assert!(matches!(circle, Insertion::Inserted(_)));
    assert!(matches!(polygon, Insertion::Inserted(_)));
    assert!(carto.remove_circle("a").is_removed());
    assert!(carto.marker("a").is_some());
    assert!(carto.polygon("a").is_some());
}

#[test]
fn public_tiles_when_mapbox_is_false() {
    let config = CartographerConfig::from_json(r#"{"mapbox": false}"#).unwrap();
    let carto = Cartographer::init(config).unwrap();
    let tiles = carto.tile_layer().unwrap();

    assert_eq!(tiles.url_template(), PUBLIC_TILE_URL_TEMPLATE);
    assert_eq!(tiles.tile_options().id, None);
    assert_eq!(tiles.tile_options().access_token, None);
    assert!(tiles.url(TileCoord::new(0, 0, 1)).starts_with("https://a.tile.openstreetmap.fr/hot/1/"));
}

#[test]
fn mapbox_tiles_forward_project_and_token() {
    let config = CartographerConfig::from_json(
        r#"{"mapbox": {"projectId": "p", "accessToken": "t"}}"#,
    )
    .unwrap();
    let carto = Cartographer::init(config).unwrap();
    let tiles = carto.tile_layer().unwrap();

    assert_eq!(tiles.url_template(), MAPBOX_TILE_URL_TEMPLATE);
    assert_eq!(tiles.tile_options().id.as_deref(), Some("p"));
    assert_eq!(tiles.tile_options().access_token.as_deref(), Some("t"));
    assert_eq!(
        tiles.url(TileCoord::new(1, 2, 3)),
        "https://api.tiles.mapbox.com/v4/p/3/1/2.png?access_token=t"
    );
    assert!(tiles.attribution().unwrap_or_default().contains("Mapbox"));
}

#[test]
fn pan_to_defaults_to_start_zoom() {
    let mut carto = Cartographer::init(CartographerConfig::default().with_start_zoom(11.0)).unwrap();

    carto.pan_to([1.0, 2.0], None);
    assert_eq!(carto.session().viewport().center, LatLng::new(1.0, 2.0));
    assert_eq!(carto.session().viewport().zoom, 11.0);
    assert!(carto.session().transition().is_some());

    carto.pan_to([1.0, 2.0], Some(10.0));
    assert_eq!(carto.session().viewport().zoom, 10.0);

    // zero is a real zoom level, not "unset"
    carto.pan_to([1.0, 2.0], Some(0.0));
    assert_eq!(carto.session().viewport().zoom, 0.0);
}

#[test]
fn circles_reject_bad_radius() {
    let mut carto = init();
    let result = carto.add_circle(CircleParams::new("bad", [0.0, 0.0], -5.0));

    assert!(matches!(result, Err(MapError::InvalidGeometry(_))));
    assert!(carto.circle("bad").is_none());
}

#[test]
fn params_deserialize_from_host_json() {
    let mut carto = init();
    let marker: MarkerParams = serde_json::from_str(
        r#"{"id": "hq", "lat": 1, "long": 2, "options": {"title": "HQ"},
            "popup": {"content": "Hello", "options": {"maxWidth": 200}}}"#,
    )
    .unwrap();
    let circle: CircleParams =
        serde_json::from_str(r#"{"id": "zone", "centerPoint": [1, 2], "radius": 500}"#).unwrap();

    carto.add_marker(marker).unwrap();
    carto.add_circle(circle).unwrap();

    let popup = carto.marker("hq").and_then(|m| m.popup()).unwrap();
    assert_eq!(popup.options.max_width, 200);
    assert!(carto.contains("zone", "hq").unwrap());
}

#[test]
fn reusing_an_id_replaces_and_detaches_circles_and_polygons() {
    let mut carto = init();
    let first_circle = carto
        .add_circle(CircleParams::new("zone", [0.0, 0.0], 100.0))
        .unwrap()
        .handle();
    let second_circle = carto
        .add_circle(CircleParams::new("zone", [5.0, 5.0], 200.0))
        .unwrap();

    assert!(matches!(
        second_circle,
        Insertion::Replaced { previous, .. } if previous == first_circle
    ));
    assert!(!carto.session().has_layer(first_circle));
    assert!(carto.session().has_layer(second_circle.handle()));
    assert_eq!(carto.circle("zone").map(|c| c.radius()), Some(200.0));

    let first_polygon = carto
        .add_polygon(PolygonParams::new("area", [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]))
        .unwrap()
        .handle();
    let second_polygon = carto
        .add_polygon(PolygonParams::new("area", [[2.0, 2.0], [2.0, 3.0], [3.0, 2.0]]))
        .unwrap();

    assert_eq!(
        second_polygon,
        Insertion::Replaced {
            handle: second_polygon.handle(),
            previous: first_polygon
        }
    );
    assert!(!carto.session().has_layer(first_polygon));
    assert_eq!(carto.ids(OverlayKind::Circle), vec!["zone"]);
    assert_eq!(carto.ids(OverlayKind::Polygon), vec!["area"]);
    // tile layer plus one circle and one polygon
    assert_eq!(carto.session().layers().len(), 3);

    let events = carto.session_mut().process_events();
    assert!(events.contains(&MapEvent::LayerRemove { layer_id: first_circle }));
    assert!(events.contains(&MapEvent::LayerRemove { layer_id: first_polygon }));
    assert_eq!(removals(&events), 2);
}

#[test]
fn circles_reaching_over_a_pole_contain_their_center() {
    let mut carto = init();
    carto
        .add_circle(CircleParams::new("polar", [89.999, 0.0], 1_000.0))
        .unwrap();
    carto
        .add_circle(CircleParams::new("arctic", [80.0, 20.0], 1_500_000.0))
        .unwrap();
    carto.add_marker(MarkerParams::new("pole", 89.999, 0.0)).unwrap();
    carto.add_marker(MarkerParams::new("across", 85.0, -160.0)).unwrap();
    carto.add_marker(MarkerParams::new("equator", 0.0, 20.0)).unwrap();

    assert!(carto.contains("polar", "pole").unwrap());
    assert!(carto.contains("arctic", "pole").unwrap());
    assert!(carto.contains("arctic", "across").unwrap());
    assert!(!carto.contains("arctic", "equator").unwrap());
}
