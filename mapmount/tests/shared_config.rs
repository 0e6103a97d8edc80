use mapmount::config::MapConfig;
use mapmount::error::MountError;
use mapmount::mapmount_types::latlon;
use mapmount::shared;

// Runs in its own process, so the shared map is not constructed yet.
#[test]
fn shared_map_is_built_from_configuration() {
    let config = MapConfig::from_json(
        r#"{
            "center": { "lat": 37.566, "lon": 126.9784 },
            "zoom": 8,
            "layers": [{ "name": "osm", "url_template": "https://tile.openstreetmap.org/{z}/{x}/{y}.png" }]
        }"#,
    )
    .expect("valid description");

    assert!(!shared::is_initialized());
    shared::configure(config).expect("not initialized yet");

    let map = shared::get();
    assert_eq!(map.read().view().center(), latlon!(37.566, 126.9784));
    assert_eq!(map.read().view().zoom(), 8.0);
    assert!(map.read().target().is_none());

    assert!(matches!(
        shared::configure(MapConfig::default()),
        Err(MountError::AlreadyInitialized)
    ));
}
