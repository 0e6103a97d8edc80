//! Process-wide map shared by all components of the application.
//!
//! Components that display the map and components that control it (zoom buttons, search
//! boxes, layer switchers) often live in unrelated parts of the component tree. Instead of
//! threading the map through every component in between, any of them can call [`get`] and
//! receive the same instance.
//!
//! The map is constructed once, on the first call to [`get`], and lives until the process
//! exits. It is constructed detached: it is only given a surface when a
//! [`MapHost`](crate::host::MapHost) in shared mode is mounted. To construct it from a custom
//! description call [`configure`] (or [`configure_with`]) before anything calls [`get`].

use std::sync::{Arc, OnceLock};

use lazy_static::lazy_static;
use parking_lot::{Mutex, RwLock};

use crate::config::MapConfig;
use crate::error::MountError;
use crate::layer::TileLayer;
use crate::map::{Map, MapBuilder};

/// Map that can be used from several places. All access goes through the lock, so changing the
/// target of the map is mutually exclusive even if the map is used from several threads.
pub type SharedMap = Arc<RwLock<Map>>;

static SHARED_MAP: OnceLock<SharedMap> = OnceLock::new();

lazy_static! {
    static ref PENDING_BUILDER: Mutex<Option<MapBuilder>> = Mutex::new(None);
}

/// Returns the shared map, constructing it on the first call.
///
/// # Panics
///
/// Calling `get` from inside a [`Layer`](crate::layer::Layer) or
/// [`Messenger`](crate::Messenger) constructed by the very first `get` call is a re-entrant
/// construction and deadlocks or panics.
pub fn get() -> SharedMap {
    if let Some(map) = SHARED_MAP.get() {
        return map.clone();
    }

    // Held until the map is stored, so `configure_with` either runs before construction or
    // sees the map as initialized.
    let mut pending = PENDING_BUILDER.lock();
    SHARED_MAP
        .get_or_init(|| {
            let builder = pending.take().unwrap_or_else(default_builder);
            log::debug!("Constructing shared map");
            Arc::new(RwLock::new(builder.build()))
        })
        .clone()
}

/// Returns true if the shared map was already constructed.
pub fn is_initialized() -> bool {
    SHARED_MAP.get().is_some()
}

/// Sets the description the shared map will be constructed from.
///
/// Returns [`MountError::AlreadyInitialized`] if the map already exists. Calling it several
/// times before the map is constructed replaces the previous description.
pub fn configure(config: MapConfig) -> Result<(), MountError> {
    configure_with(config.into_builder()?)
}

/// Sets the builder the shared map will be constructed with.
///
/// Returns [`MountError::AlreadyInitialized`] if the map already exists.
pub fn configure_with(builder: MapBuilder) -> Result<(), MountError> {
    let mut pending = PENDING_BUILDER.lock();
    if is_initialized() {
        return Err(MountError::AlreadyInitialized);
    }

    *pending = Some(builder);
    Ok(())
}

fn default_builder() -> MapBuilder {
    MapBuilder::default()
        .with_latlon(0.0, 0.0)
        .with_zoom(2.0)
        .with_layer(TileLayer::osm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // All tests in this module share the process-wide map, so each of them only checks
    // properties that hold regardless of which test touched it first.

    #[test]
    fn same_instance_every_time() {
        let first = get();
        let second = get();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(is_initialized());
    }

    #[test]
    fn same_instance_across_threads() {
        let here = get();
        let there = std::thread::spawn(get).join().expect("thread panicked");
        assert!(Arc::ptr_eq(&here, &there));
    }

    #[test]
    fn cannot_configure_after_construction() {
        let _map = get();
        assert_matches!(
            configure(MapConfig::default()),
            Err(MountError::AlreadyInitialized)
        );
    }
}
