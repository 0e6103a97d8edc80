use mapmount_types::geo::{GeoPoint, GeoPoint2d};
use mapmount_types::latlon;

use super::Map;
use crate::layer::Layer;
use crate::{MapView, Messenger};

const DEFAULT_ZOOM: f64 = 2.0;

/// Convenience type to initialize a [Map].
///
/// The built map is always detached. It is given a surface by a
/// [`MapHost`](crate::host::MapHost) once the component hosting it is mounted.
///
/// ```
/// use mapmount::MapBuilder;
/// use mapmount::layer::TileLayer;
///
/// let map = MapBuilder::default()
///     .with_latlon(55.0, 37.0)
///     .with_zoom(12.0)
///     .with_layer(TileLayer::osm())
///     .build();
/// ```
#[derive(Default)]
pub struct MapBuilder {
    center: Option<GeoPoint2d>,
    zoom: Option<f64>,
    layers: Vec<Box<dyn Layer>>,
    messenger: Option<Box<dyn Messenger>>,
}

impl MapBuilder {
    /// Sets the center point of the map.
    ///
    /// Defaults to [0, 0].
    pub fn with_center(mut self, center: &impl GeoPoint<Num = f64>) -> Self {
        self.center = Some(GeoPoint2d::from(center));
        self
    }

    /// Sets the center point of the map to the given geographical coordinates.
    ///
    /// Defaults to [0, 0].
    pub fn with_latlon(self, lat: f64, lon: f64) -> Self {
        self.with_center(&latlon!(lat, lon))
    }

    /// Sets the zoom level of the map.
    ///
    /// Defaults to 2.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Adds a layer on top of the previously added ones.
    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Sets the messenger used by the map to request redraws.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Creates the map.
    pub fn build(self) -> Map {
        let center = self.center.unwrap_or_default();
        let view = MapView::new(&center, self.zoom.unwrap_or(DEFAULT_ZOOM));

        log::debug!(
            "Creating map at {center:?}, zoom {}, {} layer(s)",
            view.zoom(),
            self.layers.len()
        );

        Map::new(view, self.layers, self.messenger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::layer::TileLayer;
    use crate::DummyMessenger;

    #[test]
    fn defaults() {
        let map = MapBuilder::default().build();
        assert_eq!(map.view().center(), latlon!(0.0, 0.0));
        assert_relative_eq!(map.view().zoom(), DEFAULT_ZOOM);
        assert!(map.layers().is_empty());
        assert!(map.target().is_none());
    }

    #[test]
    fn with_position_and_layers() {
        let map = MapBuilder::default()
            .with_latlon(55.0, 37.0)
            .with_zoom(12.0)
            .with_layer(TileLayer::osm())
            .with_layer(TileLayer::new("labels", "{z}/{x}/{y}"))
            .with_messenger(DummyMessenger)
            .build();

        assert_relative_eq!(map.view().center().lat(), 55.0);
        assert_relative_eq!(map.view().center().lon(), 37.0);
        assert_relative_eq!(map.view().zoom(), 12.0);

        let names: Vec<_> = map.layers().iter().map(|layer| layer.name()).collect();
        assert_eq!(names, ["osm", "labels"]);
    }
}
