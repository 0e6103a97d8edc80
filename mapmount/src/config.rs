//! Serializable description of a map: where it is centered, how close it is zoomed and which
//! tile sources it shows.
//!
//! ```json
//! {
//!     "center": { "lat": 0.0, "lon": 0.0 },
//!     "zoom": 2,
//!     "layers": [
//!         { "name": "osm", "url_template": "https://tile.openstreetmap.org/{z}/{x}/{y}.png" }
//!     ]
//! }
//! ```

use std::path::Path;

use mapmount_types::geo::{GeoPoint, GeoPoint2d};
use mapmount_types::latlon;
use serde::{Deserialize, Serialize};

use crate::error::MountError;
use crate::layer::TileLayer;
use crate::map::MapBuilder;
use crate::view::MAX_ZOOM;

/// Description of a tile layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayerConfig {
    /// Name of the layer.
    pub name: String,
    /// Url template of the tile source with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Attribution text of the tile source.
    #[serde(default)]
    pub attribution: Option<String>,
}

impl From<LayerConfig> for TileLayer {
    fn from(value: LayerConfig) -> Self {
        let layer = TileLayer::new(value.name, value.url_template);
        match value.attribution {
            Some(attribution) => layer.with_attribution(attribution),
            None => layer,
        }
    }
}

/// Description of a map.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapConfig {
    /// Center point of the map.
    pub center: GeoPoint2d,
    /// Zoom level, in `[0, MAX_ZOOM]`.
    pub zoom: f64,
    /// Layers from bottom to top.
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        let osm = TileLayer::osm();
        Self {
            center: latlon!(0.0, 0.0),
            zoom: 2.0,
            layers: vec![LayerConfig {
                name: "osm".to_string(),
                url_template: osm.url_template().to_string(),
                attribution: crate::layer::Layer::attribution(&osm).map(str::to_string),
            }],
        }
    }
}

impl MapConfig {
    /// Parses and validates a map description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MountError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a map description from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MountError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the center is a valid geographic point and the zoom level is in range.
    pub fn validate(&self) -> Result<(), MountError> {
        if !self.center.is_valid() {
            return Err(MountError::InvalidCenter {
                lat: self.center.lat(),
                lon: self.center.lon(),
            });
        }

        if !(0.0..=MAX_ZOOM).contains(&self.zoom) {
            return Err(MountError::InvalidZoom(self.zoom));
        }

        Ok(())
    }

    /// Validates the description and converts it into a map builder.
    pub fn into_builder(self) -> Result<MapBuilder, MountError> {
        self.validate()?;

        let builder = MapBuilder::default()
            .with_center(&self.center)
            .with_zoom(self.zoom);

        Ok(self
            .layers
            .into_iter()
            .fold(builder, |builder, layer| {
                builder.with_layer(TileLayer::from(layer))
            }))
    }
}
