use std::any::Any;
use std::f64::consts::PI;

use mapmount_types::geo::{GeoPoint, GeoPoint2d};
use serde::{Deserialize, Serialize};

use super::Layer;
use crate::surface::Frame;
use crate::view::{MapView, MAX_ZOOM};

const OSM_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Index of a tile on the standard web tile scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TileIndex {
    /// X index (column), counted from the left (-180 deg).
    pub x: u32,
    /// Y index (row), counted from the top.
    pub y: u32,
    /// Z level.
    pub z: u32,
}

impl TileIndex {
    /// Index of the tile containing `point` at the given zoom level. Fractional zoom levels are
    /// rounded down.
    pub fn containing(point: &impl GeoPoint<Num = f64>, zoom: f64) -> Self {
        let z = zoom.floor().clamp(0.0, MAX_ZOOM) as u32;
        let n = 2f64.powi(z as i32);
        let max = (n - 1.0).max(0.0);

        let x = ((point.lon() + 180.0) / 360.0 * n).floor().clamp(0.0, max);

        let lat = point.lat().clamp(-85.0511, 85.0511).to_radians();
        let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n)
            .floor()
            .clamp(0.0, max);

        Self {
            x: x as u32,
            y: y as u32,
            z,
        }
    }
}

/// Layer drawing prerendered raster tiles from a tile source.
///
/// The source is given as an url template with `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    name: String,
    url_template: String,
    attribution: Option<String>,
}

impl TileLayer {
    /// Creates a new tile layer.
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: None,
        }
    }

    /// OpenStreetMap base layer.
    pub fn osm() -> Self {
        Self::new("osm", OSM_URL_TEMPLATE).with_attribution(OSM_ATTRIBUTION)
    }

    /// Sets the attribution text of the tile source.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Url template of the tile source.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Url of the tile with the given index.
    pub fn tile_url(&self, index: TileIndex) -> String {
        self.url_template
            .replace("{z}", &index.z.to_string())
            .replace("{x}", &index.x.to_string())
            .replace("{y}", &index.y.to_string())
    }
}

impl Layer for TileLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, view: &MapView, frame: &mut Frame) {
        let center: GeoPoint2d = view.center();
        let index = TileIndex::containing(&center, view.zoom());
        log::trace!("Layer {} draws tile {index:?}", self.name);
        frame.draw(&self.name, vec![self.tile_url(index)]);
    }

    fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
