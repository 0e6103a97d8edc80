use mapmount_types::cartesian::Size;
use mapmount_types::geo::{GeoPoint, GeoPoint2d};
use serde::{Deserialize, Serialize};

/// Maximum zoom level a map can be displayed with.
pub const MAX_ZOOM: f64 = 24.0;

// resolution of zoom level 0 on the standard web tile scheme, meters per pixel
const TOP_RESOLUTION: f64 = 156543.03392800014;

/// Part of the map that is displayed: center point, zoom level and the size of the surface the
/// map is drawn to.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MapView {
    center: GeoPoint2d,
    zoom: f64,
    size: Size,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: GeoPoint2d::default(),
            zoom: 0.0,
            size: Size::new(0.0, 0.0),
        }
    }
}

impl MapView {
    /// Creates a new view. The zoom level is clamped to `[0, MAX_ZOOM]`.
    pub fn new(center: &impl GeoPoint<Num = f64>, zoom: f64) -> Self {
        Self {
            center: GeoPoint2d::from(center),
            zoom: zoom.clamp(0.0, MAX_ZOOM),
            ..Default::default()
        }
    }

    /// Center of the view.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Zoom level of the view.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Size of the surface the view is displayed on. Zero until the map is attached to a surface.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size of one pixel in meters at the equator.
    pub fn resolution(&self) -> f64 {
        TOP_RESOLUTION / 2f64.powf(self.zoom)
    }

    /// Returns a copy of the view with a different center.
    pub fn with_center(&self, center: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            center: GeoPoint2d::from(center),
            ..*self
        }
    }

    /// Returns a copy of the view with a different zoom level.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self {
            zoom: zoom.clamp(0.0, MAX_ZOOM),
            ..*self
        }
    }

    /// Returns a copy of the view with a different surface size.
    pub fn with_size(&self, size: Size) -> Self {
        Self { size, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mapmount_types::latlon;

    #[test]
    fn zoom_is_clamped() {
        let view = MapView::new(&latlon!(0.0, 0.0), 30.0);
        assert_relative_eq!(view.zoom(), MAX_ZOOM);
        assert_relative_eq!(view.with_zoom(-1.0).zoom(), 0.0);
    }

    #[test]
    fn resolution_halves_with_each_level() {
        let view = MapView::new(&latlon!(0.0, 0.0), 1.0);
        assert_relative_eq!(view.resolution() * 2.0, view.with_zoom(0.0).resolution());
    }

    #[test]
    fn with_size_keeps_position() {
        let view = MapView::new(&latlon!(55.0, 37.0), 10.0).with_size(Size::new(800.0, 600.0));
        assert_eq!(view.center(), latlon!(55.0, 37.0));
        assert_relative_eq!(view.zoom(), 10.0);
        assert_eq!(view.size(), Size::new(800.0, 600.0));
    }
}
