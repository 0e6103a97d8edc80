//! [Layers](Layer) specify a data source and the way the data should be drawn to the map.

use std::any::Any;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::surface::Frame;
use crate::view::MapView;

mod tile_layer;

pub use tile_layer::{TileIndex, TileLayer};

/// Layers specify a data source and the way the data should be drawn to the map.
pub trait Layer: MaybeSend + MaybeSync {
    /// Name of the layer, e.g. the name of its tile source.
    fn name(&self) -> &str;
    /// Draws the layer into the given frame.
    fn render(&self, view: &MapView, frame: &mut Frame);
    /// Attribution text of the data source, if any.
    fn attribution(&self) -> Option<&str> {
        None
    }
    /// A map stores layers as trait objects. This method can be used to convert the trait object into the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// A map stores layers as trait objects. This method can be used to convert the trait object into the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Layer that only records its name.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct TestLayer(pub &'static str);

    impl Layer for TestLayer {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self, _view: &MapView, frame: &mut Frame) {
            frame.draw(self.0, Vec::new());
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }
}
