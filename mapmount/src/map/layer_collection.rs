use std::ops::{Index, IndexMut};

use crate::layer::Layer;

/// Ordered collection of map layers.
///
/// When a map is rendered, it draws all visible layers in the order they are stored in the
/// collection. Any layer can be temporary hidden with [`LayerCollection::hide`]. Hidden layers
/// are skipped when drawing, but retain their place in the collection.
#[derive(Default)]
pub struct LayerCollection(Vec<LayerEntry>);

struct LayerEntry {
    layer: Box<dyn Layer>,
    is_hidden: bool,
}

impl LayerCollection {
    /// Number of layers in the collection, including hidden ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a layer to the top of the collection.
    pub fn push(&mut self, layer: impl Layer + 'static) {
        self.0.push(layer.into());
    }

    /// Inserts a layer at position `index`, shifting all layers after it up.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, layer: impl Layer + 'static) {
        self.0.insert(index, layer.into());
    }

    /// Removes the layer at `index` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Box<dyn Layer> {
        self.0.remove(index).layer
    }

    /// Hides the layer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn hide(&mut self, index: usize) {
        self.0[index].is_hidden = true;
    }

    /// Shows a previously hidden layer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn show(&mut self, index: usize) {
        self.0[index].is_hidden = false;
    }

    /// Returns true if the layer at `index` is not hidden.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn is_visible(&self, index: usize) -> bool {
        !self.0[index].is_hidden
    }

    /// Iterates over all layers in the collection.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Layer> + '_ {
        self.0.iter().map(|entry| &*entry.layer)
    }

    /// Iterates over all visible layers in the collection.
    pub fn iter_visible(&self) -> impl Iterator<Item = &dyn Layer> + '_ {
        self.0
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &*entry.layer)
    }
}

impl Index<usize> for LayerCollection {
    type Output = dyn Layer;

    fn index(&self, index: usize) -> &Self::Output {
        &*self.0[index].layer
    }
}

impl IndexMut<usize> for LayerCollection {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut *self.0[index].layer
    }
}

impl From<Vec<Box<dyn Layer>>> for LayerCollection {
    fn from(value: Vec<Box<dyn Layer>>) -> Self {
        Self(value.into_iter().map(LayerEntry::from).collect())
    }
}

impl<T: Layer + 'static> From<T> for LayerEntry {
    fn from(value: T) -> Self {
        Self {
            layer: Box::new(value),
            is_hidden: false,
        }
    }
}

impl From<Box<dyn Layer>> for LayerEntry {
    fn from(value: Box<dyn Layer>) -> Self {
        Self {
            layer: value,
            is_hidden: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::tests::TestLayer;

    fn collection() -> LayerCollection {
        let layers: Vec<Box<dyn Layer>> = vec![
            Box::new(TestLayer("Layer A")),
            Box::new(TestLayer("Layer B")),
            Box::new(TestLayer("Layer C")),
        ];
        layers.into()
    }

    #[test]
    fn keeps_order() {
        let mut collection = collection();
        collection.insert(1, TestLayer("Layer D"));
        collection.push(TestLayer("Layer E"));

        let names: Vec<_> = collection.iter().map(|layer| layer.name()).collect();
        assert_eq!(
            names,
            ["Layer A", "Layer D", "Layer B", "Layer C", "Layer E"]
        );
    }

    #[test]
    fn hidden_layers_are_skipped() {
        let mut collection = collection();
        collection.hide(1);

        assert!(!collection.is_visible(1));
        let names: Vec<_> = collection.iter_visible().map(|layer| layer.name()).collect();
        assert_eq!(names, ["Layer A", "Layer C"]);

        collection.show(1);
        assert_eq!(collection.iter_visible().count(), 3);
    }

    #[test]
    fn remove_returns_layer() {
        let mut collection = collection();
        let removed = collection.remove(0);

        assert_eq!(removed.as_any().downcast_ref(), Some(&TestLayer("Layer A")));
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection[0].as_any().downcast_ref(),
            Some(&TestLayer("Layer B"))
        );
    }
}
