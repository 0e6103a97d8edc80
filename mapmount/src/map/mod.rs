use mapmount_types::cartesian::Size;

use crate::layer::Layer;
use crate::messenger::Messenger;
use crate::surface::{Frame, SurfaceHandle};
use crate::view::MapView;

mod builder;
mod layer_collection;

pub use builder::MapBuilder;
pub use layer_collection::LayerCollection;

/// Map specifies a set of layers, the view that should be rendered and the surface it is
/// rendered to.
///
/// A map can exist without a surface (detached). It is then still possible to change its view
/// and layers, but nothing is drawn until a target is set with [`Map::set_target`].
pub struct Map {
    view: MapView,
    layers: LayerCollection,
    messenger: Option<Box<dyn Messenger>>,
    surface_messenger: Option<Box<dyn Messenger>>,
    target: Option<SurfaceHandle>,
    target_changes: u64,
}

impl Map {
    /// Creates a new detached map.
    pub fn new(
        view: MapView,
        layers: Vec<Box<dyn Layer>>,
        messenger: Option<Box<dyn Messenger + 'static>>,
    ) -> Self {
        Self {
            view,
            layers: layers.into(),
            messenger,
            surface_messenger: None,
            target: None,
            target_changes: 0,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Returns the list of map's layers.
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Returns a mutable reference to the list of map's layers.
    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        self.redraw();
    }

    /// Request redraw of the map. Both the application messenger and the messenger of the
    /// surface the map is displayed on are notified.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
        if let Some(messenger) = &self.surface_messenger {
            messenger.request_redraw()
        }
    }

    /// Set the size of the map.
    pub fn set_size(&mut self, new_size: Size) {
        self.view = self.view.with_size(new_size);
    }

    /// Sets the new event messenger for the map.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }

    /// Sets the messenger of the component displaying the map. Unlike [`Map::set_messenger`],
    /// this is managed by the host of the map and does not replace the application messenger.
    pub fn set_surface_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.surface_messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }

    /// Sets the surface the map is rendered to, or detaches the map with `None`.
    ///
    /// The last call wins: setting a new target replaces the previous one, and detaching an
    /// already detached map changes nothing but the [`Map::target_changes`] counter. When a
    /// target is set, the map takes the size of the surface and requests a redraw.
    pub fn set_target(&mut self, target: Option<SurfaceHandle>) {
        self.target_changes += 1;

        match (&self.target, &target) {
            (Some(old), Some(new)) if old != new => {
                log::debug!("Map is re-targeted from {} to {}", old.id(), new.id())
            }
            (_, Some(new)) => log::debug!("Map is attached to {}", new.id()),
            (Some(old), None) => log::debug!("Map is detached from {}", old.id()),
            (None, None) => log::trace!("Detaching a map that has no target"),
        }

        self.target = target;

        if let Some(size) = self.target.as_ref().and_then(|target| target.size()) {
            self.set_size(size);
            self.redraw();
        }
    }

    /// Surface the map is currently targeted at.
    pub fn target(&self) -> Option<&SurfaceHandle> {
        self.target.as_ref()
    }

    /// Returns true if the map has a target and that target surface still exists.
    pub fn is_attached(&self) -> bool {
        self.target.as_ref().is_some_and(|target| target.is_valid())
    }

    /// Number of times [`Map::set_target`] was called over the lifetime of the map.
    pub fn target_changes(&self) -> u64 {
        self.target_changes
    }

    /// Draws all visible layers to the target surface.
    ///
    /// Returns false and draws nothing if the map has no target, the target has zero size or the
    /// target surface no longer exists.
    pub fn render(&self) -> bool {
        let Some(target) = &self.target else {
            log::trace!("Map has no target, skipping render");
            return false;
        };

        if self.view.size().is_zero() {
            log::trace!("Map target {} has zero size, skipping render", target.id());
            return false;
        }

        let mut frame = Frame::new(self.view);
        for layer in self.layers.iter_visible() {
            layer.render(&self.view, &mut frame);
        }

        if !target.present(frame) {
            log::warn!("Map target {} no longer exists", target.id());
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use mapmount_types::latlon;

    use super::*;
    use crate::layer::tests::TestLayer;
    use crate::surface::Surface;

    #[derive(Clone, Default)]
    struct CountingMessenger(Arc<AtomicUsize>);

    impl Messenger for CountingMessenger {
        fn request_redraw(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn test_map() -> Map {
        Map::new(
            MapView::new(&latlon!(0.0, 0.0), 2.0),
            vec![Box::new(TestLayer("base")), Box::new(TestLayer("overlay"))],
            None,
        )
    }

    fn committed_surface(width: f64, height: f64) -> Surface {
        let mut surface = Surface::new(Size::new(width, height));
        surface.commit();
        surface
    }

    #[test]
    fn new_map_is_detached() {
        let map = test_map();
        assert!(map.target().is_none());
        assert!(!map.is_attached());
        assert!(!map.render());
    }

    #[test]
    fn attaching_takes_surface_size() {
        let mut map = test_map();
        let surface = committed_surface(640.0, 480.0);

        map.set_target(surface.handle());
        assert!(map.is_attached());
        assert_eq!(map.view().size(), Size::new(640.0, 480.0));
    }

    #[test]
    fn render_draws_visible_layers_to_target() {
        let mut map = test_map();
        let surface = committed_surface(640.0, 480.0);
        map.set_target(surface.handle());
        map.layers_mut().hide(1);

        assert!(map.render());
        let frame = surface.last_frame().expect("no frame");
        let layers: Vec<_> = frame.draws().iter().map(|d| d.layer.as_str()).collect();
        assert_eq!(layers, ["base"]);
    }

    #[test]
    fn last_target_wins() {
        let mut map = test_map();
        let a = committed_surface(100.0, 100.0);
        let b = committed_surface(200.0, 200.0);

        map.set_target(a.handle());
        map.set_target(b.handle());
        map.render();

        assert_eq!(map.target().map(|t| t.id()), Some(b.id()));
        assert_eq!(a.frame_count(), 0);
        assert_eq!(b.frame_count(), 1);
        assert_eq!(map.target_changes(), 2);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut map = test_map();
        let surface = committed_surface(100.0, 100.0);

        map.set_target(surface.handle());
        map.set_target(None);
        map.set_target(None);

        assert!(map.target().is_none());
        assert_eq!(map.target_changes(), 3);
    }

    #[test]
    fn zero_sized_target_is_not_drawn() {
        let mut map = test_map();
        let surface = committed_surface(0.0, 480.0);
        map.set_target(surface.handle());

        assert!(map.is_attached());
        assert!(!map.render());
        assert_eq!(surface.frame_count(), 0);
    }

    #[test]
    fn dropped_target_is_not_drawn() {
        let mut map = test_map();
        let surface = committed_surface(100.0, 100.0);
        map.set_target(surface.handle());

        drop(surface);
        assert!(!map.is_attached());
        assert!(!map.render());
    }

    #[test]
    fn redraw_requests() {
        let messenger = CountingMessenger::default();
        let mut map = test_map();
        map.set_messenger(Some(messenger.clone()));

        let surface = committed_surface(100.0, 100.0);
        map.set_target(surface.handle());
        assert_eq!(messenger.0.load(Ordering::Relaxed), 1);

        map.set_view(map.view().with_zoom(3.0));
        assert_eq!(messenger.0.load(Ordering::Relaxed), 2);

        map.set_target(None);
        assert_eq!(messenger.0.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn surface_messenger_does_not_replace_application_messenger() {
        let app = CountingMessenger::default();
        let surface = CountingMessenger::default();
        let mut map = test_map();
        map.set_messenger(Some(app.clone()));
        map.set_surface_messenger(Some(surface.clone()));

        map.redraw();
        assert_eq!(app.0.load(Ordering::Relaxed), 1);
        assert_eq!(surface.0.load(Ordering::Relaxed), 1);

        map.set_surface_messenger(None::<CountingMessenger>);
        map.redraw();
        assert_eq!(app.0.load(Ordering::Relaxed), 2);
        assert_eq!(surface.0.load(Ordering::Relaxed), 1);
    }
}
