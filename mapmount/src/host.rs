//! Component hosting a map.
//!
//! [`MapHost`] connects the declarative lifecycle of a component to the imperative target of a
//! [`Map`]: when the component's surface is committed, the map is targeted at it; right before
//! the surface is removed, the map is detached. Re-rendering the component does not touch the
//! map.
//!
//! The host can own its map ([`MapHost::private`]) or display a map owned by someone else
//! ([`MapHost::shared`], [`MapHost::with_map`]). Only the second way allows other components to
//! reach the map, and the map to be displayed at different places over the lifetime of the
//! application.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mapmount_types::cartesian::Size;
use parking_lot::RwLock;

use crate::map::Map;
use crate::messenger::Messenger;
use crate::shared::{self, SharedMap};
use crate::surface::{SurfaceHandle, SurfaceId};
use crate::tree::{Component, RenderContext};

/// Who owns the map displayed by a [`MapHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The host creates a new map on every mount and drops it on unmount.
    Private,
    /// The host only changes the target of a map that lives independently of it.
    Shared,
}

enum MapSource {
    Private(Box<dyn Fn() -> Map>),
    Shared(SharedMap),
}

#[derive(Clone)]
struct HostMessenger {
    requires_redraw: Arc<AtomicBool>,
}

impl Messenger for HostMessenger {
    fn request_redraw(&self) {
        self.requires_redraw.store(true, Ordering::Relaxed);
    }
}

/// Component displaying a map on its surface.
pub struct MapHost {
    source: MapSource,
    map: Option<SharedMap>,
    attached: Option<SurfaceHandle>,
    requires_redraw: Arc<AtomicBool>,
}

impl MapHost {
    /// Host displaying the process-wide [shared map](crate::shared).
    pub fn shared() -> Self {
        Self::with_map(shared::get())
    }

    /// Host displaying the given map. The host never creates or drops the map, it only sets and
    /// clears its target.
    pub fn with_map(map: SharedMap) -> Self {
        Self {
            map: Some(map.clone()),
            ..Self::new(MapSource::Shared(map))
        }
    }

    /// Host that creates its own map with `factory` every time it is mounted, and drops it when
    /// it is unmounted. The map is not reachable from other components.
    pub fn private(factory: impl Fn() -> Map + 'static) -> Self {
        Self::new(MapSource::Private(Box::new(factory)))
    }

    fn new(source: MapSource) -> Self {
        Self {
            source,
            map: None,
            attached: None,
            requires_redraw: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ownership mode of the host.
    pub fn ownership(&self) -> Ownership {
        match self.source {
            MapSource::Private(_) => Ownership::Private,
            MapSource::Shared(_) => Ownership::Shared,
        }
    }

    /// The map displayed by the host. A private map exists only while the host is mounted.
    pub fn map(&self) -> Option<SharedMap> {
        self.map.clone()
    }

    /// Surface the host attached its map to, if it is mounted.
    pub fn attached_to(&self) -> Option<SurfaceId> {
        self.attached.as_ref().map(SurfaceHandle::id)
    }

    fn owns_target(&self, map: &Map) -> bool {
        self.attached.is_some() && map.target() == self.attached.as_ref()
    }

    fn messenger(&self) -> HostMessenger {
        HostMessenger {
            requires_redraw: self.requires_redraw.clone(),
        }
    }
}

impl Component for MapHost {
    fn render(&mut self, ctx: &RenderContext) {
        log::trace!("Rendering map host {:?} of size {:?}", ctx.node, ctx.size);
    }

    fn mounted(&mut self, surface: &SurfaceHandle) {
        let map = match &self.source {
            MapSource::Private(factory) => {
                log::debug!("Creating private map for {}", surface.id());
                Arc::new(RwLock::new(factory()))
            }
            MapSource::Shared(map) => map.clone(),
        };

        {
            let mut map = map.write();
            if let Some(current) = map.target() {
                if current.is_valid() && current != surface {
                    log::warn!(
                        "Map is still attached to {} while mounting at {}, the new target wins",
                        current.id(),
                        surface.id()
                    );
                }
            }

            map.set_surface_messenger(Some(self.messenger()));
            map.set_target(Some(surface.clone()));
        }

        self.map = Some(map);
        self.attached = Some(surface.clone());
    }

    fn unmounting(&mut self) {
        if let Some(map) = &self.map {
            let mut map = map.write();
            if self.owns_target(&map) {
                map.set_target(None);
                map.set_surface_messenger(None::<HostMessenger>);
            } else {
                log::debug!(
                    "Map was re-targeted away from {:?}, leaving it attached",
                    self.attached_to()
                );
            }
        }

        self.attached = None;
        self.requires_redraw.store(false, Ordering::Relaxed);

        if self.ownership() == Ownership::Private {
            log::debug!("Dropping private map");
            self.map = None;
        }
    }

    fn resized(&mut self, size: Size) {
        if let Some(map) = &self.map {
            let mut map = map.write();
            if !self.owns_target(&map) {
                return;
            }

            map.set_size(size);
            map.redraw();
        }
    }

    fn paint(&mut self) {
        if !self.requires_redraw.swap(false, Ordering::Relaxed) {
            return;
        }

        if let Some(map) = &self.map {
            let map = map.read();
            if self.owns_target(&map) {
                map.render();
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for MapHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHost")
            .field("ownership", &self.ownership())
            .field("attached_to", &self.attached_to())
            .finish()
    }
}
