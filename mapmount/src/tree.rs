//! Minimal component-tree runtime.
//!
//! The runtime owns a surface per mounted component and drives the lifecycle of components in
//! the same order a declarative UI framework does:
//!
//! 1. **render** - [`Component::render`] is called. The surface exists but is not committed yet,
//!    so no handle to it is available.
//! 2. **commit** - the surface becomes part of the visible tree.
//! 3. **effects** - [`Component::mounted`] is queued and called with the surface handle on the
//!    next [`ComponentTree::flush_effects`], never synchronously from [`ComponentTree::mount`].
//!
//! Re-rendering a component ([`ComponentTree::rerender`]) calls only `render`. Unmounting calls
//! [`Component::unmounting`] synchronously and only then drops the surface, so the handle given
//! to `mounted` is valid for the whole time between the two calls.

use std::any::Any;
use std::collections::{BTreeMap, VecDeque};

use mapmount_types::cartesian::Size;
use serde::{Deserialize, Serialize};

use crate::error::MountError;
use crate::surface::{Surface, SurfaceHandle};

/// Identifier of a mounted component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// One dimension of a surface size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum Dimension {
    /// Takes the whole corresponding dimension of the viewport.
    Fill,
    /// Fixed size in pixels.
    Px(f64),
}

impl Dimension {
    fn resolve(self, available: f64) -> f64 {
        match self {
            Dimension::Fill => available,
            Dimension::Px(px) => px.max(0.0),
        }
    }
}

/// Layout of a component's surface, provided by the application's stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Style {
    /// Width of the surface.
    pub width: Dimension,
    /// Height of the surface.
    pub height: Dimension,
}

impl Style {
    /// Style filling the whole viewport.
    pub fn fill() -> Self {
        Self {
            width: Dimension::Fill,
            height: Dimension::Fill,
        }
    }

    /// Style with fixed size in pixels.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
        }
    }

    /// Size of the surface inside the given viewport.
    pub fn resolve(&self, viewport: Size) -> Size {
        Size::new(
            self.width.resolve(viewport.width()),
            self.height.resolve(viewport.height()),
        )
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::fill()
    }
}

/// Information available to a component while it renders.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Node being rendered.
    pub node: NodeId,
    /// Size of the component's surface after layout.
    pub size: Size,
}

/// A component that can be mounted to a [`ComponentTree`].
pub trait Component {
    /// Render phase. Called on mount and on every re-render.
    fn render(&mut self, ctx: &RenderContext);

    /// Called once after the component's surface was committed.
    fn mounted(&mut self, _surface: &SurfaceHandle) {}

    /// Called once before the component's surface is dropped, if [`Component::mounted`] was
    /// called before.
    fn unmounting(&mut self) {}

    /// Called when layout changed the size of the component's mounted surface.
    fn resized(&mut self, _size: Size) {}

    /// Called on every [`ComponentTree::frame`] for mounted components.
    fn paint(&mut self) {}

    /// Can be used to convert the trait object into the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Can be used to convert the trait object into the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Node {
    component: Box<dyn Component>,
    surface: Surface,
    style: Style,
    is_mounted: bool,
}

/// Set of mounted components with their surfaces.
pub struct ComponentTree {
    nodes: BTreeMap<NodeId, Node>,
    pending_effects: VecDeque<NodeId>,
    viewport: Size,
    next_id: u64,
}

impl ComponentTree {
    /// Creates an empty tree with the given viewport size.
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: BTreeMap::new(),
            pending_effects: VecDeque::new(),
            viewport,
            next_id: 0,
        }
    }

    /// Size of the viewport.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Renders the component and commits its surface. The component's
    /// [`mounted`](Component::mounted) effect is queued until the next
    /// [`flush_effects`](Self::flush_effects).
    pub fn mount(&mut self, component: impl Component + 'static, style: Style) -> NodeId {
        self.mount_boxed(Box::new(component), style)
    }

    /// Same as [`mount`](Self::mount) for a boxed component.
    pub fn mount_boxed(&mut self, mut component: Box<dyn Component>, style: Style) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let size = style.resolve(self.viewport);
        let mut surface = Surface::new(size);

        component.render(&RenderContext { node: id, size });

        surface.commit();
        log::debug!("Node {id:?} committed with {}", surface.id());

        self.nodes.insert(
            id,
            Node {
                component,
                surface,
                style,
                is_mounted: false,
            },
        );
        self.pending_effects.push_back(id);

        id
    }

    /// Runs all queued post-commit effects in mount order. Returns the number of effects run.
    pub fn flush_effects(&mut self) -> usize {
        let mut count = 0;
        while let Some(id) = self.pending_effects.pop_front() {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };

            let Some(handle) = node.surface.handle() else {
                log::warn!("Node {id:?} has uncommitted surface, skipping mount effect");
                continue;
            };

            log::trace!("Running mount effect of node {id:?}");
            node.component.mounted(&handle);
            node.is_mounted = true;
            count += 1;
        }

        count
    }

    /// Calls the render phase of the component again. The surface and mount state are kept.
    pub fn rerender(&mut self, id: NodeId) -> Result<(), MountError> {
        let node = self.nodes.get_mut(&id).ok_or(MountError::NodeNotFound(id))?;
        let ctx = RenderContext {
            node: id,
            size: node.surface.size(),
        };
        node.component.render(&ctx);

        Ok(())
    }

    /// Removes the component from the tree and returns it.
    ///
    /// If the component's mount effect already ran, [`Component::unmounting`] is called before
    /// the surface is dropped. If it did not run yet, it is cancelled.
    pub fn unmount(&mut self, id: NodeId) -> Result<Box<dyn Component>, MountError> {
        let mut node = self.nodes.remove(&id).ok_or(MountError::NodeNotFound(id))?;
        self.pending_effects.retain(|pending| *pending != id);

        if node.is_mounted {
            node.component.unmounting();
        } else {
            log::trace!("Node {id:?} unmounted before its mount effect ran");
        }

        log::debug!("Node {id:?} removed, dropping {}", node.surface.id());
        drop(node.surface);

        Ok(node.component)
    }

    /// Changes the viewport size and lays out all surfaces again. Mounted components whose
    /// surface size changed are notified with [`Component::resized`].
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;

        for (id, node) in &mut self.nodes {
            let size = node.style.resolve(viewport);
            if size == node.surface.size() {
                continue;
            }

            log::trace!("Node {id:?} resized to {size:?}");
            node.surface.set_size(size);
            if node.is_mounted {
                node.component.resized(size);
            }
        }
    }

    /// Processes one frame: runs pending effects and lets mounted components paint.
    pub fn frame(&mut self) {
        self.flush_effects();
        for node in self.nodes.values_mut().filter(|node| node.is_mounted) {
            node.component.paint();
        }
    }

    /// Surface of the given node.
    pub fn surface(&self, id: NodeId) -> Option<&Surface> {
        self.nodes.get(&id).map(|node| &node.surface)
    }

    /// Returns true if the node's mount effect has run.
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.is_mounted)
    }

    /// Component of the given node, if it is of type `T`.
    pub fn component<T: Component + 'static>(&self, id: NodeId) -> Option<&T> {
        self.nodes
            .get(&id)
            .and_then(|node| node.component.as_any().downcast_ref())
    }
}
