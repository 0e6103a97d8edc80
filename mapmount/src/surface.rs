//! Rendering surfaces and the handles a map uses to draw into them.
//!
//! A [`Surface`] is owned by the component tree. The map never holds the surface itself, only a
//! [`SurfaceHandle`], which can be obtained only after the surface was committed to the tree and
//! which becomes invalid as soon as the surface is dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use mapmount_types::cartesian::Size;
use parking_lot::RwLock;

use crate::view::MapView;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a surface. Unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Single draw call of a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Name of the layer.
    pub layer: String,
    /// Tiles drawn by the layer.
    pub tiles: Vec<String>,
}

/// Output of one render pass of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    view: MapView,
    draws: Vec<DrawCall>,
}

impl Frame {
    /// Creates an empty frame for the given view.
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            draws: Vec::new(),
        }
    }

    /// Records a draw call.
    pub fn draw(&mut self, layer: &str, tiles: Vec<String>) {
        self.draws.push(DrawCall {
            layer: layer.to_string(),
            tiles,
        });
    }

    /// View the frame was rendered with.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Draw calls in the order they were made.
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }
}

#[derive(Debug)]
struct SurfaceState {
    size: Size,
    frame_count: usize,
    last_frame: Option<Frame>,
}

/// A region of the screen a map can be drawn to.
#[derive(Debug)]
pub struct Surface {
    id: SurfaceId,
    committed: bool,
    state: Arc<RwLock<SurfaceState>>,
}

impl Surface {
    /// Creates a new, not yet committed surface.
    pub fn new(size: Size) -> Self {
        Self {
            id: SurfaceId::next(),
            committed: false,
            state: Arc::new(RwLock::new(SurfaceState {
                size,
                frame_count: 0,
                last_frame: None,
            })),
        }
    }

    /// Identity of the surface.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Marks the surface as committed to the visible tree.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    /// Returns true if the surface was committed.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Handle to the surface. Returns `None` until the surface is committed, since nothing
    /// drawn into an uncommitted surface would ever be displayed.
    pub fn handle(&self) -> Option<SurfaceHandle> {
        self.committed.then(|| SurfaceHandle {
            id: self.id,
            state: Arc::downgrade(&self.state),
        })
    }

    /// Current size of the surface.
    pub fn size(&self) -> Size {
        self.state.read().size
    }

    /// Changes the size of the surface.
    pub fn set_size(&mut self, size: Size) {
        self.state.write().size = size;
    }

    /// Number of frames drawn to the surface.
    pub fn frame_count(&self) -> usize {
        self.state.read().frame_count
    }

    /// The most recently drawn frame.
    pub fn last_frame(&self) -> Option<Frame> {
        self.state.read().last_frame.clone()
    }
}

/// Borrowed reference to a committed [`Surface`].
///
/// The handle does not keep the surface alive. After the surface is dropped, the handle becomes
/// invalid and drawing through it does nothing.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    id: SurfaceId,
    state: Weak<RwLock<SurfaceState>>,
}

impl SurfaceHandle {
    /// Identity of the surface this handle points to.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Returns true while the surface exists.
    pub fn is_valid(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// Size of the surface, or `None` if the surface no longer exists.
    pub fn size(&self) -> Option<Size> {
        self.state.upgrade().map(|state| state.read().size)
    }

    /// Puts the frame on the surface. Returns false if the surface no longer exists.
    pub(crate) fn present(&self, frame: Frame) -> bool {
        match self.state.upgrade() {
            Some(state) => {
                let mut state = state.write();
                state.frame_count += 1;
                state.last_frame = Some(frame);
                true
            }
            None => false,
        }
    }
}

impl PartialEq for SurfaceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SurfaceHandle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_handle_before_commit() {
        let mut surface = Surface::new(Size::new(100.0, 100.0));
        assert!(surface.handle().is_none());

        surface.commit();
        assert!(surface.handle().is_some());
    }

    #[test]
    fn handle_is_invalidated_by_drop() {
        let mut surface = Surface::new(Size::new(100.0, 100.0));
        surface.commit();
        let handle = surface.handle().expect("surface is committed");

        assert!(handle.is_valid());
        assert_eq!(handle.size(), Some(Size::new(100.0, 100.0)));

        drop(surface);
        assert!(!handle.is_valid());
        assert_eq!(handle.size(), None);
        assert!(!handle.present(Frame::new(MapView::default())));
    }

    #[test]
    fn presented_frames_are_stored() {
        let mut surface = Surface::new(Size::new(100.0, 100.0));
        surface.commit();
        let handle = surface.handle().expect("surface is committed");

        assert!(handle.present(Frame::new(MapView::default())));
        assert_eq!(surface.frame_count(), 1);
        assert_eq!(surface.last_frame(), Some(Frame::new(MapView::default())));
    }

    #[test]
    fn only_last_frame_is_kept() {
        let mut surface = Surface::new(Size::new(100.0, 100.0));
        surface.commit();
        let handle = surface.handle().expect("surface is committed");

        for zoom in 0..1000 {
            let view = MapView::default().with_zoom(f64::from(zoom % 20));
            assert!(handle.present(Frame::new(view)));
        }

        assert_eq!(surface.frame_count(), 1000);
        let last = surface.last_frame().expect("frame was presented");
        assert_eq!(last.view().zoom(), 19.0);
    }

    #[test]
    fn ids_are_unique() {
        let a = Surface::new(Size::default());
        let b = Surface::new(Size::default());
        assert_ne!(a.id(), b.id());
    }
}
