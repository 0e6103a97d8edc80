//! Mapmount binds a long-lived map to the mount lifecycle of UI components.
//!
//! # Quick start
//!
//! ```no_run
//! use mapmount::host::MapHost;
//! use mapmount::tree::{ComponentTree, Style};
//! use mapmount::mapmount_types::cartesian::Size;
//!
//! let mut tree = ComponentTree::new(Size::new(1024.0, 768.0));
//! let page = tree.mount(MapHost::shared(), Style::fill());
//!
//! // the map is attached to the page surface after the effects are flushed
//! tree.frame();
//!
//! // and detached before the surface goes away
//! tree.unmount(page).unwrap();
//! ```
//!
//! # Main components
//!
//! * [`Map`] is the viewer: a [`MapView`] (center, zoom and surface size), a set of
//!   [`layers`](layer) and the surface it is currently drawn to. A map can exist without a
//!   surface and can be re-targeted any number of times.
//! * [`shared`] holds the single process-wide map, reachable from any component without passing
//!   it around.
//! * [`tree`] is a minimal component runtime: it renders components, commits their
//!   [`surfaces`](surface) and runs mount effects strictly after the commit.
//! * [`host::MapHost`] is the component connecting the two: it targets a map at its surface when
//!   mounted and detaches it when unmounted, either owning the map privately or displaying the
//!   shared one.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod host;
pub mod layer;
mod map;
mod messenger;
pub mod shared;
pub mod surface;
pub mod tree;
mod view;

pub use map::{LayerCollection, Map, MapBuilder};
pub use messenger::{DummyMessenger, Messenger};
pub use view::{MapView, MAX_ZOOM};

// Reexport mapmount_types
pub use mapmount_types;
