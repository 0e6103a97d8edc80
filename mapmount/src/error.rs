//! Error types used by the crate.

use thiserror::Error;

use crate::tree::NodeId;

/// Mapmount error type.
///
/// Lifecycle operations (attaching and detaching a map) never fail. Errors are only reported at
/// the edges: reading a map description, configuring the shared map and addressing nodes of the
/// component tree.
#[derive(Debug, Error)]
pub enum MountError {
    /// The map description could not be parsed.
    #[error("invalid map description: {0}")]
    Config(#[from] serde_json::Error),
    /// Error reading the map description from the FS.
    #[error("failed to read file")]
    Io(#[from] std::io::Error),
    /// Zoom level is outside of the supported range.
    #[error("zoom level {0} is out of range")]
    InvalidZoom(f64),
    /// Center point is not a valid geographic coordinate.
    #[error("invalid center point: lat {lat}, lon {lon}")]
    InvalidCenter {
        /// Latitude of the rejected point.
        lat: f64,
        /// Longitude of the rejected point.
        lon: f64,
    },
    /// The shared map was already constructed, so its description cannot be changed anymore.
    #[error("shared map is already initialized")]
    AlreadyInitialized,
    /// The component tree has no node with the given id.
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
}
