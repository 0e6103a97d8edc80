use maybe_sync::{MaybeSend, MaybeSync};

/// Used by a [`Map`](crate::Map) to notify the application that the map should be drawn again.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Requests a redraw of the map.
    fn request_redraw(&self);
}

/// Messenger that ignores all requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
