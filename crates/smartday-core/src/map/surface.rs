//! Capability interface over the mapping widget.

use super::model::{Coordinate, PointOfInterest};
use crate::error::Result;

/// Opaque handle to a marker placed on a surface.
pub type MarkerId = u64;

/// What the map overlay controller needs from a rendering surface.
///
/// The terminal shell provides the real implementation; tests use an
/// in-memory fake. The controller only ever talks to this trait, so the
/// widget can be swapped without touching overlay logic.
pub trait MapSurface: Send {
    /// Constructs the underlying map viewport.
    ///
    /// Called at most once per process by the controller; a failure leaves
    /// the surface unconstructed and the controller retries on the next
    /// navigation to the map view.
    fn construct(&mut self, center: Coordinate, zoom: u8) -> Result<()>;

    /// Refreshes the layout of an already constructed viewport. Container
    /// visibility may have changed since the last draw.
    fn relayout(&mut self);

    /// Places a marker with its info-window content and returns its handle.
    fn place_marker(&mut self, point: &PointOfInterest) -> MarkerId;

    /// Removes a marker (and its info window) from the surface.
    fn remove_marker(&mut self, id: MarkerId);

    /// Opens the info window attached to `id`.
    fn open_info(&mut self, id: MarkerId);

    /// Closes the info window attached to `id`.
    fn close_info(&mut self, id: MarkerId);
}
