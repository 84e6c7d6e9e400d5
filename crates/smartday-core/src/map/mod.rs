//! Map overlay domain model.
//!
//! Points of interest come from the backend per dataset filter; the overlay
//! renders them as markers with hover-revealed info windows through the
//! [`MapSurface`] capability interface.

mod markers;
mod model;
mod surface;

pub use markers::{MarkerEntry, MarkerSet};
pub use model::{
    Coordinate, MapDataset, PointOfInterest, DEFAULT_CENTER, DEFAULT_ZOOM,
};
pub use surface::{MapSurface, MarkerId};
