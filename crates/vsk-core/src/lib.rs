//! Foundational primitives for voxel skeleton analysis.
//!
//! ## Storage order
//! Volumes are dense and x-fastest: the linear index of voxel `(x, y, z)` is
//! `(z * height + y) * width + x`. Ascending linear index is the canonical
//! scan order used for deterministic labeling downstream.
//!
//! ## Coordinates
//! Everything is in voxel-index units with unit spacing. Integer coordinates
//! refer to voxel centers; centroids are reported as [`Point3f`].
//!
//! ## Bounding boxes
//! [`Bounds3`] is half-open (`min` inclusive, `max` exclusive). Padding a box
//! always clamps to the volume, so boxes never index outside it.

mod error;
mod geom;
mod volume;

pub use error::Error;
pub use geom::{Bounds3, Point3f};
pub use volume::{Foreground, Volume, VolumeView};
