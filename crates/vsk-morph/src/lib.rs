//! Binary morphology and region bookkeeping on 3D voxel volumes.
//!
//! Three capabilities are exposed as substitutable traits so callers can swap
//! in their own implementations:
//! - [`ComponentLabeler`]: connected-component labeling of a voxel predicate,
//!   default [`FloodFillLabeler`].
//! - [`MomentCalculator`]: region voxel count and centroid, default
//!   [`VoxelMoments`].
//! - [`Dilation`]: one-layer binary dilation, default [`BinaryDilation`].
//!
//! [`neighbor_counts`] computes the per-voxel foreground density that
//! skeleton classification is built on. Background voxels hold
//! [`BACKGROUND_COUNT`].

mod connectivity;
mod dilate;
mod exec;
mod label;
mod moments;
mod neighbors;
mod regions;

pub use connectivity::{Connectivity, offset_index};
pub use dilate::{BinaryDilation, Dilation, dilate_binary};
pub use exec::Execution;
pub use label::{ComponentLabeler, FloodFillLabeler, LabelId, LabelVolume};
pub use moments::{MomentCalculator, RegionMoments, VoxelMoments};
pub use neighbors::{BACKGROUND_COUNT, neighbor_counts};
