//! Umbrella crate for the `voxel-skeleton` workspace.
//!
//! Re-exports the volume containers, the voxel morphology kernels and the
//! skeleton-to-graph pipeline.
//!
//! ```
//! use voxel_skeleton::{UniformThickness, Volume, build_skeleton_graph};
//!
//! let mut vol = Volume::new_fill(7, 5, 5, 0u8).unwrap();
//! for x in 1..=5 {
//!     *vol.get_mut(x, 2, 2).unwrap() = 1;
//! }
//! let g = build_skeleton_graph(&vol.as_view(), &UniformThickness(1.0)).unwrap();
//! assert_eq!(g.num_edges(), 1);
//! assert_eq!(g.edges()[0].length, 3);
//! ```

pub use vsk_core::*;
pub use vsk_graph::*;
pub use vsk_morph::*;
