//! Junction-aware graph extraction from thinned 3D skeleton volumes.
//!
//! The transform is a one-shot linear pipeline:
//! 1. [`neighbor_counts`](vsk_morph::neighbor_counts) gives every foreground
//!    voxel its number of foreground neighbors in the 3x3x3 window.
//! 2. [`classify_regions`] labels three voxel classes with 26-connectivity:
//!    branch (exactly two neighbors), node (one, or more than two) and
//!    isolated (none).
//! 3. [`clip_boundary`] drops branch and node regions touching a volume face.
//! 4. [`build_node_graph`] emits one node per node region with its centroid
//!    and the branches its one-voxel dilation reaches.
//! 5. [`assemble_edges`] turns each branch into one edge, adding a synthetic
//!    terminal node when only one node touches it.
//! 6. [`attach_isolated`] appends isolated voxels as disconnected nodes.
//!
//! [`SkeletonGraphBuilder`] drives all stages. Coordinates are voxel indices;
//! node and synthetic ids are assigned in ascending order so the same input
//! always yields the same graph.
//!
//! Topology is not simplified: a loop leaving and re-entering the same node
//! region gets a terminal node, and parallel edges are kept.

mod adjacency;
mod assemble;
mod classify;
mod clip;
mod error;
mod graph;
mod isolated;
mod pipeline;
mod thickness;

pub use adjacency::build_node_graph;
pub use assemble::{Assembly, OrphanBranchPolicy, assemble_edges};
pub use classify::{ClassifiedRegions, VoxelClass, classify_regions};
pub use clip::{boundary_ids, clip_boundary, clip_boundary_with_ids};
pub use error::GraphError;
pub use graph::{EdgeId, GraphEdge, Node, NodeId, NodeKind, SkeletonGraph};
pub use isolated::attach_isolated;
pub use pipeline::{
    PipelineReport, SkeletonGraphBuilder, SkeletonGraphConfig, SkeletonRegions,
    build_skeleton_graph,
};
pub use thickness::{ThicknessSource, UniformThickness};
