use vsk_morph::{LabelVolume, MomentCalculator};

use crate::GraphError;
use crate::error::check_shape;
use crate::graph::{Node, NodeId, SkeletonGraph};

/// Appends one disconnected node per isolated-label id, ascending, with ids
/// continuing after the graph's current maximum.
///
/// With `with_positions` the node carries the region centroid. Existing
/// nodes and edges are kept as they are. Returns the new graph and the
/// appended ids.
pub fn attach_isolated<M: MomentCalculator>(
    graph: &SkeletonGraph,
    isolated: &LabelVolume,
    moments: &M,
    with_positions: bool,
) -> Result<(SkeletonGraph, Vec<NodeId>), GraphError> {
    check_shape("isolated labels", graph.dims(), isolated.dims())?;

    let mut out = graph.clone();
    let mut added = Vec::new();
    let view = isolated.view();
    for (i, bounds) in isolated.find_objects().into_iter().enumerate() {
        let Some(bounds) = bounds else {
            continue;
        };

        let region = moments.moments(&view, i as u32 + 1, &bounds);
        let id = out.next_node_id();
        out.push_node(Node::isolated(
            id,
            region.filter(|_| with_positions).map(|m| m.centroid),
            region.map_or(0, |m| m.count),
        ))?;
        added.push(id);
    }

    tracing::debug!(isolated = added.len(), "attached isolated nodes");
    Ok((out, added))
}
