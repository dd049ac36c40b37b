use rayon::prelude::*;
use vsk_core::{Bounds3, VolumeView};
use vsk_morph::{Dilation, Execution, LabelId, LabelVolume, MomentCalculator};

use crate::GraphError;
use crate::error::check_shape;
use crate::graph::{Node, NodeKind, SkeletonGraph};

/// Builds one graph node per node-label id, recording its centroid and the
/// branch ids its one-voxel dilation reaches.
///
/// `nodes` and `branches` are the clipped label volumes; `counts` is the raw
/// neighbor-count volume, used to tell endpoints from junctions. Nodes are
/// emitted in ascending id order regardless of `exec`.
pub fn build_node_graph<M, D>(
    nodes: &LabelVolume,
    branches: &LabelVolume,
    counts: &VolumeView<'_, i8>,
    moments: &M,
    dilation: &D,
    exec: Execution,
) -> Result<SkeletonGraph, GraphError>
where
    M: MomentCalculator + Sync,
    D: Dilation + Sync,
{
    let _span = tracing::debug_span!("build_node_graph").entered();

    let dims = nodes.dims();
    check_shape("branch labels", dims, branches.dims())?;
    check_shape("neighbor counts", dims, counts.dims())?;

    let boxes = nodes.find_objects();
    let ids: Vec<(LabelId, Bounds3)> = boxes
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.map(|b| (i as LabelId + 1, b)))
        .collect();

    let ctx = NodeContext {
        nodes: nodes.view(),
        branches: branches.view(),
        counts,
        moments,
        dilation,
    };

    let built: Vec<Node> = match exec {
        Execution::Sequential => ids
            .iter()
            .map(|&(id, b)| ctx.node(id, &b))
            .collect::<Result<_, _>>()?,
        Execution::Parallel => ids
            .par_iter()
            .map(|&(id, b)| ctx.node(id, &b))
            .collect::<Result<_, _>>()?,
    };

    let mut graph = SkeletonGraph::new(dims);
    for node in built {
        graph.push_node(node)?;
    }

    tracing::debug!(nodes = graph.num_nodes(), "built node graph");
    Ok(graph)
}

struct NodeContext<'a, M, D> {
    nodes: VolumeView<'a, LabelId>,
    branches: VolumeView<'a, LabelId>,
    counts: &'a VolumeView<'a, i8>,
    moments: &'a M,
    dilation: &'a D,
}

impl<M: MomentCalculator, D: Dilation> NodeContext<'_, M, D> {
    fn node(&self, id: LabelId, tight: &Bounds3) -> Result<Node, GraphError> {
        let moments = self.moments.moments(&self.nodes, id, tight);

        let mut max_neighbors = 0_i8;
        for (x, y, z) in tight.iter() {
            let idx = self.nodes.index(x, y, z);
            if self.nodes.data()[idx] == id {
                max_neighbors = max_neighbors.max(self.counts.data()[idx]);
            }
        }

        // The padded box is clamped, so boundary-adjacent nodes stay in range.
        let padded = tight.padded_clamped(1, self.nodes.dims());
        let mask = self.nodes.crop(&padded)?.map(|&v| v == id);
        let grown = self.dilation.dilate(&mask.as_view());

        let mut neigh: Vec<LabelId> = padded
            .iter()
            .zip(grown.data())
            .filter(|(_, hit)| **hit)
            .map(|((x, y, z), _)| self.branches.data()[self.branches.index(x, y, z)])
            .filter(|&b| b != 0)
            .collect();
        neigh.sort_unstable();
        neigh.dedup();

        let kind = if max_neighbors > 2 {
            NodeKind::Junction
        } else {
            NodeKind::End
        };

        Ok(Node {
            id,
            kind,
            position: moments.map(|m| m.centroid),
            neigh: Some(neigh),
            voxel_count: moments.map_or(0, |m| m.count),
            max_neighbors: u8::try_from(max_neighbors).ok(),
        })
    }
}
