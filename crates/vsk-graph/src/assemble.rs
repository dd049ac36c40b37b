use std::collections::BTreeMap;

use vsk_morph::{Execution, LabelId, LabelVolume};

use crate::GraphError;
use crate::error::check_shape;
use crate::graph::{Node, NodeId, SkeletonGraph};
use crate::thickness::ThicknessSource;

/// What to do with a branch no node region touches, e.g. a closed loop of
/// pass-through voxels or a segment whose both ends were clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrphanBranchPolicy {
    /// Fail with [`GraphError::Topology`].
    #[default]
    Reject,
    /// Skip the branch and report it in [`Assembly::dropped`].
    Drop,
}

/// Output of [`assemble_edges`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub graph: SkeletonGraph,
    /// Synthetic terminal node ids, ascending.
    pub terminals: Vec<NodeId>,
    /// Orphan branches skipped under [`OrphanBranchPolicy::Drop`].
    pub dropped: Vec<LabelId>,
}

/// Turns per-node branch adjacency into edges.
///
/// Branch ids are processed in ascending order. A branch touched by two
/// nodes becomes an edge between them; a branch touched by one node gets a
/// new terminal node with id `max + 1`. Every present branch must have a
/// finite nonnegative thickness; this is checked before any edge is built.
/// The input graph is not modified.
pub fn assemble_edges<S: ThicknessSource + ?Sized>(
    node_graph: &SkeletonGraph,
    branches: &LabelVolume,
    thickness: &S,
    orphans: OrphanBranchPolicy,
    exec: Execution,
) -> Result<Assembly, GraphError> {
    let _span = tracing::debug_span!("assemble_edges").entered();

    check_shape("branch labels", node_graph.dims(), branches.dims())?;

    let branch_ids = branches.ids();
    let widths = resolve_thickness(&branch_ids, thickness)?;
    let lengths = branches.voxel_counts(exec);

    let mut touching: BTreeMap<LabelId, Vec<NodeId>> = BTreeMap::new();
    for node in node_graph.iter_nodes() {
        for &b in node.neigh.iter().flatten() {
            touching.entry(b).or_default().push(node.id);
        }
    }

    let mut graph = node_graph.clone();
    let mut terminals = Vec::new();
    let mut dropped = Vec::new();
    for (&branch, &width) in branch_ids.iter().zip(&widths) {
        let length = lengths[branch as usize];
        let nodes = touching.get(&branch).map_or(&[][..], Vec::as_slice);
        match *nodes {
            [a, b] => {
                graph.push_edge(a, b, length, width, vec![branch])?;
            }
            [a] => {
                let end = graph.next_node_id();
                graph.push_node(Node::terminal(end))?;
                graph.push_edge(a, end, length, width, vec![branch])?;
                terminals.push(end);
            }
            [] if orphans == OrphanBranchPolicy::Drop => {
                tracing::warn!(branch, "dropping branch that touches no node");
                dropped.push(branch);
            }
            _ => {
                return Err(GraphError::Topology {
                    branch,
                    nodes: nodes.to_vec(),
                });
            }
        }
    }

    tracing::debug!(
        edges = graph.num_edges(),
        terminals = terminals.len(),
        dropped = dropped.len(),
        "assembled edges"
    );
    Ok(Assembly {
        graph,
        terminals,
        dropped,
    })
}

fn resolve_thickness<S: ThicknessSource + ?Sized>(
    branch_ids: &[LabelId],
    source: &S,
) -> Result<Vec<f32>, GraphError> {
    if source.len() < branch_ids.len() {
        return Err(GraphError::ThicknessUnderflow {
            branches: branch_ids.len(),
            entries: source.len(),
        });
    }

    branch_ids
        .iter()
        .map(|&branch| {
            let value = source
                .thickness(branch)
                .ok_or(GraphError::MissingThickness { branch })?;
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidThickness { branch, value });
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use vsk_core::Volume;
    use vsk_morph::{Execution, LabelVolume};

    use super::{OrphanBranchPolicy, assemble_edges};
    use crate::GraphError;
    use crate::graph::{Node, NodeKind, SkeletonGraph};
    use crate::thickness::UniformThickness;

    fn node(id: u32, neigh: &[u32]) -> Node {
        Node {
            id,
            kind: NodeKind::Junction,
            position: None,
            neigh: Some(neigh.to_vec()),
            voxel_count: 1,
            max_neighbors: Some(3),
        }
    }

    /// Branch `id` gets `len` voxels along row `y = id`, `z = 0`.
    fn branches(lens: &[usize]) -> LabelVolume {
        let w = lens.iter().copied().max().unwrap_or(0).max(1);
        let mut v = Volume::new_fill(w, lens.len() + 1, 1, 0u32).expect("valid volume");
        for (i, &len) in lens.iter().enumerate() {
            for x in 0..len {
                *v.get_mut(x, i + 1, 0).expect("in bounds") = i as u32 + 1;
            }
        }
        LabelVolume::from_labels(v)
    }

    fn graph_for(lv: &LabelVolume, nodes: Vec<Node>) -> SkeletonGraph {
        let mut g = SkeletonGraph::new(lv.dims());
        for n in nodes {
            g.push_node(n).expect("ascending ids");
        }
        g
    }

    #[test]
    fn two_and_one_touching_nodes() {
        let lv = branches(&[5, 3, 2]);
        let g = graph_for(
            &lv,
            vec![node(2, &[1, 2]), node(4, &[1, 3]), node(7, &[2])],
        );

        let out = assemble_edges(
            &g,
            &lv,
            &vec![1.0_f32, 2.0, 3.0],
            OrphanBranchPolicy::Reject,
            Execution::Parallel,
        )
        .expect("valid topology");

        let edges = out.graph.edges();
        assert_eq!(edges.len(), 3);
        assert_eq!((edges[0].a, edges[0].b, edges[0].length), (2, 4, 5));
        assert_eq!(edges[0].thickness, 1.0);
        assert_eq!(edges[0].branches, vec![1]);
        assert_eq!((edges[1].a, edges[1].b, edges[1].length), (2, 7, 3));

        // Branch 3 only touches node 4: a terminal with id max + 1 = 8.
        assert_eq!(out.terminals, vec![8]);
        assert_eq!((edges[2].a, edges[2].b), (4, 8));
        assert_eq!(
            out.graph.node(8).map(|n| n.kind),
            Some(NodeKind::Terminal)
        );

        // Input graph untouched.
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.num_nodes(), 3);
    }

    #[test]
    fn terminals_follow_branch_order() {
        let lv = branches(&[1, 1, 1]);
        let g = graph_for(&lv, vec![node(1, &[3, 1]), node(2, &[2])]);

        let out = assemble_edges(
            &g,
            &lv,
            &UniformThickness(0.5),
            OrphanBranchPolicy::Reject,
            Execution::Sequential,
        )
        .expect("valid topology");

        assert_eq!(out.terminals, vec![3, 4, 5]);
        let pairs: Vec<_> = out.graph.iter_edges().map(|e| (e.a, e.b, e.branches[0])).collect();
        assert_eq!(pairs, vec![(1, 3, 1), (2, 4, 2), (1, 5, 3)]);
    }

    #[test]
    fn more_than_two_nodes_is_topology_error() {
        let lv = branches(&[4]);
        let g = graph_for(&lv, vec![node(1, &[1]), node(2, &[1]), node(3, &[1])]);

        let err = assemble_edges(
            &g,
            &lv,
            &UniformThickness(1.0),
            OrphanBranchPolicy::Drop,
            Execution::Sequential,
        )
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::Topology {
                branch: 1,
                nodes: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn orphan_branch_policy() {
        let lv = branches(&[2, 2]);
        let g = graph_for(&lv, vec![node(1, &[2]), node(2, &[2])]);

        let err = assemble_edges(
            &g,
            &lv,
            &UniformThickness(1.0),
            OrphanBranchPolicy::Reject,
            Execution::Sequential,
        )
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::Topology {
                branch: 1,
                nodes: vec![]
            }
        );

        let out = assemble_edges(
            &g,
            &lv,
            &UniformThickness(1.0),
            OrphanBranchPolicy::Drop,
            Execution::Sequential,
        )
        .expect("orphans dropped");
        assert_eq!(out.dropped, vec![1]);
        assert_eq!(out.graph.num_edges(), 1);
    }

    #[test]
    fn thickness_preconditions() {
        let lv = branches(&[2, 2]);
        let g = graph_for(&lv, vec![node(1, &[1, 2]), node(2, &[1, 2])]);
        let run = |t: &[f32]| {
            assemble_edges(
                &g,
                &lv,
                t,
                OrphanBranchPolicy::Reject,
                Execution::Sequential,
            )
        };

        assert_eq!(
            run(&[1.0]).unwrap_err(),
            GraphError::ThicknessUnderflow {
                branches: 2,
                entries: 1
            }
        );
        assert_eq!(
            run(&[1.0, -2.0]).unwrap_err(),
            GraphError::InvalidThickness {
                branch: 2,
                value: -2.0
            }
        );
        assert!(matches!(
            run(&[f32::NAN, 2.0]).unwrap_err(),
            GraphError::InvalidThickness { branch: 1, value } if value.is_nan()
        ));
        assert_eq!(run(&[1.0, 2.0]).expect("valid").graph.num_edges(), 2);
    }

    #[test]
    fn surviving_id_without_thickness() {
        // Branch 1 was clipped; one entry satisfies the count but not id 2.
        let mut v = Volume::new_fill(3, 3, 1, 0u32).expect("valid volume");
        *v.get_mut(1, 2, 0).expect("in bounds") = 2;
        let lv = LabelVolume::new(v, 2);
        let g = graph_for(&lv, vec![node(1, &[2]), node(2, &[2])]);

        let err = assemble_edges(
            &g,
            &lv,
            &[1.0_f32][..],
            OrphanBranchPolicy::Reject,
            Execution::Sequential,
        )
        .unwrap_err();
        assert_eq!(err, GraphError::MissingThickness { branch: 2 });
    }

    #[test]
    fn label_count_below_present_ids() {
        let mut v = Volume::new_fill(4, 1, 1, 0u32).expect("valid volume");
        *v.get_mut(3, 0, 0).expect("in bounds") = 3;
        let lv = LabelVolume::new(v, 1);
        let g = graph_for(&lv, Vec::new());

        let out = assemble_edges(
            &g,
            &lv,
            &UniformThickness(1.0),
            OrphanBranchPolicy::Drop,
            Execution::Sequential,
        )
        .expect("orphans dropped");
        assert_eq!(out.dropped, vec![3]);
        assert_eq!(out.graph.num_edges(), 0);
    }

    #[test]
    fn shape_mismatch() {
        let lv = branches(&[1]);
        let g = SkeletonGraph::new((9, 9, 9));
        let err = assemble_edges(
            &g,
            &lv,
            &UniformThickness(1.0),
            OrphanBranchPolicy::Reject,
            Execution::Sequential,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::ShapeMismatch { .. }));
    }
}
