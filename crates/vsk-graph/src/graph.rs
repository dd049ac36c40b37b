use vsk_core::Point3f;
use vsk_morph::LabelId;

use crate::GraphError;

pub type NodeId = u32;
pub type EdgeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Node region made only of voxels with a single foreground neighbor.
    End,
    /// Node region containing at least one voxel with more than two
    /// foreground neighbors.
    Junction,
    /// Synthetic far end of a branch whose second node was clipped away.
    Terminal,
    /// Foreground voxel without foreground neighbors.
    Isolated,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Centroid of the node region; `None` on synthetic terminals.
    pub position: Option<Point3f>,
    /// Sorted ids of branches touching the region. Only set on nodes derived
    /// from node labels.
    pub neigh: Option<Vec<LabelId>>,
    pub voxel_count: usize,
    /// Largest raw neighbor count inside the region.
    pub max_neighbors: Option<u8>,
}

impl Node {
    pub fn terminal(id: NodeId) -> Self {
        Self {
            id,
            kind: NodeKind::Terminal,
            position: None,
            neigh: None,
            voxel_count: 0,
            max_neighbors: None,
        }
    }

    pub fn isolated(id: NodeId, position: Option<Point3f>, voxel_count: usize) -> Self {
        Self {
            id,
            kind: NodeKind::Isolated,
            position,
            neigh: None,
            voxel_count,
            max_neighbors: Some(0),
        }
    }

    /// True for free ends, whether found in the volume or synthesized.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::End | NodeKind::Terminal)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub id: EdgeId,
    /// Smaller endpoint id.
    pub a: NodeId,
    /// Larger endpoint id.
    pub b: NodeId,
    /// Voxel count of the originating branch region(s).
    pub length: usize,
    pub thickness: f32,
    /// Originating branch ids.
    pub branches: Vec<LabelId>,
}

impl GraphEdge {
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Undirected multigraph over a skeleton volume.
///
/// Nodes are kept in strictly increasing id order; edges are indexed by
/// insertion order. The graph only grows.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkeletonGraph {
    dims: (usize, usize, usize),
    nodes: Vec<Node>,
    edges: Vec<GraphEdge>,
}

impl SkeletonGraph {
    pub fn new(dims: (usize, usize, usize)) -> Self {
        Self {
            dims,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn max_node_id(&self) -> Option<NodeId> {
        self.nodes.last().map(|n| n.id)
    }

    /// Id a newly appended node receives: current maximum plus one, or `1`
    /// for an empty graph.
    pub fn next_node_id(&self) -> NodeId {
        self.max_node_id().map_or(1, |id| id + 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn push_node(&mut self, node: Node) -> Result<(), GraphError> {
        match self.max_node_id() {
            Some(max) if node.id <= max => {
                return Err(GraphError::NodeIdOrder { id: node.id, max });
            }
            _ => {}
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Appends an edge between existing nodes, normalizing to `a <= b`.
    pub fn push_edge(
        &mut self,
        u: NodeId,
        v: NodeId,
        length: usize,
        thickness: f32,
        branches: Vec<LabelId>,
    ) -> Result<EdgeId, GraphError> {
        for id in [u, v] {
            if !self.contains_node(id) {
                return Err(GraphError::UnknownNode(id));
            }
        }

        let id = self.edges.len();
        self.edges.push(GraphEdge {
            id,
            a: u.min(v),
            b: u.max(v),
            length,
            thickness,
            branches,
        });
        Ok(id)
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    pub fn iter_junctions(&self) -> impl Iterator<Item = &Node> {
        self.iter_kind(NodeKind::Junction)
    }

    pub fn iter_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn num_junctions(&self) -> usize {
        self.iter_kind(NodeKind::Junction).count()
    }

    pub fn num_ends(&self) -> usize {
        self.iter_kind(NodeKind::End).count()
    }

    pub fn num_terminals(&self) -> usize {
        self.iter_kind(NodeKind::Terminal).count()
    }

    pub fn num_isolated(&self) -> usize {
        self.iter_kind(NodeKind::Isolated).count()
    }

    pub fn incident_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.a == node || e.b == node)
            .map(|e| e.id)
            .collect()
    }

    /// Edge endpoints incident to `node`; a self-loop counts twice.
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges
            .iter()
            .map(|e| usize::from(e.a == node) + usize::from(e.b == node))
            .sum()
    }

    pub fn edges_for_branch(&self, branch: LabelId) -> impl Iterator<Item = &GraphEdge> {
        self.edges
            .iter()
            .filter(move |e| e.branches.contains(&branch))
    }

    pub fn total_length(&self) -> usize {
        self.edges.iter().map(|e| e.length).sum()
    }
}
