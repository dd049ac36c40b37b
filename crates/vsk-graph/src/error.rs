use thiserror::Error;
use vsk_morph::LabelId;

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A branch touches no node region, or more than two.
    #[error(
        "branch {branch} touches {} node regions {nodes:?}, expected 1 or 2",
        .nodes.len()
    )]
    Topology { branch: LabelId, nodes: Vec<NodeId> },
    #[error("thickness source has {entries} entries but {branches} branches need one")]
    ThicknessUnderflow { branches: usize, entries: usize },
    #[error("thickness source has no value for branch {branch}")]
    MissingThickness { branch: LabelId },
    #[error("thickness {value} for branch {branch} is not a finite nonnegative number")]
    InvalidThickness { branch: LabelId, value: f32 },
    #[error("{what} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
    #[error("node id {id} must be greater than the current maximum {max}")]
    NodeIdOrder { id: NodeId, max: NodeId },
    #[error("edge refers to unknown node {0}")]
    UnknownNode(NodeId),
    #[error(transparent)]
    Volume(#[from] vsk_core::Error),
}

pub(crate) fn check_shape(
    what: &'static str,
    expected: (usize, usize, usize),
    actual: (usize, usize, usize),
) -> Result<(), GraphError> {
    if expected != actual {
        return Err(GraphError::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
