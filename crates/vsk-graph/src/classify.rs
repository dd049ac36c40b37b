use vsk_core::VolumeView;
use vsk_morph::{ComponentLabeler, LabelVolume};

/// Role of a foreground voxel, decided by its neighbor count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoxelClass {
    /// Exactly two neighbors: a pass-through point of a segment.
    Branch,
    /// One neighbor (endpoint) or more than two (junction).
    Node,
    /// No neighbors.
    Isolated,
}

impl VoxelClass {
    /// `None` for background (negative counts).
    pub fn of(count: i8) -> Option<Self> {
        match count {
            0 => Some(Self::Isolated),
            2 => Some(Self::Branch),
            1 | 3..=i8::MAX => Some(Self::Node),
            _ => None,
        }
    }
}

/// One label volume per voxel class. Ids are local to each volume.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRegions {
    pub branches: LabelVolume,
    pub nodes: LabelVolume,
    pub isolated: LabelVolume,
}

pub fn classify_regions<L: ComponentLabeler>(
    counts: &VolumeView<'_, i8>,
    labeler: &L,
) -> ClassifiedRegions {
    let _span = tracing::debug_span!("classify_regions").entered();

    let of_class = |class| move |c: &i8| VoxelClass::of(*c) == Some(class);
    let regions = ClassifiedRegions {
        branches: labeler.label_where(counts, of_class(VoxelClass::Branch)),
        nodes: labeler.label_where(counts, of_class(VoxelClass::Node)),
        isolated: labeler.label_where(counts, of_class(VoxelClass::Isolated)),
    };

    tracing::debug!(
        branches = regions.branches.num_labels(),
        nodes = regions.nodes.num_labels(),
        isolated = regions.isolated.num_labels(),
        "labeled voxel classes"
    );
    regions
}
