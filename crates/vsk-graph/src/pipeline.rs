use vsk_core::{Foreground, Volume, VolumeView};
use vsk_morph::{
    BinaryDilation, ComponentLabeler, Connectivity, Dilation, Execution, FloodFillLabeler,
    LabelId, LabelVolume, MomentCalculator, VoxelMoments, neighbor_counts,
};

use crate::GraphError;
use crate::adjacency::build_node_graph;
use crate::assemble::{OrphanBranchPolicy, assemble_edges};
use crate::classify::{ClassifiedRegions, classify_regions};
use crate::clip::clip_boundary_with_ids;
use crate::graph::{NodeId, SkeletonGraph};
use crate::isolated::attach_isolated;
use crate::thickness::ThicknessSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonGraphConfig {
    /// Remove branch and node regions touching the volume faces.
    pub clip_boundary: bool,
    pub orphan_branches: OrphanBranchPolicy,
    pub attach_isolated: bool,
    /// Attach centroids to isolated nodes.
    pub isolated_positions: bool,
    pub execution: Execution,
}

impl Default for SkeletonGraphConfig {
    fn default() -> Self {
        Self {
            clip_boundary: true,
            orphan_branches: OrphanBranchPolicy::Reject,
            attach_isolated: true,
            isolated_positions: true,
            execution: Execution::Parallel,
        }
    }
}

/// Intermediate volumes of one pipeline run, after clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonRegions {
    pub counts: Volume<i8>,
    pub branches: LabelVolume,
    pub nodes: LabelVolume,
    pub isolated: LabelVolume,
    pub clipped_branches: Vec<LabelId>,
    pub clipped_nodes: Vec<LabelId>,
}

/// Bookkeeping of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub branch_labels: LabelId,
    pub node_labels: LabelId,
    pub isolated_labels: LabelId,
    pub clipped_branches: Vec<LabelId>,
    pub clipped_nodes: Vec<LabelId>,
    pub terminals: Vec<NodeId>,
    pub dropped_branches: Vec<LabelId>,
    pub isolated_nodes: Vec<NodeId>,
}

/// Runs the full volume-to-graph transform.
///
/// The labeler, moment calculator and dilation are swappable; the defaults
/// are 26-connected [`FloodFillLabeler`], [`VoxelMoments`] and 26-connected
/// [`BinaryDilation`].
#[derive(Debug, Clone)]
pub struct SkeletonGraphBuilder<L = FloodFillLabeler, M = VoxelMoments, D = BinaryDilation> {
    config: SkeletonGraphConfig,
    labeler: L,
    moments: M,
    dilation: D,
}

impl Default for SkeletonGraphBuilder {
    fn default() -> Self {
        Self::new(SkeletonGraphConfig::default())
    }
}

impl SkeletonGraphBuilder {
    pub fn new(config: SkeletonGraphConfig) -> Self {
        Self {
            labeler: FloodFillLabeler::new(Connectivity::C26),
            moments: VoxelMoments,
            dilation: BinaryDilation::new(Connectivity::C26),
            config,
        }
    }
}

impl<L, M, D> SkeletonGraphBuilder<L, M, D>
where
    L: ComponentLabeler,
    M: MomentCalculator + Sync,
    D: Dilation + Sync,
{
    pub fn config(&self) -> &SkeletonGraphConfig {
        &self.config
    }

    pub fn clip_boundary(mut self, on: bool) -> Self {
        self.config.clip_boundary = on;
        self
    }

    pub fn orphan_branches(mut self, policy: OrphanBranchPolicy) -> Self {
        self.config.orphan_branches = policy;
        self
    }

    pub fn attach_isolated(mut self, on: bool) -> Self {
        self.config.attach_isolated = on;
        self
    }

    pub fn isolated_positions(mut self, on: bool) -> Self {
        self.config.isolated_positions = on;
        self
    }

    pub fn execution(mut self, exec: Execution) -> Self {
        self.config.execution = exec;
        self
    }

    pub fn with_labeler<L2: ComponentLabeler>(self, labeler: L2) -> SkeletonGraphBuilder<L2, M, D> {
        SkeletonGraphBuilder {
            config: self.config,
            labeler,
            moments: self.moments,
            dilation: self.dilation,
        }
    }

    pub fn with_moments<M2: MomentCalculator + Sync>(
        self,
        moments: M2,
    ) -> SkeletonGraphBuilder<L, M2, D> {
        SkeletonGraphBuilder {
            config: self.config,
            labeler: self.labeler,
            moments,
            dilation: self.dilation,
        }
    }

    pub fn with_dilation<D2: Dilation + Sync>(self, dilation: D2) -> SkeletonGraphBuilder<L, M, D2> {
        SkeletonGraphBuilder {
            config: self.config,
            labeler: self.labeler,
            moments: self.moments,
            dilation,
        }
    }

    /// Neighbor counting, classification and (optionally) boundary clipping.
    pub fn regions<T: Foreground>(&self, volume: &VolumeView<'_, T>) -> SkeletonRegions {
        let counts = {
            let _span = tracing::debug_span!("neighbor_counts").entered();
            neighbor_counts(volume, self.config.execution)
        };

        let ClassifiedRegions {
            branches,
            nodes,
            isolated,
        } = classify_regions(&counts.as_view(), &self.labeler);

        let (branches, clipped_branches, nodes, clipped_nodes) = if self.config.clip_boundary {
            let _span = tracing::debug_span!("clip_boundary").entered();
            let (branches, clipped_branches) = clip_boundary_with_ids(&branches);
            let (nodes, clipped_nodes) = clip_boundary_with_ids(&nodes);
            (branches, clipped_branches, nodes, clipped_nodes)
        } else {
            (branches, Vec::new(), nodes, Vec::new())
        };

        SkeletonRegions {
            counts,
            branches,
            nodes,
            isolated,
            clipped_branches,
            clipped_nodes,
        }
    }

    pub fn build<T, S>(
        &self,
        volume: &VolumeView<'_, T>,
        thickness: &S,
    ) -> Result<SkeletonGraph, GraphError>
    where
        T: Foreground,
        S: ThicknessSource + ?Sized,
    {
        self.build_with_report(volume, thickness).map(|(g, _)| g)
    }

    /// Builds from a raw x-fastest buffer.
    pub fn build_from_slice<T, S>(
        &self,
        dims: (usize, usize, usize),
        data: &[T],
        thickness: &S,
    ) -> Result<SkeletonGraph, GraphError>
    where
        T: Foreground,
        S: ThicknessSource + ?Sized,
    {
        let view = VolumeView::from_slice(dims.0, dims.1, dims.2, data)?;
        self.build(&view, thickness)
    }

    pub fn build_with_report<T, S>(
        &self,
        volume: &VolumeView<'_, T>,
        thickness: &S,
    ) -> Result<(SkeletonGraph, PipelineReport), GraphError>
    where
        T: Foreground,
        S: ThicknessSource + ?Sized,
    {
        let _span = tracing::debug_span!(
            "skeleton_graph",
            width = volume.width(),
            height = volume.height(),
            depth = volume.depth()
        )
        .entered();

        let regions = self.regions(volume);
        let exec = self.config.execution;

        let node_graph = build_node_graph(
            &regions.nodes,
            &regions.branches,
            &regions.counts.as_view(),
            &self.moments,
            &self.dilation,
            exec,
        )?;

        let assembly = assemble_edges(
            &node_graph,
            &regions.branches,
            thickness,
            self.config.orphan_branches,
            exec,
        )?;

        let (graph, isolated_nodes) = if self.config.attach_isolated {
            attach_isolated(
                &assembly.graph,
                &regions.isolated,
                &self.moments,
                self.config.isolated_positions,
            )?
        } else {
            (assembly.graph, Vec::new())
        };

        let report = PipelineReport {
            branch_labels: regions.branches.num_labels(),
            node_labels: regions.nodes.num_labels(),
            isolated_labels: regions.isolated.num_labels(),
            clipped_branches: regions.clipped_branches,
            clipped_nodes: regions.clipped_nodes,
            terminals: assembly.terminals,
            dropped_branches: assembly.dropped,
            isolated_nodes,
        };

        tracing::debug!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            "skeleton graph built"
        );
        Ok((graph, report))
    }
}

/// [`SkeletonGraphBuilder::build`] with the default configuration.
pub fn build_skeleton_graph<T, S>(
    volume: &VolumeView<'_, T>,
    thickness: &S,
) -> Result<SkeletonGraph, GraphError>
where
    T: Foreground,
    S: ThicknessSource + ?Sized,
{
    SkeletonGraphBuilder::default().build(volume, thickness)
}
