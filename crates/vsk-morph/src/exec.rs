/// Scheduling for stages that are data-parallel over voxels or regions.
///
/// Both modes produce identical output; `Parallel` runs on the global
/// `rayon` pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Execution {
    Sequential,
    #[default]
    Parallel,
}
