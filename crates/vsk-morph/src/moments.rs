use vsk_core::{Bounds3, Point3f, VolumeView};

use crate::label::LabelId;

/// Zeroth and first order moments of one labeled region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMoments {
    pub count: usize,
    pub centroid: Point3f,
}

/// Centroid/moment computation over a labeled region.
pub trait MomentCalculator {
    /// Moments of the voxels equal to `id` inside `within`, in global volume
    /// coordinates. `None` when no voxel matches.
    fn moments(
        &self,
        labels: &VolumeView<'_, LabelId>,
        id: LabelId,
        within: &Bounds3,
    ) -> Option<RegionMoments>;
}

/// Unweighted mean of member voxel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoxelMoments;

impl MomentCalculator for VoxelMoments {
    fn moments(
        &self,
        labels: &VolumeView<'_, LabelId>,
        id: LabelId,
        within: &Bounds3,
    ) -> Option<RegionMoments> {
        if !labels.bounds().contains_bounds(within) {
            return None;
        }

        let mut count = 0_usize;
        let mut sum = [0.0_f64; 3];
        for (x, y, z) in within.iter() {
            if labels.data()[labels.index(x, y, z)] != id {
                continue;
            }
            count += 1;
            sum[0] += x as f64;
            sum[1] += y as f64;
            sum[2] += z as f64;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(RegionMoments {
            count,
            centroid: Point3f {
                x: (sum[0] / n) as f32,
                y: (sum[1] / n) as f32,
                z: (sum[2] / n) as f32,
            },
        })
    }
}
