use rayon::prelude::*;
use vsk_core::{Foreground, Volume, VolumeView};

use crate::Execution;

/// Count stored at background voxels, disjoint from any foreground count.
pub const BACKGROUND_COUNT: i8 = -1;

/// Counts foreground voxels in the centered 3x3x3 window of every foreground
/// voxel, excluding the voxel itself.
///
/// Background voxels get [`BACKGROUND_COUNT`]; foreground voxels get a value
/// in `0..=26`. Voxels outside the volume count as background.
pub fn neighbor_counts<T: Foreground>(src: &VolumeView<'_, T>, exec: Execution) -> Volume<i8> {
    let mut out = src.map(|_| BACKGROUND_COUNT);
    if src.is_empty() {
        return out;
    }

    let plane = src.width() * src.height();
    match exec {
        Execution::Sequential => {
            for (z, slab) in out.data_mut().chunks_mut(plane).enumerate() {
                count_slab(src, z, slab);
            }
        }
        Execution::Parallel => {
            out.data_mut()
                .par_chunks_mut(plane)
                .enumerate()
                .for_each(|(z, slab)| count_slab(src, z, slab));
        }
    }

    out
}

fn count_slab<T: Foreground>(src: &VolumeView<'_, T>, z: usize, slab: &mut [i8]) {
    let (w, h, d) = src.dims();
    let data = src.data();
    let z0 = z.saturating_sub(1);
    let z1 = (z + 1).min(d - 1);

    for y in 0..h {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        for x in 0..w {
            if !data[src.index(x, y, z)].is_foreground() {
                continue;
            }

            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let mut n = 0_i8;
            for nz in z0..=z1 {
                for ny in y0..=y1 {
                    let row = src.row(ny, nz);
                    n += row[x0..=x1].iter().filter(|v| v.is_foreground()).count() as i8;
                }
            }

            // The window includes the center voxel.
            slab[y * w + x] = n - 1;
        }
    }
}
