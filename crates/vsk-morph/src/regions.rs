use rayon::prelude::*;
use vsk_core::Bounds3;

use crate::Execution;
use crate::label::{LabelId, LabelVolume};

const COUNT_CHUNK: usize = 1 << 16;

impl LabelVolume {
    /// Distinct nonzero ids present in the volume, ascending.
    pub fn ids(&self) -> Vec<LabelId> {
        let mut present = vec![false; self.num_labels() as usize + 1];
        for &id in self.data() {
            present[id as usize] = true;
        }

        present
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(id, &p)| p.then_some(id as LabelId))
            .collect()
    }

    /// Tight bounding box per id; entry `id - 1` is `None` when the id is
    /// absent.
    pub fn find_objects(&self) -> Vec<Option<Bounds3>> {
        let mut boxes: Vec<Option<Bounds3>> = vec![None; self.num_labels() as usize];
        let labels = self.labels();
        for (idx, &id) in self.data().iter().enumerate() {
            if id == 0 {
                continue;
            }

            let (x, y, z) = labels.coords(idx);
            let slot = &mut boxes[id as usize - 1];
            if let Some(b) = slot {
                b.include(x, y, z);
            } else {
                *slot = Some(Bounds3::from_voxel(x, y, z));
            }
        }
        boxes
    }

    /// Voxel count per id, indexed by id (entry `0` counts unlabeled voxels).
    pub fn voxel_counts(&self, exec: Execution) -> Vec<usize> {
        let bins = self.num_labels() as usize + 1;
        match exec {
            Execution::Sequential => {
                let mut hist = vec![0_usize; bins];
                for &id in self.data() {
                    hist[id as usize] += 1;
                }
                hist
            }
            Execution::Parallel => self
                .data()
                .par_chunks(COUNT_CHUNK)
                .fold(
                    || vec![0_usize; bins],
                    |mut hist, chunk| {
                        for &id in chunk {
                            hist[id as usize] += 1;
                        }
                        hist
                    },
                )
                .reduce(
                    || vec![0_usize; bins],
                    |mut a, b| {
                        for (x, y) in a.iter_mut().zip(b) {
                            *x += y;
                        }
                        a
                    },
                ),
        }
    }

    /// Zeroes the voxels equal to `id` inside `within`; other ids in the box
    /// are left alone.
    pub fn erase_region(&mut self, id: LabelId, within: &Bounds3) {
        let (w, h, _) = self.dims();
        let data = self.data_mut();
        for z in within.min[2]..within.max[2] {
            for y in within.min[1]..within.max[1] {
                let start = (z * h + y) * w;
                for v in &mut data[start + within.min[0]..start + within.max[0]] {
                    if *v == id {
                        *v = 0;
                    }
                }
            }
        }
    }
}
