use vsk_core::{Volume, VolumeView};

use crate::Connectivity;
use crate::connectivity::offset_index;

pub type LabelId = u32;

/// Connected-component ids over a volume. `0` means "not in class".
///
/// Right after labeling the ids present are exactly `1..=num_labels`.
/// Clipping removes regions without renumbering, so `num_labels` stays the
/// largest id ever assigned and the present ids may have gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    labels: Volume<LabelId>,
    num_labels: LabelId,
}

impl LabelVolume {
    /// `num_labels` is raised to the largest id present when it is smaller,
    /// so every stored id fits the per-label tables.
    pub fn new(labels: Volume<LabelId>, num_labels: LabelId) -> Self {
        let present = labels.data().iter().copied().max().unwrap_or(0);
        Self {
            labels,
            num_labels: num_labels.max(present),
        }
    }

    /// Wraps an already labeled volume, taking the largest id as `num_labels`.
    pub fn from_labels(labels: Volume<LabelId>) -> Self {
        let num_labels = labels.data().iter().copied().max().unwrap_or(0);
        Self { labels, num_labels }
    }

    pub fn labels(&self) -> &Volume<LabelId> {
        &self.labels
    }

    pub fn view(&self) -> VolumeView<'_, LabelId> {
        self.labels.as_view()
    }

    pub fn num_labels(&self) -> LabelId {
        self.num_labels
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        self.labels.dims()
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> LabelId {
        self.labels.get(x, y, z).copied().unwrap_or(0)
    }

    pub(crate) fn data(&self) -> &[LabelId] {
        self.labels.data()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [LabelId] {
        self.labels.data_mut()
    }
}

/// Connected-component labeling of a voxel predicate.
///
/// Implementations must number components deterministically for identical
/// input so that ids assigned downstream are reproducible.
pub trait ComponentLabeler {
    /// Labels the voxels of `src` for which `member` holds.
    fn label_where<T>(&self, src: &VolumeView<'_, T>, member: impl Fn(&T) -> bool)
    -> LabelVolume;

    fn label(&self, mask: &VolumeView<'_, bool>) -> LabelVolume {
        self.label_where(mask, |&v| v)
    }
}

/// Stack flood-fill labeler.
///
/// Components are numbered in ascending linear index of their first voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloodFillLabeler {
    pub connectivity: Connectivity,
}

impl FloodFillLabeler {
    pub fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }
}

impl ComponentLabeler for FloodFillLabeler {
    fn label_where<T>(
        &self,
        src: &VolumeView<'_, T>,
        member: impl Fn(&T) -> bool,
    ) -> LabelVolume {
        let mut labels = src.map(|_| 0 as LabelId);
        let dims = src.dims();
        let data = src.data();
        let offsets = self.connectivity.offsets();

        let mut next: LabelId = 0;
        let mut stack = Vec::new();
        let out = labels.data_mut();
        for seed in 0..data.len() {
            if out[seed] != 0 || !member(&data[seed]) {
                continue;
            }

            next += 1;
            out[seed] = next;
            stack.clear();
            stack.push(seed);

            while let Some(p) = stack.pop() {
                let coords = src.coords(p);
                for &off in offsets {
                    let Some(nb) = offset_index(coords, off, dims) else {
                        continue;
                    };
                    if out[nb] == 0 && member(&data[nb]) {
                        out[nb] = next;
                        stack.push(nb);
                    }
                }
            }
        }

        LabelVolume::new(labels, next)
    }
}

#[cfg(test)]
mod tests {
    use vsk_core::Volume;

    use super::{ComponentLabeler, FloodFillLabeler, LabelVolume};
    use crate::{Connectivity, Execution};

    fn mask(w: usize, h: usize, d: usize, on: &[(usize, usize, usize)]) -> Volume<bool> {
        let mut v = Volume::new_fill(w, h, d, false).expect("valid volume");
        for &(x, y, z) in on {
            *v.get_mut(x, y, z).expect("in bounds") = true;
        }
        v
    }

    #[test]
    fn corner_touching_voxels_join_only_under_c26() {
        let m = mask(3, 3, 3, &[(0, 0, 0), (1, 1, 1)]);

        let c26 = FloodFillLabeler::new(Connectivity::C26).label(&m.as_view());
        assert_eq!(c26.num_labels(), 1);

        let c18 = FloodFillLabeler::new(Connectivity::C18).label(&m.as_view());
        assert_eq!(c18.num_labels(), 2);

        let c6 = FloodFillLabeler::new(Connectivity::C6).label(&m.as_view());
        assert_eq!(c6.num_labels(), 2);
    }

    #[test]
    fn numbering_follows_first_voxel_scan_order() {
        // Scan order, not insertion order, decides numbering.
        let m = mask(4, 1, 3, &[(3, 0, 2), (0, 0, 2), (3, 0, 0)]);
        let lv = FloodFillLabeler::default().label(&m.as_view());

        assert_eq!(lv.num_labels(), 3);
        assert_eq!(lv.get(3, 0, 0), 1);
        assert_eq!(lv.get(0, 0, 2), 2);
        assert_eq!(lv.get(3, 0, 2), 3);
        assert_eq!(lv.get(1, 0, 0), 0);
    }

    #[test]
    fn ids_are_contiguous_and_stable() {
        let m = mask(
            6,
            6,
            2,
            &[(0, 0, 0), (1, 1, 0), (4, 4, 1), (5, 5, 1), (0, 5, 0), (5, 0, 1)],
        );
        let a = FloodFillLabeler::default().label(&m.as_view());
        let b = FloodFillLabeler::default().label(&m.as_view());

        assert_eq!(a, b);
        let max = a.num_labels();
        assert_eq!(max, 4);
        for id in 1..=max {
            assert!(a.labels().data().contains(&id));
        }
    }

    #[test]
    fn predicate_labeling_on_empty_volume() {
        let counts = Volume::<i8>::from_vec(0, 3, 3, Vec::new()).expect("valid volume");
        let lv = FloodFillLabeler::default().label_where(&counts.as_view(), |&c| c == 2);
        assert_eq!(lv.num_labels(), 0);
        assert!(lv.labels().is_empty());
    }

    #[test]
    fn understated_label_count_is_raised() {
        let mut v = Volume::new_fill(3, 2, 1, 0u32).expect("valid volume");
        *v.get_mut(2, 1, 0).expect("in bounds") = 3;
        let lv = LabelVolume::new(v, 1);

        assert_eq!(lv.num_labels(), 3);
        assert_eq!(lv.ids(), vec![3]);
        assert_eq!(lv.find_objects().len(), 3);
        assert_eq!(lv.voxel_counts(Execution::Sequential)[3], 1);
    }
}
