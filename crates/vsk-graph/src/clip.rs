use vsk_core::Bounds3;
use vsk_morph::{LabelId, LabelVolume};

/// The six one-voxel-thick face slabs of a `dims` volume.
fn faces(dims: (usize, usize, usize)) -> [Bounds3; 6] {
    let (w, h, d) = dims;
    let full = Bounds3::full(w, h, d);
    let mut out = [full; 6];
    for axis in 0..3 {
        let len = full.max[axis];
        out[2 * axis].max[axis] = len.min(1);
        out[2 * axis + 1].min[axis] = len.saturating_sub(1);
    }
    out
}

/// Distinct nonzero ids present on any outer face, ascending.
pub fn boundary_ids(labels: &LabelVolume) -> Vec<LabelId> {
    let view = labels.view();
    let mut on_face = vec![false; labels.num_labels() as usize + 1];
    for face in faces(labels.dims()) {
        for (x, y, z) in face.iter() {
            on_face[view.data()[view.index(x, y, z)] as usize] = true;
        }
    }

    on_face
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(id, &hit)| hit.then_some(id as LabelId))
        .collect()
}

/// Removes every region that touches an outer face of the volume.
///
/// Only voxels equal to a clipped id are zeroed, inside that id's bounding
/// box. The input is left untouched. Clipping twice is the same as clipping
/// once.
pub fn clip_boundary(labels: &LabelVolume) -> LabelVolume {
    clip_boundary_with_ids(labels).0
}

/// Like [`clip_boundary`], also returning the removed ids.
pub fn clip_boundary_with_ids(labels: &LabelVolume) -> (LabelVolume, Vec<LabelId>) {
    let clipped_ids = boundary_ids(labels);
    let mut out = labels.clone();
    if clipped_ids.is_empty() {
        return (out, clipped_ids);
    }

    let boxes = labels.find_objects();
    for &id in &clipped_ids {
        if let Some(b) = boxes[id as usize - 1] {
            out.erase_region(id, &b);
        }
    }

    tracing::debug!(clipped = clipped_ids.len(), "cleared boundary regions");
    (out, clipped_ids)
}

#[cfg(test)]
mod tests {
    use vsk_core::Volume;
    use vsk_morph::LabelVolume;

    use super::{boundary_ids, clip_boundary, clip_boundary_with_ids};

    fn labeled(dims: (usize, usize, usize), voxels: &[((usize, usize, usize), u32)]) -> LabelVolume {
        let mut v = Volume::new_fill(dims.0, dims.1, dims.2, 0u32).expect("valid volume");
        for &((x, y, z), id) in voxels {
            *v.get_mut(x, y, z).expect("in bounds") = id;
        }
        LabelVolume::from_labels(v)
    }

    #[test]
    fn removes_face_touching_regions_whole() {
        // 1: corner voxel, 2: interior, 3: interior voxel plus a tail reaching
        // the z = 4 face, 4: x = 4 face.
        let lv = labeled(
            (5, 5, 5),
            &[
                ((0, 0, 0), 1),
                ((2, 2, 1), 2),
                ((2, 2, 2), 2),
                ((1, 2, 3), 3),
                ((1, 2, 4), 3),
                ((4, 1, 2), 4),
            ],
        );

        assert_eq!(boundary_ids(&lv), vec![1, 3, 4]);

        let (clipped, ids) = clip_boundary_with_ids(&lv);
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(clipped.ids(), vec![2]);
        assert_eq!(clipped.get(1, 2, 3), 0);
        assert_eq!(clipped.num_labels(), 4);

        // Input untouched.
        assert_eq!(lv.ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn overlapping_boxes_keep_other_ids() {
        // Region 2's box overlaps region 1's, but region 2 never touches a face.
        let lv = labeled(
            (6, 6, 6),
            &[
                ((0, 2, 2), 1),
                ((1, 2, 2), 1),
                ((2, 3, 3), 1),
                ((1, 3, 3), 2),
                ((2, 2, 2), 2),
            ],
        );
        let clipped = clip_boundary(&lv);
        assert_eq!(clipped.ids(), vec![2]);
        assert_eq!(clipped.get(1, 3, 3), 2);
        assert_eq!(clipped.get(2, 2, 2), 2);
    }

    #[test]
    fn clipping_is_idempotent() {
        let lv = labeled(
            (4, 4, 4),
            &[((0, 1, 1), 1), ((1, 1, 1), 2), ((2, 2, 2), 2), ((3, 3, 2), 3)],
        );
        let once = clip_boundary(&lv);
        let twice = clip_boundary(&once);
        assert_eq!(once, twice);
        assert_eq!(once.ids(), vec![2]);
    }

    #[test]
    fn thin_volumes_clip_everything() {
        let lv = labeled((3, 3, 1), &[((1, 1, 0), 1)]);
        assert!(clip_boundary(&lv).ids().is_empty());

        let empty = LabelVolume::from_labels(
            Volume::from_vec(0, 0, 0, Vec::new()).expect("valid volume"),
        );
        assert!(clip_boundary(&empty).ids().is_empty());
    }
}
