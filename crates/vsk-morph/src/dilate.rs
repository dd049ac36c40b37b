use vsk_core::{Volume, VolumeView};

use crate::Connectivity;
use crate::connectivity::offset_index;

/// Binary dilation by one layer of a structuring element.
pub trait Dilation {
    fn dilate(&self, mask: &VolumeView<'_, bool>) -> Volume<bool>;
}

/// Dilation with the 3x3x3 element selected by `connectivity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryDilation {
    pub connectivity: Connectivity,
}

impl BinaryDilation {
    pub fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }
}

impl Dilation for BinaryDilation {
    fn dilate(&self, mask: &VolumeView<'_, bool>) -> Volume<bool> {
        dilate_binary(mask, self.connectivity)
    }
}

/// A voxel is set in the output when it or any `connectivity` neighbor is
/// set in `src`. Voxels outside the volume are unset.
pub fn dilate_binary(src: &VolumeView<'_, bool>, connectivity: Connectivity) -> Volume<bool> {
    let mut out = src.map(|&v| v);
    let dims = src.dims();
    let data = src.data();
    let offsets = connectivity.offsets();

    for (idx, v) in out.data_mut().iter_mut().enumerate() {
        if *v {
            continue;
        }

        let p = src.coords(idx);
        *v = offsets
            .iter()
            .any(|&off| offset_index(p, off, dims).is_some_and(|nb| data[nb]));
    }

    out
}
