/// Voxel adjacency used by labeling and dilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Face neighbors only.
    C6,
    /// Face and edge neighbors.
    C18,
    /// Face, edge and corner neighbors (full 3x3x3).
    #[default]
    C26,
}

const fn build_offsets<const N: usize>(max_manhattan: isize) -> [[isize; 3]; N] {
    let mut out = [[0_isize; 3]; N];
    let mut n = 0;
    let mut dz: isize = -1;
    while dz <= 1 {
        let mut dy: isize = -1;
        while dy <= 1 {
            let mut dx: isize = -1;
            while dx <= 1 {
                let m = dx.abs() + dy.abs() + dz.abs();
                if m > 0 && m <= max_manhattan {
                    out[n] = [dx, dy, dz];
                    n += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
}

const OFFSETS_C6: [[isize; 3]; 6] = build_offsets(1);
const OFFSETS_C18: [[isize; 3]; 18] = build_offsets(2);
const OFFSETS_C26: [[isize; 3]; 26] = build_offsets(3);

impl Connectivity {
    /// Neighbor offsets `[dx, dy, dz]`, excluding the center.
    pub fn offsets(self) -> &'static [[isize; 3]] {
        match self {
            Connectivity::C6 => &OFFSETS_C6,
            Connectivity::C18 => &OFFSETS_C18,
            Connectivity::C26 => &OFFSETS_C26,
        }
    }
}

/// Linear index of `p + offset`, or `None` when it leaves the volume.
#[inline]
pub fn offset_index(
    p: (usize, usize, usize),
    offset: [isize; 3],
    dims: (usize, usize, usize),
) -> Option<usize> {
    let nx = p.0 as isize + offset[0];
    let ny = p.1 as isize + offset[1];
    let nz = p.2 as isize + offset[2];
    if nx < 0 || ny < 0 || nz < 0 {
        return None;
    }

    let (nxu, nyu, nzu) = (nx as usize, ny as usize, nz as usize);
    if nxu >= dims.0 || nyu >= dims.1 || nzu >= dims.2 {
        return None;
    }

    Some((nzu * dims.1 + nyu) * dims.0 + nxu)
}
