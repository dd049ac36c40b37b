use core::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3f {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(self, rhs: Self) -> f32 {
        let d = self - rhs;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }
}

impl Sub for Point3f {
    type Output = Point3f;

    fn sub(self, rhs: Point3f) -> Self::Output {
        Point3f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Axis-aligned voxel box, `min` inclusive and `max` exclusive, in `[x, y, z]`
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds3 {
    pub min: [usize; 3],
    pub max: [usize; 3],
}

impl Bounds3 {
    pub fn full(width: usize, height: usize, depth: usize) -> Self {
        Self {
            min: [0; 3],
            max: [width, height, depth],
        }
    }

    pub fn from_voxel(x: usize, y: usize, z: usize) -> Self {
        Self {
            min: [x, y, z],
            max: [x + 1, y + 1, z + 1],
        }
    }

    /// Grows the box to cover voxel `(x, y, z)`.
    pub fn include(&mut self, x: usize, y: usize, z: usize) {
        let p = [x, y, z];
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis] + 1);
        }
    }

    pub fn size(&self) -> (usize, usize, usize) {
        (
            self.max[0].saturating_sub(self.min[0]),
            self.max[1].saturating_sub(self.min[1]),
            self.max[2].saturating_sub(self.min[2]),
        )
    }

    pub fn volume(&self) -> usize {
        let (w, h, d) = self.size();
        w * h * d
    }

    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        let p = [x, y, z];
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] < self.max[axis])
    }

    pub fn contains_bounds(&self, other: &Bounds3) -> bool {
        (0..3).all(|axis| other.min[axis] >= self.min[axis] && other.max[axis] <= self.max[axis])
    }

    /// Pads the box by `pad` voxels per side, clamped to `[0, dims)`.
    pub fn padded_clamped(&self, pad: usize, dims: (usize, usize, usize)) -> Self {
        let limit = [dims.0, dims.1, dims.2];
        let mut out = *self;
        for axis in 0..3 {
            out.min[axis] = self.min[axis].saturating_sub(pad).min(limit[axis]);
            out.max[axis] = self.max[axis].saturating_add(pad).min(limit[axis]);
        }
        out
    }

    /// Iterates voxel coordinates x-fastest, matching volume storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let b = *self;
        (b.min[2]..b.max[2]).flat_map(move |z| {
            (b.min[1]..b.max[1]).flat_map(move |y| (b.min[0]..b.max[0]).map(move |x| (x, y, z)))
        })
    }
}
