use crate::{Bounds3, Error};

/// Voxel element types that can be read as binary skeleton occupancy.
///
/// Zero (or `false`) is background; anything else is foreground.
pub trait Foreground: Copy + Send + Sync {
    fn is_foreground(&self) -> bool;
}

impl Foreground for bool {
    #[inline]
    fn is_foreground(&self) -> bool {
        *self
    }
}

macro_rules! impl_foreground_int {
    ($($t:ty),*) => {
        $(
            impl Foreground for $t {
                #[inline]
                fn is_foreground(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_foreground_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Foreground for f32 {
    #[inline]
    fn is_foreground(&self) -> bool {
        *self != 0.0
    }
}

impl Foreground for f64 {
    #[inline]
    fn is_foreground(&self) -> bool {
        *self != 0.0
    }
}

fn checked_len(width: usize, height: usize, depth: usize) -> Result<usize, Error> {
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(depth))
        .ok_or(Error::DimensionOverflow {
            width,
            height,
            depth,
        })
}

/// Owned dense volume stored x-fastest: `idx = (z * height + y) * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<T>,
}

impl<T> Volume<T> {
    pub fn from_vec(width: usize, height: usize, depth: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = checked_len(width, height, depth)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn bounds(&self) -> Bounds3 {
        Bounds3::full(self.width, self.height, self.depth)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize, usize) {
        let plane = self.width * self.height;
        let z = idx / plane;
        let rem = idx % plane;
        (rem % self.width, rem / self.width, z)
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&T> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        self.data.get(self.index(x, y, z))
    }

    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        let idx = self.index(x, y, z);
        self.data.get_mut(idx)
    }

    pub fn as_view(&self) -> VolumeView<'_, T> {
        VolumeView {
            width: self.width,
            height: self.height,
            depth: self.depth,
            data: &self.data,
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Volume<U> {
        Volume {
            width: self.width,
            height: self.height,
            depth: self.depth,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Volume<T> {
    pub fn new_fill(width: usize, height: usize, depth: usize, value: T) -> Result<Self, Error> {
        let len = checked_len(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            data: vec![value; len],
        })
    }

    /// Copies the voxels inside `b` into a new volume of size `b.size()`.
    pub fn crop(&self, b: &Bounds3) -> Result<Volume<T>, Error> {
        self.as_view().crop(b)
    }
}

/// Borrowed read-only volume over a contiguous caller buffer.
#[derive(Debug, Clone, Copy)]
pub struct VolumeView<'a, T> {
    width: usize,
    height: usize,
    depth: usize,
    data: &'a [T],
}

impl<'a, T> VolumeView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        depth: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        let min_len = checked_len(width, height, depth)?;
        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            depth,
            data: &data[..min_len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn bounds(&self) -> Bounds3 {
        Bounds3::full(self.width, self.height, self.depth)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize, usize) {
        let plane = self.width * self.height;
        let z = idx / plane;
        let rem = idx % plane;
        (rem % self.width, rem / self.width, z)
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        self.data.get(self.index(x, y, z))
    }

    /// Contiguous x-run of row `(y, z)`.
    pub fn row(&self, y: usize, z: usize) -> &'a [T] {
        assert!(
            y < self.height && z < self.depth,
            "row index out of bounds"
        );
        let start = self.index(0, y, z);
        &self.data[start..start + self.width]
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Volume<U> {
        Volume {
            width: self.width,
            height: self.height,
            depth: self.depth,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> VolumeView<'_, T> {
    pub fn crop(&self, b: &Bounds3) -> Result<Volume<T>, Error> {
        if !self.bounds().contains_bounds(b) {
            return Err(Error::OutOfBounds);
        }

        let (w, h, d) = b.size();
        let mut out = Vec::with_capacity(w * h * d);
        for z in b.min[2]..b.max[2] {
            for y in b.min[1]..b.max[1] {
                let start = self.index(b.min[0], y, z);
                out.extend_from_slice(&self.data[start..start + w]);
            }
        }

        Volume::from_vec(w, h, d, out)
    }
}
