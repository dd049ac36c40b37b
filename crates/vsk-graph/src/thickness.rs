use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use vsk_morph::LabelId;

/// External per-branch thickness, keyed by branch label id.
pub trait ThicknessSource {
    /// Number of entries the source provides.
    fn len(&self) -> usize;

    fn thickness(&self, branch: LabelId) -> Option<f32>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense table: entry `i` is the thickness of branch `i + 1`.
impl ThicknessSource for [f32] {
    fn len(&self) -> usize {
        <[f32]>::len(self)
    }

    fn thickness(&self, branch: LabelId) -> Option<f32> {
        let idx = (branch as usize).checked_sub(1)?;
        self.get(idx).copied()
    }
}

impl ThicknessSource for Vec<f32> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn thickness(&self, branch: LabelId) -> Option<f32> {
        self.as_slice().thickness(branch)
    }
}

impl ThicknessSource for BTreeMap<LabelId, f32> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn thickness(&self, branch: LabelId) -> Option<f32> {
        self.get(&branch).copied()
    }
}

impl<S: BuildHasher> ThicknessSource for HashMap<LabelId, f32, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn thickness(&self, branch: LabelId) -> Option<f32> {
        self.get(&branch).copied()
    }
}

/// The same thickness for every branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformThickness(pub f32);

impl ThicknessSource for UniformThickness {
    fn len(&self) -> usize {
        usize::MAX
    }

    fn thickness(&self, _branch: LabelId) -> Option<f32> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::{ThicknessSource, UniformThickness};

    #[test]
    fn dense_table_is_one_based() {
        let t = vec![0.5_f32, 1.5, 2.5];
        assert_eq!(t.thickness(0), None);
        assert_eq!(t.thickness(1), Some(0.5));
        assert_eq!(t.thickness(3), Some(2.5));
        assert_eq!(t.thickness(4), None);
        assert_eq!(ThicknessSource::len(&t), 3);
        assert_eq!(t.as_slice().thickness(2), Some(1.5));
    }

    #[test]
    fn keyed_sources() {
        let b: BTreeMap<u32, f32> = [(4, 1.0), (9, 2.0)].into_iter().collect();
        assert_eq!(b.thickness(9), Some(2.0));
        assert_eq!(b.thickness(1), None);

        let h: HashMap<u32, f32> = [(2, 3.0)].into_iter().collect();
        assert_eq!(h.thickness(2), Some(3.0));
        assert!(!ThicknessSource::is_empty(&h));

        assert_eq!(UniformThickness(0.25).thickness(1234), Some(0.25));
    }
}
