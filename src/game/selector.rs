use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::registry::{TouchPoint, TouchRegistry};

/// Source of random indices for selection.
pub trait Picker {
    /// Return an index in `0..len`. Only called with `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform picker over any `rand` generator.
#[derive(Debug, Clone)]
pub struct UniformPicker<R = StdRng> {
    rng: R,
}

impl UniformPicker<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> UniformPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Picker for UniformPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl TouchRegistry {
    /// Uniform choice over the current entries; `None` when empty.
    pub fn pick_random(&self, picker: &mut impl Picker) -> Option<&TouchPoint> {
        if self.is_empty() {
            return None;
        }
        let index = picker.pick(self.len()).min(self.len() - 1);
        self.nth(index)
    }
}

/// Choose the winning touch from the registry as it is right now.
pub fn select(registry: &TouchRegistry, picker: &mut impl Picker) -> Option<TouchPoint> {
    registry.pick_random(picker).copied()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::game::geometry::Point;

    /// Always returns the same index.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct FixedPick(pub usize);

    impl Picker for FixedPick {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn registry(ids: &[u32]) -> TouchRegistry {
        let mut reg = TouchRegistry::new();
        for &id in ids {
            reg.apply_move(id, Point::new(id as f64, id as f64));
        }
        reg.apply_release_all();
        reg
    }

    #[test]
    fn fixed_index_selects_kth_inserted() {
        let reg = registry(&[7, 2, 9]);
        assert_eq!(select(&reg, &mut FixedPick(0)).map(|t| t.id), Some(7));
        assert_eq!(select(&reg, &mut FixedPick(1)).map(|t| t.id), Some(2));
        assert_eq!(select(&reg, &mut FixedPick(2)).map(|t| t.id), Some(9));
    }

    #[test]
    fn empty_registry_selects_nothing() {
        let reg = TouchRegistry::new();
        assert_eq!(select(&reg, &mut FixedPick(0)), None);
    }

    #[test]
    fn uniform_picker_returns_member() {
        let reg = registry(&[0, 1, 2, 3]);
        let mut picker = UniformPicker::from_seed(Some(42));
        for _ in 0..100 {
            let chosen = select(&reg, &mut picker).expect("non-empty registry");
            assert!(reg.get(chosen.id).is_some());
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let reg = registry(&[0, 1, 2, 3, 4]);
        let mut a = UniformPicker::from_seed(Some(7));
        let mut b = UniformPicker::from_seed(Some(7));
        let xs: Vec<_> = (0..20).map(|_| select(&reg, &mut a).map(|t| t.id)).collect();
        let ys: Vec<_> = (0..20).map(|_| select(&reg, &mut b).map(|t| t.id)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn every_member_gets_picked_eventually() {
        let reg = registry(&[0, 1, 2]);
        let mut picker = UniformPicker::from_seed(Some(1));
        let mut seen = [false; 3];
        for _ in 0..200 {
            if let Some(t) = select(&reg, &mut picker) {
                seen[t.id as usize] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
