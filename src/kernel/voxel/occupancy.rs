/// Fixed-length bit set marking which grid cells a solid fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occupancy {
    words: Vec<u64>,
    len: usize,
}

impl Occupancy {
    /// An empty set over `len` cells.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / 64] & (1 << (index % 64)) != 0
    }

    pub(crate) fn set(&mut self, index: usize) {
        if index < self.len {
            self.words[index / 64] |= 1 << (index % 64);
        }
    }

    /// Number of filled cells.
    pub(crate) fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub(crate) fn union(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    pub(crate) fn difference(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & !b)
    }

    pub(crate) fn intersection(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        debug_assert_eq!(self.len, other.len, "occupancies from different grids");
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(&a, &b)| op(a, b))
                .collect(),
            len: self.len,
        }
    }

    /// Indices of filled cells in ascending order.
    pub(crate) fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(w * 64 + bit)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_count() {
        let mut occ = Occupancy::new(130);
        assert!(occ.is_empty());
        occ.set(0);
        occ.set(64);
        occ.set(129);
        occ.set(500);
        assert!(occ.get(64));
        assert!(!occ.get(65));
        assert_eq!(occ.count(), 3);
        assert_eq!(occ.iter_ones().collect::<Vec<_>>(), vec![0, 64, 129]);
    }

    #[test]
    fn set_operations() {
        let mut a = Occupancy::new(10);
        let mut b = Occupancy::new(10);
        for i in 0..6 {
            a.set(i);
        }
        for i in 4..10 {
            b.set(i);
        }
        assert_eq!(a.union(&b).count(), 10);
        assert_eq!(a.intersection(&b).iter_ones().collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(a.difference(&b).iter_ones().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }
}
