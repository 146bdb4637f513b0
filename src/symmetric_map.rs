use fnv::FnvHashMap;

/// A map keyed by unordered pairs of indices.
#[derive(Clone, Debug)]
pub struct SymmetricMap<K, T> {
    map: FnvHashMap<(K, K), T>,
}

impl<K, T> PartialEq for SymmetricMap<K, T>
where
    K: Eq + std::hash::Hash,
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K, T> Default for SymmetricMap<K, T>
where
    K: Copy + Ord + std::hash::Hash,
{
    fn default() -> Self {
        SymmetricMap::new()
    }
}

impl<K, T> SymmetricMap<K, T>
where
    K: Copy + Ord + std::hash::Hash,
{
    pub fn new() -> Self {
        SymmetricMap {
            map: FnvHashMap::default(),
        }
    }

    fn order_indices(i1: K, i2: K) -> (K, K) {
        if i1 > i2 {
            (i2, i1)
        } else {
            (i1, i2)
        }
    }

    pub fn get(&self, i1: K, i2: K) -> Option<&T> {
        self.map.get(&Self::order_indices(i1, i2))
    }

    pub fn insert(&mut self, i1: K, i2: K, value: T) {
        self.map.insert(Self::order_indices(i1, i2), value);
    }
}
