/// The sections crossing the sweep line, in transverse order, each
/// with the vertex it starts from.
///
/// Both columns hold keys: sections into the graph's section storage,
/// vertices into its vertex list.
#[derive(Debug, Default, Clone)]
pub(crate) struct ActiveSections {
    keys: Vec<usize>,
    vertices: Vec<usize>,
}

impl ActiveSections {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub(crate) fn key(&self, ix: usize) -> usize {
        self.keys[ix]
    }

    pub(crate) fn keys(&self) -> &[usize] {
        &self.keys
    }

    /// Insert `key` before the first entry that is not `before` it,
    /// and return the insertion index. `before(k)` must hold for a
    /// prefix of the entries.
    pub(crate) fn insert<F: FnMut(usize) -> bool>(
        &mut self,
        key: usize,
        vertex: usize,
        mut before: F,
    ) -> usize {
        let ix = self.keys.partition_point(|&k| before(k));
        self.keys.insert(ix, key);
        self.vertices.insert(ix, vertex);
        ix
    }

    /// Remove the entry at `ix`, returning its section and start
    /// vertex.
    pub(crate) fn remove(&mut self, ix: usize) -> (usize, usize) {
        (self.keys.remove(ix), self.vertices.remove(ix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_insert() {
        let mut active = ActiveSections::default();
        // keys double as transverse positions
        for (key, vertex) in [(5, 0), (1, 1), (3, 2), (9, 3)].iter().copied() {
            active.insert(key, vertex, |k| k < key);
        }
        assert_eq!(active.keys(), &[1, 3, 5, 9]);
        assert_eq!(active.len(), 4);

        assert_eq!(active.remove(1), (3, 2));
        assert_eq!(active.keys(), &[1, 5, 9]);
        assert_eq!(active.key(2), 9);
        assert!(!active.is_empty());
    }
}
