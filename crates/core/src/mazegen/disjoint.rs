//! Disjoint-set forest over flat cell ids, used only while breaking walls.

use std::cmp::Ordering;

pub(super) struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSets {
    pub(super) fn new(size: usize) -> Self {
        Self { parent: (0..size).collect(), rank: vec![0; size] }
    }

    /// Representative of the set containing `id`, compressing the path on
    /// the way back up.
    pub(super) fn find(&mut self, id: usize) -> usize {
        if self.parent[id] != id {
            let root = self.find(self.parent[id]);
            self.parent[id] = root;
        }
        self.parent[id]
    }

    /// Union by rank; a no-op when both ids already share a representative.
    pub(super) fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
    }

    pub(super) fn is_connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
