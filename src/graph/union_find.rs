/// Disjoint-set forest stored as flat arrays indexed by vertex position.
///
/// Path compression in [UnionFind::find] and union by rank in [UnionFind::union]
/// give amortized O(α(n)) operations.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Point everything on the walked path straight at the root
        let mut head = x;
        while self.parent[head] != root {
            let next = self.parent[head];
            self.parent[head] = root;
            head = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`, returning false if they already were one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::UnionFind;

    #[test]
    fn test_union_find_merges_and_detects_cycles() {
        let mut forest = UnionFind::new(5);
        assert!(forest.union(0, 1));
        assert!(forest.union(2, 3));
        assert!(forest.union(1, 3));
        assert!(!forest.union(0, 2));
        assert_eq!(forest.find(0), forest.find(3));
        assert_ne!(forest.find(0), forest.find(4));
        assert_eq!(forest.find(4), 4);
    }

    #[test]
    fn test_union_find_compresses_paths() {
        let mut forest = UnionFind::new(4);
        forest.union(0, 1);
        forest.union(2, 3);
        forest.union(0, 2);
        assert_eq!(forest.parent, [0, 0, 0, 2]);
        assert_eq!(forest.find(3), 0);
        assert_eq!(forest.parent, [0, 0, 0, 0]);
    }
}
