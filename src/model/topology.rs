//! Leaf-indexed tree arena shared by the vector codec and the vector editor.
//!
//! A [Topology] on `n` leaves stores leaf `i` at arena index `i`, internal
//! vertices at `n..2n-2` and the root last, at `2n-2`. Children always precede
//! their parent, so a forward scan over the arena is a valid post-order.
//! All traversals and rebuilds use explicit stacks.

use crate::model::fenwick::FenwickTree;
use crate::model::tree::{NO_ROOT_SET_INDEX, Tree, VertexIndex};
use crate::model::vertex::{NO_PARENT_SET, Vertex};
use log::trace;

/// End marker of the merge-order linked list in [Topology::to_vector].
const NIL: usize = usize::MAX;

// =$========================================================================$=
// TOPOLOGY
// =$========================================================================$=
/// Rooted binary tree whose leaves are identified by their arena index.
///
/// # Construction
/// Create the leaves with [`Topology::with_leaves`], then add internal vertices
/// bottom-up with [`Topology::add_internal_vertex`] and finish with
/// [`Topology::add_root`]. Alternatively convert from an ancestry table
/// ([`Topology::from_ancestry`]) or a parsed [Tree] ([`Topology::from_tree`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    num_leaves: usize,
    vertices: Vec<Vertex>,
    root_index: VertexIndex,
}

// ============================================================================
// Construction
// ============================================================================
impl Topology {
    /// Creates a topology holding only the leaves `0..num_leaves`.
    pub fn with_leaves(num_leaves: usize) -> Self {
        let mut vertices = Vec::with_capacity((2 * num_leaves).saturating_sub(1));
        vertices.extend((0..num_leaves).map(|i| Vertex::new_leaf(i, None, i)));

        Topology {
            num_leaves,
            vertices,
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds an internal vertex with the given children and returns its index.
    pub fn add_internal_vertex(&mut self, children: (VertexIndex, VertexIndex)) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_internal(index, children, None));
        self.vertices[children.0].set_parent(index);
        self.vertices[children.1].set_parent(index);
        index
    }

    /// Adds the root with the given children and returns its index.
    pub fn add_root(&mut self, children: (VertexIndex, VertexIndex)) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_root(index, children));
        self.vertices[children.0].set_parent(index);
        self.vertices[children.1].set_parent(index);
        self.root_index = index;
        index
    }

    /// Builds the topology described by an ancestry table.
    ///
    /// Row `i` is `[child1, child2, parent]` with `parent = n + i`; the last
    /// row creates the root.
    ///
    /// # Example
    /// ```
    /// use phylo2vec::model::topology::Topology;
    ///
    /// let topology = Topology::from_ancestry(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]]);
    /// assert_eq!(topology.num_leaves(), 4);
    /// assert_eq!(topology.root_index(), 6);
    /// assert_eq!(topology.children(6), Some((5, 4)));
    /// ```
    pub fn from_ancestry(ancestry: &[[usize; 3]]) -> Self {
        let num_leaves = ancestry.len() + 1;
        let mut topology = Topology::with_leaves(num_leaves);

        for (i, &[c1, c2, parent]) in ancestry.iter().enumerate() {
            let index = if i + 1 == ancestry.len() {
                topology.add_root((c1, c2))
            } else {
                topology.add_internal_vertex((c1, c2))
            };
            debug_assert_eq!(index, parent);
        }

        topology
    }

    /// Converts a parsed [Tree] into a topology.
    ///
    /// # Arguments
    /// * `tree` - Fully constructed tree with at least two leaves
    /// * `leaf_ids` - Leaf id for every label index of `tree`
    ///
    /// Branch lengths are kept; internal vertices are numbered in post-order.
    pub fn from_tree(tree: &Tree, leaf_ids: &[usize]) -> Self {
        let mut topology = Topology::with_leaves(leaf_ids.len());
        let mut new_index = vec![NO_PARENT_SET; tree.num_vertices()];

        for vertex in tree.post_order_iter() {
            let index = match (vertex.label_index(), vertex.children()) {
                (Some(label_index), _) => leaf_ids[label_index],
                (None, Some((left, right))) => {
                    let children = (new_index[left], new_index[right]);
                    if vertex.is_root() {
                        topology.add_root(children)
                    } else {
                        topology.add_internal_vertex(children)
                    }
                }
                (None, None) => unreachable!("non-leaf vertex without children"),
            };
            topology.vertices[index].set_branch_length(vertex.branch_length());
            new_index[vertex.index()] = index;
        }

        topology
    }

    /// Builds a new topology from a children table over old ids, starting at
    /// `root`, with leaves renamed by `leaf_id`.
    ///
    /// Vertices not reachable from `root` are dropped. Branch lengths are not kept.
    fn rebuild<F>(
        num_leaves: usize,
        root: VertexIndex,
        children: &[Option<(VertexIndex, VertexIndex)>],
        leaf_id: F,
    ) -> Self
    where
        F: Fn(VertexIndex) -> usize,
    {
        let mut topology = Topology::with_leaves(num_leaves);
        let mut new_index = vec![NO_PARENT_SET; children.len()];
        let mut stack = vec![(root, false)];

        while let Some((old, children_visited)) = stack.pop() {
            match children[old] {
                None => new_index[old] = leaf_id(old),
                Some((left, right)) if children_visited => {
                    let pair = (new_index[left], new_index[right]);
                    new_index[old] = if old == root {
                        topology.add_root(pair)
                    } else {
                        topology.add_internal_vertex(pair)
                    };
                }
                Some((left, right)) => {
                    stack.push((old, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
            }
        }

        topology
    }

    fn children_table(&self) -> Vec<Option<(VertexIndex, VertexIndex)>> {
        self.vertices.iter().map(|v| v.children()).collect()
    }
}

// ============================================================================
// Accessors
// ============================================================================
impl Topology {
    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Returns the parent of a vertex, `None` for the root.
    pub fn parent(&self, index: VertexIndex) -> Option<VertexIndex> {
        self.vertices[index].parent_index()
    }

    /// Returns the children of a vertex, `None` for a leaf.
    pub fn children(&self, index: VertexIndex) -> Option<(VertexIndex, VertexIndex)> {
        self.vertices[index].children()
    }

    /// Returns for every vertex the smallest leaf in its subtree.
    pub fn min_leaves(&self) -> Vec<usize> {
        let mut min_leaf: Vec<usize> = (0..self.vertices.len()).collect();
        for index in self.num_leaves..self.vertices.len() {
            if let Some((left, right)) = self.children(index) {
                min_leaf[index] = min_leaf[left].min(min_leaf[right]);
            }
        }
        min_leaf
    }

    /// Checks the arena invariants: leaf `i` at index `i`, `2n-1` vertices,
    /// children before parents, consistent parent references, root last.
    pub fn is_valid(&self) -> bool {
        let n = self.num_leaves;
        if n < 2 || self.vertices.len() != 2 * n - 1 || self.root_index != 2 * n - 2 {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index || vertex.is_leaf() != (index < n) {
                return false;
            }
            if vertex.is_leaf() && vertex.label_index() != Some(index) {
                return false;
            }
            if vertex.is_root() != (index == self.root_index) {
                return false;
            }
            if let Some((left, right)) = vertex.children() {
                if left >= index || right >= index || left == right {
                    return false;
                }
                if self.parent(left) != Some(index) || self.parent(right) != Some(index) {
                    return false;
                }
            }
        }

        true
    }
}

impl std::ops::Index<VertexIndex> for Topology {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// DECODING
// =$========================================================================$=
impl Topology {
    /// Derives the Phylo2Vec vector of this topology.
    ///
    /// Leaves are removed from `n-1` down to `1`; when leaf `b` goes, its parent
    /// is the vertex `b` created and its sibling is where `b` was attached.
    /// The merge order is then replayed as a linked list, and a Fenwick tree
    /// ranks each internal sibling among the vertices existing at that time.
    ///
    /// Internal vertex numbering does not matter; only leaf ids do.
    pub fn to_vector(&self) -> Vec<usize> {
        let n = self.num_leaves;
        if n < 2 {
            return Vec::new();
        }

        let mut parent: Vec<VertexIndex> = self
            .vertices
            .iter()
            .map(|v| v.parent_index().unwrap_or(NO_PARENT_SET))
            .collect();
        let mut children: Vec<(VertexIndex, VertexIndex)> = self
            .vertices
            .iter()
            .map(|v| v.children().unwrap_or((NO_PARENT_SET, NO_PARENT_SET)))
            .collect();
        let mut root = self.root_index;

        // Removal sweep: sister of each leaf and the leaf creating each vertex
        let mut sister = vec![0; n];
        let mut creator = vec![0; self.vertices.len()];
        for b in (1..n).rev() {
            let p = parent[b];
            let (left, right) = children[p];
            let s = if left == b { right } else { left };
            sister[b] = s;
            creator[p] = b;
            trace!("Leaf {b} created vertex {p} as sister of {s}");

            if p == root {
                root = s;
                parent[s] = NO_PARENT_SET;
            } else {
                let g = parent[p];
                let (g_left, g_right) = children[g];
                children[g] = if g_left == p { (s, g_right) } else { (g_left, s) };
                parent[s] = g;
            }
        }

        // Merge order as linked list over creating leaves
        let mut next = vec![NIL; n];
        let mut head = NIL;
        for b in 1..n {
            let s = sister[b];
            if s < n {
                next[b] = head;
                head = b;
            } else {
                let c = creator[s];
                next[b] = next[c];
                next[c] = b;
            }
        }

        let mut position = vec![0; n];
        let mut current = head;
        let mut pos = 0;
        while current != NIL {
            position[current] = pos;
            pos += 1;
            current = next[current];
        }

        // Rank internal sisters among vertices created before
        let mut created = FenwickTree::new_empty(n - 1);
        let mut v = Vec::with_capacity(n - 1);
        for b in 1..n {
            let s = sister[b];
            let value = if s < n {
                s
            } else {
                b + created.prefix_count(position[creator[s]])
            };
            v.push(value);
            created.increment(position[b]);
        }

        v
    }
}

// =$========================================================================$=
// QUERIES AND EDITS
// =$========================================================================$=
impl Topology {
    /// Returns the lowest common ancestor of two vertices.
    ///
    /// Returns the vertex itself if `i == j`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    pub fn common_ancestor(&self, i: VertexIndex, j: VertexIndex) -> VertexIndex {
        let mut is_ancestor = vec![false; self.vertices.len()];
        let mut x = Some(i);
        while let Some(index) = x {
            is_ancestor[index] = true;
            x = self.parent(index);
        }

        let mut y = j;
        while !is_ancestor[y] {
            match self.parent(y) {
                Some(p) => y = p,
                None => break,
            }
        }
        y
    }

    /// Returns this topology with `leaf` pruned.
    ///
    /// The sibling of `leaf` takes the place of its parent and leaves above
    /// `leaf` shift down by one.
    ///
    /// # Panics
    /// Panics if `leaf` is not a leaf or the topology has fewer than three leaves.
    pub fn without_leaf(&self, leaf: usize) -> Topology {
        assert!(leaf < self.num_leaves && self.num_leaves > 2);

        let mut children = self.children_table();
        let mut root = self.root_index;

        let parent = self.parent(leaf).unwrap_or(NO_PARENT_SET);
        let sister = match self.children(parent) {
            Some((left, right)) if left == leaf => right,
            Some((left, _)) => left,
            None => unreachable!("parent of a leaf has children"),
        };
        children[parent] = None;

        match self.parent(parent) {
            None => root = sister,
            Some(grandparent) => {
                if let Some((left, right)) = children[grandparent] {
                    children[grandparent] = Some(if left == parent {
                        (sister, right)
                    } else {
                        (left, sister)
                    });
                }
            }
        }

        Self::rebuild(self.num_leaves - 1, root, &children, |old| {
            if old > leaf { old - 1 } else { old }
        })
    }

    /// Returns this topology with leaves renamed: old leaf `x` becomes `new_of_old[x]`.
    ///
    /// `new_of_old` must be a permutation of `0..n-1`.
    pub fn with_relabeled_leaves(&self, new_of_old: &[usize]) -> Topology {
        debug_assert_eq!(new_of_old.len(), self.num_leaves);
        Self::rebuild(
            self.num_leaves,
            self.root_index,
            &self.children_table(),
            |old| new_of_old[old],
        )
    }

    /// Returns the topology rooted on the edge above `node`.
    ///
    /// The old root is suppressed and the unrooted topology is unchanged.
    /// Rerooting at the root or one of its children returns the same topology.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn rerooted_at(&self, node: VertexIndex) -> Topology {
        let root = self.root_index;
        if node == root {
            return self.clone();
        }

        // Path from node up to the root
        let mut path = vec![node];
        while let Some(p) = self.parent(path[path.len() - 1]) {
            path.push(p);
        }
        let k = path.len() - 1;

        // other[i]: child of path[i] not on the path
        let mut other = vec![NO_PARENT_SET; k + 1];
        for i in 1..=k {
            other[i] = match self.children(path[i]) {
                Some((left, right)) if left == path[i - 1] => right,
                Some((left, _)) => left,
                None => unreachable!("vertex on root path has children"),
            };
        }

        let mut children = self.children_table();
        children[root] = Some((node, if k == 1 { other[1] } else { path[1] }));
        for i in 1..k {
            let below = if i + 1 < k { path[i + 1] } else { other[k] };
            children[path[i]] = Some((other[i], below));
        }

        Self::rebuild(self.num_leaves, root, &children, |old| old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_ancestry() {
        // ((0,2)5,(1,3)4)6;
        let topology = Topology::from_ancestry(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]]);
        assert!(topology.is_valid());
        assert_eq!(topology.parent(0), Some(5));
        assert_eq!(topology.parent(3), Some(4));
        assert_eq!(topology.parent(6), None);
        assert_eq!(topology.min_leaves(), vec![0, 1, 2, 3, 1, 0, 0]);
    }

    #[rstest]
    #[case(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]], vec![0, 0, 1])]
    #[case(&[[3, 5, 6], [1, 4, 7], [0, 6, 8], [8, 2, 9], [9, 7, 10]], vec![0, 0, 0, 1, 3])]
    #[case(&[[0, 1, 2]], vec![0])]
    fn test_to_vector(#[case] ancestry: &[[usize; 3]], #[case] expected: Vec<usize>) {
        assert_eq!(Topology::from_ancestry(ancestry).to_vector(), expected);
    }

    #[test]
    fn test_common_ancestor() {
        let topology = Topology::from_ancestry(&[[3, 5, 6], [1, 4, 7], [0, 6, 8], [8, 2, 9], [9, 7, 10]]);
        assert_eq!(topology.common_ancestor(3, 5), 6);
        assert_eq!(topology.common_ancestor(0, 5), 8);
        assert_eq!(topology.common_ancestor(2, 4), 10);
        assert_eq!(topology.common_ancestor(4, 4), 4);
    }

    #[test]
    fn test_without_leaf() {
        // (((0,(3,5)6)8,2)9,(1,4)7)10; without 2 -> ((0,(2,4)),(1,3))
        let topology = Topology::from_ancestry(&[[3, 5, 6], [1, 4, 7], [0, 6, 8], [8, 2, 9], [9, 7, 10]]);
        let pruned = topology.without_leaf(2);
        assert!(pruned.is_valid());
        assert_eq!(pruned.num_leaves(), 5);
        assert_eq!(pruned.to_vector(), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_rerooted_at_child_of_root() {
        let topology = Topology::from_ancestry(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]]);
        assert_eq!(topology.rerooted_at(5).to_vector(), vec![0, 0, 1]);
        assert_eq!(topology.rerooted_at(6).to_vector(), vec![0, 0, 1]);
    }

    #[test]
    fn test_rerooted_at_leaf() {
        let topology = Topology::from_ancestry(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]]);
        let rerooted = topology.rerooted_at(0);
        assert!(rerooted.is_valid());
        assert_eq!(rerooted.parent(0), Some(rerooted.root_index()));
        assert_eq!(rerooted.to_vector(), vec![0, 1, 1]);
    }
}
