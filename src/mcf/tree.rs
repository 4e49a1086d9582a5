/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! The spanning tree of a network simplex basis.
//!
//! Vertices are dense indices `0..=n` where `0` is the root. The tree
//! is stored in four arrays:
//!
//! - `parent[v]`: the parent vertex of `v`,
//! - `parent_edge[v]`: the (dense) index of the tree edge between `v`
//!   and its parent,
//! - `depth[v]`: the number of edges on the path from `v` to the root,
//! - `thread[v]`: the successor of `v` in a circular preorder of all
//!   vertices. The subtree of `v` is the maximal run of the thread
//!   starting at `v` whose vertices are deeper than `v`.

/// Marks a missing parent (of the root).
pub(crate) const NONE: usize = usize::max_value();

/// The root vertex.
pub(crate) const ROOT: usize = 0;

#[derive(Clone, Debug)]
pub(crate) struct TreeIndex {
    pub(crate) parent: Vec<usize>,
    pub(crate) parent_edge: Vec<usize>,
    pub(crate) depth: Vec<usize>,
    pub(crate) thread: Vec<usize>,

    // scratch space for `exchange`
    marked: Vec<bool>,
    first_child: Vec<usize>,
    next_sibling: Vec<usize>,
}

impl TreeIndex {
    /// Create the star tree on the root and `n` further vertices.
    ///
    /// Vertex `v` is attached to the root by edge `first_edge + v - 1`.
    pub(crate) fn star(n: usize, first_edge: usize) -> TreeIndex {
        let mut parent = vec![ROOT; n + 1];
        let mut parent_edge: Vec<usize> = (0..=n).map(|v| (first_edge + v).wrapping_sub(1)).collect();
        let mut depth = vec![1; n + 1];
        let thread = (0..=n).map(|v| if v < n { v + 1 } else { ROOT }).collect();
        parent[ROOT] = NONE;
        parent_edge[ROOT] = NONE;
        depth[ROOT] = 0;
        TreeIndex {
            parent,
            parent_edge,
            depth,
            thread,
            marked: vec![false; n + 1],
            first_child: vec![NONE; n + 1],
            next_sibling: vec![NONE; n + 1],
        }
    }

    /// The number of vertices including the root.
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Return the nearest common ancestor of `u` and `v`.
    ///
    /// The deeper vertex is advanced first, `v` on ties.
    pub(crate) fn apex(&self, mut u: usize, mut v: usize) -> usize {
        while u != v {
            if self.depth[u] > self.depth[v] {
                u = self.parent[u];
            } else {
                v = self.parent[v];
            }
        }
        u
    }

    /// Return the vertices of the subtree of `v` in thread order.
    pub(crate) fn subtree(&self, v: usize) -> Vec<usize> {
        let mut nodes = vec![v];
        let mut x = self.thread[v];
        while x != v && self.depth[x] > self.depth[v] {
            nodes.push(x);
            x = self.thread[x];
        }
        nodes
    }

    /// Exchange a tree edge by a non-tree edge.
    ///
    /// The tree edge to be removed is `parent_edge[y]`. The entering
    /// edge `e_in` connects `a` and `b`, exactly one of which must be
    /// in the subtree of `y`. Removing the leaving edge splits the tree
    /// into the part containing the root and the subtree of `y`; the
    /// latter is re-hung below the other endpoint of the entering edge.
    ///
    /// Returns the endpoint `v` of the entering edge that lies in the
    /// moved subtree together with the moved vertices in their new
    /// preorder (starting at `v`).
    pub(crate) fn exchange(&mut self, e_in: usize, a: usize, b: usize, y: usize) -> (usize, Vec<usize>) {
        debug_assert!(y != ROOT);
        let z = self.parent[y];

        let old = self.subtree(y);
        for &x in &old {
            self.marked[x] = true;
        }
        let last_old = old[old.len() - 1];

        let (v, u) = if self.marked[a] { (a, b) } else { (b, a) };
        debug_assert!(self.marked[v] && !self.marked[u]);

        // thread predecessor of y, it lies in the subtree of z
        let mut h = z;
        while self.thread[h] != y {
            h = self.thread[h];
        }

        // reverse the path v -> y, the old parent edge of y leaves
        let mut prev_node = u;
        let mut prev_edge = e_in;
        let mut x = v;
        loop {
            let next = self.parent[x];
            let edge = self.parent_edge[x];
            self.parent[x] = prev_node;
            self.parent_edge[x] = prev_edge;
            if x == y {
                break;
            }
            prev_node = x;
            prev_edge = edge;
            x = next;
        }

        // cut the subtree out of the thread
        self.thread[h] = self.thread[last_old];

        // new preorder of the moved subtree
        for &x in &old {
            self.first_child[x] = NONE;
        }
        for &x in old.iter().rev() {
            if x != v {
                let p = self.parent[x];
                self.next_sibling[x] = self.first_child[p];
                self.first_child[p] = x;
            }
        }
        let mut order = Vec::with_capacity(old.len());
        self.depth[v] = self.depth[u] + 1;
        let mut stack = vec![v];
        while let Some(x) = stack.pop() {
            order.push(x);
            let mut c = self.first_child[x];
            while c != NONE {
                self.depth[c] = self.depth[x] + 1;
                stack.push(c);
                c = self.next_sibling[c];
            }
        }

        // splice it in right after u
        let after = self.thread[u];
        self.thread[u] = v;
        for w in order.windows(2) {
            self.thread[w[0]] = w[1];
        }
        self.thread[order[order.len() - 1]] = after;

        for &x in &old {
            self.marked[x] = false;
        }

        (v, order)
    }

    /// Verify the consistency of the tree arrays.
    ///
    /// Checks that the root has depth 0 and no parent, that every other
    /// vertex reaches the root in exactly `depth` parent steps and that
    /// the thread is a circular preorder visiting every vertex once.
    #[cfg(test)]
    pub(crate) fn check(&self) -> Result<(), String> {
        let n = self.len();
        if n == 0 {
            return Ok(());
        }
        if self.depth[ROOT] != 0 || self.parent[ROOT] != NONE {
            return Err("invalid root".to_string());
        }
        for v in 1..n {
            let p = self.parent[v];
            if p >= n {
                return Err(format!("vertex {} has no parent", v));
            }
            if self.depth[v] != self.depth[p] + 1 {
                return Err(format!("wrong depth of vertex {}", v));
            }
            let mut x = v;
            for _ in 0..self.depth[v] {
                x = self.parent[x];
                if x >= n {
                    return Err(format!("broken parent chain at vertex {}", v));
                }
            }
            if x != ROOT {
                return Err(format!("vertex {} does not reach the root", v));
            }
        }

        // walk the thread, `stack` holds the path from the root to the
        // current vertex, so the next vertex must be a child of one of them
        let mut seen = vec![false; n];
        let mut stack = vec![ROOT];
        seen[ROOT] = true;
        let mut x = self.thread[ROOT];
        for _ in 1..n {
            if x >= n || seen[x] {
                return Err(format!("thread visits vertex {} twice", x));
            }
            seen[x] = true;
            let p = self.parent[x];
            while let Some(&top) = stack.last() {
                if top == p {
                    break;
                }
                stack.pop();
            }
            if stack.is_empty() {
                return Err(format!("thread is not a preorder at vertex {}", x));
            }
            stack.push(x);
            x = self.thread[x];
        }
        if x != ROOT {
            return Err("thread does not return to the root".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{TreeIndex, NONE, ROOT};

    #[test]
    fn test_star() {
        let t = TreeIndex::star(4, 10);
        assert_eq!(t.len(), 5);
        assert_eq!(t.parent, vec![NONE, 0, 0, 0, 0]);
        assert_eq!(t.parent_edge, vec![NONE, 10, 11, 12, 13]);
        assert_eq!(t.depth, vec![0, 1, 1, 1, 1]);
        assert_eq!(t.thread, vec![1, 2, 3, 4, 0]);
        assert_eq!(t.check(), Ok(()));
        assert_eq!(TreeIndex::star(0, 0).check(), Ok(()));
    }

    #[test]
    fn test_apex() {
        let mut t = TreeIndex::star(4, 10);
        assert_eq!(t.apex(1, 3), ROOT);
        assert_eq!(t.apex(2, 2), 2);
        // hang 2 below 1 and 3 below 2
        t.exchange(0, 1, 2, 2);
        t.exchange(1, 2, 3, 3);
        assert_eq!(t.check(), Ok(()));
        assert_eq!(t.apex(3, 1), 1);
        assert_eq!(t.apex(3, 4), ROOT);
        assert_eq!(t.apex(2, 3), 2);
    }

    #[test]
    fn test_exchange() {
        let mut t = TreeIndex::star(4, 10);

        // edge 0 between 1 and 2 replaces the root edge of 2
        let (v, order) = t.exchange(0, 1, 2, 2);
        assert_eq!(v, 2);
        assert_eq!(order, vec![2]);
        assert_eq!(t.parent[2], 1);
        assert_eq!(t.parent_edge[2], 0);
        assert_eq!(t.depth[2], 2);
        assert_eq!(t.check(), Ok(()));
        assert_eq!(t.subtree(1), vec![1, 2]);

        // edge 1 between 3 and 2 replaces the root edge of 1, this
        // reverses the path 2 -> 1
        let (v, order) = t.exchange(1, 3, 2, 1);
        assert_eq!(v, 2);
        assert_eq!(order, vec![2, 1]);
        assert_eq!(t.parent[2], 3);
        assert_eq!(t.parent_edge[2], 1);
        assert_eq!(t.parent[1], 2);
        assert_eq!(t.parent_edge[1], 0);
        assert_eq!(t.depth[1], 3);
        assert_eq!(t.check(), Ok(()));
        assert_eq!(t.subtree(3), vec![3, 2, 1]);
        assert_eq!(t.subtree(ROOT).len(), 5);
    }

    #[test]
    fn test_check() {
        let mut t = TreeIndex::star(3, 0);
        t.thread[1] = 3;
        t.thread[3] = 2;
        t.thread[2] = 0;
        assert_eq!(t.check(), Ok(()));

        let mut u = t.clone();
        u.thread[2] = 1;
        assert!(u.check().is_err());

        let mut u = t.clone();
        u.depth[2] = 2;
        assert!(u.check().is_err());

        let mut u = t;
        u.parent[1] = 2;
        u.depth[1] = 2;
        // 1 is now a child of 2 but visited before it
        assert!(u.check().is_err());
    }
}
