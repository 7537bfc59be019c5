// Copyright (c) 2025 gudzpoz
// Copyright (c) 2019 Sevag Hanssian
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// See crates/wordtree/LICENSE for more license information.

use slab::Slab;
use std::mem;
use std::ops::{Index, IndexMut};
use tracing::trace;

/// A wrapper around indices returned by [Slab]
///
/// Parent links are plain indices too, so they never keep a node alive:
/// the slab is the only owner.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) struct Ref(pub usize);

/// A possibly absent node. Absent children count as black leaves.
pub(crate) type Link = Option<Ref>;

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

pub(crate) struct Node<K> {
    pub parent: Link,
    pub children: [Link; 2],
    pub red: bool,
    pub key: K,
}
impl<K> Node<K> {
    /// New nodes are always red
    fn new(key: K, parent: Link) -> Self {
        Self {
            parent,
            children: [None, None],
            red: true,
            key,
        }
    }
}

pub(crate) struct RbSlab<K> {
    slab: Slab<Node<K>>,
    root: Link,
}

impl<K> Index<Ref> for RbSlab<K> {
    type Output = Node<K>;

    fn index(&self, index: Ref) -> &Self::Output {
        &self.slab[index.0]
    }
}
impl<K> IndexMut<Ref> for RbSlab<K> {
    fn index_mut(&mut self, index: Ref) -> &mut Self::Output {
        &mut self.slab[index.0]
    }
}

impl<K> RbSlab<K> {
    pub fn new() -> Self {
        Self {
            slab: Slab::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Link {
        self.root
    }

    pub fn clear(&mut self) {
        self.slab.clear();
        self.root = None;
    }

    /// Places the first key of an empty tree, colored black
    pub fn insert_root(&mut self, key: K) -> Ref {
        debug_assert!(self.root.is_none());
        let mut node = Node::new(key, None);
        node.red = false;
        let root = Ref(self.slab.insert(node));
        self.root = Some(root);
        root
    }

    /// Attaches a new red leaf under `parent` on side `dir` and rebalances
    pub fn attach(&mut self, parent: Ref, dir: usize, key: K) -> Ref {
        debug_assert!(self[parent].children[dir].is_none());
        let z = Ref(self.slab.insert(Node::new(key, Some(parent))));
        self[parent].children[dir] = Some(z);
        self.fix_insert(z);
        z
    }

    fn is_red(&self, x: Link) -> bool {
        x.is_some_and(|x| self[x].red)
    }

    pub fn is_left_child(&self, x: Ref) -> bool {
        match self[x].parent {
            Some(p) => self[p].children[LEFT] == Some(x),
            None => false,
        }
    }

    fn dir_of(&self, x: Ref) -> usize {
        if self.is_left_child(x) { LEFT } else { RIGHT }
    }

    pub fn sibling(&self, x: Ref) -> Link {
        let p = self[x].parent?;
        self[p].children[self.dir_of(x) ^ 1]
    }

    pub fn uncle(&self, x: Ref) -> Link {
        let p = self[x].parent?;
        self[p].parent?;
        self.sibling(p)
    }

    pub fn has_red_child(&self, x: Ref) -> bool {
        let [l, r] = self[x].children;
        self.is_red(l) || self.is_red(r)
    }

    fn swap_colors(&mut self, a: Ref, b: Ref) {
        let red = self[a].red;
        self[a].red = self[b].red;
        self[b].red = red;
    }

    fn swap_keys(&mut self, a: Ref, b: Ref) {
        let Some((a, b)) = self.slab.get2_mut(a.0, b.0) else {
            unreachable!("swapping keys of a node with itself")
        };
        mem::swap(&mut a.key, &mut b.key);
    }

    /// Returns the outermost node in direction `dir` of the subtree at `this`
    pub fn edge(&self, mut this: Ref, dir: usize) -> Ref {
        while let Some(node) = self[this].children[dir] {
            this = node;
        }
        this
    }

    /// In-order neighbour: the successor for `RIGHT`, the predecessor for `LEFT`
    pub fn next(&self, mut this: Ref, dir: usize) -> Link {
        if let Some(child) = self[this].children[dir] {
            return Some(self.edge(child, dir ^ 1));
        }
        let mut y = self[this].parent;
        while let Some(p) = y {
            if self[p].children[dir] != Some(this) {
                break;
            }
            this = p;
            y = self[p].parent;
        }
        y
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self, x: Link) -> usize {
        match x {
            None => 0,
            Some(x) => {
                let [l, r] = self[x].children;
                1 + self.height(l).max(self.height(r))
            }
        }
    }

    /// Puts `y` where `x` hangs, re-pointing the root if needed
    fn replace(&mut self, x: Ref, y: Ref) {
        let parent = self[x].parent;
        self[y].parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(p) => {
                let dir = self.dir_of(x);
                self[p].children[dir] = Some(y);
            }
        }
    }

    /// Rotates `x` down towards `dir`: `LEFT` is a left rotation
    pub fn rotate(&mut self, x: Ref, dir: usize) {
        debug_assert!(dir == LEFT || dir == RIGHT);
        let Some(y) = self[x].children[dir ^ 1] else {
            unreachable!("rotation without a child to lift")
        };
        let y_child = self[y].children[dir];
        self[x].children[dir ^ 1] = y_child;
        if let Some(c) = y_child {
            self[c].parent = Some(x);
        }
        self.replace(x, y);
        self[y].children[dir] = Some(x);
        self[x].parent = Some(y);
    }

    fn fix_insert(&mut self, mut x: Ref) {
        loop {
            let Some(p) = self[x].parent else {
                // blacken the root
                self[x].red = false;
                return;
            };
            if !self[p].red {
                return;
            }
            let Some(g) = self[p].parent else {
                unreachable!("red node at the root")
            };

            if let Some(u) = self.uncle(x).filter(|&u| self[u].red) {
                trace!("insert fixup: red uncle, recoloring");
                self[p].red = false;
                self[u].red = false;
                self[g].red = true;
                x = g;
                continue;
            }

            // black or missing uncle
            let dir = self.dir_of(p);
            if self.dir_of(x) == dir {
                trace!(outer = true, "insert fixup: rotating");
                self.swap_colors(p, g);
            } else {
                trace!(outer = false, "insert fixup: rotating");
                self.rotate(p, dir);
                self.swap_colors(x, g);
            }
            self.rotate(g, dir ^ 1);
            return;
        }
    }

    fn fix_double_black(&mut self, mut x: Ref) {
        loop {
            let Some(p) = self[x].parent else {
                // absorbed at the root
                return;
            };
            let Some(s) = self.sibling(x) else {
                x = p;
                continue;
            };
            let s_dir = self.dir_of(s);

            if self[s].red {
                trace!("delete fixup: red sibling");
                self[p].red = true;
                self[s].red = false;
                self.rotate(p, s_dir ^ 1);
                continue;
            }

            if self.has_red_child(s) {
                if let Some(sl) = self[s].children[LEFT].filter(|&n| self[n].red) {
                    if s_dir == LEFT {
                        trace!("delete fixup: left-left");
                        self[sl].red = self[s].red;
                        self[s].red = self[p].red;
                        self.rotate(p, RIGHT);
                    } else {
                        trace!("delete fixup: right-left");
                        self[sl].red = self[p].red;
                        self.rotate(s, RIGHT);
                        self.rotate(p, LEFT);
                    }
                } else {
                    let Some(sr) = self[s].children[RIGHT] else {
                        unreachable!("sibling lost its red child")
                    };
                    if s_dir == LEFT {
                        trace!("delete fixup: left-right");
                        self[sr].red = self[p].red;
                        self.rotate(s, LEFT);
                        self.rotate(p, RIGHT);
                    } else {
                        trace!("delete fixup: right-right");
                        self[sr].red = self[s].red;
                        self[s].red = self[p].red;
                        self.rotate(p, LEFT);
                    }
                }
                self[p].red = false;
                return;
            }

            // two black children
            self[s].red = true;
            if self[p].red {
                self[p].red = false;
                return;
            }
            x = p;
        }
    }

    /// The node that takes `v`'s place when `v` is removed
    fn bst_replacement(&self, v: Ref) -> Link {
        match self[v].children {
            [Some(_), Some(r)] => Some(self.edge(r, LEFT)),
            [None, None] => None,
            [Some(c), None] | [None, Some(c)] => Some(c),
        }
    }

    /// Removes the key held at `v` and returns it
    pub fn delete(&mut self, mut v: Ref) -> K {
        if let [Some(_), Some(_)] = self[v].children {
            // the successor has at most one child
            let Some(u) = self.bst_replacement(v) else {
                unreachable!()
            };
            self.swap_keys(v, u);
            v = u;
        }

        let u = self.bst_replacement(v);
        let both_black = !self.is_red(u) && !self[v].red;

        let Some(u) = u else {
            // v is a leaf
            if self[v].parent.is_none() {
                self.root = None;
            } else {
                if both_black {
                    self.fix_double_black(v);
                } else if let Some(s) = self.sibling(v) {
                    self[s].red = true;
                }
                // fixup rotations never move v away from its parent
                let Some(p) = self[v].parent else {
                    unreachable!()
                };
                let dir = self.dir_of(v);
                self[p].children[dir] = None;
            }
            return self.slab.remove(v.0).key;
        };

        if self[v].parent.is_none() {
            // the lone child of the root is a red leaf: pull its key up
            let key = self.slab.remove(u.0).key;
            self[v].children = [None, None];
            return mem::replace(&mut self[v].key, key);
        }

        self.replace(v, u);
        let key = self.slab.remove(v.0).key;
        if both_black {
            self.fix_double_black(u);
        } else {
            self[u].red = false;
        }
        key
    }
}

#[cfg(test)]
use std::collections::VecDeque;

#[cfg(test)]
impl<K> RbSlab<K> {
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Returns the black height of the tree, panicking on any violation
    pub fn is_valid(&self) -> usize {
        /*
         * properties
         * - root property: root is black
         * - leaf nodes (None) are black
         * - red property: children of a red node are black
         * - simple path from node to descendant leaf contains same number of black nodes
         * - parent links mirror child links
         */
        fn verify_black_height<K>(rb: &RbSlab<K>, x: Link) -> usize {
            let Some(x) = x else {
                return 0;
            };
            let [l, r] = rb[x].children;
            let left_height = verify_black_height(rb, l);
            let right_height = verify_black_height(rb, r);

            assert_eq!(left_height, right_height, "red-black properties have been violated!");

            let add = if rb[x].red { 0 } else { 1 };
            left_height + add
        }

        fn verify_links<K>(rb: &RbSlab<K>) -> usize {
            let Some(root) = rb.root else {
                return 0;
            };
            assert_eq!(rb[root].parent, None, "root has a parent");
            let mut queue: VecDeque<Ref> = VecDeque::new();
            queue.push_back(root);
            let mut seen = 0;

            while let Some(curr) = queue.pop_front() {
                seen += 1;
                let [l, r] = rb[curr].children;

                // red node must not have red children
                if rb[curr].red {
                    assert!(!rb.is_red(l) && !rb.is_red(r), "red node has red children");
                }

                for child in [l, r].into_iter().flatten() {
                    assert_eq!(rb[child].parent, Some(curr), "broken parent link");
                    queue.push_back(child);
                }
            }
            seen
        }

        if let Some(root) = self.root {
            assert!(!self[root].red, "root is red");
        }
        assert_eq!(verify_links(self), self.slab.len(), "unreachable nodes in slab");
        verify_black_height(self, self.root)
    }
}
