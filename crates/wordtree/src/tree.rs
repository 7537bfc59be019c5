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

use crate::error::{Result, TreeError};
use crate::order::{Comparator, WordOrder};
use crate::rb_base::{Link, RbSlab, Ref, LEFT, RIGHT};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use tracing::debug;

/// An ordered set of keys kept in a red-black tree
///
/// Keys are ordered by the comparator `C` rather than by [Ord], so two keys
/// that compare equal (say `"Apple"` and `"apple"` under [WordOrder]) are
/// the same entry and only the first one inserted is kept.
///
/// The tree does not count its keys. Callers that need a size keep their
/// own counter, bumping it on a successful [Self::insert] or [Self::delete].
pub struct RbTree<K, C = WordOrder> {
    tree: RbSlab<K>,
    order: C,
}

impl<K, C: Default> Default for RbTree<K, C> {
    fn default() -> Self {
        Self::with_order(C::default())
    }
}

impl<K> RbTree<K, WordOrder> {
    /// Creates an empty tree ordering words case-insensitively
    pub fn new() -> Self {
        Self::with_order(WordOrder::new())
    }
}

impl<K, C> RbTree<K, C> {
    /// Creates an empty tree with the specified comparator
    pub fn with_order(order: C) -> Self {
        Self {
            tree: RbSlab::new(),
            order,
        }
    }

    /// Returns the comparator
    pub fn order(&self) -> &C {
        &self.order
    }

    /// Check if the tree contains nothing
    pub fn is_empty(&self) -> bool {
        self.tree.root().is_none()
    }

    /// Removes every key
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Number of nodes on the longest path from the root, 0 for an empty tree
    pub fn height(&self) -> usize {
        self.tree.height(self.tree.root())
    }

    /// The smallest key
    pub fn first(&self) -> Option<&K> {
        let root = self.tree.root()?;
        Some(&self.tree[self.tree.edge(root, LEFT)].key)
    }

    /// The largest key
    pub fn last(&self) -> Option<&K> {
        let root = self.tree.root()?;
        Some(&self.tree[self.tree.edge(root, RIGHT)].key)
    }

    /// Iterates over keys in ascending order
    pub fn iter(&self) -> Iter<'_, K> {
        let (front, back) = match self.tree.root() {
            Some(root) => (
                Some(self.tree.edge(root, LEFT)),
                Some(self.tree.edge(root, RIGHT)),
            ),
            None => (None, None),
        };
        Iter {
            tree: &self.tree,
            front,
            back,
        }
    }

    /// Same as [Self::iter]
    pub fn in_order(&self) -> Iter<'_, K> {
        self.iter()
    }

    /// Iterates over keys breadth-first, from the root down
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder {
            tree: &self.tree,
            queue: self.tree.root().into_iter().collect(),
        }
    }
}

impl<K, C: Comparator<K>> RbTree<K, C> {
    /// Finds the node holding `key`, or else the node a new `key` would hang from
    ///
    /// The returned ordering is that of `key` against the node's key, so
    /// [Ordering::Equal] means an exact match.
    fn locate<Q>(&self, key: &Q) -> Option<(Ref, Ordering)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut curr = self.tree.root()?;
        loop {
            let ord = self.order.compare(key, self.tree[curr].key.borrow());
            let dir = match ord {
                Ordering::Equal => return Some((curr, ord)),
                Ordering::Less => LEFT,
                Ordering::Greater => RIGHT,
            };
            match self.tree[curr].children[dir] {
                Some(child) => curr = child,
                None => return Some((curr, ord)),
            }
        }
    }

    fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match self.locate(key)? {
            (node, Ordering::Equal) => Some(node),
            _ => None,
        }
    }

    /// Returns the stored key equal to `key`
    ///
    /// The stored key may differ from the query in ways the comparator
    /// ignores, e.g. in case.
    pub fn search<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key)
            .map(|node| &self.tree[node].key)
            .ok_or(TreeError::NotFound)
    }

    /// Checks whether a key equal to `key` is stored
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts `key`, failing with [TreeError::AlreadyExists] if an equal key is stored
    ///
    /// On failure the tree is unchanged and `key` is dropped.
    pub fn insert(&mut self, key: K) -> Result<()> {
        let Some((node, ord)) = self.locate(&key) else {
            self.tree.insert_root(key);
            debug!("inserted first key");
            return Ok(());
        };
        let dir = match ord {
            Ordering::Equal => {
                debug!("insert rejected: key already present");
                return Err(TreeError::AlreadyExists);
            }
            Ordering::Less => LEFT,
            Ordering::Greater => RIGHT,
        };
        self.tree.attach(node, dir, key);
        Ok(())
    }

    /// Removes the key equal to `key` and returns the stored key
    pub fn delete<Q>(&mut self, key: &Q) -> Result<K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let Some(node) = self.find(key) else {
            debug!(empty = self.is_empty(), "delete rejected: key not found");
            return Err(TreeError::NotFound);
        };
        Ok(self.tree.delete(node))
    }
}

impl<K, C: Comparator<K>> Extend<K> for RbTree<K, C> {
    /// Inserts every key, skipping those already present
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ = self.insert(key);
        }
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for RbTree<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K: fmt::Debug, C> fmt::Debug for RbTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K, C> IntoIterator for &'a RbTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of a [RbTree]
///
/// Walks the tree through parent links, so it needs no extra allocation.
pub struct Iter<'a, K> {
    tree: &'a RbSlab<K>,
    front: Link,
    back: Link,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    fn step(&mut self, dir: usize) -> Option<&'a K> {
        let tree = self.tree;
        let (this, other) = if dir == RIGHT {
            (self.front?, self.back)
        } else {
            (self.back?, self.front)
        };
        if Some(this) == other {
            self.front = None;
            self.back = None;
        } else if dir == RIGHT {
            self.front = tree.next(this, RIGHT);
        } else {
            self.back = tree.next(this, LEFT);
        }
        Some(&tree[this].key)
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.step(RIGHT)
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step(LEFT)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

/// Breadth-first iterator over the keys of a [RbTree]
pub struct LevelOrder<'a, K> {
    tree: &'a RbSlab<K>,
    queue: VecDeque<Ref>,
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let curr = self.queue.pop_front()?;
        let node = &tree[curr];
        self.queue.extend(node.children.into_iter().flatten());
        Some(&node.key)
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

#[cfg(test)]
impl<K, C: Comparator<K>> RbTree<K, C> {
    /// Panics unless every red-black and ordering property holds
    pub(crate) fn is_valid(&self) {
        self.tree.is_valid();
        let keys: Vec<&K> = self.iter().collect();
        for pair in keys.windows(2) {
            assert_eq!(
                self.order().compare(pair[0], pair[1]),
                Ordering::Less,
                "keys out of order"
            );
        }
        assert_eq!(keys.len(), self.tree.len());
        assert_eq!(self.level_order().count(), self.tree.len());
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len()
    }

    pub(crate) fn root_is_black(&self) -> bool {
        self.tree.root().is_none_or(|root| !self.tree[root].red)
    }
}
