/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use compare::{natural, Compare, Natural};
use log::trace;

use crate::error::{fail, Result, Violation};
use crate::handle::{next_owner, Handle};
use crate::iter::{IntoIter, Iter};
use crate::node::{Arena, Link, LEFT, RIGHT};

/// Extracts the ordering key from a stored element.
pub trait Key<K> {
    fn key(&self) -> &K;
}

impl<K, V> Key<K> for (K, V) {
    fn key(&self) -> &K {
        &self.0
    }
}

/// The splay tree engine shared by [`SplaySet`](crate::SplaySet) and
/// [`SplayMap`](crate::SplayMap). Elements of type `T` are ordered by the key
/// `K` they expose through [`Key`], under the comparator `C`. Keys are unique.
///
/// Methods taking `&mut self` for a lookup splay the accessed node to the
/// root, which is what keeps the amortized cost logarithmic. The
/// `*_no_splay` variants leave the shape alone and only need `&self`.
pub struct SplayTree<K, T, C = Natural<K>> {
    arena: Arena<T>,
    root: Link,
    cmp: C,
    // Identifies the handles issued by this tree.
    owner: u64,
    marker: PhantomData<fn(&K)>,
}

impl<K: Ord, T: Key<K>> SplayTree<K, T> {
    /// Creates an empty tree ordered by the natural order of the keys.
    pub fn new() -> Self {
        SplayTree::with_cmp(natural())
    }
}

impl<K: Ord, T: Key<K>> Default for SplayTree<K, T> {
    fn default() -> Self {
        SplayTree::new()
    }
}

impl<K, T, C> SplayTree<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
    /// Creates an empty tree ordered by `cmp`.
    pub fn with_cmp(cmp: C) -> Self {
        SplayTree {
            arena: Arena::new(),
            root: None,
            cmp,
            owner: next_owner(),
            marker: PhantomData,
        }
    }

    /// Builds a tree from `iter`. Later duplicates of a key are dropped, as
    /// with repeated [`insert`](SplayTree::insert) calls.
    pub fn from_iter_with_cmp<I: IntoIterator<Item = T>>(iter: I, cmp: C) -> Self {
        let mut tree = SplayTree::with_cmp(cmp);
        tree.extend(iter);
        trace!("built splay tree with {} elements", tree.len());
        tree
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Drops every element. All outstanding handles become stale.
    pub fn clear(&mut self) {
        trace!("clearing splay tree with {} elements", self.len());
        self.arena.free_all();
        self.root = None;
    }

    fn handle(&self, x: Link) -> Handle {
        Handle::new(self.owner, x.map(|x| self.arena.id(x)))
    }

    fn resolve(&self, h: Handle) -> Link {
        if h.owner != self.owner {
            return None;
        }
        self.arena.resolve(h.node?)
    }

    fn checked(&self, h: Handle) -> std::result::Result<u32, Violation> {
        if h.owner != self.owner {
            return Err(Violation::ForeignHandle);
        }
        let id = h.node.ok_or(Violation::EndHandle)?;
        self.arena.resolve(id).ok_or(Violation::StaleHandle)
    }

    /// Handle to the smallest element, or [`end`](SplayTree::end) if empty.
    pub fn begin(&self) -> Handle {
        self.handle(self.root.map(|r| self.arena.minimum(r)))
    }

    pub fn end(&self) -> Handle {
        self.handle(None)
    }

    /// Steps to the in-order successor. The successor of the last element is
    /// `end`, and `end` stays put.
    ///
    /// # Panics
    ///
    /// If `h` is stale or belongs to another container.
    pub fn next(&self, h: Handle) -> Handle {
        if h.is_end() && h.owner == self.owner {
            return h;
        }
        let x = self.checked(h).unwrap_or_else(|v| fail(v));
        self.handle(self.arena.increment(x))
    }

    /// Steps to the in-order predecessor. The predecessor of `end` is the
    /// last element; the predecessor of the first element is `end`.
    ///
    /// # Panics
    ///
    /// If `h` is stale or belongs to another container.
    pub fn prev(&self, h: Handle) -> Handle {
        if h.is_end() && h.owner == self.owner {
            return self.handle(self.root.map(|r| self.arena.maximum(r)));
        }
        let x = self.checked(h).unwrap_or_else(|v| fail(v));
        self.handle(self.arena.decrement(x))
    }

    /// The element at `h`, or `None` for `end`, stale and foreign handles.
    pub fn get(&self, h: Handle) -> Option<&T> {
        self.resolve(h).map(|x| self.arena.value(x))
    }

    /// Mutable access to the element at `h`. The caller must not change the
    /// element's key in a way that alters its order.
    pub fn get_mut(&mut self, h: Handle) -> Option<&mut T> {
        let x = self.resolve(h)?;
        Some(self.arena.value_mut(x))
    }

    pub fn first(&self) -> Option<&T> {
        self.root.map(|r| self.arena.value(self.arena.minimum(r)))
    }

    pub fn last(&self) -> Option<&T> {
        self.root.map(|r| self.arena.value(self.arena.maximum(r)))
    }

    /// Splays the node nearest to `key` to the root and reports how `key`
    /// compares to it.
    pub(crate) fn locate(&mut self, key: &K) -> Option<(u32, Ordering)> {
        let r = self.arena.search(self.root, key, &self.cmp)?;
        self.root = Some(r);
        Some((r, self.cmp.compare(key, self.arena.value(r).key())))
    }

    /// Makes `value` the new root, next to the neighbour `at` that
    /// [`locate`](SplayTree::locate) left at the root.
    pub(crate) fn graft(&mut self, value: T, at: Option<(u32, Ordering)>) -> u32 {
        // Allocate before touching any link.
        let n = self.arena.alloc(value);
        if let Some((r, ord)) = at {
            debug_assert!(ord != Ordering::Equal);
            // The old root's subtree on the far side of the key moves under
            // the new node; the old root takes the near side.
            let side = ord == Ordering::Greater;
            let moved = self.arena.detach(r, side);
            self.arena.attach(n, side, moved);
            self.arena.attach(n, !side, Some(r));
        }
        self.root = Some(n);
        n
    }

    pub(crate) fn value_mut_at(&mut self, x: u32) -> &mut T {
        self.arena.value_mut(x)
    }

    /// Inserts `value` unless an element with the same key is present.
    /// Returns a handle to the element with that key and whether `value`
    /// was inserted. Either way the element ends up at the root.
    pub fn insert(&mut self, value: T) -> (Handle, bool) {
        let at = self.locate(value.key());
        if let Some((r, Ordering::Equal)) = at {
            return (self.handle(Some(r)), false);
        }
        let n = self.graft(value, at);
        (self.handle(Some(n)), true)
    }

    /// Looks `key` up, splaying the last visited node even on a miss.
    pub fn find(&mut self, key: &K) -> Handle {
        match self.locate(key) {
            Some((r, Ordering::Equal)) => self.handle(Some(r)),
            _ => self.end(),
        }
    }

    pub fn find_no_splay(&self, key: &K) -> Handle {
        self.handle(self.find_node(key))
    }

    fn find_node(&self, key: &K) -> Link {
        let x = self.arena.search_no_splay(self.root, key, &self.cmp)?;
        if self.cmp.compares_eq(key, self.arena.value(x).key()) {
            Some(x)
        } else {
            None
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// The element with `key`, without splaying.
    pub fn get_by_key(&self, key: &K) -> Option<&T> {
        self.find_node(key).map(|x| self.arena.value(x))
    }

    fn bound(&mut self, key: &K, strict: bool) -> Link {
        let b = self.arena.bound_no_splay(self.root, key, &self.cmp, strict)?;
        self.arena.splay(b);
        self.root = Some(b);
        Some(b)
    }

    /// First element whose key is not less than `key`. Splays it to the root.
    pub fn lower_bound(&mut self, key: &K) -> Handle {
        let x = self.bound(key, false);
        self.handle(x)
    }

    /// First element whose key is greater than `key`. Splays it to the root.
    pub fn upper_bound(&mut self, key: &K) -> Handle {
        let x = self.bound(key, true);
        self.handle(x)
    }

    pub fn equal_range(&mut self, key: &K) -> (Handle, Handle) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    pub fn lower_bound_no_splay(&self, key: &K) -> Handle {
        self.handle(self.arena.bound_no_splay(self.root, key, &self.cmp, false))
    }

    pub fn upper_bound_no_splay(&self, key: &K) -> Handle {
        self.handle(self.arena.bound_no_splay(self.root, key, &self.cmp, true))
    }

    pub fn equal_range_no_splay(&self, key: &K) -> (Handle, Handle) {
        (self.lower_bound_no_splay(key), self.upper_bound_no_splay(key))
    }

    /// Number of elements with `key`: 0 or 1.
    pub fn count(&mut self, key: &K) -> usize {
        let (lo, hi) = self.equal_range(key);
        self.range(lo, hi).count()
    }

    pub fn count_no_splay(&self, key: &K) -> usize {
        let (lo, hi) = self.equal_range_no_splay(key);
        self.range(lo, hi).count()
    }

    // Unlinks `x`, frees it and returns its value and in-order successor.
    fn remove_node(&mut self, x: u32) -> (T, Link) {
        let succ = self.arena.increment(x);
        self.arena.splay(x);
        let l = self.arena.detach(x, LEFT);
        let r = self.arena.detach(x, RIGHT);
        self.root = self.arena.join(l, r);
        (self.arena.free(x), succ)
    }

    /// Removes the element at `h` and returns it together with a handle to
    /// its former successor.
    pub fn try_remove_at(&mut self, h: Handle) -> Result<(T, Handle)> {
        let x = self.checked(h)?;
        let (value, succ) = self.remove_node(x);
        Ok((value, self.handle(succ)))
    }

    /// Like [`try_remove_at`](SplayTree::try_remove_at), but panics on a bad
    /// handle.
    pub fn remove_at(&mut self, h: Handle) -> (T, Handle) {
        let x = self.checked(h).unwrap_or_else(|v| fail(v));
        let (value, succ) = self.remove_node(x);
        (value, self.handle(succ))
    }

    pub fn try_erase_at(&mut self, h: Handle) -> Result<Handle> {
        self.try_remove_at(h).map(|(_, succ)| succ)
    }

    /// Erases the element at `h` and returns a handle to its successor.
    ///
    /// # Panics
    ///
    /// If `h` is `end`, stale, or belongs to another container.
    pub fn erase_at(&mut self, h: Handle) -> Handle {
        self.remove_at(h).1
    }

    /// Erases every element in `[first, last)` and returns `last`.
    pub fn erase_range(&mut self, mut first: Handle, last: Handle) -> Handle {
        let mut erased = 0usize;
        while first != last {
            first = self.erase_at(first);
            erased += 1;
        }
        trace!("erased {} elements from splay tree", erased);
        last
    }

    /// Removes the element with `key`, if any.
    pub fn remove(&mut self, key: &K) -> Option<T> {
        match self.locate(key)? {
            (r, Ordering::Equal) => Some(self.remove_node(r).0),
            _ => None,
        }
    }

    /// Erases the element with `key`. Returns the number erased: 0 or 1.
    pub fn erase(&mut self, key: &K) -> usize {
        self.remove(key).map_or(0, |_| 1)
    }

    /// Erases every element whose key is less than `key`. Returns the number
    /// of elements erased.
    pub fn erase_before(&mut self, key: &K) -> usize {
        let (lhs, rhs) = self.arena.split(self.root, key, &self.cmp);
        self.root = rhs;
        lhs.map_or(0, |l| self.arena.free_subtree(l))
    }

    /// Erases every element whose key is not less than `key`. Returns the
    /// number of elements erased.
    pub fn erase_from(&mut self, key: &K) -> usize {
        let (lhs, rhs) = self.arena.split(self.root, key, &self.cmp);
        self.root = lhs;
        rhs.map_or(0, |r| self.arena.free_subtree(r))
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let x = self.arena.minimum(self.root?);
        Some(self.remove_node(x).0)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let x = self.arena.maximum(self.root?);
        Some(self.remove_node(x).0)
    }

    /// Iterates in ascending key order without splaying.
    pub fn iter(&self) -> Iter<'_, T> {
        match self.root {
            Some(r) => Iter::new(
                &self.arena,
                Some(self.arena.minimum(r)),
                Some(self.arena.maximum(r)),
                self.len(),
            ),
            None => Iter::new(&self.arena, None, None, 0),
        }
    }

    /// Iterates over `[first, last)` without splaying. Stale or foreign
    /// handles are treated as `end`. The range is empty when `first` comes
    /// after `last`.
    pub fn range(&self, first: Handle, last: Handle) -> Iter<'_, T> {
        let empty = Iter::new(&self.arena, None, None, 0);
        let front = match self.resolve(first) {
            Some(x) => x,
            None => return empty,
        };
        let back = match self.resolve(last) {
            Some(l) => {
                if !self
                    .cmp
                    .compares_lt(self.arena.value(front).key(), self.arena.value(l).key())
                {
                    return empty;
                }
                self.arena.decrement(l)
            }
            None => self.root.map(|r| self.arena.maximum(r)),
        };
        Iter::new(&self.arena, Some(front), back, self.len())
    }

    /// Checks parent links, key order and the element count. Panics on the
    /// first broken invariant. Only for debugging.
    pub fn check_sanity(&self) {
        let root = match self.root {
            Some(root) => root,
            None => {
                assert_eq!(self.len(), 0);
                return;
            }
        };
        assert_eq!(self.arena.parent(root), None);
        let mut stack = vec![root];
        let mut reachable = 0usize;
        while let Some(x) = stack.pop() {
            reachable += 1;
            for side in [LEFT, RIGHT] {
                if let Some(c) = self.arena.child(x, side) {
                    assert_eq!(self.arena.parent(c), Some(x));
                    stack.push(c);
                }
            }
        }
        assert_eq!(reachable, self.len());
        let mut prev: Option<&T> = None;
        for value in self.iter() {
            if let Some(prev) = prev {
                assert!(self.cmp.compares_lt(prev.key(), value.key()));
            }
            prev = Some(value);
        }
    }
}

impl<K, T: Debug, C> SplayTree<K, T, C> {
    /// Renders the tree shape, one node per line, children indented below
    /// their parent with the left child first. A missing child next to a
    /// present one is drawn as `/\`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((x, depth)) = stack.pop() {
            for _ in 0..depth {
                out.push_str("    ");
            }
            let x = match x {
                Some(x) => x,
                None => {
                    out.push_str("/\\\n");
                    continue;
                }
            };
            out.push_str(&format!("{:?}\n", self.arena.value(x)));
            let l = self.arena.child(x, LEFT);
            let r = self.arena.child(x, RIGHT);
            if l.is_some() || r.is_some() {
                stack.push((r, depth + 1));
                stack.push((l, depth + 1));
            }
        }
        out
    }
}

impl<K, T, C> Extend<T> for SplayTree<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<K: Ord, T: Key<K>> FromIterator<T> for SplayTree<K, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SplayTree::from_iter_with_cmp(iter, natural())
    }
}

impl<K, T: Key<K>, const N: usize> From<[T; N]> for SplayTree<K, T>
where
    K: Ord,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<K, T: Clone, C: Clone> Clone for SplayTree<K, T, C> {
    fn clone(&self) -> Self {
        SplayTree {
            arena: self.arena.clone(),
            root: self.root,
            cmp: self.cmp.clone(),
            owner: next_owner(),
            marker: PhantomData,
        }
    }
}

impl<K, T, C> Debug for SplayTree<K, T, C>
where
    T: Key<K> + Debug,
    C: Compare<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, T, C> PartialEq for SplayTree<K, T, C>
where
    T: Key<K> + PartialEq,
    C: Compare<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, T, C> Eq for SplayTree<K, T, C>
where
    T: Key<K> + Eq,
    C: Compare<K>,
{
}

impl<K, T, C> PartialOrd for SplayTree<K, T, C>
where
    T: Key<K> + PartialOrd,
    C: Compare<K>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, T, C> Ord for SplayTree<K, T, C>
where
    T: Key<K> + Ord,
    C: Compare<K>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, T, C> Hash for SplayTree<K, T, C>
where
    T: Key<K> + Hash,
    C: Compare<K>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<'a, K, T, C> IntoIterator for &'a SplayTree<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<K, T, C> IntoIterator for SplayTree<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
    type Item = T;
    type IntoIter = IntoIter<K, T, C>;

    fn into_iter(self) -> IntoIter<K, T, C> {
        IntoIter::new(self)
    }
}
