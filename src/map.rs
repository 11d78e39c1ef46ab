/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use compare::{natural, Compare, Natural};

use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::iter;
use crate::tree::SplayTree;

/// An ordered map backed by a splay tree. Entries are stored as `(K, V)`
/// pairs ordered by key; through a handle the value can be changed, the key
/// cannot.
pub struct SplayMap<K, V, C = Natural<K>> {
    tree: SplayTree<K, (K, V), C>,
}

impl<K: Ord, V> SplayMap<K, V> {
    pub fn new() -> Self {
        SplayMap::with_cmp(natural())
    }
}

impl<K: Ord, V> Default for SplayMap<K, V> {
    fn default() -> Self {
        SplayMap::new()
    }
}

impl<K, V, C: Compare<K>> SplayMap<K, V, C> {
    pub fn with_cmp(cmp: C) -> Self {
        SplayMap {
            tree: SplayTree::with_cmp(cmp),
        }
    }

    /// Builds a map from `iter`. For repeated keys the first entry wins.
    pub fn from_iter_with_cmp<I: IntoIterator<Item = (K, V)>>(iter: I, cmp: C) -> Self {
        SplayMap {
            tree: SplayTree::from_iter_with_cmp(iter, cmp),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    /// Inserts `value` under `key` unless the key is present, in which case
    /// the existing value is left untouched. Returns a handle to the entry
    /// and whether the insertion happened.
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        self.tree.insert((key, value))
    }

    /// Returns the value under `key`, inserting `make()` first if the key is
    /// absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, make: F) -> &mut V {
        let x = match self.tree.locate(&key) {
            Some((r, Ordering::Equal)) => r,
            at => self.tree.graft((key, make()), at),
        };
        &mut self.tree.value_mut_at(x).1
    }

    pub fn find(&mut self, key: &K) -> Handle {
        self.tree.find(key)
    }

    pub fn find_no_splay(&self, key: &K) -> Handle {
        self.tree.find_no_splay(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// The value under `key`, without splaying.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get_by_key(key).map(|(_, v)| v)
    }

    /// Checked lookup that splays the entry to the root.
    pub fn at(&mut self, key: &K) -> Result<&V> {
        let h = self.tree.find(key);
        self.tree.get(h).map(|(_, v)| v).ok_or(Error::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        let h = self.tree.find(key);
        self.tree.get_mut(h).map(|(_, v)| v).ok_or(Error::KeyNotFound)
    }

    /// The entry at `h`, or `None` for `end` and stale handles.
    pub fn entry(&self, h: Handle) -> Option<(&K, &V)> {
        self.tree.get(h).map(|(k, v)| (k, v))
    }

    pub fn value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.tree.get_mut(h).map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    pub fn begin(&self) -> Handle {
        self.tree.begin()
    }

    pub fn end(&self) -> Handle {
        self.tree.end()
    }

    pub fn next(&self, h: Handle) -> Handle {
        self.tree.next(h)
    }

    pub fn prev(&self, h: Handle) -> Handle {
        self.tree.prev(h)
    }

    pub fn lower_bound(&mut self, key: &K) -> Handle {
        self.tree.lower_bound(key)
    }

    pub fn upper_bound(&mut self, key: &K) -> Handle {
        self.tree.upper_bound(key)
    }

    pub fn equal_range(&mut self, key: &K) -> (Handle, Handle) {
        self.tree.equal_range(key)
    }

    pub fn lower_bound_no_splay(&self, key: &K) -> Handle {
        self.tree.lower_bound_no_splay(key)
    }

    pub fn upper_bound_no_splay(&self, key: &K) -> Handle {
        self.tree.upper_bound_no_splay(key)
    }

    pub fn equal_range_no_splay(&self, key: &K) -> (Handle, Handle) {
        self.tree.equal_range_no_splay(key)
    }

    pub fn count(&mut self, key: &K) -> usize {
        self.tree.count(key)
    }

    pub fn count_no_splay(&self, key: &K) -> usize {
        self.tree.count_no_splay(key)
    }

    pub fn erase(&mut self, key: &K) -> usize {
        self.tree.erase(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove(key)
    }

    /// Erases the entry at `h` and returns a handle to its successor.
    ///
    /// # Panics
    ///
    /// If `h` is `end`, stale, or belongs to another container.
    pub fn erase_at(&mut self, h: Handle) -> Handle {
        self.tree.erase_at(h)
    }

    pub fn try_erase_at(&mut self, h: Handle) -> Result<Handle> {
        self.tree.try_erase_at(h)
    }

    pub fn remove_at(&mut self, h: Handle) -> ((K, V), Handle) {
        self.tree.remove_at(h)
    }

    pub fn erase_range(&mut self, first: Handle, last: Handle) -> Handle {
        self.tree.erase_range(first, last)
    }

    pub fn erase_before(&mut self, key: &K) -> usize {
        self.tree.erase_before(key)
    }

    pub fn erase_from(&mut self, key: &K) -> usize {
        self.tree.erase_from(key)
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn range(&self, first: Handle, last: Handle) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.range(first, last),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn check_sanity(&self) {
        self.tree.check_sanity()
    }
}

impl<K: Debug, V: Debug, C> SplayMap<K, V, C> {
    pub fn dump(&self) -> String {
        self.tree.dump()
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for SplayMap<K, V, C> {
    fn clone(&self) -> Self {
        SplayMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Debug, V: Debug, C: Compare<K>> Debug for SplayMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C: Compare<K>> PartialEq for SplayMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C: Compare<K>> Eq for SplayMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C: Compare<K>> PartialOrd for SplayMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C: Compare<K>> Ord for SplayMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.tree, &other.tree)
    }
}

impl<K: Hash, V: Hash, C: Compare<K>> Hash for SplayMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state)
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for SplayMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SplayMap::from_iter_with_cmp(iter, natural())
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for SplayMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Borrowing in-order iterator over a [`SplayMap`].
pub struct Iter<'a, K, V> {
    inner: iter::Iter<'a, (K, V)>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V, C: Compare<K>> IntoIterator for &'a SplayMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C: Compare<K>> IntoIterator for SplayMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = iter::IntoIter<K, (K, V), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}
