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

use crate::error::Result;
use crate::handle::Handle;
use crate::iter;
use crate::tree::{Key, SplayTree};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item<T>(T);

impl<T> Key<T> for Item<T> {
    fn key(&self) -> &T {
        &self.0
    }
}

/// An ordered set backed by a splay tree.
pub struct SplaySet<T, C = Natural<T>> {
    tree: SplayTree<T, Item<T>, C>,
}

impl<T: Ord> SplaySet<T> {
    pub fn new() -> Self {
        SplaySet::with_cmp(natural())
    }
}

impl<T: Ord> Default for SplaySet<T> {
    fn default() -> Self {
        SplaySet::new()
    }
}

impl<T, C: Compare<T>> SplaySet<T, C> {
    pub fn with_cmp(cmp: C) -> Self {
        SplaySet {
            tree: SplayTree::with_cmp(cmp),
        }
    }

    /// Builds a set from `iter`, keeping the first of any equal values.
    pub fn from_iter_with_cmp<I: IntoIterator<Item = T>>(iter: I, cmp: C) -> Self {
        SplaySet {
            tree: SplayTree::from_iter_with_cmp(iter.into_iter().map(Item), cmp),
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

    /// Inserts `value` if no equal value is present. Returns a handle to the
    /// value in the set and whether the insertion happened.
    pub fn insert(&mut self, value: T) -> (Handle, bool) {
        self.tree.insert(Item(value))
    }

    pub fn find(&mut self, value: &T) -> Handle {
        self.tree.find(value)
    }

    pub fn find_no_splay(&self, value: &T) -> Handle {
        self.tree.find_no_splay(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    pub fn get(&self, h: Handle) -> Option<&T> {
        self.tree.get(h).map(|item| &item.0)
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|item| &item.0)
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|item| &item.0)
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

    pub fn lower_bound(&mut self, value: &T) -> Handle {
        self.tree.lower_bound(value)
    }

    pub fn upper_bound(&mut self, value: &T) -> Handle {
        self.tree.upper_bound(value)
    }

    pub fn equal_range(&mut self, value: &T) -> (Handle, Handle) {
        self.tree.equal_range(value)
    }

    pub fn lower_bound_no_splay(&self, value: &T) -> Handle {
        self.tree.lower_bound_no_splay(value)
    }

    pub fn upper_bound_no_splay(&self, value: &T) -> Handle {
        self.tree.upper_bound_no_splay(value)
    }

    pub fn equal_range_no_splay(&self, value: &T) -> (Handle, Handle) {
        self.tree.equal_range_no_splay(value)
    }

    pub fn count(&mut self, value: &T) -> usize {
        self.tree.count(value)
    }

    pub fn count_no_splay(&self, value: &T) -> usize {
        self.tree.count_no_splay(value)
    }

    /// Erases `value`. Returns the number of values erased: 0 or 1.
    pub fn erase(&mut self, value: &T) -> usize {
        self.tree.erase(value)
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value).map(|item| item.0)
    }

    /// Erases the value at `h` and returns a handle to its successor.
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

    pub fn remove_at(&mut self, h: Handle) -> (T, Handle) {
        let (item, succ) = self.tree.remove_at(h);
        (item.0, succ)
    }

    pub fn erase_range(&mut self, first: Handle, last: Handle) -> Handle {
        self.tree.erase_range(first, last)
    }

    pub fn erase_before(&mut self, value: &T) -> usize {
        self.tree.erase_before(value)
    }

    pub fn erase_from(&mut self, value: &T) -> usize {
        self.tree.erase_from(value)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(|item| item.0)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(|item| item.0)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn range(&self, first: Handle, last: Handle) -> Iter<'_, T> {
        Iter {
            inner: self.tree.range(first, last),
        }
    }

    pub fn check_sanity(&self) {
        self.tree.check_sanity()
    }
}

impl<T: Debug, C> SplaySet<T, C> {
    pub fn dump(&self) -> String {
        self.tree.dump()
    }
}

impl<T: Debug> Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: Clone, C: Clone> Clone for SplaySet<T, C> {
    fn clone(&self) -> Self {
        SplaySet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: Debug, C: Compare<T>> Debug for SplaySet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C: Compare<T>> PartialEq for SplaySet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C: Compare<T>> Eq for SplaySet<T, C> {}

impl<T: PartialOrd, C: Compare<T>> PartialOrd for SplaySet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord, C: Compare<T>> Ord for SplaySet<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.tree, &other.tree)
    }
}

impl<T: Hash, C: Compare<T>> Hash for SplaySet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state)
    }
}

impl<T, C: Compare<T>> Extend<T> for SplaySet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter.into_iter().map(Item))
    }
}

impl<T: Ord> FromIterator<T> for SplaySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SplaySet::from_iter_with_cmp(iter, natural())
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SplaySet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Borrowing in-order iterator over a [`SplaySet`].
pub struct Iter<'a, T> {
    inner: iter::Iter<'a, Item<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|item| &item.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back().map(|item| &item.0)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning in-order iterator over a [`SplaySet`].
pub struct IntoIter<T, C> {
    inner: iter::IntoIter<T, Item<T>, C>,
}

impl<T, C: Compare<T>> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|item| item.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, C: Compare<T>> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|item| item.0)
    }
}

impl<T, C: Compare<T>> ExactSizeIterator for IntoIter<T, C> {}

impl<'a, T, C: Compare<T>> IntoIterator for &'a SplaySet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C: Compare<T>> IntoIterator for SplaySet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> IntoIter<T, C> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}
