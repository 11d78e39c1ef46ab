/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::iter::FusedIterator;

use compare::Compare;

use crate::node::{Arena, Link};
use crate::tree::{Key, SplayTree};

/// Borrowing in-order iterator. Never splays.
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    // Next node to yield from each end. Both are `None` once exhausted.
    front: Link,
    back: Link,
    // Upper bound on the remaining elements.
    bound: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, front: Link, back: Link, bound: usize) -> Self {
        Iter {
            arena,
            front,
            back,
            bound,
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let x = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.arena.increment(x);
        }
        self.bound = self.bound.saturating_sub(1);
        Some(self.arena.value(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.front {
            Some(_) => (1, Some(self.bound)),
            None => (0, Some(0)),
        }
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let x = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.arena.decrement(x);
        }
        self.bound = self.bound.saturating_sub(1);
        Some(self.arena.value(x))
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning in-order iterator.
pub struct IntoIter<K, T, C> {
    tree: SplayTree<K, T, C>,
}

impl<K, T, C> IntoIter<K, T, C> {
    pub(crate) fn new(tree: SplayTree<K, T, C>) -> Self {
        IntoIter { tree }
    }
}

impl<K, T, C> Iterator for IntoIter<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K, T, C> DoubleEndedIterator for IntoIter<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
    fn next_back(&mut self) -> Option<T> {
        self.tree.pop_last()
    }
}

impl<K, T, C> ExactSizeIterator for IntoIter<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
}

impl<K, T, C> FusedIterator for IntoIter<K, T, C>
where
    T: Key<K>,
    C: Compare<K>,
{
}
