/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::cmp::Ordering;

use compare::Compare;

use crate::node::{Arena, Link, LEFT, RIGHT};
use crate::tree::Key;

impl<T> Arena<T> {
    /// Plain binary search descent. Returns the node holding `key`, or the
    /// node that would become its parent. `None` only for an empty tree.
    pub(crate) fn search_no_splay<K, C>(&self, root: Link, key: &K, cmp: &C) -> Link
    where
        T: Key<K>,
        C: Compare<K>,
    {
        let mut cur = root?;
        loop {
            let side = match cmp.compare(key, self.value(cur).key()) {
                Ordering::Equal => return Some(cur),
                Ordering::Less => LEFT,
                Ordering::Greater => RIGHT,
            };
            match self.child(cur, side) {
                Some(next) => cur = next,
                None => return Some(cur),
            }
        }
    }

    /// Like [`Arena::search_no_splay`], but the last visited node is splayed
    /// to the root even when the key is absent.
    pub(crate) fn search<K, C>(&mut self, root: Link, key: &K, cmp: &C) -> Link
    where
        T: Key<K>,
        C: Compare<K>,
    {
        let x = self.search_no_splay(root, key, cmp)?;
        self.splay(x);
        Some(x)
    }

    /// First node whose key is not less than `key` (`strict == false`), or
    /// greater than `key` (`strict == true`).
    pub(crate) fn bound_no_splay<K, C>(&self, root: Link, key: &K, cmp: &C, strict: bool) -> Link
    where
        T: Key<K>,
        C: Compare<K>,
    {
        // The last node on the search path is the in-order neighbour of `key`
        // on one side or the other, so at most one step is needed.
        let x = self.search_no_splay(root, key, cmp)?;
        let past = match cmp.compare(self.value(x).key(), key) {
            Ordering::Less => true,
            Ordering::Equal => strict,
            Ordering::Greater => false,
        };
        if past {
            self.increment(x)
        } else {
            Some(x)
        }
    }

    pub(crate) fn minimum(&self, mut x: u32) -> u32 {
        while let Some(l) = self.child(x, LEFT) {
            x = l;
        }
        x
    }

    pub(crate) fn maximum(&self, mut x: u32) -> u32 {
        while let Some(r) = self.child(x, RIGHT) {
            x = r;
        }
        x
    }

    fn step(&self, mut x: u32, side: bool) -> Link {
        if let Some(c) = self.child(x, side) {
            let mut x = c;
            while let Some(c) = self.child(x, !side) {
                x = c;
            }
            return Some(x);
        }
        loop {
            let p = self.parent(x)?;
            if self.child(p, !side) == Some(x) {
                return Some(p);
            }
            x = p;
        }
    }

    /// In-order successor, or `None` past the maximum.
    pub(crate) fn increment(&self, x: u32) -> Link {
        self.step(x, RIGHT)
    }

    /// In-order predecessor, or `None` before the minimum.
    pub(crate) fn decrement(&self, x: u32) -> Link {
        self.step(x, LEFT)
    }
}
