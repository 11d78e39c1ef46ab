/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use compare::Compare;

use crate::node::{Arena, Link, LEFT, RIGHT};
use crate::tree::Key;

impl<T> Arena<T> {
    /// Concatenates two detached trees. Every key in `lhs` must compare less
    /// than every key in `rhs`. Returns the root of the result.
    pub(crate) fn join(&mut self, lhs: Link, rhs: Link) -> Link {
        let l = match lhs {
            Some(l) => l,
            None => return rhs,
        };
        let m = self.maximum(l);
        self.splay(m);
        // The maximum has no right child, before or after splaying.
        self.attach(m, RIGHT, rhs);
        Some(m)
    }

    /// Splits a detached tree into the keys less than `key` and the keys not
    /// less than `key`.
    pub(crate) fn split<K, C>(&mut self, root: Link, key: &K, cmp: &C) -> (Link, Link)
    where
        T: Key<K>,
        C: Compare<K>,
    {
        let r = match self.search(root, key, cmp) {
            Some(r) => r,
            None => return (None, None),
        };
        if cmp.compares_lt(self.value(r).key(), key) {
            let right = self.detach(r, RIGHT);
            (Some(r), right)
        } else {
            let left = self.detach(r, LEFT);
            (left, Some(r))
        }
    }
}
