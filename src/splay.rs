/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::node::Arena;

impl<T> Arena<T> {
    /// Rotates `x` up until it has no parent. The caller must store `x` as
    /// the new root of the tree it came from.
    pub(crate) fn splay(&mut self, x: u32) {
        loop {
            let y = match self.parent(x) {
                Some(y) => y,
                None => return,
            };
            if self.parent(y).is_none() {
                // zig
                self.rotate(x);
                return;
            }
            if self.side_of(x) == self.side_of(y) {
                // zig-zig
                self.rotate(y);
                self.rotate(x);
            } else {
                // zig-zag
                self.rotate(x);
                self.rotate(x);
            }
        }
    }
}
