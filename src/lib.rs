/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Ordered set and map with unique keys, backed by a splay tree whose nodes
//! live in an index arena.
//!
//! ```
//! use splay_map::SplaySet;
//!
//! let mut set: SplaySet<i32> = [5, 1, 3].into();
//! assert!(!set.insert(3).1);
//! let lo = set.lower_bound(&2);
//! let hi = set.upper_bound(&5);
//! assert_eq!(set.range(lo, hi).copied().collect::<Vec<_>>(), vec![3, 5]);
//! ```

mod error;
mod handle;
pub mod iter;
pub mod map;
mod node;
pub mod set;
mod splay;
mod structure;
pub mod symbol_table;
mod traverse;
mod tree;

#[cfg(test)]
mod tests;

pub use error::{Error, Result, Violation};
pub use handle::Handle;
pub use map::SplayMap;
pub use set::SplaySet;
pub use tree::{Key, SplayTree};
