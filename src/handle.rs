/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::atomic::{AtomicU64, Ordering};

use crate::node::NodeId;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_owner() -> u64 {
    NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
}

/// A position in a container: either one element or the end.
///
/// Handles stay valid while the tree is splayed and while other elements are
/// inserted or erased. Erasing the element a handle points at (or clearing
/// the container) makes it stale; reads through a stale handle return `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Handle {
    pub(crate) owner: u64,
    pub(crate) node: Option<NodeId>,
}

impl Handle {
    pub(crate) fn new(owner: u64, node: Option<NodeId>) -> Handle {
        Handle { owner, node }
    }

    /// Whether this is the one-past-the-last position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}
