/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the containers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A checked lookup found no element with the requested key.
    #[error("key not found")]
    KeyNotFound,
    /// A symbol was declared while no scope was open.
    #[error("no scope is open")]
    NoOpenScope,
    /// Every scope id of the id type has been handed out.
    #[error("scope ids exhausted")]
    ScopeIdsExhausted,
    /// The caller broke a precondition of the tree.
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] Violation),
}

/// Precondition violations. These are bugs in the caller, not data
/// conditions, so the panicking entry points abort on them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("attaching into an occupied child slot")]
    SlotOccupied,
    #[error("attaching a node that already has a parent")]
    ChildHasParent,
    #[error("rotating the root")]
    RootRotation,
    #[error("handle belongs to a different container")]
    ForeignHandle,
    #[error("handle refers to an erased element")]
    StaleHandle,
    #[error("erasing the end handle")]
    EndHandle,
}

#[cold]
#[track_caller]
pub(crate) fn fail(v: Violation) -> ! {
    log::debug!("splay tree precondition broken: {}", v);
    panic!("{}", Error::InvariantViolation(v))
}
