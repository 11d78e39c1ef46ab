/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A block-structured symbol table. Every identifier is keyed by
//! `(scope, name)`, so the symbols of one scope form a contiguous run of the
//! underlying map.

use std::collections::VecDeque;
use std::fmt;

use log::trace;
use num_traits::PrimInt;

use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::map::SplayMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Symbol {
    pub reference_count: u32,
}

pub type SymbolTable<S> = SplayMap<(S, String), Symbol>;

const TITLE: &str = "SYMBOL TABLE";
const COLUMNS: usize = 78;

/// Symbol table plus the stack of open scopes. Scope ids are handed out in
/// increasing order and never reused.
pub struct ScopeManager<S: PrimInt = u32> {
    // `None` once every id of `S` has been handed out.
    next_scope: Option<S>,
    // Innermost scope first.
    active: VecDeque<S>,
    table: SymbolTable<S>,
}

impl<S: PrimInt> Default for ScopeManager<S> {
    fn default() -> Self {
        ScopeManager::new()
    }
}

impl<S: PrimInt> ScopeManager<S> {
    pub fn new() -> Self {
        ScopeManager {
            next_scope: Some(S::zero()),
            active: VecDeque::new(),
            table: SymbolTable::new(),
        }
    }

    /// Opens a new innermost scope and returns its id. Fails once every id
    /// of `S` has been handed out.
    pub fn open_scope(&mut self) -> Result<S> {
        let sid = self.next_scope.ok_or(Error::ScopeIdsExhausted)?;
        self.next_scope = sid.checked_add(&S::one());
        self.active.push_front(sid);
        trace!("opened scope, depth {}", self.active.len());
        Ok(sid)
    }

    /// Closes the innermost scope. Its symbols stay in the table.
    pub fn close_scope(&mut self) -> Option<S> {
        let sid = self.active.pop_front();
        trace!("closed scope, depth {}", self.active.len());
        sid
    }

    pub fn current_scope(&self) -> Option<S> {
        self.active.front().copied()
    }

    pub fn table(&self) -> &SymbolTable<S> {
        &self.table
    }

    /// Declares `name` in the innermost scope. Returns the handle of its
    /// entry and whether it was newly declared.
    pub fn insert(&mut self, name: &str) -> Result<(Handle, bool)> {
        let sid = self.current_scope().ok_or(Error::NoOpenScope)?;
        Ok(self.table.insert((sid, name.to_owned()), Symbol::default()))
    }

    /// Resolves `name` against the open scopes, innermost first. Returns
    /// `end` if no open scope declares it.
    pub fn find(&mut self, name: &str) -> Handle {
        for &sid in &self.active {
            let h = self.table.find(&(sid, name.to_owned()));
            if !h.is_end() {
                return h;
            }
        }
        self.table.end()
    }

    pub fn symbol(&self, h: Handle) -> Option<(&str, &Symbol)> {
        self.table.entry(h).map(|((_, name), sym)| (name.as_str(), sym))
    }

    pub fn symbol_mut(&mut self, h: Handle) -> Option<&mut Symbol> {
        self.table.value_mut(h)
    }

    /// First entry of scope `sid`.
    pub fn scope_begin(&self, sid: S) -> Handle {
        self.table.lower_bound_no_splay(&(sid, String::new()))
    }

    /// One past the last entry of scope `sid`.
    pub fn scope_end(&self, sid: S) -> Handle {
        match sid.checked_add(&S::one()) {
            Some(next) => self.table.lower_bound_no_splay(&(next, String::new())),
            None => self.table.end(),
        }
    }

    /// The symbols declared in scope `sid`, by name.
    pub fn scope(&self, sid: S) -> impl Iterator<Item = (&str, &Symbol)> + '_ {
        self.table
            .range(self.scope_begin(sid), self.scope_end(sid))
            .map(|((_, name), sym)| (name.as_str(), sym))
    }
}

impl<S: PrimInt + fmt::Display> fmt::Display for ScopeManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let equals = COLUMNS - TITLE.len() - 2;
        let half = "=".repeat(equals / 2);
        write!(f, "{} {} {}", half, TITLE, half)?;
        if equals % 2 == 1 {
            f.write_str("=")?;
        }
        writeln!(f)?;
        let mut sid = S::zero();
        while Some(sid) != self.next_scope {
            writeln!(f, "Scope {}:", sid)?;
            for (name, sym) in self.scope(sid) {
                writeln!(f, "\t{} : reference_count<{}>", name, sym.reference_count)?;
            }
            sid = match sid.checked_add(&S::one()) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(())
    }
}
