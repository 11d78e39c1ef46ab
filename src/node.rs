/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Node storage. Every node lives in an [`Arena`] slot and links to its
//! parent and children by slot index, so rotations only rewrite indices.

use crate::error::{fail, Violation};

pub(crate) type Link = Option<u32>;

// Child sides, used to index `Node::c`.
pub(crate) const LEFT: bool = false;
pub(crate) const RIGHT: bool = true;

/// Slot index plus the generation the slot had when the node was stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) parent: Link,
    pub(crate) c: [Link; 2],
    pub(crate) value: T,
}

impl<T> Node<T> {
    fn new(value: T) -> Node<T> {
        Node {
            parent: None,
            c: [None, None],
            value,
        }
    }
}

#[derive(Clone)]
enum Slot<T> {
    Occupied { generation: u32, node: Node<T> },
    Vacant { generation: u32, next_free: Link },
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    // Head of the singly linked list of vacant slots.
    free: Link,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Arena<T> {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` in a fresh, unlinked node.
    pub(crate) fn alloc(&mut self, value: T) -> u32 {
        self.len += 1;
        if let Some(index) = self.free {
            let slot = &mut self.slots[index as usize];
            let generation = match *slot {
                Slot::Vacant {
                    generation,
                    next_free,
                } => {
                    self.free = next_free;
                    generation
                }
                Slot::Occupied { .. } => unreachable!("free list points at a live node"),
            };
            *slot = Slot::Occupied {
                generation,
                node: Node::new(value),
            };
            return index;
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            node: Node::new(value),
        });
        index
    }

    /// Releases the slot of an unlinked node and returns its value. The slot
    /// generation is bumped, which makes every outstanding id of the node
    /// stale.
    pub(crate) fn free(&mut self, index: u32) -> T {
        let slot = &mut self.slots[index as usize];
        let generation = match *slot {
            Slot::Occupied { generation, .. } => generation.wrapping_add(1),
            Slot::Vacant { .. } => unreachable!("double free of slot {}", index),
        };
        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                generation,
                next_free: self.free,
            },
        );
        self.free = Some(index);
        self.len -= 1;
        match old {
            Slot::Occupied { node, .. } => {
                debug_assert!(node.parent.is_none() && node.c == [None, None]);
                node.value
            }
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    /// Drops every node without recursion. Slots stay allocated with bumped
    /// generations so that ids issued before the call never resolve again.
    pub(crate) fn free_all(&mut self) {
        let mut free = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            let generation = match *slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => generation,
            };
            *slot = Slot::Vacant {
                generation,
                next_free: free,
            };
            free = Some(index as u32);
        }
        self.free = free;
        self.len = 0;
    }

    /// Frees a detached subtree without recursion. Returns the number of
    /// nodes freed.
    pub(crate) fn free_subtree(&mut self, root: u32) -> usize {
        let mut stack = vec![root];
        let mut freed = 0;
        while let Some(x) = stack.pop() {
            for side in [LEFT, RIGHT] {
                if let Some(c) = self.detach(x, side) {
                    stack.push(c);
                }
            }
            self.free(x);
            freed += 1;
        }
        freed
    }

    pub(crate) fn node(&self, index: u32) -> &Node<T> {
        match &self.slots[index as usize] {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {}", index),
        }
    }

    pub(crate) fn node_mut(&mut self, index: u32) -> &mut Node<T> {
        match &mut self.slots[index as usize] {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {}", index),
        }
    }

    pub(crate) fn id(&self, index: u32) -> NodeId {
        match self.slots[index as usize] {
            Slot::Occupied { generation, .. } => NodeId { index, generation },
            Slot::Vacant { .. } => unreachable!("id of vacant slot {}", index),
        }
    }

    /// Maps an id back to its slot if the node it names is still alive.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<u32> {
        match self.slots.get(id.index as usize)? {
            Slot::Occupied { generation, .. } if *generation == id.generation => {
                Some(id.index)
            }
            _ => None,
        }
    }

    pub(crate) fn parent(&self, x: u32) -> Link {
        self.node(x).parent
    }

    pub(crate) fn child(&self, x: u32, side: bool) -> Link {
        self.node(x).c[side as usize]
    }

    pub(crate) fn value(&self, x: u32) -> &T {
        &self.node(x).value
    }

    pub(crate) fn value_mut(&mut self, x: u32) -> &mut T {
        &mut self.node_mut(x).value
    }

    /// Which child slot of its parent `x` occupies. `x` must have a parent.
    pub(crate) fn side_of(&self, x: u32) -> bool {
        let p = self.parent(x).unwrap_or_else(|| fail(Violation::RootRotation));
        self.child(p, RIGHT) == Some(x)
    }

    /// Links the unparented node `child` into the empty slot `side` of `p`.
    pub(crate) fn attach(&mut self, p: u32, side: bool, child: Link) {
        let child = match child {
            Some(child) => child,
            None => return,
        };
        if self.child(p, side).is_some() {
            fail(Violation::SlotOccupied);
        }
        if self.parent(child).is_some() {
            fail(Violation::ChildHasParent);
        }
        self.node_mut(p).c[side as usize] = Some(child);
        self.node_mut(child).parent = Some(p);
    }

    /// Unlinks and returns the child on `side` of `p`, clearing both ends of
    /// the link.
    pub(crate) fn detach(&mut self, p: u32, side: bool) -> Link {
        let child = self.node_mut(p).c[side as usize].take()?;
        self.node_mut(child).parent = None;
        Some(child)
    }

    /// Promotes `x` into its parent's position. The child of `x` facing the
    /// parent moves under the parent, and the grandparent (if any) is
    /// repointed at `x`.
    pub(crate) fn rotate(&mut self, x: u32) {
        let p = match self.parent(x) {
            Some(p) => p,
            None => fail(Violation::RootRotation),
        };
        let side_x = self.side_of(x);
        let g = self.parent(p);
        let side_p = g.map(|_| self.side_of(p));

        let w = self.node_mut(x).c[!side_x as usize].take();
        self.node_mut(p).c[side_x as usize] = w;
        if let Some(w) = w {
            self.node_mut(w).parent = Some(p);
        }
        self.node_mut(x).c[!side_x as usize] = Some(p);
        self.node_mut(p).parent = Some(x);
        self.node_mut(x).parent = g;
        if let (Some(g), Some(side_p)) = (g, side_p) {
            self.node_mut(g).c[side_p as usize] = Some(x);
        }
    }
}
