// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Dispatch: a bounded hook-to-index dispatch table.
//!
//! Legacy menu systems invoke actions through a fixed, closed set of
//! no-argument dispatch hooks (selector-style identifiers declared once at
//! start-up). They cannot be parameterized with an arbitrary number of
//! closures at runtime. This crate provides the indirection layer that lets a
//! variable, runtime-determined action list be driven through that closed set:
//!
//! - [`HookId`] is an opaque, statically enumerable hook identifier with a
//!   stable bidirectional mapping to an integer index in
//!   `[0, HOOK_CAPACITY)`. The full set is declared process-wide in [`HOOKS`];
//!   only the handler a hook forwards to is instance-specific.
//! - [`DispatchTable`] binds the hook set to a single handler closure. When a
//!   hook fires, the table decodes it back to its index and calls
//!   `handler(index)`. The table holds no business logic of its own.
//!
//! Capacity is bounded: [`HookId::from_index`] returns `None` for indices at
//! or beyond [`HOOK_CAPACITY`]. Callers should request only as many hooks as
//! they have actions, and the bound caps how many actions one table can serve.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_dispatch::{DispatchTable, HookId, HOOKS};
//!
//! let mut fired = Vec::new();
//! let mut table = DispatchTable::new(|index| fired.push(index));
//!
//! // Capability queries succeed for the whole declared set, independent of
//! // how many hooks are actually in use.
//! assert!(HOOKS.iter().all(|&h| table.will_respond(h)));
//!
//! // Firing a hook forwards its decoded index to the handler.
//! let hook = HookId::from_index(2).unwrap();
//! table.invoke(hook);
//! assert_eq!(fired, vec![2]);
//! ```
//!
//! This crate is `no_std` and has no dependencies.

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Number of pre-declared hooks available to a [`DispatchTable`].
///
/// This bounds how many distinct actions a single table can dispatch. The
/// value mirrors the size of the legacy hook set declared at process start;
/// it is a compile-time constant, not a tunable.
pub const HOOK_CAPACITY: usize = 20;

/// Opaque identifier for one pre-declared dispatch hook.
///
/// A `HookId` can only be obtained from [`HookId::from_index`] or [`HOOKS`],
/// so every value of this type is a member of the statically declared set.
/// The mapping between hooks and indices is stable for the lifetime of the
/// process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HookId(usize);

/// The statically declared, process-wide hook set.
///
/// Declared once; immutable. Hook `HOOKS[k]` maps to index `k`.
pub const HOOKS: [HookId; HOOK_CAPACITY] = {
    let mut hooks = [HookId(0); HOOK_CAPACITY];
    let mut i = 0;
    while i < HOOK_CAPACITY {
        hooks[i] = HookId(i);
        i += 1;
    }
    hooks
};

impl HookId {
    /// Look up the hook for an action index.
    ///
    /// Returns `None` when `index >= HOOK_CAPACITY`; there is no hook to
    /// assign beyond the declared set, and callers are expected to bound
    /// their action lists accordingly.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < HOOK_CAPACITY {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The action index this hook decodes to.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Binds the declared hook set to a single handler closure.
///
/// One table serves one host; the handler is the only instance-specific
/// state. "Invoke hook `k`" becomes "call the currently registered handler
/// with `k`" — the handler is consulted at invoke time, so it should capture
/// its action source by non-owning reference if that source can be replaced
/// after the table is built.
pub struct DispatchTable<H> {
    handler: H,
}

impl<H> core::fmt::Debug for DispatchTable<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatchTable").finish_non_exhaustive()
    }
}

impl<H: FnMut(usize)> DispatchTable<H> {
    /// Create a table forwarding every declared hook to `handler`.
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Whether this table responds to `hook`.
    ///
    /// True for exactly the statically declared hook set, independent of how
    /// many hooks are currently bound to actions. The legacy layer probes
    /// capability before dispatching; answering for the full set keeps that
    /// probe stable while the action list changes length underneath it.
    /// Membership is enforced by construction ([`HookId`] values outside the
    /// set cannot exist), so every hook answers true.
    pub fn will_respond(&self, hook: HookId) -> bool {
        hook.index() < HOOK_CAPACITY
    }

    /// Fire `hook`: decode it to its index and call the handler with it.
    ///
    /// The table performs no bounds check against any action list; that
    /// responsibility belongs to the handler, which is the only party that
    /// knows the current list length.
    pub fn invoke(&mut self, hook: HookId) {
        (self.handler)(hook.index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn hook_index_mapping_is_bidirectional() {
        for (k, hook) in HOOKS.iter().enumerate() {
            assert_eq!(hook.index(), k);
            assert_eq!(HookId::from_index(k), Some(*hook));
        }
    }

    #[test]
    fn from_index_fails_beyond_capacity() {
        assert!(HookId::from_index(HOOK_CAPACITY).is_none());
        assert!(HookId::from_index(HOOK_CAPACITY + 1).is_none());
        assert!(HookId::from_index(usize::MAX).is_none());
    }

    #[test]
    fn from_index_succeeds_up_to_capacity() {
        for k in 0..HOOK_CAPACITY {
            assert!(HookId::from_index(k).is_some(), "index {k} should map");
        }
    }

    #[test]
    fn will_respond_covers_full_declared_set() {
        // Handler bound to a zero-length action list; capability must still
        // cover the whole set.
        let table = DispatchTable::new(|_| {});
        for hook in HOOKS {
            assert!(table.will_respond(hook));
        }
    }

    #[test]
    fn invoke_forwards_decoded_index_exactly_once() {
        let mut fired: Vec<usize> = Vec::new();
        let mut table = DispatchTable::new(|index| fired.push(index));

        table.invoke(HOOKS[0]);
        table.invoke(HOOKS[7]);
        table.invoke(HOOKS[HOOK_CAPACITY - 1]);

        assert_eq!(fired, vec![0, 7, HOOK_CAPACITY - 1]);
    }

    #[test]
    fn invoke_consults_handler_state_at_fire_time() {
        use core::cell::{Cell, RefCell};

        // The handler sees whatever its captured state holds when the hook
        // fires, not when the table was built.
        let len = Cell::new(0_usize);
        let seen: RefCell<Vec<(usize, usize)>> = RefCell::new(Vec::new());

        let mut table = DispatchTable::new(|index| seen.borrow_mut().push((index, len.get())));
        table.invoke(HOOKS[1]);
        len.set(3);
        table.invoke(HOOKS[1]);

        assert_eq!(seen.into_inner(), vec![(1, 0), (1, 3)]);
    }
}
