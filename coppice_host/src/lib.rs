// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Host: the content host adapter.
//!
//! ## Overview
//!
//! [`ContentHost`] embeds arbitrary declarative content inside a
//! focus-capable interactive surface and bridges the legacy dispatch layer to
//! the coordinator:
//!
//! - **Capability queries**: the legacy layer probes "will you respond to X?"
//!   before dispatching. Native capabilities (become focus target, copy) are
//!   answered locally from [`NativeCapability`]; hook queries are forwarded
//!   to the embedded [`DispatchTable`], never handled here.
//! - **Dispatch**: [`ContentHost::perform`] fires a hook through the table,
//!   whose handler holds a *weak* reference to the coordinator. The action
//!   list consulted is always the one currently attached, never a stale copy,
//!   and the table keeps nothing alive.
//! - **Copy**: [`ContentHost::copy`] runs the coordinator's configured copy
//!   handler; with none configured it is a safe no-op and reports `false` so
//!   the caller can fall back to the platform default.
//! - **Preferred size**: [`ContentHost::relayout`] re-queries the platform's
//!   size-fitting collaborator on layout changes and republishes only when
//!   the result actually changed, so size publication cannot feed back into
//!   another layout pass.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use coppice_dispatch::HOOKS;
//! use coppice_host::{CapabilityQuery, ContentHost, Measure, NativeCapability};
//! use coppice_menu::coordinator::MenuCoordinator;
//! use coppice_menu::types::{FocusSurrogate, MenuItem};
//! use kurbo::Size;
//!
//! let coordinator = Rc::new(RefCell::new(MenuCoordinator::<u32>::new()));
//! let hit = Rc::new(RefCell::new(0));
//! let action = {
//!     let hit = Rc::clone(&hit);
//!     move || *hit.borrow_mut() += 1
//! };
//! coordinator.borrow_mut().attach(
//!     vec![MenuItem::new("Reply", action)],
//!     FocusSurrogate(1),
//!     None,
//!     None,
//! );
//!
//! let mut host = ContentHost::new(Rc::clone(&coordinator));
//! assert!(host.can_become_focus_target());
//! assert!(host.will_respond(CapabilityQuery::Hook(HOOKS[0])));
//! assert!(host.will_respond(CapabilityQuery::Native(NativeCapability::COPY)));
//!
//! // Selecting the menu entry fires its hook; the table decodes it back to
//! // index 0 and the coordinator runs that item's action.
//! host.perform(HOOKS[0]);
//! assert_eq!(*hit.borrow(), 1);
//!
//! // Preferred size republishes only on change.
//! struct Fixed;
//! impl Measure for Fixed {
//!     fn size_that_fits(&self, proposal: Size) -> Size {
//!         Size::new(proposal.width, 41.5)
//!     }
//! }
//! assert_eq!(host.relayout(320.0, &Fixed), Some(Size::new(320.0, 42.5)));
//! assert_eq!(host.relayout(320.0, &Fixed), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use coppice_dispatch::{DispatchTable, HookId};
use coppice_menu::coordinator::MenuCoordinator;
use kurbo::Size;

/// Height bound for the size-fitting query: content may grow arbitrarily
/// tall, only the width is constrained.
const MAX_FIT_HEIGHT: f64 = f64::MAX;

/// Extra height added to every fitted size so fractional text metrics never
/// clip the last line.
const HEIGHT_PAD: f64 = 1.0;

bitflags::bitflags! {
    /// Capabilities the host answers for natively, without forwarding.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NativeCapability: u8 {
        /// The host can take transient input focus for the menu.
        const FOCUS_TARGET = 0b0000_0001;
        /// The host exposes the dedicated "copy" action.
        const COPY = 0b0000_0010;
    }
}

/// A capability probe from the legacy dispatch layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapabilityQuery {
    /// A probe for one of the host's own capabilities.
    Native(NativeCapability),
    /// A probe for a menu dispatch hook. Answered by the dispatch table.
    Hook(HookId),
}

/// The platform layout system's size-fitting query.
///
/// Given a proposal (a width constraint and a height bound), report the size
/// the content would occupy.
pub trait Measure {
    /// Size the content fits within `proposal`.
    fn size_that_fits(&self, proposal: Size) -> Size;
}

/// Hosts declarative content inside a focus-capable surface and routes the
/// legacy layer's queries and dispatches.
///
/// Holds one [`DispatchTable`] wired to the shared coordinator and the last
/// preferred size it published. `V` is the host view handle type used by the
/// coordinator.
pub struct ContentHost<V> {
    coordinator: Rc<RefCell<MenuCoordinator<V>>>,
    table: DispatchTable<Box<dyn FnMut(usize)>>,
    last_size: Option<Size>,
}

impl<V> core::fmt::Debug for ContentHost<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentHost")
            .field("last_size", &self.last_size)
            .finish_non_exhaustive()
    }
}

impl<V: 'static> ContentHost<V> {
    /// Create a host around a shared coordinator.
    ///
    /// The embedded dispatch table's handler downgrades to a weak reference:
    /// when a hook fires it upgrades and forwards the decoded index to
    /// whatever item sequence is attached at that moment. The table never
    /// extends the coordinator's lifetime and never caches its items.
    pub fn new(coordinator: Rc<RefCell<MenuCoordinator<V>>>) -> Self {
        let weak = Rc::downgrade(&coordinator);
        let handler: Box<dyn FnMut(usize)> = Box::new(move |index| {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.borrow_mut().invoke(index);
            }
        });
        Self {
            coordinator,
            table: DispatchTable::new(handler),
            last_size: None,
        }
    }

    /// The shared coordinator this host dispatches into.
    pub fn coordinator(&self) -> &Rc<RefCell<MenuCoordinator<V>>> {
        &self.coordinator
    }

    /// Whether the host can take transient input focus. Always true; the
    /// menu and copy actions route through whichever surface holds focus.
    pub fn can_become_focus_target(&self) -> bool {
        true
    }

    /// Answer a capability probe.
    ///
    /// Native probes are answered from the host's own capability set; hook
    /// probes are forwarded to the dispatch table so the answer stays true
    /// for the full declared hook set regardless of how many items are
    /// attached.
    pub fn will_respond(&self, query: CapabilityQuery) -> bool {
        match query {
            CapabilityQuery::Native(capability) => NativeCapability::all().contains(capability),
            CapabilityQuery::Hook(hook) => self.table.will_respond(hook),
        }
    }

    /// Fire a menu hook through the dispatch table.
    pub fn perform(&mut self, hook: HookId) {
        self.table.invoke(hook);
    }

    /// Run the dedicated copy action.
    ///
    /// Returns `true` when the coordinator had a copy handler configured.
    /// `false` is a safe no-op; the caller may apply the platform's default
    /// copy behavior instead.
    pub fn copy(&mut self) -> bool {
        self.coordinator.borrow_mut().copy()
    }

    /// Recompute the preferred size after a layout change.
    ///
    /// Queries `measure` against `width` with an unbounded height, pads the
    /// height by one unit so fractional metrics never clip, and returns
    /// `Some(size)` only when the result differs from the last published
    /// size. `None` means "do not republish" — republishing an unchanged
    /// size would invalidate layout and trigger this query again.
    pub fn relayout(&mut self, width: f64, measure: &impl Measure) -> Option<Size> {
        let fitted = measure.size_that_fits(Size::new(width, MAX_FIT_HEIGHT));
        let padded = Size::new(fitted.width, fitted.height + HEIGHT_PAD);
        if self.last_size == Some(padded) {
            return None;
        }
        self.last_size = Some(padded);
        Some(padded)
    }

    /// The last size published via [`relayout`](Self::relayout), if any.
    pub fn last_size(&self) -> Option<Size> {
        self.last_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use coppice_dispatch::{HOOK_CAPACITY, HOOKS};
    use coppice_menu::types::{FocusSurrogate, MenuItem};

    fn shared() -> Rc<RefCell<MenuCoordinator<u32>>> {
        Rc::new(RefCell::new(MenuCoordinator::new()))
    }

    fn counting_items(n: usize, fired: &Rc<RefCell<Vec<usize>>>) -> Vec<MenuItem> {
        (0..n)
            .map(|i| {
                let fired = Rc::clone(fired);
                MenuItem::new(alloc::format!("item {i}"), move || {
                    fired.borrow_mut().push(i);
                })
            })
            .collect()
    }

    #[test]
    fn focus_target_capability_is_always_available() {
        let host = ContentHost::new(shared());
        assert!(host.can_become_focus_target());
        assert!(host.will_respond(CapabilityQuery::Native(NativeCapability::FOCUS_TARGET)));
    }

    #[test]
    fn hook_probes_are_forwarded_to_the_table() {
        // Zero items attached; the declared hook set still answers true.
        let host = ContentHost::new(shared());
        for hook in HOOKS {
            assert!(host.will_respond(CapabilityQuery::Hook(hook)));
        }
    }

    #[test]
    fn perform_fires_the_indexed_action_exactly_once() {
        let coordinator = shared();
        let fired: Rc<RefCell<Vec<usize>>> = Rc::default();
        coordinator.borrow_mut().attach(
            counting_items(3, &fired),
            FocusSurrogate(1),
            None,
            None,
        );
        let mut host = ContentHost::new(coordinator);

        host.perform(HOOKS[2]);
        host.perform(HOOKS[0]);

        assert_eq!(*fired.borrow(), vec![2, 0]);
    }

    #[test]
    fn perform_sees_the_latest_attached_items() {
        let coordinator = shared();
        let fired: Rc<RefCell<Vec<usize>>> = Rc::default();
        coordinator.borrow_mut().attach(
            counting_items(1, &fired),
            FocusSurrogate(1),
            None,
            None,
        );
        let mut host = ContentHost::new(Rc::clone(&coordinator));

        host.perform(HOOKS[0]);

        // Re-attach with a replacement action; the table's handler must
        // consult the new sequence, not a copy captured at build time.
        let swapped = Rc::new(RefCell::new(false));
        let action = {
            let swapped = Rc::clone(&swapped);
            move || *swapped.borrow_mut() = true
        };
        coordinator.borrow_mut().attach(
            vec![MenuItem::new("replacement", action)],
            FocusSurrogate(1),
            None,
            None,
        );
        host.perform(HOOKS[0]);

        assert_eq!(*fired.borrow(), vec![0]);
        assert!(*swapped.borrow());
    }

    #[test]
    fn host_table_does_not_extend_coordinator_lifetime() {
        let coordinator = shared();
        let host = ContentHost::new(Rc::clone(&coordinator));
        // One strong count from the test, one from the host itself; the
        // table handler only holds a weak reference.
        assert_eq!(Rc::strong_count(&coordinator), 2);
        assert_eq!(Rc::weak_count(&coordinator), 1);
        drop(host);
        assert_eq!(Rc::strong_count(&coordinator), 1);
        assert_eq!(Rc::weak_count(&coordinator), 0);
    }

    #[test]
    fn copy_forwards_to_the_configured_handler() {
        let coordinator = shared();
        let copied = Rc::new(RefCell::new(0_u32));
        let handler = {
            let copied = Rc::clone(&copied);
            Box::new(move || *copied.borrow_mut() += 1)
        };
        coordinator
            .borrow_mut()
            .attach(Vec::new(), FocusSurrogate(1), Some(handler), None);
        let mut host = ContentHost::new(coordinator);

        assert!(host.copy());
        assert_eq!(*copied.borrow(), 1);
    }

    #[test]
    fn copy_without_handler_is_a_safe_no_op() {
        let coordinator = shared();
        coordinator
            .borrow_mut()
            .attach(Vec::new(), FocusSurrogate(1), None, None);
        let mut host = ContentHost::new(coordinator);
        assert!(!host.copy());
    }

    struct FixedHeight(f64);

    impl Measure for FixedHeight {
        fn size_that_fits(&self, proposal: Size) -> Size {
            // Width is consumed fully; height is content-determined and must
            // not be limited by the proposal.
            assert!(proposal.height >= self.0, "height bound must be maximal");
            Size::new(proposal.width, self.0)
        }
    }

    #[test]
    fn relayout_pads_height_by_one_unit() {
        let mut host = ContentHost::new(shared());
        let size = host.relayout(320.0, &FixedHeight(41.5));
        assert_eq!(size, Some(Size::new(320.0, 42.5)));
        assert_eq!(host.last_size(), Some(Size::new(320.0, 42.5)));
    }

    #[test]
    fn relayout_republishes_only_on_change() {
        let mut host = ContentHost::new(shared());

        assert!(host.relayout(320.0, &FixedHeight(40.0)).is_some());
        // Identical query: no republication, no invalidation feedback loop.
        assert!(host.relayout(320.0, &FixedHeight(40.0)).is_none());
        // Width change produces a new size.
        assert_eq!(
            host.relayout(280.0, &FixedHeight(40.0)),
            Some(Size::new(280.0, 41.0))
        );
        // Content growth at the same width also republishes.
        assert_eq!(
            host.relayout(280.0, &FixedHeight(60.0)),
            Some(Size::new(280.0, 61.0))
        );
    }

    #[test]
    fn hook_capacity_bounds_the_dispatchable_range() {
        // The last declared hook dispatches; there is nothing beyond it to
        // probe or fire.
        let coordinator = shared();
        let fired: Rc<RefCell<Vec<usize>>> = Rc::default();
        coordinator.borrow_mut().attach(
            counting_items(HOOK_CAPACITY, &fired),
            FocusSurrogate(1),
            None,
            None,
        );
        let mut host = ContentHost::new(coordinator);

        host.perform(HOOKS[HOOK_CAPACITY - 1]);
        assert_eq!(*fired.borrow(), vec![HOOK_CAPACITY - 1]);
        assert!(coppice_dispatch::HookId::from_index(HOOK_CAPACITY).is_none());
    }
}
