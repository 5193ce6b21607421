// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu coordinator: the activation state machine around menu display.
//!
//! ## Overview
//!
//! One coordinator serves one menu attachment. It owns the ordered item
//! sequence, reacts to long-press gestures, tracks whether its menu is up,
//! and runs the focus-surrogate protocol: the focus observer hears exactly
//! one activation before the menu is presented and exactly one deactivation
//! after (or instead of) dismissal, including on forced teardown.
//!
//! ## State
//!
//! Visibility state is a single `active` flag. While active, at most one menu
//! is visible for this coordinator, and re-triggering the gesture is a no-op.
//! The two transitions — press-began → show, hide-event → deactivate — are
//! synchronous and atomic from the caller's perspective.
//!
//! ## Collaborators
//!
//! The platform menu controller is injected per call as a
//! [`MenuService`](crate::types::MenuService) so tests can fake it. Gesture
//! callbacks and the hide event are fed in by host glue; the coordinator
//! never polls.

use alloc::vec::Vec;

use coppice_dispatch::HookId;
use smallvec::SmallVec;

use crate::anchor::{self, AnchorContext};
use crate::types::{
    CopyHandler, FocusObserver, FocusSurrogate, GesturePhase, MenuEntry, MenuItem, MenuService,
};

/// Coordinates one contextual menu attachment over surface handles of type
/// `V`.
pub struct MenuCoordinator<V> {
    /// Ordered action list; read-only between `attach` and `detach`.
    items: Vec<MenuItem>,
    surrogate: Option<FocusSurrogate<V>>,
    copy_handler: Option<CopyHandler>,
    focus_observer: Option<FocusObserver<V>>,
    active: bool,
}

impl<V> core::fmt::Debug for MenuCoordinator<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuCoordinator")
            .field("items", &self.items.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl<V> Default for MenuCoordinator<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MenuCoordinator<V> {
    /// Create a coordinator with nothing attached.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            surrogate: None,
            copy_handler: None,
            focus_observer: None,
            active: false,
        }
    }

    /// Attach an item sequence and the focus surrogate for this mount cycle.
    ///
    /// `copy_handler` and `focus_observer` are optional; absent collaborators
    /// are no-ops, never errors. Attachment happens once per content-mount
    /// cycle; the item sequence is treated as read-only until
    /// [`detach`](Self::detach).
    pub fn attach(
        &mut self,
        items: Vec<MenuItem>,
        surrogate: FocusSurrogate<V>,
        copy_handler: Option<CopyHandler>,
        focus_observer: Option<FocusObserver<V>>,
    ) {
        self.items = items;
        self.surrogate = Some(surrogate);
        self.copy_handler = copy_handler;
        self.focus_observer = focus_observer;
    }

    /// Whether this coordinator's menu is in its activation window.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of currently attached items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are attached.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// React to a long-press gesture callback.
    ///
    /// Only [`GesturePhase::Began`] acts; other phases are forwarded freely
    /// by host glue and ignored here. On `Began`, in order:
    ///
    /// 1. no-op if the platform menu is already visible (idempotent
    ///    re-trigger guard) or nothing is attached;
    /// 2. notify the focus observer with the surrogate (activation);
    /// 3. register the one-shot hide subscription;
    /// 4. mark active;
    /// 5. build one entry per item, hooks assigned in sequence order and
    ///    silently bounded by the hook capacity;
    /// 6. resolve the anchor (see [`crate::anchor`]);
    /// 7. ask the service to present at the anchor's bounds.
    ///
    /// The activation notification always precedes presentation.
    pub fn on_long_press(
        &mut self,
        phase: GesturePhase,
        context: &AnchorContext<'_, V>,
        service: &mut impl MenuService<V>,
    ) {
        if phase != GesturePhase::Began {
            return;
        }
        if service.is_visible() {
            return;
        }
        let Some(surrogate) = self.surrogate.as_ref() else {
            // Nothing attached yet; there is no surrogate to activate and no
            // actions to show.
            return;
        };

        if let Some(observer) = self.focus_observer.as_mut() {
            observer(Some(surrogate));
        }
        service.subscribe_will_hide();
        self.active = true;

        let mut entries: SmallVec<[MenuEntry; 8]> = SmallVec::new();
        for (index, item) in self.items.iter().enumerate() {
            // Indices past the declared hook set have no hook to bind to.
            let Some(hook) = HookId::from_index(index) else {
                break;
            };
            entries.push(MenuEntry {
                title: item.title().into(),
                hook,
            });
        }

        let anchor = anchor::resolve(context);
        service.show(&entries, &anchor.view, anchor.bounds);
    }

    /// React to the platform's "menu will hide" event.
    ///
    /// Notifies the focus observer of deactivation and clears the active
    /// flag. Safe to call when inactive (the subscription is one-shot, but
    /// host glue may forward the platform event unconditionally).
    pub fn on_menu_will_hide(&mut self) {
        self.deactivate();
    }

    /// Run the action at `index`.
    ///
    /// An index at or beyond the current item count can only come from a
    /// stale hook firing after the items changed; that is an internal
    /// invariant violation, asserted in debug builds and ignored in release
    /// builds. Never propagated.
    pub fn invoke(&mut self, index: usize) {
        match self.items.get_mut(index) {
            Some(item) => item.fire(),
            None => {
                debug_assert!(
                    false,
                    "hook index {index} out of bounds for {} attached items",
                    self.items.len()
                );
            }
        }
    }

    /// Run the configured copy handler.
    ///
    /// Returns `true` when a handler was configured and ran; `false` is a
    /// safe no-op and the caller may apply the platform's default copy
    /// behavior instead.
    pub fn copy(&mut self) -> bool {
        match self.copy_handler.as_mut() {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Tear down the attachment at content unmount.
    ///
    /// Drops a still-pending hide subscription, synthesizes the deactivation
    /// notification if the menu was active, and destroys the surrogate and
    /// item sequence. The observer never sees a dangling activation.
    pub fn detach(&mut self, service: &mut impl MenuService<V>) {
        if self.active {
            service.unsubscribe_will_hide();
        }
        self.deactivate();
        self.items.clear();
        self.surrogate = None;
        self.copy_handler = None;
        self.focus_observer = None;
    }

    /// Notify deactivation and clear the flag, exactly once per activation.
    fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(observer) = self.focus_observer.as_mut() {
            observer(None);
        }
    }
}

impl<V> Drop for MenuCoordinator<V> {
    /// Forced teardown while active still balances the activation signal.
    fn drop(&mut self) {
        self.deactivate();
    }
}
