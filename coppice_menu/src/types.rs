// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by the coordinator: items, entries, gesture phases,
//! and the injected platform collaborators.

use alloc::boxed::Box;
use alloc::string::String;

use coppice_dispatch::HookId;
use kurbo::Rect;

/// One caller-supplied menu item: a title and an opaque action.
///
/// Items are immutable once constructed. The coordinator holds an ordered
/// sequence of them for the lifetime of one attachment and never rewrites a
/// title or swaps an action.
pub struct MenuItem {
    title: String,
    action: Box<dyn FnMut()>,
}

impl MenuItem {
    /// Create an item from a title and an action closure.
    pub fn new(title: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        Self {
            title: title.into(),
            action: Box::new(action),
        }
    }

    /// The item's display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Run the item's action.
    pub(crate) fn fire(&mut self) {
        (self.action)();
    }
}

impl core::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuItem")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// One platform menu entry: a title paired with the hook that fires it.
///
/// Built by the coordinator, one per attached item in sequence order, and
/// handed to the [`MenuService`] at show time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// Display title, cloned from the item.
    pub title: String,
    /// Hook the legacy layer fires when this entry is selected.
    pub hook: HookId,
}

/// Phase of a long-press gesture reported by the platform gesture system.
///
/// Only [`GesturePhase::Began`] triggers coordinator behavior; the remaining
/// phases exist so host glue can forward the platform's full callback stream
/// without filtering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The press crossed the long-press threshold.
    Began,
    /// The touch moved while still pressed.
    Changed,
    /// The touch lifted.
    Ended,
    /// The gesture was cancelled by the system.
    Cancelled,
}

/// The interactive surface that holds transient input focus while the menu
/// is up.
///
/// Exactly one exists per attachment: created at
/// [`attach`](crate::coordinator::MenuCoordinator::attach), destroyed at
/// [`detach`](crate::coordinator::MenuCoordinator::detach) or drop. The focus
/// observer receives a reference to it on activation and `None` on
/// deactivation, decoupling "menu is about to show" from any
/// platform-specific first-responder mechanism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusSurrogate<V>(pub V);

/// Observer notified when the focus surrogate activates (`Some`) or
/// deactivates (`None`).
pub type FocusObserver<V> = Box<dyn FnMut(Option<&FocusSurrogate<V>>)>;

/// Handler invoked for the dedicated "copy" action.
pub type CopyHandler = Box<dyn FnMut()>;

/// The platform menu controller, modeled as an explicit injected collaborator
/// so it can be faked in tests.
///
/// `V` is the host's view handle type. Implementations wrap whatever global
/// menu singleton the platform provides.
pub trait MenuService<V> {
    /// Whether a menu is currently on screen.
    fn is_visible(&self) -> bool;

    /// Present a menu with `entries`, anchored at `bounds` within `anchor`.
    fn show(&mut self, entries: &[MenuEntry], anchor: &V, bounds: Rect);

    /// Register for the platform's "menu will hide" event.
    ///
    /// The subscription is one-shot: it expires when the event fires and the
    /// coordinator re-subscribes on the next activation. Host glue delivers
    /// the event by calling
    /// [`MenuCoordinator::on_menu_will_hide`](crate::coordinator::MenuCoordinator::on_menu_will_hide).
    fn subscribe_will_hide(&mut self);

    /// Drop a still-pending hide subscription (teardown before the event
    /// fired).
    fn unsubscribe_will_hide(&mut self);
}
