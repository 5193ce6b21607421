// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Menu: long-press edit-menu coordination.
//!
//! ## Overview
//!
//! This crate owns the state machine around showing a contextual edit menu
//! over a piece of content: when the menu appears, which surface it anchors
//! to, and how menu visibility correlates with a transient focus state that
//! must be balanced exactly once.
//!
//! - [`coordinator::MenuCoordinator`] holds the attached
//!   [`types::MenuItem`] sequence, reacts to long-press gestures, and runs
//!   the focus-surrogate activation protocol.
//! - [`anchor`] resolves which view rectangle the menu is presented at,
//!   robust to the wrapper subviews a declarative renderer injects.
//! - [`types::MenuService`] models the platform menu controller as an
//!   explicit injected collaborator (visibility query, show, hide-event
//!   subscription) so it can be faked in tests.
//!
//! The coordinator is event-fed: host glue forwards gesture callbacks and the
//! platform's "menu will hide" event; nothing here polls, blocks, or
//! suspends. All operations are UI-thread-confined.
//!
//! ## Ordering guarantees
//!
//! The focus observer hears activation before the menu is presented, and
//! deactivation after (or instead of) dismissal — exactly once per
//! activation, including on forced teardown.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_menu::anchor::{Anchor, AnchorContext};
//! use coppice_menu::coordinator::MenuCoordinator;
//! use coppice_menu::types::{FocusSurrogate, GesturePhase, MenuEntry, MenuItem, MenuService};
//! use kurbo::Rect;
//!
//! // A fake platform menu controller.
//! struct Menu {
//!     visible: bool,
//!     shown: usize,
//! }
//! impl MenuService<&'static str> for Menu {
//!     fn is_visible(&self) -> bool {
//!         self.visible
//!     }
//!     fn show(&mut self, entries: &[MenuEntry], _anchor: &&'static str, _bounds: Rect) {
//!         self.visible = true;
//!         self.shown = entries.len();
//!     }
//!     fn subscribe_will_hide(&mut self) {}
//!     fn unsubscribe_will_hide(&mut self) {}
//! }
//!
//! let mut coordinator = MenuCoordinator::new();
//! coordinator.attach(
//!     vec![
//!         MenuItem::new("Reply", || {}),
//!         MenuItem::new("Forward", || {}),
//!     ],
//!     FocusSurrogate("bubble"),
//!     None,
//!     None,
//! );
//!
//! let surface = Anchor {
//!     view: "bubble",
//!     bounds: Rect::new(0.0, 0.0, 240.0, 48.0),
//! };
//! let mut menu = Menu {
//!     visible: false,
//!     shown: 0,
//! };
//! coordinator.on_long_press(
//!     GesturePhase::Began,
//!     &AnchorContext {
//!         surface: &surface,
//!         subviews: &[],
//!         content_surface: None,
//!     },
//!     &mut menu,
//! );
//! assert!(coordinator.is_active());
//! assert_eq!(menu.shown, 2);
//!
//! // The platform hide event balances the activation.
//! coordinator.on_menu_will_hide();
//! assert!(!coordinator.is_active());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod anchor;
pub mod coordinator;
pub mod types;
