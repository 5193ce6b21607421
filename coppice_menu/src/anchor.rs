// Copyright 2025 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor resolution: choosing the view rectangle the menu is presented at.
//!
//! Declarative content hosts inject wrapper subviews whose count and identity
//! are implementation details of the rendering layer, so "where do we anchor
//! the menu" cannot assume a fixed subview shape. Resolution here is total
//! and must be robust to 0, 1, or 2+ wrappers.
//!
//! The preferred path is an **explicit content surface**: the rendering
//! collaborator tells us which view is the interactive content. When it
//! cannot, subviews tagged [`Subview::content`] take over, and the
//! second-to-last tagged one is chosen when two or more exist — the trailing
//! tagged subview is a transient overlay inserted above the content. With no
//! usable subview at all, the gesture surface itself anchors the menu;
//! resolution never fails.

use kurbo::Rect;

/// A candidate anchor: a view handle plus its bounds rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor<V> {
    /// The view to anchor within.
    pub view: V,
    /// The view's bounds, in its own coordinate space.
    pub bounds: Rect,
}

/// One subview of the gesture surface, as reported by the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Subview<V> {
    /// The subview's anchor data.
    pub anchor: Anchor<V>,
    /// Whether the rendering layer identifies this subview as interactive
    /// content (as opposed to a transient overlay wrapper).
    pub content: bool,
}

/// Everything anchor resolution may consult for one long-press.
#[derive(Clone, Debug)]
pub struct AnchorContext<'a, V> {
    /// The surface the long-press was recognized on. Final fallback.
    pub surface: &'a Anchor<V>,
    /// The surface's current subviews, in z-order.
    pub subviews: &'a [Subview<V>],
    /// The interactive content surface, when the rendering collaborator can
    /// name it directly. Always wins when present.
    pub content_surface: Option<&'a Anchor<V>>,
}

/// Resolve the anchor for a menu presentation.
///
/// Order: explicit content surface; else the second-to-last content-tagged
/// subview when two or more are tagged; else the first subview; else the
/// gesture surface.
pub fn resolve<'a, V>(context: &AnchorContext<'a, V>) -> &'a Anchor<V> {
    if let Some(content) = context.content_surface {
        return content;
    }

    let mut tagged = context.subviews.iter().filter(|s| s.content);
    let tagged_count = tagged.clone().count();
    if tagged_count >= 2 {
        // Skip the trailing overlay; the second-to-last tagged subview is
        // the real content.
        if let Some(subview) = tagged.nth(tagged_count - 2) {
            return &subview.anchor;
        }
    }

    match context.subviews.first() {
        Some(subview) => &subview.anchor,
        None => context.surface,
    }
}
