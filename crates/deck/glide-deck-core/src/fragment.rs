//! Fragment engine: sub-slide reveal steps.
//!
//! Each animation kind maps to a fixed (hidden, shown) keyframe pair;
//! `show` plays hidden -> shown, `hide` plays the reverse. The batch
//! operations are idempotent: fragments already in the requested state are
//! skipped, so re-invoking with the same index produces no redundant
//! animations and no redundant changes.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::ids::{ElementId, IdAllocator};
use crate::stage::Stage;
use crate::style::{Keyframe, Marker};
use crate::timeline::Timeline;

/// Reveal animation kinds.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentKind {
    #[default]
    FadeIn,
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    Grow,
    Shrink,
    Highlight,
}

pub const FRAGMENT_DURATION_MS: u32 = 300;
pub const FRAGMENT_EASING: Easing = Easing::EaseOut;

const FRAGMENT_OFFSET_PX: f32 = 20.0;
const HIGHLIGHT_ALPHA: f32 = 0.4;

/// A fragment as discovered at construction: its element handle, explicit
/// ordering key and animation kind.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub element: ElementId,
    pub order: i32,
    pub animation: FragmentKind,
}

/// Fixed (hidden, shown) keyframe pair for an animation kind.
pub fn reveal_keyframes(kind: FragmentKind) -> (Keyframe, Keyframe) {
    match kind {
        FragmentKind::FadeIn => (Keyframe::new().opacity(0.0), Keyframe::new().opacity(1.0)),
        FragmentKind::FadeUp => (
            Keyframe::new().opacity(0.0).offset_y(FRAGMENT_OFFSET_PX),
            Keyframe::new().opacity(1.0).offset_y(0.0),
        ),
        FragmentKind::FadeDown => (
            Keyframe::new().opacity(0.0).offset_y(-FRAGMENT_OFFSET_PX),
            Keyframe::new().opacity(1.0).offset_y(0.0),
        ),
        FragmentKind::FadeLeft => (
            Keyframe::new().opacity(0.0).offset_x(FRAGMENT_OFFSET_PX),
            Keyframe::new().opacity(1.0).offset_x(0.0),
        ),
        FragmentKind::FadeRight => (
            Keyframe::new().opacity(0.0).offset_x(-FRAGMENT_OFFSET_PX),
            Keyframe::new().opacity(1.0).offset_x(0.0),
        ),
        FragmentKind::Grow => (
            Keyframe::new().opacity(0.0).scale(0.5),
            Keyframe::new().opacity(1.0).scale(1.0),
        ),
        FragmentKind::Shrink => (
            Keyframe::new().opacity(0.0).scale(1.5),
            Keyframe::new().opacity(1.0).scale(1.0),
        ),
        FragmentKind::Highlight => (
            Keyframe::new().highlight(0.0),
            Keyframe::new().highlight(HIGHLIGHT_ALPHA),
        ),
    }
}

/// Stable order: primary key is the explicit `order`, ties keep discovery
/// order.
pub fn sort_fragments(fragments: &mut [Fragment]) {
    fragments.sort_by_key(|f| f.order);
}

/// Mark `fragment` visible and play its reveal keyframes.
pub fn show(ids: &mut IdAllocator, timeline: &mut Timeline, stage: &mut Stage, fragment: &Fragment) {
    let (hidden, shown) = reveal_keyframes(fragment.animation);
    stage.set_marker(fragment.element, Marker::FragmentVisible, true);
    timeline.start(
        ids,
        stage,
        fragment.element,
        hidden,
        shown,
        FRAGMENT_DURATION_MS,
        FRAGMENT_EASING,
    );
}

/// Mark `fragment` not visible and play the reverse keyframes.
pub fn hide(ids: &mut IdAllocator, timeline: &mut Timeline, stage: &mut Stage, fragment: &Fragment) {
    let (hidden, shown) = reveal_keyframes(fragment.animation);
    stage.set_marker(fragment.element, Marker::FragmentVisible, false);
    timeline.start(
        ids,
        stage,
        fragment.element,
        shown,
        hidden,
        FRAGMENT_DURATION_MS,
        FRAGMENT_EASING,
    );
}

/// Reveal every not-yet-visible fragment at index <= `index`, in order.
pub fn show_all_up_to(
    ids: &mut IdAllocator,
    timeline: &mut Timeline,
    stage: &mut Stage,
    fragments: &[Fragment],
    index: usize,
) {
    let end = fragments.len().min(index.saturating_add(1));
    for fragment in &fragments[..end] {
        if !stage.marker(fragment.element, Marker::FragmentVisible) {
            show(ids, timeline, stage, fragment);
        }
    }
}

/// Hide every visible fragment at index >= `index`, in order.
pub fn hide_all_from(
    ids: &mut IdAllocator,
    timeline: &mut Timeline,
    stage: &mut Stage,
    fragments: &[Fragment],
    index: usize,
) {
    for fragment in fragments.iter().skip(index) {
        if stage.marker(fragment.element, Marker::FragmentVisible) {
            hide(ids, timeline, stage, fragment);
        }
    }
}
