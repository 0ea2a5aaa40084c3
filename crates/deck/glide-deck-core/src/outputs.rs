//! Output contract from the core to the host.
//!
//! The deck never touches a render tree. Every stage write that actually
//! alters a stored value is recorded as a [`Change`]; the host drains them
//! from [`crate::Deck::update`] and applies them to its own visual nodes.
//! Semantic events travel separately, through the event emitter.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;
use crate::style::{Marker, Origin, StyleProp};

/// One changed visual fact about one element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Change {
    Style {
        element: ElementId,
        prop: StyleProp,
        value: f32,
    },
    Marker {
        element: ElementId,
        marker: Marker,
        on: bool,
    },
    Origin {
        element: ElementId,
        origin: Origin,
    },
}

/// Changes accumulated since the previous [`crate::Deck::update`] call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl Outputs {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Style changes touching `element`, in application order.
    pub fn styles_for(&self, element: ElementId) -> impl Iterator<Item = (StyleProp, f32)> + '_ {
        self.changes.iter().filter_map(move |c| match c {
            Change::Style {
                element: el,
                prop,
                value,
            } if *el == element => Some((*prop, *value)),
            _ => None,
        })
    }
}
