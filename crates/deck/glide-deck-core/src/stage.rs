//! The stage: the deck's owned record of every element's visual state.
//!
//! Writes are change-recording: a write that leaves the stored value
//! untouched records nothing. This is what makes the fragment batch
//! operations idempotent at the output level and keeps repeated marker
//! passes (classification, transition settles) quiet.

use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, IdAllocator};
use crate::outputs::Change;
use crate::style::{Marker, Origin, StyleProp};

/// Visual record of a single element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementVisual {
    styles: [f32; StyleProp::COUNT],
    markers: [bool; Marker::COUNT],
    origin: Origin,
}

impl Default for ElementVisual {
    fn default() -> Self {
        let mut styles = [0.0; StyleProp::COUNT];
        styles[StyleProp::Opacity.index()] = StyleProp::Opacity.default_value();
        styles[StyleProp::Scale.index()] = StyleProp::Scale.default_value();
        Self {
            styles,
            markers: [false; Marker::COUNT],
            origin: Origin::Center,
        }
    }
}

/// A single stage write, used by transition plans (preludes and settles).
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StageOp {
    Style(ElementId, StyleProp, f32),
    Marker(ElementId, Marker, bool),
    Origin(ElementId, Origin),
}

/// Flat element store plus the change log for the current host window.
#[derive(Debug, Default)]
pub struct Stage {
    elements: Vec<ElementVisual>,
    changes: Vec<Change>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh element with identity styles and no markers.
    pub fn alloc_element(&mut self, ids: &mut IdAllocator) -> ElementId {
        let id = ids.alloc_element();
        debug_assert_eq!(id.0 as usize, self.elements.len());
        self.elements.push(ElementVisual::default());
        id
    }

    pub fn style(&self, element: ElementId, prop: StyleProp) -> f32 {
        self.elements[element.0 as usize].styles[prop.index()]
    }

    pub fn marker(&self, element: ElementId, marker: Marker) -> bool {
        self.elements[element.0 as usize].markers[marker.index()]
    }

    pub fn origin(&self, element: ElementId) -> Origin {
        self.elements[element.0 as usize].origin
    }

    pub fn set_style(&mut self, element: ElementId, prop: StyleProp, value: f32) {
        let slot = &mut self.elements[element.0 as usize].styles[prop.index()];
        if *slot != value {
            *slot = value;
            self.changes.push(Change::Style {
                element,
                prop,
                value,
            });
        }
    }

    pub fn set_marker(&mut self, element: ElementId, marker: Marker, on: bool) {
        let slot = &mut self.elements[element.0 as usize].markers[marker.index()];
        if *slot != on {
            *slot = on;
            self.changes.push(Change::Marker {
                element,
                marker,
                on,
            });
        }
    }

    pub fn set_origin(&mut self, element: ElementId, origin: Origin) {
        let slot = &mut self.elements[element.0 as usize].origin;
        if *slot != origin {
            *slot = origin;
            self.changes.push(Change::Origin { element, origin });
        }
    }

    pub(crate) fn apply(&mut self, op: &StageOp) {
        match *op {
            StageOp::Style(element, prop, value) => self.set_style(element, prop, value),
            StageOp::Marker(element, marker, on) => self.set_marker(element, marker, on),
            StageOp::Origin(element, origin) => self.set_origin(element, origin),
        }
    }

    pub(crate) fn apply_all(&mut self, ops: &[StageOp]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Hand the accumulated change log to the host.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_record_changes_only_when_values_move() {
        let mut ids = IdAllocator::new();
        let mut stage = Stage::new();
        let el = stage.alloc_element(&mut ids);

        stage.set_style(el, StyleProp::Opacity, 1.0); // identity, no change
        assert!(stage.drain_changes().is_empty());

        stage.set_style(el, StyleProp::Opacity, 0.0);
        stage.set_style(el, StyleProp::Opacity, 0.0); // repeat, quiet
        stage.set_marker(el, Marker::Active, true);
        stage.set_marker(el, Marker::Active, true); // repeat, quiet

        let changes = stage.drain_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(stage.style(el, StyleProp::Opacity), 0.0);
        assert!(stage.marker(el, Marker::Active));
    }
}
