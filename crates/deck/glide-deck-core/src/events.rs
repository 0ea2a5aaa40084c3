//! Semantic deck events and the per-instance listener registry.
//!
//! The registry is explicit instance state, never module-level: two decks in
//! one process share nothing, and teardown clears every entry.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, ListenerId};
use crate::state::DeckState;

/// Discrete notifications emitted during navigation and lifecycle.
/// No error condition ever travels through this channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum DeckEvent {
    SlideChanged {
        from: usize,
        to: usize,
    },
    FragmentShown {
        slide: usize,
        fragment: usize,
        element: ElementId,
    },
    FragmentHidden {
        slide: usize,
        fragment: usize,
        element: ElementId,
    },
    DeckReady {
        total_slides: usize,
    },
    DeckDestroyed,
    OverviewOpen,
    OverviewClose,
}

impl DeckEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DeckEvent::SlideChanged { .. } => EventKind::SlideChanged,
            DeckEvent::FragmentShown { .. } => EventKind::FragmentShown,
            DeckEvent::FragmentHidden { .. } => EventKind::FragmentHidden,
            DeckEvent::DeckReady { .. } => EventKind::DeckReady,
            DeckEvent::DeckDestroyed => EventKind::DeckDestroyed,
            DeckEvent::OverviewOpen => EventKind::OverviewOpen,
            DeckEvent::OverviewClose => EventKind::OverviewClose,
        }
    }
}

/// Subscription key for [`crate::Deck::on`] / [`crate::Deck::off`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SlideChanged,
    FragmentShown,
    FragmentHidden,
    DeckReady,
    DeckDestroyed,
    OverviewOpen,
    OverviewClose,
}

impl EventKind {
    /// Wire name of the event, `<topic>:<what>`.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::SlideChanged => "slide:changed",
            EventKind::FragmentShown => "fragment:shown",
            EventKind::FragmentHidden => "fragment:hidden",
            EventKind::DeckReady => "deck:ready",
            EventKind::DeckDestroyed => "deck:destroyed",
            EventKind::OverviewOpen => "overview:open",
            EventKind::OverviewClose => "overview:close",
        }
    }
}

type Callback = Box<dyn FnMut(&DeckState, &DeckEvent)>;

/// Per-instance event registry.
#[derive(Default)]
pub(crate) struct EventEmitter {
    listeners: HashMap<EventKind, Vec<(ListenerId, Callback)>>,
    next_listener: u32,
}

impl EventEmitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(&mut self, kind: EventKind, callback: Callback) -> ListenerId {
        let id = self.alloc_id();
        self.listeners.entry(kind).or_default().push((id, callback));
        id
    }

    /// Allocate an id without registering anything; keeps ids unique when a
    /// registration is refused.
    pub(crate) fn alloc_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        id
    }

    pub(crate) fn off(&mut self, kind: EventKind, listener: ListenerId) {
        if let Some(entries) = self.listeners.get_mut(&kind) {
            entries.retain(|(id, _)| *id != listener);
        }
    }

    pub(crate) fn emit(&mut self, state: &DeckState, event: &DeckEvent) {
        if let Some(entries) = self.listeners.get_mut(&event.kind()) {
            for (_, callback) in entries.iter_mut() {
                callback(state, event);
            }
        }
    }

    /// Teardown: drop every registered callback.
    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn off_removes_only_the_named_listener() {
        let mut emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = Rc::clone(&seen);
            emitter.on(
                EventKind::SlideChanged,
                Box::new(move |_, _| seen.borrow_mut().push("a")),
            )
        };
        let _b = {
            let seen = Rc::clone(&seen);
            emitter.on(
                EventKind::SlideChanged,
                Box::new(move |_, _| seen.borrow_mut().push("b")),
            )
        };

        let state = DeckState::new(3);
        emitter.emit(&state, &DeckEvent::SlideChanged { from: 0, to: 1 });
        emitter.off(EventKind::SlideChanged, a);
        emitter.emit(&state, &DeckEvent::SlideChanged { from: 1, to: 2 });

        assert_eq!(*seen.borrow(), vec!["a", "b", "b"]);
    }

    #[test]
    fn clear_drops_every_entry() {
        let mut emitter = EventEmitter::new();
        emitter.on(EventKind::DeckReady, Box::new(|_, _| {}));
        emitter.on(EventKind::DeckDestroyed, Box::new(|_, _| {}));
        assert_eq!(emitter.listener_count(), 2);
        emitter.clear();
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn wire_names_round_trip_kinds() {
        assert_eq!(EventKind::SlideChanged.name(), "slide:changed");
        assert_eq!(
            DeckEvent::OverviewOpen.kind().name(),
            "overview:open"
        );
    }
}
