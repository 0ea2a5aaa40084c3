//! Plugin contract and the built-in trackers.
//!
//! Plugins are trait objects held by the deck in registration order; they
//! interact with the core only through the public API (during `init`) and
//! the event stream. The built-ins re-express the classic progress-bar and
//! slide-number widgets as pure trackers: they compute the value, the host
//! renders it through a cloneable handle.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::DeckConfig;
use crate::deck::Deck;
use crate::events::DeckEvent;
use crate::state::DeckState;

/// External extension with a deck-owned lifecycle.
pub trait DeckPlugin {
    fn name(&self) -> &str;

    /// Called synchronously when the plugin is registered.
    fn init(&mut self, deck: &mut Deck);

    /// Called for every emitted event with a state snapshot.
    fn on_event(&mut self, state: &DeckState, event: &DeckEvent) {
        let _ = (state, event);
    }

    /// Called on deck teardown, in registration order.
    fn destroy(&mut self);
}

/// Built-in plugins enabled by the configuration toggles.
pub fn default_plugins(config: &DeckConfig) -> Vec<Box<dyn DeckPlugin>> {
    let mut plugins: Vec<Box<dyn DeckPlugin>> = Vec::new();
    if config.progress {
        plugins.push(Box::new(ProgressPlugin::new()));
    }
    if config.slide_number {
        plugins.push(Box::new(SlideNumberPlugin::new()));
    }
    plugins
}

/// Host-readable view of a tracker value.
#[derive(Clone, Debug, Default)]
pub struct TrackerHandle<T: Clone>(Rc<RefCell<T>>);

impl<T: Clone> TrackerHandle<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }

    fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}

/// Tracks deck progress as a fraction in [0,1]; 1.0 for single-slide decks.
#[derive(Debug, Default)]
pub struct ProgressPlugin {
    fraction: TrackerHandle<f32>,
}

impl ProgressPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> TrackerHandle<f32> {
        self.fraction.clone()
    }

    fn update(&self, state: &DeckState) {
        let fraction = if state.total_slides > 1 {
            state.current_slide as f32 / (state.total_slides - 1) as f32
        } else {
            1.0
        };
        self.fraction.set(fraction);
    }
}

impl DeckPlugin for ProgressPlugin {
    fn name(&self) -> &str {
        "progress"
    }

    fn init(&mut self, deck: &mut Deck) {
        self.update(&deck.state());
    }

    fn on_event(&mut self, state: &DeckState, event: &DeckEvent) {
        if matches!(
            event,
            DeckEvent::SlideChanged { .. } | DeckEvent::DeckReady { .. }
        ) {
            self.update(state);
        }
    }

    fn destroy(&mut self) {
        self.fraction.set(0.0);
    }
}

/// Tracks the "current / total" label (1-based, matching what viewers read).
#[derive(Debug, Default)]
pub struct SlideNumberPlugin {
    label: TrackerHandle<String>,
}

impl SlideNumberPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> TrackerHandle<String> {
        self.label.clone()
    }

    fn update(&self, state: &DeckState) {
        self.label
            .set(format!("{} / {}", state.current_slide + 1, state.total_slides));
    }
}

impl DeckPlugin for SlideNumberPlugin {
    fn name(&self) -> &str {
        "slide-number"
    }

    fn init(&mut self, deck: &mut Deck) {
        self.update(&deck.state());
    }

    fn on_event(&mut self, state: &DeckState, event: &DeckEvent) {
        if matches!(
            event,
            DeckEvent::SlideChanged { .. } | DeckEvent::DeckReady { .. }
        ) {
            self.update(state);
        }
    }

    fn destroy(&mut self) {
        self.label.set(String::new());
    }
}
