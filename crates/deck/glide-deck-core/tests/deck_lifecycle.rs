use std::cell::RefCell;
use std::rc::Rc;

use glide_deck_core::{
    default_plugins, Deck, DeckConfig, DeckEvent, DeckPlugin, DeckState, EventKind, Inputs,
    Marker, ProgressPlugin, SlideNumberPlugin,
};
use glide_test_fixtures::{instant_config, plain_deck};

fn instant_deck(slides: usize) -> Deck {
    Deck::new(plain_deck(slides), instant_config()).expect("deck should construct")
}

/// Plugin that records its lifecycle into a shared journal.
struct JournalPlugin {
    journal: Rc<RefCell<Vec<String>>>,
}

impl DeckPlugin for JournalPlugin {
    fn name(&self) -> &str {
        "journal"
    }

    fn init(&mut self, deck: &mut Deck) {
        self.journal
            .borrow_mut()
            .push(format!("init:{}", deck.state().total_slides));
    }

    fn on_event(&mut self, _state: &DeckState, event: &DeckEvent) {
        self.journal
            .borrow_mut()
            .push(format!("event:{}", event.kind().name()));
    }

    fn destroy(&mut self) {
        self.journal.borrow_mut().push("destroy".into());
    }
}

#[test]
fn ready_fires_once_on_the_first_operation() {
    let mut deck = instant_deck(3);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    // Registration precedes the first operation, so the listener observes
    // deck:ready exactly once across the deck's life.
    deck.on(EventKind::DeckReady, move |_, event| {
        if let DeckEvent::DeckReady { total_slides } = event {
            sink.borrow_mut().push(*total_slides);
        }
    });
    deck.go_to(1);
    deck.update(16.0, Inputs::none());
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn listeners_registered_after_ready_miss_it() {
    let mut deck = instant_deck(3);
    deck.update(16.0, Inputs::none()); // emits deck:ready

    let fired = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);
    deck.on(EventKind::DeckReady, move |_, _| *sink.borrow_mut() += 1);
    deck.go_to(2);
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn off_unsubscribes() {
    let mut deck = instant_deck(3);
    let fired = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);
    let id = deck.on(EventKind::SlideChanged, move |_, _| *sink.borrow_mut() += 1);

    deck.go_to(1);
    deck.off(EventKind::SlideChanged, id);
    deck.go_to(2);
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn destroy_tears_everything_down() {
    let mut deck = instant_deck(3);
    let destroyed = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&destroyed);
    deck.on(EventKind::DeckDestroyed, move |_, _| *sink.borrow_mut() += 1);

    deck.go_to(1);
    deck.destroy();
    assert!(deck.is_destroyed());
    assert_eq!(*destroyed.borrow(), 1);
    assert_eq!(deck.listener_count(), 0);

    // Idempotent, and every further operation is a no-op.
    deck.destroy();
    deck.next();
    deck.go_to(2);
    let outputs = deck.update(16.0, Inputs::none());
    assert_eq!(deck.state().current_slide, 1);
    assert!(outputs.is_empty());
    assert_eq!(*destroyed.borrow(), 1);
}

#[test]
fn listeners_are_not_registered_after_destroy() {
    let mut deck = instant_deck(3);
    deck.destroy();

    let fired = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);
    let late = deck.on(EventKind::DeckReady, move |_, _| *sink.borrow_mut() += 1);
    assert_eq!(deck.listener_count(), 0);

    deck.update(16.0, Inputs::none());
    assert_eq!(*fired.borrow(), 0);
    // The handle is inert but still accepted by off.
    deck.off(EventKind::DeckReady, late);
}

#[test]
fn destroy_as_the_first_operation_never_produces_ready() {
    let mut deck = instant_deck(3);
    deck.destroy();
    assert!(deck.is_destroyed());

    // Nothing after destroy can surface a ready emission.
    let fired = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);
    deck.on(EventKind::DeckReady, move |_, _| *sink.borrow_mut() += 1);
    deck.go_to(1);
    deck.update(16.0, Inputs::none());
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn plugin_lifecycle_runs_init_events_destroy() {
    let mut deck = instant_deck(3);
    let journal = Rc::new(RefCell::new(Vec::new()));
    deck.use_plugin(Box::new(JournalPlugin {
        journal: Rc::clone(&journal),
    }));

    deck.go_to(1);
    deck.destroy();

    let journal = journal.borrow();
    assert_eq!(journal[0], "init:3");
    assert!(journal.contains(&"event:deck:ready".to_string()));
    assert!(journal.contains(&"event:slide:changed".to_string()));
    // Plugins are torn down before deck:destroyed is emitted, so the journal
    // ends with destroy and never sees that event.
    assert_eq!(journal.last().map(String::as_str), Some("destroy"));
    assert!(!journal.contains(&"event:deck:destroyed".to_string()));
}

#[test]
fn progress_tracker_follows_navigation() {
    let mut deck = instant_deck(5);
    let plugin = ProgressPlugin::new();
    let progress = plugin.handle();
    deck.use_plugin(Box::new(plugin));

    assert_eq!(progress.get(), 0.0);
    deck.go_to(2);
    assert_eq!(progress.get(), 0.5);
    deck.go_to(4);
    assert_eq!(progress.get(), 1.0);
}

#[test]
fn slide_number_tracker_is_one_based() {
    let mut deck = instant_deck(4);
    let plugin = SlideNumberPlugin::new();
    let label = plugin.handle();
    deck.use_plugin(Box::new(plugin));

    assert_eq!(label.get(), "1 / 4");
    deck.go_to(3);
    assert_eq!(label.get(), "4 / 4");
}

#[test]
fn default_plugins_honor_config_toggles() {
    let both = default_plugins(&DeckConfig::default());
    assert_eq!(both.len(), 2);

    let none = default_plugins(&DeckConfig {
        progress: false,
        slide_number: false,
        ..DeckConfig::default()
    });
    assert!(none.is_empty());
}

#[test]
fn pause_blocks_stepping_until_resume() {
    let mut deck = instant_deck(4);
    deck.pause();
    assert!(deck.state().is_paused);
    deck.next();
    deck.prev();
    assert_eq!(deck.state().current_slide, 0);

    // Direct jumps stay live while paused.
    deck.go_to(2);
    assert_eq!(deck.state().current_slide, 2);

    deck.resume();
    deck.next();
    assert_eq!(deck.state().current_slide, 3);
}

#[test]
fn auto_slide_advances_on_the_update_clock() {
    let config = DeckConfig {
        auto_slide_ms: 100,
        ..instant_config()
    };
    let mut deck = Deck::new(plain_deck(5), config).expect("deck");

    deck.update(250.0, Inputs::none());
    assert_eq!(deck.state().current_slide, 2);

    deck.pause();
    deck.update(500.0, Inputs::none());
    assert_eq!(deck.state().current_slide, 2);

    deck.resume();
    deck.update(100.0, Inputs::none());
    assert_eq!(deck.state().current_slide, 3);
}

#[test]
fn auto_slide_stops_at_the_last_slide_without_looping() {
    let config = DeckConfig {
        auto_slide_ms: 100,
        ..instant_config()
    };
    let mut deck = Deck::new(plain_deck(2), config).expect("deck");
    deck.update(1000.0, Inputs::none());
    assert_eq!(deck.state().current_slide, 1);
}

#[test]
fn overview_toggles_the_container_marker() {
    let mut deck = instant_deck(3);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    deck.on(EventKind::OverviewOpen, {
        let sink = Rc::clone(&sink);
        move |_, event| sink.borrow_mut().push(event.kind().name())
    });
    deck.on(EventKind::OverviewClose, move |_, event| {
        sink.borrow_mut().push(event.kind().name())
    });

    deck.toggle_overview();
    assert!(deck.state().is_overview);
    assert!(deck.marker(deck.container(), Marker::Overview));

    deck.toggle_overview();
    assert!(!deck.state().is_overview);
    assert!(!deck.marker(deck.container(), Marker::Overview));
    assert_eq!(*seen.borrow(), vec!["overview:open", "overview:close"]);
}

#[test]
fn aria_and_classification_markers_track_the_current_slide() {
    let mut deck = instant_deck(3);
    deck.go_to(1);

    let past = deck.slides()[0].element();
    let active = deck.slides()[1].element();
    let future = deck.slides()[2].element();
    assert!(deck.marker(past, Marker::Past));
    assert!(deck.marker(active, Marker::Active));
    assert!(deck.marker(future, Marker::Future));
    assert!(deck.marker(past, Marker::AriaHidden));
    assert!(!deck.marker(active, Marker::AriaHidden));
    assert!(deck.marker(future, Marker::AriaHidden));
}
