//! Deck controller: the composition root.
//!
//! Owns the state machine, the stage, the timeline, the transition engine,
//! the event emitter and the plugin list. Navigation is synchronous: `go_to`
//! mutates state, reclassifies slides and emits `slide:changed` before the
//! associated transition animation has necessarily progressed at all; the
//! animation is fire-and-forget and advances on `update` ticks. This
//! intentionally favors input responsiveness over strict visual-state
//! consistency; see DESIGN.md for the overlap policy.

use crate::config::DeckConfig;
use crate::definition::DeckDefinition;
use crate::error::DeckError;
use crate::events::{DeckEvent, EventEmitter, EventKind};
use crate::fragment::{self, Fragment};
use crate::hash::{format_location_hash, parse_location_hash};
use crate::ids::{ElementId, IdAllocator, ListenerId};
use crate::input::{DeckCommand, Inputs};
use crate::outputs::Outputs;
use crate::plugin::DeckPlugin;
use crate::stage::Stage;
use crate::state::{clamp_index, DeckState};
use crate::style::Marker;
use crate::timeline::Timeline;
use crate::transition::{Direction, TransitionEngine, TransitionOptions};

/// One slide: its element handle and its fragments, stably sorted by
/// ordering key at construction.
#[derive(Clone, Debug)]
pub struct Slide {
    element: ElementId,
    fragments: Vec<Fragment>,
}

impl Slide {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

/// The deck instance.
pub struct Deck {
    config: DeckConfig,
    state: DeckState,
    container: ElementId,
    slides: Vec<Slide>,
    ids: IdAllocator,
    stage: Stage,
    timeline: Timeline,
    transitions: TransitionEngine,
    events: EventEmitter,
    plugins: Vec<Box<dyn DeckPlugin>>,
    location_hash: Option<String>,
    auto_slide_elapsed_ms: f32,
    ready_emitted: bool,
    destroyed: bool,
}

impl Deck {
    /// Build a deck from a host-discovered definition.
    ///
    /// The initial slide comes from a valid location hash when `hash` is
    /// enabled, else from `start_slide`, clamped either way. The
    /// classification pass runs before the host sees any output, so the
    /// first drained changes describe a fully classified deck.
    pub fn new(definition: DeckDefinition, config: DeckConfig) -> Result<Self, DeckError> {
        if config.transition_speed_ms == 0 {
            return Err(DeckError::ZeroTransitionSpeed);
        }

        let mut ids = IdAllocator::new();
        let mut stage = Stage::new();
        let container = stage.alloc_element(&mut ids);

        let mut slides = Vec::with_capacity(definition.slides.len());
        for slide_def in &definition.slides {
            let element = stage.alloc_element(&mut ids);
            let mut fragments = Vec::with_capacity(slide_def.fragments.len());
            for frag_def in &slide_def.fragments {
                fragments.push(Fragment {
                    element: stage.alloc_element(&mut ids),
                    order: frag_def.order,
                    animation: frag_def.animation,
                });
            }
            fragment::sort_fragments(&mut fragments);
            slides.push(Slide { element, fragments });
        }

        let mut state = DeckState::new(slides.len());
        let hash_start = if config.hash {
            definition
                .location_hash
                .as_deref()
                .and_then(parse_location_hash)
        } else {
            None
        };
        state.current_slide = clamp_index(hash_start.unwrap_or(config.start_slide), slides.len());

        // Initial styles: only the start slide is visible and interactive;
        // fragments begin in their hidden keyframe.
        for (i, slide) in slides.iter().enumerate() {
            let active = i == state.current_slide;
            stage.set_style(
                slide.element,
                crate::style::StyleProp::Opacity,
                if active { 1.0 } else { 0.0 },
            );
            stage.set_marker(slide.element, Marker::Interactive, active);
            for frag in &slide.fragments {
                let (hidden, _) = fragment::reveal_keyframes(frag.animation);
                for (prop, value) in hidden.props() {
                    stage.set_style(frag.element, prop, value);
                }
            }
        }

        let transitions = TransitionEngine::new(config.reduced_motion);
        let mut deck = Self {
            config,
            state,
            container,
            slides,
            ids,
            stage,
            timeline: Timeline::new(),
            transitions,
            events: EventEmitter::new(),
            plugins: Vec::new(),
            location_hash: None,
            auto_slide_elapsed_ms: 0.0,
            ready_emitted: false,
            destroyed: false,
        };
        deck.update_slide_classes();
        deck.sync_hash();
        Ok(deck)
    }

    // ----- Public API -----

    /// Navigate to a slide. Out-of-range indices clamp; navigating to the
    /// current slide is a silent no-op. State updates and `slide:changed`
    /// fire synchronously; the transition animation runs on later ticks.
    pub fn go_to(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        self.ensure_ready();
        let target = clamp_index(index, self.state.total_slides);
        if target == self.state.current_slide {
            return;
        }

        let from = self.state.current_slide;
        let direction = if target > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let opts = TransitionOptions {
            duration_ms: self.config.transition_speed_ms,
            easing: self.config.easing,
            direction,
        };
        log::debug!(
            "go_to {from} -> {target} ({:?}, {direction:?})",
            self.config.transition
        );
        self.transitions.begin(
            &mut self.ids,
            &mut self.timeline,
            &mut self.stage,
            self.config.transition,
            Some(self.slides[from].element),
            self.slides[target].element,
            self.container,
            &opts,
        );

        self.state.current_slide = target;
        self.state.current_fragment = -1;
        self.update_slide_classes();
        self.sync_hash();
        self.emit(DeckEvent::SlideChanged { from, to: target });
    }

    /// Advance: next fragment if the current slide has one left, else next
    /// slide, else wrap when looping. No-op while paused.
    pub fn next(&mut self) {
        if self.destroyed {
            return;
        }
        self.ensure_ready();
        if self.state.is_paused {
            return;
        }

        let cur = self.state.current_slide;
        let frag_count = self
            .slides
            .get(cur)
            .map(|s| s.fragments.len())
            .unwrap_or(0);
        let next_frag = self.state.current_fragment + 1;
        if frag_count > 0 && (next_frag as usize) < frag_count {
            let frag = self.slides[cur].fragments[next_frag as usize];
            self.state.current_fragment = next_frag;
            fragment::show(&mut self.ids, &mut self.timeline, &mut self.stage, &frag);
            self.emit(DeckEvent::FragmentShown {
                slide: cur,
                fragment: next_frag as usize,
                element: frag.element,
            });
            return;
        }

        if cur + 1 < self.state.total_slides {
            self.go_to(cur + 1);
        } else if self.config.looping && self.state.total_slides > 0 {
            self.go_to(0);
        }
    }

    /// Step back: hide the current fragment if one is revealed, else move to
    /// the previous slide with all of its fragments revealed (matching the
    /// forward-accumulated state), else wrap when looping. No-op while
    /// paused.
    pub fn prev(&mut self) {
        if self.destroyed {
            return;
        }
        self.ensure_ready();
        if self.state.is_paused {
            return;
        }

        let cur = self.state.current_slide;
        if self.state.current_fragment >= 0 {
            let index = self.state.current_fragment as usize;
            if let Some(frag) = self
                .slides
                .get(cur)
                .and_then(|s| s.fragments.get(index))
                .copied()
            {
                fragment::hide(&mut self.ids, &mut self.timeline, &mut self.stage, &frag);
                self.state.current_fragment -= 1;
                self.emit(DeckEvent::FragmentHidden {
                    slide: cur,
                    fragment: index,
                    element: frag.element,
                });
                return;
            }
        }

        if cur > 0 {
            let target = cur - 1;
            self.go_to(target);
            let count = self.slides[target].fragments.len();
            if count > 0 {
                fragment::show_all_up_to(
                    &mut self.ids,
                    &mut self.timeline,
                    &mut self.stage,
                    &self.slides[target].fragments,
                    count - 1,
                );
            }
            self.state.current_fragment = count as isize - 1;
        } else if self.config.looping && self.state.total_slides > 0 {
            self.go_to(self.state.total_slides - 1);
        }
    }

    /// Flip the overview grid, toggling the container marker.
    pub fn toggle_overview(&mut self) {
        if self.destroyed {
            return;
        }
        self.ensure_ready();
        self.state.is_overview = !self.state.is_overview;
        self.stage
            .set_marker(self.container, Marker::Overview, self.state.is_overview);
        if self.state.is_overview {
            self.emit(DeckEvent::OverviewOpen);
        } else {
            self.emit(DeckEvent::OverviewClose);
        }
    }

    /// Freeze navigation and auto-advance.
    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.ensure_ready();
        self.state.is_paused = true;
    }

    pub fn resume(&mut self) {
        if self.destroyed {
            return;
        }
        self.ensure_ready();
        self.state.is_paused = false;
    }

    /// Apply queued commands, advance the auto-advance timer and every
    /// in-flight animation by `dt_ms`, and hand back the accumulated
    /// changes (including those recorded by direct API calls since the
    /// previous update).
    pub fn update(&mut self, dt_ms: f32, inputs: Inputs) -> Outputs {
        if self.destroyed {
            return Outputs::default();
        }
        self.ensure_ready();

        for command in inputs.commands {
            self.apply_command(command);
        }

        if self.config.auto_slide_ms > 0 && !self.state.is_paused {
            self.auto_slide_elapsed_ms += dt_ms;
            let interval = self.config.auto_slide_ms as f32;
            while self.auto_slide_elapsed_ms >= interval {
                self.auto_slide_elapsed_ms -= interval;
                self.next();
            }
        }

        let finished = self.timeline.tick(dt_ms, &mut self.stage);
        self.transitions.on_groups_finished(
            &finished,
            &mut self.ids,
            &mut self.timeline,
            &mut self.stage,
        );

        Outputs {
            changes: self.stage.drain_changes(),
        }
    }

    /// Host-reported location-hash change (deep-link round trip).
    pub fn navigate_hash(&mut self, hash: &str) {
        if !self.config.hash {
            return;
        }
        if let Some(index) = parse_location_hash(hash) {
            if index != self.state.current_slide {
                self.go_to(index);
            }
        }
    }

    /// Register an event listener; the returned id removes it again. The
    /// first registration observes `deck:ready`.
    pub fn on(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&DeckState, &DeckEvent) + 'static,
    ) -> ListenerId {
        if self.destroyed {
            log::warn!("listener on destroyed deck ignored: {}", kind.name());
            return self.events.alloc_id();
        }
        let id = self.events.on(kind, Box::new(callback));
        self.ensure_ready();
        id
    }

    pub fn off(&mut self, kind: EventKind, listener: ListenerId) {
        self.events.off(kind, listener);
    }

    /// Register a plugin: `init` runs synchronously, then the plugin
    /// receives every emitted event until teardown.
    pub fn use_plugin(&mut self, mut plugin: Box<dyn DeckPlugin>) {
        if self.destroyed {
            log::warn!("use_plugin on destroyed deck ignored: {}", plugin.name());
            return;
        }
        plugin.init(self);
        self.plugins.push(plugin);
        self.ensure_ready();
    }

    /// Tear down: plugins are destroyed in registration order,
    /// `deck:destroyed` fires, every listener and timer is dropped. In-flight
    /// animations are neither awaited nor cancelled. All further operations
    /// on the deck are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        // No ensure_ready here: a deck destroyed as its first operation goes
        // straight to deck:destroyed.
        log::debug!("destroying deck ({} slides)", self.state.total_slides);

        let mut plugins = std::mem::take(&mut self.plugins);
        for plugin in &mut plugins {
            plugin.destroy();
        }

        self.emit(DeckEvent::DeckDestroyed);
        self.events.clear();
        self.destroyed = true;
    }

    // ----- Read-only accessors -----

    /// Snapshot of the logical state; never a live reference.
    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Fragments of a slide in reveal order; empty for out-of-range indices.
    pub fn fragments(&self, slide_index: usize) -> &[Fragment] {
        self.slides
            .get(slide_index)
            .map(|s| s.fragments())
            .unwrap_or(&[])
    }

    /// Canonical bookmark for the current slide while `hash` is enabled.
    pub fn location_hash(&self) -> Option<&str> {
        self.location_hash.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Transition runs still animating (test and tooling visibility).
    pub fn active_transitions(&self) -> usize {
        self.transitions.active_runs()
    }

    pub fn active_animations(&self) -> usize {
        self.timeline.active_animations()
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Current style value of an element, as the host would render it.
    pub fn style(&self, element: ElementId, prop: crate::style::StyleProp) -> f32 {
        self.stage.style(element, prop)
    }

    pub fn marker(&self, element: ElementId, marker: Marker) -> bool {
        self.stage.marker(element, marker)
    }

    // ----- Private -----

    fn apply_command(&mut self, command: DeckCommand) {
        match command {
            DeckCommand::Next => self.next(),
            DeckCommand::Prev => self.prev(),
            DeckCommand::GoTo { index } => self.go_to(index),
            DeckCommand::ToggleOverview => self.toggle_overview(),
            DeckCommand::Pause => self.pause(),
            DeckCommand::Resume => self.resume(),
            DeckCommand::NavigateHash { hash } => self.navigate_hash(&hash),
        }
    }

    /// Past/active/future and aria-hidden classification over all slides,
    /// plus the fragment reset on the (new) current slide.
    fn update_slide_classes(&mut self) {
        let current = self.state.current_slide;
        for i in 0..self.slides.len() {
            let element = self.slides[i].element;
            self.stage.set_marker(element, Marker::Past, i < current);
            self.stage.set_marker(element, Marker::Active, i == current);
            self.stage.set_marker(element, Marker::Future, i > current);
            self.stage
                .set_marker(element, Marker::AriaHidden, i != current);
        }
        if let Some(slide) = self.slides.get(current) {
            fragment::hide_all_from(
                &mut self.ids,
                &mut self.timeline,
                &mut self.stage,
                &slide.fragments,
                0,
            );
        }
        self.state.current_fragment = -1;
    }

    fn sync_hash(&mut self) {
        if self.config.hash {
            self.location_hash = Some(format_location_hash(self.state.current_slide));
        }
    }

    /// `deck:ready` fires once, on the first public operation after
    /// construction, so listeners and plugins registered right after `new`
    /// can observe it.
    fn ensure_ready(&mut self) {
        if self.ready_emitted || self.destroyed {
            return;
        }
        self.ready_emitted = true;
        self.emit(DeckEvent::DeckReady {
            total_slides: self.state.total_slides,
        });
    }

    fn emit(&mut self, event: DeckEvent) {
        let state = self.state;
        self.events.emit(&state, &event);
        for plugin in &mut self.plugins {
            plugin.on_event(&state, &event);
        }
    }
}

impl std::fmt::Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("state", &self.state)
            .field("slides", &self.slides.len())
            .field("plugins", &self.plugins.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
