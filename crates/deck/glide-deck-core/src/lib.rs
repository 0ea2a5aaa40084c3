//! Glide Deck Core (host-agnostic)
//!
//! A presentation-deck controller: deck/fragment state machine, slide
//! transition planner and a small tick-driven animation timeline. The crate
//! owns no rendering and no event loop; a host (DOM adapter, TUI, headless
//! test) constructs a [`Deck`] from a [`DeckDefinition`], forwards input as
//! [`DeckCommand`]s and drives time via [`Deck::update`], applying the
//! returned [`Change`] stream to whatever it renders with.

pub mod config;
pub mod deck;
pub mod definition;
pub mod easing;
pub mod error;
pub mod events;
pub mod fragment;
pub mod hash;
pub mod ids;
pub mod input;
pub mod outputs;
pub mod plugin;
pub mod stage;
pub mod state;
pub mod style;
pub mod timeline;
pub mod transition;

// Re-exports for hosts (adapters)
pub use config::DeckConfig;
pub use deck::{Deck, Slide};
pub use definition::{DeckDefinition, FragmentDef, SlideDef};
pub use easing::Easing;
pub use error::DeckError;
pub use events::{DeckEvent, EventKind};
pub use fragment::{Fragment, FragmentKind};
pub use hash::{format_location_hash, parse_location_hash};
pub use ids::{AnimationId, ElementId, GroupId, ListenerId, RunId};
pub use input::{map_input, DeckCommand, InputEvent, Inputs, Key};
pub use outputs::{Change, Outputs};
pub use plugin::{default_plugins, DeckPlugin, ProgressPlugin, SlideNumberPlugin, TrackerHandle};
pub use state::DeckState;
pub use style::{Keyframe, Marker, Origin, StyleProp};
pub use transition::{Direction, TransitionKind, TransitionOptions};
