//! Input contracts: commands consumed by [`crate::Deck::update`] and the
//! pure mapping from host input events to commands.
//!
//! Device listeners live in the host; they either call the public API
//! directly or run their raw events through [`map_input`] and queue the
//! resulting commands. The mapping honors the `keyboard`, `touch` and
//! `click_to_advance` config toggles and drops chorded key presses.

use serde::{Deserialize, Serialize};

use crate::config::DeckConfig;

/// Commands applied, in order, at the start of an update tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum DeckCommand {
    Next,
    Prev,
    GoTo { index: usize },
    ToggleOverview,
    Pause,
    Resume,
    /// Location-hash change reported by the host (deep-link round trip).
    NavigateHash { hash: String },
}

/// Batch of commands for one tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default)]
    pub commands: Vec<DeckCommand>,
}

impl Inputs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn one(command: DeckCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

/// Navigation-relevant keys, named after their wire values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    ArrowUp,
    Space,
    KeyN,
    KeyP,
    Home,
    End,
    Escape,
}

/// Host input event in device-neutral form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "kebab-case")]
pub enum InputEvent {
    Key {
        key: Key,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        meta: bool,
    },
    Click,
    /// End of a touch gesture; deltas from its starting point.
    SwipeEnd { dx: f32, dy: f32 },
}

/// Minimum horizontal travel for a swipe to count as navigation.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Map a host input event to a deck command, if the configuration routes it.
pub fn map_input(
    config: &DeckConfig,
    total_slides: usize,
    event: &InputEvent,
) -> Option<DeckCommand> {
    match event {
        InputEvent::Key {
            key,
            ctrl,
            alt,
            meta,
        } => {
            if !config.keyboard || *ctrl || *alt || *meta {
                return None;
            }
            match key {
                Key::ArrowRight | Key::ArrowDown | Key::Space | Key::KeyN => {
                    Some(DeckCommand::Next)
                }
                Key::ArrowLeft | Key::ArrowUp | Key::KeyP => Some(DeckCommand::Prev),
                Key::Home => Some(DeckCommand::GoTo { index: 0 }),
                Key::End => Some(DeckCommand::GoTo {
                    index: total_slides.saturating_sub(1),
                }),
                Key::Escape => Some(DeckCommand::ToggleOverview),
            }
        }
        InputEvent::Click => {
            if config.click_to_advance {
                Some(DeckCommand::Next)
            } else {
                None
            }
        }
        InputEvent::SwipeEnd { dx, dy } => {
            if !config.touch {
                return None;
            }
            // Only horizontal swipes count; vertical scrolls pass through.
            if dx.abs() < SWIPE_THRESHOLD || dy.abs() > dx.abs() {
                return None;
            }
            if *dx < 0.0 {
                Some(DeckCommand::Next)
            } else {
                Some(DeckCommand::Prev)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    #[test]
    fn keyboard_mapping_table() {
        let cfg = DeckConfig::default();
        assert_eq!(map_input(&cfg, 5, &key(Key::ArrowRight)), Some(DeckCommand::Next));
        assert_eq!(map_input(&cfg, 5, &key(Key::Space)), Some(DeckCommand::Next));
        assert_eq!(map_input(&cfg, 5, &key(Key::KeyP)), Some(DeckCommand::Prev));
        assert_eq!(
            map_input(&cfg, 5, &key(Key::Home)),
            Some(DeckCommand::GoTo { index: 0 })
        );
        assert_eq!(
            map_input(&cfg, 5, &key(Key::End)),
            Some(DeckCommand::GoTo { index: 4 })
        );
        assert_eq!(
            map_input(&cfg, 5, &key(Key::Escape)),
            Some(DeckCommand::ToggleOverview)
        );
    }

    #[test]
    fn chorded_keys_and_disabled_keyboard_pass_through() {
        let cfg = DeckConfig::default();
        let chorded = InputEvent::Key {
            key: Key::ArrowRight,
            ctrl: true,
            alt: false,
            meta: false,
        };
        assert_eq!(map_input(&cfg, 5, &chorded), None);

        let no_keyboard = DeckConfig {
            keyboard: false,
            ..DeckConfig::default()
        };
        assert_eq!(map_input(&no_keyboard, 5, &key(Key::ArrowRight)), None);
    }

    #[test]
    fn click_requires_opt_in() {
        let cfg = DeckConfig::default();
        assert_eq!(map_input(&cfg, 5, &InputEvent::Click), None);
        let clicky = DeckConfig {
            click_to_advance: true,
            ..DeckConfig::default()
        };
        assert_eq!(map_input(&clicky, 5, &InputEvent::Click), Some(DeckCommand::Next));
    }

    #[test]
    fn swipe_threshold_and_axis_dominance() {
        let cfg = DeckConfig::default();
        let short = InputEvent::SwipeEnd { dx: -30.0, dy: 0.0 };
        assert_eq!(map_input(&cfg, 5, &short), None);
        let vertical = InputEvent::SwipeEnd { dx: -60.0, dy: 80.0 };
        assert_eq!(map_input(&cfg, 5, &vertical), None);
        let left = InputEvent::SwipeEnd { dx: -60.0, dy: 10.0 };
        assert_eq!(map_input(&cfg, 5, &left), Some(DeckCommand::Next));
        let right = InputEvent::SwipeEnd { dx: 60.0, dy: -10.0 };
        assert_eq!(map_input(&cfg, 5, &right), Some(DeckCommand::Prev));
    }
}
