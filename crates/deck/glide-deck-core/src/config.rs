//! Deck configuration.
//!
//! Serde-friendly with per-field defaults so hosts can deserialize partial
//! configs; `DeckConfig::default()` matches an all-defaults deserialization.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::transition::TransitionKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeckConfig {
    /// Visual effect between slides.
    pub transition: TransitionKind,
    /// Transition duration in ms; must be > 0.
    pub transition_speed_ms: u32,
    /// Timing function for transitions.
    pub easing: Easing,
    /// Host toggle: map keyboard input to commands.
    pub keyboard: bool,
    /// Host toggle: map swipe input to commands.
    pub touch: bool,
    /// Host toggle: a plain click advances the deck.
    pub click_to_advance: bool,
    /// Persist the current slide as a `#/<index>` location hash.
    pub hash: bool,
    /// Auto-advance interval in ms; 0 disables.
    pub auto_slide_ms: u32,
    /// Wrap around at either end.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Initial slide when no valid location hash is supplied.
    pub start_slide: usize,
    /// Reduced-motion override: force every transition to `none`.
    /// Hosts forward their platform preference here.
    pub reduced_motion: bool,
    /// Enable the built-in progress tracker plugin.
    pub progress: bool,
    /// Enable the built-in slide-number tracker plugin.
    pub slide_number: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            transition: TransitionKind::Slide,
            transition_speed_ms: 500,
            easing: Easing::EaseInOut,
            keyboard: true,
            touch: true,
            click_to_advance: false,
            hash: true,
            auto_slide_ms: 0,
            looping: false,
            start_slide: 0,
            reduced_motion: false,
            progress: true,
            slide_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: DeckConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(cfg, DeckConfig::default());
        assert_eq!(cfg.transition, TransitionKind::Slide);
        assert_eq!(cfg.transition_speed_ms, 500);
        assert!(cfg.hash);
        assert!(!cfg.looping);
    }

    #[test]
    fn kebab_case_and_loop_rename() {
        let cfg: DeckConfig = serde_json::from_str(
            r#"{ "transition": "cube", "transition-speed-ms": 250, "loop": true }"#,
        )
        .expect("parse");
        assert_eq!(cfg.transition, TransitionKind::Cube);
        assert_eq!(cfg.transition_speed_ms, 250);
        assert!(cfg.looping);
    }
}
