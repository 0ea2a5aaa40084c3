//! Deck state snapshot.
//!
//! The live instance is owned exclusively by the deck and mutated only by
//! its navigation methods; collaborators (events, plugins, hosts) always
//! receive copies.

use serde::{Deserialize, Serialize};

/// Logical deck state.
///
/// Invariants: `current_slide < total_slides` (unless `total_slides == 0`);
/// `current_fragment` is `-1` ("nothing revealed yet") up to
/// `fragment_count - 1` of the current slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub current_slide: usize,
    pub current_fragment: isize,
    pub total_slides: usize,
    pub is_overview: bool,
    pub is_paused: bool,
}

impl DeckState {
    pub fn new(total_slides: usize) -> Self {
        Self {
            current_slide: 0,
            current_fragment: -1,
            total_slides,
            is_overview: false,
            is_paused: false,
        }
    }
}

/// Clamp a requested index into the addressable range. A zero-slide deck
/// pins everything to 0.
#[inline]
pub(crate) fn clamp_index(index: usize, total_slides: usize) -> usize {
    if total_slides == 0 {
        0
    } else {
        index.min(total_slides - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_to_valid_range() {
        assert_eq!(clamp_index(0, 5), 0);
        assert_eq!(clamp_index(4, 5), 4);
        assert_eq!(clamp_index(99, 5), 4);
        assert_eq!(clamp_index(3, 0), 0);
    }
}
