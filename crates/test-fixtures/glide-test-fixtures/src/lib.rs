//! Shared deck fixtures for integration tests and benches.
//!
//! Builders for the common shapes (plain decks, fragment decks), the
//! embedded `conference` deck, and a manifest-driven loader for the JSON
//! files under `fixtures/`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use glide_deck_core::{
    DeckConfig, DeckDefinition, FragmentDef, FragmentKind, SlideDef, TransitionKind,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    decks: HashMap<String, String>,
}

static CONFERENCE: Lazy<DeckDefinition> =
    Lazy::new(|| load_deck("conference").expect("conference deck fixture should load"));

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

/// Load a deck definition by its manifest name.
pub fn load_deck(name: &str) -> Result<DeckDefinition> {
    let rel = MANIFEST
        .decks
        .get(name)
        .ok_or_else(|| anyhow!("unknown deck fixture {name:?}"))?;
    let path = fixtures_root().join(rel);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read deck fixture at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse deck fixture at {}", path.display()))
}

/// Five-slide deck with mixed fragment kinds, duplicate and negative order
/// keys, and a location hash pointing at slide 1.
pub fn conference_deck() -> DeckDefinition {
    CONFERENCE.clone()
}

/// A deck of `count` fragment-less slides.
pub fn plain_deck(count: usize) -> DeckDefinition {
    DeckDefinition::plain(count)
}

/// Three slides; the middle one carries three fragments whose definition
/// order disagrees with their reveal order.
pub fn three_slides() -> DeckDefinition {
    DeckDefinition {
        slides: vec![
            SlideDef::default(),
            SlideDef {
                fragments: vec![
                    FragmentDef {
                        order: 1,
                        animation: FragmentKind::FadeUp,
                    },
                    FragmentDef {
                        order: 0,
                        animation: FragmentKind::FadeIn,
                    },
                    FragmentDef {
                        order: 2,
                        animation: FragmentKind::Highlight,
                    },
                ],
            },
            SlideDef::default(),
        ],
        location_hash: None,
    }
}

/// Config with transitions disabled, for tests that only care about the
/// state machine.
pub fn instant_config() -> DeckConfig {
    DeckConfig {
        transition: TransitionKind::None,
        ..DeckConfig::default()
    }
}

/// Config with a short transition so tests can tick to completion quickly.
pub fn quick_config(transition: TransitionKind) -> DeckConfig {
    DeckConfig {
        transition,
        transition_speed_ms: 100,
        ..DeckConfig::default()
    }
}
