//! Deck definition: what the host discovered before constructing the deck.
//!
//! Slides and fragments are index-addressed and immutable in count for the
//! deck's lifetime; the core never inserts or removes them.

use serde::{Deserialize, Serialize};

use crate::fragment::FragmentKind;

/// A fragment as authored: explicit ordering key (default 0) and animation
/// kind (default fade-in).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FragmentDef {
    pub order: i32,
    pub animation: FragmentKind,
}

/// One slide with its fragments in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SlideDef {
    pub fragments: Vec<FragmentDef>,
}

/// Everything the host hands over at construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeckDefinition {
    pub slides: Vec<SlideDef>,
    /// Location hash present at load time, if any (`#/<index>`).
    pub location_hash: Option<String>,
}

impl DeckDefinition {
    /// Fragment-free deck with `count` slides.
    pub fn plain(count: usize) -> Self {
        Self {
            slides: vec![SlideDef::default(); count],
            location_hash: None,
        }
    }

    /// Parse a serialized definition, as produced by a host's discovery
    /// pass.
    pub fn from_json(json: &str) -> Result<Self, crate::error::DeckError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_json_defaults() {
        let def = DeckDefinition::from_json(
            r#"{ "slides": [ {}, { "fragments": [ { "animation": "grow" }, { "order": -1 } ] } ] }"#,
        )
        .expect("parse");
        assert_eq!(def.slides.len(), 2);
        let frags = &def.slides[1].fragments;
        assert_eq!(frags[0].order, 0);
        assert_eq!(frags[0].animation, FragmentKind::Grow);
        assert_eq!(frags[1].order, -1);
        assert_eq!(frags[1].animation, FragmentKind::FadeIn);
        assert_eq!(def.location_hash, None);
    }
}
