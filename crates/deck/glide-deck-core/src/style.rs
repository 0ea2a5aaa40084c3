//! Visual vocabulary shared by the stage, the timeline and the keyframe
//! tables: animatable float properties, sparse keyframes, boolean markers
//! and transform origins.
//!
//! The core never renders; property units are a contract with the host
//! (documented per variant) the same way canonical target paths are a
//! contract in an animation engine.

use serde::{Deserialize, Serialize};

/// Animatable per-element properties. All values are plain floats; the host
/// owns unit rendering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProp {
    /// 0..1, default 1.
    Opacity,
    /// Horizontal slide translation in percent of slide width, default 0.
    TranslateX,
    /// Fragment offset in px, default 0.
    OffsetX,
    /// Fragment offset in px, default 0.
    OffsetY,
    /// Uniform scale factor, default 1.
    Scale,
    /// Rotation around the vertical axis in degrees, default 0.
    RotateY,
    /// Depth translation in vw, default 0.
    TranslateZ,
    /// Highlight background alpha 0..1, default 0.
    Highlight,
    /// Perspective distance in px on the container, default 0 (none).
    Perspective,
}

impl StyleProp {
    pub(crate) const COUNT: usize = 9;

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            StyleProp::Opacity => 0,
            StyleProp::TranslateX => 1,
            StyleProp::OffsetX => 2,
            StyleProp::OffsetY => 3,
            StyleProp::Scale => 4,
            StyleProp::RotateY => 5,
            StyleProp::TranslateZ => 6,
            StyleProp::Highlight => 7,
            StyleProp::Perspective => 8,
        }
    }

    /// Identity value of the property (the "no effect" state).
    #[inline]
    pub fn default_value(self) -> f32 {
        match self {
            StyleProp::Opacity | StyleProp::Scale => 1.0,
            _ => 0.0,
        }
    }
}

/// Boolean per-element markers mirrored by the host as CSS classes or
/// attributes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    /// The slide currently shown.
    Active,
    /// Slides before the active one.
    Past,
    /// Slides after the active one.
    Future,
    /// A revealed fragment.
    FragmentVisible,
    /// Overview grid open (container only).
    Overview,
    /// Accessibility: hidden from assistive tech.
    AriaHidden,
    /// Element accepts input (pointer-events).
    Interactive,
}

impl Marker {
    pub(crate) const COUNT: usize = 7;

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Marker::Active => 0,
            Marker::Past => 1,
            Marker::Future => 2,
            Marker::FragmentVisible => 3,
            Marker::Overview => 4,
            Marker::AriaHidden => 5,
            Marker::Interactive => 6,
        }
    }
}

/// Transform origin for rotation-based transitions.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    #[default]
    Center,
    LeftCenter,
    RightCenter,
}

/// A sparse set of property values, the `from`/`to` sides of one keyframe
/// interpolation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe(Vec<(StyleProp, f32)>);

impl Keyframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing entry for the same property.
    pub fn with(mut self, prop: StyleProp, value: f32) -> Self {
        self.set(prop, value);
        self
    }

    pub fn set(&mut self, prop: StyleProp, value: f32) {
        if let Some(entry) = self.0.iter_mut().find(|(p, _)| *p == prop) {
            entry.1 = value;
        } else {
            self.0.push((prop, value));
        }
    }

    pub fn get(&self, prop: StyleProp) -> Option<f32> {
        self.0
            .iter()
            .find_map(|(p, v)| if *p == prop { Some(*v) } else { None })
    }

    pub fn props(&self) -> impl Iterator<Item = (StyleProp, f32)> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with(StyleProp::Opacity, value)
    }

    pub fn translate_x(self, value: f32) -> Self {
        self.with(StyleProp::TranslateX, value)
    }

    pub fn offset_x(self, value: f32) -> Self {
        self.with(StyleProp::OffsetX, value)
    }

    pub fn offset_y(self, value: f32) -> Self {
        self.with(StyleProp::OffsetY, value)
    }

    pub fn scale(self, value: f32) -> Self {
        self.with(StyleProp::Scale, value)
    }

    pub fn rotate_y(self, value: f32) -> Self {
        self.with(StyleProp::RotateY, value)
    }

    pub fn translate_z(self, value: f32) -> Self {
        self.with(StyleProp::TranslateZ, value)
    }

    pub fn highlight(self, value: f32) -> Self {
        self.with(StyleProp::Highlight, value)
    }
}

/// Linear interpolation of scalars.
#[inline]
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
