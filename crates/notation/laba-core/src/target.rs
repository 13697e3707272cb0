//! Host capability interface.
//!
//! The core never touches a rendering element directly. Hosts implement
//! [`AnimationTarget`] for whatever owns the animatable state; the
//! provided [`TargetState`] is a plain caller-owned record that hosts can
//! commit to screen however they like.

use serde::{Deserialize, Serialize};

/// Property channels the operators write to. Rotations are in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    TranslationX,
    TranslationY,
    TranslationZ,
    RotationX,
    RotationY,
    RotationZ,
    Scale,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 8] = [
        Channel::TranslationX,
        Channel::TranslationY,
        Channel::TranslationZ,
        Channel::RotationX,
        Channel::RotationY,
        Channel::RotationZ,
        Channel::Scale,
        Channel::Alpha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::TranslationX => "translationX",
            Channel::TranslationY => "translationY",
            Channel::TranslationZ => "translationZ",
            Channel::RotationX => "rotationX",
            Channel::RotationY => "rotationY",
            Channel::RotationZ => "rotationZ",
            Channel::Scale => "scale",
            Channel::Alpha => "alpha",
        }
    }
}

/// Trait implemented by hosts (DOM, engine entity, test double) and passed
/// into parsing, describing and every animation tick.
pub trait AnimationTarget {
    fn get(&self, channel: Channel) -> f64;
    fn set(&mut self, channel: Channel, value: f64);
    /// Measured (width, height) used as the default distance of `< > ^ v`.
    fn measure(&self) -> (f64, f64);
    /// Position among siblings; multiplies the `D` stagger.
    fn sibling_index(&self) -> usize;
}

/// Caller-owned animation state for one target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetState {
    pub translation: [f64; 3],
    /// Degrees around (x, y, z).
    pub rotation: [f64; 3],
    pub scale: f64,
    pub alpha: f64,
    pub width: f64,
    pub height: f64,
    pub sibling_index: usize,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: 1.0,
            alpha: 1.0,
            width: 0.0,
            height: 0.0,
            sibling_index: 0,
        }
    }
}

impl TargetState {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_sibling_index(mut self, index: usize) -> Self {
        self.sibling_index = index;
        self
    }

    /// Restore identity transform, full scale and full opacity; size and
    /// sibling index are kept.
    pub fn reset(&mut self) {
        self.translation = [0.0; 3];
        self.rotation = [0.0; 3];
        self.scale = 1.0;
        self.alpha = 1.0;
    }
}

impl AnimationTarget for TargetState {
    fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::TranslationX => self.translation[0],
            Channel::TranslationY => self.translation[1],
            Channel::TranslationZ => self.translation[2],
            Channel::RotationX => self.rotation[0],
            Channel::RotationY => self.rotation[1],
            Channel::RotationZ => self.rotation[2],
            Channel::Scale => self.scale,
            Channel::Alpha => self.alpha,
        }
    }

    fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::TranslationX => self.translation[0] = value,
            Channel::TranslationY => self.translation[1] = value,
            Channel::TranslationZ => self.translation[2] = value,
            Channel::RotationX => self.rotation[0] = value,
            Channel::RotationY => self.rotation[1] = value,
            Channel::RotationZ => self.rotation[2] = value,
            Channel::Scale => self.scale = value,
            Channel::Alpha => self.alpha = value,
        }
    }

    fn measure(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn sibling_index(&self) -> usize {
        self.sibling_index
    }
}
