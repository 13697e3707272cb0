//! Easing table and interpolation helpers.
//!
//! The table order is part of the notation: `e<N>` selects entry `N`.

pub mod functions;

use serde::{Deserialize, Serialize};

/// Number of entries addressable through `e<N>`.
pub const EASING_COUNT: usize = 22;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
}

impl Easing {
    /// All easings in notation index order.
    pub const ALL: [Easing; EASING_COUNT] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
    ];

    /// Remap normalized progress.
    pub fn apply(self, t: f64) -> f64 {
        use functions as f;
        match self {
            Easing::Linear => f::linear(t),
            Easing::InQuad => f::in_quad(t),
            Easing::OutQuad => f::out_quad(t),
            Easing::InOutQuad => f::in_out_quad(t),
            Easing::InCubic => f::in_cubic(t),
            Easing::OutCubic => f::out_cubic(t),
            Easing::InOutCubic => f::in_out_cubic(t),
            Easing::InQuart => f::in_quart(t),
            Easing::OutQuart => f::out_quart(t),
            Easing::InOutQuart => f::in_out_quart(t),
            Easing::InQuint => f::in_quint(t),
            Easing::OutQuint => f::out_quint(t),
            Easing::InOutQuint => f::in_out_quint(t),
            Easing::InSine => f::in_sine(t),
            Easing::OutSine => f::out_sine(t),
            Easing::InOutSine => f::in_out_sine(t),
            Easing::InExpo => f::in_expo(t),
            Easing::OutExpo => f::out_expo(t),
            Easing::InOutExpo => f::in_out_expo(t),
            Easing::InCirc => f::in_circ(t),
            Easing::OutCirc => f::out_circ(t),
            Easing::InOutCirc => f::in_out_circ(t),
        }
    }

    /// Human-readable name used by the describer.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "ease linear",
            Easing::InQuad => "ease in quad",
            Easing::OutQuad => "ease out quad",
            Easing::InOutQuad => "ease in/out quad",
            Easing::InCubic => "ease in cubic",
            Easing::OutCubic => "ease out cubic",
            Easing::InOutCubic => "ease in/out cubic",
            Easing::InQuart => "ease in quart",
            Easing::OutQuart => "ease out quart",
            Easing::InOutQuart => "ease in/out quart",
            Easing::InQuint => "ease in quint",
            Easing::OutQuint => "ease out quint",
            Easing::InOutQuint => "ease in/out quint",
            Easing::InSine => "ease in sine",
            Easing::OutSine => "ease out sine",
            Easing::InOutSine => "ease in/out sine",
            Easing::InExpo => "ease in expo",
            Easing::OutExpo => "ease out expo",
            Easing::InOutExpo => "ease in/out expo",
            Easing::InCirc => "ease in circ",
            Easing::OutCirc => "ease out circ",
            Easing::InOutCirc => "ease in/out circ",
        }
    }
}

/// Ordered, immutable easing lookup handed to the parser.
#[derive(Debug, Clone)]
pub struct EasingTable {
    entries: Vec<Easing>,
}

impl Default for EasingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EasingTable {
    pub fn new() -> Self {
        Self {
            entries: Easing::ALL.to_vec(),
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Easing> {
        self.entries.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Easing> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_easing_hits_both_endpoints() {
        for easing in Easing::ALL {
            let start = easing.apply(0.0);
            let end = easing.apply(1.0);
            assert!(start.abs() < 1e-3, "{:?} at 0 gave {start}", easing);
            assert!((end - 1.0).abs() < 1e-3, "{:?} at 1 gave {end}", easing);
        }
    }

    #[test]
    fn default_index_is_in_out_quad() {
        let table = EasingTable::new();
        assert_eq!(table.len(), EASING_COUNT);
        assert_eq!(table.get(3), Some(Easing::InOutQuad));
        assert_eq!(table.get(EASING_COUNT), None);
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        for easing in [
            Easing::InOutQuad,
            Easing::InOutCubic,
            Easing::InOutQuart,
            Easing::InOutQuint,
            Easing::InOutSine,
            Easing::InOutExpo,
            Easing::InOutCirc,
        ] {
            let mid = easing.apply(0.5);
            assert!((mid - 0.5).abs() < 1e-9, "{:?} at 0.5 gave {mid}", easing);
        }
    }

    #[test]
    fn ease_in_lags_linear() {
        assert!(Easing::InQuad.apply(0.25) < 0.25);
        assert!(Easing::OutQuad.apply(0.25) > 0.25);
    }
}
