//! Resolved actions and the bounded pipe grid the parser fills.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ParseError;
use crate::interp::{functions::lerp, Easing};
use crate::registry::Operator;
use crate::target::AnimationTarget;

/// One operator occurrence with its value resolved against a target.
///
/// Only `from`/`to` change after construction, by calling [`Action::init`]
/// again before a pipe (re)starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    op: Operator,
    inverse: bool,
    literal: Option<f64>,
    value: f64,
    from: f64,
    to: f64,
    easing: Easing,
}

impl Action {
    /// Substitute the operator default for a missing literal, then `init`.
    pub fn new(
        op: Operator,
        inverse: bool,
        literal: Option<f64>,
        easing: Easing,
        target: &dyn AnimationTarget,
        cfg: &Config,
    ) -> Self {
        let value = literal.unwrap_or_else(|| op.default_value(target, cfg));
        let mut action = Self {
            op,
            inverse,
            literal,
            value,
            from: 0.0,
            to: 0.0,
            easing,
        };
        action.init(target);
        action
    }

    /// Filler pipe inserted by `,`.
    pub(crate) fn pause(duration: f64, easing: Easing) -> Self {
        Self {
            op: Operator::Duration,
            inverse: false,
            literal: Some(duration),
            value: duration,
            from: duration,
            to: duration,
            easing,
        }
    }

    /// Re-resolve `from`/`to` from the target's live state.
    pub fn init(&mut self, target: &dyn AnimationTarget) {
        let (from, to) = self.op.init(self.inverse, self.value, target);
        self.from = from;
        self.to = to;
    }

    /// Write the eased value for `progress` in [0, 1]. Timing pseudo-actions do nothing.
    pub fn perform(&self, target: &mut dyn AnimationTarget, progress: f64) {
        if let Some(channel) = self.op.channel() {
            target.set(channel, lerp(self.from, self.to, self.easing.apply(progress)));
        }
    }

    pub fn describe(&self, out: &mut String) {
        self.op.describe(self, out);
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.op
    }

    #[inline]
    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    #[inline]
    pub fn literal(&self) -> Option<f64> {
        self.literal
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> f64 {
        self.to
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }
}

/// Actions indexed `[pipe][action]`, packed from index 0 in both axes
/// except where `|` leaves a pipe empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionGrid {
    pipes: Vec<Vec<Action>>,
    max_pipes: usize,
    max_actions: usize,
}

impl ActionGrid {
    pub fn with_capacity(max_pipes: usize, max_actions: usize) -> Self {
        Self {
            pipes: Vec::new(),
            max_pipes,
            max_actions,
        }
    }

    /// Store `action` at `[pipe][len]`. The caller tracks the action index;
    /// it must equal the current pipe length.
    pub fn push(&mut self, pipe: usize, action: Action) -> Result<(), ParseError> {
        let slot = self.pipes.get(pipe).map_or(0, Vec::len);
        if pipe >= self.max_pipes || slot >= self.max_actions {
            return Err(ParseError::CapacityExceeded {
                pipe,
                action: slot,
                max_pipes: self.max_pipes,
                max_actions: self.max_actions,
            });
        }
        if self.pipes.len() <= pipe {
            self.pipes.resize_with(pipe + 1, Vec::new);
        }
        self.pipes[pipe].push(action);
        Ok(())
    }

    /// Number of pipe slots touched, active or not.
    #[inline]
    pub fn pipe_slots(&self) -> usize {
        self.pipes.len()
    }

    pub fn pipe(&self, index: usize) -> Option<&[Action]> {
        self.pipes.get(index).map(Vec::as_slice)
    }

    pub fn pipe_mut(&mut self, index: usize) -> Option<&mut [Action]> {
        self.pipes.get_mut(index).map(Vec::as_mut_slice)
    }

    /// Indices of pipes holding at least one action, in order.
    pub fn active_pipes(&self) -> impl Iterator<Item = usize> + '_ {
        self.pipes
            .iter()
            .enumerate()
            .filter(|(_, actions)| !actions.is_empty())
            .map(|(i, _)| i)
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.iter().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> + '_ {
        self.pipes.iter().flatten()
    }
}
