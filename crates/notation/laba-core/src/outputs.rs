//! Output contracts from the stage.
//!
//! Outputs carry the channel values written during this tick, keyed by
//! target and channel, and a separate list of semantic events. Adapters
//! (wasm, native hosts) apply changes to the host and transport events.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::{AnimationId, TargetId};
use crate::target::Channel;

/// Lifecycle signal from one bracket group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventKind {
    PipeStarted { pipe: usize, duration: f64 },
    PipeLooped { pipe: usize },
    PipeCompleted { pipe: usize },
    GroupCompleted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupEvent {
    pub group: usize,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    Group {
        animation: AnimationId,
        target: TargetId,
        event: GroupEvent,
    },
    AnimationCompleted {
        animation: AnimationId,
        target: TargetId,
    },
    /// A repeating playback routine restarted its main notation.
    PlaybackRestarted {
        animation: AnimationId,
        target: TargetId,
    },
}

/// One channel value written this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub target: TargetId,
    pub channel: Channel,
    pub value: f64,
}

/// Outputs returned by `Stage::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
    #[serde(skip)]
    index: HashMap<(TargetId, Channel), usize>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
        self.index.clear();
    }

    /// Record a write; a later write to the same target/channel replaces the earlier one.
    pub fn push_change(&mut self, change: Change) {
        let key = (change.target, change.channel);
        match self.index.get(&key) {
            Some(&slot) => self.changes[slot].value = change.value,
            None => {
                self.index.insert(key, self.changes.len());
                self.changes.push(change);
            }
        }
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
