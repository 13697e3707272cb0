//! Per-pipe duration and loop resolution, plus bracket-group splitting.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::action::ActionGrid;
use crate::config::Config;
use crate::registry::LoopMode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopCount {
    Finite(u32),
    Infinite,
}

impl LoopCount {
    /// Negative means forever, anything up to 1 plays once, the rest truncates.
    pub fn from_value(value: f64) -> Self {
        if value < 0.0 {
            LoopCount::Infinite
        } else if value <= 1.0 {
            LoopCount::Finite(1)
        } else {
            LoopCount::Finite(value.trunc().min(u32::MAX as f64) as u32)
        }
    }

    #[inline]
    pub fn repeats(self) -> bool {
        !matches!(self, LoopCount::Finite(1))
    }
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipePlan {
    /// Index into the grid.
    pub index: usize,
    /// Seconds, already multiplied by `time_scale`.
    pub duration: f64,
    pub loops: LoopCount,
    pub mode: LoopMode,
}

impl PipePlan {
    #[inline]
    pub fn is_relative(&self) -> bool {
        self.mode == LoopMode::Relative
    }
}

/// Ordered plans for the active pipes of one segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentPlan {
    pub pipes: Vec<PipePlan>,
}

impl SegmentPlan {
    pub fn from_grid(grid: &ActionGrid, cfg: &Config) -> Self {
        let pipes = grid
            .active_pipes()
            .filter_map(|index| grid.pipe(index).map(|actions| (index, actions)))
            .map(|(index, actions)| {
                let mut duration = cfg.default_duration;
                let mut loop_directive: Option<(f64, LoopMode)> = None;
                for action in actions {
                    let op = action.operator();
                    if op.is_duration() {
                        duration = action.from();
                    }
                    if let Some(mode) = op.loop_mode() {
                        if let Some((_, previous)) = loop_directive {
                            debug!(
                                "laba: pipe {} loop directive {} overrides {}",
                                index,
                                mode.as_str(),
                                previous.as_str()
                            );
                        }
                        loop_directive = Some((action.from(), mode));
                    }
                }
                let (loops, mode) = match loop_directive {
                    Some((value, mode)) => (LoopCount::from_value(value), mode),
                    None => (LoopCount::default(), LoopMode::Absolute),
                };
                PipePlan {
                    index,
                    duration: duration * cfg.time_scale,
                    loops,
                    mode,
                }
            })
            .collect();
        Self { pipes }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Wall time of one pass through every pipe; `None` when any pipe loops forever.
    pub fn total_duration(&self) -> Option<f64> {
        self.pipes.iter().try_fold(0.0, |acc, p| match p.loops {
            LoopCount::Finite(n) => Some(acc + p.duration * f64::from(n)),
            LoopCount::Infinite => None,
        })
    }
}

/// Split bracket notation into concurrent groups. Notation without `[` is a
/// single group; otherwise every `[` is dropped, the rest is cut at `]`, and
/// blank parts are discarded.
pub fn split_groups(notation: &str) -> Vec<String> {
    if !notation.contains('[') {
        return vec![notation.to_string()];
    }
    notation
        .replace('[', "")
        .split(']')
        .filter(|part| !part.trim().is_empty())
        .map(str::to_string)
        .collect()
}
