//! Natural-language rendering of notation.
//!
//! Walks the same grid and plan the animator uses, so the durations and
//! loop counts it reports are the ones that will actually run.

use std::fmt::Write as _;

use crate::action::ActionGrid;
use crate::plan::{LoopCount, SegmentPlan};
use crate::target::AnimationTarget;

pub const NOTHING: &str = "do nothing";
const BRACKET_PREAMBLE: &str = "Perform a series of animations at the same time.\n";
const PIPE_JOIN: &str = " Once complete then ";

/// Round to at most four decimals and print without trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Normalize -0.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Append the description of one segment (all pipes of one group).
pub fn describe_segment(
    grid: &mut ActionGrid,
    plan: &SegmentPlan,
    target: &dyn AnimationTarget,
    out: &mut String,
) {
    for (i, step) in plan.pipes.iter().enumerate() {
        if i > 0 {
            out.push_str(PIPE_JOIN);
        }
        let before = out.len();
        if let Some(actions) = grid.pipe_mut(step.index) {
            for action in actions.iter_mut() {
                action.init(target);
            }
        }
        let easing = grid
            .pipe(step.index)
            .and_then(|actions| actions.first())
            .map(|a| a.easing());
        if let Some(actions) = grid.pipe(step.index) {
            for action in actions {
                action.describe(out);
            }
        }

        let _ = match step.loops {
            LoopCount::Finite(n) if n > 1 => {
                write!(out, " {} repeating {} times, ", step.mode.as_str(), n)
            }
            LoopCount::Infinite => write!(out, " {} repeating forever, ", step.mode.as_str()),
            LoopCount::Finite(_) => Ok(()),
        };

        let duration = fmt_num(step.duration);
        if out.len() != before {
            if let Some(easing) = easing {
                out.push(' ');
                out.push_str(easing.name());
            }
            if step.duration == 0.0 {
                out.push_str(" instantly.");
            } else {
                let _ = write!(out, " over {duration} seconds.");
            }
        } else {
            let _ = write!(out, " wait for {duration} seconds.");
        }
    }
}

/// Wrap per-group descriptions the way bracket notation reads.
///
/// Groups that describe nothing are left out of the numbering. Returns an
/// empty string when no group is left.
pub fn describe_groups(groups: &[String]) -> String {
    let mut texts = groups.iter().filter(|text| !text.trim().is_empty()).peekable();
    if texts.peek().is_none() {
        return String::new();
    }
    let mut out = String::from(BRACKET_PREAMBLE);
    for (i, text) in texts.enumerate() {
        let _ = writeln!(out, "Animation #{} will {}", i + 1, text);
    }
    out
}

/// Collapse runs of spaces, trim, and capitalize the first letter.
pub fn finalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_space = false;
    for c in raw.chars() {
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }
    let trimmed = out.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => NOTHING.to_string(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
