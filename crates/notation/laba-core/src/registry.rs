//! Operator registry: the closed set of notation operators and their
//! init / perform / describe behavior.
//!
//! Dispatch is an exhaustive `match` on [`Operator`]; the
//! [`OperatorRegistry`] only maps ASCII bytes to operators and is built
//! once per [`Engine`](crate::Engine).

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::Config;
use crate::describe::fmt_num;
use crate::target::{AnimationTarget, Channel};

/// Pseudo-operators handled inline by the parser.
pub const INVERT: u8 = b'!';
pub const PIPE: u8 = b'|';
pub const PAUSE: u8 = b',';
pub const EASING: u8 = b'e';

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `x` move to x position
    PositionX,
    /// `y` move to y position
    PositionY,
    /// `z` move to z position
    PositionZ,
    /// `<`
    MoveLeft,
    /// `>`
    MoveRight,
    /// `^`
    MoveUp,
    /// `v`
    MoveDown,
    /// `s` uniform scale
    Scale,
    /// `r` rotation around z
    Roll,
    /// `p` rotation around x
    Pitch,
    /// `w` rotation around y
    Yaw,
    /// `f` alpha
    Fade,
    /// `d` pipe duration
    Duration,
    /// `D` duration multiplied by the target's sibling index
    StaggeredDuration,
    /// `L` loop without re-initializing between iterations
    LoopAbsolute,
    /// `l` loop, re-initializing from live state on every restart
    LoopRelative,
}

/// How a pipe repeats, as requested by its last loop directive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    Absolute,
    Relative,
}

impl LoopMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LoopMode::Absolute => "absolute",
            LoopMode::Relative => "relative",
        }
    }
}

impl Operator {
    pub const ALL: [Operator; 16] = [
        Operator::PositionX,
        Operator::PositionY,
        Operator::PositionZ,
        Operator::MoveLeft,
        Operator::MoveRight,
        Operator::MoveUp,
        Operator::MoveDown,
        Operator::Scale,
        Operator::Roll,
        Operator::Pitch,
        Operator::Yaw,
        Operator::Fade,
        Operator::Duration,
        Operator::StaggeredDuration,
        Operator::LoopAbsolute,
        Operator::LoopRelative,
    ];

    pub fn symbol(self) -> u8 {
        match self {
            Operator::PositionX => b'x',
            Operator::PositionY => b'y',
            Operator::PositionZ => b'z',
            Operator::MoveLeft => b'<',
            Operator::MoveRight => b'>',
            Operator::MoveUp => b'^',
            Operator::MoveDown => b'v',
            Operator::Scale => b's',
            Operator::Roll => b'r',
            Operator::Pitch => b'p',
            Operator::Yaw => b'w',
            Operator::Fade => b'f',
            Operator::Duration => b'd',
            Operator::StaggeredDuration => b'D',
            Operator::LoopAbsolute => b'L',
            Operator::LoopRelative => b'l',
        }
    }

    /// Channel written by `perform`; `None` for the timing pseudo-actions.
    pub fn channel(self) -> Option<Channel> {
        match self {
            Operator::PositionX | Operator::MoveLeft | Operator::MoveRight => {
                Some(Channel::TranslationX)
            }
            Operator::PositionY | Operator::MoveUp | Operator::MoveDown => {
                Some(Channel::TranslationY)
            }
            Operator::PositionZ => Some(Channel::TranslationZ),
            Operator::Scale => Some(Channel::Scale),
            Operator::Roll => Some(Channel::RotationZ),
            Operator::Pitch => Some(Channel::RotationX),
            Operator::Yaw => Some(Channel::RotationY),
            Operator::Fade => Some(Channel::Alpha),
            Operator::Duration
            | Operator::StaggeredDuration
            | Operator::LoopAbsolute
            | Operator::LoopRelative => None,
        }
    }

    #[inline]
    pub fn is_duration(self) -> bool {
        matches!(self, Operator::Duration | Operator::StaggeredDuration)
    }

    #[inline]
    pub fn loop_mode(self) -> Option<LoopMode> {
        match self {
            Operator::LoopAbsolute => Some(LoopMode::Absolute),
            Operator::LoopRelative => Some(LoopMode::Relative),
            _ => None,
        }
    }

    /// Value used when the notation gives no literal.
    pub fn default_value(self, target: &dyn AnimationTarget, cfg: &Config) -> f64 {
        match self {
            Operator::PositionX
            | Operator::PositionY
            | Operator::PositionZ
            | Operator::Roll
            | Operator::Pitch
            | Operator::Yaw => 0.0,
            Operator::MoveLeft | Operator::MoveRight => target.measure().0,
            Operator::MoveUp | Operator::MoveDown => target.measure().1,
            Operator::Scale | Operator::Fade => 1.0,
            Operator::Duration | Operator::StaggeredDuration => cfg.default_duration,
            Operator::LoopAbsolute | Operator::LoopRelative => -1.0,
        }
    }

    /// Resolve (from, to) against the target's live state.
    pub fn init(self, inverse: bool, value: f64, target: &dyn AnimationTarget) -> (f64, f64) {
        let current = self.channel().map(|ch| target.get(ch)).unwrap_or(0.0);
        match self {
            Operator::PositionX | Operator::PositionY | Operator::PositionZ => {
                if inverse {
                    (value, current)
                } else {
                    (current, value)
                }
            }
            // Screen space: left/up/rotation decrease the channel, right/down increase it.
            Operator::MoveLeft
            | Operator::MoveUp
            | Operator::Roll
            | Operator::Pitch
            | Operator::Yaw => {
                if inverse {
                    (current + value, current)
                } else {
                    (current, current - value)
                }
            }
            Operator::MoveRight | Operator::MoveDown => {
                if inverse {
                    (current - value, current)
                } else {
                    (current, current + value)
                }
            }
            Operator::Scale | Operator::Fade => {
                if inverse {
                    (if value > 0.5 { 0.0 } else { 1.0 }, value)
                } else {
                    (current, value)
                }
            }
            Operator::StaggeredDuration => {
                let staggered = value * target.sibling_index() as f64;
                (staggered, staggered)
            }
            Operator::Duration | Operator::LoopAbsolute | Operator::LoopRelative => (value, value),
        }
    }

    /// Append this action's natural-language clause.
    pub fn describe(self, action: &Action, out: &mut String) {
        let v = fmt_num(action.value());
        let inverse = action.is_inverse();
        // Writing into a String cannot fail.
        let _ = match self {
            Operator::PositionX | Operator::PositionY | Operator::PositionZ => {
                let axis = match self {
                    Operator::PositionX => "x",
                    Operator::PositionY => "y",
                    _ => "z",
                };
                if inverse {
                    write!(out, "move from {v} {axis} pos, ")
                } else {
                    write!(out, "move to {v} {axis} pos, ")
                }
            }
            Operator::MoveLeft => {
                if inverse {
                    write!(out, "move in from right {v} units, ")
                } else {
                    write!(out, "move left {v} units, ")
                }
            }
            Operator::MoveRight => {
                if inverse {
                    write!(out, "move in from left {v} units, ")
                } else {
                    write!(out, "move right {v} units, ")
                }
            }
            Operator::MoveUp => {
                if inverse {
                    write!(out, "move in from below {v} units, ")
                } else {
                    write!(out, "move up {v} units, ")
                }
            }
            Operator::MoveDown => {
                if inverse {
                    write!(out, "move in from above {v} units, ")
                } else {
                    write!(out, "move down {v} units, ")
                }
            }
            Operator::Scale => {
                let pct = fmt_num(action.value() * 100.0);
                if inverse {
                    write!(out, "scale in from {pct}%, ")
                } else {
                    write!(out, "scale to {pct}%, ")
                }
            }
            Operator::Roll | Operator::Pitch | Operator::Yaw => {
                let axis = match self {
                    Operator::Roll => "z",
                    Operator::Pitch => "x",
                    _ => "y",
                };
                if inverse {
                    write!(out, "rotate in from around {axis} by {v}, ")
                } else {
                    write!(out, "rotate around {axis} by {v}, ")
                }
            }
            Operator::Fade => {
                if inverse {
                    write!(
                        out,
                        "fade from {}% to {}%, ",
                        fmt_num(action.from() * 100.0),
                        fmt_num(action.to() * 100.0)
                    )
                } else {
                    write!(out, "fade to {}%, ", fmt_num(action.value() * 100.0))
                }
            }
            Operator::Duration
            | Operator::StaggeredDuration
            | Operator::LoopAbsolute
            | Operator::LoopRelative => Ok(()),
        };
    }
}

/// Immutable byte -> operator table.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    table: [Option<Operator>; 128],
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorRegistry {
    pub fn new() -> Self {
        let mut table = [None; 128];
        for op in Operator::ALL {
            table[op.symbol() as usize] = Some(op);
        }
        Self { table }
    }

    #[inline]
    pub fn lookup(&self, c: u8) -> Option<Operator> {
        self.table.get(c as usize).copied().flatten()
    }

    /// Registered operators plus the inline pseudo-operators.
    #[inline]
    pub fn is_operator(&self, c: u8) -> bool {
        matches!(c, INVERT | PIPE | PAUSE | EASING) || self.lookup(c).is_some()
    }

    #[inline]
    pub fn is_number(c: u8) -> bool {
        c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.')
    }
}
