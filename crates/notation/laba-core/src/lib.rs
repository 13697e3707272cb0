//! Laba core (host-agnostic)
//!
//! Compiles the Laba animation notation into eased property transitions
//! and drives them from host-supplied timestamps. This crate holds the
//! parser, the operator registry, the easing table, pipe/loop planning,
//! the tick-driven animator, the describer and a small host-side stage.
//! Rendering stays with the host behind [`AnimationTarget`].

pub mod action;
pub mod animation;
pub mod clock;
pub mod config;
pub mod describe;
pub mod engine;
pub mod error;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod parser;
pub mod plan;
pub mod registry;
pub mod stage;
pub mod target;
pub mod timer;

// Re-exports for consumers (adapters)
pub use action::{Action, ActionGrid};
pub use animation::{Animation, AnimationStatus, Completion};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use engine::Engine;
pub use error::{ConfigError, ParseError, StageError};
pub use ids::{AnimationId, IdAllocator, TargetId};
pub use interp::{Easing, EasingTable, EASING_COUNT};
pub use outputs::{Change, CoreEvent, EventKind, GroupEvent, Outputs};
pub use parser::Parser;
pub use plan::{split_groups, LoopCount, PipePlan, SegmentPlan};
pub use registry::{LoopMode, Operator, OperatorRegistry};
pub use stage::{PlaybackCfg, Stage};
pub use target::{AnimationTarget, Channel, TargetState};
pub use timer::{Timer, TimerState, TimerTick};
