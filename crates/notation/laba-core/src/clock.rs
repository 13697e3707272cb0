//! Time sources for hosts that poll the core.
//!
//! Timestamps are monotonic seconds. The core only ever receives `now`;
//! these helpers exist so hosts and tests do not each reinvent one.

use std::cell::Cell;
use std::time::Instant;

pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from construction. Not usable on wasm32, where
/// hosts pass `performance.now()` instead.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for deterministic stepping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) -> f64 {
        let next = self.now.get() + dt;
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
