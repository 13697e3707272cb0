//! Pure interpolation timer for one pipe activation.

use serde::{Deserialize, Serialize};

use crate::plan::LoopCount;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Running,
    Completed,
}

/// Result of one `advance`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimerTick {
    /// Progress in [0, 1).
    Progress(f64),
    /// An iteration ended and the timer restarted at `now`.
    Looped,
    /// Final iteration ended.
    Completed,
    /// Already completed earlier; nothing to do.
    Idle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    start: f64,
    end: f64,
    duration: f64,
    loops: LoopCount,
    state: TimerState,
}

impl Timer {
    pub fn start(now: f64, duration: f64, loops: LoopCount) -> Self {
        let duration = duration.max(0.0);
        Self {
            start: now,
            end: now + duration,
            duration,
            loops,
            state: TimerState::Running,
        }
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn remaining_loops(&self) -> LoopCount {
        self.loops
    }

    /// Normalized progress at `now`; 1 for zero-length timers, never negative.
    pub fn progress(&self, now: f64) -> f64 {
        if self.end == self.start {
            return 1.0;
        }
        ((now - self.start) / (self.end - self.start)).max(0.0)
    }

    pub fn advance(&mut self, now: f64) -> TimerTick {
        if self.state == TimerState::Completed {
            return TimerTick::Idle;
        }
        let progress = self.progress(now);
        if progress < 1.0 {
            return TimerTick::Progress(progress);
        }
        match self.loops {
            LoopCount::Infinite => {
                self.restart(now);
                TimerTick::Looped
            }
            LoopCount::Finite(n) if n > 1 => {
                self.loops = LoopCount::Finite(n - 1);
                self.restart(now);
                TimerTick::Looped
            }
            LoopCount::Finite(_) => {
                self.state = TimerState::Completed;
                TimerTick::Completed
            }
        }
    }

    fn restart(&mut self, now: f64) {
        self.start = now;
        self.end = now + self.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progresses_then_completes_once() {
        let mut t = Timer::start(10.0, 2.0, LoopCount::Finite(1));
        assert_eq!(t.advance(10.0), TimerTick::Progress(0.0));
        assert_eq!(t.advance(11.0), TimerTick::Progress(0.5));
        assert_eq!(t.advance(12.5), TimerTick::Completed);
        assert_eq!(t.state(), TimerState::Completed);
        assert_eq!(t.advance(13.0), TimerTick::Idle);
    }

    #[test]
    fn clock_before_start_clamps_to_zero() {
        let mut t = Timer::start(5.0, 1.0, LoopCount::Finite(1));
        assert_eq!(t.advance(4.0), TimerTick::Progress(0.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut t = Timer::start(1.0, 0.0, LoopCount::Finite(1));
        assert_eq!(t.advance(1.0), TimerTick::Completed);
    }

    #[test]
    fn finite_loops_restart_at_now() {
        let mut t = Timer::start(0.0, 1.0, LoopCount::Finite(3));
        assert_eq!(t.advance(1.5), TimerTick::Looped);
        assert_eq!(t.remaining_loops(), LoopCount::Finite(2));
        assert_eq!(t.advance(2.0), TimerTick::Progress(0.5));
        assert_eq!(t.advance(2.5), TimerTick::Looped);
        assert_eq!(t.advance(3.5), TimerTick::Completed);
    }

    #[test]
    fn infinite_loops_never_complete() {
        let mut t = Timer::start(0.0, 1.0, LoopCount::Infinite);
        for i in 1..50 {
            assert_eq!(t.advance(i as f64), TimerTick::Looped);
        }
    }
}
