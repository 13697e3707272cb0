//! Tick-driven execution of parsed notation.
//!
//! Each bracket group gets a `GroupRunner`: an explicit list of pipe steps
//! consumed in order, one [`Timer`] at a time. An [`Animation`] owns one
//! runner per group and ticks them in declaration order.

use std::fmt;

use log::{debug, trace};

use crate::action::ActionGrid;
use crate::outputs::{EventKind, GroupEvent};
use crate::plan::{PipePlan, SegmentPlan};
use crate::target::AnimationTarget;
use crate::timer::{Timer, TimerTick};

/// Invoked once when the first bracket group finishes.
pub type Completion = Box<dyn FnOnce()>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

fn init_pipe(grid: &mut ActionGrid, pipe: usize, target: &dyn AnimationTarget) {
    if let Some(actions) = grid.pipe_mut(pipe) {
        for action in actions {
            action.init(target);
        }
    }
}

fn perform_pipe(grid: &ActionGrid, pipe: usize, target: &mut dyn AnimationTarget, progress: f64) {
    if let Some(actions) = grid.pipe(pipe) {
        for action in actions {
            action.perform(target, progress);
        }
    }
}

/// Sequential executor for the pipes of one group.
struct GroupRunner {
    group: usize,
    grid: ActionGrid,
    steps: Vec<PipePlan>,
    cursor: usize,
    timer: Option<Timer>,
    on_complete: Option<Completion>,
    finished: bool,
}

impl GroupRunner {
    fn new(
        group: usize,
        grid: ActionGrid,
        plan: SegmentPlan,
        on_complete: Option<Completion>,
    ) -> Self {
        Self {
            group,
            grid,
            steps: plan.pipes,
            cursor: 0,
            timer: None,
            on_complete,
            finished: false,
        }
    }

    fn emit(&self, events: &mut Vec<GroupEvent>, kind: EventKind) {
        events.push(GroupEvent {
            group: self.group,
            kind,
        });
    }

    /// Re-init against live state, write progress 0 and arm the timer.
    fn start_pipe(
        &mut self,
        step: PipePlan,
        target: &mut dyn AnimationTarget,
        now: f64,
        events: &mut Vec<GroupEvent>,
    ) {
        init_pipe(&mut self.grid, step.index, &*target);
        perform_pipe(&self.grid, step.index, target, 0.0);
        self.timer = Some(Timer::start(now, step.duration, step.loops));
        debug!(
            "laba: group {} pipe {} started ({}s, {:?}, {})",
            self.group,
            step.index,
            step.duration,
            step.loops,
            step.mode.as_str()
        );
        self.emit(
            events,
            EventKind::PipeStarted {
                pipe: step.index,
                duration: step.duration,
            },
        );
    }

    fn begin(&mut self, target: &mut dyn AnimationTarget, now: f64, events: &mut Vec<GroupEvent>) {
        if let Some(step) = self.steps.first().copied() {
            self.start_pipe(step, target, now, events);
        }
    }

    fn finish(&mut self, events: &mut Vec<GroupEvent>) {
        self.finished = true;
        self.timer = None;
        debug!("laba: group {} completed", self.group);
        self.emit(events, EventKind::GroupCompleted);
        if let Some(done) = self.on_complete.take() {
            done();
        }
    }

    /// Returns true once the group has finished.
    fn update(
        &mut self,
        target: &mut dyn AnimationTarget,
        now: f64,
        events: &mut Vec<GroupEvent>,
    ) -> bool {
        if self.finished {
            return true;
        }
        loop {
            let Some(step) = self.steps.get(self.cursor).copied() else {
                self.finish(events);
                return true;
            };
            let tick = match self.timer.as_mut() {
                Some(timer) => timer.advance(now),
                None => {
                    self.start_pipe(step, target, now, events);
                    continue;
                }
            };
            match tick {
                TimerTick::Progress(p) => {
                    trace!("laba: group {} pipe {} progress {:.4}", self.group, step.index, p);
                    perform_pipe(&self.grid, step.index, target, p);
                    return false;
                }
                TimerTick::Looped => {
                    perform_pipe(&self.grid, step.index, target, 1.0);
                    if step.is_relative() {
                        init_pipe(&mut self.grid, step.index, &*target);
                    }
                    perform_pipe(&self.grid, step.index, target, 0.0);
                    self.emit(events, EventKind::PipeLooped { pipe: step.index });
                    return false;
                }
                TimerTick::Completed | TimerTick::Idle => {
                    perform_pipe(&self.grid, step.index, target, 1.0);
                    debug!("laba: group {} pipe {} completed", self.group, step.index);
                    self.emit(events, EventKind::PipeCompleted { pipe: step.index });
                    self.cursor += 1;
                    self.timer = None;
                    // Next pipe (if any) starts and advances in this same tick.
                }
            }
        }
    }
}

/// Running activation of one notation against one target.
pub struct Animation {
    groups: Vec<GroupRunner>,
    events: Vec<GroupEvent>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("groups", &self.groups.len())
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl Animation {
    /// Start every group at `now`. Only the first group gets `on_complete`;
    /// nothing completes before the first `update`.
    pub(crate) fn start(
        segments: Vec<(ActionGrid, SegmentPlan)>,
        target: &mut dyn AnimationTarget,
        now: f64,
        mut on_complete: Option<Completion>,
    ) -> Self {
        let mut events = Vec::new();
        let groups = segments
            .into_iter()
            .enumerate()
            .map(|(i, (grid, plan))| {
                let mut runner = GroupRunner::new(i, grid, plan, on_complete.take());
                runner.begin(target, now, &mut events);
                runner
            })
            .collect();
        Self { groups, events }
    }

    /// Advance every unfinished group to `now`.
    pub fn update(&mut self, target: &mut dyn AnimationTarget, now: f64) -> AnimationStatus {
        self.events.clear();
        let mut all_done = true;
        for runner in &mut self.groups {
            if !runner.update(target, now, &mut self.events) {
                all_done = false;
            }
        }
        if all_done {
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    /// Events produced by the last `update` (or by starting, before the first one).
    pub fn events(&self) -> &[GroupEvent] {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.groups.iter().all(|g| g.finished)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
