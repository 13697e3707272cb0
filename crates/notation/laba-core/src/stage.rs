//! Stage: host-side driver owning targets and their running animations.
//!
//! Hosts register targets, start notation on them and call
//! [`Stage::update`] once per frame. Every channel written during the
//! tick is reported in [`Outputs::changes`] so adapters can commit only
//! what moved.

use hashbrown::HashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationStatus, Completion};
use crate::clock::Clock;
use crate::engine::Engine;
use crate::error::StageError;
use crate::ids::{AnimationId, IdAllocator, TargetId};
use crate::outputs::{Change, CoreEvent, GroupEvent, Outputs};
use crate::target::{AnimationTarget, Channel, TargetState};

/// Scripted playback: an optional intro played once, then the main
/// notation, optionally restarted every time it finishes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackCfg {
    pub intro: Option<String>,
    pub notation: String,
    pub repeat: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Intro,
    Main,
}

struct Routine {
    cfg: PlaybackCfg,
    phase: Phase,
}

struct Running {
    id: AnimationId,
    target: TargetId,
    animation: Animation,
    routine: Option<Routine>,
}

/// Forwards to the real target and records every write.
struct Recorder<'a> {
    inner: &'a mut dyn AnimationTarget,
    id: TargetId,
    outputs: &'a mut Outputs,
}

impl AnimationTarget for Recorder<'_> {
    fn get(&self, channel: Channel) -> f64 {
        self.inner.get(channel)
    }

    fn set(&mut self, channel: Channel, value: f64) {
        self.inner.set(channel, value);
        self.outputs.push_change(Change {
            target: self.id,
            channel,
            value,
        });
    }

    fn measure(&self) -> (f64, f64) {
        self.inner.measure()
    }

    fn sibling_index(&self) -> usize {
        self.inner.sibling_index()
    }
}

fn group_events(run: &Running) -> impl Iterator<Item = CoreEvent> + '_ {
    run.animation.events().iter().map(move |event: &GroupEvent| CoreEvent::Group {
        animation: run.id,
        target: run.target,
        event: event.clone(),
    })
}

pub struct Stage<T: AnimationTarget = TargetState> {
    engine: Engine,
    ids: IdAllocator,
    targets: HashMap<TargetId, T>,
    running: Vec<Running>,
    // Events raised between updates (animation starts).
    pending: Vec<CoreEvent>,
    outputs: Outputs,
}

impl<T: AnimationTarget> Default for Stage<T> {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl<T: AnimationTarget> Stage<T> {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            ids: IdAllocator::new(),
            targets: HashMap::new(),
            running: Vec::new(),
            pending: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn add_target(&mut self, target: T) -> TargetId {
        let id = self.ids.alloc_target();
        self.targets.insert(id, target);
        debug!("laba: stage added target {:?}", id);
        id
    }

    /// Remove a target and drop its animations without completing them.
    pub fn remove_target(&mut self, id: TargetId) -> Option<T> {
        let removed = self.targets.remove(&id)?;
        self.running.retain(|run| run.target != id);
        debug!("laba: stage removed target {:?}", id);
        Some(removed)
    }

    pub fn target(&self, id: TargetId) -> Option<&T> {
        self.targets.get(&id)
    }

    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut T> {
        self.targets.get_mut(&id)
    }

    fn launch(
        &mut self,
        target_id: TargetId,
        notation: &str,
        now: f64,
        on_complete: Option<Completion>,
        routine: Option<Routine>,
    ) -> Result<AnimationId, StageError> {
        let target = self.targets.get_mut(&target_id).ok_or_else(|| {
            warn!("laba: stage has no target {:?}", target_id);
            StageError::UnknownTarget(target_id)
        })?;
        let animation = self.engine.animate(target, notation, now, on_complete)?;
        let id = self.ids.alloc_animation();
        let run = Running {
            id,
            target: target_id,
            animation,
            routine,
        };
        self.pending.extend(group_events(&run));
        self.running.push(run);
        debug!("laba: stage started {:?} on {:?}", id, target_id);
        Ok(id)
    }

    /// Start `notation` on a registered target.
    pub fn animate(
        &mut self,
        target: TargetId,
        notation: &str,
        now: f64,
        on_complete: Option<Completion>,
    ) -> Result<AnimationId, StageError> {
        self.launch(target, notation, now, on_complete, None)
    }

    /// Start a playback routine. Both notations are validated up front.
    pub fn play(
        &mut self,
        target_id: TargetId,
        cfg: PlaybackCfg,
        now: f64,
    ) -> Result<AnimationId, StageError> {
        let target = self.targets.get(&target_id).ok_or_else(|| {
            warn!("laba: stage has no target {:?}", target_id);
            StageError::UnknownTarget(target_id)
        })?;
        self.engine.parse_groups(&cfg.notation, target)?;
        let (first, phase) = match cfg.intro.as_deref() {
            Some(intro) if !intro.is_empty() => (intro.to_string(), Phase::Intro),
            _ => (cfg.notation.clone(), Phase::Main),
        };
        self.launch(target_id, &first, now, None, Some(Routine { cfg, phase }))
    }

    pub fn describe(&self, target: TargetId, notation: &str) -> Result<String, StageError> {
        let target = self
            .targets
            .get(&target)
            .ok_or(StageError::UnknownTarget(target))?;
        Ok(self.engine.describe(target, notation)?)
    }

    /// Drop a running animation. Its completion callback is not invoked.
    pub fn stop(&mut self, id: AnimationId) -> bool {
        let before = self.running.len();
        self.running.retain(|run| run.id != id);
        let stopped = self.running.len() != before;
        if stopped {
            debug!("laba: stage stopped {:?}", id);
        }
        stopped
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running.iter().any(|run| run.id == id)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Advance every running animation to `now` and report what changed.
    pub fn update(&mut self, now: f64) -> &Outputs {
        let Self {
            engine,
            targets,
            running,
            pending,
            outputs,
            ..
        } = self;
        outputs.clear();
        for event in pending.drain(..) {
            outputs.push_event(event);
        }

        running.retain_mut(|run| {
            let Some(target) = targets.get_mut(&run.target) else {
                warn!("laba: dropping {:?}, target {:?} is gone", run.id, run.target);
                return false;
            };
            let mut rec = Recorder {
                inner: target,
                id: run.target,
                outputs: &mut *outputs,
            };
            let status = run.animation.update(&mut rec, now);
            for event in group_events(run) {
                rec.outputs.push_event(event);
            }
            if status == AnimationStatus::Running {
                return true;
            }

            let next = match run.routine.as_mut() {
                Some(routine) if routine.phase == Phase::Intro => {
                    routine.phase = Phase::Main;
                    Some(routine.cfg.notation.clone())
                }
                Some(routine) if routine.cfg.repeat => {
                    rec.outputs.push_event(CoreEvent::PlaybackRestarted {
                        animation: run.id,
                        target: run.target,
                    });
                    Some(routine.cfg.notation.clone())
                }
                _ => None,
            };

            let Some(notation) = next else {
                debug!("laba: stage {:?} completed", run.id);
                rec.outputs.push_event(CoreEvent::AnimationCompleted {
                    animation: run.id,
                    target: run.target,
                });
                return false;
            };
            match engine.animate(&mut rec, &notation, now, None) {
                Ok(animation) => {
                    run.animation = animation;
                    for event in group_events(run) {
                        rec.outputs.push_event(event);
                    }
                    true
                }
                Err(err) => {
                    warn!("laba: stage {:?} could not continue: {}", run.id, err);
                    rec.outputs.push_event(CoreEvent::AnimationCompleted {
                        animation: run.id,
                        target: run.target,
                    });
                    false
                }
            }
        });
        &self.outputs
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> &Outputs {
        self.update(clock.now())
    }
}
