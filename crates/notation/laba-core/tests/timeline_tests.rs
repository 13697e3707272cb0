use std::cell::Cell;
use std::rc::Rc;

use laba_core::{
    AnimationStatus, AnimationTarget, Channel, Completion, Config, Engine, EventKind,
    TargetState,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn counter() -> (Rc<Cell<u32>>, Completion) {
    let hits = Rc::new(Cell::new(0));
    let cb_hits = hits.clone();
    (hits, Box::new(move || cb_hits.set(cb_hits.get() + 1)))
}

fn run(
    engine: &Engine,
    target: &mut TargetState,
    notation: &str,
    ticks: &[f64],
) -> AnimationStatus {
    let mut anim = engine.animate(target, notation, 0.0, None).unwrap();
    let mut status = AnimationStatus::Running;
    for &now in ticks {
        status = anim.update(target, now);
    }
    status
}

#[test]
fn absolute_loop_replays_same_span() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let status = run(&engine, &mut target, "<10d1L3", &[1.0, 2.0, 3.0]);
    assert_eq!(status, AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationX), -10.0);
}

#[test]
fn relative_loop_accumulates() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let status = run(&engine, &mut target, "<10d1l3", &[1.0, 2.0, 3.0]);
    assert_eq!(status, AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationX), -30.0);
}

#[test]
fn infinite_loop_keeps_running() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let mut anim = engine.animate(&mut target, ">5d1l", 0.0, None).unwrap();
    for i in 1..=10 {
        assert_eq!(anim.update(&mut target, i as f64), AnimationStatus::Running);
    }
    assert_eq!(target.get(Channel::TranslationX), 50.0);
}

#[test]
fn pipes_run_sequentially_and_rebase() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let mut anim = engine.animate(&mut target, "e0x10d1|y5d1", 0.0, None).unwrap();

    anim.update(&mut target, 0.5);
    approx(target.get(Channel::TranslationX), 5.0, 1e-12);
    assert_eq!(target.get(Channel::TranslationY), 0.0);

    assert_eq!(anim.update(&mut target, 1.0), AnimationStatus::Running);
    assert_eq!(target.get(Channel::TranslationX), 10.0);
    let kinds: Vec<_> = anim.events().iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::PipeCompleted { pipe: 0 },
            EventKind::PipeStarted {
                pipe: 1,
                duration: 1.0
            },
        ]
    );

    assert_eq!(anim.update(&mut target, 2.0), AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationY), 5.0);
}

#[test]
fn each_pipe_inits_from_live_state() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let status = run(&engine, &mut target, "<10d1|<10d1", &[1.0, 2.0]);
    assert_eq!(status, AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationX), -20.0);
}

#[test]
fn zero_length_pipes_chain_in_one_tick() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let (hits, done) = counter();
    let mut anim = engine
        .animate(&mut target, "x5d0|y7d0|s2d0", 0.0, Some(done))
        .unwrap();
    assert_eq!(hits.get(), 0);
    assert_eq!(anim.update(&mut target, 0.0), AnimationStatus::Finished);
    assert_eq!(hits.get(), 1);
    assert_eq!(target.translation, [5.0, 7.0, 0.0]);
    assert_eq!(target.scale, 2.0);
}

#[test]
fn empty_notation_completes_on_first_update() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let (hits, done) = counter();
    let mut anim = engine.animate(&mut target, "", 0.0, Some(done)).unwrap();
    assert_eq!(hits.get(), 0);
    assert_eq!(anim.update(&mut target, 0.0), AnimationStatus::Finished);
    assert_eq!(hits.get(), 1);
    anim.update(&mut target, 1.0);
    assert_eq!(hits.get(), 1);
    assert_eq!(target, TargetState::default());
}

#[test]
fn bracket_groups_run_together_and_only_first_completes() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let (hits, done) = counter();
    let mut anim = engine
        .animate(&mut target, "[x10d1][y10d2]", 0.0, Some(done))
        .unwrap();
    assert_eq!(anim.group_count(), 2);

    anim.update(&mut target, 0.5);
    assert!(target.get(Channel::TranslationX) > 0.0);
    assert!(target.get(Channel::TranslationY) > 0.0);

    assert_eq!(anim.update(&mut target, 1.0), AnimationStatus::Running);
    assert_eq!(hits.get(), 1);
    assert_eq!(anim.update(&mut target, 2.0), AnimationStatus::Finished);
    assert_eq!(hits.get(), 1);
    assert_eq!(target.translation, [10.0, 10.0, 0.0]);
}

#[test]
fn time_scale_stretches_playback() {
    let engine = Engine::new(Config {
        time_scale: 2.0,
        ..Config::default()
    });
    let mut target = TargetState::default();
    let mut anim = engine.animate(&mut target, "e0x10d1", 0.0, None).unwrap();
    anim.update(&mut target, 1.0);
    approx(target.get(Channel::TranslationX), 5.0, 1e-12);
    assert_eq!(anim.update(&mut target, 2.0), AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationX), 10.0);
}

#[test]
fn default_scale_goes_back_to_one() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    target.scale = 0.25;
    let grid = engine.parse("s", &target).unwrap();
    let action = &grid.pipe(0).unwrap()[0];
    assert_eq!((action.from(), action.to()), (0.25, 1.0));
}

#[test]
fn inverse_position_mirrors_forward() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    target.translation = [3.0, 4.0, 5.0];
    for (op, ch) in [
        ("x", Channel::TranslationX),
        ("y", Channel::TranslationY),
        ("z", Channel::TranslationZ),
    ] {
        let fwd = engine.parse(&format!("{op}9"), &target).unwrap();
        let inv = engine.parse(&format!("!{op}9"), &target).unwrap();
        let (f, i) = (&fwd.pipe(0).unwrap()[0], &inv.pipe(0).unwrap()[0]);
        assert_eq!((f.from(), f.to()), (i.to(), i.from()), "{}", ch.name());
        assert_eq!(f.from(), target.get(ch));
    }
}

#[test]
fn pause_inserts_a_wait() {
    let engine = Engine::default();
    let mut target = TargetState::with_size(40.0, 0.0);
    let mut anim = engine.animate(&mut target, "<d1,>d1", 0.0, None).unwrap();
    anim.update(&mut target, 1.0);
    assert_eq!(target.get(Channel::TranslationX), -40.0);
    // Pause pipe runs for 0.87 * 0.26 seconds starting at t=1.
    anim.update(&mut target, 1.1);
    assert_eq!(target.get(Channel::TranslationX), -40.0);
    anim.update(&mut target, 1.3);
    assert_eq!(anim.update(&mut target, 2.5), AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationX), 0.0);
}

#[test]
fn overflowing_duration_runs_at_default_length() {
    let engine = Engine::default();
    let mut target = TargetState::default();
    let notation = format!("x1d{}", "9".repeat(400));
    let status = run(&engine, &mut target, &notation, &[0.5, 1.0]);
    assert_eq!(status, AnimationStatus::Finished);
    assert_eq!(target.get(Channel::TranslationX), 1.0);
    assert_eq!(
        engine.describe(&target, &notation).unwrap(),
        "Move to 1 x pos, ease in/out quad over 0.87 seconds."
    );
}
