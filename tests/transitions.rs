//! Apex, landing and leaving-the-floor notifications from full ticks.

use approx::assert_relative_eq;
use glam::Vec3;
use pawn_movement::{CollisionWorld, MovementConfig, MovementEvent, MovementTuning};
use rstest::rstest;
use test_utils::fixtures::{sandbox_over_ground, short_step_config, BALL, DT};
use test_utils::Sandbox;

fn count(events: &[MovementEvent], wanted: MovementEvent) -> usize {
    events.iter().filter(|e| **e == wanted).count()
}

#[rstest]
fn apex_fires_once_per_jump_arc() {
    let mut sandbox = Sandbox::new(CollisionWorld::new(), BALL, Vec3::ZERO, short_step_config());
    sandbox.movement.set_velocity(Vec3::Z * 300.0);

    let events = sandbox.run(120, DT);

    assert_eq!(events, vec![MovementEvent::ApexReached]);
    assert!(sandbox.movement.velocity().z < 0.0);
}

#[rstest]
fn falling_from_rest_is_not_an_apex() {
    let mut sandbox = Sandbox::new(CollisionWorld::new(), BALL, Vec3::ZERO, short_step_config());
    let events = sandbox.run(10, DT);
    assert!(events.is_empty());
}

#[rstest]
fn stopping_at_zero_is_not_an_apex() {
    let config = MovementConfig {
        tuning: MovementTuning {
            gravity_enabled: false,
            ..MovementTuning::default()
        },
        ..short_step_config()
    };
    let mut sandbox = Sandbox::new(CollisionWorld::new(), BALL, Vec3::ZERO, config);
    sandbox.movement.set_velocity(Vec3::Z * 5.0);
    sandbox.pawn.pending_input = Vec3::Z * -10.0;

    let events = sandbox.tick(0.5);

    assert!(events.is_empty());
    assert_relative_eq!(sandbox.movement.velocity().z, 0.0);
}

#[rstest]
fn dropping_onto_the_floor_lands_once() {
    let mut sandbox = sandbox_over_ground(Vec3::new(0.0, 0.0, 10.0));

    let events = sandbox.run(120, DT);

    assert_eq!(events, vec![MovementEvent::Landed]);
    assert!(sandbox.movement.is_touching_floor());
    assert!((sandbox.location().z - 1.0).abs() < 0.05, "{:?}", sandbox.location());
}

#[rstest]
fn a_jump_leaves_peaks_and_lands_in_order() {
    let mut sandbox = sandbox_over_ground(Vec3::new(0.0, 0.0, 1.0));
    sandbox.run(30, DT);
    assert!(sandbox.movement.is_touching_floor());

    sandbox.movement.set_velocity(Vec3::Z * 600.0);
    let events = sandbox.run(150, DT);

    assert_eq!(
        events,
        vec![
            MovementEvent::LeftFloor,
            MovementEvent::ApexReached,
            MovementEvent::Landed,
        ]
    );
}

#[rstest]
fn standing_still_raises_nothing() {
    let mut sandbox = sandbox_over_ground(Vec3::new(0.0, 0.0, 1.0));
    let first = sandbox.run(5, DT);
    assert_eq!(count(&first, MovementEvent::Landed), 1);

    let rest = sandbox.run(60, DT);
    assert!(rest.is_empty(), "unexpected {rest:?}");
}

#[rstest]
fn skipped_updates_keep_contact_state() {
    let mut sandbox = sandbox_over_ground(Vec3::new(0.0, 0.0, 10.0));
    sandbox.world.skip_updates = true;

    assert!(sandbox.run(10, DT).is_empty());
    assert!(!sandbox.movement.is_touching_floor());
    assert_eq!(sandbox.location(), Vec3::new(0.0, 0.0, 10.0));
}
