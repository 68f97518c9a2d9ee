//! Speed correction and kill-plane rescue.

use approx::assert_relative_eq;
use glam::Vec3;
use pawn_movement::{
    correct_velocity, is_exceeding_max_speed, CollisionWorld, Controller, MovementConfig,
    MovementLimits, MovementTuning, PawnMovement, WorldBounds,
};
use rstest::rstest;
use test_utils::fixtures::{short_step_config, BALL, DT};
use test_utils::Sandbox;

#[rstest]
fn double_speed_is_cut_to_the_limit_keeping_direction() {
    let limits = MovementLimits::default();
    let velocity = Vec3::new(0.6, 0.8, 0.0) * limits.max_horizontal_speed * 2.0;

    let corrected = correct_velocity(velocity, &limits);

    assert_relative_eq!(corrected.length(), limits.max_horizontal_speed, epsilon = 1e-3);
    assert_relative_eq!(corrected.x / corrected.y, 0.75, epsilon = 1e-5);
}

#[rstest]
#[case(Vec3::new(0.0, 0.0, 1500.0), 1000.0)]
#[case(Vec3::new(0.0, 0.0, -2500.0), -2000.0)]
#[case(Vec3::new(0.0, 0.0, -1999.0), -1999.0)]
fn vertical_speed_snaps_to_its_bound(#[case] velocity: Vec3, #[case] expected_z: f32) {
    let corrected = correct_velocity(velocity, &MovementLimits::default());
    assert_relative_eq!(corrected.z, expected_z);
}

#[rstest]
fn corrected_velocity_is_within_limits() {
    let limits = MovementLimits::default();
    let wild = Vec3::new(-4000.0, 9000.0, 7000.0);
    assert!(is_exceeding_max_speed(wild, &limits));
    assert!(!is_exceeding_max_speed(correct_velocity(wild, &limits), &limits));
}

#[rstest]
fn negative_limits_act_as_zero() {
    let limits = MovementLimits {
        max_horizontal_speed: -5.0,
        max_rise_speed: -1.0,
        max_fall_speed: -1.0,
        max_step_height: 0.0,
    };
    assert_eq!(correct_velocity(Vec3::new(3.0, 4.0, 2.0), &limits), Vec3::ZERO);
    let movement = PawnMovement::new(MovementConfig {
        limits,
        ..MovementConfig::default()
    });
    assert_relative_eq!(movement.max_speed(), 0.0);
}

#[rstest]
fn pawn_below_kill_plane_is_pushed_back_up() {
    let mut sandbox = Sandbox::new(
        CollisionWorld::new(),
        BALL,
        Vec3::new(0.0, 0.0, -150.0),
        short_step_config(),
    );
    sandbox.world.bounds = WorldBounds {
        enabled: true,
        kill_z: -100.0,
    };

    sandbox.tick(DT);

    // Distance to the plane plus the two-unit margin.
    assert_relative_eq!(sandbox.movement.velocity().z, 52.0, epsilon = 1e-2);
    assert!(sandbox.location().z > -150.0);
}

#[rstest]
fn rescue_speed_is_capped_by_max_speed() {
    let mut sandbox = Sandbox::new(
        CollisionWorld::new(),
        BALL,
        Vec3::new(0.0, 0.0, -1.0e4),
        short_step_config(),
    );
    sandbox.world.bounds = WorldBounds {
        enabled: true,
        kill_z: 0.0,
    };

    sandbox.tick(DT);

    assert_relative_eq!(
        sandbox.movement.velocity().z,
        sandbox.movement.max_speed(),
        epsilon = 0.1
    );
}

/// With a one-second tick the rescue speed alone decides whether the pawn
/// clears the plane: it does whenever the distance plus margin fits under
/// `max_speed`, and falls short once the cap bites.
#[rstest]
#[case(-150.0, -100.0, true)]
#[case(-1.0e4, 0.0, false)]
fn one_second_rescue_clears_the_plane_unless_capped(
    #[case] start_z: f32,
    #[case] kill_z: f32,
    #[case] clears: bool,
) {
    let mut sandbox = Sandbox::new(
        CollisionWorld::new(),
        BALL,
        Vec3::new(0.0, 0.0, start_z),
        short_step_config(),
    );
    sandbox.world.bounds = WorldBounds {
        enabled: true,
        kill_z,
    };

    sandbox.tick(1.0);

    assert_eq!(sandbox.location().z > kill_z, clears);
    let rescue = sandbox.movement.max_speed().min(kill_z - start_z + 2.0);
    assert_relative_eq!(sandbox.location().z, start_z + rescue, epsilon = 0.5);
}

#[rstest]
fn disabled_bounds_let_the_pawn_fall() {
    let mut sandbox = Sandbox::new(
        CollisionWorld::new(),
        BALL,
        Vec3::new(0.0, 0.0, -150.0),
        short_step_config(),
    );
    sandbox.world.bounds = WorldBounds {
        enabled: false,
        kill_z: -100.0,
    };

    sandbox.tick(DT);

    assert!(sandbox.movement.velocity().z < 0.0);
}

#[rstest]
fn path_following_ai_is_corrected_instead_of_accelerated() {
    let mut sandbox = Sandbox::new(
        CollisionWorld::new(),
        BALL,
        Vec3::ZERO,
        short_step_config(),
    );
    sandbox.pawn.controller = Some(Controller::local_ai(true));
    sandbox.pawn.hold(Vec3::X * 5000.0);
    sandbox.movement.set_velocity(Vec3::new(0.0, 1200.0, 0.0));

    sandbox.tick(DT);

    let velocity = sandbox.movement.velocity();
    assert_relative_eq!(velocity.y, 600.0, epsilon = 0.5);
    assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-3);
    // Input is left for whoever else reads it.
    assert_eq!(sandbox.pawn.pending_input, Vec3::X * 5000.0);
}

#[rstest]
fn path_following_ai_consumes_input_when_configured() {
    let mut config = short_step_config();
    config.tuning = MovementTuning {
        use_acceleration_for_paths: true,
        ..config.tuning
    };
    let mut sandbox = Sandbox::new(CollisionWorld::new(), BALL, Vec3::ZERO, config);
    sandbox.pawn.controller = Some(Controller::local_ai(true));
    sandbox.pawn.pending_input = Vec3::X * 5000.0;

    sandbox.tick(DT);

    assert!(sandbox.movement.velocity().x > 0.0);
    assert!(sandbox.location().x > 0.0);
    assert_eq!(sandbox.pawn.pending_input, Vec3::ZERO);
}
