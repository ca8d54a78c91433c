//! Property tests for the six-axis synchronization solver.

use arm_motion::motion::{
    plan_synchronized, AxisRequest, TrapezoidProfile, ACCEL_CEILING, SPEED_CEILING,
};
use arm_motion::JointId;
use proptest::prelude::*;

fn axis_strategy(joint: JointId) -> impl Strategy<Value = AxisRequest> {
    (
        -20_000i64..20_000,
        200.0f32..2400.0,
        100.0f32..1900.0,
    )
        .prop_map(move |(target, max_speed, max_accel)| AxisRequest {
            joint,
            current_steps: 0,
            target_steps: target,
            max_speed,
            max_accel,
        })
}

fn arm_strategy() -> impl Strategy<Value = [AxisRequest; 6]> {
    (
        axis_strategy(JointId::J0),
        axis_strategy(JointId::J1),
        axis_strategy(JointId::J2),
        axis_strategy(JointId::J3),
        axis_strategy(JointId::J4),
        axis_strategy(JointId::J5),
    )
        .prop_map(|(a, b, c, d, e, f)| [a, b, c, d, e, f])
}

proptest! {
    /// Every accepted axis finishes with the binding axis, within 1ms.
    #[test]
    fn accepted_axes_share_the_duration(requests in arm_strategy()) {
        let plan = plan_synchronized(&requests, None);

        for command in &plan.commands {
            prop_assert!(
                (command.duration - plan.duration).abs() < 1e-3,
                "{} finishes at {} instead of {}",
                command.joint,
                command.duration,
                plan.duration
            );
        }
    }

    /// No accepted axis carries a speed or acceleration at the hard ceilings.
    #[test]
    fn accepted_axes_respect_hard_ceilings(requests in arm_strategy()) {
        let plan = plan_synchronized(&requests, None);

        for command in &plan.commands {
            prop_assert!(command.speed < SPEED_CEILING);
            prop_assert!(command.acceleration < ACCEL_CEILING);
            prop_assert!(command.speed > 0.0);
            prop_assert!(command.acceleration > 0.0);
        }
    }

    /// Every moving axis is either commanded or rejected; none vanish.
    #[test]
    fn every_axis_is_accounted_for(requests in arm_strategy()) {
        let plan = plan_synchronized(&requests, None);

        let moving = requests
            .iter()
            .filter(|r| r.target_steps != r.current_steps)
            .count();
        prop_assert_eq!(plan.commands.len() + plan.rejected.len(), moving);
    }

    /// A shared speed ceiling never raises an axis's solved speed.
    #[test]
    fn shared_ceiling_only_slows(requests in arm_strategy()) {
        let free = plan_synchronized(&requests, None);
        let capped = plan_synchronized(&requests, Some(500.0));

        // Capping stretches the binding duration, never shortens it
        if !free.is_empty() && !capped.is_empty() {
            prop_assert!(capped.duration >= free.duration - 1e-3);
        }
    }

    /// Profile phases always account for the full distance.
    #[test]
    fn profile_distance_is_conserved(
        distance in 1.0f32..200_000.0,
        speed in 10.0f32..3000.0,
        accel in 10.0f32..3000.0,
    ) {
        let profile = TrapezoidProfile::plan(distance, speed, accel);

        let ramps = profile.acceleration * profile.ramp_time * profile.ramp_time;
        let cruise = profile.cruise_speed * profile.cruise_time;
        let covered = ramps + cruise;
        prop_assert!(
            (covered - distance).abs() < distance * 1e-3 + 1.0,
            "covered {} of {}",
            covered,
            distance
        );
        prop_assert!(profile.cruise_time >= 0.0);
        prop_assert!(profile.cruise_speed <= speed + 1e-3);
    }
}
