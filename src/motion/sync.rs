//! Six-axis trapezoidal synchronization.
//!
//! Given one target per joint, solve per-axis cruise speed and acceleration
//! so every axis starts and finishes together. The slowest axis at its own
//! limits is the *binding* axis; every other axis is re-solved to stretch
//! its move over the binding duration while keeping the binding axis's
//! cruise/ramp proportions.
//!
//! Derivation: with cruise fraction `r` shared across axes, an axis covering
//! distance `D` in total time `T` cruises `r·D` and ramps `(1−r)·D`, giving
//!
//! ```text
//! V = D·(2−r)/T          T2 = r·T/(2−r)
//! T1 = T·(1−r)/(2−r)     A = V/T1
//! ```
//!
//! which reproduces the binding axis's own profile exactly when applied to
//! it, and for `r = 0` degenerates to the triangular case `V = 2D/T`,
//! `A = 4D/T²`.

use log::warn;

use crate::config::JointId;
use crate::error::MotionError;

use super::profile::TrapezoidProfile;

/// Hard physical speed ceiling for a solved axis, steps/s.
pub const SPEED_CEILING: f32 = 2500.0;

/// Hard physical acceleration ceiling for a solved axis, steps/s².
pub const ACCEL_CEILING: f32 = 2000.0;

/// One axis of a synchronized move request.
#[derive(Debug, Clone, Copy)]
pub struct AxisRequest {
    /// Joint this axis belongs to.
    pub joint: JointId,
    /// Current absolute step position.
    pub current_steps: i64,
    /// Absolute step target.
    pub target_steps: i64,
    /// Joint's maximum speed, steps/s.
    pub max_speed: f32,
    /// Joint's maximum acceleration, steps/s².
    pub max_accel: f32,
}

/// Solved command for one axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisCommand {
    /// Joint to command.
    pub joint: JointId,
    /// Absolute step target.
    pub target_steps: i64,
    /// Solved cruise speed, steps/s.
    pub speed: f32,
    /// Solved acceleration, steps/s².
    pub acceleration: f32,
    /// Solved total duration, seconds.
    pub duration: f32,
}

/// Result of planning a synchronized move.
///
/// Rejection is per-axis and non-atomic: axes that clear the ceilings are
/// still commanded even when a sibling is rejected.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    /// Axes to command, slot order.
    pub commands: heapless::Vec<AxisCommand, 6>,
    /// Axes refused because a solved value reached a hard ceiling.
    pub rejected: heapless::Vec<(JointId, MotionError), 6>,
    /// Shared duration of the move, seconds (zero when nothing moves).
    pub duration: f32,
}

impl SyncPlan {
    /// Whether any axis will move.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Plan a synchronized multi-axis move.
///
/// `speed_ceiling` optionally caps every axis's cruise speed below its own
/// maximum. Zero-distance axes are skipped outright (not rejected).
pub fn plan_synchronized(requests: &[AxisRequest], speed_ceiling: Option<f32>) -> SyncPlan {
    let mut plan = SyncPlan::default();

    // Pass 1: each axis at its own best speed, to find the binding axis.
    let mut profiles: heapless::Vec<(AxisRequest, f32, TrapezoidProfile), 6> = heapless::Vec::new();
    for request in requests {
        let distance = (request.target_steps - request.current_steps).unsigned_abs() as f32;
        if distance <= 0.0 {
            continue;
        }
        let cruise = match speed_ceiling {
            Some(ceiling) => request.max_speed.min(ceiling),
            None => request.max_speed,
        };
        let profile = TrapezoidProfile::plan(distance, cruise, request.max_accel);
        let _ = profiles.push((*request, distance, profile));
    }

    let Some(binding) = profiles
        .iter()
        .max_by(|a, b| a.2.total_time().total_cmp(&b.2.total_time()))
    else {
        return plan;
    };

    let longest_time = binding.2.total_time();
    let ratio = binding.2.cruise_fraction();
    if longest_time <= 0.0 {
        return plan;
    }
    plan.duration = longest_time;

    // Pass 2: stretch every axis over the binding duration.
    for (request, distance, _) in &profiles {
        let speed = distance * (2.0 - ratio) / longest_time;
        let ramp_time = longest_time * (1.0 - ratio) / (2.0 - ratio);
        let acceleration = if ramp_time > 0.0 { speed / ramp_time } else { f32::MAX };

        if speed >= SPEED_CEILING {
            let err = MotionError::SpeedCeiling {
                joint: request.joint,
                computed: speed,
                ceiling: SPEED_CEILING,
            };
            warn!("sync: {}", err);
            let _ = plan.rejected.push((request.joint, err));
            continue;
        }
        if acceleration >= ACCEL_CEILING {
            let err = MotionError::AccelerationCeiling {
                joint: request.joint,
                computed: acceleration,
                ceiling: ACCEL_CEILING,
            };
            warn!("sync: {}", err);
            let _ = plan.rejected.push((request.joint, err));
            continue;
        }

        let _ = plan.commands.push(AxisCommand {
            joint: request.joint,
            target_steps: request.target_steps,
            speed,
            acceleration,
            duration: 2.0 * ramp_time + (ratio * longest_time / (2.0 - ratio)),
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(joint: JointId, distance: i64, max_speed: f32, max_accel: f32) -> AxisRequest {
        AxisRequest {
            joint,
            current_steps: 0,
            target_steps: distance,
            max_speed,
            max_accel,
        }
    }

    #[test]
    fn test_single_axis_keeps_own_profile() {
        let plan = plan_synchronized(&[request(JointId::J0, 4000, 1000.0, 500.0)], None);

        assert_eq!(plan.commands.len(), 1);
        let cmd = &plan.commands[0];
        assert!((cmd.speed - 1000.0).abs() < 1.0);
        assert!((cmd.acceleration - 500.0).abs() < 1.0);
        assert!((cmd.duration - plan.duration).abs() < 1e-3);
    }

    #[test]
    fn test_all_axes_share_the_binding_duration() {
        let requests = [
            request(JointId::J0, 8000, 1000.0, 500.0), // binding: longest travel
            request(JointId::J1, 2000, 1000.0, 500.0),
            request(JointId::J2, -3500, 800.0, 600.0),
            request(JointId::J3, 500, 1500.0, 1000.0),
        ];
        let plan = plan_synchronized(&requests, None);

        assert_eq!(plan.commands.len(), 4);
        for cmd in &plan.commands {
            assert!(
                (cmd.duration - plan.duration).abs() < 1e-3,
                "{} finishes at {} instead of {}",
                cmd.joint,
                cmd.duration,
                plan.duration
            );
        }
    }

    #[test]
    fn test_shorter_axes_run_slower() {
        let requests = [
            request(JointId::J0, 8000, 1000.0, 500.0),
            request(JointId::J1, 2000, 1000.0, 500.0),
        ];
        let plan = plan_synchronized(&requests, None);

        let j0 = plan.commands.iter().find(|c| c.joint == JointId::J0).unwrap();
        let j1 = plan.commands.iter().find(|c| c.joint == JointId::J1).unwrap();
        assert!(j1.speed < j0.speed);
    }

    #[test]
    fn test_speed_ceiling_caps_cruise() {
        let plan = plan_synchronized(&[request(JointId::J0, 8000, 2000.0, 1000.0)], Some(600.0));

        let cmd = &plan.commands[0];
        assert!(cmd.speed <= 600.0 + 1.0);
    }

    #[test]
    fn test_zero_distance_axis_skipped() {
        let requests = [
            request(JointId::J0, 4000, 1000.0, 500.0),
            request(JointId::J1, 0, 1000.0, 500.0),
        ];
        let plan = plan_synchronized(&requests, None);

        assert_eq!(plan.commands.len(), 1);
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn test_nothing_to_do() {
        let plan = plan_synchronized(&[request(JointId::J0, 0, 1000.0, 500.0)], None);
        assert!(plan.is_empty());
        assert!((plan.duration - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_hard_speed_ceiling_rejects_axis() {
        // A very fast binding axis forces an impossible stretch on nobody,
        // but an axis allowed 3000 steps/s on its own trips the ceiling.
        let plan = plan_synchronized(&[request(JointId::J2, 30_000, 3000.0, 1500.0)], None);

        assert!(plan.commands.is_empty());
        assert_eq!(plan.rejected.len(), 1);
        assert!(matches!(
            plan.rejected[0].1,
            MotionError::SpeedCeiling { .. }
        ));
    }

    #[test]
    fn test_rejection_is_not_atomic() {
        let requests = [
            request(JointId::J0, 30_000, 3000.0, 1500.0), // trips speed ceiling
            request(JointId::J1, 5000, 1000.0, 500.0),
        ];
        let plan = plan_synchronized(&requests, None);

        assert_eq!(plan.commands.len(), 1);
        assert_eq!(plan.commands[0].joint, JointId::J1);
        assert_eq!(plan.rejected.len(), 1);
        assert_eq!(plan.rejected[0].0, JointId::J0);
    }

    #[test]
    fn test_triangular_binding_axis() {
        // Binding axis can't reach cruise speed: ratio = 0, others solve
        // to pure triangles over the same duration.
        let requests = [
            request(JointId::J0, 400, 10_000.0, 100.0), // triangular, slow accel
            request(JointId::J1, 100, 1000.0, 500.0),
        ];
        let plan = plan_synchronized(&requests, None);

        assert_eq!(plan.commands.len(), 2);
        let duration = plan.duration;
        for cmd in &plan.commands {
            assert!((cmd.duration - duration).abs() < 1e-3);
        }

        // V = 2D/T and A = 4D/T² for the non-binding triangle
        let j1 = plan.commands.iter().find(|c| c.joint == JointId::J1).unwrap();
        assert!((j1.speed - 2.0 * 100.0 / duration).abs() < 0.5);
        assert!((j1.acceleration - 4.0 * 100.0 / (duration * duration)).abs() < 0.5);
    }
}
