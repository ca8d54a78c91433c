//! Derived joint geometry.
//!
//! Computed once from [`JointConfig`] and used for every conversion between
//! the remote's degree-space and the driver's absolute step-space.

use super::joint::JointConfig;
use super::limits::TravelLimits;
use super::units::{Degrees, Steps};

/// Extra travel granted to a homing sweep beyond the nominal axis span, so a
/// joint starting hard against the far end-stop still reaches the switch.
const HOMING_TRAVEL_MARGIN: f32 = 1.1;

/// Derived mechanical parameters for one joint.
#[derive(Debug, Clone)]
pub struct JointGeometry {
    /// Steps per degree of joint rotation.
    pub steps_per_degree: f32,

    /// Reachable range around logical zero.
    pub limits: TravelLimits,

    /// Direction sign toward the limit switch (-1 or +1).
    pub homing_dir: i8,

    /// Maximum speed in steps per second.
    pub max_speed: f32,

    /// Maximum acceleration in steps per second squared.
    pub max_accel: f32,

    /// Steps for a full sweep of the axis.
    pub step_limit: i64,

    /// Bounded step budget for a homing move.
    pub homing_travel_steps: i64,

    /// Current limit-switch placement correction in degrees.
    limit_adjustment: Degrees,

    /// Offset mapping "degrees from logical zero" to absolute steps.
    ///
    /// Step zero is the limit switch; logical zero sits a full directional
    /// travel (plus adjustment) away from it.
    zero_step: i64,
}

impl JointGeometry {
    /// Compute geometry from a joint configuration.
    pub fn from_config(config: &JointConfig) -> Self {
        let limits = TravelLimits::new(config.lim_pos, config.lim_neg);
        let step_limit = config.step_limit();

        let mut geometry = Self {
            steps_per_degree: config.steps_per_degree,
            limits,
            homing_dir: config.homing_dir,
            max_speed: config.max_speed.0,
            max_accel: config.max_accel.0,
            step_limit,
            homing_travel_steps: (step_limit as f32 * HOMING_TRAVEL_MARGIN) as i64,
            limit_adjustment: Degrees(0.0),
            zero_step: 0,
        };
        geometry.set_limit_adjustment(config.limit_adjustment);
        geometry
    }

    /// Current limit adjustment.
    #[inline]
    pub fn limit_adjustment(&self) -> Degrees {
        self.limit_adjustment
    }

    /// Offset from the switch position to logical zero, in steps.
    #[inline]
    pub fn zero_step(&self) -> i64 {
        self.zero_step
    }

    /// Update the limit adjustment and recompute `zero_step`.
    ///
    /// The switch sits one directional travel away from logical zero; the
    /// adjustment corrects for where the switch is physically mounted.
    pub fn set_limit_adjustment(&mut self, adjustment: Degrees) {
        self.limit_adjustment = adjustment;
        let toward_switch = if self.homing_dir < 0 {
            self.limits.neg
        } else {
            self.limits.pos
        };
        let offset_deg = (toward_switch + adjustment).0;
        self.zero_step = (-(self.homing_dir as f32) * offset_deg * self.steps_per_degree) as i64;
    }

    /// Absolute step target for an angle from logical zero.
    #[inline]
    pub fn degrees_to_steps(&self, angle: Degrees) -> Steps {
        Steps((angle.0 * self.steps_per_degree) as i64 + self.zero_step)
    }

    /// Angle from logical zero for an absolute step position.
    #[inline]
    pub fn steps_to_degrees(&self, steps: Steps) -> Degrees {
        Degrees((steps.0 - self.zero_step) as f32 / self.steps_per_degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{StepsPerSec, StepsPerSecSquared};

    fn make_test_config() -> JointConfig {
        JointConfig {
            channel: 0,
            step_pin: 0,
            dir_pin: 1,
            enable_pin: 32,
            invert_direction: false,
            limit_pin: 26,
            encoder_pin_a: 14,
            encoder_pin_b: 15,
            lim_pos: Degrees(170.0),
            lim_neg: Degrees(170.0),
            steps_per_degree: 44.444_443,
            homing_dir: -1,
            max_speed: StepsPerSec(1500.0),
            max_accel: StepsPerSecSquared(800.0),
            limit_adjustment: Degrees(0.0),
        }
    }

    #[test]
    fn test_zero_step_negative_homing() {
        let geometry = JointGeometry::from_config(&make_test_config());

        // Switch at -170°, so logical zero is 170 * 44.44 ≈ 7555 steps past it
        assert_eq!(geometry.zero_step(), 7555);
    }

    #[test]
    fn test_zero_step_positive_homing() {
        let mut config = make_test_config();
        config.homing_dir = 1;
        let geometry = JointGeometry::from_config(&config);

        // Switch at +170°, logical zero is below it in step space
        assert_eq!(geometry.zero_step(), -7555);
    }

    #[test]
    fn test_degree_step_conversions() {
        let geometry = JointGeometry::from_config(&make_test_config());

        let target = geometry.degrees_to_steps(Degrees(90.0));
        assert_eq!(target.0, (90.0 * 44.444_443f32) as i64 + 7555);

        let back = geometry.steps_to_degrees(target);
        assert!((back.0 - 90.0).abs() < 0.05);
    }

    #[test]
    fn test_limit_adjustment_shifts_zero() {
        let mut geometry = JointGeometry::from_config(&make_test_config());
        let before = geometry.degrees_to_steps(Degrees(0.0));

        geometry.set_limit_adjustment(Degrees(2.0));
        let after = geometry.degrees_to_steps(Degrees(0.0));

        // +2° of adjustment pushes logical zero further from the switch
        let expected = ((170.0f32 + 2.0) * 44.444_443) as i64 - (170.0f32 * 44.444_443) as i64;
        assert_eq!(after.0 - before.0, expected);
    }

    #[test]
    fn test_homing_travel_exceeds_axis() {
        let geometry = JointGeometry::from_config(&make_test_config());
        assert!(geometry.homing_travel_steps > geometry.step_limit);
    }
}
