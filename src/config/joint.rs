//! Per-joint configuration.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::units::{Degrees, StepsPerSec, StepsPerSecSquared};

/// Identifier for one of the six fixed joint slots.
///
/// The numbering matches the physical axes base-to-wrist; the wire format is
/// the lowercase name (`"j0"` .. `"j5"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointId {
    /// Base rotation
    J0,
    /// Shoulder
    J1,
    /// Elbow
    J2,
    /// Forearm roll
    J3,
    /// Wrist pitch
    J4,
    /// Wrist roll (end-effector side)
    J5,
}

impl JointId {
    /// All six joints in slot order.
    pub const ALL: [JointId; 6] = [
        JointId::J0,
        JointId::J1,
        JointId::J2,
        JointId::J3,
        JointId::J4,
        JointId::J5,
    ];

    /// Slot index, 0..6.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            JointId::J0 => 0,
            JointId::J1 => 1,
            JointId::J2 => 2,
            JointId::J3 => 3,
            JointId::J4 => 4,
            JointId::J5 => 5,
        }
    }

    /// Lowercase wire name.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            JointId::J0 => "j0",
            JointId::J1 => "j1",
            JointId::J2 => "j2",
            JointId::J3 => "j3",
            JointId::J4 => "j4",
            JointId::J5 => "j5",
        }
    }

    /// Joint for a slot index, if in range.
    pub const fn from_index(index: usize) -> Option<JointId> {
        match index {
            0 => Some(JointId::J0),
            1 => Some(JointId::J1),
            2 => Some(JointId::J2),
            3 => Some(JointId::J3),
            4 => Some(JointId::J4),
            5 => Some(JointId::J5),
            _ => None,
        }
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete configuration for one joint.
///
/// Geometry is immutable after construction except for the limit adjustment,
/// which may be updated at runtime (and persisted via the store).
#[derive(Debug, Clone, Deserialize)]
pub struct JointConfig {
    /// Driver channel index.
    pub channel: u8,

    /// STEP pin on the driver board.
    pub step_pin: u8,

    /// DIR pin on the driver board.
    pub dir_pin: u8,

    /// Enable pin on the driver board.
    pub enable_pin: u8,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Limit switch pin.
    pub limit_pin: u8,

    /// Quadrature encoder A pin.
    pub encoder_pin_a: u8,

    /// Quadrature encoder B pin.
    pub encoder_pin_b: u8,

    /// Travel limit in the positive direction, degrees from logical zero.
    #[serde(rename = "lim_pos_deg")]
    pub lim_pos: Degrees,

    /// Travel limit in the negative direction, degrees from logical zero
    /// (stored positive; the reachable range is `[-lim_neg, +lim_pos]`).
    #[serde(rename = "lim_neg_deg")]
    pub lim_neg: Degrees,

    /// Motor steps per degree of joint rotation.
    pub steps_per_degree: f32,

    /// Direction sign the joint moves to find its limit switch (-1 or +1).
    #[serde(default = "default_homing_dir")]
    pub homing_dir: i8,

    /// Maximum speed in steps per second.
    #[serde(rename = "max_speed_steps_per_sec")]
    pub max_speed: StepsPerSec,

    /// Maximum acceleration in steps per second squared.
    #[serde(rename = "max_accel_steps_per_sec2")]
    pub max_accel: StepsPerSecSquared,

    /// Limit-switch placement correction in degrees, persisted externally.
    #[serde(default, rename = "limit_adjustment_deg")]
    pub limit_adjustment: Degrees,
}

fn default_homing_dir() -> i8 {
    -1
}

impl JointConfig {
    /// Total reachable travel in degrees.
    pub fn axis_limit(&self) -> Degrees {
        self.lim_pos + self.lim_neg
    }

    /// Steps for a full sweep of the axis.
    pub fn step_limit(&self) -> i64 {
        (self.axis_limit().0 * self.steps_per_degree) as i64
    }
}
