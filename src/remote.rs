//! The remote-control boundary.
//!
//! Typed inbound commands and outbound snapshots for a controller link. The
//! transport (socket, serial, whatever) stays outside the crate: it decodes
//! payloads into [`Command`], calls [`apply`], and ships the snapshot types
//! back out. Errors from `apply` are reported to the caller only; the
//! authoritative error surface is the per-joint fault in the state snapshot.

use serde::{Deserialize, Serialize};

use crate::arm::{Arm, ArmEvent};
use crate::config::units::Degrees;
use crate::config::JointId;
use crate::driver::StepDriver;
use crate::error::Result;
use crate::joint::{JointFault, JointStatus};

/// Inbound command from the remote controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Move one joint to an absolute angle.
    SetJointPosition {
        /// Target joint.
        joint: JointId,
        /// Angle in degrees from logical zero.
        degrees: f32,
        /// Optional speed cap in steps/s.
        #[serde(default)]
        speed: Option<f32>,
    },
    /// Clear one joint's recorded fault.
    ResetJointErrors {
        /// Target joint.
        joint: JointId,
    },
    /// Enable one joint's motor.
    EnableJoint {
        /// Target joint.
        joint: JointId,
    },
    /// Disable one joint's motor.
    DisableJoint {
        /// Target joint.
        joint: JointId,
    },
    /// Home one joint.
    HomeJoint {
        /// Target joint.
        joint: JointId,
    },
    /// Redefine one joint's current pose as step zero.
    ZeroJoint {
        /// Target joint.
        joint: JointId,
    },
    /// Home the whole arm (deferred joint last).
    HomeArm,
    /// Split-home the whole arm (center the others before the deferred one).
    SplitHomeArm,
    /// Home then center automatically.
    CalibrateArm,
    /// Disable every joint.
    StopArm,
    /// Stop every joint immediately without disabling.
    FreezeArm,
    /// Move every joint to logical zero.
    CenterArm,
    /// Re-enable every joint.
    EnableArm,
    /// Synchronized whole-arm move.
    SetArmPositions {
        /// Angles in degrees, slot order `j0..j5`.
        degrees: [f32; 6],
        /// Optional shared speed ceiling in steps/s.
        #[serde(default)]
        speed: Option<f32>,
    },
}

/// Dispatch one inbound command to the coordinator.
pub fn apply<D: StepDriver>(arm: &mut Arm<D>, command: &Command, now_ms: u64) -> Result<()> {
    match *command {
        Command::SetJointPosition {
            joint,
            degrees,
            speed,
        } => arm.set_joint_position(joint, Degrees(degrees), speed, now_ms),
        Command::ResetJointErrors { joint } => {
            arm.reset_joint_errors(joint);
            Ok(())
        }
        Command::EnableJoint { joint } => arm.enable_joint(joint),
        Command::DisableJoint { joint } => arm.disable_joint(joint),
        Command::HomeJoint { joint } => arm.home_joint(joint),
        Command::ZeroJoint { joint } => arm.zero_joint(joint),
        Command::HomeArm => arm.robot_home(now_ms),
        Command::SplitHomeArm => arm.robot_split_home(now_ms),
        Command::CalibrateArm => arm.robot_calibrate(now_ms),
        Command::StopArm => arm.robot_stop(),
        Command::FreezeArm => arm.robot_freeze(),
        Command::CenterArm => arm.robot_center(now_ms),
        Command::EnableArm => arm.robot_enable(),
        Command::SetArmPositions { degrees, speed } => {
            let mut angles = [Degrees(0.0); 6];
            for (slot, value) in angles.iter_mut().zip(degrees) {
                *slot = Degrees(value);
            }
            arm.set_arm_positions(angles, speed, now_ms)
        }
    }
}

/// Full per-joint state snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StateSnapshot {
    /// All six joints, slot order.
    pub joints: [JointStatus; 6],
}

/// Arm-level flags and configuration for the `register`/`meta` handshake.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetaSnapshot {
    /// All joints started.
    pub ready: bool,
    /// Arm disabled by a stop.
    pub stopped: bool,
    /// Whole-arm homing in flight.
    pub homing: bool,
    /// Every joint at its homed reference.
    pub home: bool,
    /// Whole-arm move in flight.
    pub moving: bool,
    /// Calibration in flight.
    pub calibrating: bool,
    /// Split homing in flight.
    pub split_homing: bool,
    /// Joint id list, slot order.
    pub joints: [JointId; 6],
    /// Limit adjustments in degrees, slot order.
    pub limit_adjustments: [f32; 6],
}

/// Lightweight position-only snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EncoderSnapshot {
    /// All six joints, slot order.
    pub joints: [EncoderEntry; 6],
}

/// One joint's positions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EncoderEntry {
    /// Joint id.
    pub id: JointId,
    /// Authoritative step position.
    pub step_position: i64,
    /// Advisory encoder position.
    pub encoder_position: i64,
}

/// Outbound notification, one per arm event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// A joint finished starting.
    JointReady {
        /// Affected joint.
        joint: JointId,
    },
    /// A joint began homing.
    JointHoming {
        /// Affected joint.
        joint: JointId,
    },
    /// A joint reached home.
    JointHome {
        /// Affected joint.
        joint: JointId,
    },
    /// A joint finished a move.
    JointMoved {
        /// Affected joint.
        joint: JointId,
    },
    /// A joint recorded a fault.
    JointFault {
        /// Affected joint.
        joint: JointId,
        /// Recorded fault kind.
        fault: JointFault,
    },
    /// Every joint is started.
    ArmReady,
    /// Every joint reports home.
    ArmHome,
    /// The whole arm came to rest.
    ArmMoved,
}

impl From<ArmEvent> for Notification {
    fn from(event: ArmEvent) -> Self {
        match event {
            ArmEvent::JointReady(joint) => Notification::JointReady { joint },
            ArmEvent::JointHoming(joint) => Notification::JointHoming { joint },
            ArmEvent::JointHome(joint) => Notification::JointHome { joint },
            ArmEvent::JointMoved(joint) => Notification::JointMoved { joint },
            ArmEvent::JointFault(joint, fault) => Notification::JointFault { joint, fault },
            ArmEvent::ArmReady => Notification::ArmReady,
            ArmEvent::ArmHome => Notification::ArmHome,
            ArmEvent::ArmMoved => Notification::ArmMoved,
        }
    }
}

/// Build the full state snapshot.
pub fn state_snapshot<D: StepDriver>(arm: &Arm<D>) -> StateSnapshot {
    StateSnapshot {
        joints: arm.statuses(),
    }
}

/// Build the meta snapshot.
pub fn meta_snapshot<D: StepDriver>(arm: &Arm<D>) -> MetaSnapshot {
    MetaSnapshot {
        ready: arm.ready(),
        stopped: arm.is_stopped(),
        homing: arm.is_homing(),
        home: arm.home(),
        moving: arm.is_moving(),
        calibrating: arm.is_calibrating(),
        split_homing: arm.is_split_homing(),
        joints: JointId::ALL,
        limit_adjustments: arm.limit_adjustments(),
    }
}

/// Build the lightweight encoder snapshot.
pub fn encoder_snapshot<D: StepDriver>(arm: &Arm<D>) -> EncoderSnapshot {
    let statuses = arm.statuses();
    let mut joints = [EncoderEntry {
        id: JointId::J0,
        step_position: 0,
        encoder_position: 0,
    }; 6];
    for (entry, status) in joints.iter_mut().zip(statuses) {
        *entry = EncoderEntry {
            id: status.id,
            step_position: status.step_position,
            encoder_position: status.encoder_position,
        };
    }
    EncoderSnapshot { joints }
}

/// Drain the arm's queued events as notifications.
pub fn drain_notifications<D: StepDriver>(arm: &mut Arm<D>) -> heapless::Vec<Notification, 32> {
    let mut out = heapless::Vec::new();
    for event in arm.take_events() {
        let _ = out.push(Notification::from(event));
    }
    out
}
