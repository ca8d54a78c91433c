//! Joint runtime state: faults, signals and snapshots.

use serde::{Deserialize, Serialize};

use crate::config::JointId;

/// Fault kinds a joint can record.
///
/// A recorded fault stays on the joint until `reset_errors()`; clearing it
/// does not repair the underlying condition (a `NeverHomed` joint must still
/// be homed before it will move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointFault {
    /// Unsolicited end-stop trip. Always disables the joint.
    #[serde(rename = "LIMIT")]
    Limit,
    /// Homing travel budget exhausted without finding the switch.
    #[serde(rename = "NOHOME")]
    NoHome,
    /// Homing requested while already home.
    #[serde(rename = "DOUBLE_HOME")]
    DoubleHome,
    /// Requested angle outside the configured travel.
    #[serde(rename = "OUT_OF_BOUNDS")]
    OutOfBounds,
    /// Position command before any successful homing.
    #[serde(rename = "NEVER_HOMED")]
    NeverHomed,
}

impl JointFault {
    /// Wire name of the fault.
    pub const fn as_str(self) -> &'static str {
        match self {
            JointFault::Limit => "LIMIT",
            JointFault::NoHome => "NOHOME",
            JointFault::DoubleHome => "DOUBLE_HOME",
            JointFault::OutOfBounds => "OUT_OF_BOUNDS",
            JointFault::NeverHomed => "NEVER_HOMED",
        }
    }
}

/// Outward signal raised by a joint operation or event handler.
///
/// The coordinator consumes these to aggregate arm state and to advance
/// multi-joint sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointSignal {
    /// The joint finished `start()` and is ready for commands.
    Ready(JointId),
    /// A homing sweep began.
    Homing(JointId),
    /// Homing succeeded; the joint sits on its switch at step zero.
    Home(JointId),
    /// A position move completed.
    Moved(JointId),
    /// A fault was recorded.
    Fault(JointId, JointFault),
}

impl JointSignal {
    /// The joint this signal belongs to.
    pub fn joint(&self) -> JointId {
        match *self {
            JointSignal::Ready(id)
            | JointSignal::Homing(id)
            | JointSignal::Home(id)
            | JointSignal::Moved(id)
            | JointSignal::Fault(id, _) => id,
        }
    }
}

/// Snapshot of one joint's state for the remote boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointStatus {
    /// Joint id.
    pub id: JointId,
    /// Started and accepting commands.
    pub ready: bool,
    /// Motor enable line state.
    pub enabled: bool,
    /// A homing sweep is in flight.
    pub homing: bool,
    /// Sitting at the homed reference position.
    pub home: bool,
    /// Has homed successfully since the last disable.
    pub homed: bool,
    /// A move is in flight.
    pub moving: bool,
    /// Authoritative position in absolute steps.
    pub step_position: i64,
    /// Advisory encoder-reported position.
    pub encoder_position: i64,
    /// Recorded fault, if any.
    pub fault: Option<JointFault>,
}
