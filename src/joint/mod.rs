//! Joint module: the per-axis motion state machine.

mod state;
mod stepper;

pub use state::{JointFault, JointSignal, JointStatus};
pub use stepper::{
    Joint, DEPART_GRACE_MS, HOMING_GRACE_MS, HOMING_SPEED_STEPS_PER_SEC,
};
