//! Arm module: the six-joint coordinator.

mod coordinator;

pub use coordinator::{Arm, ArmEvent, CALIBRATE_SETTLE_MS, DEFERRED_HOME_DELAY_MS};
