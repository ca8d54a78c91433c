//! Motion planning: trapezoidal profiles and multi-axis synchronization.

mod profile;
mod sync;

pub use profile::TrapezoidProfile;
pub use sync::{
    plan_synchronized, AxisCommand, AxisRequest, SyncPlan, ACCEL_CEILING, SPEED_CEILING,
};
