//! # arm-motion
//!
//! Joint-space motion control for a six-axis stepper robot arm.
//!
//! ## Features
//!
//! - **Per-joint state machine**: homing, motion, enable/disable and
//!   limit-switch safety interlocks for every axis
//! - **Synchronized moves**: all six joints start and finish together using
//!   per-axis trapezoidal velocity profiles solved against the slowest axis
//! - **Driver boundary**: pulse generation lives behind the [`StepDriver`]
//!   trait; completions and sensor edges come back as [`DriverEvent`]s
//! - **Remote boundary**: typed commands and state snapshots for a
//!   controller link, transport-agnostic
//! - **no_std compatible**: core library works without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use arm_motion::{Arm, ArmConfig, remote};
//!
//! let mut arm = Arm::new(driver, &ArmConfig::igus_default())?;
//! arm.start()?;
//!
//! // Home everything, then run the event loop
//! arm.robot_home(now_ms)?;
//! loop {
//!     while let Some(ev) = next_driver_event() {
//!         arm.handle_event(ev, now_ms);
//!     }
//!     arm.tick(now_ms);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): enables the limit-adjustment store and the mock driver
//! - `alloc`: enables heap allocation for no_std with allocator

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod arm;
pub mod config;
pub mod driver;
pub mod error;
pub mod joint;
pub mod motion;
pub mod remote;

// Re-exports for ergonomic API
pub use arm::{Arm, ArmEvent};
pub use config::{validate_config, ArmConfig, JointConfig, JointId};
pub use driver::{ChannelConfig, DriverEvent, StepDriver};
pub use error::{Error, Result};
pub use joint::{Joint, JointFault, JointSignal, JointStatus};
pub use motion::{SyncPlan, TrapezoidProfile};

#[cfg(feature = "std")]
pub use config::store;
#[cfg(feature = "std")]
pub use driver::MockDriver;

// Unit types
pub use config::units::{Degrees, Steps, StepsPerSec, StepsPerSecSquared};
