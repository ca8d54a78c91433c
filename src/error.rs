//! Error types for the arm-motion library.
//!
//! Provides unified error handling across configuration, joint control and
//! motion planning. Joint-scoped rejections mirror the fault kinds recorded
//! on the joint itself (see [`crate::joint::JointFault`]).

use core::fmt;

use crate::config::JointId;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all arm-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Joint operation error
    Joint(JointError),
    /// Motion planning error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A joint slot is missing from the configuration (all six are required)
    MissingJoint(JointId),
    /// Two joints share one driver channel
    DuplicateChannel(u8),
    /// Invalid steps-per-degree factor (must be > 0)
    InvalidStepsPerDegree(f32),
    /// Invalid travel limits (both directions must be >= 0, span > 0)
    InvalidTravelLimits {
        /// Positive-direction limit in degrees
        pos: f32,
        /// Negative-direction limit in degrees
        neg: f32,
    },
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Invalid max acceleration (must be > 0)
    InvalidMaxAcceleration(f32),
    /// Homing direction must be -1 or +1
    InvalidHomingDirection(i8),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Joint operation errors.
///
/// Rejections a joint operation can return synchronously. The asynchronous
/// fault kinds (`LIMIT`, `NOHOME`) never surface here; they are recorded on
/// the joint and observed through state snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum JointError {
    /// Homing requested while the joint is already home
    DoubleHome(JointId),
    /// Requested angle outside the joint's configured travel
    OutOfBounds {
        /// Joint that rejected the move
        joint: JointId,
        /// Requested angle in degrees
        requested: f32,
        /// Positive-direction limit in degrees
        lim_pos: f32,
        /// Negative-direction limit in degrees
        lim_neg: f32,
    },
    /// Position command issued before any successful homing
    NeverHomed(JointId),
    /// A move is already in flight on this joint
    MoveInFlight(JointId),
    /// Operation issued before `start()`
    NotReady(JointId),
    /// A driver command failed
    Driver(JointId),
}

/// Motion planning errors (per axis of a synchronized move).
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Solved cruise speed reaches the hard ceiling
    SpeedCeiling {
        /// Affected joint
        joint: JointId,
        /// Computed speed in steps/s
        computed: f32,
        /// Hard ceiling in steps/s
        ceiling: f32,
    },
    /// Solved acceleration reaches the hard ceiling
    AccelerationCeiling {
        /// Affected joint
        joint: JointId,
        /// Computed acceleration in steps/s²
        computed: f32,
        /// Hard ceiling in steps/s²
        ceiling: f32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Joint(e) => write!(f, "Joint error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingJoint(id) => write!(f, "Joint '{}' missing from configuration", id),
            ConfigError::DuplicateChannel(ch) => write!(f, "Duplicate driver channel: {}", ch),
            ConfigError::InvalidStepsPerDegree(v) => {
                write!(f, "Invalid steps per degree: {}. Must be > 0", v)
            }
            ConfigError::InvalidTravelLimits { pos, neg } => {
                write!(f, "Invalid travel limits: +{} / -{}", pos, neg)
            }
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::InvalidMaxAcceleration(v) => {
                write!(f, "Invalid max acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidHomingDirection(v) => {
                write!(f, "Invalid homing direction: {}. Must be -1 or +1", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for JointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointError::DoubleHome(id) => write!(f, "Joint {} is already home", id),
            JointError::OutOfBounds {
                joint,
                requested,
                lim_pos,
                lim_neg,
            } => write!(
                f,
                "Joint {} target {}° outside [-{}, +{}]",
                joint, requested, lim_neg, lim_pos
            ),
            JointError::NeverHomed(id) => write!(f, "Joint {} has not been homed", id),
            JointError::MoveInFlight(id) => write!(f, "Joint {} already has a move in flight", id),
            JointError::NotReady(id) => write!(f, "Joint {} has not been started", id),
            JointError::Driver(id) => write!(f, "Driver command failed for joint {}", id),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::SpeedCeiling {
                joint,
                computed,
                ceiling,
            } => write!(
                f,
                "Joint {} solved speed {} steps/s reaches ceiling {}",
                joint, computed, ceiling
            ),
            MotionError::AccelerationCeiling {
                joint,
                computed,
                ceiling,
            } => write!(
                f,
                "Joint {} solved acceleration {} steps/s² reaches ceiling {}",
                joint, computed, ceiling
            ),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<JointError> for Error {
    fn from(e: JointError) -> Self {
        Error::Joint(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for JointError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
