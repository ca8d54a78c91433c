//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::joint::{JointConfig, JointId};
use super::limits::TravelLimits;
use super::ArmConfig;

/// Validate an arm configuration.
///
/// Checks:
/// - All six joint slots are configured
/// - Driver channels are unique
/// - Geometry factors and limits are usable
/// - Speed and acceleration maxima are positive
pub fn validate_config(config: &ArmConfig) -> Result<()> {
    let mut seen_channels: heapless::Vec<u8, 8> = heapless::Vec::new();

    for id in JointId::ALL {
        let joint = config
            .joint(id)
            .ok_or(Error::Config(ConfigError::MissingJoint(id)))?;

        validate_joint(joint)?;

        if seen_channels.contains(&joint.channel) {
            return Err(Error::Config(ConfigError::DuplicateChannel(joint.channel)));
        }
        let _ = seen_channels.push(joint.channel);
    }

    Ok(())
}

fn validate_joint(config: &JointConfig) -> Result<()> {
    if config.steps_per_degree <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerDegree(
            config.steps_per_degree,
        )));
    }

    let limits = TravelLimits::new(config.lim_pos, config.lim_neg);
    if !limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidTravelLimits {
            pos: config.lim_pos.0,
            neg: config.lim_neg.0,
        }));
    }

    if config.max_speed.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(config.max_speed.0)));
    }

    if config.max_accel.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxAcceleration(
            config.max_accel.0,
        )));
    }

    if config.homing_dir != -1 && config.homing_dir != 1 {
        return Err(Error::Config(ConfigError::InvalidHomingDirection(
            config.homing_dir,
        )));
    }

    Ok(())
}
