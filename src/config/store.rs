//! Limit-adjustment persistence (std only).
//!
//! The only configuration that survives restarts is each joint's
//! limit-switch placement correction. The file is TOML, created empty on
//! first start and rewritten whole on every save.

use std::fs;
use std::path::Path;

use heapless::{FnvIndexMap, String};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

use super::joint::JointId;
use super::units::Degrees;

/// Persisted per-joint adjustment record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct JointAdjustment {
    /// Limit-switch placement correction in degrees.
    pub limit_adjustment_deg: f32,
}

/// The persisted adjustment map, keyed by joint name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredAdjustments {
    /// Adjustments by joint name (`j0` .. `j5`); absent joints default to 0.
    #[serde(default)]
    pub joints: FnvIndexMap<String<8>, JointAdjustment, 8>,
}

impl StoredAdjustments {
    /// Adjustment for a joint, zero when unset.
    pub fn get(&self, id: JointId) -> Degrees {
        self.joints
            .iter()
            .find(|(k, _)| k.as_str() == id.as_str())
            .map(|(_, v)| Degrees(v.limit_adjustment_deg))
            .unwrap_or_default()
    }

    /// Record an adjustment for a joint.
    pub fn set(&mut self, id: JointId, adjustment: Degrees) {
        let key: String<8> = String::try_from(id.as_str()).unwrap_or_default();
        let _ = self.joints.insert(
            key,
            JointAdjustment {
                limit_adjustment_deg: adjustment.0,
            },
        );
    }
}

/// Load adjustments from a TOML file, creating an empty file when absent.
pub fn load<P: AsRef<Path>>(path: P) -> Result<StoredAdjustments> {
    let path = path.as_ref();

    if !path.exists() {
        let empty = StoredAdjustments::default();
        save(path, &empty)?;
        return Ok(empty);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    toml::from_str(&content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })
}

/// Rewrite the adjustment file.
pub fn save<P: AsRef<Path>>(path: P, adjustments: &StoredAdjustments) -> Result<()> {
    let content = toml::to_string(adjustments).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    fs::write(path.as_ref(), content).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_creates_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjustments.toml");

        let loaded = load(&path).unwrap();
        assert!(loaded.joints.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjustments.toml");

        let mut adjustments = StoredAdjustments::default();
        adjustments.set(JointId::J2, Degrees(1.5));
        adjustments.set(JointId::J5, Degrees(-0.75));
        save(&path, &adjustments).unwrap();

        let loaded = load(&path).unwrap();
        assert!((loaded.get(JointId::J2).0 - 1.5).abs() < 0.001);
        assert!((loaded.get(JointId::J5).0 + 0.75).abs() < 0.001);
        assert!(loaded.get(JointId::J0).0.abs() < 0.001);
    }

    #[test]
    fn test_set_overwrites() {
        let mut adjustments = StoredAdjustments::default();
        adjustments.set(JointId::J1, Degrees(1.0));
        adjustments.set(JointId::J1, Degrees(2.0));

        assert!((adjustments.get(JointId::J1).0 - 2.0).abs() < 0.001);
        assert_eq!(adjustments.joints.len(), 1);
    }
}
