//! Arm configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::joint::{JointConfig, JointId};
use super::units::{Degrees, StepsPerSec, StepsPerSecSquared};

/// Root configuration structure.
///
/// Deserializable from TOML (std) or built in code via
/// [`ArmConfig::igus_default`].
#[derive(Debug, Clone, Deserialize)]
pub struct ArmConfig {
    /// Per-joint configurations keyed by joint name (`j0` .. `j5`).
    pub joints: FnvIndexMap<String<8>, JointConfig, 8>,

    /// Joint whose homing is deferred during whole-arm sequences because its
    /// trailing cable fouls the switch while neighbours move.
    #[serde(default = "default_deferred_joint")]
    pub deferred_joint: JointId,
}

fn default_deferred_joint() -> JointId {
    JointId::J5
}

impl ArmConfig {
    /// Get a joint configuration by id.
    pub fn joint(&self, id: JointId) -> Option<&JointConfig> {
        self.joints
            .iter()
            .find(|(k, _)| k.as_str() == id.as_str())
            .map(|(_, v)| v)
    }

    /// List configured joint ids in slot order.
    pub fn joint_ids(&self) -> impl Iterator<Item = JointId> + '_ {
        JointId::ALL
            .into_iter()
            .filter(move |id| self.joint(*id).is_some())
    }

    /// The geometry table of the igus six-axis arm this controller was
    /// built around.
    pub fn igus_default() -> Self {
        let mut joints: FnvIndexMap<String<8>, JointConfig, 8> = FnvIndexMap::new();

        let table: [(JointId, u8, u8, u8, u8, u8, f32, f32, f32, f32, f32); 6] = [
            // id, step, dir, limit, encA, encB, limPos, limNeg, stepDeg, maxSpeed, maxAccel
            (JointId::J0, 0, 1, 26, 14, 15, 170.0, 170.0, 44.444_443, 1500.0, 800.0),
            (JointId::J1, 2, 3, 27, 17, 16, 90.0, 42.0, 55.555_557, 1200.0, 800.0),
            (JointId::J2, 4, 5, 28, 19, 18, 52.0, 89.0, 55.555_557, 1200.0, 800.0),
            (JointId::J3, 6, 7, 29, 20, 21, 165.0, 165.0, 42.726_646, 1500.0, 1000.0),
            (JointId::J4, 8, 9, 30, 23, 22, 105.0, 105.0, 21.860_25, 1000.0, 1000.0),
            (JointId::J5, 10, 11, 31, 24, 25, 155.0, 155.0, 22.222_221, 1000.0, 1000.0),
        ];

        for (id, step, dir, limit, enc_a, enc_b, pos, neg, step_deg, speed, accel) in table {
            let key: String<8> = String::try_from(id.as_str()).unwrap_or_default();
            let _ = joints.insert(
                key,
                JointConfig {
                    channel: id.index() as u8,
                    step_pin: step,
                    dir_pin: dir,
                    enable_pin: 32 + id.index() as u8,
                    invert_direction: false,
                    limit_pin: limit,
                    encoder_pin_a: enc_a,
                    encoder_pin_b: enc_b,
                    lim_pos: Degrees(pos),
                    lim_neg: Degrees(neg),
                    steps_per_degree: step_deg,
                    homing_dir: -1,
                    max_speed: StepsPerSec(speed),
                    max_accel: StepsPerSecSquared(accel),
                    limit_adjustment: Degrees(0.0),
                },
            );
        }

        Self {
            joints,
            deferred_joint: JointId::J5,
        }
    }
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            joints: FnvIndexMap::new(),
            deferred_joint: JointId::J5,
        }
    }
}
