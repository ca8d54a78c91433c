//! Trapezoidal velocity profile math.

use libm::sqrtf;

/// A symmetric three-phase velocity profile: constant-acceleration ramp up,
/// constant-speed cruise, constant-acceleration ramp down.
///
/// When the travel is too short to reach cruise speed the profile clamps to
/// a pure triangle (zero cruise time, peak speed `√(D·A)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidProfile {
    /// Travel distance in steps (non-negative).
    pub distance: f32,

    /// Cruise speed in steps/s. For a triangular profile this is the peak.
    pub cruise_speed: f32,

    /// Acceleration in steps/s² (same magnitude both ramps).
    pub acceleration: f32,

    /// Ramp time in seconds (each of the two ramps).
    pub ramp_time: f32,

    /// Cruise time in seconds (zero for a triangular profile).
    pub cruise_time: f32,
}

impl TrapezoidProfile {
    /// Plan a profile for a travel distance at a cruise speed and
    /// acceleration.
    ///
    /// Degenerate inputs (zero distance, non-positive speed or acceleration)
    /// yield the zero profile.
    pub fn plan(distance: f32, cruise_speed: f32, acceleration: f32) -> Self {
        if distance <= 0.0 || cruise_speed <= 0.0 || acceleration <= 0.0 {
            return Self::zero();
        }

        let ramp_time = cruise_speed / acceleration;
        // Distance covered by both ramps together: 2 * (a·t²/2) = v·t
        let ramp_distance = cruise_speed * ramp_time;

        if ramp_distance >= distance {
            // Triangular: peak where the ramps meet
            let peak = sqrtf(distance * acceleration);
            return Self {
                distance,
                cruise_speed: peak,
                acceleration,
                ramp_time: peak / acceleration,
                cruise_time: 0.0,
            };
        }

        Self {
            distance,
            cruise_speed,
            acceleration,
            ramp_time,
            cruise_time: (distance - ramp_distance) / cruise_speed,
        }
    }

    /// The zero-length profile.
    pub fn zero() -> Self {
        Self {
            distance: 0.0,
            cruise_speed: 0.0,
            acceleration: 0.0,
            ramp_time: 0.0,
            cruise_time: 0.0,
        }
    }

    /// Whether this profile covers no distance.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.distance <= 0.0
    }

    /// Total duration in seconds.
    #[inline]
    pub fn total_time(&self) -> f32 {
        2.0 * self.ramp_time + self.cruise_time
    }

    /// Fraction of the distance covered at cruise speed (zero for a
    /// triangular profile).
    pub fn cruise_fraction(&self) -> f32 {
        if self.distance <= 0.0 {
            0.0
        } else {
            (self.cruise_speed * self.cruise_time) / self.distance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_phases() {
        // 4000 steps at 1000 steps/s, 2000 steps/s²
        let profile = TrapezoidProfile::plan(4000.0, 1000.0, 2000.0);

        assert!((profile.ramp_time - 0.5).abs() < 1e-6);
        // Ramps cover 1000 * 0.5 = 500 steps, cruise covers 3500
        assert!((profile.cruise_time - 3.5).abs() < 1e-4);
        assert!((profile.total_time() - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_distance_accounted_for() {
        let profile = TrapezoidProfile::plan(4000.0, 1000.0, 2000.0);

        let ramp_distance = profile.acceleration * profile.ramp_time * profile.ramp_time;
        let cruise_distance = profile.cruise_speed * profile.cruise_time;
        assert!((ramp_distance + cruise_distance - 4000.0).abs() < 0.5);
    }

    #[test]
    fn test_triangular_clamp() {
        // Too short to reach 10000 steps/s
        let profile = TrapezoidProfile::plan(100.0, 10_000.0, 1000.0);

        assert!((profile.cruise_time - 0.0).abs() < 1e-6);
        let expected_peak = libm::sqrtf(100.0 * 1000.0);
        assert!((profile.cruise_speed - expected_peak).abs() < 0.01);
        assert!((profile.cruise_fraction() - 0.0).abs() < 1e-6);

        // The two ramps still cover the whole distance
        let covered = profile.acceleration * profile.ramp_time * profile.ramp_time;
        assert!((covered - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_cruise_fraction() {
        let profile = TrapezoidProfile::plan(4000.0, 1000.0, 2000.0);
        // 3500 of 4000 steps at cruise
        assert!((profile.cruise_fraction() - 0.875).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(TrapezoidProfile::plan(0.0, 1000.0, 2000.0).is_zero());
        assert!(TrapezoidProfile::plan(100.0, 0.0, 2000.0).is_zero());
        assert!(TrapezoidProfile::plan(100.0, 1000.0, 0.0).is_zero());
        assert!((TrapezoidProfile::zero().total_time() - 0.0).abs() < 1e-9);
    }
}
