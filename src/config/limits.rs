//! Travel limit types.

use serde::Deserialize;

use super::units::Degrees;

/// A joint's reachable range, `[-neg, +pos]` degrees around logical zero.
///
/// Both values are stored positive. A target outside the range is always
/// rejected; there is no clamping policy because a clamped command would move
/// the arm somewhere the caller did not ask for.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TravelLimits {
    /// Positive-direction limit in degrees.
    pub pos: Degrees,

    /// Negative-direction limit in degrees (positive value).
    pub neg: Degrees,
}

impl TravelLimits {
    /// Create new travel limits.
    pub fn new(pos: Degrees, neg: Degrees) -> Self {
        Self { pos, neg }
    }

    /// Check if limits are valid (non-negative with a usable span).
    pub fn is_valid(&self) -> bool {
        self.pos.0 >= 0.0 && self.neg.0 >= 0.0 && self.span().0 > 0.0
    }

    /// Total travel in degrees.
    pub fn span(&self) -> Degrees {
        self.pos + self.neg
    }

    /// Check if an angle is within the reachable range.
    pub fn contains(&self, angle: Degrees) -> bool {
        angle.0 >= -self.neg.0 && angle.0 <= self.pos.0
    }
}
