use glpk::BoundType;

use crate::error::ModelError;

/// Which sides of an interval are finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Free,
    UpperOnly(f64),
    LowerOnly(f64),
    Fixed(f64),
    Double(f64, f64),
}

impl Bound {
    /// Classify `[lower, upper]`.
    ///
    /// Only `is_infinite` matters for a side, not the sign of the infinity.
    /// Equal finite bounds are `Fixed`, never `Double`. NaN and finite
    /// `lower > upper` are rejected.
    pub fn encode(lower: f64, upper: f64) -> Result<Bound, ModelError> {
        let inverted = lower.is_finite() && upper.is_finite() && lower > upper;
        if lower.is_nan() || upper.is_nan() || inverted {
            return Err(ModelError::InvalidBound { lower, upper });
        }
        let bound = match (lower.is_infinite(), upper.is_infinite()) {
            (true, true) => Bound::Free,
            (true, false) => Bound::UpperOnly(upper),
            (false, true) => Bound::LowerOnly(lower),
            (false, false) if lower == upper => Bound::Fixed(lower),
            (false, false) => Bound::Double(lower, upper),
        };
        Ok(bound)
    }

    /// Rebuild from what GLPK stores; unused sides become infinite
    pub fn decode(kind: BoundType, lower: f64, upper: f64) -> Bound {
        match kind {
            BoundType::Free => Bound::Free,
            BoundType::Lower => Bound::LowerOnly(lower),
            BoundType::Upper => Bound::UpperOnly(upper),
            BoundType::Fixed => Bound::Fixed(lower),
            BoundType::Double => Bound::Double(lower, upper),
        }
    }

    /// Bounds with `-inf` / `+inf` on open sides
    pub fn interval(self) -> (f64, f64) {
        match self {
            Bound::Free => (f64::NEG_INFINITY, f64::INFINITY),
            Bound::UpperOnly(upper) => (f64::NEG_INFINITY, upper),
            Bound::LowerOnly(lower) => (lower, f64::INFINITY),
            Bound::Fixed(value) => (value, value),
            Bound::Double(lower, upper) => (lower, upper),
        }
    }

    /// Shrink finite sides to the nearest integers inside the interval.
    ///
    /// `None` when no integer lies within the bounds.
    pub(crate) fn round_inward(self) -> Option<Bound> {
        let (lower, upper) = self.interval();
        let (lower, upper) = (lower.ceil(), upper.floor());
        if lower > upper {
            return None;
        }
        Bound::encode(lower, upper).ok()
    }

    /// GLPK type and the `(lb, ub)` pair to pass along with it
    pub(crate) fn to_glpk(self) -> (BoundType, f64, f64) {
        match self {
            Bound::Free => (BoundType::Free, 0.0, 0.0),
            Bound::UpperOnly(upper) => (BoundType::Upper, 0.0, upper),
            Bound::LowerOnly(lower) => (BoundType::Lower, lower, 0.0),
            Bound::Fixed(value) => (BoundType::Fixed, value, value),
            Bound::Double(lower, upper) => (BoundType::Double, lower, upper),
        }
    }
}
