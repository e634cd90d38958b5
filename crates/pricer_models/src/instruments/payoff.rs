//! Payoff type definitions.

use num_traits::Float;

/// Type of vanilla payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Intrinsic value at `spot` for `strike`.
    #[inline]
    pub fn evaluate<T: Float>(&self, spot: T, strike: T) -> T {
        (self.sign::<T>() * (spot - strike)).max(T::zero())
    }

    /// `+1` for calls, `-1` for puts.
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            PayoffType::Call => T::one(),
            PayoffType::Put => -T::one(),
        }
    }

    /// Returns whether this payoff is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this payoff is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }
}

impl std::fmt::Display for PayoffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoffType::Call => write!(f, "Call"),
            PayoffType::Put => write!(f, "Put"),
        }
    }
}
