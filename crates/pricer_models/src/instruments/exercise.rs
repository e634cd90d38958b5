//! Option exercise style definitions.

use num_traits::Float;

/// Option exercise style.
///
/// The Fourier engines price `European` only; the other styles exist so that
/// callers can describe a contract and get a typed rejection.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// let european: ExerciseStyle<f64> = ExerciseStyle::European;
/// let bermudan = ExerciseStyle::bermudan(vec![0.5, 0.75]);
/// assert!(european.is_european());
/// assert!(bermudan.allows_early_exercise());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseStyle<T: Float> {
    /// Exercise only at expiry.
    European,

    /// Exercise at any time before expiry.
    American,

    /// Exercise on specific dates.
    Bermudan {
        /// Exercise times in years from now
        exercise_dates: Vec<T>,
    },
}

impl<T: Float> ExerciseStyle<T> {
    /// Creates a Bermudan exercise style with the given exercise times.
    #[inline]
    pub fn bermudan(exercise_dates: Vec<T>) -> Self {
        ExerciseStyle::Bermudan { exercise_dates }
    }

    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether exercise before expiry is possible.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        !self.is_european()
    }

    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
            ExerciseStyle::Bermudan { .. } => "Bermudan",
        }
    }
}
