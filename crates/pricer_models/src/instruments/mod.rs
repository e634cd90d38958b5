//! Financial instrument definitions.
//!
//! - [`VanillaOption`]: Strike, expiry, notional, payoff and exercise style
//! - [`InstrumentParams`]: Validated strike/expiry/notional triple
//! - [`PayoffType`]: Call or put
//! - [`ExerciseStyle`]: European, American or Bermudan
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//! use pricer_models::instruments::{InstrumentParams, PayoffType, VanillaOption, ExerciseStyle};
//!
//! let reference = Date::from_ymd(2024, 1, 2).unwrap();
//! let maturity = reference.add_days(360).unwrap();
//! let params = InstrumentParams::from_dates(
//!     6000.0,
//!     reference,
//!     maturity,
//!     DayCountConvention::Actual360,
//!     1.0,
//! )
//! .unwrap();
//! assert_eq!(params.expiry(), 1.0);
//!
//! let call = VanillaOption::new(params, PayoffType::Call, ExerciseStyle::European);
//! assert_eq!(call.payoff(6100.0), 100.0);
//! ```

pub mod error;
pub mod exercise;
pub mod params;
pub mod payoff;
pub mod vanilla;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use params::InstrumentParams;
pub use payoff::PayoffType;
pub use vanilla::VanillaOption;
