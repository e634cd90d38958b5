//! Market data structures consumed by the pricing models.
//!
//! All structures are generic over `T: Float`; the models and engines use
//! `f64`.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (FlatCurve, InterpolatedCurve)
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
//!
//! let risk_free = CurveEnum::flat(0.05_f64);
//! let dividends = CurveEnum::flat(0.02_f64);
//!
//! let df = risk_free.discount_factor(1.0).unwrap();
//! let carry = risk_free.zero_rate(1.0).unwrap() - dividends.zero_rate(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//! assert!((carry - 0.03).abs() < 1e-12);
//! ```

pub mod curves;
pub mod error;

pub use curves::{CurveEnum, CurveInterpolation, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
