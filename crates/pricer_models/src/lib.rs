//! # Pricer Models (L2: Business Logic)
//!
//! Option instruments and the stochastic process they are priced under.
//!
//! This crate provides:
//! - [`instruments`]: European vanilla options with validated parameters
//! - [`models`]: The Variance Gamma process and its characteristic function
//!
//! ## Design Principles
//!
//! - **Validate on construction**: every public type is valid once built
//! - **Immutable processes**: engines share one process across threads
//! - **Typed errors** that convert into [`pricer_core::types::PricingError`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
