#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
//! Library entry for the multitoken bonding-curve engine.
//!
//! Prices mints and burns against a bonding curve backed by one or more reserve
//! tokens, swaps between the two reserves of a swapper bond, and computes fees and
//! sanity checks. All arithmetic is exact 18-digit decimal; nothing is floating point
//! except chart rendering.
//!
//! # Modules
//! - [`dec`]: Fixed-point decimal arithmetic
//! - [`curves`]: Curve functions (power, sigmoid, swapper)
//! - [`bond`]: Bond definition, equality helpers and order limits
//! - [`reserve`]: Distribution of curve values across reserve tokens
//! - [`pricing`]: Mint prices and burn returns
//! - [`swap`]: Constant-product swaps
//! - [`fees`]: Transaction and exit fees
//! - [`verifier`]: Reserve sanity checks and curve verification
//! - [`plot`]: Visualization (optional in binaries)

/// Fixed-point decimal arithmetic
pub mod dec;

/// Error kinds returned by the engine
pub mod error;

/// Token amounts keyed by denomination
pub mod coins;

/// Named curve coefficients
pub mod params;

/// Curve functions: price and integral
pub mod curves;

/// Bond definition and comparison helpers
pub mod bond;

/// JSON bond descriptions
pub mod config;

/// Spreading curve values across reserve tokens
pub mod reserve;

/// Mint prices and burn returns
pub mod pricing;

/// Swaps between reserve tokens
pub mod swap;

/// Transaction and exit fees
pub mod fees;

/// Sanity checks and curve verification
pub mod verifier;

/// Visualization utilities for generating charts
pub mod plot;

pub use bond::Bond;
pub use coins::{Coin, Coins, DecCoin, DecCoins, MultitokenReserveValue};
pub use config::BondConfig;
pub use curves::{Curve, FunctionType};
pub use dec::{Amount, Dec};
pub use error::BondError;
pub use params::{FunctionParam, FunctionParams};
