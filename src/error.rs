//! Error kinds returned by the pricing engine

use thiserror::Error;

/// Every failure the engine can report, distinguishable by kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BondError {
    /// The operation is not defined for the bond's function type
    #[error("function not available for function type {0}")]
    FunctionNotAvailable(String),

    /// A token in the request is not one of the bond's reserve tokens
    #[error("token {0} is not a valid reserve token")]
    ReserveTokenInvalid(String),

    /// Swap input is too small (or too large) to produce a valid swap
    #[error("swap amount invalid: {0}")]
    SwapAmountInvalid(String),

    /// A result does not fit the supported decimal magnitude
    #[error("numeric overflow")]
    NumericOverflow,

    /// Division by a zero decimal
    #[error("division by zero")]
    DivisionByZero,

    /// Ratio-based pricing on a bond that has no supply yet
    #[error("function requires non-zero current supply")]
    RequiresNonZeroSupply,

    /// Function parameters do not match the function type
    #[error("invalid function parameters: {0}")]
    InvalidFunctionParams(String),

    /// Bond configuration is not economically valid
    #[error("invalid bond: {0}")]
    InvalidBond(String),

    /// Text could not be parsed as a decimal
    #[error("cannot parse decimal {0:?}")]
    ParseDecimal(String),
}

/// Engine result alias
pub type Result<T> = std::result::Result<T, BondError>;
