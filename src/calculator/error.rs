//! Error taxonomy for the calculator engine and its key driver.
//!
//! Arithmetic conditions never reach the caller of an engine action; the
//! engine turns them into the error marker on the display. They are still
//! modelled as a real error type so evaluation code can use `?` and so the
//! driver can log what happened.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Division with a zero right operand.
    #[error("division by zero")]
    DivisionByZero,

    /// A result overflowed or landed on a pole.
    #[error("result is not a finite number")]
    NonFiniteResult,

    /// Entry text that does not parse as a number.
    #[error("malformed numeric text: {0:?}")]
    MalformedNumericText(String),

    /// A key label or script token with no keypad counterpart.
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    /// A digit outside 0..=9.
    #[error("invalid digit: {0}")]
    InvalidDigit(u8),
}

impl CalcError {
    /// Whether this error puts the engine into its error display state.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::NonFiniteResult)
    }
}
