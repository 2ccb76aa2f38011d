//! Engine state record and the small enums it is built from.

use serde::{Deserialize, Serialize};

use super::error::CalcError;
use super::format::ERROR_MARKER;

/// Binary operator awaiting its right operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator to `a` and `b`.
    ///
    /// Division by an exact zero is an error; every other non-finite result
    /// is reported as `NonFiniteResult`.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::NonFiniteResult)
        }
    }

    /// Keypad symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }
}

/// Unit used to interpret the argument of sin, cos and tan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// Convert an argument in this unit to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_radians(),
            Self::Radians => value,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Degrees => "Deg",
            Self::Radians => "Rad",
        }
    }
}

/// Mutable state of one calculator session.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    /// Left operand of the pending operation, or the last result.
    pub accumulator: f64,
    /// Raw text of the operand being entered or the last computed value.
    pub entry: String,
    /// Text currently shown. Differs from `entry` right after an operator press.
    pub display: String,
    pub pending: Option<Operator>,
    pub just_evaluated: bool,
    /// Entry holds an inserted constant; the next digit starts a new number.
    pub constant_entered: bool,
}

impl EngineState {
    /// Whether the entry holds the error marker.
    pub fn is_error(&self) -> bool {
        self.entry == ERROR_MARKER
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            entry: "0".to_string(),
            display: "0".to_string(),
            pending: None,
            just_evaluated: false,
            constant_entered: false,
        }
    }
}
