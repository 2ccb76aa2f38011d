//! Keypad keys and key-script parsing.
//!
//! Maps the labels printed on the calculator keypad (and a few ASCII
//! aliases) to [`Key`] values, and splits scripts such as `"2+3*4="` or
//! `"90 sin"` into key sequences.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::CalcError;
use super::scientific::ScientificFunction;
use super::state::{AngleMode, Operator};

/// Scientific keypad labels with no engine behavior behind them.
const UNSUPPORTED_LABELS: &[&str] = &[
    "(", ")", "mc", "m+", "m-", "mr", "2nd", "x^y", "e^x", "10^x", "1/x", "²√x", "³√x", "y√x",
    "ln", "log₁₀", "log", "x!", "rand", "e", "ee",
];

lazy_static! {
    /// One token of a key script: a word, a single digit, or a keypad symbol.
    static ref TOKEN: Regex = Regex::new(
        r"^(?:x²|x³|\+/-|[A-Za-z]+|\d|[.+\-*/×÷−=%±π()])"
    ).unwrap();
}

/// A single calculator key press.
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    Digit(u8),
    DecimalPoint,
    Clear,
    ToggleSign,
    Percent,
    Operator(Operator),
    Equals,
    AngleMode(AngleMode),
    Scientific(ScientificFunction),
    /// A key present on the keypad that the engine does not implement.
    Unsupported(String),
}

impl Key {
    /// Look up the key for a keypad label.
    ///
    /// Word labels are case-insensitive. Returns `None` for labels that do
    /// not exist on either keypad.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();

        let key = match lower.as_str() {
            "." => Self::DecimalPoint,
            "ac" | "c" | "clear" => Self::Clear,
            "±" | "+/-" | "neg" => Self::ToggleSign,
            "%" => Self::Percent,
            "+" => Self::Operator(Operator::Add),
            "-" | "−" => Self::Operator(Operator::Subtract),
            "*" | "×" | "x" => Self::Operator(Operator::Multiply),
            "/" | "÷" => Self::Operator(Operator::Divide),
            "=" | "enter" => Self::Equals,
            "deg" => Self::AngleMode(AngleMode::Degrees),
            "rad" => Self::AngleMode(AngleMode::Radians),
            "π" | "pi" => Self::Scientific(ScientificFunction::Pi),
            "x²" | "x^2" | "sq" => Self::Scientific(ScientificFunction::Square),
            "x³" | "x^3" | "cube" => Self::Scientific(ScientificFunction::Cube),
            "sin" => Self::Scientific(ScientificFunction::Sin),
            "cos" => Self::Scientific(ScientificFunction::Cos),
            "tan" => Self::Scientific(ScientificFunction::Tan),
            "sinh" => Self::Scientific(ScientificFunction::Sinh),
            "cosh" => Self::Scientific(ScientificFunction::Cosh),
            "tanh" => Self::Scientific(ScientificFunction::Tanh),
            other => {
                if let Some(digit) = single_digit(other) {
                    Self::Digit(digit)
                } else if UNSUPPORTED_LABELS.contains(&other) {
                    Self::Unsupported(label.trim().to_string())
                } else {
                    return None;
                }
            }
        };

        Some(key)
    }

    /// Canonical keypad label.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Clear => "AC".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::AngleMode(mode) => mode.label().to_string(),
            Self::Scientific(function) => function.label().to_string(),
            Self::Unsupported(label) => label.clone(),
        }
    }
}

/// What happened when a key was pressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Applied,
    /// The key exists on the keypad but the engine has no behavior for it.
    Unsupported(String),
}

impl KeyOutcome {
    /// Notice for the presentation layer, if the key was not applied.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Applied => None,
            Self::Unsupported(label) => Some(format!("'{}' is not supported", label)),
        }
    }
}

fn single_digit(text: &str) -> Option<u8> {
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    c.to_digit(10).map(|d| d as u8)
}

/// Split a key script into keys.
///
/// Whitespace-separated words are first tried as whole labels (so `m+` or
/// `x^2` work when spaced out); anything else is tokenized greedily.
pub fn parse_key_sequence(input: &str) -> Result<Vec<Key>, CalcError> {
    let mut keys = Vec::new();

    for word in input.split_whitespace() {
        if let Some(key) = Key::from_label(word) {
            keys.push(key);
            continue;
        }

        let mut rest = word;
        while !rest.is_empty() {
            let token = TOKEN
                .find(rest)
                .map(|m| m.as_str())
                .ok_or_else(|| CalcError::UnknownKey(rest.to_string()))?;
            let key =
                Key::from_label(token).ok_or_else(|| CalcError::UnknownKey(token.to_string()))?;
            keys.push(key);
            rest = &rest[token.len()..];
        }
    }

    Ok(keys)
}
