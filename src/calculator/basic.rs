//! Four-function calculator engine.
//!
//! Evaluates like a desk calculator: every operator press folds the pending
//! operation left to right, with no precedence. Arithmetic failures never
//! reach the caller; they leave the error marker on the display until the
//! next clear.

use std::mem;

use tracing::{debug, warn};

use super::display::{DisplaySink, NullDisplay};
use super::error::CalcError;
use super::format::{ERROR_MARKER, format_value, value_or_zero};
use super::keys::{Key, KeyOutcome};
use super::state::{EngineState, Operator};

/// Default cap on the length of the entry text.
pub const DEFAULT_MAX_INPUT_LEN: usize = 32;

/// Basic calculator engine.
///
/// Every action returns the text now on the display, and the display sink
/// is told whenever that text changes.
pub struct BasicEngine<S = NullDisplay> {
    state: EngineState,
    sink: S,
    max_input_len: usize,
}

impl BasicEngine<NullDisplay> {
    pub fn new() -> Self {
        Self::with_display(NullDisplay)
    }
}

impl Default for BasicEngine<NullDisplay> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DisplaySink> BasicEngine<S> {
    /// Create a cleared engine that reports display changes to `sink`.
    pub fn with_display(mut sink: S) -> Self {
        let state = EngineState::default();
        sink.display_updated(&state.display);
        Self {
            state,
            sink,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }

    /// Set the maximum entry length. Values below 1 are raised to 1.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len.max(1);
        self
    }

    pub fn display(&self) -> &str {
        &self.state.display
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.state.pending
    }

    pub fn accumulator(&self) -> f64 {
        self.state.accumulator
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Reset to the cleared configuration.
    pub fn clear(&mut self) -> &str {
        debug!("Clear");
        self.reset_state();
        self.show_entry()
    }

    /// Enter a digit (0-9). Other values are ignored.
    pub fn input_digit(&mut self, digit: u8) -> &str {
        if digit > 9 {
            warn!("Ignoring key: {}", CalcError::InvalidDigit(digit));
            return self.display();
        }

        self.begin_entry();
        let c = char::from(b'0' + digit);
        if self.state.entry == "0" {
            self.state.entry = c.to_string();
        } else if self.entry_len() < self.max_input_len {
            self.state.entry.push(c);
        } else {
            debug!("Entry is at {} characters, dropping digit", self.max_input_len);
        }
        self.show_entry()
    }

    /// Enter a decimal point, at most once per number.
    pub fn input_decimal_point(&mut self) -> &str {
        self.begin_entry();
        if !self.state.entry.contains('.') && self.entry_len() < self.max_input_len {
            if self.state.entry.is_empty() {
                self.state.entry = "0.".to_string();
            } else {
                self.state.entry.push('.');
            }
        }
        self.show_entry()
    }

    /// Toggle the sign of the entry. The sign does not count toward the
    /// input length cap.
    pub fn toggle_sign(&mut self) -> &str {
        if self.state.is_error() {
            return self.display();
        }

        let entry = &mut self.state.entry;
        if let Some(rest) = entry.strip_prefix('-') {
            *entry = if rest.is_empty() {
                "0".to_string()
            } else {
                rest.to_string()
            };
        } else if *entry != "0" {
            entry.insert(0, '-');
        }
        self.show_entry()
    }

    /// Percent of the left operand while an operation is pending, else `/ 100`.
    pub fn percent(&mut self) -> &str {
        if self.state.is_error() {
            return self.display();
        }

        let value = value_or_zero(&self.state.entry);
        let result = match self.state.pending {
            Some(_) => self.state.accumulator * (value / 100.0),
            None => value / 100.0,
        };
        self.set_entry_value(result)
    }

    /// Press a binary operator, folding any pending operation first.
    pub fn press_operator(&mut self, op: Operator) -> &str {
        if self.state.is_error() {
            return self.clear();
        }

        match self.state.pending {
            None => {
                self.state.accumulator = value_or_zero(&self.state.entry);
            }
            Some(pending) => match self.apply_pending(pending) {
                Ok(result) => {
                    debug!("Folded {} into {}", pending.symbol(), result);
                    self.state.accumulator = result;
                    self.set_display(format_value(result));
                }
                Err(err) => return self.enter_error(err),
            },
        }

        self.state.pending = Some(op);
        self.state.just_evaluated = false;
        self.state.constant_entered = false;
        self.state.entry = "0".to_string();
        self.display()
    }

    /// Equals.
    pub fn evaluate(&mut self) -> &str {
        if self.state.is_error() {
            return self.clear();
        }

        let Some(op) = self.state.pending else {
            let value = value_or_zero(&self.state.entry);
            self.state.just_evaluated = true;
            return self.set_entry_value(value);
        };

        match self.apply_pending(op) {
            Ok(result) => {
                debug!("Evaluated {} to {}", op.symbol(), result);
                self.state.accumulator = result;
                self.state.entry = format_value(result);
                self.state.pending = None;
                self.state.just_evaluated = true;
                self.state.constant_entered = false;
                self.show_entry()
            }
            Err(err) => self.enter_error(err),
        }
    }

    /// Apply a key. Scientific keys are not available on this keypad.
    pub fn press(&mut self, key: &Key) -> KeyOutcome {
        match key {
            Key::Digit(digit) => {
                self.input_digit(*digit);
            }
            Key::DecimalPoint => {
                self.input_decimal_point();
            }
            Key::Clear => {
                self.clear();
            }
            Key::ToggleSign => {
                self.toggle_sign();
            }
            Key::Percent => {
                self.percent();
            }
            Key::Operator(op) => {
                self.press_operator(*op);
            }
            Key::Equals => {
                self.evaluate();
            }
            Key::AngleMode(_) | Key::Scientific(_) | Key::Unsupported(_) => {
                return KeyOutcome::Unsupported(key.label());
            }
        }
        KeyOutcome::Applied
    }

    /// Replace the entry with `f(entry)`. Used by the scientific operations.
    pub(super) fn transform_entry(&mut self, f: impl FnOnce(f64) -> f64) -> &str {
        if self.state.is_error() {
            return self.display();
        }
        let value = value_or_zero(&self.state.entry);
        self.set_entry_value(f(value))
    }

    /// Replace the entry with a constant; the next digit starts a new number.
    pub(super) fn insert_constant(&mut self, value: f64) -> &str {
        self.begin_entry();
        self.state.constant_entered = true;
        self.set_entry_value(value)
    }

    fn apply_pending(&self, op: Operator) -> Result<f64, CalcError> {
        op.apply(self.state.accumulator, value_or_zero(&self.state.entry))
    }

    /// Length of the entry without its sign.
    fn entry_len(&self) -> usize {
        self.state.entry.trim_start_matches('-').len()
    }

    /// Prepare the entry for new input: leave the error state and start a
    /// fresh number after an evaluation, an inserted constant, or a result
    /// shown in exponent notation (digits cannot extend it).
    fn begin_entry(&mut self) {
        if self.state.is_error() {
            debug!("Clearing error before new entry");
            self.reset_state();
        }
        let after_result = self.state.just_evaluated && self.state.pending.is_none();
        let exponent_form = self.state.entry.contains('e');
        if after_result || self.state.constant_entered || exponent_form {
            self.state.entry = "0".to_string();
            self.state.just_evaluated = false;
            self.state.constant_entered = false;
        }
    }

    fn reset_state(&mut self) {
        let display = mem::take(&mut self.state.display);
        self.state = EngineState {
            display,
            ..EngineState::default()
        };
    }

    fn set_entry_value(&mut self, value: f64) -> &str {
        if !value.is_finite() {
            return self.enter_error(CalcError::NonFiniteResult);
        }
        self.state.entry = format_value(value);
        self.show_entry()
    }

    fn enter_error(&mut self, err: CalcError) -> &str {
        debug!("Entering error state: {}", err);
        self.state.entry = ERROR_MARKER.to_string();
        self.state.accumulator = 0.0;
        self.state.pending = None;
        self.state.just_evaluated = true;
        self.state.constant_entered = false;
        self.show_entry()
    }

    fn show_entry(&mut self) -> &str {
        let entry = self.state.entry.clone();
        self.set_display(entry);
        self.display()
    }

    fn set_display(&mut self, text: String) {
        if self.state.display != text {
            self.state.display = text;
            self.sink.display_updated(&self.state.display);
        }
    }
}
