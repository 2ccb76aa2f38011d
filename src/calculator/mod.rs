//! Calculator engines for a desk-style keypad.
//!
//! This module provides:
//! - A basic four-function engine with chained, precedence-free evaluation
//! - A scientific engine layered on top of it (trig, hyperbolic, powers, π)
//! - Keypad labels and key-script parsing for driving either engine
//! - Display notification sinks and clipboard copy of results

mod basic;
mod clipboard;
mod display;
mod error;
mod format;
mod keys;
mod scientific;
mod state;

pub use basic::{BasicEngine, DEFAULT_MAX_INPUT_LEN};
pub use clipboard::copy_to_clipboard;
pub use display::{ChannelDisplay, DisplaySink, NullDisplay};
pub use error::CalcError;
pub use format::{ERROR_MARKER, format_value, parse_value};
pub use keys::{Key, KeyOutcome, parse_key_sequence};
pub use scientific::{ScientificEngine, ScientificFunction};
pub use state::{AngleMode, EngineState, Operator};
