//! Scientific calculator engine.
//!
//! Wraps a [`BasicEngine`] and adds unary functions that act on the current
//! entry only. A function pressed in the middle of an operation (`5 + sin`)
//! transforms the right operand and leaves the pending operation alone.

use std::f64::consts::PI;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::basic::BasicEngine;
use super::display::{DisplaySink, NullDisplay};
use super::keys::{Key, KeyOutcome};
use super::state::AngleMode;

/// Unary keys of the scientific keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScientificFunction {
    /// Insert π.
    Pi,
    Square,
    Cube,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
}

impl ScientificFunction {
    /// Evaluate the function at `value`.
    ///
    /// Only sin, cos and tan look at the angle mode; the hyperbolic
    /// functions always take the raw value.
    pub fn evaluate(self, value: f64, angle_mode: AngleMode) -> f64 {
        match self {
            Self::Pi => PI,
            Self::Square => value * value,
            Self::Cube => value * value * value,
            Self::Sin => angle_mode.to_radians(value).sin(),
            Self::Cos => angle_mode.to_radians(value).cos(),
            Self::Tan => angle_mode.to_radians(value).tan(),
            Self::Sinh => value.sinh(),
            Self::Cosh => value.cosh(),
            Self::Tanh => value.tanh(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
        }
    }
}

/// Basic engine plus scientific functions and an angle mode.
///
/// Dereferences to the wrapped [`BasicEngine`], so every basic action is
/// available directly.
pub struct ScientificEngine<S = NullDisplay> {
    basic: BasicEngine<S>,
    angle_mode: AngleMode,
}

impl ScientificEngine<NullDisplay> {
    pub fn new() -> Self {
        Self::with_display(NullDisplay)
    }
}

impl Default for ScientificEngine<NullDisplay> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DisplaySink> ScientificEngine<S> {
    pub fn with_display(sink: S) -> Self {
        Self::from_basic(BasicEngine::with_display(sink))
    }

    /// Extend an existing basic engine, keeping its state.
    pub fn from_basic(basic: BasicEngine<S>) -> Self {
        Self {
            basic,
            angle_mode: AngleMode::default(),
        }
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        debug!("Angle mode set to {:?}", angle_mode);
        self.angle_mode = angle_mode;
    }

    pub fn into_basic(self) -> BasicEngine<S> {
        self.basic
    }

    /// Apply a scientific function to the current entry.
    pub fn apply(&mut self, function: ScientificFunction) -> &str {
        debug!("Applying {}", function.label());
        match function {
            ScientificFunction::Pi => self.basic.insert_constant(PI),
            _ => {
                let angle_mode = self.angle_mode;
                self.basic
                    .transform_entry(|value| function.evaluate(value, angle_mode))
            }
        }
    }

    pub fn insert_pi(&mut self) -> &str {
        self.apply(ScientificFunction::Pi)
    }

    pub fn square(&mut self) -> &str {
        self.apply(ScientificFunction::Square)
    }

    pub fn cube(&mut self) -> &str {
        self.apply(ScientificFunction::Cube)
    }

    pub fn sin(&mut self) -> &str {
        self.apply(ScientificFunction::Sin)
    }

    pub fn cos(&mut self) -> &str {
        self.apply(ScientificFunction::Cos)
    }

    pub fn tan(&mut self) -> &str {
        self.apply(ScientificFunction::Tan)
    }

    pub fn sinh(&mut self) -> &str {
        self.apply(ScientificFunction::Sinh)
    }

    pub fn cosh(&mut self) -> &str {
        self.apply(ScientificFunction::Cosh)
    }

    pub fn tanh(&mut self) -> &str {
        self.apply(ScientificFunction::Tanh)
    }

    /// Apply a key from either keypad.
    pub fn press(&mut self, key: &Key) -> KeyOutcome {
        match key {
            Key::AngleMode(mode) => self.set_angle_mode(*mode),
            Key::Scientific(function) => {
                self.apply(*function);
            }
            other => return self.basic.press(other),
        }
        KeyOutcome::Applied
    }
}

impl<S> Deref for ScientificEngine<S> {
    type Target = BasicEngine<S>;

    fn deref(&self) -> &Self::Target {
        &self.basic
    }
}

impl<S> DerefMut for ScientificEngine<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::format::{ERROR_MARKER, value_or_zero};
    use crate::calculator::keys::parse_key_sequence;
    use crate::calculator::state::Operator;
    use approx::assert_relative_eq;

    fn run(engine: &mut ScientificEngine, script: &str) -> String {
        for key in parse_key_sequence(script).unwrap() {
            engine.press(&key);
        }
        engine.display().to_string()
    }

    #[test]
    fn test_sin_in_degrees() {
        let mut engine = ScientificEngine::new();
        assert_eq!(engine.angle_mode(), AngleMode::Degrees);
        assert_eq!(run(&mut engine, "90 sin"), "1");
    }

    #[test]
    fn test_sin_in_radians() {
        let mut engine = ScientificEngine::new().with_angle_mode(AngleMode::Radians);
        assert_eq!(run(&mut engine, "90 sin"), "0.893996663601");
    }

    #[test]
    fn test_angle_mode_key() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "rad 90"), "90");
        assert_eq!(engine.angle_mode(), AngleMode::Radians);
        run(&mut engine, "deg");
        assert_eq!(engine.angle_mode(), AngleMode::Degrees);
        assert_eq!(engine.display(), "90");
    }

    #[test]
    fn test_cos_and_tan_in_degrees() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "60 cos"), "0.5");
        engine.clear();
        assert_eq!(run(&mut engine, "45 tan"), "1");
        engine.clear();
        assert_eq!(run(&mut engine, "0 sin"), "0");
    }

    #[test]
    fn test_tan_at_pole() {
        // 90° converts to the nearest double below π/2, so tan stays finite.
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "90 tan"), "1.63312393532e+16");
        assert!(!engine.is_error());
    }

    #[test]
    fn test_non_finite_function_mid_operation_resets_operation() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "5+1000 cosh"), ERROR_MARKER);
        assert!(engine.is_error());
        assert_eq!(engine.pending_operator(), None);
        assert_eq!(engine.accumulator(), 0.0);
        assert_eq!(run(&mut engine, "="), "0");
    }

    #[test]
    fn test_digit_after_exponent_square_starts_fresh() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "1000000 x²"), "1e+12");
        assert_eq!(run(&mut engine, "5"), "5");
        engine.clear();
        run(&mut engine, "1000000 x²");
        assert_eq!(run(&mut engine, ".5"), "0.5");
        assert_eq!(engine.evaluate(), "0.5");
    }

    #[test]
    fn test_hyperbolic_ignores_angle_mode() {
        let mut degrees = ScientificEngine::new();
        let mut radians = ScientificEngine::new().with_angle_mode(AngleMode::Radians);
        for script in ["1 sinh", "1 cosh", "1 tanh"] {
            assert_eq!(run(&mut degrees, script), run(&mut radians, script));
            degrees.clear();
            radians.clear();
        }

        let mut engine = ScientificEngine::new();
        assert_relative_eq!(
            value_or_zero(&run(&mut engine, "1 sinh")),
            1f64.sinh(),
            epsilon = 1e-11
        );
        engine.clear();
        assert_eq!(run(&mut engine, "0 cosh"), "1");
    }

    #[test]
    fn test_square_and_cube() {
        let mut engine = ScientificEngine::new();
        assert_eq!(engine.square(), "0");
        run(&mut engine, "12");
        assert_eq!(engine.square(), "144");
        engine.clear();
        run(&mut engine, "3");
        engine.toggle_sign();
        assert_eq!(engine.cube(), "-27");
    }

    #[test]
    fn test_cube_overflow_is_error() {
        let mut engine = ScientificEngine::new().with_angle_mode(AngleMode::Radians);
        engine.insert_pi();
        for _ in 0..12 {
            engine.cube();
        }
        assert_eq!(engine.display(), ERROR_MARKER);
        assert!(engine.is_error());
        assert_eq!(engine.clear(), "0");
    }

    #[test]
    fn test_function_mid_operation_transforms_right_operand() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "5+30 sin"), "0.5");
        assert_eq!(engine.pending_operator(), Some(Operator::Add));
        assert_eq!(engine.accumulator(), 5.0);
        assert_eq!(run(&mut engine, "="), "5.5");
    }

    #[test]
    fn test_insert_pi() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "12 π"), "3.14159265359");
        assert_eq!(run(&mut engine, "2"), "2");
    }

    #[test]
    fn test_pi_as_right_operand() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "2*π="), "6.28318530718");
    }

    #[test]
    fn test_pi_after_error() {
        let mut engine = ScientificEngine::new();
        run(&mut engine, "1/0=");
        assert_eq!(engine.insert_pi(), "3.14159265359");
        assert!(!engine.is_error());
    }

    #[test]
    fn test_functions_ignored_in_error_state() {
        let mut engine = ScientificEngine::new();
        run(&mut engine, "1/0=");
        assert_eq!(engine.sin(), ERROR_MARKER);
        assert_eq!(engine.square(), ERROR_MARKER);
    }

    #[test]
    fn test_unsupported_key_leaves_state() {
        let mut engine = ScientificEngine::new();
        run(&mut engine, "4+");
        let before = engine.state().clone();
        let outcome = engine.press(&Key::Unsupported("x!".to_string()));
        assert_eq!(outcome, KeyOutcome::Unsupported("x!".to_string()));
        assert_eq!(
            outcome.notice().as_deref(),
            Some("'x!' is not supported")
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_basic_behavior_preserved() {
        let mut engine = ScientificEngine::new();
        assert_eq!(run(&mut engine, "2+3*4="), "20");
        engine.clear();
        assert_eq!(run(&mut engine, "200+10%"), "20");
        engine.clear();
        assert_eq!(run(&mut engine, "5/0="), ERROR_MARKER);
    }

    #[test]
    fn test_from_basic_keeps_state() {
        let mut basic = BasicEngine::new();
        basic.input_digit(9);
        let engine = ScientificEngine::from_basic(basic);
        assert_eq!(engine.display(), "9");
        assert_eq!(engine.into_basic().display(), "9");
    }
}
