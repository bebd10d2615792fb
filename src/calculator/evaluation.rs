//! Expression evaluation using fasteval.
//!
//! The editor talks to the evaluator through the [`Evaluator`] trait so the
//! arithmetic backend stays swappable.

use std::collections::BTreeMap;
use thiserror::Error;

/// Reasons an expression could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Failed to evaluate '{expression}': {reason}")]
    Parse { expression: String, reason: String },

    #[error("Expression '{expression}' did not produce a finite number ({value})")]
    NotFinite { expression: String, value: f64 },
}

/// Evaluates an infix expression written with computation symbols.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// The default evaluator backed by `fasteval::ez_eval`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastevalEvaluator;

impl Evaluator for FastevalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        // Use an empty namespace (no custom variables)
        let mut namespace = BTreeMap::<String, f64>::new();

        let value =
            fasteval::ez_eval(expression, &mut namespace).map_err(|e| EvalError::Parse {
                expression: expression.to_string(),
                reason: format!("{:?}", e),
            })?;

        // Division by zero surfaces as an infinity rather than an error
        if !value.is_finite() {
            return Err(EvalError::NotFinite {
                expression: expression.to_string(),
                value,
            });
        }

        Ok(value)
    }
}

impl<F> Evaluator for F
where
    F: Fn(&str) -> Result<f64, EvalError>,
{
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        self(expression)
    }
}

/// Outcome of a calculation.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a valid numeric result.
    Success {
        /// The expression handed to the evaluator.
        expression: String,
        /// The numeric value.
        value: f64,
        /// The formatted value as it appears on the display.
        display_result: String,
    },
    /// The evaluator rejected the expression.
    Error {
        /// The expression handed to the evaluator.
        expression: String,
        /// Why evaluation failed.
        reason: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The numeric value, if the calculation succeeded.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Format a number for the display.
///
/// Whole numbers drop the fractional part entirely; everything else uses the
/// shortest representation that round-trips.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Evaluate `expression` and package the outcome.
pub fn evaluate_expression(evaluator: &impl Evaluator, expression: &str) -> CalcResult {
    let expression = expression.to_string();

    match evaluator.evaluate(&expression) {
        Ok(value) => CalcResult::Success {
            display_result: format_result(value),
            expression,
            value,
        },
        Err(e) => CalcResult::Error {
            expression,
            reason: e.to_string(),
        },
    }
}
