//! Calculator core: the expression editor and everything it relies on.
//!
//! This module provides functionality to:
//! - Map operator buttons to display and evaluator symbols
//! - Build an expression from keypad events while rejecting invalid edits
//! - Evaluate expressions using fasteval and format the results

mod editor;
mod evaluation;
mod symbols;

pub use editor::{DEFAULT_ERROR_MESSAGE, EditorState, ExpressionEditor};
pub use evaluation::{
    CalcResult, EvalError, Evaluator, FastevalEvaluator, evaluate_expression, format_result,
};
pub use symbols::{OperatorInfo, OperatorType, SymbolStyle, SymbolTable};
