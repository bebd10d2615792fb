//! The expression editor behind the keypad.
//!
//! Button presses accumulate into a buffer written with display symbols.
//! The editor rejects edits that would produce an invalid expression and,
//! on equals, hands the normalized expression to an [`Evaluator`].

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::evaluation::{CalcResult, Evaluator, FastevalEvaluator, evaluate_expression};
use super::symbols::{OperatorType, SymbolTable};

/// Message shown when a calculation fails.
pub const DEFAULT_ERROR_MESSAGE: &str = "Oops...";

/// Text shown while the buffer is empty.
const EMPTY_DISPLAY: &str = "0";

/// Coarse state of the editor, derived from its buffer and flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
    /// Nothing entered yet.
    Empty,
    /// An expression is being typed.
    Composing,
    /// The buffer holds the result of the last calculation.
    Result,
    /// The last calculation failed and the buffer was discarded.
    Error,
}

type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Stateful buffer turning keypad events into an arithmetic expression.
pub struct ExpressionEditor<E: Evaluator = FastevalEvaluator> {
    symbols: SymbolTable,
    evaluator: E,
    error_message: String,
    current_input: String,
    /// Set after a successful calculation: the next digit starts a new number.
    reset_for_next_input: bool,
    failed: bool,
    display_text: String,
    on_change: Option<ChangeCallback>,
}

impl ExpressionEditor {
    /// Create an editor backed by the default evaluator.
    pub fn new(symbols: SymbolTable) -> Self {
        Self::with_evaluator(symbols, FastevalEvaluator)
    }
}

impl Default for ExpressionEditor {
    fn default() -> Self {
        Self::new(SymbolTable::default())
    }
}

impl<E: Evaluator> ExpressionEditor<E> {
    pub fn with_evaluator(symbols: SymbolTable, evaluator: E) -> Self {
        Self {
            symbols,
            evaluator,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            current_input: String::new(),
            reset_for_next_input: false,
            failed: false,
            display_text: EMPTY_DISPLAY.to_string(),
            on_change: None,
        }
    }

    /// Replace the message shown after a failed calculation.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Set the callback invoked with the new display text after every change.
    pub fn set_on_change(&mut self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.on_change = Some(Arc::new(callback));
    }

    /// The text the display should show.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// The expression under construction, in display symbols.
    pub fn input(&self) -> &str {
        &self.current_input
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn state(&self) -> EditorState {
        if self.current_input.is_empty() {
            if self.failed {
                EditorState::Error
            } else {
                EditorState::Empty
            }
        } else if self.reset_for_next_input {
            EditorState::Result
        } else {
            EditorState::Composing
        }
    }

    /// Handle a digit button. `token` is one or more ASCII digits.
    pub fn on_digit(&mut self, token: &str) {
        let starts_over = std::mem::take(&mut self.reset_for_next_input);
        if starts_over {
            self.current_input.clear();
        }

        if self.current_input.is_empty() && token == "0" {
            debug!("Ignoring leading zero");
            // The previous result is gone, so it must leave the display too
            if starts_over {
                self.publish();
            }
            return;
        }

        if self.current_input == "0" {
            self.current_input.clear();
        }

        self.current_input.push_str(token);
        self.publish();
    }

    /// Handle an operator button identified by its display symbol.
    pub fn on_operator(&mut self, symbol: &str) {
        let Some(kind) = self.symbols.lookup(symbol) else {
            debug!(symbol, "Ignoring unknown operator");
            return;
        };
        if kind.is_parenthesis() {
            debug!(symbol, "Parentheses go through the toggle");
            return;
        }

        // The shown result becomes the left operand
        self.reset_for_next_input = false;

        let display = self.symbols.display(kind);

        let Some(last) = self.current_input.chars().next_back() else {
            match kind {
                OperatorType::Separator => {
                    self.current_input.push('0');
                    self.current_input.push(display);
                    self.publish();
                }
                OperatorType::Minus => {
                    self.current_input.push(display);
                    self.publish();
                }
                _ => debug!(symbol, "Operator cannot start an expression"),
            }
            return;
        };

        if last == display {
            debug!(symbol, "Ignoring repeated operator");
            return;
        }

        if self.symbols.is_operator(last) {
            self.current_input.pop();
        }

        self.current_input.push(display);
        self.publish();
    }

    /// Handle the single parenthesis button, opening or closing a group.
    pub fn on_parenthesis_toggle(&mut self) {
        let open = self.symbols.display(OperatorType::OpenParen);
        let close = self.symbols.display(OperatorType::CloseParen);

        let opened = self.current_input.chars().filter(|&c| c == open).count();
        let closed = self.current_input.chars().filter(|&c| c == close).count();
        let unbalanced = opened > closed;

        let next = match self.current_input.chars().next_back() {
            // After a closed group: close the enclosing one, or start a new group
            Some(last) if last == close => Some(if unbalanced { close } else { open }),
            None => Some(open),
            Some(last) if self.symbols.is_operator(last) || last == open => Some(open),
            Some(_) if unbalanced => Some(close),
            Some(_) => None,
        };

        match next {
            Some(symbol) => {
                debug!(%symbol, opened, closed, "Parenthesis toggled");
                self.current_input.push(symbol);
                self.reset_for_next_input = false;
            }
            None => debug!(opened, closed, "No group left to close"),
        }

        self.publish();
    }

    /// Clear the whole expression.
    pub fn on_clear_all(&mut self) {
        self.current_input.clear();
        self.reset_for_next_input = false;
        self.publish();
    }

    /// Remove the last character of the expression.
    pub fn on_backspace(&mut self) {
        if self.current_input.pop().is_some() {
            self.publish();
        }
    }

    /// Evaluate the expression.
    ///
    /// Returns `None` when there is nothing to calculate. On success the
    /// formatted result replaces the buffer; on failure the buffer is
    /// cleared and the error message is displayed.
    pub fn calculate(&mut self) -> Option<CalcResult> {
        if self.current_input.is_empty() || self.current_input == EMPTY_DISPLAY {
            return None;
        }

        // A dangling operator is dropped rather than rejected
        if self
            .current_input
            .chars()
            .next_back()
            .is_some_and(|last| self.symbols.is_operator(last))
        {
            self.current_input.pop();
        }

        let expression = self.symbols.to_computation(&self.current_input);
        let result = evaluate_expression(&self.evaluator, &expression);

        match &result {
            CalcResult::Success { display_result, .. } => {
                info!(expression, result = %display_result, "Calculated");
                self.current_input = self.symbols.to_display(display_result);
                self.reset_for_next_input = true;
                self.publish();
            }
            CalcResult::Error { reason, .. } => {
                warn!(expression, reason, "Calculation failed");
                self.current_input.clear();
                self.reset_for_next_input = false;
                self.failed = true;
                self.display_text.clone_from(&self.error_message);
                self.notify();
            }
        }

        Some(result)
    }

    fn publish(&mut self) {
        self.failed = false;
        self.display_text = if self.current_input.is_empty() {
            EMPTY_DISPLAY.to_string()
        } else {
            self.current_input.clone()
        };
        self.notify();
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_change {
            callback(&self.display_text);
        }
    }
}
