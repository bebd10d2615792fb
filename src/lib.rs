//! A keypad calculator.
//!
//! [`calculator::ExpressionEditor`] holds the expression state machine,
//! [`keypad`] maps button presses onto it.

pub mod calculator;
pub mod clipboard;
pub mod config;
pub mod keypad;
