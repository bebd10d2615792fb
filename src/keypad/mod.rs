//! Keypad buttons and their dispatch onto the expression editor.
//!
//! A key script is a string where every character is one button press,
//! e.g. `"(1+2)*3="`. Typographic and ASCII operator glyphs are both
//! accepted; the editor always receives its own display symbols.

use thiserror::Error;

use crate::calculator::{CalcResult, Evaluator, ExpressionEditor, OperatorType};

/// Errors produced while reading a key script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Unknown key '{key}' at position {position}")]
    Unknown { key: char, position: usize },
}

/// A button on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit button (`0`-`9`)
    Digit(char),
    /// An operator button
    Operator(OperatorType),
    /// The single parenthesis button
    Parenthesis,
    /// Clear the whole expression
    ClearAll,
    /// Remove the last character
    Backspace,
    /// Evaluate
    Equals,
}

impl Key {
    /// Map a script character to a key.
    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c {
            '0'..='9' => return Some(Self::Digit(c)),
            'c' | 'C' => return Some(Self::ClearAll),
            '<' | 'b' => return Some(Self::Backspace),
            '=' => return Some(Self::Equals),
            '+' => OperatorType::Plus,
            '-' | '−' => OperatorType::Minus,
            '*' | '×' | 'x' => OperatorType::Multiply,
            '/' | '÷' => OperatorType::Divide,
            '.' | ',' => OperatorType::Separator,
            '^' => OperatorType::Pow,
            '(' => OperatorType::OpenParen,
            ')' => OperatorType::CloseParen,
            _ => return None,
        };
        Some(kind.into())
    }
}

impl From<OperatorType> for Key {
    fn from(kind: OperatorType) -> Self {
        match kind {
            OperatorType::OpenParen | OperatorType::CloseParen => Self::Parenthesis,
            other => Self::Operator(other),
        }
    }
}

/// Parse a key script, skipping whitespace.
pub fn parse_keys(script: &str) -> Result<Vec<Key>, KeyError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, key)| Key::from_char(key).ok_or(KeyError::Unknown { key, position }))
        .collect()
}

/// Press one key. Returns the calculation outcome for [`Key::Equals`].
pub fn press<E: Evaluator>(editor: &mut ExpressionEditor<E>, key: Key) -> Option<CalcResult> {
    match key {
        Key::Digit(digit) => editor.on_digit(digit.encode_utf8(&mut [0; 4])),
        Key::Operator(kind) => {
            let symbol = editor.symbols().display(kind);
            editor.on_operator(symbol.encode_utf8(&mut [0; 4]));
        }
        Key::Parenthesis => editor.on_parenthesis_toggle(),
        Key::ClearAll => editor.on_clear_all(),
        Key::Backspace => editor.on_backspace(),
        Key::Equals => return editor.calculate(),
    }
    None
}

/// Parse `script` and press every key in order.
///
/// Nothing is pressed if the script contains an unknown key. Returns the
/// outcome of the last calculation performed, if any.
pub fn feed<E: Evaluator>(
    editor: &mut ExpressionEditor<E>,
    script: &str,
) -> Result<Option<CalcResult>, KeyError> {
    let keys = parse_keys(script)?;

    let mut last = None;
    for key in keys {
        if let Some(result) = press(editor, key) {
            last = Some(result);
        }
    }

    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{SymbolStyle, SymbolTable};

    fn display_after(script: &str) -> String {
        let mut editor: ExpressionEditor = ExpressionEditor::default();
        feed(&mut editor, script).unwrap();
        editor.display_text().to_string()
    }

    #[test]
    fn test_parse_keys() {
        let keys = parse_keys("1 + (2)=").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit('1'),
                Key::Operator(OperatorType::Plus),
                Key::Parenthesis,
                Key::Digit('2'),
                Key::Parenthesis,
                Key::Equals,
            ]
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_keys("12a"),
            Err(KeyError::Unknown {
                key: 'a',
                position: 2
            })
        );
    }

    #[test]
    fn test_feed_rejects_whole_script_on_unknown_key() {
        let mut editor: ExpressionEditor = ExpressionEditor::default();
        feed(&mut editor, "12").unwrap();
        assert!(feed(&mut editor, "3?").is_err());
        assert_eq!(editor.input(), "12");
    }

    #[test]
    fn test_ascii_aliases_reach_display_symbols() {
        let mut editor: ExpressionEditor = ExpressionEditor::default();
        feed(&mut editor, "8/2-1*3").unwrap();
        assert_eq!(editor.input(), "8÷2−1×3");
    }

    #[test]
    fn test_feed_returns_last_result() {
        let mut editor: ExpressionEditor = ExpressionEditor::default();
        let result = feed(&mut editor, "4*3=").unwrap().unwrap();
        assert!(result.is_success());
        assert_eq!(result.value(), Some(12.0));

        assert_eq!(feed(&mut editor, "+1").unwrap(), None);
    }

    #[test]
    fn test_scripts() {
        assert_eq!(display_after("05"), "5");
        assert_eq!(display_after("3+-"), "3−");
        assert_eq!(display_after("3++"), "3+");
        assert_eq!(display_after("(2)("), "(2)(");
        assert_eq!(display_after("6+="), "6");
        assert_eq!(display_after("5/0="), "Oops...");
        assert_eq!(display_after("5/0=7"), "7");
        assert_eq!(display_after("1/3="), "0.3333333333333333");
        assert_eq!(display_after("12+3c"), "0");
        assert_eq!(display_after("12<"), "1");
        assert_eq!(display_after(".5*2="), "1");
        assert_eq!(display_after("2^3="), "8");
    }

    #[test]
    fn test_classic_keypad() {
        let mut editor = ExpressionEditor::new(SymbolTable::for_style(SymbolStyle::Classic));
        feed(&mut editor, "8÷2−1").unwrap();
        assert_eq!(editor.input(), "8/2-1");
    }

    #[test]
    fn test_key_from_operator_type() {
        assert_eq!(Key::from(OperatorType::OpenParen), Key::Parenthesis);
        assert_eq!(Key::from_char(')'), Some(Key::Parenthesis));
        assert_eq!(Key::from_char('÷'), Some(Key::Operator(OperatorType::Divide)));
        assert_eq!(
            Key::from(OperatorType::Pow),
            Key::Operator(OperatorType::Pow)
        );
    }
}
