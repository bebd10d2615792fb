//! User configuration.

mod loader;

pub use loader::ConfigError;

use serde::Deserialize;

use crate::calculator::{DEFAULT_ERROR_MESSAGE, SymbolStyle};

/// Root configuration, read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Glyph set used on the keypad and the display.
    pub style: SymbolStyle,
    /// Text shown when a calculation fails.
    pub error_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: SymbolStyle::default(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}
