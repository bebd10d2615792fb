//! Operator symbols shown on the keypad and their evaluator counterparts.
//!
//! Every operator has a display symbol (what the user sees in the buffer)
//! and a computation symbol (what the evaluator understands). Both are
//! single characters.

use lazy_static::lazy_static;
use serde::Deserialize;

/// The closed set of operator buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorType {
    Plus,
    Minus,
    Multiply,
    Divide,
    Separator,
    OpenParen,
    CloseParen,
    Pow,
}

impl OperatorType {
    /// All operator types in table order.
    pub const ALL: [OperatorType; 8] = [
        Self::Plus,
        Self::Minus,
        Self::Multiply,
        Self::Divide,
        Self::Separator,
        Self::OpenParen,
        Self::CloseParen,
        Self::Pow,
    ];

    /// Parentheses are structural and do not take part in adjacency rules.
    pub fn is_parenthesis(self) -> bool {
        matches!(self, Self::OpenParen | Self::CloseParen)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Display and computation symbol for one operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorInfo {
    pub display: char,
    pub computation: char,
}

impl OperatorInfo {
    const fn new(display: char, computation: char) -> Self {
        Self {
            display,
            computation,
        }
    }
}

/// Which set of display glyphs the keypad uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SymbolStyle {
    /// Typographic glyphs: `− × ÷`.
    #[default]
    Math,
    /// ASCII minus and slash, `×` for multiplication.
    Classic,
}

lazy_static! {
    static ref MATH_TABLE: SymbolTable = SymbolTable::new([
        OperatorInfo::new('+', '+'),
        OperatorInfo::new('−', '-'),
        OperatorInfo::new('×', '*'),
        OperatorInfo::new('÷', '/'),
        OperatorInfo::new('.', '.'),
        OperatorInfo::new('(', '('),
        OperatorInfo::new(')', ')'),
        OperatorInfo::new('^', '^'),
    ]);
    static ref CLASSIC_TABLE: SymbolTable = SymbolTable::new([
        OperatorInfo::new('+', '+'),
        OperatorInfo::new('-', '-'),
        OperatorInfo::new('×', '*'),
        OperatorInfo::new('/', '/'),
        OperatorInfo::new('.', '.'),
        OperatorInfo::new('(', '('),
        OperatorInfo::new(')', ')'),
        OperatorInfo::new('^', '^'),
    ]);
}

/// Immutable mapping from [`OperatorType`] to [`OperatorInfo`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    entries: [OperatorInfo; 8],
    /// Display symbols of every non-parenthesis operator.
    operator_symbols: Vec<char>,
}

impl SymbolTable {
    /// Build a table from entries given in [`OperatorType::ALL`] order.
    pub fn new(entries: [OperatorInfo; 8]) -> Self {
        let operator_symbols = OperatorType::ALL
            .iter()
            .filter(|kind| !kind.is_parenthesis())
            .map(|kind| entries[kind.index()].display)
            .collect();

        Self {
            entries,
            operator_symbols,
        }
    }

    /// The preset table for a symbol style.
    pub fn for_style(style: SymbolStyle) -> Self {
        match style {
            SymbolStyle::Math => MATH_TABLE.clone(),
            SymbolStyle::Classic => CLASSIC_TABLE.clone(),
        }
    }

    pub fn info(&self, kind: OperatorType) -> OperatorInfo {
        self.entries[kind.index()]
    }

    pub fn display(&self, kind: OperatorType) -> char {
        self.info(kind).display
    }

    /// Reverse lookup from a display symbol to its operator type.
    ///
    /// Only resolves when `symbol` is exactly one display character.
    pub fn lookup(&self, symbol: &str) -> Option<OperatorType> {
        let mut chars = symbol.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };

        OperatorType::ALL
            .into_iter()
            .find(|kind| self.display(*kind) == c)
    }

    /// Whether `c` is the display symbol of a non-parenthesis operator.
    pub fn is_operator(&self, c: char) -> bool {
        self.operator_symbols.contains(&c)
    }

    /// Display symbols of all non-parenthesis operators.
    pub fn operator_symbols(&self) -> &[char] {
        &self.operator_symbols
    }

    /// Translate display symbols to evaluator symbols.
    pub fn to_computation(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                self.entries
                    .iter()
                    .find(|info| info.display == c && info.display != info.computation)
                    .map_or(c, |info| info.computation)
            })
            .collect()
    }

    /// Translate evaluator symbols back to display symbols.
    pub fn to_display(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                self.entries
                    .iter()
                    .find(|info| info.computation == c && info.display != info.computation)
                    .map_or(c, |info| info.display)
            })
            .collect()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::for_style(SymbolStyle::default())
    }
}
