use goldrun_grammar::SymbolId;

use crate::source::Position;

/// An internal lexer token: a matched symbol, its text, and where it
/// started in the source.
#[derive(Debug, Clone)]
pub struct RawToken {
    pub symbol: SymbolId,
    pub text: String,
    pub position: Position,
}
