use goldrun_grammar::{RuleId, SymbolId};

/// The publicly observable parse result. For a terminal leaf, `text` is
/// the matched input substring; for a non-terminal, `text` is the
/// producing rule's printed form (`<Head> ::= A B C`).
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub name: String,
    pub text: String,
    pub children: Vec<SyntaxNode>,
    pub is_terminal: bool,
    pub symbol_id: Option<SymbolId>,
    pub rule_id: Option<RuleId>,
}

impl SyntaxNode {
    pub fn leaf(name: String, text: String, symbol_id: SymbolId) -> SyntaxNode {
        SyntaxNode {
            name,
            text,
            children: Vec::new(),
            is_terminal: true,
            symbol_id: Some(symbol_id),
            rule_id: None,
        }
    }

    pub fn interior(name: String, text: String, children: Vec<SyntaxNode>, rule_id: RuleId) -> SyntaxNode {
        SyntaxNode {
            name,
            text,
            children,
            is_terminal: false,
            symbol_id: None,
            rule_id: Some(rule_id),
        }
    }
}
