//! The LALR shift/reduce/goto/accept loop: a state stack paired with a
//! syntax-tree node stack, driven by the grammar's action table.

use goldrun_grammar::{Grammar, LrAction, SymbolKind};

use crate::error::ParseError;
use crate::source::Position;
use crate::token::RawToken;
use crate::tree::SyntaxNode;

/// Runs the driver loop to completion over `tokens`, producing the
/// root [`SyntaxNode`] on `Accept` or a [`ParseError`] on the first
/// failing token. `trim_reduce` elides unit productions over a single
/// non-terminal body, per [`Grammar::rule`].
pub fn drive(
    grammar: &Grammar,
    mut tokens: impl FnMut() -> RawToken,
    trim_reduce: bool,
) -> Result<SyntaxNode, ParseError> {
    let mut states = vec![grammar.initial_lr_state];
    let mut nodes: Vec<SyntaxNode> = Vec::new();
    let mut shifted_once = false;
    let mut token = tokens();

    loop {
        let kind = grammar.symbol(token.symbol).kind;
        if matches!(
            kind,
            SymbolKind::GroupStart | SymbolKind::CommentLine | SymbolKind::Noise
        ) {
            token = tokens();
            continue;
        }
        if kind == SymbolKind::Error {
            return Err(ParseError::unknown_token(token.text, token.position));
        }

        let state = *states.last().expect("state stack never empties");
        let Some(action) = grammar.lr_state(state).actions.get(&token.symbol).copied() else {
            if kind == SymbolKind::End {
                let position = if shifted_once { token.position } else { Position::NONE };
                return Err(ParseError::unexpected_eof(position));
            }
            return Err(ParseError::syntax(token.text, token.position));
        };

        match action {
            LrAction::Shift(next_state) => {
                states.push(next_state);
                nodes.push(SyntaxNode::leaf(
                    grammar.symbol(token.symbol).display(),
                    token.text.clone(),
                    token.symbol,
                ));
                shifted_once = true;
                token = tokens();
            }
            LrAction::Reduce(rule_id) => {
                let rule = grammar.rule(rule_id);
                let produced = if trim_reduce && is_trim_eligible(grammar, rule) {
                    states.pop();
                    nodes.pop().expect("trim-eligible reduction has exactly one child")
                } else {
                    let arity = rule.body.len();
                    states.truncate(states.len() - arity);
                    let children = nodes.split_off(nodes.len() - arity);
                    SyntaxNode::interior(
                        grammar.symbol(rule.head).display(),
                        rule.display(grammar),
                        children,
                        rule_id,
                    )
                };
                nodes.push(produced);

                let state = *states.last().expect("state stack never empties");
                match grammar.lr_state(state).actions.get(&rule.head) {
                    Some(LrAction::Goto(goto_state)) => states.push(*goto_state),
                    _ => {
                        return Err(ParseError::syntax(
                            grammar.symbol(rule.head).display(),
                            token.position,
                        ));
                    }
                }
            }
            LrAction::Goto(_) => {
                return Err(ParseError::syntax(token.text, token.position));
            }
            LrAction::Accept => {
                return Ok(nodes.pop().expect("accept always follows a reduction to the start symbol"));
            }
        }
    }
}

fn is_trim_eligible(grammar: &Grammar, rule: &goldrun_grammar::Rule) -> bool {
    let [only] = rule.body.as_slice() else { return false };
    grammar.symbol(*only).kind == SymbolKind::NonTerminal
}
