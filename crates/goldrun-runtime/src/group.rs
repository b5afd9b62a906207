//! The second lexical stage: legacy comment folding or the enhanced
//! group-nesting state machine, sitting between the raw DFA scanner and
//! the LALR driver.

use goldrun_grammar::{Grammar, SymbolKind, TableFormat};

use crate::lexer::Lexer;
use crate::token::RawToken;

enum LexMode {
    Legacy,
    Enhanced,
}

/// Folds raw DFA tokens into the tokens the driver actually sees: in
/// the legacy format, line- and block-comment text is absorbed into a
/// single token; in the enhanced format, a stack of in-progress groups
/// does the same job generically for any nested group symbol, not just
/// comments.
pub struct GroupProcessor<'g, 'a> {
    grammar: &'g Grammar,
    lexer: Lexer<'g, 'a>,
    mode: LexMode,
    stack: Vec<RawToken>,
}

impl<'g, 'a> GroupProcessor<'g, 'a> {
    pub fn new(grammar: &'g Grammar, lexer: Lexer<'g, 'a>) -> GroupProcessor<'g, 'a> {
        let mode = match grammar.format {
            TableFormat::Legacy => LexMode::Legacy,
            TableFormat::Enhanced => LexMode::Enhanced,
        };
        GroupProcessor {
            grammar,
            lexer,
            mode,
            stack: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> RawToken {
        match self.mode {
            LexMode::Legacy => self.next_token_legacy(),
            LexMode::Enhanced => self.next_token_enhanced(),
        }
    }

    fn next_token_legacy(&mut self) -> RawToken {
        let token = self.lexer.scan_one();
        match self.grammar.symbol(token.symbol).kind {
            SymbolKind::CommentLine => self.fold_line_comment(token),
            SymbolKind::GroupStart => self.fold_block_comment(token),
            _ => token,
        }
    }

    fn fold_line_comment(&mut self, mut token: RawToken) -> RawToken {
        loop {
            match self.lexer.source_mut().next() {
                Some(ch) if ch != '\n' && ch != '\r' => token.text.push(ch),
                Some(ch) => {
                    self.lexer.source_mut().push_back_last(ch);
                    return token;
                }
                None => return token,
            }
        }
    }

    fn fold_block_comment(&mut self, mut token: RawToken) -> RawToken {
        loop {
            let next = self.lexer.scan_one();
            let kind = self.grammar.symbol(next.symbol).kind;
            token.text.push_str(&next.text);
            if matches!(kind, SymbolKind::GroupEnd | SymbolKind::End) {
                return token;
            }
        }
    }

    fn next_token_enhanced(&mut self) -> RawToken {
        loop {
            let t = self.lexer.scan_one();
            let t_kind = self.grammar.symbol(t.symbol).kind;

            if t_kind == SymbolKind::End {
                return t;
            }

            let top_group = self
                .stack
                .last()
                .and_then(|top| self.grammar.symbol(top.symbol).group);

            if t_kind == SymbolKind::GroupStart {
                let t_group = self.grammar.symbol(t.symbol).group;
                let nests = match (top_group, t_group) {
                    (None, _) => true,
                    (Some(top), Some(candidate)) => self.grammar.group(top).permits_nested(candidate),
                    (Some(_), None) => false,
                };
                if nests {
                    self.stack.push(t);
                    continue;
                }
            }

            let Some(mut top) = self.stack.pop() else {
                return t;
            };

            let top_group_id = self
                .grammar
                .symbol(top.symbol)
                .group
                .expect("stacked token always belongs to a group");
            let group = self.grammar.group(top_group_id);

            if t.symbol == group.end {
                if group.ending_mode == goldrun_grammar::EndingMode::Closed {
                    top.text.push_str(&t.text);
                }
                if let Some(new_top) = self.stack.last_mut() {
                    new_top.text.push_str(&top.text);
                } else {
                    top.symbol = group.container;
                    return top;
                }
                continue;
            }

            match group.advance_mode {
                goldrun_grammar::AdvanceMode::Token => top.text.push_str(&t.text),
                goldrun_grammar::AdvanceMode::Character => {
                    let mut chars = t.text.chars();
                    if let Some(first) = chars.next() {
                        top.text.push(first);
                    }
                    let rest: Vec<char> = chars.collect();
                    if !rest.is_empty() {
                        self.lexer.source_mut().push_back_all(&rest);
                    }
                }
            }
            self.stack.push(top);
        }
    }
}
