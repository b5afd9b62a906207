//! Single-token DFA scanning: longest match, then backtrack to the last
//! accepting state.

use goldrun_grammar::Grammar;

use crate::source::SourceReader;
use crate::token::RawToken;

pub struct Lexer<'g, 'a> {
    grammar: &'g Grammar,
    source: SourceReader<'a>,
}

impl<'g, 'a> Lexer<'g, 'a> {
    pub fn new(grammar: &'g Grammar, input: &'a str) -> Lexer<'g, 'a> {
        Lexer {
            grammar,
            source: SourceReader::new(input),
        }
    }

    pub fn source_mut(&mut self) -> &mut SourceReader<'a> {
        &mut self.source
    }

    /// Scans one token starting at the DFA's initial state. Every call
    /// either consumes at least one rune or returns the `End` token —
    /// the lexer is restartable across calls on the same source.
    ///
    /// On backtrack (dead end after at least one accept), the returned
    /// text is the whole buffer accumulated so far, not just the prefix
    /// that was accepting when last seen — only the one rune that caused
    /// the dead end is unread. This mirrors the original tokenizers,
    /// which keep the full accumulated buffer as the token text and only
    /// unread the final rune; trimming to the last-accept prefix would
    /// silently drop whatever ran between the last accept and the dead
    /// end.
    pub fn scan_one(&mut self) -> RawToken {
        let start = self.source.position();
        let mut state = self.grammar.initial_dfa_state;
        let mut buffer = String::new();
        let mut last_accept: Option<goldrun_grammar::SymbolId> = None;

        loop {
            let Some(ch) = self.source.next() else {
                return match last_accept {
                    Some(symbol) => RawToken { symbol, text: buffer, position: start },
                    None if buffer.is_empty() => RawToken {
                        symbol: self.end_symbol(),
                        text: String::new(),
                        position: start,
                    },
                    None => RawToken {
                        symbol: self.error_symbol(),
                        text: buffer,
                        position: start,
                    },
                };
            };

            let dfa = self.grammar.dfa_state(state);
            let transition = dfa
                .edges
                .iter()
                .find(|edge| self.grammar.char_set(edge.char_set).contains(ch))
                .map(|edge| edge.target);

            match transition {
                Some(target) => {
                    buffer.push(ch);
                    state = target;
                    if let Some(symbol) = self.grammar.dfa_state(state).accept {
                        last_accept = Some(symbol);
                    }
                }
                None => {
                    return match last_accept {
                        Some(symbol) => {
                            self.source.push_back_last(ch);
                            RawToken { symbol, text: buffer, position: start }
                        }
                        // No accept was ever reached: `ch` stays consumed
                        // (not pushed back) so a run of unrecognized runes
                        // inside a folding loop (block comment, group)
                        // always makes forward progress instead of
                        // re-reading the same dead-end rune forever.
                        None => RawToken {
                            symbol: self.error_symbol(),
                            text: ch.to_string(),
                            position: start,
                        },
                    };
                }
            }
        }
    }

    fn end_symbol(&self) -> goldrun_grammar::SymbolId {
        self.grammar.end_symbol.expect("grammar has no End symbol")
    }

    fn error_symbol(&self) -> goldrun_grammar::SymbolId {
        self.grammar
            .error_symbol
            .expect("grammar has no Error symbol")
    }
}
