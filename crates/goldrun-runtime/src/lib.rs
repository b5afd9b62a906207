//! Loads a GOLD Parser grammar table file and runs it against input
//! text: DFA lexer, group processor, LALR driver, behind one façade.

mod driver;
mod error;
mod group;
mod lexer;
mod source;
mod token;
mod tree;

#[cfg(test)]
mod testsupport;

pub use error::{Error, ParseError, ParseErrorKind};
pub use source::Position;
pub use tree::SyntaxNode;

use goldrun_grammar::{Grammar, GrammarInfo};
use group::GroupProcessor;
use lexer::Lexer;

/// Loads a grammar from the raw bytes of a `.cgt`/`.egt` table file.
pub fn new_parser(grammar_bytes: &[u8]) -> Result<Parser, Error> {
    let grammar = Grammar::load(grammar_bytes)?;
    Ok(Parser { grammar })
}

/// An immutable, loaded grammar. Cheap to use for many independent
/// parses: each `parse` call builds its own lexer, group processor and
/// driver state from scratch.
pub struct Parser {
    grammar: Grammar,
}

impl Parser {
    /// Wraps an already-built [`Grammar`], bypassing `new_parser`'s
    /// binary-file loading. Useful for grammars assembled or cached by
    /// the caller rather than read from a `.cgt`/`.egt` file.
    pub fn from_grammar(grammar: Grammar) -> Parser {
        Parser { grammar }
    }

    /// `input_bytes` is decoded as UTF-8, lossily replacing any invalid
    /// sequences — matching the loader's own best-effort posture rather
    /// than failing the whole parse over a single bad byte.
    pub fn parse(&self, input_bytes: &[u8], trim_reduce: bool) -> Result<SyntaxNode, ParseError> {
        let input = String::from_utf8_lossy(input_bytes);
        let lexer = Lexer::new(&self.grammar, &input);
        let mut group_processor = GroupProcessor::new(&self.grammar, lexer);
        driver::drive(&self.grammar, || group_processor.next_token(), trim_reduce)
    }

    pub fn information(&self) -> &GrammarInfo {
        &self.grammar.info
    }
}
