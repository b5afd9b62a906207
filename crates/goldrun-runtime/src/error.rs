use goldrun_grammar::GrammarError;
use thiserror::Error;

use crate::source::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnknownToken,
    Syntax,
    UnexpectedEndOfFile,
}

/// A failed parse: what went wrong, the offending text (empty for
/// `UnexpectedEndOfFile`), and where.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind:?}: {text:?} at {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub text: String,
    pub position: Position,
}

impl ParseError {
    pub fn unknown_token(text: impl Into<String>, position: Position) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnknownToken,
            text: text.into(),
            position,
        }
    }

    pub fn syntax(text: impl Into<String>, position: Position) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Syntax,
            text: text.into(),
            position,
        }
    }

    pub fn unexpected_eof(position: Position) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnexpectedEndOfFile,
            text: String::new(),
            position,
        }
    }
}

/// Top-level error for the public façade, covering both construction-time
/// grammar failures and parse-time failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to read grammar file: {0}")]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
