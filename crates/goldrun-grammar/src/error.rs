use thiserror::Error;

/// Construction-time failures. A malformed or truncated record body never
/// produces one of these — it is dropped in place (best-effort loading,
/// see [`crate::loader`]) and will usually surface later as a runtime
/// parse error instead. Only an unrecognized header fails the whole load.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Unknown grammar file format: {0}")]
    UnknownHeader(String),
}
