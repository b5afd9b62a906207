//! The in-memory GOLD grammar store and its binary table loaders.

mod error;
mod loader;
pub mod types;

pub use error::GrammarError;
pub use goldrun_tables::TableFormat;
pub use types::{
    AdvanceMode, CharRange, CharSet, CharSetId, DfaEdge, DfaState, DfaStateId, EndingMode,
    Grammar, GrammarInfo, Group, GroupId, LrAction, LrState, LrStateId, Rule, RuleId, Symbol,
    SymbolId, SymbolKind,
};
