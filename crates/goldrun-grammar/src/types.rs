//! The in-memory grammar store: flat, index-addressed tables.
//!
//! Every cross-reference (symbol to group, DFA edge to DFA state, rule
//! to head symbol, ...) is a dense integer id rather than an owned or
//! reference-counted pointer, so the tables can be built incrementally
//! during loading without fighting the borrow checker over cycles.

use std::collections::HashMap;

macro_rules! table_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u16);
    };
}

table_id!(SymbolId);
table_id!(CharSetId);
table_id!(DfaStateId);
table_id!(LrStateId);
table_id!(RuleId);
table_id!(GroupId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    NonTerminal,
    Terminal,
    Noise,
    End,
    GroupStart,
    GroupEnd,
    CommentLine,
    Error,
}

impl SymbolKind {
    pub fn from_code(code: u16) -> Option<SymbolKind> {
        Some(match code {
            0 => SymbolKind::NonTerminal,
            1 => SymbolKind::Terminal,
            2 => SymbolKind::Noise,
            3 => SymbolKind::End,
            4 => SymbolKind::GroupStart,
            5 => SymbolKind::GroupEnd,
            6 => SymbolKind::CommentLine,
            7 => SymbolKind::Error,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub group: Option<GroupId>,
}

impl Symbol {
    fn blank(id: u16) -> Self {
        Symbol {
            id: SymbolId(id),
            name: String::new(),
            kind: SymbolKind::Error,
            group: None,
        }
    }

    /// The printed form used in a rule's display text: `<Name>` for
    /// non-terminals, the bare name otherwise.
    pub fn display(&self) -> String {
        match self.kind {
            SymbolKind::NonTerminal => format!("<{}>", self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    pub start: u16,
    pub end: u16,
}

#[derive(Debug, Clone)]
pub enum CharSet {
    Enumerated(String),
    Ranges { plane: u16, ranges: Vec<CharRange> },
}

impl CharSet {
    fn blank() -> Self {
        CharSet::Enumerated(String::new())
    }

    pub fn contains(&self, ch: char) -> bool {
        match self {
            CharSet::Enumerated(set) => set.chars().any(|c| c == ch),
            CharSet::Ranges { plane, ranges } => {
                let code = ch as u32;
                if ((code >> 16) & 0xFF) as u16 != *plane {
                    return false;
                }
                let unit = (code & 0xFFFF) as u16;
                // Ranges are sorted ascending by `start`, so the first
                // range whose start exceeds `unit` rules out every
                // subsequent one too.
                for range in ranges {
                    if unit < range.start {
                        return false;
                    }
                    if unit <= range.end {
                        return true;
                    }
                }
                false
            }
        }
    }

    pub(crate) fn sort_ranges(&mut self) {
        if let CharSet::Ranges { ranges, .. } = self {
            ranges.sort_by_key(|r| r.start);
        }
    }
}

#[derive(Debug, Clone)]
pub struct DfaEdge {
    pub char_set: CharSetId,
    pub target: DfaStateId,
}

#[derive(Debug, Clone)]
pub struct DfaState {
    pub accept: Option<SymbolId>,
    pub edges: Vec<DfaEdge>,
}

impl DfaState {
    fn blank() -> Self {
        DfaState {
            accept: None,
            edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: RuleId,
    pub head: SymbolId,
    pub body: Vec<SymbolId>,
}

impl Rule {
    fn blank(id: u16) -> Self {
        Rule {
            id: RuleId(id),
            head: SymbolId(0),
            body: Vec::new(),
        }
    }

    /// `<Head> ::= A B C`, the text a trimmed-out reduction's node carries.
    pub fn display(&self, grammar: &Grammar) -> String {
        let head = grammar.symbol(self.head).display();
        let body = self
            .body
            .iter()
            .map(|id| grammar.symbol(*id).display())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{head} ::= {body}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LrAction {
    Shift(LrStateId),
    Reduce(RuleId),
    Goto(LrStateId),
    Accept,
}

#[derive(Debug, Clone)]
pub struct LrState {
    pub id: LrStateId,
    pub actions: HashMap<SymbolId, LrAction>,
}

impl LrState {
    fn blank(id: u16) -> Self {
        LrState {
            id: LrStateId(id),
            actions: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    Token,
    Character,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingMode {
    Open,
    Closed,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub container: SymbolId,
    pub start: SymbolId,
    pub end: SymbolId,
    pub advance_mode: AdvanceMode,
    pub ending_mode: EndingMode,
    pub nested: Vec<GroupId>,
}

impl Group {
    fn blank(id: u16) -> Self {
        Group {
            id: GroupId(id),
            name: String::new(),
            container: SymbolId(0),
            start: SymbolId(0),
            end: SymbolId(0),
            advance_mode: AdvanceMode::Token,
            ending_mode: EndingMode::Open,
            nested: Vec::new(),
        }
    }

    pub fn permits_nested(&self, other: GroupId) -> bool {
        self.nested.contains(&other)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrammarInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    pub about: String,
}

/// The grammar as a set of flat, index-addressed tables built by a
/// [`crate::loader`] and then treated as immutable for the lifetime of
/// every parse that uses it.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub format: goldrun_tables::TableFormat,
    pub info: GrammarInfo,
    pub case_sensitive: bool,
    pub symbols: Vec<Symbol>,
    pub char_sets: Vec<CharSet>,
    pub rules: Vec<Rule>,
    pub dfa_states: Vec<DfaState>,
    pub lr_states: Vec<LrState>,
    pub groups: Vec<Group>,
    pub initial_dfa_state: DfaStateId,
    pub initial_lr_state: LrStateId,
    pub end_symbol: Option<SymbolId>,
    pub error_symbol: Option<SymbolId>,
}

impl Grammar {
    pub(crate) fn with_table_sizes(
        format: goldrun_tables::TableFormat,
        symbols: u16,
        char_sets: u16,
        rules: u16,
        dfa_states: u16,
        lr_states: u16,
        groups: u16,
    ) -> Grammar {
        Grammar {
            format,
            info: GrammarInfo::default(),
            case_sensitive: true,
            symbols: (0..symbols).map(Symbol::blank).collect(),
            char_sets: (0..char_sets).map(|_| CharSet::blank()).collect(),
            rules: (0..rules).map(Rule::blank).collect(),
            dfa_states: (0..dfa_states).map(|_| DfaState::blank()).collect(),
            lr_states: (0..lr_states).map(LrState::blank).collect(),
            groups: (0..groups).map(Group::blank).collect(),
            initial_dfa_state: DfaStateId(0),
            initial_lr_state: LrStateId(0),
            end_symbol: None,
            error_symbol: None,
        }
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn char_set(&self, id: CharSetId) -> &CharSet {
        &self.char_sets[id.0 as usize]
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0 as usize]
    }

    pub fn dfa_state(&self, id: DfaStateId) -> &DfaState {
        &self.dfa_states[id.0 as usize]
    }

    pub fn lr_state(&self, id: LrStateId) -> &LrState {
        &self.lr_states[id.0 as usize]
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0 as usize]
    }

    pub fn in_bounds_symbol(&self, idx: u16) -> Option<SymbolId> {
        ((idx as usize) < self.symbols.len()).then_some(SymbolId(idx))
    }

    pub fn in_bounds_char_set(&self, idx: u16) -> Option<CharSetId> {
        ((idx as usize) < self.char_sets.len()).then_some(CharSetId(idx))
    }

    pub fn in_bounds_dfa_state(&self, idx: u16) -> Option<DfaStateId> {
        ((idx as usize) < self.dfa_states.len()).then_some(DfaStateId(idx))
    }

    pub fn in_bounds_lr_state(&self, idx: u16) -> Option<LrStateId> {
        ((idx as usize) < self.lr_states.len()).then_some(LrStateId(idx))
    }

    pub fn in_bounds_rule(&self, idx: u16) -> Option<RuleId> {
        ((idx as usize) < self.rules.len()).then_some(RuleId(idx))
    }

    pub fn in_bounds_group(&self, idx: u16) -> Option<GroupId> {
        ((idx as usize) < self.groups.len()).then_some(GroupId(idx))
    }
}
